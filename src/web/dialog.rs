//! 阻塞式用户提示
//!
//! 校验错误与网络错误统一通过 `window.alert` 反馈。
//! 非 wasm 目标（测试）退化为标准错误输出。

pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("[alert] {message}");
    }
}
