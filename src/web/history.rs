//! History API 封装
//!
//! 地址栏只作为当前页面的镜像：发布状态时用 replaceState 同步，
//! 后退/前进事件由调用方决定如何处理（本应用固定回到信息流）。

use wasm_bindgen::prelude::*;

/// 当前浏览器路径
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 用 replaceState 把页面路径写入地址栏，不产生历史记录
pub fn replace(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 注册 popstate 监听器
pub fn on_popstate<F>(callback: F)
where
    F: Fn() + 'static,
{
    let closure = Closure::<dyn Fn()>::new(callback);

    if let Some(window) = web_sys::window() {
        let _ =
            window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
    }

    // 泄漏闭包以保持监听器存活
    closure.forget();
}
