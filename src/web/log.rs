//! 控制台日志宏
//!
//! wasm32 上输出到浏览器控制台，其余目标输出到标准流，
//! 因此核心逻辑可以在宿主平台直接跑测试。

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => {
        web_sys::console::log_1(&format!($($t)*).into())
    };
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => {
        println!($($t)*)
    };
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => {
        web_sys::console::error_1(&format!($($t)*).into())
    };
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => {
        eprintln!($($t)*)
    };
}

pub(crate) use {log_error, log_info};
