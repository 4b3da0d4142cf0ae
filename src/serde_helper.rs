//! Serde <-> 浏览器 JSON 通道
//!
//! 借助 `serde_wasm_bindgen` 和 `js_sys::JSON` 在 Rust 结构体与 JSON
//! 字符串之间转换，避免在 WASM 里携带完整的 serde_json。

use serde::{Serialize, de::DeserializeOwned};
use wasm_bindgen::JsValue;

#[derive(Debug)]
pub enum Error {
    SerdeWasmBindgen(serde_wasm_bindgen::Error),
    JsSys(JsValue),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::SerdeWasmBindgen(e) => write!(f, "Serde WASM Bindgen Error: {}", e),
            Error::JsSys(v) => write!(f, "JS Sys Error: {:?}", v),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_wasm_bindgen::Error> for Error {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Error::SerdeWasmBindgen(e)
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<JsValue, Error> {
    // 大整数按普通 JS number 序列化，JSON.stringify 不支持 BigInt
    let serializer =
        serde_wasm_bindgen::Serializer::new().serialize_large_number_types_as_bigints(false);
    value.serialize(&serializer).map_err(Error::from)
}

/// 将 Rust 结构体序列化为 JSON 字符串（经由 JsValue 和 JSON.stringify）
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String, Error> {
    let js_val = to_value(value)?;
    let json_str = js_sys::JSON::stringify(&js_val)
        .map_err(Error::JsSys)?
        .as_string()
        .ok_or_else(|| Error::JsSys(JsValue::from_str("JSON.stringify returned non-string")))?;
    Ok(json_str)
}

/// 将 JSON 字符串解析为 Rust 结构体（经由 JSON.parse 和 JsValue）
pub fn from_json_string<T: DeserializeOwned>(s: &str) -> Result<T, Error> {
    let js_val = js_sys::JSON::parse(s).map_err(Error::JsSys)?;
    serde_wasm_bindgen::from_value(js_val).map_err(Error::from)
}
