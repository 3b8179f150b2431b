//! Report Service 連携

pub mod download;
pub mod report_service;

use wasm_bindgen::{JsCast, JsValue};

/// JS側の例外からメッセージを取り出す
pub fn js_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
