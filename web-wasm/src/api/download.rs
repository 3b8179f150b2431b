//! レポートアーカイブのダウンロード

use super::js_message;
use feedback_catalyst_common::{ArchiveSink, Result, WorkflowError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Blob URL + アンカーのクリックで保存させる
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDownload;

impl ArchiveSink for BrowserDownload {
    fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        trigger_download(file_name, bytes).map_err(|e| WorkflowError::Archive(js_message(&e)))
    }
}

fn missing(what: &str) -> JsValue {
    JsValue::from_str(&format!("{} is not available", what))
}

fn trigger_download(file_name: &str, bytes: &[u8]) -> std::result::Result<(), JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type("application/zip");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| missing("document"))?;
    let body = document.body().ok_or_else(|| missing("document body"))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(JsValue::from)?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();

    Url::revoke_object_url(&url)
}
