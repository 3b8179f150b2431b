//! ブラウザ上で動かすテスト（wasm-pack test --headless --firefox）

use feedback_catalyst_common::{validate_upload, LocalFile, ValidationError};
use feedback_catalyst_wasm::api::js_message;
use feedback_catalyst_wasm::api::report_service::{service_url, BrowserFile, BrowserReportService};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn browser_file(name: &str, contents: &str) -> BrowserFile {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let file = web_sys::File::new_with_str_sequence(&parts, name).expect("File");
    BrowserFile::new(file)
}

#[wasm_bindgen_test]
fn test_browser_file_metadata() {
    let file = browser_file("survey.csv", "Name,Q1\nA,5\n");
    assert_eq!(file.name(), "survey.csv");
    assert_eq!(file.size(), 12);
    assert!(validate_upload(&file).is_ok());
}

#[wasm_bindgen_test]
fn test_browser_file_rejected_extension() {
    let file = browser_file("notes.txt", "hello");
    assert!(matches!(
        validate_upload(&file),
        Err(ValidationError::UnsupportedExtension { .. })
    ));
}

#[wasm_bindgen_test]
fn test_js_message() {
    let error: JsValue = js_sys::Error::new("boom").into();
    assert_eq!(js_message(&error), "boom");
    assert_eq!(js_message(&JsValue::from_str("plain")), "plain");
}

#[wasm_bindgen_test]
fn test_default_service_url() {
    let service = BrowserReportService::default();
    assert_eq!(service.endpoints().base_url(), service_url().trim_end_matches('/'));
}
