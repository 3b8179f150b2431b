//! Report Service 連携（fetch + FormData）
//!
//! 非2xxの本文はテキストとして読み、JSONのパース失敗は
//! `MalformedResponse` として区別する。

use super::js_message;
use gloo::console;
use feedback_catalyst_common::{
    parse_json, Action, ChartsResponse, Endpoints, HeadersResponse, LocalFile, ReportForm,
    ReportService, Result, UploadResponse, WorkflowError, DEFAULT_SERVICE_URL,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

/// Report Service のベースURL
///
/// ビルド時の `REPORT_SERVICE_URL` で上書きできる。
pub fn service_url() -> &'static str {
    option_env!("REPORT_SERVICE_URL").unwrap_or(DEFAULT_SERVICE_URL)
}

/// ファイル選択で得たファイル
#[derive(Clone)]
pub struct BrowserFile {
    file: File,
    name: String,
    size: u64,
}

impl BrowserFile {
    pub fn new(file: File) -> Self {
        let name = file.name();
        let size = file.size() as u64;
        Self { file, name, size }
    }

    pub fn file(&self) -> &File {
        &self.file
    }
}

impl LocalFile for BrowserFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// ブラウザ版 Report Service
#[derive(Debug, Clone)]
pub struct BrowserReportService {
    endpoints: Endpoints,
}

impl Default for BrowserReportService {
    fn default() -> Self {
        Self::new(service_url())
    }
}

impl BrowserReportService {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoints: Endpoints::new(base_url),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

fn upload_form(file: &BrowserFile) -> std::result::Result<FormData, JsValue> {
    let data = FormData::new()?;
    data.append_with_blob_and_filename("file", file.file(), file.name())?;
    Ok(data)
}

fn report_form(file: &BrowserFile, form: &ReportForm) -> std::result::Result<FormData, JsValue> {
    let data = upload_form(file)?;
    data.append_with_str("choice", form.choice())?;
    data.append_with_str("feedbackType", form.feedback_type())?;
    Ok(data)
}

/// リクエスト送信（非2xxは `Transport` エラー）
async fn send(action: Action, method: &str, url: &str, body: Option<&FormData>) -> Result<Response> {
    let network = move |e: JsValue| WorkflowError::network(action, js_message(&e));

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(body);
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(network)?;
    let window = web_sys::window()
        .ok_or_else(|| WorkflowError::network(action, "window is not available"))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?;
    let response: Response = value.dyn_into().map_err(network)?;

    if !response.ok() {
        let body = match text(action, &response).await {
            Ok(body) => body,
            Err(e) => {
                console::warn!(format!("failed to read error body: {}", e));
                String::new()
            }
        };
        return Err(WorkflowError::transport(action, response.status(), body));
    }
    Ok(response)
}

async fn text(action: Action, response: &Response) -> Result<String> {
    let network = move |e: JsValue| WorkflowError::network(action, js_message(&e));
    let value = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?;
    Ok(value.as_string().unwrap_or_default())
}

async fn bytes(action: Action, response: &Response) -> Result<Vec<u8>> {
    let network = move |e: JsValue| WorkflowError::network(action, js_message(&e));
    let buffer = JsFuture::from(response.array_buffer().map_err(network)?)
        .await
        .map_err(network)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn form_error(action: Action) -> impl Fn(JsValue) -> WorkflowError {
    move |e| WorkflowError::FileRead(format!("{}: {}", action.failure_label(), js_message(&e)))
}

impl ReportService for BrowserReportService {
    type File = BrowserFile;

    async fn upload(&self, file: &BrowserFile) -> Result<UploadResponse> {
        let body = upload_form(file).map_err(form_error(Action::Upload))?;
        let response = send(Action::Upload, "POST", &self.endpoints.upload(), Some(&body)).await?;
        parse_json(Action::Upload, &text(Action::Upload, &response).await?)
    }

    async fn fetch_headers(&self, filename: &str) -> Result<HeadersResponse> {
        let action = Action::FetchHeaders;
        let response = send(action, "GET", &self.endpoints.headers(filename), None).await?;
        parse_json(action, &text(action, &response).await?)
    }

    async fn generate_report(&self, file: &BrowserFile, form: &ReportForm) -> Result<Vec<u8>> {
        let action = Action::GenerateReport;
        let body = report_form(file, form).map_err(form_error(action))?;
        let response = send(action, "POST", &self.endpoints.generate_report(), Some(&body)).await?;
        bytes(action, &response).await
    }

    async fn generate_charts(&self, file: &BrowserFile, form: &ReportForm) -> Result<ChartsResponse> {
        let action = Action::GenerateCharts;
        let body = report_form(file, form).map_err(form_error(action))?;
        let response = send(action, "POST", &self.endpoints.generate_charts(), Some(&body)).await?;
        parse_json(action, &text(action, &response).await?)
    }
}
