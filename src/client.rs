//! Report Service クライアント（reqwest）
//!
//! ブラウザ版の fetch + FormData と同じ契約をマルチパートで送る。
//! レポートアーカイブはブラウザのダウンロードの代わりにディスクへ保存する。

use feedback_catalyst_common::{
    chart_file_name, parse_json, Action, ArchiveSink, ChartsResponse, Endpoints, HeadersResponse,
    LocalFile, ReportForm, ReportService, UploadResponse, WorkflowError,
};
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

type WorkflowResult<T> = feedback_catalyst_common::Result<T>;

/// ディスク上の選択ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskFile {
    path: PathBuf,
    name: String,
    size: u64,
}

impl DiskFile {
    pub fn open(path: &Path) -> crate::error::Result<Self> {
        if !path.is_file() {
            return Err(crate::error::AppError::FileNotFound(
                path.display().to_string(),
            ));
        }
        let size = std::fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 拡張子からContent-Typeを決める
    pub fn mime_type(&self) -> &'static str {
        if self.name.to_lowercase().ends_with(".xlsx") {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        } else {
            "text/csv"
        }
    }

    async fn to_part(&self) -> WorkflowResult<Part> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| WorkflowError::FileRead(format!("{}: {}", self.path.display(), e)))?;
        Part::bytes(bytes)
            .file_name(self.name.clone())
            .mime_str(self.mime_type())
            .map_err(|e| WorkflowError::FileRead(e.to_string()))
    }
}

impl LocalFile for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// reqwest版 Report Service
#[derive(Debug, Clone)]
pub struct HttpReportService {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpReportService {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> crate::error::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoints: Endpoints::new(base_url),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn report_form(&self, file: &DiskFile, form: &ReportForm) -> WorkflowResult<Form> {
        Ok(Form::new()
            .part("file", file.to_part().await?)
            .text("choice", form.choice())
            .text("feedbackType", form.feedback_type()))
    }

    /// チャート画像を取得
    pub async fn fetch_chart(&self, chart_url: &str) -> WorkflowResult<Vec<u8>> {
        let url = self.endpoints.resolve_chart(chart_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WorkflowError::network(Action::FetchChart, e))?;
        let response = ensure_success(Action::FetchChart, response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| WorkflowError::network(Action::FetchChart, e))?;
        Ok(bytes.to_vec())
    }

    /// チャート画像をまとめて保存
    pub async fn save_charts(&self, chart_urls: &[String], dir: &Path) -> crate::error::Result<Vec<PathBuf>> {
        tokio::fs::create_dir_all(dir).await?;
        let mut saved = Vec::with_capacity(chart_urls.len());
        for (index, url) in chart_urls.iter().enumerate() {
            let bytes = self.fetch_chart(url).await?;
            let path = dir.join(chart_file_name(url, index));
            tokio::fs::write(&path, bytes).await?;
            debug!(path = %path.display(), "chart saved");
            saved.push(path);
        }
        Ok(saved)
    }
}

/// 非2xxなら本文をテキストとして `Transport` エラーにする
async fn ensure_success(action: Action, response: Response) -> WorkflowResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(?action, status = status.as_u16(), error = %e, "failed to read error body");
            String::new()
        }
    };
    Err(WorkflowError::transport(action, status.as_u16(), body))
}

async fn json_body<T: serde::de::DeserializeOwned>(
    action: Action,
    response: Response,
) -> WorkflowResult<T> {
    let response = ensure_success(action, response).await?;
    let body = response
        .text()
        .await
        .map_err(|e| WorkflowError::network(action, e))?;
    parse_json(action, &body)
}

impl ReportService for HttpReportService {
    type File = DiskFile;

    async fn upload(&self, file: &DiskFile) -> WorkflowResult<UploadResponse> {
        let form = Form::new().part("file", file.to_part().await?);
        let response = self
            .client
            .post(self.endpoints.upload())
            .multipart(form)
            .send()
            .await
            .map_err(|e| WorkflowError::network(Action::Upload, e))?;
        json_body(Action::Upload, response).await
    }

    async fn fetch_headers(&self, filename: &str) -> WorkflowResult<HeadersResponse> {
        let response = self
            .client
            .get(self.endpoints.headers(filename))
            .send()
            .await
            .map_err(|e| WorkflowError::network(Action::FetchHeaders, e))?;
        json_body(Action::FetchHeaders, response).await
    }

    async fn generate_report(&self, file: &DiskFile, form: &ReportForm) -> WorkflowResult<Vec<u8>> {
        let response = self
            .client
            .post(self.endpoints.generate_report())
            .multipart(self.report_form(file, form).await?)
            .send()
            .await
            .map_err(|e| WorkflowError::network(Action::GenerateReport, e))?;
        let response = ensure_success(Action::GenerateReport, response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| WorkflowError::network(Action::GenerateReport, e))?;
        Ok(bytes.to_vec())
    }

    async fn generate_charts(&self, file: &DiskFile, form: &ReportForm) -> WorkflowResult<ChartsResponse> {
        let response = self
            .client
            .post(self.endpoints.generate_charts())
            .multipart(self.report_form(file, form).await?)
            .send()
            .await
            .map_err(|e| WorkflowError::network(Action::GenerateCharts, e))?;
        json_body(Action::GenerateCharts, response).await
    }
}

/// アーカイブをディレクトリに書き出す
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl ArchiveSink for DirectorySink {
    fn deliver(&self, file_name: &str, bytes: &[u8]) -> WorkflowResult<()> {
        let path = self.path_for(file_name);
        std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(&path, bytes))
            .map_err(|e| WorkflowError::Archive(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), bytes = bytes.len(), "archive saved");
        Ok(())
    }
}
