//! Report Service APIの契約
//!
//! エンドポイントURLの組み立てとJSONレスポンスのパースを共通化する。
//! JSONとして読めない本文はここで `MalformedResponse` に変換する。

use crate::error::{Action, Result, WorkflowError};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// 既定のReport Service URL
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5001";

/// ダウンロードするレポートアーカイブのファイル名
pub const ARCHIVE_FILE_NAME: &str = "Feedback_Reports.zip";

/// パスセグメントとしてエスケープする文字
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// POST /upload のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
}

/// GET /headers/{filename} のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadersResponse {
    pub headers: Vec<String>,
}

/// POST /generate-charts のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartsResponse {
    pub chart_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_charts: Option<usize>,
}

/// エンドポイント一覧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    pub fn headers(&self, filename: &str) -> String {
        format!(
            "{}/headers/{}",
            self.base_url,
            utf8_percent_encode(filename, PATH_SEGMENT)
        )
    }

    pub fn generate_report(&self) -> String {
        format!("{}/generate-report", self.base_url)
    }

    pub fn generate_charts(&self) -> String {
        format!("{}/generate-charts", self.base_url)
    }

    /// チャートURLが相対パスならベースURLを補う
    pub fn resolve_chart(&self, chart_url: &str) -> String {
        if chart_url.starts_with("http://") || chart_url.starts_with("https://") {
            chart_url.to_string()
        } else {
            format!("{}/{}", self.base_url, chart_url.trim_start_matches('/'))
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL)
    }
}

/// 本文をJSONとしてパース
///
/// # Arguments
/// * `action` - 呼び出し種別（エラー報告用）
/// * `body` - レスポンス本文
pub fn parse_json<T: DeserializeOwned>(action: Action, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| WorkflowError::MalformedResponse {
        action,
        detail: e.to_string(),
    })
}

/// チャートURLのパス末尾から保存用ファイル名を作る
///
/// 名前が重ならないよう連番を前置する。末尾が空・`.`・`..` のときは
/// `chart_{n}.png` にする。
pub fn chart_file_name(chart_url: &str, index: usize) -> String {
    let name = chart_url
        .split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .map(|segment| {
            percent_decode_str(segment)
                .decode_utf8_lossy()
                .replace(['/', '\\'], "_")
        })
        .filter(|name| !name.is_empty() && name != "." && name != "..");
    match name {
        Some(name) => format!("{:02}_{}", index + 1, name),
        None => format!("chart_{}.png", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let endpoints = Endpoints::new("http://localhost:5001/");
        assert_eq!(endpoints.upload(), "http://localhost:5001/upload");
        assert_eq!(endpoints.generate_report(), "http://localhost:5001/generate-report");
        assert_eq!(endpoints.generate_charts(), "http://localhost:5001/generate-charts");
    }

    #[test]
    fn test_headers_url_escapes_filename() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.headers("survey 2024#1.csv"),
            "http://localhost:5001/headers/survey%202024%231.csv"
        );
        assert_eq!(
            endpoints.headers("plain.xlsx"),
            "http://localhost:5001/headers/plain.xlsx"
        );
    }

    #[test]
    fn test_parse_json_ok() {
        let parsed: HeadersResponse =
            parse_json(Action::FetchHeaders, r#"{"headers":["Name","Q1","Q2"]}"#)
                .expect("パース失敗");
        assert_eq!(parsed.headers, vec!["Name", "Q1", "Q2"]);
    }

    #[test]
    fn test_parse_json_html_is_malformed() {
        let err = parse_json::<UploadResponse>(Action::Upload, "<!doctype html><p>oops</p>")
            .unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[test]
    fn test_charts_response_total_is_optional() {
        let parsed: ChartsResponse =
            parse_json(Action::GenerateCharts, r#"{"chart_urls":["a.png"]}"#).expect("パース失敗");
        assert_eq!(parsed.total_charts, None);

        let parsed: ChartsResponse = parse_json(
            Action::GenerateCharts,
            r#"{"chart_urls":["a.png","b.png"],"total_charts":2}"#,
        )
        .expect("パース失敗");
        assert_eq!(parsed.total_charts, Some(2));
    }

    #[test]
    fn test_resolve_chart() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.resolve_chart("http://cdn.example/c.png"),
            "http://cdn.example/c.png"
        );
        assert_eq!(
            endpoints.resolve_chart("/charts/q1.png"),
            "http://localhost:5001/charts/q1.png"
        );
    }

    #[test]
    fn test_chart_file_name() {
        assert_eq!(chart_file_name("http://h/charts/Q1_ratings.png", 0), "01_Q1_ratings.png");
        assert_eq!(chart_file_name("http://h/charts/", 2), "chart_3.png");
    }

    #[test]
    fn test_chart_file_names_are_unique() {
        let first = chart_file_name("http://h/chart?id=1", 0);
        let second = chart_file_name("http://h/chart?id=2", 1);
        assert_eq!(first, "01_chart");
        assert_eq!(second, "02_chart");
    }

    #[test]
    fn test_chart_file_name_stays_in_directory() {
        assert_eq!(chart_file_name("http://h/charts/..", 0), "chart_1.png");
        assert_eq!(chart_file_name("http://h/charts/.", 1), "chart_2.png");
        assert_eq!(chart_file_name("http://h/charts/a%2F..%2Fb.png", 2), "03_a_.._b.png");
    }

    #[test]
    fn test_chart_file_name_is_decoded() {
        assert_eq!(
            chart_file_name("http://h/static/charts/Q1%20Ratings.png", 0),
            "01_Q1 Ratings.png"
        );
    }
}
