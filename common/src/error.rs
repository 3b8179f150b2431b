//! エラー型定義
//!
//! ワークフローの各操作は失敗をすべて `WorkflowError` に変換し、
//! セッションの `status = error(message)` として表示する。

use thiserror::Error;

/// 不正なJSONレスポンス時の案内メッセージ
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Received an invalid response from the server (likely an HTML error page instead of JSON). Please ensure the backend server is running the correct code and check its console for errors.";

/// Report Serviceへの呼び出し種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Upload,
    FetchHeaders,
    GenerateReport,
    GenerateCharts,
    FetchChart,
}

impl Action {
    /// 失敗メッセージの先頭部分
    pub fn failure_label(&self) -> &'static str {
        match self {
            Action::Upload => "Upload failed",
            Action::FetchHeaders => "Failed to get headers",
            Action::GenerateReport => "Failed to generate report",
            Action::GenerateCharts => "Failed to generate charts",
            Action::FetchChart => "Failed to fetch chart",
        }
    }
}

/// ファイル選択時のローカル検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload a CSV or Excel file")]
    UnsupportedExtension { file_name: String },

    #[error("File size should be less than 5MB")]
    TooLarge { size: u64, limit: u64 },
}

/// ワークフロー共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{} (Status: {status}): {body}", .action.failure_label())]
    Transport {
        action: Action,
        status: u16,
        body: String,
    },

    #[error("{}", MALFORMED_RESPONSE_MESSAGE)]
    MalformedResponse { action: Action, detail: String },

    #[error("{}: {message}", .action.failure_label())]
    Network { action: Action, message: String },

    #[error("Failed to read file: {0}")]
    FileRead(String),

    #[error("The uploaded file has no column headers")]
    EmptyHeaders,

    #[error("Failed to save report archive: {0}")]
    Archive(String),
}

impl WorkflowError {
    pub fn transport(action: Action, status: u16, body: impl Into<String>) -> Self {
        WorkflowError::Transport {
            action,
            status,
            body: body.into(),
        }
    }

    pub fn network(action: Action, message: impl ToString) -> Self {
        WorkflowError::Network {
            action,
            message: message.to_string(),
        }
    }

    /// JSONパース失敗かどうか
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, WorkflowError::MalformedResponse { .. })
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, WorkflowError>;
