//! ワークフローの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - FeedbackType / ReportType: ユーザーが選ぶ区分
//! - SessionStatus: 画面に表示する状態
//! - Phase: コントローラの状態
//! - LocalFile: 選択されたローカルファイルの抽象

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// フィードバック区分
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    #[default]
    Stakeholder,
    Subject,
}

impl FeedbackType {
    pub const ALL: [FeedbackType; 2] = [FeedbackType::Stakeholder, FeedbackType::Subject];

    /// フォームに送る値
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Stakeholder => "stakeholder",
            FeedbackType::Subject => "subject",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackType::Stakeholder => "Stakeholder Feedback",
            FeedbackType::Subject => "Subject Feedback",
        }
    }

    /// レポート区分の選択が意味を持つか
    pub fn uses_report_type(&self) -> bool {
        matches!(self, FeedbackType::Stakeholder)
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stakeholder" => Ok(FeedbackType::Stakeholder),
            "subject" => Ok(FeedbackType::Subject),
            _ => Err(format!("Unknown feedback type: {}", s)),
        }
    }
}

/// レポート区分（Stakeholderのみ有効）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Generalized,
    Fieldwise,
}

impl ReportType {
    pub const ALL: [ReportType; 2] = [ReportType::Generalized, ReportType::Fieldwise];

    /// `choice` フィールドの値
    pub fn choice_code(&self) -> &'static str {
        match self {
            ReportType::Generalized => "1",
            ReportType::Fieldwise => "2",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Generalized => "generalized",
            ReportType::Fieldwise => "fieldwise",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Generalized => "Generalized Report",
            ReportType::Fieldwise => "Field-Wise Report",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "").as_str() {
            "generalized" | "1" => Ok(ReportType::Generalized),
            "fieldwise" | "2" => Ok(ReportType::Fieldwise),
            _ => Err(format!("Unknown report type: {}", s)),
        }
    }
}

/// 画面に表示するステータス
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading(String),
    Success(String),
    Error(String),
}

impl SessionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Loading(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SessionStatus::Idle => None,
            SessionStatus::Loading(m) | SessionStatus::Success(m) | SessionStatus::Error(m) => {
                Some(m)
            }
        }
    }

    /// CSSクラス名
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Loading(_) => "loading",
            SessionStatus::Success(_) => "success",
            SessionStatus::Error(_) => "error",
        }
    }
}

/// コントローラの状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Uploaded,
    Generating,
    Charting,
}

impl Phase {
    /// 失敗時に戻る状態
    pub fn recovery(&self) -> Phase {
        match self {
            Phase::Generating | Phase::Charting | Phase::Uploaded => Phase::Uploaded,
            Phase::Idle | Phase::Uploading => Phase::Idle,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Phase::Uploading | Phase::Generating | Phase::Charting)
    }
}

/// ユーザーが選んだローカルファイル
///
/// ブラウザでは `web_sys::File`、CLIではディスク上のファイルを包む。
pub trait LocalFile: Clone {
    fn name(&self) -> &str;
    fn size(&self) -> u64;
}

/// generate-report / generate-charts に送るフォーム値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportForm {
    pub feedback_type: FeedbackType,
    pub report_type: ReportType,
}

impl ReportForm {
    pub fn choice(&self) -> &'static str {
        self.report_type.choice_code()
    }

    pub fn feedback_type(&self) -> &'static str {
        self.feedback_type.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_codes() {
        assert_eq!(ReportType::Generalized.choice_code(), "1");
        assert_eq!(ReportType::Fieldwise.choice_code(), "2");
    }

    #[test]
    fn test_defaults_match_initial_page_state() {
        assert_eq!(FeedbackType::default(), FeedbackType::Stakeholder);
        assert_eq!(ReportType::default(), ReportType::Generalized);
        assert_eq!(SessionStatus::default(), SessionStatus::Idle);
    }

    #[test]
    fn test_parse_feedback_type() {
        assert_eq!("Subject".parse::<FeedbackType>(), Ok(FeedbackType::Subject));
        assert!("customer".parse::<FeedbackType>().is_err());
    }

    #[test]
    fn test_parse_report_type_accepts_hyphen_and_code() {
        assert_eq!("field-wise".parse::<ReportType>(), Ok(ReportType::Fieldwise));
        assert_eq!("1".parse::<ReportType>(), Ok(ReportType::Generalized));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&FeedbackType::Subject).expect("シリアライズ失敗");
        assert_eq!(json, "\"subject\"");
    }

    #[test]
    fn test_phase_recovery() {
        assert_eq!(Phase::Uploading.recovery(), Phase::Idle);
        assert_eq!(Phase::Generating.recovery(), Phase::Uploaded);
        assert_eq!(Phase::Charting.recovery(), Phase::Uploaded);
    }

    #[test]
    fn test_status_message() {
        assert_eq!(SessionStatus::Idle.message(), None);
        let status = SessionStatus::Error("boom".into());
        assert_eq!(status.message(), Some("boom"));
        assert_eq!(status.as_str(), "error");
    }
}
