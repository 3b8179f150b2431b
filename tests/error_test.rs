//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use feedback_catalyst::client::DiskFile;
use feedback_catalyst::config::Config;
use feedback_catalyst::error::AppError;
use feedback_catalyst_common::{Action, ValidationError, WorkflowError};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを開いた場合
#[test]
fn test_open_nonexistent_file() {
    let result = DiskFile::open(Path::new("/nonexistent/path/12345.csv"));
    assert!(matches!(result, Err(AppError::FileNotFound(_))));
}

/// ディレクトリはファイルとして開けない
#[test]
fn test_open_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = DiskFile::open(dir.path());
    assert!(matches!(result, Err(AppError::FileNotFound(_))));
}

/// 壊れた設定ファイル
#[test]
fn test_broken_config_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ invalid").expect("write");

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(AppError::JsonParse(_))));
}

/// AppErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        AppError::Config("テスト設定エラー".to_string()),
        AppError::FileNotFound("survey.csv".to_string()),
        AppError::Failed("Upload failed (Status: 500): boom".to_string()),
        AppError::Prompt("端末なし".to_string()),
        AppError::Logging("already set".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// WorkflowErrorは透過的に表示される
#[test]
fn test_workflow_error_transparent() {
    let err: AppError = WorkflowError::transport(Action::Upload, 413, "too big").into();
    assert_eq!(err.to_string(), "Upload failed (Status: 413): too big");

    let err: AppError = WorkflowError::from(ValidationError::UnsupportedExtension {
        file_name: "notes.txt".into(),
    })
    .into();
    assert_eq!(err.to_string(), "Please upload a CSV or Excel file");
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: AppError = io_err.into();

    assert!(matches!(err, AppError::Io(_)));
    assert!(err.to_string().contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: AppError = json_err.into();

    assert!(matches!(err, AppError::JsonParse(_)));
}
