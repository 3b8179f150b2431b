use crate::error::{AppError, Result};
use feedback_catalyst_common::DEFAULT_SERVICE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Report Service URLを上書きする環境変数
pub const SERVICE_URL_ENV: &str = "FEEDBACK_SERVICE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub service_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub timeout_seconds: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("feedback-catalyst").join("config.json"))
    }

    /// Report Service URLを解決（引数 > 環境変数 > 設定ファイル > 既定値）
    pub fn service_url(&self, cli_override: Option<&str>) -> String {
        self.resolve_service_url(cli_override, std::env::var(SERVICE_URL_ENV).ok())
    }

    /// 環境変数の値を受け取って解決する。空白だけの値は無視する
    pub fn resolve_service_url(&self, cli_override: Option<&str>, env: Option<String>) -> String {
        if let Some(url) = cli_override {
            return url.to_string();
        }
        if let Some(url) = env.filter(|url| !url.trim().is_empty()) {
            return url;
        }
        self.service_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string())
    }

    /// アーカイブ・チャートの保存先
    pub fn output_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn set_service_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "service URL must start with http:// or https://: {}",
                url
            )));
        }
        self.service_url = Some(url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).expect("load");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config
            .set_service_url("https://reports.example.com/".into())
            .expect("valid url");
        config.timeout_seconds = Some(30);
        config.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(
            loaded.service_url.as_deref(),
            Some("https://reports.example.com")
        );
        assert_eq!(loaded.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut config = Config::default();
        assert!(config.set_service_url("localhost:5001".into()).is_err());
        assert!(config.service_url.is_none());
    }

    #[test]
    fn test_cli_override_wins() {
        let config = Config {
            service_url: Some("http://configured:1".into()),
            ..Default::default()
        };
        assert_eq!(config.service_url(Some("http://flag:2")), "http://flag:2");
        assert_eq!(
            config.resolve_service_url(Some("http://flag:2"), Some("http://env:3".into())),
            "http://flag:2"
        );
    }

    #[test]
    fn test_env_beats_config_file() {
        let config = Config {
            service_url: Some("http://configured:1".into()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_service_url(None, Some("http://env:3".into())),
            "http://env:3"
        );
    }

    #[test]
    fn test_blank_env_falls_back_to_config_file() {
        let config = Config {
            service_url: Some("http://configured:1".into()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_service_url(None, Some("   ".into())),
            "http://configured:1"
        );
        assert_eq!(config.resolve_service_url(None, None), "http://configured:1");
    }

    #[test]
    fn test_default_service_url() {
        let config = Config::default();
        assert_eq!(config.resolve_service_url(None, None), DEFAULT_SERVICE_URL);
        assert_eq!(
            config.resolve_service_url(None, Some(String::new())),
            DEFAULT_SERVICE_URL
        );
    }

    #[test]
    fn test_output_dir_resolution() {
        let config = Config {
            output_dir: Some(PathBuf::from("/tmp/reports")),
            ..Default::default()
        };
        assert_eq!(config.output_dir(None), PathBuf::from("/tmp/reports"));
        assert_eq!(
            config.output_dir(Some(Path::new("out"))),
            PathBuf::from("out")
        );
        assert_eq!(Config::default().output_dir(None), PathBuf::from("."));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"service_url":"http://x:1"}"#).expect("デシリアライズ失敗");
        assert_eq!(config.output_dir, None);
        assert_eq!(config.timeout_seconds, None);
    }
}
