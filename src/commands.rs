//! サブコマンドの実装

use crate::client::{DirectorySink, DiskFile, HttpReportService};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::progress::with_spinner;
use feedback_catalyst_common::session::{
    CHARTING_MESSAGE, GENERATING_MESSAGE, UPLOADING_MESSAGE,
};
use feedback_catalyst_common::{
    FeedbackType, ReportType, SessionStatus, UploadSession, WorkflowController, ARCHIVE_FILE_NAME,
};
use std::path::{Path, PathBuf};

pub type CliController = WorkflowController<HttpReportService, DirectorySink>;

/// 設定からコントローラを組み立てる
pub fn build_controller(
    config: &Config,
    service_url: Option<&str>,
    output: Option<&Path>,
) -> Result<CliController> {
    let url = config.service_url(service_url);
    let service = HttpReportService::new(&url, config.timeout())?;
    let sink = DirectorySink::new(config.output_dir(output));
    Ok(WorkflowController::new(service, sink))
}

/// セッションの結果を表示し、エラーなら `Err` にする
pub fn report_status<F>(session: &UploadSession<F>) -> Result<()> {
    match session.status() {
        SessionStatus::Error(message) => Err(AppError::Failed(message.clone())),
        SessionStatus::Success(message) => {
            println!("✔ {}", message);
            Ok(())
        }
        SessionStatus::Loading(_) | SessionStatus::Idle => Ok(()),
    }
}

pub fn print_headers(headers: &[String]) {
    println!("列ヘッダー ({}):", headers.len());
    for (i, header) in headers.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, header);
    }
}

pub fn print_charts(chart_urls: &[String]) {
    println!("チャート ({}):", chart_urls.len());
    for url in chart_urls {
        println!("  {}", url);
    }
}

/// アップロードしてヘッダーを取得
pub async fn upload(ctl: &mut CliController, file: &Path) -> Result<()> {
    let file = DiskFile::open(file)?;
    let session = with_spinner(UPLOADING_MESSAGE, ctl.upload_file(file)).await;
    report_status(session)?;
    print_headers(session.headers());
    Ok(())
}

/// レポートを生成して保存先を返す
pub async fn generate_report(ctl: &mut CliController) -> Result<PathBuf> {
    let session = with_spinner(GENERATING_MESSAGE, ctl.generate_report()).await;
    report_status(session)?;
    Ok(ctl.sink().path_for(ARCHIVE_FILE_NAME))
}

/// チャートURLを取得
pub async fn view_charts(ctl: &mut CliController) -> Result<Vec<String>> {
    let session = with_spinner(CHARTING_MESSAGE, ctl.view_charts()).await;
    report_status(session)?;
    print_charts(session.chart_urls());
    Ok(session.chart_urls().to_vec())
}

/// チャート画像をダウンロード
pub async fn save_charts(ctl: &CliController, chart_urls: &[String], dir: &Path) -> Result<()> {
    let saved = with_spinner(
        "Downloading charts...",
        ctl.service().save_charts(chart_urls, dir),
    )
    .await?;
    for path in saved {
        println!("  保存: {}", path.display());
    }
    Ok(())
}

pub struct RunOptions {
    pub file: PathBuf,
    pub feedback_type: FeedbackType,
    pub report_type: ReportType,
    pub charts: bool,
    pub save_charts: bool,
    pub output: Option<PathBuf>,
}

/// run: アップロード → レポート生成 or チャート取得
pub async fn run(config: &Config, service_url: Option<&str>, options: RunOptions) -> Result<()> {
    println!("📊 feedback-catalyst - レポート生成\n");

    let output_dir = config.output_dir(options.output.as_deref());
    let mut ctl = build_controller(config, service_url, Some(output_dir.as_path()))?;
    ctl.select_feedback_type(options.feedback_type);
    ctl.select_report_type(options.report_type);

    println!("[1/2] アップロード中: {}", options.file.display());
    upload(&mut ctl, &options.file).await?;
    println!();

    if options.charts {
        println!("[2/2] チャート生成中...");
        let chart_urls = view_charts(&mut ctl).await?;
        if options.save_charts && !chart_urls.is_empty() {
            save_charts(&ctl, &chart_urls, &output_dir).await?;
        }
    } else {
        println!(
            "[2/2] レポート生成中... ({} / {})",
            options.feedback_type.label(),
            options.report_type.label()
        );
        let path = generate_report(&mut ctl).await?;
        println!("  保存: {}", path.display());
    }

    println!("\n✅ 完了");
    Ok(())
}

/// headers: アップロードして列ヘッダーのみ表示
pub async fn headers(
    config: &Config,
    service_url: Option<&str>,
    file: &Path,
    feedback_type: FeedbackType,
) -> Result<()> {
    let mut ctl = build_controller(config, service_url, None)?;
    ctl.select_feedback_type(feedback_type);
    upload(&mut ctl, file).await
}

pub struct ConfigOptions {
    pub set_url: Option<String>,
    pub set_output_dir: Option<PathBuf>,
    pub show: bool,
}

pub fn config(mut config: Config, service_url: Option<&str>, options: ConfigOptions) -> Result<()> {
    let mut changed = false;

    if let Some(url) = options.set_url {
        config.set_service_url(url)?;
        changed = true;
        println!("✔ Report Service URLを設定しました");
    }

    if let Some(dir) = options.set_output_dir {
        config.output_dir = Some(dir);
        changed = true;
        println!("✔ 出力ディレクトリを設定しました");
    }

    if changed {
        config.save()?;
    }

    if options.show || !changed {
        println!("設定:");
        println!("  Report Service: {}", config.service_url(service_url));
        println!("  出力ディレクトリ: {}", config.output_dir(None).display());
        match config.timeout_seconds {
            Some(secs) => println!("  タイムアウト: {}秒", secs),
            None => println!("  タイムアウト: なし"),
        }
        println!("  設定ファイル: {}", Config::config_path()?.display());
    }

    Ok(())
}
