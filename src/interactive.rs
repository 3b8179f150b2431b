//! 対話モード
//!
//! ブラウザのレポート画面と同じ操作を端末のメニューで行う。
//! 表示するメニュー項目はセッションの状態から決まる。

use crate::commands::{self, CliController};
use crate::error::{AppError, Result};
use dialoguer::{Input, Select};
use feedback_catalyst_common::{FeedbackType, LocalFile, ReportType, UploadSession};
use std::path::PathBuf;

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    FeedbackType,
    Upload,
    ReportType,
    GenerateReport,
    ViewCharts,
    Quit,
}

impl MenuItem {
    pub fn label<F>(&self, session: &UploadSession<F>) -> String {
        match self {
            MenuItem::FeedbackType => {
                format!("Feedback type: {}", session.feedback_type().label())
            }
            MenuItem::Upload => "Upload file (.csv / .xlsx, max 5MB)".to_string(),
            MenuItem::ReportType => format!("Report type: {}", session.report_type().label()),
            MenuItem::GenerateReport => "Get report archive".to_string(),
            MenuItem::ViewCharts => "View charts".to_string(),
            MenuItem::Quit => "Quit".to_string(),
        }
    }
}

/// 現在の状態で選べるメニュー
pub fn menu_items<F: LocalFile>(session: &UploadSession<F>) -> Vec<MenuItem> {
    let mut items = vec![MenuItem::FeedbackType, MenuItem::Upload];
    if session.shows_report_type() {
        items.push(MenuItem::ReportType);
    }
    if session.can_generate() {
        items.push(MenuItem::GenerateReport);
        items.push(MenuItem::ViewCharts);
    }
    items.push(MenuItem::Quit);
    items
}

fn prompt_err(e: dialoguer::Error) -> AppError {
    AppError::Prompt(e.to_string())
}

fn choose_feedback_type(current: FeedbackType) -> Result<FeedbackType> {
    let labels: Vec<&str> = FeedbackType::ALL.iter().map(|t| t.label()).collect();
    let default = FeedbackType::ALL.iter().position(|t| *t == current).unwrap_or(0);
    let index = Select::new()
        .with_prompt("Select feedback type")
        .items(&labels)
        .default(default)
        .interact()
        .map_err(prompt_err)?;
    Ok(FeedbackType::ALL[index])
}

fn choose_report_type(current: ReportType) -> Result<ReportType> {
    let labels: Vec<&str> = ReportType::ALL.iter().map(|t| t.label()).collect();
    let default = ReportType::ALL.iter().position(|t| *t == current).unwrap_or(0);
    let index = Select::new()
        .with_prompt("Choose report type")
        .items(&labels)
        .default(default)
        .interact()
        .map_err(prompt_err)?;
    Ok(ReportType::ALL[index])
}

fn prompt_path() -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt("File path")
        .interact_text()
        .map_err(prompt_err)?;
    Ok(PathBuf::from(input.trim()))
}

/// 対話ループ
///
/// 個々の操作の失敗はメッセージを表示して続行する。
pub async fn run_interactive(mut ctl: CliController, output_dir: PathBuf) -> Result<()> {
    println!("📊 feedback-catalyst - 対話モード\n");

    loop {
        let items = menu_items(ctl.session());
        let labels: Vec<String> = items.iter().map(|i| i.label(ctl.session())).collect();
        let index = Select::new()
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_err)?;

        let outcome = match items[index] {
            MenuItem::FeedbackType => {
                let feedback_type = choose_feedback_type(ctl.session().feedback_type())?;
                ctl.select_feedback_type(feedback_type);
                println!("✔ {} を選択しました（アップロード状態はリセットされます）", feedback_type.label());
                Ok(())
            }
            MenuItem::Upload => {
                let path = prompt_path()?;
                commands::upload(&mut ctl, &path).await
            }
            MenuItem::ReportType => {
                let report_type = choose_report_type(ctl.session().report_type())?;
                ctl.select_report_type(report_type);
                Ok(())
            }
            MenuItem::GenerateReport => commands::generate_report(&mut ctl)
                .await
                .map(|path| println!("  保存: {}", path.display())),
            MenuItem::ViewCharts => match commands::view_charts(&mut ctl).await {
                Ok(urls) if !urls.is_empty() => commands::save_charts(&ctl, &urls, &output_dir).await,
                Ok(_) => Ok(()),
                Err(e) => Err(e),
            },
            MenuItem::Quit => break,
        };

        if let Err(e) = outcome {
            println!("✘ {}", e);
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_catalyst_common::Event;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Stub(&'static str);

    impl LocalFile for Stub {
        fn name(&self) -> &str {
            self.0
        }
        fn size(&self) -> u64 {
            100
        }
    }

    fn uploaded(feedback_type: FeedbackType) -> UploadSession<Stub> {
        let (session, _) = UploadSession::new().apply(Event::SelectFeedbackType(feedback_type));
        let (session, effect) = session.apply(Event::ChooseFile(Stub("a.csv")));
        let ticket = effect.expect("upload").ticket();
        let (session, _) = session.apply(Event::Uploaded {
            ticket,
            filename: "a.csv".into(),
        });
        let (session, _) = session.apply(Event::HeadersFetched {
            ticket,
            headers: vec!["Q1".into()],
        });
        session
    }

    #[test]
    fn test_menu_before_upload() {
        let session = UploadSession::<Stub>::new();
        assert_eq!(
            menu_items(&session),
            vec![MenuItem::FeedbackType, MenuItem::Upload, MenuItem::Quit]
        );
    }

    #[test]
    fn test_menu_after_upload_stakeholder() {
        let session = uploaded(FeedbackType::Stakeholder);
        assert_eq!(
            menu_items(&session),
            vec![
                MenuItem::FeedbackType,
                MenuItem::Upload,
                MenuItem::ReportType,
                MenuItem::GenerateReport,
                MenuItem::ViewCharts,
                MenuItem::Quit
            ]
        );
    }

    #[test]
    fn test_menu_after_upload_subject_hides_report_type() {
        let session = uploaded(FeedbackType::Subject);
        assert!(!menu_items(&session).contains(&MenuItem::ReportType));
        assert!(menu_items(&session).contains(&MenuItem::GenerateReport));
    }

    #[test]
    fn test_labels_show_current_selection() {
        let session = uploaded(FeedbackType::Subject);
        assert_eq!(
            MenuItem::FeedbackType.label(&session),
            "Feedback type: Subject Feedback"
        );
    }
}
