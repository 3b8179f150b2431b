use clap::{Parser, Subcommand};
use feedback_catalyst_common::{FeedbackType, ReportType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "feedback-catalyst")]
#[command(about = "Upload feedback data and generate reports or charts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Report Service URL（設定・環境変数より優先）
    #[arg(long, global = true)]
    pub service_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// アップロードしてレポート（またはチャート）を生成
    Run {
        /// CSV / XLSX ファイル
        #[arg(required = true)]
        file: PathBuf,

        /// フィードバック区分 (stakeholder/subject)
        #[arg(short, long, default_value = "stakeholder")]
        feedback_type: FeedbackType,

        /// レポート区分 (generalized/fieldwise)
        #[arg(short, long, default_value = "generalized")]
        report_type: ReportType,

        /// アーカイブの代わりにチャートURLを取得
        #[arg(short, long)]
        charts: bool,

        /// チャート画像も保存（--charts と併用）
        #[arg(long, requires = "charts")]
        save_charts: bool,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// アップロードして列ヘッダーを表示
    Headers {
        /// CSV / XLSX ファイル
        #[arg(required = true)]
        file: PathBuf,

        /// フィードバック区分 (stakeholder/subject)
        #[arg(short, long, default_value = "stakeholder")]
        feedback_type: FeedbackType,
    },

    /// 対話モード
    Interactive {
        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// Report Service URLを設定
        #[arg(long)]
        set_url: Option<String>,

        /// 既定の出力ディレクトリを設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
