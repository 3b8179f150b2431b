//! アップロードセッションの状態遷移
//!
//! `UploadSession::apply` は (状態, イベント) から (新しい状態, 副作用) を返す純粋関数。
//! ネットワーク呼び出しは `Effect` としてドライバに委ね、その結果を再びイベントとして受け取る。
//!
//! 状態: Idle → Uploading → Uploaded → (Generating | Charting) → Uploaded
//! 失敗時は元の状態に戻り、`status` にエラーメッセージを残す。

use crate::error::{Action, WorkflowError};
use crate::types::{FeedbackType, LocalFile, Phase, ReportForm, ReportType, SessionStatus};
use crate::validation::validate_upload;
use tracing::{debug, info, warn};

pub const UPLOADING_MESSAGE: &str = "Uploading file...";
pub const UPLOADED_MESSAGE: &str =
    "File uploaded successfully! You can now generate a report or view charts.";
pub const GENERATING_MESSAGE: &str = "Generating report...";
pub const REPORT_READY_MESSAGE: &str = "Report generated and downloaded.";
pub const CHARTING_MESSAGE: &str = "Generating charts...";
pub const CHARTS_READY_MESSAGE: &str = "Charts generated successfully!";

/// 発行した副作用の世代番号
pub type Ticket = u64;

/// 1画面分のワークフロー状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession<F> {
    feedback_type: FeedbackType,
    selected_file: Option<F>,
    server_filename: String,
    headers: Vec<String>,
    report_type: ReportType,
    status: SessionStatus,
    chart_urls: Vec<String>,
    phase: Phase,
    ticket: Ticket,
}

impl<F> Default for UploadSession<F> {
    fn default() -> Self {
        Self {
            feedback_type: FeedbackType::default(),
            selected_file: None,
            server_filename: String::new(),
            headers: Vec::new(),
            report_type: ReportType::default(),
            status: SessionStatus::Idle,
            chart_urls: Vec::new(),
            phase: Phase::Idle,
            ticket: 0,
        }
    }
}

/// セッションへの入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<F> {
    /// ユーザー操作
    SelectFeedbackType(FeedbackType),
    SelectReportType(ReportType),
    ChooseFile(F),
    GenerateReport,
    ViewCharts,

    /// 副作用の完了通知
    Uploaded { ticket: Ticket, filename: String },
    HeadersFetched { ticket: Ticket, headers: Vec<String> },
    ReportSaved { ticket: Ticket },
    ChartsFetched { ticket: Ticket, chart_urls: Vec<String> },
    Failed { ticket: Ticket, error: WorkflowError },
}

/// ドライバが実行するネットワーク呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<F> {
    Upload { ticket: Ticket, file: F },
    FetchHeaders { ticket: Ticket, filename: String },
    GenerateReport { ticket: Ticket, file: F, form: ReportForm },
    GenerateCharts { ticket: Ticket, file: F, form: ReportForm },
}

impl<F> Effect<F> {
    pub fn ticket(&self) -> Ticket {
        match self {
            Effect::Upload { ticket, .. }
            | Effect::FetchHeaders { ticket, .. }
            | Effect::GenerateReport { ticket, .. }
            | Effect::GenerateCharts { ticket, .. } => *ticket,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Effect::Upload { .. } => Action::Upload,
            Effect::FetchHeaders { .. } => Action::FetchHeaders,
            Effect::GenerateReport { .. } => Action::GenerateReport,
            Effect::GenerateCharts { .. } => Action::GenerateCharts,
        }
    }
}

impl<F> UploadSession<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feedback_type(&self) -> FeedbackType {
        self.feedback_type
    }

    pub fn selected_file(&self) -> Option<&F> {
        self.selected_file.as_ref()
    }

    pub fn server_filename(&self) -> &str {
        &self.server_filename
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn report_type(&self) -> ReportType {
        self.report_type
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn chart_urls(&self) -> &[String] {
        &self.chart_urls
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// 通信中（操作ボタンを無効化する）
    pub fn is_busy(&self) -> bool {
        self.status.is_loading()
    }

    /// ヘッダー取得済みか
    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    /// レポート区分の選択肢を表示するか
    pub fn shows_report_type(&self) -> bool {
        self.has_headers() && self.feedback_type.uses_report_type()
    }

    /// レポート生成・チャート表示が可能か
    pub fn can_generate(&self) -> bool {
        self.has_headers() && self.selected_file.is_some() && !self.is_busy()
    }

    pub fn report_form(&self) -> ReportForm {
        ReportForm {
            feedback_type: self.feedback_type,
            report_type: self.report_type,
        }
    }

    fn next_ticket(&mut self) -> Ticket {
        self.ticket += 1;
        self.ticket
    }

    fn reset(&mut self) {
        self.selected_file = None;
        self.server_filename.clear();
        self.headers.clear();
        self.status = SessionStatus::Idle;
        self.chart_urls.clear();
        self.phase = Phase::Idle;
        // 通信中の結果は破棄される
        self.next_ticket();
    }

    fn is_current(&self, ticket: Ticket, expected: Phase) -> bool {
        if ticket != self.ticket || self.phase != expected {
            warn!(
                ticket,
                current = self.ticket,
                phase = ?self.phase,
                "stale completion ignored"
            );
            return false;
        }
        true
    }
}

impl<F: LocalFile> UploadSession<F> {
    /// イベントを適用して次の状態と副作用を返す
    pub fn apply(mut self, event: Event<F>) -> (Self, Option<Effect<F>>) {
        match event {
            Event::SelectFeedbackType(feedback_type) => {
                debug!(%feedback_type, "feedback type selected");
                self.feedback_type = feedback_type;
                self.reset();
                (self, None)
            }

            Event::SelectReportType(report_type) => {
                debug!(%report_type, "report type selected");
                self.report_type = report_type;
                (self, None)
            }

            Event::ChooseFile(file) => {
                if self.is_busy() {
                    warn!(file = file.name(), "upload rejected while busy");
                    return (self, None);
                }

                self.server_filename.clear();
                self.headers.clear();
                self.chart_urls.clear();
                self.phase = Phase::Idle;
                self.selected_file = Some(file.clone());

                if let Err(e) = validate_upload(&file) {
                    debug!(file = file.name(), error = %e, "file rejected");
                    self.status = SessionStatus::Error(e.to_string());
                    return (self, None);
                }

                let ticket = self.next_ticket();
                self.phase = Phase::Uploading;
                self.status = SessionStatus::Loading(UPLOADING_MESSAGE.to_string());
                debug!(file = file.name(), size = file.size(), ticket, "uploading");
                (self, Some(Effect::Upload { ticket, file }))
            }

            Event::GenerateReport => self.start_generation(Phase::Generating),

            Event::ViewCharts => self.start_generation(Phase::Charting),

            Event::Uploaded { ticket, filename } => {
                if !self.is_current(ticket, Phase::Uploading) {
                    return (self, None);
                }
                debug!(%filename, "upload accepted, fetching headers");
                self.server_filename = filename.clone();
                (self, Some(Effect::FetchHeaders { ticket, filename }))
            }

            Event::HeadersFetched { ticket, headers } => {
                if !self.is_current(ticket, Phase::Uploading) {
                    return (self, None);
                }
                if headers.is_empty() {
                    return self.fail(WorkflowError::EmptyHeaders);
                }
                info!(count = headers.len(), "headers received");
                self.headers = headers;
                self.phase = Phase::Uploaded;
                self.status = SessionStatus::Success(UPLOADED_MESSAGE.to_string());
                (self, None)
            }

            Event::ReportSaved { ticket } => {
                if !self.is_current(ticket, Phase::Generating) {
                    return (self, None);
                }
                info!("report archive delivered");
                self.phase = Phase::Uploaded;
                self.status = SessionStatus::Success(REPORT_READY_MESSAGE.to_string());
                (self, None)
            }

            Event::ChartsFetched { ticket, chart_urls } => {
                if !self.is_current(ticket, Phase::Charting) {
                    return (self, None);
                }
                info!(count = chart_urls.len(), "charts received");
                self.chart_urls = chart_urls;
                self.phase = Phase::Uploaded;
                self.status = SessionStatus::Success(CHARTS_READY_MESSAGE.to_string());
                (self, None)
            }

            Event::Failed { ticket, error } => {
                if ticket != self.ticket || !self.phase.is_in_flight() {
                    warn!(ticket, error = %error, "stale failure ignored");
                    return (self, None);
                }
                self.fail(error)
            }
        }
    }

    fn start_generation(mut self, phase: Phase) -> (Self, Option<Effect<F>>) {
        if !self.can_generate() {
            debug!(?phase, busy = self.is_busy(), "generation request ignored");
            return (self, None);
        }
        let Some(file) = self.selected_file.clone() else {
            return (self, None);
        };

        let ticket = self.next_ticket();
        let form = self.report_form();
        self.chart_urls.clear();
        self.phase = phase;

        let effect = if phase == Phase::Charting {
            self.status = SessionStatus::Loading(CHARTING_MESSAGE.to_string());
            Effect::GenerateCharts { ticket, file, form }
        } else {
            self.status = SessionStatus::Loading(GENERATING_MESSAGE.to_string());
            Effect::GenerateReport { ticket, file, form }
        };
        debug!(?phase, choice = form.choice(), feedback_type = form.feedback_type(), "requesting");
        (self, Some(effect))
    }

    fn fail(mut self, error: WorkflowError) -> (Self, Option<Effect<F>>) {
        warn!(phase = ?self.phase, error = %error, "operation failed");
        self.phase = self.phase.recovery();
        if self.phase == Phase::Idle {
            self.server_filename.clear();
            self.headers.clear();
        }
        self.status = SessionStatus::Error(error.to_string());
        (self, None)
    }
}
