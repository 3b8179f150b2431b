//! ワークフローコントローラ
//!
//! `UploadSession` の副作用を実行するドライバ。
//! Report Service とアーカイブの保存先はトレイトで差し替える（ブラウザ / CLI / テスト）。

use crate::api::{ChartsResponse, HeadersResponse, UploadResponse, ARCHIVE_FILE_NAME};
use crate::error::Result;
use crate::session::{Effect, Event, UploadSession};
use crate::types::{FeedbackType, LocalFile, ReportForm, ReportType};
use tracing::debug;

/// Report Service のHTTP呼び出し
///
/// 非2xxは `WorkflowError::Transport`、JSONとして読めない本文は
/// `WorkflowError::MalformedResponse` として返すこと。
#[allow(async_fn_in_trait)]
pub trait ReportService {
    type File: LocalFile;

    /// POST /upload
    async fn upload(&self, file: &Self::File) -> Result<UploadResponse>;

    /// GET /headers/{filename}
    async fn fetch_headers(&self, filename: &str) -> Result<HeadersResponse>;

    /// POST /generate-report（アーカイブのバイト列）
    async fn generate_report(&self, file: &Self::File, form: &ReportForm) -> Result<Vec<u8>>;

    /// POST /generate-charts
    async fn generate_charts(&self, file: &Self::File, form: &ReportForm) -> Result<ChartsResponse>;
}

/// 生成されたレポートアーカイブの受け渡し先
pub trait ArchiveSink {
    fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<()>;
}

/// 副作用を1つ実行し、結果をイベントとして返す
pub async fn run_effect<S, D>(service: &S, sink: &D, effect: Effect<S::File>) -> Event<S::File>
where
    S: ReportService,
    D: ArchiveSink,
{
    let ticket = effect.ticket();
    debug!(ticket, action = ?effect.action(), "running effect");

    let outcome = match effect {
        Effect::Upload { file, .. } => service
            .upload(&file)
            .await
            .map(|r| Event::Uploaded {
                ticket,
                filename: r.filename,
            }),
        Effect::FetchHeaders { filename, .. } => service
            .fetch_headers(&filename)
            .await
            .map(|r| Event::HeadersFetched {
                ticket,
                headers: r.headers,
            }),
        Effect::GenerateReport { file, form, .. } => {
            match service.generate_report(&file, &form).await {
                Ok(bytes) => sink
                    .deliver(ARCHIVE_FILE_NAME, &bytes)
                    .map(|_| Event::ReportSaved { ticket }),
                Err(e) => Err(e),
            }
        }
        Effect::GenerateCharts { file, form, .. } => service
            .generate_charts(&file, &form)
            .await
            .map(|r| Event::ChartsFetched {
                ticket,
                chart_urls: r.chart_urls,
            }),
    };

    outcome.unwrap_or_else(|error| Event::Failed { ticket, error })
}

/// セッションを所有し、操作ごとに副作用の連鎖を完了まで実行する
pub struct WorkflowController<S: ReportService, D> {
    service: S,
    sink: D,
    session: UploadSession<S::File>,
}

impl<S, D> WorkflowController<S, D>
where
    S: ReportService,
    D: ArchiveSink,
{
    pub fn new(service: S, sink: D) -> Self {
        Self {
            service,
            sink,
            session: UploadSession::new(),
        }
    }

    pub fn session(&self) -> &UploadSession<S::File> {
        &self.session
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// イベントを適用し、発生した副作用をすべて実行する
    pub async fn dispatch(&mut self, event: Event<S::File>) -> &UploadSession<S::File> {
        let mut next = Some(event);
        while let Some(event) = next.take() {
            let session = std::mem::take(&mut self.session);
            let (session, effect) = session.apply(event);
            self.session = session;

            if let Some(effect) = effect {
                next = Some(run_effect(&self.service, &self.sink, effect).await);
            }
        }
        &self.session
    }

    /// 副作用のない同期イベント
    fn apply_local(&mut self, event: Event<S::File>) -> &UploadSession<S::File> {
        let session = std::mem::take(&mut self.session);
        let (session, _) = session.apply(event);
        self.session = session;
        &self.session
    }

    pub fn select_feedback_type(&mut self, feedback_type: FeedbackType) -> &UploadSession<S::File> {
        self.apply_local(Event::SelectFeedbackType(feedback_type))
    }

    pub fn select_report_type(&mut self, report_type: ReportType) -> &UploadSession<S::File> {
        self.apply_local(Event::SelectReportType(report_type))
    }

    pub async fn upload_file(&mut self, file: S::File) -> &UploadSession<S::File> {
        self.dispatch(Event::ChooseFile(file)).await
    }

    pub async fn generate_report(&mut self) -> &UploadSession<S::File> {
        self.dispatch(Event::GenerateReport).await
    }

    pub async fn view_charts(&mut self) -> &UploadSession<S::File> {
        self.dispatch(Event::ViewCharts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Action, WorkflowError};
    use crate::types::{Phase, SessionStatus};
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct MemFile {
        name: String,
        size: u64,
    }

    impl MemFile {
        fn csv(name: &str) -> Self {
            Self {
                name: name.to_string(),
                size: 512,
            }
        }
    }

    impl LocalFile for MemFile {
        fn name(&self) -> &str {
            &self.name
        }
        fn size(&self) -> u64 {
            self.size
        }
    }

    /// 呼び出しを記録する偽のReport Service
    #[derive(Default)]
    struct FakeService {
        calls: RefCell<Vec<String>>,
        upload: Option<Result<UploadResponse>>,
        headers: Option<Result<HeadersResponse>>,
        report: Option<Result<Vec<u8>>>,
        charts: Option<Result<ChartsResponse>>,
    }

    impl FakeService {
        fn happy() -> Self {
            Self {
                upload: Some(Ok(UploadResponse {
                    filename: "survey.csv".into(),
                })),
                headers: Some(Ok(HeadersResponse {
                    headers: vec!["Name".into(), "Q1".into(), "Q2".into()],
                })),
                report: Some(Ok(b"PK\x03\x04".to_vec())),
                charts: Some(Ok(ChartsResponse {
                    chart_urls: vec!["a.png".into(), "b.png".into()],
                    total_charts: Some(2),
                })),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }
    }

    fn expect<T: Clone>(slot: &Option<Result<T>>) -> Result<T> {
        slot.clone().expect("unexpected call")
    }

    impl ReportService for FakeService {
        type File = MemFile;

        async fn upload(&self, file: &MemFile) -> Result<UploadResponse> {
            self.record(format!("upload:{}", file.name));
            expect(&self.upload)
        }

        async fn fetch_headers(&self, filename: &str) -> Result<HeadersResponse> {
            self.record(format!("headers:{}", filename));
            expect(&self.headers)
        }

        async fn generate_report(&self, file: &MemFile, form: &ReportForm) -> Result<Vec<u8>> {
            self.record(format!(
                "report:{}:{}:{}",
                file.name,
                form.choice(),
                form.feedback_type()
            ));
            expect(&self.report)
        }

        async fn generate_charts(&self, file: &MemFile, form: &ReportForm) -> Result<ChartsResponse> {
            self.record(format!(
                "charts:{}:{}:{}",
                file.name,
                form.choice(),
                form.feedback_type()
            ));
            expect(&self.charts)
        }
    }

    #[derive(Default)]
    struct MemSink {
        saved: RefCell<Vec<(String, Vec<u8>)>>,
        fail: bool,
    }

    impl ArchiveSink for MemSink {
        fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
            if self.fail {
                return Err(WorkflowError::Archive("disk full".into()));
            }
            self.saved
                .borrow_mut()
                .push((file_name.to_string(), bytes.to_vec()));
            Ok(())
        }
    }

    fn controller(service: FakeService) -> WorkflowController<FakeService, MemSink> {
        WorkflowController::new(service, MemSink::default())
    }

    #[test]
    fn test_upload_fetches_headers_in_order() {
        let mut ctl = controller(FakeService::happy());
        let session = block_on(ctl.upload_file(MemFile::csv("survey.csv")));

        assert_eq!(session.phase(), Phase::Uploaded);
        assert_eq!(session.headers(), ["Name", "Q1", "Q2"]);
        assert_eq!(
            ctl.service().calls(),
            vec!["upload:survey.csv", "headers:survey.csv"]
        );
    }

    #[test]
    fn test_invalid_file_makes_no_call() {
        let mut ctl = controller(FakeService::happy());
        let session = block_on(ctl.upload_file(MemFile::csv("notes.txt")));

        assert!(matches!(session.status(), SessionStatus::Error(_)));
        assert!(ctl.service().calls().is_empty());
    }

    #[test]
    fn test_upload_server_error_message() {
        let service = FakeService {
            upload: Some(Err(WorkflowError::transport(
                Action::Upload,
                500,
                "server exploded",
            ))),
            ..FakeService::happy()
        };
        let mut ctl = controller(service);
        let session = block_on(ctl.upload_file(MemFile::csv("survey.csv")));

        assert_eq!(
            session.status(),
            &SessionStatus::Error("Upload failed (Status: 500): server exploded".into())
        );
        assert_eq!(ctl.service().calls(), vec!["upload:survey.csv"]);
    }

    #[test]
    fn test_generate_report_delivers_archive() {
        let mut ctl = controller(FakeService::happy());
        block_on(ctl.upload_file(MemFile::csv("survey.csv")));
        ctl.select_report_type(ReportType::Fieldwise);
        let session = block_on(ctl.generate_report());

        assert_eq!(session.phase(), Phase::Uploaded);
        assert!(matches!(session.status(), SessionStatus::Success(_)));

        let saved = ctl.sink().saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "Feedback_Reports.zip");
        assert_eq!(saved[0].1, b"PK\x03\x04".to_vec());
        assert_eq!(
            ctl.service().calls().last().map(String::as_str),
            Some("report:survey.csv:2:stakeholder")
        );
    }

    #[test]
    fn test_sink_failure_is_reported() {
        let mut ctl = WorkflowController::new(
            FakeService::happy(),
            MemSink {
                fail: true,
                ..Default::default()
            },
        );
        block_on(ctl.upload_file(MemFile::csv("survey.csv")));
        let session = block_on(ctl.generate_report());

        assert_eq!(session.phase(), Phase::Uploaded);
        assert_eq!(
            session.status(),
            &SessionStatus::Error("Failed to save report archive: disk full".into())
        );
    }

    #[test]
    fn test_view_charts_stores_urls() {
        let mut ctl = controller(FakeService::happy());
        block_on(ctl.upload_file(MemFile::csv("survey.csv")));
        ctl.select_feedback_type(FeedbackType::Subject);
        block_on(ctl.upload_file(MemFile::csv("survey.csv")));
        let session = block_on(ctl.view_charts());

        assert_eq!(session.chart_urls(), ["a.png", "b.png"]);
        assert!(matches!(session.status(), SessionStatus::Success(_)));
        assert_eq!(
            ctl.service().calls().last().map(String::as_str),
            Some("charts:survey.csv:1:subject")
        );
    }

    #[test]
    fn test_malformed_charts_response() {
        let service = FakeService {
            charts: Some(Err(WorkflowError::MalformedResponse {
                action: Action::GenerateCharts,
                detail: "expected value".into(),
            })),
            ..FakeService::happy()
        };
        let mut ctl = controller(service);
        block_on(ctl.upload_file(MemFile::csv("survey.csv")));
        let session = block_on(ctl.view_charts());

        assert_eq!(
            session.status(),
            &SessionStatus::Error(crate::error::MALFORMED_RESPONSE_MESSAGE.into())
        );
        assert!(session.chart_urls().is_empty());
    }

    #[test]
    fn test_generate_without_upload_makes_no_call() {
        let mut ctl = controller(FakeService::happy());
        block_on(ctl.generate_report());
        block_on(ctl.view_charts());
        assert!(ctl.service().calls().is_empty());
        assert_eq!(ctl.session().status(), &SessionStatus::Idle);
    }
}
