//! Feedback Catalyst Common Library
//!
//! CLIとWeb(WASM)で共有されるワークフロー状態機械とReport Serviceの契約

pub mod api;
pub mod auth;
pub mod controller;
pub mod error;
pub mod session;
pub mod types;
pub mod validation;

pub use api::{
    chart_file_name, parse_json, ChartsResponse, Endpoints, HeadersResponse, UploadResponse,
    ARCHIVE_FILE_NAME, DEFAULT_SERVICE_URL,
};
pub use auth::{AuthError, AuthFlow, AuthState, AuthUser, IdentityProvider, LoginForm, SignupForm};
pub use controller::{run_effect, ArchiveSink, ReportService, WorkflowController};
pub use error::{Action, Result, ValidationError, WorkflowError, MALFORMED_RESPONSE_MESSAGE};
pub use session::{Effect, Event, Ticket, UploadSession};
pub use types::{FeedbackType, LocalFile, Phase, ReportForm, ReportType, SessionStatus};
pub use validation::{validate_upload, ALLOWED_EXTENSIONS, MAX_FILE_SIZE};
