//! 認証（Firebase Authentication）

pub mod firebase;

use feedback_catalyst_common::AuthState;
use leptos::prelude::*;

pub use firebase::{AuthSubscription, FirebaseAuth};

/// ルートで購読した認証状態（コンテキストで配る）
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.state.with(AuthState::is_authenticated)
    }
}

/// コンテキストから認証状態を取得
pub fn use_auth() -> Option<AuthContext> {
    use_context::<AuthContext>()
}
