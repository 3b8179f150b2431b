//! 認証プロバイダ連携の共通部分
//!
//! プロバイダ固有のエラーコードを画面表示用メッセージに変換し、
//! サインアップフォームの事前検証を行う。
//! 認証状態の購読は `IdentityProvider::observe` が返すガードで所有し、
//! ガードを破棄すると購読が解除される。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// パスワードの最小文字数
pub const MIN_PASSWORD_LEN: usize = 6;

/// エラーが発生した操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    Login,
    Signup,
    Federated,
    SignOut,
}

/// 認証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email is already registered")]
    EmailAlreadyInUse,

    #[error("Google sign-in failed")]
    FederatedSignInFailed { code: String },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("An error occurred during login")]
    LoginFailed { code: String },

    #[error("An error occurred during signup")]
    SignupFailed { code: String },

    #[error("An error occurred during logout")]
    SignOutFailed { code: String },
}

impl AuthError {
    /// プロバイダのエラーコードを変換
    pub fn from_provider_code(flow: AuthFlow, code: &str) -> Self {
        match (flow, code) {
            (AuthFlow::Federated, _) => AuthError::FederatedSignInFailed { code: code.into() },
            (AuthFlow::Login, "auth/invalid-credential")
            | (AuthFlow::Login, "auth/wrong-password")
            | (AuthFlow::Login, "auth/user-not-found") => AuthError::InvalidCredentials,
            (AuthFlow::Signup, "auth/email-already-in-use") => AuthError::EmailAlreadyInUse,
            (AuthFlow::Login, _) => AuthError::LoginFailed { code: code.into() },
            (AuthFlow::Signup, _) => AuthError::SignupFailed { code: code.into() },
            (AuthFlow::SignOut, _) => AuthError::SignOutFailed { code: code.into() },
        }
    }
}

/// ログイン済みユーザー
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// 認証状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// 最初の通知を待っている
    #[default]
    Pending,
    SignedOut,
    SignedIn(AuthUser),
}

impl AuthState {
    pub fn from_user(user: Option<AuthUser>) -> Self {
        match user {
            Some(user) => AuthState::SignedIn(user),
            None => AuthState::SignedOut,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AuthState::Pending)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::SignedIn(_))
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            AuthState::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

/// ログインフォーム
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// サインアップフォーム
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// プロバイダに送る前の検証
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        Ok(())
    }
}

/// 認証プロバイダ
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// 破棄時に購読を解除するガード
    type Subscription;

    /// 認証状態の変化を購読する
    fn observe<F>(&self, callback: F) -> Self::Subscription
    where
        F: Fn(Option<AuthUser>) + 'static;

    async fn sign_in(&self, form: &LoginForm) -> Result<AuthUser, AuthError>;

    async fn sign_in_with_federated_provider(&self) -> Result<AuthUser, AuthError>;

    async fn create_account(&self, form: &SignupForm) -> Result<AuthUser, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}
