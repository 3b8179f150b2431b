//! Firebase Authentication バインディング
//!
//! SDK呼び出しは js/auth-bridge.js に委譲し、エラーコードを `AuthError` に変換する。

use feedback_catalyst_common::{
    AuthError, AuthFlow, AuthUser, IdentityProvider, LoginForm, SignupForm,
};
use gloo::console;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/auth-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = "observeAuth")]
    fn observe_auth_js(callback: &Closure<dyn Fn(JsValue)>) -> js_sys::Function;

    #[wasm_bindgen(js_name = "signIn", catch)]
    async fn sign_in_js(email: &str, password: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "signInWithGoogle", catch)]
    async fn sign_in_with_google_js() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "createAccount", catch)]
    async fn create_account_js(account: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "signOut", catch)]
    async fn sign_out_js() -> Result<JsValue, JsValue>;
}

/// JavaScript側に渡す新規アカウント
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsNewAccount<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
}

/// 認証状態の購読
///
/// 破棄すると購読を解除する。
pub struct AuthSubscription {
    unsubscribe: js_sys::Function,
    _callback: Closure<dyn Fn(JsValue)>,
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Err(e) = self.unsubscribe.call0(&JsValue::NULL) {
            console::warn!(format!("unsubscribe failed: {:?}", e));
        }
    }
}

/// 例外オブジェクトの `code` を取り出す
fn error_code(error: &JsValue) -> String {
    js_sys::Reflect::get(error, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_string())
        .unwrap_or_default()
}

fn provider_error(flow: AuthFlow, error: JsValue) -> AuthError {
    let code = error_code(&error);
    console::error!(format!("{:?} failed: {}", flow, code));
    AuthError::from_provider_code(flow, &code)
}

fn to_user(flow: AuthFlow, value: JsValue) -> Result<AuthUser, AuthError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| AuthError::from_provider_code(flow, &e.to_string()))
}

/// Firebase 版 Identity Provider
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebaseAuth;

impl IdentityProvider for FirebaseAuth {
    type Subscription = AuthSubscription;

    fn observe<F>(&self, callback: F) -> AuthSubscription
    where
        F: Fn(Option<AuthUser>) + 'static,
    {
        let closure = Closure::<dyn Fn(JsValue)>::new(move |value: JsValue| {
            let user = if value.is_null() || value.is_undefined() {
                None
            } else {
                serde_wasm_bindgen::from_value::<AuthUser>(value).ok()
            };
            callback(user);
        });
        let unsubscribe = observe_auth_js(&closure);
        AuthSubscription {
            unsubscribe,
            _callback: closure,
        }
    }

    async fn sign_in(&self, form: &LoginForm) -> Result<AuthUser, AuthError> {
        let flow = AuthFlow::Login;
        let value = sign_in_js(&form.email, &form.password)
            .await
            .map_err(|e| provider_error(flow, e))?;
        to_user(flow, value)
    }

    async fn sign_in_with_federated_provider(&self) -> Result<AuthUser, AuthError> {
        let flow = AuthFlow::Federated;
        let value = sign_in_with_google_js()
            .await
            .map_err(|e| provider_error(flow, e))?;
        to_user(flow, value)
    }

    async fn create_account(&self, form: &SignupForm) -> Result<AuthUser, AuthError> {
        form.validate()?;

        let flow = AuthFlow::Signup;
        let account = JsNewAccount {
            email: &form.email,
            password: &form.password,
            display_name: &form.name,
        };
        let account = serde_wasm_bindgen::to_value(&account)
            .map_err(|e| AuthError::from_provider_code(flow, &e.to_string()))?;
        let value = create_account_js(account)
            .await
            .map_err(|e| provider_error(flow, e))?;
        to_user(flow, value)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        sign_out_js()
            .await
            .map(|_| ())
            .map_err(|e| provider_error(AuthFlow::SignOut, e))
    }
}
