//! ログイン画面

use crate::auth::FirebaseAuth;
use crate::components::header::Header;
use crate::routes::{navigate, Route};
use feedback_catalyst_common::{IdentityProvider, LoginForm};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

const GOOGLE_ICON: &str = "https://www.gstatic.com/firebasejs/ui/2.0.0/images/auth/google.svg";

/// Googleでログイン（ログイン/サインアップ共通）
#[component]
pub fn FederatedButton(
    is_loading: ReadSignal<bool>,
    set_is_loading: WriteSignal<bool>,
    set_error: WriteSignal<Option<String>>,
    button_class: &'static str,
) -> impl IntoView {
    let on_click = move |_| {
        set_error.set(None);
        set_is_loading.set(true);
        spawn_local(async move {
            match FirebaseAuth.sign_in_with_federated_provider().await {
                Ok(_) => navigate(Route::Landing),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <button type="button" class=button_class on:click=on_click disabled=move || is_loading.get()>
            <img src=GOOGLE_ICON alt="Google" />
            "Continue with Google"
        </button>
    }
}

/// エラーメッセージ
#[component]
pub fn ErrorMessage(error: ReadSignal<Option<String>>) -> impl IntoView {
    move || {
        error
            .get()
            .map(|message| view! { <div class="error-message">{message}</div> })
    }
}

#[component]
pub fn Login() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_is_loading.set(true);

        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        spawn_local(async move {
            match FirebaseAuth.sign_in(&form).await {
                Ok(_) => navigate(Route::Landing),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <Header hide_nav=true transparent=true />
        <div class="login-centered-outer">
            <div class="login-centered-block">
                <div class="login-image-block" role="img" aria-label="Analytics Illustration"></div>
                <div class="login-centered-form">
                    <h2>"Login to Feedback Catalyst"</h2>
                    <ErrorMessage error=error />
                    <form class="login-form" on:submit=on_submit>
                        <div class="form-group">
                            <label for="email">"Email"</label>
                            <input
                                type="email"
                                id="email"
                                name="email"
                                placeholder="Enter your email"
                                required
                                prop:value=email
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>
                        <div class="form-group">
                            <label for="password">"Password"</label>
                            <input
                                type="password"
                                id="password"
                                name="password"
                                placeholder="Enter your password"
                                required
                                prop:value=password
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>
                        <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                            {move || if is_loading.get() { "Logging in..." } else { "Login" }}
                        </button>
                    </form>
                    <FederatedButton
                        is_loading=is_loading
                        set_is_loading=set_is_loading
                        set_error=set_error
                        button_class="login-google-btn"
                    />
                </div>
            </div>
        </div>
    }
}
