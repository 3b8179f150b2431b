//! サインアップ画面

use crate::auth::FirebaseAuth;
use crate::components::header::Header;
use crate::components::login::{ErrorMessage, FederatedButton};
use crate::routes::{navigate, Route};
use feedback_catalyst_common::{IdentityProvider, SignupForm};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// ラベル付き入力欄
#[component]
fn Field(
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
    disabled: ReadSignal<bool>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                type=input_type
                id=id
                name=id
                placeholder=placeholder
                required
                prop:value=value
                on:input=move |ev| set_value.set(event_target_value(&ev))
                disabled=move || disabled.get()
            />
        </div>
    }
}

#[component]
pub fn Signup() -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);

        let form = SignupForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        // プロバイダに送る前に弾く
        if let Err(e) = form.validate() {
            set_error.set(Some(e.to_string()));
            return;
        }

        set_is_loading.set(true);
        spawn_local(async move {
            match FirebaseAuth.create_account(&form).await {
                Ok(_) => navigate(Route::Landing),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <Header hide_nav=true transparent=true />
        <div class="signup-centered-outer">
            <div class="signup-centered-block">
                <div class="login-image-block" role="img" aria-label="Analytics Illustration"></div>
                <div class="login-centered-form">
                    <h2>"Create an Account"</h2>
                    <ErrorMessage error=error />
                    <form class="auth-form" on:submit=on_submit>
                        <Field
                            id="name"
                            label="Full Name"
                            input_type="text"
                            placeholder="Enter your full name"
                            value=name
                            set_value=set_name
                            disabled=is_loading
                        />
                        <Field
                            id="email"
                            label="Email Address"
                            input_type="email"
                            placeholder="Enter your email address"
                            value=email
                            set_value=set_email
                            disabled=is_loading
                        />
                        <Field
                            id="password"
                            label="Password"
                            input_type="password"
                            placeholder="Enter your password"
                            value=password
                            set_value=set_password
                            disabled=is_loading
                        />
                        <Field
                            id="confirmPassword"
                            label="Confirm Password"
                            input_type="password"
                            placeholder="Confirm your password"
                            value=confirm_password
                            set_value=set_confirm_password
                            disabled=is_loading
                        />
                        <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                            {move || if is_loading.get() { "Creating Account..." } else { "Sign Up" }}
                        </button>
                    </form>
                    <div class="divider"></div>
                    <FederatedButton
                        is_loading=is_loading
                        set_is_loading=set_is_loading
                        set_error=set_error
                        button_class="btn-google signup-google-btn"
                    />
                </div>
            </div>
        </div>
    }
}
