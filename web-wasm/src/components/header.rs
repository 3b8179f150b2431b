//! ヘッダーコンポーネント

use crate::auth::{use_auth, FirebaseAuth};
use crate::routes::{navigate, Route};
use feedback_catalyst_common::IdentityProvider;
use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;

const PROFILE_IMG: &str = "https://cdn-icons-png.flaticon.com/512/149/149071.png";

#[component]
pub fn Header(
    /// ログイン/サインアップ画面ではナビゲーションを出さない
    #[prop(optional)]
    hide_nav: bool,
    #[prop(optional)] transparent: bool,
) -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = move || auth.map(|a| a.is_authenticated()).unwrap_or(false);

    let on_logout = move |_| {
        spawn_local(async move {
            if let Err(e) = FirebaseAuth.sign_out().await {
                console::error!(e.to_string());
            }
            navigate(Route::Landing);
        });
    };

    let nav = (!hide_nav).then(|| {
        view! {
            <nav class="nav-buttons">
                <Show
                    when=is_authenticated
                    fallback=|| view! {
                        <button class="btn-secondary" on:click=move |_| navigate(Route::Login)>
                            "Login"
                        </button>
                        <button class="btn-primary" on:click=move |_| navigate(Route::Signup)>
                            "Sign Up"
                        </button>
                    }
                >
                    <div class="profile-logout-stack">
                        <img src=PROFILE_IMG alt="Profile" class="profile-img" />
                        <button class="logout-btn" on:click=on_logout>"Logout"</button>
                    </div>
                </Show>
            </nav>
        }
    });

    view! {
        <header class=if transparent { "header transparent-bg" } else { "header" }>
            <div class="header-inner">
                <div class="logo" on:click=move |_| navigate(Route::Landing)>
                    <h1>"Feedback Catalyst"</h1>
                </div>
            </div>
            {nav}
        </header>
    }
}
