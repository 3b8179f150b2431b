//! メインアプリケーションコンポーネント

use crate::auth::{AuthContext, FirebaseAuth};
use crate::components::{
    features::Features, footer::Footer, header::Header, hero::Hero, how_it_works::HowItWorks,
    login::Login, report::ReportPage, signup::Signup,
};
use crate::routes::{current_route, navigate, Route};
use feedback_catalyst_common::{AuthState, IdentityProvider};
use leptos::prelude::*;

/// メインアプリケーションコンポーネント
///
/// 認証状態の購読はここで一度だけ作り、破棄時に解除する。
#[component]
pub fn App() -> impl IntoView {
    let (auth, set_auth) = signal(AuthState::Pending);
    let subscription = FirebaseAuth.observe(move |user| set_auth.set(AuthState::from_user(user)));
    let subscription = StoredValue::new_local(Some(subscription));
    on_cleanup(move || {
        subscription.update_value(|s| {
            s.take();
        });
    });
    provide_context(AuthContext { state: auth });

    let (route, set_route) = signal(current_route());
    let hashchange = window_event_listener(leptos::ev::hashchange, move |_| {
        set_route.set(current_route());
    });
    on_cleanup(move || hashchange.remove());

    // ログイン済みでログイン/サインアップを開いたらトップへ
    Effect::new(move |_| {
        if let Some(target) = route.get().redirect(auth.get().is_authenticated()) {
            navigate(target);
        }
    });

    view! {
        <Show
            when=move || !auth.with(AuthState::is_pending)
            fallback=|| view! {
                <div class="loading-container">
                    <div class="loading-spinner"></div>
                </div>
            }
        >
            <div class="app">
                {move || match route.get() {
                    Route::Landing => view! {
                        <Header />
                        <Hero />
                        <Features />
                        <HowItWorks />
                        <Footer />
                    }
                    .into_any(),
                    Route::Login => view! { <Login /> <Footer /> }.into_any(),
                    Route::Signup => view! { <Signup /> <Footer /> }.into_any(),
                    Route::Report => view! {
                        <Header />
                        <ReportPage />
                        <Footer />
                    }
                    .into_any(),
                }}
            </div>
        </Show>
    }
}
