//! 状態表示コンポーネント

use feedback_catalyst_common::SessionStatus;
use leptos::prelude::*;

/// 状態メッセージと処理中ローダー
#[component]
pub fn ProgressBar(status: Signal<SessionStatus>, busy: Signal<bool>) -> impl IntoView {
    let message = move || {
        status.with(|status| {
            status
                .message()
                .map(|message| (status.as_str(), message.to_string()))
        })
    };

    view! {
        {move || message().map(|(kind, text)| view! {
            <p class=format!("upload-status {}", kind)>{text}</p>
        })}
        <Show when=move || busy.get()>
            <div class="loader"></div>
        </Show>
    }
}
