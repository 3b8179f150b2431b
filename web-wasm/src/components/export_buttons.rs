//! 生成ボタンコンポーネント

use leptos::prelude::*;

#[component]
pub fn ExportButtons<FR, FC>(
    /// 見出しの番号（サブジェクト版はレポート区分がないので繰り上がる）
    step: Signal<u8>,
    busy: Signal<bool>,
    on_generate: FR,
    on_view_charts: FC,
) -> impl IntoView
where
    FR: Fn(()) + 'static,
    FC: Fn(()) + 'static,
{
    view! {
        <div class="step-section">
            <h2>{move || format!("Step {}: Generate Output", step.get())}</h2>
            <div class="generate-buttons">
                <button
                    class="btn-generate"
                    disabled=move || busy.get()
                    on:click=move |_| on_generate(())
                >
                    "Get Report Archive"
                </button>
                <button
                    class="btn-secondary"
                    disabled=move || busy.get()
                    on:click=move |_| on_view_charts(())
                >
                    "View Charts"
                </button>
            </div>
        </div>
    }
}
