//! チャート一覧コンポーネント

use leptos::prelude::*;

#[component]
pub fn ChartGallery(chart_urls: Signal<Vec<String>>) -> impl IntoView {
    view! {
        <Show when=move || chart_urls.with(|urls| !urls.is_empty())>
            <div class="step-section">
                <h2>"Generated Charts"</h2>
                <div class="charts-container">
                    <For
                        each=move || chart_urls.get().into_iter().enumerate()
                        key=|(index, url)| (*index, url.clone())
                        children=move |(index, url)| view! {
                            <div class="chart-item">
                                <img src=url alt=format!("Generated chart {}", index + 1) />
                            </div>
                        }
                    />
                </div>
            </div>
        </Show>
    }
}
