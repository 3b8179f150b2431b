use leptos::prelude::*;

/// (アイコン, タイトル, 説明)
const FEATURES: [(&str, &str, &str); 3] = [
    (
        "📊",
        "Auto-generated Reports",
        "Get comprehensive reports automatically generated from your feedback data.",
    ),
    (
        "🤖",
        "Smart Sentiment Analysis",
        "Advanced AI-powered sentiment analysis to understand customer emotions.",
    ),
    (
        "📈",
        "Visual Rating Insights",
        "Beautiful visualizations to help you understand rating patterns.",
    ),
];

#[component]
pub fn Features() -> impl IntoView {
    view! {
        <section class="features">
            <div class="container">
                <div class="features-grid">
                    {FEATURES
                        .iter()
                        .map(|(icon, title, description)| view! {
                            <div class="feature-card">
                                <div class="feature-icon">{*icon}</div>
                                <h3>{*title}</h3>
                                <p>{*description}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}
