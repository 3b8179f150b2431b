use leptos::prelude::*;

const STEPS: [(&str, &str, &str); 3] = [
    ("01", "Upload File", "Upload your CSV or Excel file containing feedback data."),
    ("02", "Analyze Feedback", "Our AI processes your data and generates comprehensive insights."),
    ("03", "Download Report", "Get your detailed analysis report in your preferred format."),
];

#[component]
pub fn HowItWorks() -> impl IntoView {
    view! {
        <section class="how-it-works">
            <div class="container">
                <h2 class="section-title">"How It Works"</h2>
                <div class="steps-container">
                    {STEPS
                        .iter()
                        .enumerate()
                        .map(|(i, (number, title, description))| view! {
                            <div class="step">
                                <div class="step-number">{*number}</div>
                                <div class="step-content">
                                    <h3>{*title}</h3>
                                    <p>{*description}</p>
                                </div>
                                {(i + 1 < STEPS.len()).then(|| view! { <div class="step-connector"></div> })}
                            </div>
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}
