use crate::routes::{navigate, Route};
use leptos::prelude::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <section class="hero">
            <div class="container hero-container">
                <div class="hero-illustration">
                    <img src="/Freepik.png" alt="Feedback Analysis Illustration" class="hero-image" />
                </div>
                <div class="hero-content">
                    <h1>"Turn Raw Feedback into Meaningful Insights"</h1>
                    <p class="subtitle">
                        "Upload CSV or Excel files and instantly generate comprehensive feedback analysis reports."
                    </p>
                    <div class="upload-section">
                        <button
                            class="btn-secondary get-analysis-btn"
                            on:click=move |_| navigate(Route::Report)
                        >
                            "Go to Report Generator"
                        </button>
                        <p class="file-types">"Supports .csv and .xlsx formats"</p>
                    </div>
                </div>
            </div>
        </section>
    }
}
