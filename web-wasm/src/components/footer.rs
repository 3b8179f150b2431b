use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <div class="container footer-container">
                <div class="copyright">"© 2025 Feedback Catalyst"</div>
                <div class="footer-links">
                    <a href="/privacy">"Privacy Policy"</a>
                    <a href="/terms">"Terms of Use"</a>
                    <a href="/contact">"Contact Us"</a>
                </div>
            </div>
        </footer>
    }
}
