//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Sheetflow • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-hint">"Files are processed by the server; reload the page to start over."</div>
        </footer>
    }
}
