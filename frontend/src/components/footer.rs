//! Footer component

use leptos::*;

use crate::BACKEND_URL;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Files are sent to " <span class="backend-url">{BACKEND_URL}</span></div>
        </footer>
    }
}
