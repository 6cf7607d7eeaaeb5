//! Status banner rendering.

use leptos::*;
use ingest_uploader::{StatusBanner, UploadStatus};

/// Renders the banner; nothing at all while the status is `unknown`.
#[component]
pub fn StatusAlert(banner: Signal<StatusBanner>) -> impl IntoView {
    view! {
        <Show
            when=move || banner.with(|b| b.status() != UploadStatus::Unknown)
            fallback=|| view! { }
        >
            <div
                class=move || format!("status-banner status-{}", banner.with(|b| b.status().as_str()))
                role="status"
            >
                {move || banner.with(|b| b.message().to_string())}
            </div>
        </Show>
    }
}
