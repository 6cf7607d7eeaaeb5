//! Data-source button

use leptos::*;

#[component]
pub fn DataSourceButton(
    /// Caption under the logo
    title: String,
    /// Logo URL, if the source has one
    logo: Option<String>,
    /// Opens the matching modal
    on_open: Callback<()>,
) -> impl IntoView {
    let alt = format!("{} logo", title);

    view! {
        <button class="source-button" on:click=move |_| on_open.call(())>
            {logo.map(|src| view! { <img class="source-logo" src=src alt=alt/> })}
            <span class="source-title">{title}</span>
        </button>
    }
}
