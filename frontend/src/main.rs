//! Entry point for the WASM application

use ingest_frontend::App;
use leptos::*;

pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Ingestion frontend - Starting Leptos App");

    mount_to_body(|| view! { <App/> })
}
