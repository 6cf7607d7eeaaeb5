//! Ingestion app - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend letting a user pick a data source (Gmail, OCR,
//! ...) and upload one file to the ingestion backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header                                                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  DataSourcesPanel                                            │
//! │  ├── DataSourceButton (one per source)                      │
//! │  └── UploadModal (one per source, at most one open)         │
//! │      └── StatusAlert                                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Backend URL and the list of sources
//! - [`types`] - Browser file handle
//! - [`components`] - UI components
//! - [`services`] - Browser transport and navigation

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::*;
pub use types::BrowserFile;
pub use components::*;
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Ingestion frontend - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    view! {
        <Header/>

        <div class="container">
            <DataSourcesPanel sources=data_sources()/>
        </div>

        <Footer/>
    }
}
