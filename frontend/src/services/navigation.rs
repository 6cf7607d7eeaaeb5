//! Full-page navigation.

use ingest_uploader::Navigator;

/// Replaces the current page, which unmounts the whole app.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) -> Result<(), String> {
        let window = web_sys::window().ok_or_else(|| "no global window".to_string())?;
        window
            .location()
            .set_href(url)
            .map_err(|e| format!("Failed to navigate: {:?}", e))
    }
}
