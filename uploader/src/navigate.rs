//! Full-page navigation seam used by the authorization follow-up.

/// Sends the user to an external URL.
///
/// In the browser this replaces the current page, so a successful call
/// usually means the modal is about to disappear.
pub trait Navigator {
    fn navigate(&self, url: &str) -> Result<(), String>;
}

/// Opens URLs in the system browser, or only prints them.
#[cfg(feature = "native")]
#[derive(Debug, Clone, Copy)]
pub struct SystemBrowser {
    launch: bool,
}

#[cfg(feature = "native")]
impl SystemBrowser {
    /// `launch = false` prints the URL without opening anything.
    pub fn new(launch: bool) -> Self {
        Self { launch }
    }
}

#[cfg(feature = "native")]
impl Navigator for SystemBrowser {
    fn navigate(&self, url: &str) -> Result<(), String> {
        println!("🔗 {}", url);
        if !self.launch {
            return Ok(());
        }
        open::that(url).map_err(|e| format!("Failed to open browser: {}", e))
    }
}
