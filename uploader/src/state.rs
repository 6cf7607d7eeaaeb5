//! Per-modal UI state.

use crate::status::StatusBanner;

/// A user-picked file handle.
///
/// The controller only needs a display name; the bytes stay behind the
/// handle until the transport encodes them.
pub trait SelectedFile: Clone {
    fn name(&self) -> String;
}

/// State owned by one open modal.
///
/// Created fresh when the modal opens and restored to [`Default`] on close.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadState<F> {
    /// File picked by the user, if any
    pub selected_file: Option<F>,
    /// Severity and text of the last operation
    pub banner: StatusBanner,
    /// True strictly while a request is in flight
    pub is_loading: bool,
}

impl<F> Default for UploadState<F> {
    fn default() -> Self {
        Self {
            selected_file: None,
            banner: StatusBanner::default(),
            is_loading: false,
        }
    }
}

impl<F> UploadState<F> {
    /// Restore every field at once.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when nothing has been picked or reported yet.
    pub fn is_pristine(&self) -> bool {
        self.selected_file.is_none() && self.banner.is_empty() && !self.is_loading
    }
}
