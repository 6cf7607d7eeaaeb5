//! Browser-side types shared by services and components.

use ingest_uploader::SelectedFile;
use web_sys::File;

/// A file picked through an `<input type="file">`.
#[derive(Clone, Debug, PartialEq)]
pub struct BrowserFile(pub File);

impl SelectedFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }
}

impl From<File> for BrowserFile {
    fn from(file: File) -> Self {
        Self(file)
    }
}
