//! Files picked in the browser.

use damu_core::{FileInfo, UploadSource};
use dioxus::html::FileData;

/// A file chosen through the picker or dropped on the upload zone.
///
/// Metadata is captured when the file is picked; the bytes are only read
/// when the upload starts.
#[derive(Clone)]
pub struct PickedFile {
    info: FileInfo,
    data: FileData,
}

impl PickedFile {
    /// Capture the browser's name, MIME type and size for `data`.
    #[must_use]
    pub fn new(data: FileData) -> Self {
        let info = FileInfo::new(
            data.name(),
            data.content_type().unwrap_or_default(),
            data.size(),
        );
        Self { info, data }
    }

    /// Metadata captured at pick time.
    #[must_use]
    pub const fn info(&self) -> &FileInfo {
        &self.info
    }

    /// Read the whole file into memory.
    ///
    /// # Errors
    ///
    /// Returns the browser's read error as text.
    #[allow(clippy::future_not_send)] // WASM is single-threaded
    pub async fn read_bytes(&self) -> Result<Vec<u8>, String> {
        self.data
            .read_bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| e.to_string())
    }
}

impl std::fmt::Debug for PickedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickedFile").field("info", &self.info).finish_non_exhaustive()
    }
}

impl PartialEq for PickedFile {
    fn eq(&self, other: &Self) -> bool {
        self.info == other.info
    }
}

impl UploadSource for PickedFile {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn mime_type(&self) -> &str {
        &self.info.mime_type
    }

    fn size(&self) -> u64 {
        self.info.size
    }
}
