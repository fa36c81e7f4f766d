//! Shared types for the damu asset model.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned to an asset by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Wrap a server-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored file record as returned by the asset API.
///
/// Assets are created by the server on upload and are read-only to the
/// client. Field names follow the server's JSON representation; unknown
/// fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: AssetId,
    /// Filename as it was on the uploader's machine.
    #[serde(rename = "originalname")]
    pub original_name: String,
    /// Declared MIME type (e.g. `image/png`).
    #[serde(rename = "mimetype")]
    pub mime_type: String,
    /// Payload size in bytes.
    pub size: u64,
    /// When the server stored the asset.
    #[serde(rename = "uploadDate")]
    pub upload_date: DateTime<Utc>,
    /// Tags in the order they were given at upload time.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Search criteria applied to the asset list.
///
/// Every field is always defined: an empty string or `None` means
/// "no filter on this field".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSet {
    /// Type filter, e.g. `image`, `video` or `application/pdf`.
    pub file_type: String,
    /// Calendar day of upload in the user's local time zone.
    pub upload_date: Option<NaiveDate>,
    /// Free-text tag query.
    pub tags: String,
}

impl FilterSet {
    /// Replace the upload date with the local calendar day of `selected`.
    ///
    /// The time-of-day component is discarded, which is the same as
    /// normalising the selection to local midnight.
    #[must_use]
    pub fn with_upload_date_at<Tz: TimeZone>(self, selected: Option<&DateTime<Tz>>) -> Self {
        Self {
            upload_date: selected.map(DateTime::date_naive),
            ..self
        }
    }

    /// Returns `true` if no field narrows the result set.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.file_type.is_empty() && self.upload_date.is_none() && self.tags.is_empty()
    }
}

/// One entry of the type filter selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeOption {
    /// Value sent as the `type` query parameter (empty = all).
    pub value: &'static str,
    /// Human-readable label.
    pub label: &'static str,
}

/// Type filter choices in display order.
pub const TYPE_OPTIONS: [TypeOption; 4] = [
    TypeOption {
        value: "",
        label: "All Types",
    },
    TypeOption {
        value: "image",
        label: "Images",
    },
    TypeOption {
        value: "video",
        label: "Videos",
    },
    TypeOption {
        value: "application/pdf",
        label: "PDFs",
    },
];

/// Metadata of a file the user picked, independent of how the bytes are
/// held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Filename without any directory components.
    pub name: String,
    /// MIME type declared by the browser (may be empty).
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl FileInfo {
    /// Create file metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// A candidate file for upload.
///
/// Implemented by [`FileInfo`] and by the browser layer's file handle so
/// the upload controller can validate and hold either.
pub trait UploadSource {
    /// Filename shown to the user and sent with the upload.
    fn name(&self) -> &str;
    /// Declared MIME type.
    fn mime_type(&self) -> &str;
    /// Size in bytes.
    fn size(&self) -> u64;
}

impl UploadSource for FileInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn size(&self) -> u64 {
        self.size
    }
}
