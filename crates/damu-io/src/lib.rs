//! damu-io: Browser I/O and Dioxus component library.
//!
//! Talks to the asset API, saves downloads through Blob URLs, wraps
//! picked files, and provides the UI components of the damu web
//! application.

pub mod client;
pub mod components;
pub mod download;
pub mod file;

pub use client::{AssetClient, UploadPayload};
pub use components::{AssetCard, AssetGallery, FileUpload, PreviewModal, SearchFilterBar};
pub use file::PickedFile;
