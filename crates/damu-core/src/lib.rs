//! damu-core: Asset model and client-state controllers (sans-IO).
//!
//! Holds everything the asset manager decides without touching the
//! network or the DOM: the wire model, configuration, size and date
//! formatting, file validation, upload progress, the filtered asset
//! list, tag-input debouncing, and preview classification.
//!
//! Controllers never perform requests. They return request descriptions
//! ([`UploadRequest`], [`ListRequest`]) and accept the outcome through
//! `on_*` methods. All browser interaction lives in `damu-io`.

pub mod api;
pub mod config;
pub mod debounce;
pub mod format;
pub mod gallery;
pub mod preview;
pub mod types;
pub mod upload;

pub use api::{ApiError, Endpoint, ListQuery, Method};
pub use config::ClientConfig;
pub use debounce::{Debouncer, Settle, TAG_DEBOUNCE};
pub use format::{format_date_for_api, format_display_date, format_file_size};
pub use gallery::{GalleryController, GalleryView, ListRequest};
pub use preview::{AssetIcon, PreviewKind};
pub use types::{Asset, AssetId, FileInfo, FilterSet, TYPE_OPTIONS, TypeOption, UploadSource};
pub use upload::{UploadController, UploadRequest, ValidationError, parse_tags};
