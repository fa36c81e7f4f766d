//! Dioxus UI components for damu.
//!
//! Provides the upload form, the gallery with its filter bar, asset
//! cards, and the preview modal.

mod asset_card;
mod filter_bar;
mod gallery;
mod preview_modal;
mod upload;

pub use asset_card::AssetCard;
pub use filter_bar::SearchFilterBar;
pub use gallery::AssetGallery;
pub use preview_modal::PreviewModal;
pub use upload::FileUpload;
