//! Gallery controller: filter state, list requests, and loaded assets.
//!
//! Every filter change produces a fresh [`ListRequest`]. Requests are not
//! cancelled when superseded; instead each carries a generation number and
//! responses from older generations are dropped when they arrive, so a
//! slow response can never overwrite the list for a newer filter.

use chrono::NaiveDate;
use tracing::debug;

use crate::api::{ApiError, ListQuery};
use crate::types::{Asset, FilterSet};

/// Shown when the asset list could not be loaded.
pub const LOAD_FAILED: &str = "Failed to load assets. Please try again.";

/// Shown when a successful list request returned nothing.
pub const NO_ASSETS: &str = "No assets found";

/// A list request to be performed by the I/O layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// Pass back unchanged with the response.
    pub generation: u64,
    /// Query parameters for `GET /assets`.
    pub query: ListQuery,
}

/// What the gallery body should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryView<'a> {
    /// A request is outstanding.
    Loading,
    /// The last successful request returned no assets.
    Empty,
    /// Assets to render, in server order.
    Ready(&'a [Asset]),
}

/// Asset list state driven by the current [`FilterSet`].
#[derive(Debug, Clone)]
pub struct GalleryController {
    filters: FilterSet,
    assets: Vec<Asset>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl Default for GalleryController {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryController {
    /// Create a controller with empty filters.
    ///
    /// Starts in the loading state; the caller is expected to issue the
    /// initial [`refetch`](Self::refetch).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filters: FilterSet {
                file_type: String::new(),
                upload_date: None,
                tags: String::new(),
            },
            assets: Vec::new(),
            loading: true,
            error: None,
            generation: 0,
        }
    }

    /// The filters currently applied.
    #[must_use]
    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// The last successfully loaded assets.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Load error to show next to a retry button, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Generation of the most recently issued request.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Derived body state for rendering.
    #[must_use]
    pub fn view(&self) -> GalleryView<'_> {
        if self.loading {
            GalleryView::Loading
        } else if self.assets.is_empty() {
            GalleryView::Empty
        } else {
            GalleryView::Ready(&self.assets)
        }
    }

    /// Replace the whole filter set.
    ///
    /// Returns the list request to issue, or `None` if nothing changed.
    pub fn set_filters(&mut self, filters: FilterSet) -> Option<ListRequest> {
        if filters == self.filters {
            return None;
        }
        self.filters = filters;
        Some(self.refetch())
    }

    /// Change only the type filter.
    pub fn set_file_type(&mut self, file_type: impl Into<String>) -> Option<ListRequest> {
        self.set_filters(FilterSet {
            file_type: file_type.into(),
            ..self.filters.clone()
        })
    }

    /// Change only the upload date filter.
    pub fn set_upload_date(&mut self, upload_date: Option<NaiveDate>) -> Option<ListRequest> {
        self.set_filters(FilterSet {
            upload_date,
            ..self.filters.clone()
        })
    }

    /// Change only the tag filter.
    pub fn set_tags(&mut self, tags: impl Into<String>) -> Option<ListRequest> {
        self.set_filters(FilterSet {
            tags: tags.into(),
            ..self.filters.clone()
        })
    }

    /// Issue a request for the current filters.
    ///
    /// Also used for the manual retry button and after an upload.
    pub fn refetch(&mut self) -> ListRequest {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        ListRequest {
            generation: self.generation,
            query: ListQuery::from_filters(&self.filters),
        }
    }

    /// Apply a successful response.
    ///
    /// Returns `false` if the response belonged to a superseded request
    /// and was discarded.
    pub fn on_list_loaded(&mut self, generation: u64, assets: Vec<Asset>) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "discarding stale asset list");
            return false;
        }
        self.assets = assets;
        self.loading = false;
        true
    }

    /// Apply a failed response.
    ///
    /// The previously loaded assets stay in place. Returns `false` if the
    /// failure belonged to a superseded request and was discarded.
    pub fn on_list_failed(&mut self, generation: u64, error: &ApiError) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, %error, "discarding stale list failure");
            return false;
        }
        self.error = Some(LOAD_FAILED.to_owned());
        self.loading = false;
        true
    }
}
