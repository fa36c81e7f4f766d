//! Upload controller: file validation, draft state, and progress.
//!
//! [`UploadController`] holds at most one draft (a picked file plus a raw
//! tags string). [`submit`](UploadController::submit) hands back an
//! [`UploadRequest`] for the I/O layer to send; the outcome is fed back
//! through [`on_progress`](UploadController::on_progress),
//! [`on_success`](UploadController::on_success) and
//! [`on_failure`](UploadController::on_failure).

use crate::api::ApiError;
use crate::config::ClientConfig;
use crate::format::format_file_size;
use crate::types::UploadSource;

/// Shown when an upload fails without a server-provided message.
pub const UPLOAD_FAILED: &str = "Upload failed. Please try again.";

/// Reasons a file selection or submission is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The declared MIME type is not on the allow-list.
    #[error("Invalid file type. Allowed types: {}", allowed_subtypes(.allowed))]
    InvalidType {
        /// The rejected MIME type.
        mime_type: String,
        /// The configured allow-list.
        allowed: Vec<String>,
    },

    /// The file is larger than the configured maximum.
    #[error("File size too large. Maximum size is {}", size_label(.max))]
    TooLarge {
        /// Size of the rejected file in bytes.
        size: u64,
        /// Configured maximum in bytes.
        max: u64,
    },

    /// Submit was pressed with no draft.
    #[error("Please select a file first")]
    NoFileSelected,

    /// Submit was pressed while the draft is already being sent.
    #[error("An upload is already in progress")]
    UploadInProgress,
}

/// `image/jpeg, application/pdf` -> `jpeg, pdf`.
fn allowed_subtypes(allowed: &[String]) -> String {
    allowed
        .iter()
        .map(|t| t.split_once('/').map_or(t.as_str(), |(_, sub)| sub))
        .collect::<Vec<_>>()
        .join(", ")
}

fn size_label(max: &u64) -> String {
    format_file_size(*max)
}

/// Split a comma-delimited tag string into trimmed, non-empty tags.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// What the I/O layer must send for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest<F> {
    /// The file to send as the multipart `file` field.
    pub file: F,
    /// Trimmed `tags` field, omitted when blank.
    pub tags: Option<String>,
}

/// State of the upload form.
#[derive(Debug, Clone)]
pub struct UploadController<F> {
    limits: ClientConfig,
    draft: Option<F>,
    tags: String,
    progress: u8,
    in_flight: bool,
    dragging: bool,
    error: Option<String>,
}

impl<F: UploadSource + Clone> UploadController<F> {
    /// Create an empty controller using the allow-list and size limit from
    /// `config`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            limits: config.clone(),
            draft: None,
            tags: String::new(),
            progress: 0,
            in_flight: false,
            dragging: false,
            error: None,
        }
    }

    /// Validate `candidate` and make it the draft.
    ///
    /// On rejection the error is recorded for display and any previous
    /// selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidType`] if the MIME type is not
    /// allowed, or [`ValidationError::TooLarge`] if the file exceeds the
    /// maximum size. Returns [`ValidationError::UploadInProgress`] while
    /// the current draft is being sent; the draft is left untouched.
    pub fn select_file(&mut self, candidate: F) -> Result<(), ValidationError> {
        if self.in_flight {
            return Err(ValidationError::UploadInProgress);
        }
        match self.validate(&candidate) {
            Ok(()) => {
                self.error = None;
                self.draft = Some(candidate);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.draft = None;
                Err(e)
            }
        }
    }

    /// Select the first of several files (a drop or picker event).
    ///
    /// An empty list leaves the state untouched and returns `None`.
    pub fn select_first(
        &mut self,
        files: impl IntoIterator<Item = F>,
    ) -> Option<Result<(), ValidationError>> {
        files.into_iter().next().map(|f| self.select_file(f))
    }

    fn validate(&self, candidate: &F) -> Result<(), ValidationError> {
        let mime_type = candidate.mime_type();
        if !self.limits.accepts(mime_type) {
            return Err(ValidationError::InvalidType {
                mime_type: mime_type.to_owned(),
                allowed: self.limits.supported_file_types.clone(),
            });
        }
        if candidate.size() > self.limits.max_file_size {
            return Err(ValidationError::TooLarge {
                size: candidate.size(),
                max: self.limits.max_file_size,
            });
        }
        Ok(())
    }

    /// Store the raw tags text. No validation happens until submit.
    ///
    /// Ignored while an upload is in flight, since the tags being sent
    /// were taken at submit.
    pub fn set_tags(&mut self, text: impl Into<String>) {
        if !self.in_flight {
            self.tags = text.into();
        }
    }

    /// Raw tags text as typed.
    #[must_use]
    pub fn tags(&self) -> &str {
        &self.tags
    }

    /// The current draft file, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&F> {
        self.draft.as_ref()
    }

    /// Upload progress in percent.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    /// Message to show under the form, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `true` while progress is strictly between 0 and 100.
    #[must_use]
    pub const fn is_uploading(&self) -> bool {
        self.progress > 0 && self.progress < 100
    }

    /// `true` from submit until the upload succeeds or fails; the picker,
    /// drop zone and tags field are locked meanwhile.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Whether the submit button should be enabled.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        self.draft.is_some() && !self.in_flight && !self.is_uploading()
    }

    /// Largest accepted file size in bytes.
    #[must_use]
    pub const fn max_file_size(&self) -> u64 {
        self.limits.max_file_size
    }

    /// Value for the file input's `accept` attribute.
    #[must_use]
    pub fn accept_attribute(&self) -> String {
        self.limits.supported_file_types.join(",")
    }

    /// Start uploading the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoFileSelected`] without a draft and
    /// [`ValidationError::UploadInProgress`] if the draft is already being
    /// sent.
    pub fn submit(&mut self) -> Result<UploadRequest<F>, ValidationError> {
        let Some(file) = self.draft.clone() else {
            let e = ValidationError::NoFileSelected;
            self.error = Some(e.to_string());
            return Err(e);
        };
        if self.in_flight || self.is_uploading() {
            return Err(ValidationError::UploadInProgress);
        }

        self.error = None;
        self.progress = 0;
        self.in_flight = true;

        let tags = self.tags.trim();
        Ok(UploadRequest {
            file,
            tags: (!tags.is_empty()).then(|| tags.to_owned()),
        })
    }

    /// Record bytes sent so far.
    ///
    /// Ignored when `total` is unknown (zero). Progress never moves
    /// backwards within one upload.
    pub fn on_progress(&mut self, loaded: u64, total: u64) {
        if total == 0 || !self.in_flight {
            return;
        }
        #[expect(clippy::cast_precision_loss)]
        let percent = (loaded as f64 * 100.0 / total as f64).round();
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = percent.clamp(0.0, 100.0) as u8;
        self.progress = self.progress.max(percent);
    }

    /// The upload finished: clear the draft and reset the form.
    pub fn on_success(&mut self) {
        self.draft = None;
        self.tags.clear();
        self.progress = 0;
        self.in_flight = false;
        self.error = None;
    }

    /// The upload failed: keep the draft so the user can retry.
    pub fn on_failure(&mut self, error: &ApiError) {
        self.error = Some(error.user_message(UPLOAD_FAILED));
        self.progress = 0;
        self.in_flight = false;
    }

    /// A drag entered the drop zone.
    pub const fn drag_enter(&mut self) {
        self.dragging = true;
    }

    /// A drag left the drop zone or was dropped.
    pub const fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Whether the drop zone should be highlighted.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }
}
