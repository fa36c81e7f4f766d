//! MIME-type driven choice of preview rendering and card icon.

/// Shown in the preview modal for types with no viewer.
pub const PREVIEW_UNAVAILABLE: &str = "Preview not available for this file type.";

/// How the preview modal renders an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    /// Native video player (`video/*`).
    Video,
    /// Embedded document viewer (`application/pdf`).
    Pdf,
    /// Image view (`image/*`).
    Image,
    /// No viewer; show [`PREVIEW_UNAVAILABLE`].
    Unsupported,
}

impl PreviewKind {
    /// Classify a MIME type. Matching is case-sensitive.
    #[must_use]
    pub fn classify(mime_type: &str) -> Self {
        if mime_type.starts_with("video/") {
            Self::Video
        } else if mime_type == "application/pdf" {
            Self::Pdf
        } else if mime_type.starts_with("image/") {
            Self::Image
        } else {
            Self::Unsupported
        }
    }

    /// Whether the asset card should offer a Preview button.
    #[must_use]
    pub const fn is_available(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Placeholder icon for a card without an image thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetIcon {
    /// `image/*`
    Photo,
    /// `video/*`
    Video,
    /// Everything else.
    Document,
}

impl AssetIcon {
    /// Pick the icon for a MIME type.
    #[must_use]
    pub fn classify(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            Self::Photo
        } else if mime_type.starts_with("video/") {
            Self::Video
        } else {
            Self::Document
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_each_rendering() {
        assert_eq!(PreviewKind::classify("video/mp4"), PreviewKind::Video);
        assert_eq!(PreviewKind::classify("video/webm"), PreviewKind::Video);
        assert_eq!(PreviewKind::classify("application/pdf"), PreviewKind::Pdf);
        assert_eq!(PreviewKind::classify("image/png"), PreviewKind::Image);
        assert_eq!(PreviewKind::classify("image/gif"), PreviewKind::Image);
        assert_eq!(
            PreviewKind::classify("application/zip"),
            PreviewKind::Unsupported
        );
        assert_eq!(PreviewKind::classify(""), PreviewKind::Unsupported);
    }

    #[test]
    fn pdf_match_is_exact() {
        assert_eq!(
            PreviewKind::classify("application/pdf+x"),
            PreviewKind::Unsupported
        );
    }

    #[test]
    fn prefix_requires_slash() {
        assert_eq!(PreviewKind::classify("imagery"), PreviewKind::Unsupported);
        assert_eq!(PreviewKind::classify("IMAGE/PNG"), PreviewKind::Unsupported);
    }

    #[test]
    fn availability() {
        assert!(PreviewKind::Video.is_available());
        assert!(PreviewKind::Pdf.is_available());
        assert!(PreviewKind::Image.is_available());
        assert!(!PreviewKind::Unsupported.is_available());
    }

    #[test]
    fn icons() {
        assert_eq!(AssetIcon::classify("image/jpeg"), AssetIcon::Photo);
        assert_eq!(AssetIcon::classify("video/mp4"), AssetIcon::Video);
        assert_eq!(AssetIcon::classify("application/pdf"), AssetIcon::Document);
    }
}
