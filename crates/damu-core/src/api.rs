//! Asset API contract: endpoints, list query parameters, and errors.
//!
//! Describes requests without performing them. The browser client in
//! `damu-io` turns these descriptions into fetch/XHR calls.

use std::time::Duration;

use serde::Deserialize;

use crate::format::format_date_for_api;
use crate::types::{AssetId, FilterSet};

/// HTTP method of an [`Endpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl Method {
    /// The method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// An operation exposed by the asset API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `GET /assets` with optional filter parameters.
    List,
    /// `POST /assets/upload` with a multipart body.
    Upload,
    /// `GET /assets/{id}/download`.
    Download(&'a AssetId),
    /// `DELETE /assets/{id}`.
    Delete(&'a AssetId),
}

impl Endpoint<'_> {
    /// HTTP method for this endpoint.
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::List | Self::Download(_) => Method::Get,
            Self::Upload => Method::Post,
            Self::Delete(_) => Method::Delete,
        }
    }

    /// Path relative to the API base URL. Asset ids are percent-encoded.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::List => "/assets".to_owned(),
            Self::Upload => "/assets/upload".to_owned(),
            Self::Download(id) => format!("/assets/{}/download", urlencoding::encode(id.as_str())),
            Self::Delete(id) => format!("/assets/{}", urlencoding::encode(id.as_str())),
        }
    }

    /// Absolute URL under `base_url`, joined with exactly one `/`.
    #[must_use]
    pub fn url(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

/// Query parameters of a list request.
///
/// Only fields that actually filter are present, so an unfiltered
/// [`FilterSet`] produces no parameters at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// `type` parameter.
    pub file_type: Option<String>,
    /// `uploadDate` parameter, `YYYY-MM-DD`.
    pub upload_date: Option<String>,
    /// `tags` parameter.
    pub tags: Option<String>,
}

impl ListQuery {
    /// Build the query for a filter set.
    #[must_use]
    pub fn from_filters(filters: &FilterSet) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_owned());
        Self {
            file_type: non_empty(&filters.file_type),
            upload_date: filters.upload_date.map(format_date_for_api),
            tags: non_empty(&filters.tags),
        }
    }

    /// Parameters as `(name, value)` pairs in a stable order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("type", self.file_type.as_deref()),
            ("uploadDate", self.upload_date.as_deref()),
            ("tags", self.tags.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

/// Errors returned by asset API calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// No response arrived within the configured timeout.
    #[error("request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// The server answered with a non-success status.
    #[error("server returned status {status}{}", status_detail(.message.as_deref()))]
    Status {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the JSON response body, if any.
        message: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a [`ApiError::Status`] from a status code and raw response body.
    #[must_use]
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        Self::Status {
            status,
            message: parse_error_body(body),
        }
    }

    /// The message supplied by the server, if it sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Text to show the user: the server's message, or `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}

fn status_detail(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Extract `error` from a `{ "error": "..." }` response body.
#[must_use]
pub fn parse_error_body(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|e| !e.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn endpoint_methods() {
        let id = AssetId::new("x");
        assert_eq!(Endpoint::List.method(), Method::Get);
        assert_eq!(Endpoint::Upload.method(), Method::Post);
        assert_eq!(Endpoint::Download(&id).method(), Method::Get);
        assert_eq!(Endpoint::Delete(&id).method().as_str(), "DELETE");
    }

    #[test]
    fn endpoint_urls_join_with_single_slash() {
        let id = AssetId::new("65f1");
        assert_eq!(
            Endpoint::List.url("http://localhost:8080/api"),
            "http://localhost:8080/api/assets"
        );
        assert_eq!(
            Endpoint::Upload.url("http://localhost:8080/api/"),
            "http://localhost:8080/api/assets/upload"
        );
        assert_eq!(
            Endpoint::Download(&id).url("https://h/api"),
            "https://h/api/assets/65f1/download"
        );
        assert_eq!(Endpoint::Delete(&id).url("https://h"), "https://h/assets/65f1");
    }

    #[test]
    fn asset_ids_are_percent_encoded() {
        let id = AssetId::new("a b/c");
        assert_eq!(Endpoint::Delete(&id).path(), "/assets/a%20b%2Fc");
    }

    #[test]
    fn unfiltered_query_has_no_pairs() {
        let query = ListQuery::from_filters(&FilterSet::default());
        assert_eq!(query, ListQuery::default());
        assert!(query.pairs().is_empty());
    }

    #[test]
    fn query_serializes_only_set_fields() {
        let filters = FilterSet {
            file_type: "image".into(),
            upload_date: NaiveDate::from_ymd_opt(2024, 2, 29),
            tags: String::new(),
        };
        let query = ListQuery::from_filters(&filters);
        assert_eq!(
            query.pairs(),
            vec![("type", "image"), ("uploadDate", "2024-02-29")]
        );
    }

    #[test]
    fn query_passes_tags_verbatim() {
        let filters = FilterSet {
            tags: "report, finance".into(),
            ..FilterSet::default()
        };
        assert_eq!(
            ListQuery::from_filters(&filters).pairs(),
            vec![("tags", "report, finance")]
        );
    }

    #[test]
    fn parse_error_body_reads_error_field() {
        assert_eq!(
            parse_error_body(br#"{"error":"File too large"}"#).as_deref(),
            Some("File too large")
        );
        assert_eq!(parse_error_body(b"<html>502</html>"), None);
        assert_eq!(parse_error_body(br#"{"message":"nope"}"#), None);
        assert_eq!(parse_error_body(br#"{"error":""}"#), None);
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::from_status(400, br#"{"error":"Invalid file type"}"#);
        assert_eq!(err.user_message("fallback"), "Invalid file type");
        assert_eq!(
            err.to_string(),
            "server returned status 400: Invalid file type"
        );

        let err = ApiError::from_status(500, b"");
        assert_eq!(err.user_message("fallback"), "fallback");
        assert_eq!(err.to_string(), "server returned status 500");

        let err = ApiError::Timeout(Duration::from_secs(30));
        assert_eq!(err.user_message("fallback"), "fallback");
        assert_eq!(err.to_string(), "request timed out after 30000 ms");
    }
}
