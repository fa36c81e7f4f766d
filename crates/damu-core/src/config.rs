//! Client configuration.
//!
//! Values are supplied by the host environment as strings (the web app
//! bakes them in at build time). [`ClientConfig::from_vars`] parses them
//! and falls back to the defaults for anything missing or malformed.

use std::time::Duration;

use tracing::{info, warn};

/// Environment variable holding the API base URL.
pub const API_URL_VAR: &str = "DAMU_API_URL";
/// Environment variable holding the comma-separated upload MIME allow-list.
pub const SUPPORTED_FILE_TYPES_VAR: &str = "DAMU_SUPPORTED_FILE_TYPES";
/// Environment variable holding the maximum upload size in bytes.
pub const MAX_FILE_SIZE_VAR: &str = "DAMU_MAX_FILE_SIZE";
/// Environment variable holding the per-request timeout in milliseconds.
pub const REQUEST_TIMEOUT_MS_VAR: &str = "DAMU_REQUEST_TIMEOUT_MS";

/// Settings shared by the API client and the upload controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are appended to.
    pub api_url: String,
    /// MIME types accepted for upload.
    pub supported_file_types: Vec<String>,
    /// Largest accepted upload in bytes.
    pub max_file_size: u64,
    /// Timeout applied to every API request.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Default API base URL.
    pub const DEFAULT_API_URL: &'static str = "http://localhost:8080/api";

    /// Default upload allow-list: JPEG, PNG, GIF, PDF, MP4.
    pub const DEFAULT_SUPPORTED_FILE_TYPES: [&'static str; 5] = [
        "image/jpeg",
        "image/png",
        "image/gif",
        "application/pdf",
        "video/mp4",
    ];

    /// Default maximum upload size (10 MiB).
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// Default request timeout (30 seconds).
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Build a configuration from a variable lookup.
    ///
    /// `lookup` is called with each of the `*_VAR` names. Missing values
    /// use the defaults. Numeric values that fail to parse, or are zero,
    /// also use the defaults and log a warning.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = lookup(API_URL_VAR)
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| {
                info!("{API_URL_VAR} not set, using default: {}", defaults.api_url);
                defaults.api_url.clone()
            });

        let supported_file_types = lookup(SUPPORTED_FILE_TYPES_VAR)
            .map(|raw| parse_type_list(&raw))
            .filter(|types| !types.is_empty())
            .unwrap_or(defaults.supported_file_types);

        let max_file_size = parse_positive(&lookup, MAX_FILE_SIZE_VAR)
            .unwrap_or(defaults.max_file_size);

        let request_timeout = parse_positive(&lookup, REQUEST_TIMEOUT_MS_VAR)
            .map_or(defaults.request_timeout, Duration::from_millis);

        Self {
            api_url,
            supported_file_types,
            max_file_size,
            request_timeout,
        }
    }

    /// Whether `mime_type` is on the upload allow-list.
    #[must_use]
    pub fn accepts(&self, mime_type: &str) -> bool {
        self.supported_file_types.iter().any(|t| t == mime_type)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_owned(),
            supported_file_types: Self::DEFAULT_SUPPORTED_FILE_TYPES
                .iter()
                .map(|&t| t.to_owned())
                .collect(),
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

fn parse_type_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            warn!("{key} is zero, using default");
            None
        }
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Invalid {key} value {raw:?}: {e}, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let pairs = pairs.to_vec();
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(
            config.supported_file_types,
            [
                "image/jpeg",
                "image/png",
                "image/gif",
                "application/pdf",
                "video/mp4"
            ]
        );
        assert_eq!(config.max_file_size, 10_485_760);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(ClientConfig::from_vars(|_| None), ClientConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = ClientConfig::from_vars(vars(&[
            (API_URL_VAR, "https://assets.example.com/api"),
            (SUPPORTED_FILE_TYPES_VAR, "image/webp, video/webm"),
            (MAX_FILE_SIZE_VAR, "2048"),
            (REQUEST_TIMEOUT_MS_VAR, "1500"),
        ]));
        assert_eq!(config.api_url, "https://assets.example.com/api");
        assert_eq!(config.supported_file_types, ["image/webp", "video/webm"]);
        assert_eq!(config.max_file_size, 2048);
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn malformed_numbers_fall_back() {
        let config = ClientConfig::from_vars(vars(&[
            (MAX_FILE_SIZE_VAR, "ten megabytes"),
            (REQUEST_TIMEOUT_MS_VAR, "0"),
        ]));
        assert_eq!(config.max_file_size, ClientConfig::DEFAULT_MAX_FILE_SIZE);
        assert_eq!(
            config.request_timeout,
            ClientConfig::DEFAULT_REQUEST_TIMEOUT
        );
    }

    #[test]
    fn blank_type_list_falls_back() {
        let config = ClientConfig::from_vars(vars(&[(SUPPORTED_FILE_TYPES_VAR, " , ,")]));
        assert_eq!(config.supported_file_types.len(), 5);
    }

    #[test]
    fn accepts_exact_mime_types_only() {
        let config = ClientConfig::default();
        assert!(config.accepts("image/png"));
        assert!(!config.accepts("image/webp"));
        assert!(!config.accepts("image"));
    }
}
