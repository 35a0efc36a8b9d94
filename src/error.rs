//! Error types for standings aggregation and serving.
//!
//! All errors implement the `std::error::Error` trait and carry structured
//! context. The aggregation pipeline itself recovers from upstream failures
//! at the call site, so most variants here surface only from the HTTP client,
//! the renderer, and the cache layer.
//!
//! ## Error Categories
//!
//! - **Upstream Errors**: transport failures or non-success statuses from the
//!   timing API
//! - **Decode Errors**: malformed JSON payloads
//! - **Render Errors**: chart drawing failures
//! - **Cache Errors**: problems reading or writing cached images
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use grandstand::StandingsError;
//!
//! let error = StandingsError::upstream("timing API unreachable");
//! if error.is_retryable() {
//!     println!("Can retry this request");
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for standings operations.
pub type Result<T, E = StandingsError> = std::result::Result<T, E>;

/// Main error type for standings operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StandingsError {
    #[error("Upstream request failed: {context}")]
    Upstream {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Upstream returned {status} for {context}")]
    UpstreamStatus { context: String, status: reqwest::StatusCode },

    #[error("Decode error in {context}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Render error in {context}: {details}")]
    Render { context: String, details: String },

    #[error("Cache file error: {path}")]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Year {year} is outside the supported range")]
    YearOutOfRange { year: i32 },
}

impl StandingsError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            StandingsError::Upstream { .. } => true,
            StandingsError::UpstreamStatus { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            StandingsError::Decode { .. } => false,
            StandingsError::Render { .. } => false,
            StandingsError::Cache { .. } => false,
            StandingsError::YearOutOfRange { .. } => false,
        }
    }

    /// Helper constructor for upstream transport errors.
    pub fn upstream(context: impl Into<String>) -> Self {
        StandingsError::Upstream { context: context.into(), source: None }
    }

    /// Helper constructor for upstream transport errors with a source.
    pub fn upstream_with_source(
        context: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        StandingsError::Upstream { context: context.into(), source: Some(source) }
    }

    /// Helper constructor for non-success upstream statuses.
    pub fn upstream_status(context: impl Into<String>, status: reqwest::StatusCode) -> Self {
        StandingsError::UpstreamStatus { context: context.into(), status }
    }

    /// Helper constructor for payload decode errors.
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        StandingsError::Decode { context: context.into(), source }
    }

    /// Helper constructor for chart rendering errors.
    pub fn render_failed(context: impl Into<String>, details: impl Into<String>) -> Self {
        StandingsError::Render { context: context.into(), details: details.into() }
    }

    /// Helper constructor for cache I/O errors with path context.
    pub fn cache_error(path: PathBuf, source: std::io::Error) -> Self {
        StandingsError::Cache { path, source }
    }
}

impl From<std::io::Error> for StandingsError {
    fn from(err: std::io::Error) -> Self {
        StandingsError::Cache { path: PathBuf::from("<unknown>"), source: err }
    }
}

impl From<reqwest::Error> for StandingsError {
    fn from(err: reqwest::Error) -> Self {
        let context = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else {
            err.to_string()
        };
        StandingsError::Upstream { context, source: Some(Box::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn error_messages_contain_their_context(
                context in ".*",
                details in ".*",
                year in -10000i32..10000i32
            ) {
                let upstream = StandingsError::upstream(context.clone());
                prop_assert!(upstream.to_string().contains(&context));

                let render = StandingsError::render_failed(context.clone(), details.clone());
                let msg = render.to_string();
                prop_assert!(msg.contains(&context));
                prop_assert!(msg.contains(&details));

                let range = StandingsError::YearOutOfRange { year };
                prop_assert!(range.to_string().contains(&year.to_string()));
            }

            #[test]
            fn io_conversion_preserves_source_message(reason in ".*") {
                let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, reason.clone());
                let converted: StandingsError = io_err.into();
                match converted {
                    StandingsError::Cache { source, .. } => {
                        prop_assert_eq!(source.to_string(), reason);
                    }
                    _ => prop_assert!(false, "Expected Cache error from io::Error conversion"),
                }
            }

            #[test]
            fn source_chaining_preserves_base_message(base in ".*") {
                let io_err = std::io::Error::other(base.clone());
                let top = StandingsError::upstream_with_source("fetch failed", Box::new(io_err));

                let mut found = false;
                let mut current = std::error::Error::source(&top);
                while let Some(source) = current {
                    if source.to_string().contains(&base) {
                        found = true;
                    }
                    current = std::error::Error::source(source);
                }
                prop_assert!(found, "Base message '{}' not found in chain", base);
            }
        }
    }

    #[test]
    fn error_constructors_validation() {
        let cache_error = StandingsError::cache_error(
            PathBuf::from("/test/plot1_2024.png"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "test"),
        );
        assert!(matches!(cache_error, StandingsError::Cache { .. }));

        let upstream_error = StandingsError::upstream("test");
        assert!(matches!(upstream_error, StandingsError::Upstream { .. }));

        let status_error =
            StandingsError::upstream_status("sessions", reqwest::StatusCode::BAD_GATEWAY);
        assert!(matches!(status_error, StandingsError::UpstreamStatus { .. }));
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<StandingsError>();

        let error = StandingsError::upstream("test");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn retryability_classification() {
        assert!(StandingsError::upstream("unreachable").is_retryable());
        assert!(
            StandingsError::upstream_status("positions", reqwest::StatusCode::BAD_GATEWAY)
                .is_retryable()
        );
        assert!(
            StandingsError::upstream_status("positions", reqwest::StatusCode::TOO_MANY_REQUESTS)
                .is_retryable()
        );
        assert!(
            !StandingsError::upstream_status("positions", reqwest::StatusCode::NOT_FOUND)
                .is_retryable()
        );
        assert!(!StandingsError::render_failed("bar chart", "backend").is_retryable());
        assert!(!StandingsError::YearOutOfRange { year: 1899 }.is_retryable());
    }
}
