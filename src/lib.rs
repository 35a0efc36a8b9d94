//! Season standings aggregation for public motorsport timing data.
//!
//! Grandstand retrieves a racing season's sessions from an OpenF1-compatible
//! API, folds raw timestamped position records into per-driver standings
//! under the main and sprint scoring tables, renders the season as two
//! charts, and serves them over HTTP with on-disk image caching.
//!
//! # Features
//!
//! - **Deterministic aggregation**: stable sorts and explicit tie-breaks
//!   make the standings a pure function of the upstream data
//! - **Graceful degradation**: an upstream failure costs one call's worth of
//!   data, never the season
//! - **Pluggable sources**: the fetch seam is an async trait, so the whole
//!   pipeline runs against scripted fixtures in tests
//! - **Cached charts**: both images regenerate together from one
//!   aggregation pass; only the current season's images expire
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use grandstand::providers::OpenF1Source;
//! use grandstand::standings::{aggregate_season, standings};
//!
//! #[tokio::main]
//! async fn main() -> grandstand::Result<()> {
//!     let source = OpenF1Source::public_api()?;
//!     let season = aggregate_season(&source, 2024).await;
//!     for row in standings(&season) {
//!         println!("{:>3}  {:<12} {:>4}", row.number, row.name, row.points);
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;

// Upstream data access
pub mod provider;
pub mod providers;
pub mod schema;

// Aggregation and presentation
pub mod standings;

// Output surfaces
pub mod render;
pub mod server;

// Core exports
pub use error::*;

// Main API exports
pub use provider::TimingSource;
pub use providers::{OpenF1Config, OpenF1Source};
pub use standings::{SeasonAggregate, aggregate_season};
