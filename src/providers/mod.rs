//! Timing source implementations
//!
//! The live source talks to the public OpenF1 API over HTTPS. Tests and
//! benches use the scripted source from `test_utils` instead.

pub mod openf1;

pub use openf1::{DEFAULT_BASE_URL, OpenF1Config, OpenF1Source};
