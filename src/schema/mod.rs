//! # Wire Models
//!
//! Serde models for the payloads returned by the upstream timing API. The API
//! returns JSON arrays with snake_case fields, and every field can be absent
//! or null on any given record, so the models here are Option-heavy with
//! `#[serde(default)]` throughout. Validation and defaulting happen in the
//! standings layer, not here.
//!
//! Each model carries a `parse_list` helper that deserializes one response
//! body and maps failures into [`StandingsError::Decode`](crate::StandingsError).

// Submodules
pub mod driver;
pub mod position;
pub mod session;

// Re-exports
pub use driver::RosterEntry;
pub use position::PositionRecord;
pub use session::SessionMeta;

/// Neutral fallback color (hex RGB, no leading `#`) used whenever a roster
/// entry or resolved identity carries no usable team color.
pub const NEUTRAL_COLOR: &str = "777777";
