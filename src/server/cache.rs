//! On-disk chart cache and its freshness rules.
//!
//! Rendered images are the only thing this service persists. The pair for a
//! year lives as `plot1_{year}.png` / `plot2_{year}.png` under one cache
//! directory and is always regenerated together, so freshness is judged on
//! the pair as a whole.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{Datelike, Utc};

/// Default time-to-live for current-season images.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Cache locations of the rendered pair for one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotPair {
    /// Bar chart of final point totals.
    pub totals: PathBuf,
    /// Line chart of point accumulation.
    pub progression: PathBuf,
}

impl PlotPair {
    pub fn for_year(cache_dir: &Path, year: i32) -> Self {
        Self {
            totals: cache_dir.join(format!("plot1_{year}.png")),
            progression: cache_dir.join(format!("plot2_{year}.png")),
        }
    }
}

/// Whether the cached pair for `year` needs regeneration.
///
/// Either file missing means stale. A pair for the current (UTC) season goes
/// stale once its older file exceeds the TTL; completed seasons never change,
/// so their images never expire.
pub fn is_stale(pair: &PlotPair, year: i32, ttl: Duration) -> bool {
    let (Some(totals_age), Some(progression_age)) =
        (file_age(&pair.totals), file_age(&pair.progression))
    else {
        return true;
    };
    if year != Utc::now().year() {
        return false;
    }
    totals_age.max(progression_age) > ttl
}

fn file_age(path: &Path) -> Option<Duration> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    // A timestamp slightly in the future (clock skew) counts as brand new.
    Some(SystemTime::now().duration_since(modified).unwrap_or_default())
}
