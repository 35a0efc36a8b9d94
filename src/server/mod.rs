//! HTTP Surface
//!
//! A small axum app serving the two season charts and an index page:
//!
//! - `GET /plot1.png?year=YYYY`: final point totals (bar)
//! - `GET /plot2.png?year=YYYY`: point accumulation (line)
//! - `GET /`: index page with a season selector
//!
//! A missing or unparsable `year` means the current UTC season; a year
//! outside the supported range is a 400; a season with no results is a 404.
//! Chart bytes are always served from the disk cache after [`cache`]'s
//! freshness rules decide whether the pair needs regeneration.

mod cache;

pub use cache::{DEFAULT_TTL, PlotPair, is_stale};

use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::provider::TimingSource;
use crate::render;
use crate::standings::aggregate_season;

/// Years the service will aggregate at all.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 2018..=2100;

/// Earliest season offered by the index page selector.
const FIRST_SELECTABLE_YEAR: i32 = 2020;

/// Shared state for axum handlers.
type SharedState = Arc<AppState>;

/// Everything the handlers need: the upstream source and the cache knobs.
pub struct AppState {
    source: Arc<dyn TimingSource>,
    cache_dir: PathBuf,
    ttl: Duration,
    /// Serializes regeneration so concurrent requests for a stale year do
    /// not aggregate and render the same season twice.
    refresh: tokio::sync::Mutex<()>,
}

impl AppState {
    pub fn new(source: Arc<dyn TimingSource>, cache_dir: PathBuf, ttl: Duration) -> Self {
        Self { source, cache_dir, ttl, refresh: tokio::sync::Mutex::new(()) }
    }

    /// Return the cached pair for `year`, regenerating it first if stale.
    async fn ensure_fresh(&self, year: i32) -> Result<PlotPair, Response> {
        let pair = PlotPair::for_year(&self.cache_dir, year);
        if !cache::is_stale(&pair, year, self.ttl) {
            return Ok(pair);
        }

        let _guard = self.refresh.lock().await;
        // Another request may have refreshed this year while we waited.
        if !cache::is_stale(&pair, year, self.ttl) {
            return Ok(pair);
        }

        let aggregate = aggregate_season(self.source.as_ref(), year).await;
        if aggregate.is_empty() {
            return Err(
                (StatusCode::NOT_FOUND, format!("no results for {year}")).into_response()
            );
        }

        let paths = pair.clone();
        let rendered = tokio::task::spawn_blocking(move || {
            render::render_pair(&aggregate, &paths.totals, &paths.progression)
        })
        .await;
        match rendered {
            Ok(Ok(())) => Ok(pair),
            Ok(Err(render_error)) => {
                error!(error = %render_error, year, "chart rendering failed");
                Err(StatusCode::INTERNAL_SERVER_ERROR.into_response())
            }
            Err(join_error) => {
                error!(error = %join_error, year, "chart rendering task failed");
                Err(StatusCode::INTERNAL_SERVER_ERROR.into_response())
            }
        }
    }
}

/// Build the axum router (separated for testing).
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/plot1.png", get(totals_plot))
        .route("/plot2.png", get(progression_plot))
        .with_state(state)
}

/// Serve the app until the shutdown token fires.
pub async fn serve(
    state: SharedState,
    bind: SocketAddr,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&state.cache_dir)
        .await
        .with_context(|| format!("failed to create cache dir {}", state.cache_dir.display()))?;

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(addr = %listener.local_addr()?, "standings server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("server task failed")?;
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct YearQuery {
    year: Option<String>,
}

#[derive(Clone, Copy, Debug)]
enum Chart {
    Totals,
    Progression,
}

async fn index() -> Html<String> {
    let current = current_year();
    let mut page = String::from(INDEX_HEAD);
    for year in (FIRST_SELECTABLE_YEAR..=current).rev() {
        page.push_str(&format!("<option value=\"{year}\">{year}</option>\n"));
    }
    page.push_str(INDEX_TAIL);
    Html(page)
}

async fn totals_plot(
    State(state): State<SharedState>,
    Query(query): Query<YearQuery>,
) -> Response {
    chart_response(&state, &query, Chart::Totals).await
}

async fn progression_plot(
    State(state): State<SharedState>,
    Query(query): Query<YearQuery>,
) -> Response {
    chart_response(&state, &query, Chart::Progression).await
}

async fn chart_response(state: &AppState, query: &YearQuery, chart: Chart) -> Response {
    let year = resolve_year(query);
    if !SUPPORTED_YEARS.contains(&year) {
        return (StatusCode::BAD_REQUEST, format!("year {year} is out of range")).into_response();
    }

    let pair = match state.ensure_fresh(year).await {
        Ok(pair) => pair,
        Err(response) => return response,
    };
    let path = match chart {
        Chart::Totals => &pair.totals,
        Chart::Progression => &pair.progression,
    };
    match tokio::fs::read(path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(read_error) => {
            error!(error = %read_error, path = %path.display(), "cached chart unreadable");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Missing or unparsable `year` means the current UTC season.
fn resolve_year(query: &YearQuery) -> i32 {
    query.year.as_deref().and_then(|value| value.trim().parse().ok()).unwrap_or_else(current_year)
}

fn current_year() -> i32 {
    Utc::now().year()
}

const INDEX_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Season Standings</title>
<style>
  body { background: #333333; color: #e6e6e6; font-family: sans-serif; margin: 2rem; }
  img { display: block; max-width: 100%; margin: 1rem 0; border: 1px solid #555555; }
  select { font-size: 1rem; padding: 0.2rem; }
</style>
</head>
<body>
<h1>Season standings</h1>
<label for="year">Season</label>
<select id="year" onchange="refresh()">
"#;

const INDEX_TAIL: &str = r#"</select>
<img id="plot1" alt="Final point totals">
<img id="plot2" alt="Points per session">
<script>
function refresh() {
  const year = document.getElementById('year').value;
  const stamp = Date.now();
  document.getElementById('plot1').src = '/plot1.png?year=' + year + '&t=' + stamp;
  document.getElementById('plot2').src = '/plot2.png?year=' + year + '&t=' + stamp;
}
window.addEventListener('DOMContentLoaded', refresh);
</script>
</body>
</html>
"#;
