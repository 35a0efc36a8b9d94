//! Command line entry point: serve the charts, print a season's standings,
//! or render both images without serving.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use grandstand::providers::{DEFAULT_BASE_URL, OpenF1Config, OpenF1Source};
use grandstand::render;
use grandstand::server::{self, AppState, PlotPair};
use grandstand::standings::{aggregate_season, summary};

#[derive(Parser, Debug)]
#[command(name = "grandstand")]
#[command(about = "Season standings aggregation and chart server", version)]
struct Cli {
    /// Upstream timing API base URL
    #[arg(long, env = "GRANDSTAND_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "GRANDSTAND_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the standings charts over HTTP
    Serve(ServeArgs),
    /// Print the season summary table to stdout
    Standings(StandingsArgs),
    /// Render both charts to a directory without serving
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Bind address
    #[arg(long, env = "GRANDSTAND_BIND", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Directory for cached chart images
    #[arg(long, env = "GRANDSTAND_CACHE_DIR", default_value = "static")]
    cache_dir: PathBuf,

    /// Seconds before current-season images go stale
    #[arg(long, env = "GRANDSTAND_CACHE_TTL_SECS", default_value_t = 3600)]
    cache_ttl_secs: u64,
}

#[derive(Parser, Debug)]
struct StandingsArgs {
    /// Season to aggregate (defaults to the current UTC year)
    #[arg(long)]
    year: Option<i32>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Season to render (defaults to the current UTC year)
    #[arg(long)]
    year: Option<i32>,

    /// Output directory for the two images
    #[arg(long, default_value = "static")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = OpenF1Config::default()
        .with_base_url(cli.base_url)
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let source = OpenF1Source::new(config).context("failed to build the timing API client")?;

    match cli.command {
        Command::Serve(args) => run_serve(source, args).await,
        Command::Standings(args) => run_standings(source, args).await,
        Command::Render(args) => run_render(source, args).await,
    }
}

async fn run_serve(source: OpenF1Source, args: ServeArgs) -> Result<()> {
    let state = Arc::new(AppState::new(
        Arc::new(source),
        args.cache_dir,
        Duration::from_secs(args.cache_ttl_secs),
    ));

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            signal.cancel();
        }
    });

    server::serve(state, args.bind, shutdown).await
}

async fn run_standings(source: OpenF1Source, args: StandingsArgs) -> Result<()> {
    let year = args.year.unwrap_or_else(|| Utc::now().year());
    let season = aggregate_season(&source, year).await;
    if season.is_empty() {
        println!("no results for {year}");
        return Ok(());
    }

    println!("{year} standings after {} sessions", season.sessions_processed());
    println!(
        "{:>4}  {:>3}  {:<12} {:<28} {:>6}  {:>5}  {:>7}",
        "rank", "no", "driver", "team", "points", "races", "avg pos"
    );
    for row in summary(&season) {
        let average = row
            .average_position
            .map(|position| format!("{position:.2}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>4}  {:>3}  {:<12} {:<28} {:>6}  {:>5}  {:>7}",
            row.rank, row.number, row.name, row.team, row.points, row.races_completed, average
        );
    }
    Ok(())
}

async fn run_render(source: OpenF1Source, args: RenderArgs) -> Result<()> {
    let year = args.year.unwrap_or_else(|| Utc::now().year());
    let season = aggregate_season(&source, year).await;
    if season.is_empty() {
        anyhow::bail!("no results for {year}");
    }

    tokio::fs::create_dir_all(&args.out_dir)
        .await
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;
    let pair = PlotPair::for_year(&args.out_dir, year);
    render::render_pair(&season, &pair.totals, &pair.progression)?;
    info!(
        totals = %pair.totals.display(),
        progression = %pair.progression.display(),
        "charts written"
    );
    Ok(())
}
