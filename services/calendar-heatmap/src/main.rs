//! Calendar heatmap CLI.
//!
//! Fetches NOAA daily data for the requested query, renders the calendar and
//! writes it as PNG.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use calendar_heatmap::{run_query, Cli, RenderContext};
use ingestion::{FetchCache, NoaaClient, SeriesFetcher};
use renderer::LabelFont;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.common.log_level, cli.common.log_json)?;

    let query = cli.to_query();
    info!(?query, "Starting calendar heatmap");

    let styles = cli
        .common
        .load_styles()
        .context("Failed to load style configuration")?;
    let layout = cli.common.layout();
    let font = LabelFont::discover(cli.common.font.as_deref()).context("Failed to load font")?;

    let client = NoaaClient::new(cli.common.noaa_config())?;
    let cache = Arc::new(FetchCache::new(cli.common.cache_capacity));
    let fetcher = SeriesFetcher::new(cache, cli.common.fetch_timeout());

    let ctx = RenderContext {
        styles: &styles,
        layout: &layout,
        font: font.as_ref(),
    };

    let output = match run_query(&query, &client, &fetcher, ctx).await {
        Ok(output) => output,
        Err(e) => {
            error!(error = %e, "Query failed");
            eprintln!("{}", e.user_message());
            return Ok(if e.is_data_unavailable() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            });
        }
    };

    let png = output.image.to_png()?;
    tokio::fs::write(&cli.common.output, &png)
        .await
        .with_context(|| format!("Failed to write {}", cli.common.output.display()))?;

    if let Some(path) = &cli.common.cells_json {
        let json = serde_json::to_vec_pretty(&output.cells)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let stats = fetcher.cache().stats().await;
    info!(
        title = %output.title.replace('\n', " / "),
        path = %cli.common.output.display(),
        bytes = png.len(),
        width = output.image.width(),
        height = output.image.height(),
        cache_hits = stats.hits,
        cache_misses = stats.misses,
        "Wrote heatmap"
    );

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}
