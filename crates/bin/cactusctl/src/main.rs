//! # cactusctl — cactus-of-things command-line client
//!
//! Composition root that wires the HTTP adapter into the reading fetcher and
//! prints readings in the terminal.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Initialise logging
//! - Construct the reqwest transport (adapter) and inject it into the
//!   `ReadingFetcher` use-case through the transport port
//! - Resolve time scales and render the fetched readings
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod cli;
mod config;
mod output;
mod watch;

use std::time::Duration;

use anyhow::Context;
use cactus_adapter_http_reqwest::HttpTransport;
use cactus_app::error::FetchError;
use cactus_app::services::reading_fetcher::ReadingFetcher;
use cactus_domain::reading::NormalizedReading;
use cactus_domain::scale::{ScaleResolver, TimeScale};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::output::{SeriesDocument, render_current, render_scales, render_series};

/// Everything a subcommand needs, resolved from config and CLI flags.
struct Session {
    fetcher: ReadingFetcher<HttpTransport>,
    resolver: ScaleResolver,
    default_scale: TimeScale,
    resolution: u32,
    timeout_ms: u64,
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(timeout_ms) = cli.timeout_ms {
        config.backend.request_timeout_ms = config.backend.request_timeout_ms.max(timeout_ms);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    if let Command::Scales = cli.command {
        print!("{}", render_scales());
        return Ok(());
    }

    let transport = HttpTransport::from_config(&config.backend)?;
    let ctx = Session {
        fetcher: ReadingFetcher::new(transport),
        resolver: ScaleResolver::with_offset(config.display_offset()),
        default_scale: config.display.default_scale,
        resolution: config.backend.resolution,
        timeout_ms: cli.timeout_ms.unwrap_or(config.backend.timeout_ms),
        json: cli.json,
    };
    tracing::debug!(endpoint = %config.backend.endpoint, timeout_ms = ctx.timeout_ms, "client ready");

    match cli.command {
        Command::Range { scale, resolution } => {
            range(
                &ctx,
                scale.unwrap_or(ctx.default_scale),
                resolution.unwrap_or(ctx.resolution),
            )
            .await
        }
        Command::Current => current(&ctx).await,
        Command::Watch { scale, every } => {
            watch(&ctx, scale.unwrap_or(ctx.default_scale), Duration::from_secs(every)).await
        }
        Command::Scales => Ok(()),
    }
}

async fn range(ctx: &Session, scale: TimeScale, resolution: u32) -> anyhow::Result<()> {
    let readings = ctx
        .fetcher
        .fetch_scale(&ctx.resolver, scale, cactus_domain::time::now(), resolution, ctx.timeout_ms)
        .await
        .with_context(|| format!("fetching {}", scale.label().to_lowercase()))?;
    print_series(ctx, scale, &readings)
}

async fn current(ctx: &Session) -> anyhow::Result<()> {
    let reading = ctx
        .fetcher
        .fetch_current(ctx.timeout_ms)
        .await
        .context("fetching current reading")?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&reading)?);
    } else {
        print!("{}", render_current(&ctx.resolver, &reading));
    }
    Ok(())
}

/// Refresh `scale` every `every` until Ctrl-C.
///
/// A slow fetch can complete after a newer one: results older than the last
/// printed one are dropped.
async fn watch(ctx: &Session, scale: TimeScale, every: Duration) -> anyhow::Result<()> {
    let fetch = || {
        let fetcher = ctx.fetcher.clone();
        let resolver = ctx.resolver;
        let (resolution, timeout_ms) = (ctx.resolution, ctx.timeout_ms);
        async move {
            let now = cactus_domain::time::now();
            fetcher
                .fetch_scale(&resolver, scale, now, resolution, timeout_ms)
                .await
        }
    };
    let apply = |outcome: Result<Vec<NormalizedReading>, FetchError>| match outcome {
        Ok(readings) => print_series(ctx, scale, &readings),
        Err(err) => {
            tracing::warn!(error = %err, "refresh failed");
            Ok(())
        }
    };
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    watch::refresh_loop(every, fetch, apply, shutdown).await
}

fn print_series(ctx: &Session, scale: TimeScale, readings: &[NormalizedReading]) -> anyhow::Result<()> {
    if ctx.json {
        let doc = SeriesDocument::new(&ctx.resolver, scale, readings);
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", render_series(&ctx.resolver, scale, readings));
    }
    Ok(())
}
