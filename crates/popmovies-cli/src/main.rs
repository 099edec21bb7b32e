//! popmovies - discover popular movies from TMDB.

/// Application configuration (TOML).
mod config;
/// Text grid display.
mod display;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use crate::display::MovieGrid;
use popmovies_api::task::{DiscoverSession, FetchState};
use popmovies_api::tmdb::{MovieCatalogApi, TmdbClient};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show the first page of the TMDB discover listing.
    Discover(DiscoverArgs),
    /// Show a single movie by TMDB ID.
    Movie(MovieArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `discover` subcommand.
#[derive(clap::Args)]
struct DiscoverArgs {
    /// Sort order (e.g. "popularity.desc", "vote_average.desc").
    /// Falls back to the configured default sort order if omitted.
    #[arg(long)]
    sort_by: Option<String>,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the resolved configuration (API key masked).
    Show,
    /// Write a default config file.
    Init,
}

/// Loads the config file and applies environment overrides.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
}

/// Builds a `TmdbClient` from the resolved config.
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let mut builder = TmdbClient::builder()
        .api_key(config.api_key()?)
        .default_sort_order(config.tmdb.default_sort_order.as_str())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(ref base_url) = config.tmdb.base_url {
        let url = base_url
            .parse::<Url>()
            .with_context(|| format!("invalid TMDB base URL: {base_url}"))?;
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build TMDB client")
}

/// Runs the `discover` subcommand.
///
/// A failed fetch is reported the same way as an empty listing.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
#[instrument(skip_all)]
async fn run_discover(args: &DiscoverArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = Arc::new(build_tmdb_client(&config)?);

    let sort_order = args
        .sort_by
        .clone()
        .unwrap_or_else(|| config.tmdb.default_sort_order.clone());

    let mut grid = MovieGrid::new();
    let mut session = DiscoverSession::new();
    session.start(client, Some(sort_order));
    let state = session.finish(&mut grid).await;
    tracing::debug!(?state, "discover finished");

    match state {
        FetchState::Delivered(_) if !grid.is_empty() => {
            for row in grid.render() {
                tracing::info!("{row}");
            }
            tracing::info!(
                "Total: {} movies ({} unavailable)",
                grid.available(),
                grid.len().saturating_sub(grid.available())
            );
        }
        FetchState::Idle
        | FetchState::Fetching
        | FetchState::Delivered(_)
        | FetchState::DeliveredEmpty => {
            tracing::info!("No movies available");
        }
    }

    Ok(())
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_movie(args: &MovieArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let movie = client
        .movie_details(args.id)
        .await
        .context("TMDB movie request failed")?;

    tracing::info!("ID: {}", movie.id);
    tracing::info!("Title: {}", movie.title);
    tracing::info!(
        "Original Title: {}",
        movie.original_title.as_deref().unwrap_or("-")
    );
    tracing::info!(
        "Release Date: {}",
        movie.release_date.as_deref().unwrap_or("-")
    );
    tracing::info!(
        "Rating: {:.1} ({} votes)",
        movie.vote_average,
        movie.vote_count
    );
    tracing::info!("Poster: {}", movie.poster_path.as_deref().unwrap_or("-"));
    tracing::info!("Overview: {}", movie.overview.as_deref().unwrap_or("-"));

    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or serialized.
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let mut config = load_config(dir)?;
    if config.tmdb.api_key.is_some() {
        config.tmdb.api_key = Some(String::from("********"));
    }
    let content = toml::to_string_pretty(&config).context("failed to serialize config")?;
    for line in content.lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the config file already exists or cannot be written.
fn run_config_init(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    if config_path.exists() {
        bail!("config file already exists: {}", config_path.display());
    }
    AppConfig::default().save(&config_path)?;
    tracing::info!("Wrote {}", config_path.display());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Discover(args) => run_discover(&args, cli.dir.as_ref()).await,
        Commands::Movie(args) => run_movie(&args, cli.dir.as_ref()).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => run_config_show(cli.dir.as_ref()),
            ConfigSubcommands::Init => run_config_init(cli.dir.as_ref()),
        },
    }
}
