//! cinedeck - movie and TV catalog browser CLI.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use crate::tui::run_search;
use crate::tui::state::SearchViewState;
use cinedeck_api::provider::{MediaKind, MediaSummary, MetadataProvider, TmdbProvider};
use cinedeck_api::tmdb::{TmdbClient, all_genre_names};
use cinedeck_core::browse::{BrowseFilter, SortOrder};
use cinedeck_core::playback::{EmbedLanguage, PlayTarget};
use cinedeck_core::query::{PageSize, SearchQuery, Tab};

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "cinedeck", about, version)]
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
    /// Search movies and TV shows interactively.
    Search(SearchArgs),
    /// List trending titles of the day.
    Trending(KindArgs),
    /// List upcoming movie releases.
    Upcoming,
    /// Browse the popular listing with filters.
    Browse(BrowseArgs),
    /// Show details of a title, including episodes for TV.
    Details(DetailsArgs),
    /// Open the embed player for a title.
    Play(PlayArgs),
    /// List every known genre name.
    Genres,
    /// Inspect the configuration.
    Config(ConfigCommand),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Initial search text.
    #[arg(long, short)]
    query: Option<String>,
    /// Initial tab: all, movies or tv.
    #[arg(long)]
    tab: Option<Tab>,
    /// Initial movie page.
    #[arg(long)]
    movie_page: Option<u32>,
    /// Initial TV page.
    #[arg(long)]
    tv_page: Option<u32>,
    /// Results per page: 20, 40 or 60 (default: from config).
    #[arg(long)]
    page_size: Option<PageSize>,
    /// Restore a previous session from its deep link (e.g. "/search?q=dune&tab=movies").
    #[arg(long)]
    link: Option<String>,
}

/// Arguments for subcommands that only need a media kind.
#[derive(clap::Args)]
struct KindArgs {
    /// movie or tv.
    #[arg(long, default_value = "movie")]
    kind: MediaKind,
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// movie or tv.
    #[arg(long, default_value = "movie")]
    kind: MediaKind,
    /// Popular listing page.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Keep titles containing this text.
    #[arg(long)]
    search: Option<String>,
    /// Keep titles with this genre ("all" keeps everything).
    #[arg(long)]
    genre: Option<String>,
    /// Keep titles released this year.
    #[arg(long)]
    year: Option<i32>,
    /// Order: newest, oldest, rating or title.
    #[arg(long, default_value = "newest")]
    sort: SortOrder,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// movie or tv.
    #[arg(long, required = true)]
    kind: MediaKind,
    /// TMDB ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `play` subcommand.
#[derive(clap::Args)]
struct PlayArgs {
    /// movie or tv.
    #[arg(long, required = true)]
    kind: MediaKind,
    /// TMDB ID.
    #[arg(long, required = true)]
    id: u64,
    /// Season number (TV, default: 1).
    #[arg(long)]
    season: Option<u32>,
    /// Episode number (TV, default: 1).
    #[arg(long)]
    episode: Option<u32>,
    /// Player language: en or fr (default: from config).
    #[arg(long)]
    lang: Option<EmbedLanguage>,
    /// Print the URL without opening a browser.
    #[arg(long)]
    no_open: bool,
    /// Save the language as the new default.
    #[arg(long)]
    remember: bool,
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
    /// Print the config file path.
    Path,
    /// Print the effective configuration.
    Show,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: clap_complete::Shell,
}

/// Loads the config, falling back to defaults when the file is missing.
fn load_config(dir: Option<&PathBuf>) -> Result<(PathBuf, AppConfig)> {
    let path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&path).context("failed to load config")?;
    Ok((path, config))
}

/// Builds a `TmdbClient` from the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .min_interval(config.tmdb.min_interval())
        .build()
        .context("failed to build TMDB client")
}

/// Builds the metadata provider configured for this run.
fn build_provider(config: &AppConfig) -> Result<TmdbProvider> {
    let client = build_tmdb_client(config)?;
    Ok(TmdbProvider::new(client)
        .language(&config.tmdb.language)
        .image_base_url(&config.tmdb.image_base_url))
}

/// Logs one listing row.
fn log_summary(item: &MediaSummary) {
    tracing::info!(
        "{}\t{}\t{} ({})\t{}\t{}",
        item.id,
        item.kind,
        item.title,
        item.year_label(),
        item.rating_label(),
        item.genres.join(", "),
    );
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or the TUI fails.
#[instrument(skip_all)]
async fn run_search_command(args: SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;
    let provider = build_provider(&config)?;

    let mut query = match args.link.as_deref() {
        Some(link) => SearchQuery::from_query_string(link),
        None => SearchQuery {
            page_size: config.search.page_size,
            ..SearchQuery::default()
        },
    };
    if let Some(text) = args.query {
        query.set_text(&text);
    }
    if let Some(page_size) = args.page_size {
        query.set_page_size(page_size);
    }
    if let Some(tab) = args.tab {
        query.tab = tab;
    }
    if let Some(page) = args.movie_page {
        query.movie_page = page.max(1);
    }
    if let Some(page) = args.tv_page {
        query.tv_page = page.max(1);
    }

    let state = SearchViewState::new(
        query,
        config.search.debounce(),
        config.player.language,
        config.player.endpoints(),
    );
    let query = run_search(&provider, state)
        .await
        .context("search TUI failed")?;

    tracing::info!("{}", query.deep_link());
    Ok(())
}

/// Runs the `trending` subcommand.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or the request fails.
#[instrument(skip_all)]
async fn run_trending(args: &KindArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;
    let provider = build_provider(&config)?;

    let items = provider
        .trending(args.kind)
        .await
        .context("trending request failed")?;

    tracing::info!("ID\tKind\tTitle\t\t\tRating\tGenres");
    for item in &items {
        log_summary(item);
    }
    tracing::info!("Total: {} titles", items.len());
    Ok(())
}

/// Runs the `upcoming` subcommand.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or the request fails.
#[instrument(skip_all)]
async fn run_upcoming(dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;
    let provider = build_provider(&config)?;

    let items = provider
        .upcoming()
        .await
        .context("upcoming request failed")?;

    tracing::info!("ID\tKind\tTitle\t\t\tRating\tGenres");
    for item in &items {
        log_summary(item);
    }
    tracing::info!("Total: {} titles", items.len());
    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or the request fails.
#[instrument(skip_all, fields(kind = %args.kind, page = args.page))]
async fn run_browse(args: BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;
    let provider = build_provider(&config)?;

    let listing = provider
        .popular(args.kind, args.page.max(1))
        .await
        .context("popular request failed")?;
    let fetched = listing.items.len();

    let filter = BrowseFilter {
        search: args.search,
        genre: args.genre,
        year: args.year,
        sort: args.sort,
    };
    let items = filter.apply(listing.items);

    tracing::info!("ID\tKind\tTitle\t\t\tRating\tGenres");
    for item in &items {
        log_summary(item);
    }
    tracing::info!(
        "Showing {} of {} on page {} ({} popular titles in total)",
        items.len(),
        fetched,
        args.page.max(1),
        listing.total
    );
    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or the request fails.
#[instrument(skip_all, fields(kind = %args.kind, id = args.id))]
async fn run_details(args: &DetailsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, config) = load_config(dir)?;
    let provider = build_provider(&config)?;

    let details = provider
        .details(args.kind, args.id)
        .await
        .context("details request failed")?;
    let summary = &details.summary;

    tracing::info!("ID: {}", summary.id);
    tracing::info!("Title: {} ({})", summary.title, summary.year_label());
    tracing::info!("Rating: {}", summary.rating_label());
    tracing::info!("Genres: {}", summary.genres.join(", "));
    if let Some(runtime) = details.runtime_min {
        tracing::info!("Runtime: {runtime}m");
    }
    if let Some(poster) = &summary.poster {
        tracing::info!("Poster: {poster}");
    }
    tracing::info!("Overview: {}", summary.description);

    if let Some(seasons) = details.season_count {
        tracing::info!("Seasons: {seasons}");
        tracing::info!("---");
        for ep in &details.episodes {
            tracing::info!(
                "  S{:02}E{:02}: {} ({})",
                ep.season,
                ep.episode,
                ep.title,
                ep.runtime_label()
            );
        }
    }
    Ok(())
}

/// Runs the `play` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or saved, or the browser
/// fails to open.
#[instrument(skip_all, fields(kind = %args.kind, id = args.id))]
fn run_play(args: &PlayArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (path, mut config) = load_config(dir)?;
    let language = args.lang.unwrap_or(config.player.language);

    let target = PlayTarget::new(args.kind, args.id, args.season, args.episode);
    let url = config.player.endpoints().url(target, language);
    tracing::info!("{url}");

    if args.remember && config.player.language != language {
        config.player.language = language;
        config.save(&path).context("failed to save config")?;
        tracing::info!("Saved player language '{}' to {}", language, path.display());
    }

    if !args.no_open {
        open::that(&url).with_context(|| format!("failed to open {url}"))?;
    }
    Ok(())
}

/// Runs the `genres` subcommand.
fn run_genres() {
    for name in all_genre_names() {
        tracing::info!("{name}");
    }
}

/// Runs the `config path` and `config show` subcommands.
///
/// # Errors
///
/// Returns an error if the config cannot be resolved, loaded or serialized.
fn run_config(command: &ConfigSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let (path, config) = load_config(dir)?;
    match command {
        ConfigSubcommands::Path => tracing::info!("{}", path.display()),
        ConfigSubcommands::Show => {
            let content =
                toml::to_string_pretty(&config).context("failed to serialize config to TOML")?;
            for line in content.lines() {
                tracing::info!("{line}");
            }
        }
    }
    Ok(())
}

/// Writes shell completions to stdout.
fn run_completions(args: &CompletionsArgs) {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "cinedeck", &mut io::stdout());
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
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
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Search(args) => run_search_command(args, dir).await,
        Commands::Trending(args) => run_trending(&args, dir).await,
        Commands::Upcoming => run_upcoming(dir).await,
        Commands::Browse(args) => run_browse(args, dir).await,
        Commands::Details(args) => run_details(&args, dir).await,
        Commands::Play(args) => run_play(&args, dir),
        Commands::Genres => {
            run_genres();
            Ok(())
        }
        Commands::Config(cmd) => run_config(&cmd.command, dir),
        Commands::Completions(args) => {
            run_completions(&args);
            Ok(())
        }
    }
}
