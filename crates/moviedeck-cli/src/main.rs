//! moviedeck - popular movie browser and TMDB query CLI.

/// Application configuration (TOML).
mod config;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path, resolve_log_dir};
use moviedeck_api::tmdb::{LocalTmdbApi, SearchMovieParams, TmdbClient};
use moviedeck_tui::app::{BrowserOptions, run_browser};
use moviedeck_tui::render::{MovieCard, MovieDetailView, SuggestionView, TrailerView, movie_cards};

/// Cast members printed by the `movie` subcommand.
const MOVIE_CAST_LIMIT: usize = 10;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse popular movies in an interactive terminal UI.
    Browse(LanguageArgs),
    /// List one page of popular movies.
    Popular(PopularArgs),
    /// Show details, cast, and trailer of a movie.
    Movie(MovieArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// Manage the config file.
    Config(ConfigCommand),
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Response language override shared by the TMDB subcommands.
#[derive(clap::Args)]
struct LanguageArgs {
    /// Response language (default: `tmdb.language` from config, else "en-US").
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `popular` subcommand.
#[derive(clap::Args)]
struct PopularArgs {
    /// Result page (1-500).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=500))]
    page: u32,
    #[command(flatten)]
    lang: LanguageArgs,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
    #[command(flatten)]
    lang: LanguageArgs,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Dune").
    #[arg(long, required = true)]
    query: String,
    /// Filter by release year.
    #[arg(long)]
    year: Option<u32>,
    #[command(flatten)]
    lang: LanguageArgs,
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
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path.
    Path,
}

/// Loads the config file and applies environment overrides.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;
    config.apply_env();
    Ok(config)
}

/// Builds a TMDB client from config credentials.
///
/// # Errors
///
/// Returns an error if no credential is configured, the base URL is
/// invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let tmdb = &config.tmdb;
    if tmdb.api_key.is_none() && tmdb.api_token.is_none() {
        bail!("TMDB_API_KEY or TMDB_API_TOKEN is required (environment or config.toml)");
    }

    let mut builder = TmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = &tmdb.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid tmdb.base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }
    if let Some(token) = &tmdb.api_token {
        builder = builder.api_token(token);
    }
    if let Some(key) = &tmdb.api_key {
        builder = builder.api_key(key);
    }
    builder.build().context("failed to build TMDB client")
}

/// Picks the CLI language, falling back to config.
fn language<'a>(args: &'a LanguageArgs, config: &'a AppConfig) -> &'a str {
    args.language.as_deref().unwrap_or(&config.tmdb.language)
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: &LanguageArgs, config: AppConfig) -> Result<()> {
    let client = build_tmdb_client(&config)?;
    let options = BrowserOptions {
        language: String::from(language(args, &config)),
        typeahead: config.search.settings(),
        images: config.images,
    };
    tracing::info!(language = %options.language, "starting browser");
    run_browser(Arc::new(client), options).await
}

/// Runs the `popular` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_popular(args: &PopularArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let response = client
        .popular_movies(args.page, language(&args.lang, config))
        .await
        .context("TMDB movie/popular request failed")?;

    tracing::info!("Page {}/{}", response.page, response.total_pages);
    tracing::info!("ID\tRating\tRelease\t\tTitle\tPoster");
    for card in movie_cards(&response.results, &config.images) {
        tracing::info!("{}", popular_row(&card));
    }
    tracing::info!("Total results: {}", response.total_results);

    Ok(())
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_movie(args: &MovieArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let details = client
        .movie_details(args.id, language(&args.lang, config))
        .await
        .with_context(|| format!("TMDB movie/{} request failed", args.id))?;
    let view = MovieDetailView::from_details(&details, &config.images);

    tracing::info!("{} ({})", view.title, view.id);
    if !view.tagline.is_empty() {
        tracing::info!("  {}", view.tagline);
    }
    tracing::info!(
        "Rating:  {} ({}, score {})",
        view.rating.label,
        view.rating.votes,
        view.rating.score
    );
    tracing::info!("Genres:  {}", view.genres.join(", "));
    tracing::info!("Release: {}", view.release);
    tracing::info!("Runtime: {}", view.runtime);
    tracing::info!("Budget:  {}", view.budget);
    tracing::info!("Revenue: {}", view.revenue);
    tracing::info!("Poster:  {}", view.poster_url);
    if let Some(backdrop) = &view.backdrop_url {
        tracing::info!("Backdrop: {backdrop}");
    }
    if !view.overview.is_empty() {
        tracing::info!("{}", view.overview);
    }
    tracing::info!("Cast:");
    for member in view.cast.iter().take(MOVIE_CAST_LIMIT) {
        tracing::info!("  {}\t{}", member.name, member.character);
    }
    match &view.trailer {
        Some(trailer) => tracing::info!("{}", trailer_line(trailer)),
        None => tracing::info!("Trailer: -"),
    }

    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let mut params =
        SearchMovieParams::new(&args.query).language(language(&args.lang, config));
    if let Some(year) = args.year {
        params = params.year(year);
    }

    let response = client
        .search_movie(&params)
        .await
        .context("TMDB search/movie request failed")?;

    tracing::info!("Total results: {}", response.total_results);
    tracing::info!("ID\tYear\tRating\tTitle\tThumbnail");
    for movie in &response.results {
        let row = SuggestionView::from_summary(movie, &config.images);
        tracing::info!("{}", search_row(&row));
    }

    Ok(())
}

/// One `popular` output row.
fn popular_row(card: &MovieCard) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        card.id, card.rating, card.release, card.title, card.poster_url
    )
}

/// One `search` output row; missing values print as `-`.
fn search_row(row: &SuggestionView) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        row.id,
        if row.year.is_empty() { "-" } else { row.year.as_str() },
        row.rating.as_deref().unwrap_or("-"),
        row.title,
        row.thumbnail_url.as_deref().unwrap_or("-"),
    )
}

fn trailer_line(trailer: &TrailerView) -> String {
    format!(
        "Trailer: {} {} (thumbnail {})",
        trailer.name, trailer.watch_url, trailer.thumbnail_url
    )
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
fn run_config_init(dir: Option<&PathBuf>, force: bool) -> Result<()> {
    let path = resolve_config_path(dir).context("failed to resolve config path")?;
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Prints completions for `shell` to stdout.
fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "moviedeck", &mut io::stdout());
}

/// Opens the TUI log file writer under `log_dir`.
fn file_writer(log_dir: &Path) -> Result<(BoxMakeWriter, WorkerGuard)> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "moviedeck.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    Ok((BoxMakeWriter::new(non_blocking), guard))
}

/// Installs the global subscriber. Logs go to `log_dir` when given
/// (the TUI owns the terminal), otherwise to stdout.
fn init_tracing(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, guard, ansi) = match log_dir {
        Some(dir) => {
            let (writer, guard) = file_writer(dir)?;
            (writer, Some(guard), false)
        }
        None => (BoxMakeWriter::new(io::stdout), None, true),
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer);

    #[cfg(not(feature = "otel"))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
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

    Ok(guard)
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = match cli.command {
        Commands::Browse(_) => Some(resolve_log_dir(cli.dir.as_ref())?),
        _ => None,
    };
    let _guard = init_tracing(log_dir.as_deref())?;

    match cli.command {
        Commands::Browse(args) => run_browse(&args, load_config(cli.dir.as_ref())?).await,
        Commands::Popular(args) => run_popular(&args, &load_config(cli.dir.as_ref())?).await,
        Commands::Movie(args) => run_movie(&args, &load_config(cli.dir.as_ref())?).await,
        Commands::Search(args) => run_search(&args, &load_config(cli.dir.as_ref())?).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init { force } => run_config_init(cli.dir.as_ref(), force),
            ConfigSubcommands::Path => {
                let path = resolve_config_path(cli.dir.as_ref())?;
                tracing::info!("{}", path.display());
                Ok(())
            }
        },
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        // Arrange & Act & Assert
        Cli::command().debug_assert();
    }

    #[test]
    fn test_language_prefers_cli_flag() {
        // Arrange
        let config = AppConfig::default();
        let flag = LanguageArgs {
            language: Some(String::from("ja-JP")),
        };
        let none = LanguageArgs { language: None };

        // Act & Assert
        assert_eq!(language(&flag, &config), "ja-JP");
        assert_eq!(language(&none, &config), "en-US");
    }

    #[test]
    fn test_build_client_requires_credentials() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let err = build_tmdb_client(&config).unwrap_err();

        // Assert
        assert!(err.to_string().contains("TMDB_API_KEY or TMDB_API_TOKEN"));
    }

    #[test]
    fn test_build_client_rejects_bad_base_url() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_key = Some(String::from("key"));
        config.tmdb.base_url = Some(String::from("not a url"));

        // Act
        let err = build_tmdb_client(&config).unwrap_err();

        // Assert
        assert!(err.to_string().contains("invalid tmdb.base_url"));
    }

    #[test]
    fn test_popular_row_includes_poster() {
        // Arrange
        let card = MovieCard {
            id: 438_631,
            title: String::from("Dune"),
            poster_url: String::from("https://image.tmdb.org/t/p/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg"),
            rating: String::from("7.8"),
            release: String::from("Sep 15, 2021"),
        };

        // Act
        let row = popular_row(&card);

        // Assert
        assert_eq!(
            row,
            "438631\t7.8\tSep 15, 2021\tDune\thttps://image.tmdb.org/t/p/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg"
        );
    }

    #[test]
    fn test_search_row_shows_thumbnail_or_dash() {
        // Arrange
        let with_thumb = SuggestionView {
            id: 841,
            title: String::from("Dune"),
            year: String::from("1984"),
            thumbnail_url: Some(String::from("https://image.tmdb.org/t/p/w92/a.jpg")),
            rating: Some(String::from("\u{2605} 6.3")),
        };
        let bare = SuggestionView {
            id: 1,
            title: String::from("Untitled"),
            year: String::new(),
            thumbnail_url: None,
            rating: None,
        };

        // Act & Assert
        assert_eq!(
            search_row(&with_thumb),
            "841\t1984\t\u{2605} 6.3\tDune\thttps://image.tmdb.org/t/p/w92/a.jpg"
        );
        assert_eq!(search_row(&bare), "1\t-\t-\tUntitled\t-");
    }

    #[test]
    fn test_trailer_line_includes_thumbnail() {
        // Arrange
        let trailer = TrailerView {
            name: String::from("Official Trailer"),
            watch_url: String::from("https://www.youtube.com/watch?v=abc"),
            thumbnail_url: String::from("https://img.youtube.com/vi/abc/maxresdefault.jpg"),
        };

        // Act
        let line = trailer_line(&trailer);

        // Assert
        assert!(line.contains("https://www.youtube.com/watch?v=abc"));
        assert!(line.contains("https://img.youtube.com/vi/abc/maxresdefault.jpg"));
    }

    #[test]
    fn test_config_init_refuses_overwrite() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        run_config_init(Some(&dir_path), false).unwrap();

        // Act
        let second = run_config_init(Some(&dir_path), false);
        let forced = run_config_init(Some(&dir_path), true);

        // Assert
        assert!(second.is_err());
        assert!(forced.is_ok());
        let loaded = AppConfig::load(&dir_path.join("config.toml")).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }
}
