//! GitHub repository search TUI - Entry Point

use clap::Parser;
use ghsearch::api::{GithubClient, SearchApi};
use ghsearch::config::CliOverrides;
use ghsearch::model::AppError;
use ghsearch::state::{ErrorDisplay, HealthState};
use ghsearch::view::{ColorConfig, Theme};
use std::path::PathBuf;
use tracing::{info, warn};

/// GitHub repository search - search-as-you-type with infinite scroll
#[derive(Parser, Debug)]
#[command(name = "ghsearch")]
#[command(version)]
#[command(about = "Terminal UI for searching GitHub repositories")]
pub struct Args {
    /// Start with this query in the search box
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the GitHub REST API
    #[arg(long)]
    pub api_url: Option<String>,

    /// Results per page (1-100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub per_page: Option<u32>,

    /// Quiet period after typing before a search is issued, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// How errors are shown when results are already on screen
    #[arg(long, value_parser = ["replace", "overlay"])]
    pub error_display: Option<String>,

    /// Check API connectivity, print the result and exit
    #[arg(long)]
    pub health_check: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            api_url: self.api_url.clone(),
            per_page: self.per_page,
            debounce_ms: self.debounce_ms,
            error_display: self.error_display.as_deref().and_then(ErrorDisplay::parse),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = ghsearch::config::resolve_config(args.config.clone(), args.overrides())?;

    // Logging goes to a file; the terminal belongs to the TUI
    if let Err(err) = ghsearch::logging::init(&config.log_file_path) {
        eprintln!("Warning: logging disabled: {err}");
    }

    info!(
        api_url = %config.api_url,
        per_page = config.per_page,
        debounce_ms = config.debounce.as_millis() as u64,
        error_display = ?config.error_display,
        authenticated = config.token.is_some(),
        "Configuration loaded and resolved"
    );

    if args.health_check {
        return health_check(&GithubClient::new(&config.client_config())?);
    }

    let theme = Theme::new(ColorConfig::from_env_and_args(args.no_color));
    ghsearch::view::run_with_config(&config, &args.query, theme)?;

    Ok(())
}

/// One-shot connectivity probe for `--health-check`.
fn health_check(api: &dyn SearchApi) -> Result<(), Box<dyn std::error::Error>> {
    let result = api.zen();
    let mut health = HealthState::default();
    health.finish(result.clone());
    if let Some(line) = health.status_line() {
        println!("{line}");
    }
    result.map(|_| ()).map_err(|err| {
        warn!(%err, "Health check failed");
        AppError::from(err).into()
    })
}
