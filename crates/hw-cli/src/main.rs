mod config;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::{fmt, EnvFilter};

use hw_core::{Credentials, HttpReviewApi, TelegramNotifier, Watcher};

fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");

    if GIT_HASH.is_empty() {
        VERSION
    } else {
        // Leaked once at startup; lives for the program's lifetime.
        Box::leak(format!("{VERSION} ({GIT_HASH})").into_boxed_str())
    }
}

/// Homework review status watcher. Polls the review API and forwards
/// verdicts to a Telegram chat.
#[derive(Parser)]
#[command(name = "hw-monitor", version = version_string(), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the review API forever, notifying on every status change.
    Run {
        /// Path to TOML config file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Review API endpoint. Overrides the config file.
        #[arg(long)]
        endpoint: Option<String>,

        /// Seconds between poll cycles. Overrides the config file.
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Log output format (pretty or json). Overrides the config file.
        #[arg(long)]
        log_format: Option<String>,
    },
    /// Run a single poll cycle and exit. Useful as a deploy smoke check.
    Once {
        /// Path to TOML config file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Review API endpoint. Overrides the config file.
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            endpoint,
            poll_interval,
            log_format,
        } => {
            let app = resolve_config(config, endpoint, poll_interval, log_format);
            run(app, true).await;
        }
        Commands::Once { config, endpoint } => {
            let app = resolve_config(config, endpoint, None, None);
            run(app, false).await;
        }
    }
}

fn resolve_config(
    path: Option<PathBuf>,
    endpoint: Option<String>,
    poll_interval: Option<u64>,
    log_format: Option<String>,
) -> config::AppConfig {
    let mut app = match path {
        Some(ref p) => match config::AppConfig::load(p) {
            Ok(c) => c,
            Err(e) => {
                init_tracing("pretty");
                tracing::error!("{e}");
                std::process::exit(1);
            }
        },
        None => config::AppConfig::default(),
    };

    if let Some(endpoint) = endpoint {
        app.endpoint = endpoint;
    }
    if let Some(secs) = poll_interval {
        app.poll_interval_secs = secs;
    }
    if let Some(format) = log_format {
        app.log_format = format;
    }

    if let Err(e) = app.validate() {
        init_tracing("pretty");
        tracing::error!("{e}");
        std::process::exit(1);
    }

    app
}

async fn run(app: config::AppConfig, forever: bool) {
    init_tracing(&app.log_format);

    // Every downstream call assumes all three credentials are valid, so a
    // missing one halts the process before any network call is made.
    let credentials = Credentials::from_env();
    let missing = credentials.missing();
    if !missing.is_empty() {
        tracing::error!(?missing, "Required environment variables are not set; stopping");
        std::process::exit(1);
    }

    if app.log_format == "pretty" {
        print_banner(&app);
    }

    let watch_config = app.to_watch_config();
    let client = HttpReviewApi::build_client(watch_config.request_timeout);
    let api = Arc::new(HttpReviewApi::with_client(
        client.clone(),
        &watch_config.endpoint,
        &credentials.api_token,
    ));
    let notifier = Arc::new(TelegramNotifier::new(
        client,
        &credentials.bot_token,
        &credentials.chat_id,
    ));

    let mut watcher = Watcher::new(watch_config, api, notifier);

    if forever {
        watcher.run().await;
    } else {
        watcher.poll_once().await;
        tracing::info!("Single poll cycle complete");
    }
}

fn print_banner(app: &config::AppConfig) {
    println!(
        "{} {}",
        style("hw-monitor").bold(),
        style(version_string()).dim()
    );
    println!("  {} {}", style("endpoint:").dim(), app.endpoint);
    println!("  {} {}s", style("poll:    ").dim(), app.poll_interval_secs);
    println!("  {} {}s", style("timeout: ").dim(), app.request_timeout_secs);
    println!();
}

fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_format {
        "json" => {
            fmt().with_env_filter(filter).json().init();
        }
        _ => {
            fmt().with_env_filter(filter).init();
        }
    }
}
