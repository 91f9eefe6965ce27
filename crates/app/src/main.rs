use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{ApiConfig, HttpPracticeApi, PracticeService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidDelay { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidDelay { raw } => write!(f, "invalid --reveal-delay-ms value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--reveal-delay-ms <millis>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url          {}", services::config::DEFAULT_BASE_URL);
    eprintln!(
        "  --reveal-delay-ms  {}",
        services::config::DEFAULT_REVEAL_DELAY.as_millis()
    );
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PRACTICE_API_URL, PRACTICE_REVEAL_DELAY_MS, RUST_LOG");
}

fn parse_args(args: &mut impl Iterator<Item = String>) -> Result<ApiConfig, ArgsError> {
    // Environment first, flags override.
    let mut config = ApiConfig::from_env();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api-url" => {
                let value = require_value(args, "--api-url")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidApiUrl { raw: value });
                }
                config.base_url = value;
            }
            "--reveal-delay-ms" => {
                let value = require_value(args, "--reveal-delay-ms")?;
                let millis: u64 = value
                    .parse()
                    .map_err(|_| ArgsError::InvalidDelay { raw: value.clone() })?;
                config.reveal_delay = Duration::from_millis(millis);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(config)
}

struct DesktopApp {
    practice: Arc<PracticeService>,
}

impl UiApp for DesktopApp {
    fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = parse_args(&mut args).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    tracing::info!(base_url = %config.base_url, "starting contest practice client");

    let api = Arc::new(HttpPracticeApi::new(&config));
    let practice = Arc::new(
        PracticeService::new(api.clone(), api).with_config(&config),
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { practice });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Contest Practice")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
