mod logging;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{ApiConfig, AppConfig, AppServices, Clock, SimulatedLatency};
use storage::repository::Storage;
use storage::theme_file::JsonThemeFile;
use ui::{App, UiApp, build_app_context};

const CONFIG_DIR_NAME: &str = "juggling-dashboard";
const THEME_FILE_NAME: &str = "theme.json";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    NoConfigDir,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::NoConfigDir => {
                write!(f, "no platform config directory; pass --theme-file")
            }
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

#[derive(Debug, Default, PartialEq)]
struct Args {
    api_url: Option<String>,
    no_latency: bool,
    theme_file: Option<PathBuf>,
    verbose: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [ui] [--api-url <url>] [--no-latency] [--theme-file <path>] [--verbose]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  no API url: fixture data only");
    eprintln!("  theme file: <config dir>/{CONFIG_DIR_NAME}/{THEME_FILE_NAME}");
    eprintln!();
    eprintln!("Environment (.env is read if present):");
    eprintln!("  JUGGLE_API_URL, JUGGLE_API_TIMEOUT_MS, JUGGLE_LATENCY_SCALE, JUGGLE_ENV,");
    eprintln!("  JUGGLE_AWS_REGION, JUGGLE_USER_POOL_ID, JUGGLE_USER_POOL_CLIENT_ID,");
    eprintln!("  JUGGLE_S3_MEDIA_BUCKET, RUST_LOG");
}

enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    fn parse(argv: impl IntoIterator<Item = String>) -> Result<Parsed, ArgsError> {
        let mut args = argv.into_iter().peekable();
        if args.peek().map(String::as_str) == Some("ui") {
            args.next();
        }

        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(&mut args, "--api-url")?;
                    let trimmed = value.trim();
                    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    parsed.api_url = Some(trimmed.to_string());
                }
                "--no-latency" => parsed.no_latency = true,
                "--theme-file" => {
                    parsed.theme_file = Some(require_value(&mut args, "--theme-file")?.into());
                }
                "--verbose" | "-v" => parsed.verbose = true,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Parsed::Run(parsed))
    }

    fn theme_path(&self) -> Result<PathBuf, ArgsError> {
        match &self.theme_file {
            Some(path) => Ok(path.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(CONFIG_DIR_NAME).join(THEME_FILE_NAME))
                .ok_or(ArgsError::NoConfigDir),
        }
    }

    /// Command-line flags override the environment.
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(url) = &self.api_url {
            config.api = ApiConfig {
                base_url: url.clone(),
                ..config.api
            };
        }
        if self.no_latency {
            config.latency = SimulatedLatency::none();
        }
        config
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = match Args::parse(std::env::args().skip(1)).inspect_err(|e| {
        eprintln!("{e}");
        print_usage();
    })? {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    let dotenv = dotenvy::dotenv();
    logging::init_logging(args.verbose)?;
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "ignoring unreadable .env"),
    }

    let config = args.apply(AppConfig::from_env()?);
    tracing::info!(
        name = %config.app.name,
        version = %config.app.version,
        environment = %config.app.environment,
        api = config.api.is_configured(),
        "starting"
    );

    let theme_path = args.theme_path()?;
    tracing::debug!(path = %theme_path.display(), "theme preference file");
    let storage =
        Storage::with_fixtures()?.with_theme_repository(Arc::new(JsonThemeFile::new(theme_path)));

    let services = AppServices::bootstrap(config, Clock::default_clock(), &storage).await?;
    let window_title = services.config().app.name.clone();
    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // Some dev setups default the window to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(window_title)
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Parsed, ArgsError> {
        Args::parse(args.iter().map(|arg| (*arg).to_string()))
    }

    fn run_args(args: &[&str]) -> Args {
        match parse(args).expect("valid args") {
            Parsed::Run(args) => args,
            Parsed::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn bare_invocation_uses_defaults() {
        assert_eq!(run_args(&[]), Args::default());
        assert_eq!(run_args(&["ui"]), Args::default());
    }

    #[test]
    fn flags_are_parsed() {
        let args = run_args(&[
            "ui",
            "--api-url",
            "http://localhost:4000/api",
            "--no-latency",
            "--theme-file",
            "/tmp/theme.json",
            "--verbose",
        ]);
        assert_eq!(args.api_url.as_deref(), Some("http://localhost:4000/api"));
        assert!(args.no_latency);
        assert_eq!(args.theme_file, Some(PathBuf::from("/tmp/theme.json")));
        assert!(args.verbose);
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(matches!(
            parse(&["--api-url"]),
            Err(ArgsError::MissingValue { flag: "--api-url" })
        ));
        assert!(matches!(
            parse(&["--api-url", "localhost"]),
            Err(ArgsError::InvalidApiUrl { .. })
        ));
        assert!(matches!(parse(&["--db"]), Err(ArgsError::UnknownArg(_))));
        assert!(matches!(parse(&["-h"]), Ok(Parsed::Help)));
    }

    #[test]
    fn flags_override_config() {
        let args = run_args(&["--api-url", "https://api.example.com", "--no-latency"]);
        let config = args.apply(AppConfig::default());
        assert!(config.api.is_configured());
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.latency, SimulatedLatency::none());
    }

    #[test]
    fn explicit_theme_file_wins() {
        let args = run_args(&["--theme-file", "theme.json"]);
        assert_eq!(args.theme_path().unwrap(), PathBuf::from("theme.json"));
    }
}
