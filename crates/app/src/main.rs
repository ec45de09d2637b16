use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use api::{ChefsApi, HttpApi, SessionVault};
use chefs_core::time::Clock;
use services::{
    AchievementsService, CatalogService, FavoritesService, ProgressTracker, SessionStore,
};
use ui::{App, UiApp, build_app_context};

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_DATA_DIR: &str = ".chefs-circle";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
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

struct Args {
    api_url: String,
    data_dir: PathBuf,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <base_url>] [--data-dir <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api {DEFAULT_API_URL}");
    eprintln!("  --data-dir ./{DEFAULT_DATA_DIR}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CHEFS_API_URL, CHEFS_DATA_DIR, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url = std::env::var("CHEFS_API_URL")
            .ok()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut data_dir = std::env::var("CHEFS_DATA_DIR")
            .ok()
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    let value = require_value(args, "--api")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api_url = value;
                }
                "--data-dir" => {
                    let value = require_value(args, "--data-dir")?;
                    data_dir = PathBuf::from(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { api_url, data_dir })
    }
}

struct DesktopApp {
    session: Arc<SessionStore>,
    progress: Arc<ProgressTracker>,
    catalog: CatalogService,
    favorites: FavoritesService,
    achievements: AchievementsService,
}

impl UiApp for DesktopApp {
    fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    fn progress(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }

    fn catalog(&self) -> CatalogService {
        self.catalog.clone()
    }

    fn favorites(&self) -> FavoritesService {
        self.favorites.clone()
    }

    fn achievements(&self) -> AchievementsService {
        self.achievements.clone()
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    info!(api = %parsed.api_url, data_dir = %parsed.data_dir.display(), "starting Chef's Circle");

    std::fs::create_dir_all(&parsed.data_dir)?;
    let vault = SessionVault::in_dir(&parsed.data_dir);

    let http = HttpApi::new(&parsed.api_url)?;
    let backend: Arc<dyn ChefsApi> = Arc::new(http);

    let session = Arc::new(SessionStore::new(Arc::clone(&backend), vault));
    let progress = Arc::new(ProgressTracker::new(
        Arc::clone(&backend),
        Clock::default_clock(),
    ));

    // Restore the saved session before the first frame so the router guard
    // sees the right state immediately.
    session.hydrate().await;
    if let Some(user_id) = session.user_id() {
        progress.fetch(user_id).await;
    }

    let app = DesktopApp {
        session,
        progress,
        catalog: CatalogService::new(Arc::clone(&backend)),
        favorites: FavoritesService::new(Arc::clone(&backend)),
        achievements: AchievementsService::new(backend),
    };
    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Chef's Circle")
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
