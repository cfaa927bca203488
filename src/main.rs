use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use parkwatch::config::AppConfig;
use parkwatch::core::{global_registry, PollEngine};
use parkwatch::ui::{now_label, SlotBoard};
use parkwatch::EngineState;
use parkwatch_types::{FixtureStoreConfig, StoreConfig};
use std::path::PathBuf;
use tokio::sync::watch;

/// parkwatch - live parking slot occupancy board
#[derive(Parser, Debug, Clone)]
#[command(name = "parkwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Firebase database URL (switches the store to Firebase)
    #[arg(long = "database-url", value_name = "URL", conflicts_with = "fixture")]
    database_url: Option<String>,

    /// Read sensor values from a local JSON file instead of a remote store
    #[arg(long = "fixture", value_name = "PATH")]
    fixture: Option<PathBuf>,

    /// Remote key holding the sensor fields
    #[arg(short = 'k', long = "key", value_name = "KEY")]
    key: Option<String>,

    /// Poll interval in milliseconds
    #[arg(short = 'i', long = "interval-ms", value_name = "MS")]
    interval_ms: Option<u64>,

    /// Print the first settled state and exit
    #[arg(long = "once")]
    once: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

/// Load the config file and apply command line overrides
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match cli.config {
        Some(ref path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    if let Some(ref url) = cli.database_url {
        let mut firebase = match config.store {
            StoreConfig::Firebase(ref firebase) => firebase.clone(),
            _ => Default::default(),
        };
        firebase.database_url = url.clone();
        config.store = StoreConfig::Firebase(firebase);
    }
    if let Some(ref path) = cli.fixture {
        config.store = StoreConfig::Fixture(FixtureStoreConfig { path: path.clone() });
    }
    if let Some(ref key) = cli.key {
        config.remote_key = key.clone();
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.poll_interval_ms = interval_ms;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting parkwatch v{}", env!("CARGO_PKG_VERSION"));

    let config = resolve_config(&cli)?;

    parkwatch_sources::register_all();
    let store = global_registry()
        .create_store(&config.store)
        .with_context(|| format!("Failed to create '{}' store", config.store.store_type()))?;

    let mut engine = PollEngine::new(store, config.remote_key.clone(), config.mapper());
    let (state_tx, state_rx) = watch::channel(EngineState::Loading);
    engine.start(config.poll_interval(), move |state| {
        state_tx.send_replace(state);
    })?;

    let result = if cli.once {
        print_first_settled(state_rx, &config).await
    } else {
        run_board(state_rx, &config).await
    };

    engine.stop();
    result
}

/// Wait for the first Ready/Error state, print it and report errors through the exit status
async fn print_first_settled(mut state_rx: watch::Receiver<EngineState>, config: &AppConfig) -> Result<()> {
    let state = state_rx
        .wait_for(|state| !state.is_loading())
        .await
        .context("Polling engine stopped before the first fetch settled")?
        .clone();

    let board = SlotBoard::new(&parkwatch::config::DisplayConfig {
        color: false,
        ..config.display.clone()
    });
    print!("{}", board.render(&state, &now_label()));

    match state.error_message() {
        Some(message) => anyhow::bail!("{}", message),
        None => Ok(()),
    }
}

/// Redraw the board on every state change and clock tick until Ctrl-C
async fn run_board(mut state_rx: watch::Receiver<EngineState>, config: &AppConfig) -> Result<()> {
    let board = SlotBoard::new(&config.display);
    let mut clock = tokio::time::interval(config.clock_interval());
    clock.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = clock.tick() => {}
            changed = state_rx.changed() => {
                if changed.is_err() {
                    warn!("Polling engine went away, exiting");
                    return Ok(());
                }
            }
            signal = &mut shutdown => {
                signal.context("Failed to listen for Ctrl-C")?;
                info!("Received Ctrl-C, shutting down");
                return Ok(());
            }
        }

        let state = state_rx.borrow_and_update().clone();
        board.draw(&state, &now_label())?;
    }
}
