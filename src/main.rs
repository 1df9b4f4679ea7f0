//! # Wiimote Pointer
//!
//! Drive the Linux pointer with a Wii Remote.
//!
//! Tilting the remote moves the pointer, the A button clicks and the D-pad
//! up/down keys scroll.
//!
//! # Usage
//!
//! ```bash
//! wiimote-pointer --list
//! wiimote-pointer 1 /dev/input/event6
//! wiimote-pointer /sys/bus/hid/devices/0005:057E:0306.0001 /dev/input/event6 nfs
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use wiimote_pointer::bridge::dispatch::Session;
use wiimote_pointer::bridge::mode::Mode;
use wiimote_pointer::bridge::router::Router;
use wiimote_pointer::config::{Config, LoggingConfig};
use wiimote_pointer::controller::hotplug::spawn_watcher;
use wiimote_pointer::controller::wiimote::{list_remotes, RemoteLocator, WiimoteController, DEFAULT_HID_ROOT};
use wiimote_pointer::pointer::VirtualPointer;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "wiimote-pointer", version, about = "Drive the Linux pointer with a Wii Remote")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List connected remotes and exit
    #[arg(long)]
    list: bool,

    /// Remote to use: sysfs HID path or 1-based index from --list
    controller: Option<String>,

    /// Input device node that receives pointer events
    pointer_device: Option<String>,

    /// Mode token; "nfs" selects NFS mode, anything else Normal
    mode: Option<String>,
}

/// Set up the tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level. The returned guard
/// flushes the log file on drop and must live as long as the process.
fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.directory.is_empty() {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        return Ok(None);
    }

    fs::create_dir_all(&config.directory)
        .with_context(|| format!("Failed to create log directory {}", config.directory))?;
    let appender = tracing_appender::rolling::daily(&config.directory, "wiimote-pointer.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    Ok(Some(guard))
}

/// Main entry point
///
/// # Control Flow
///
/// 1. Load configuration and set up logging
/// 2. Open the pointer device (fatal if it cannot be opened)
/// 3. Open the remote and start the hot-plug watcher
/// 4. Run the dispatch loop until Ctrl+C or a fatal error
///
/// All devices are released when `main` returns, on every path.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    let _log_guard = init_logging(&config.logging)?;

    info!("Wiimote Pointer v{} starting...", env!("CARGO_PKG_VERSION"));

    if cli.list {
        let remotes = list_remotes(DEFAULT_HID_ROOT)?;
        if remotes.is_empty() {
            println!("No Wii Remotes connected");
        }
        for (index, remote) in remotes.iter().enumerate() {
            println!("{}: {}", index + 1, remote.display());
        }
        return Ok(());
    }

    let selector = cli.controller.unwrap_or(config.controller.device.clone());
    let pointer_path = cli
        .pointer_device
        .or_else(|| Some(config.pointer.device_path.clone()).filter(|path| !path.is_empty()))
        .context("No pointer device given on the command line or in the configuration")?;
    let mode = cli.mode.as_deref().map_or(config.mode.mode, Mode::from_token);

    let pointer = VirtualPointer::open(&pointer_path).context("Cannot start without a pointer device")?;

    let locator = RemoteLocator::new(selector);
    let mut controller = WiimoteController::open_with(locator.clone())
        .with_context(|| format!("Failed to open remote {}", locator.selector()))?;

    let (mut hotplug, watcher) = spawn_watcher(
        locator,
        Duration::from_millis(config.controller.rescan_interval_ms),
    );

    let router = Router::with_shaping(
        mode,
        config.motion_shaper(),
        config.accel_curve(),
        config.integrator_limits(),
    );
    let mut session = Session::new(router, pointer);

    info!("Press Ctrl+C to exit");

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down..."),
            Err(e) => {
                warn!("Cannot listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    let result = session.run(&mut controller, &mut hotplug, shutdown).await;
    watcher.abort();

    result.context("Dispatch loop ended")?;
    info!("Stopped");
    Ok(())
}
