// LogHerald - main.rs
//
// Demo entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading (platform default or --config)
// 3. Logging initialisation with the console layer
// 4. A sample record per severity, and an optional panic banner

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use logherald::app::panic::install_panic_hook;
use logherald::platform::config::{self, PlatformPaths};
use logherald::platform::terminal::{ColorMode, StreamMode, TerminalSink};
use logherald::util::{self, constants, error::Result};

/// LogHerald - colored console log lines, day separators and panic banners.
///
/// Prints a header and one record at each severity so the styling can be
/// checked on the current terminal.
#[derive(Parser, Debug)]
#[command(name = "LogHerald", version, about)]
struct Cli {
    /// Title shown in the header and panic banner.
    #[arg(short = 't', long = "title")]
    title: Option<String>,

    /// Config file to use instead of the platform default (must exist).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// When to use colour.
    #[arg(long = "color", value_enum)]
    color: Option<ColorMode>,

    /// Which stream each severity goes to.
    #[arg(long = "stream", value_enum)]
    stream: Option<StreamMode>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Panic with this message after the sample records.
    #[arg(long = "panic", value_name = "MESSAGE")]
    panic: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Config loads before tracing exists; its warnings are replayed below.
    let (mut app_config, warnings) = match &cli.config {
        Some(path) => config::validate(config::read_config_file(path)?),
        None => config::load_config(&PlatformPaths::resolve().config_file()),
    };

    if let Some(title) = cli.title {
        app_config.title = title;
    }
    if let Some(color) = cli.color {
        app_config.color = color;
    }
    if let Some(stream) = cli.stream {
        app_config.stream = stream;
    }

    let sink = TerminalSink::new(app_config.color, app_config.stream);
    let formatter = util::logging::init(
        cli.debug,
        app_config.log_level.as_deref(),
        &app_config.title,
        sink,
    )?;
    install_panic_hook(app_config.title.clone(), Arc::clone(&formatter), None);

    for warning in &warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "LogHerald starting"
    );

    tracing::trace!("Trace\n");
    tracing::debug!("Debug\n{:?}", [1, 2, 3, 4]);
    tracing::info!("Info: {}", 7);
    tracing::warn!("Warn {:#?}", [0, 9, 8, 7]);
    tracing::error!("Error");

    formatter.sink().flush();

    if let Some(message) = cli.panic {
        panic!("{message}");
    }
    Ok(())
}
