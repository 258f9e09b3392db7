// K6LogView - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use k6logview::app;

pub use k6logview::core;
pub use k6logview::platform;
pub use k6logview::ui;
pub use k6logview::util;

use clap::Parser;
use std::path::PathBuf;

/// K6LogView: desktop viewer for k6 JSON log output.
#[derive(Parser, Debug)]
#[command(name = "k6logview", version, about)]
struct Cli {
    /// Log file to open on startup (opens empty if omitted).
    path: Option<PathBuf>,

    /// Directory holding config.toml (defaults to the platform config dir).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so that [logging] level can take effect.
    let config_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => platform::config::PlatformPaths::resolve().config_dir,
    };
    let (config, config_warnings) = platform::config::load_config(&config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %config_dir.display(),
        "K6LogView starting"
    );

    let mut state = app::state::AppState::new(&config, cli.debug);

    for warning in config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
        state.push_warning(warning);
    }

    // If a path was provided on the CLI, load it once the GUI is up.
    if let Some(path) = cli.path {
        state.pending_load = Some(path);
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let dark_mode = state.dark_mode;
    let font_size = state.font_size;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            ui::theme::apply(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::K6LogViewApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch K6LogView GUI: {e}");
        std::process::exit(1);
    }
}
