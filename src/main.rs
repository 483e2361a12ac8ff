use countdown_overlay::fonts::FontCatalog;
use countdown_overlay::gui::CountdownApp;
use countdown_overlay::logging;
use countdown_overlay::settings::{config_path, AppConfig};

use eframe::egui;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let path = config_path();
    let config = AppConfig::load(&path)?;
    let _log_guard = logging::init(config.debug_logging, config.log_file.as_deref().map(Path::new));
    tracing::info!(config = %path.display(), "starting countdown");

    let catalog = FontCatalog::system();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Countdown")
            .with_inner_size([config.settings_window.width, config.settings_window.height])
            .with_min_inner_size(countdown_overlay::viewport::SETTINGS_MIN_SIZE)
            .with_transparent(true),
        ..Default::default()
    };

    eframe::run_native(
        "Countdown",
        native_options,
        Box::new(move |cc| Box::new(CountdownApp::new(cc, config, catalog))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run countdown window: {e}"))?;
    tracing::info!("exiting");
    Ok(())
}
