use std::path::PathBuf;

use eeg_compare::app::EegCompareApp;
use eeg_compare::config::{Config, DEFAULT_CONFIG_PATH};
use eeg_compare::state::AppState;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::from_file(&config_path)?;

    let mut state = AppState::new(config);
    let root = state.config.dataset_root.clone();
    if root.is_dir() {
        state.open_dataset(&root);
    } else {
        log::info!("Dataset root {} not found; open one from the File menu", root.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EEG Compare – Condition Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(EegCompareApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
