#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use clap::Parser;
use eframe::{NativeOptions, egui};
use std::path::PathBuf;

use close_forecast::config::{FORECAST, PERSISTENCE};
use close_forecast::ui::config::UI_TEXT;
use close_forecast::{Cli, ResourceCache, run_app};

fn main() -> eframe::Result {
    // A. Init Logging (RUST_LOG overrides the default level)
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Load both inputs once. A failure is shown in place of the dashboard.
    let resources = ResourceCache::new(&args.data, &args.model);
    let loaded = resources.load_all();
    if let Err(e) = &loaded {
        log::error!("❌ Startup failed: {:#}", e);
    }

    // D. Run Native App
    let title = format!("📈 {} {}", FORECAST.asset_name, UI_TEXT.title_suffix);
    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(PERSISTENCE.app_state_path)),
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([1200.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(run_app(cc, loaded))),
    )
}
