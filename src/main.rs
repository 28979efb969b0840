use dishswipe::{
    core::DishSwipeError,
    gui::{
        settings::{
            SettingsData,
            SETTINGS_FILE,
        },
        DishSwipeApp,
    },
    logging,
    persistence::load_json_or_default,
};
use eframe::egui;
use tracing::info;

fn main() -> Result<(), DishSwipeError> {
    logging::init_tracing();

    let settings = load_json_or_default::<SettingsData>(SETTINGS_FILE);
    info!("Using dish service at {}", settings.server_url);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("dishswipe-net")
        .enable_all()
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 760.0])
            .with_min_inner_size([400.0, 640.0])
            .with_title("DishSwipe"),
        ..Default::default()
    };

    eframe::run_native(
        "DishSwipe",
        options,
        Box::new(|cc| Ok(Box::new(DishSwipeApp::new(cc, settings, runtime)))),
    )?;

    Ok(())
}
