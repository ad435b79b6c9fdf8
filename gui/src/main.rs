mod actions;
mod app;
mod context;
mod dialogs;

use actions::{
    DragonFractalAction, ImageSettingsAction, KochFractalAction, PaletteSettingsAction,
    SaveImageAction, SaveSettingsAction,
};
use app::{FractalPainterApp, MENU_SIZE};
use context::AppContext;
use eframe::egui;
use fractal_painter::{
    AppSettings, CanExecuteState, CanvasEvent, DragonPainter, DragonSettings,
    DragonSettingsGenerator, ImageSettings, Menu, Painter, Palette, RasterImageController,
    SettingsManager, UiAction,
};
use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

fn main() -> Result<(), eframe::Error> {
    // Configure logging
    env_logger::init();

    // Settings live next to the working directory
    let settings_manager = SettingsManager::in_directory(Path::new("."));
    let (settings, load_error) = match settings_manager.try_load() {
        Ok(loaded) => (loaded.unwrap_or_default(), None),
        Err(e) => {
            warn!("Could not load settings, using defaults: {e}");
            (AppSettings::default(), Some(e))
        }
    };
    let image_settings = settings.image_settings;

    let mut image_controller = RasterImageController::new(&image_settings);
    let can_save = CanExecuteState::new(false);
    let save_state = can_save.clone();
    image_controller.subscribe(move |event| save_state.set(event == CanvasEvent::Updated));

    let actions: Vec<Box<dyn UiAction<AppContext>>> = vec![
        Box::new(SaveImageAction::new(can_save)),
        Box::new(SaveSettingsAction),
        Box::new(DragonFractalAction::new(DragonSettingsGenerator::new(
            rand::rng(),
        ))),
        Box::new(KochFractalAction),
        Box::new(ImageSettingsAction),
        Box::new(PaletteSettingsAction),
    ];

    let mut context = AppContext::new(settings, settings_manager, image_controller);
    if let Some(e) = load_error {
        context.report_error(format!("Could not load settings, using defaults: {e}"));
    }

    // Configure viewport/window
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                image_settings.width as f32,
                image_settings.height as f32 + MENU_SIZE,
            ])
            .with_title("Fractal Painter")
            .with_icon(load_icon()),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Fractal Painter",
        options,
        Box::new(move |cc| {
            Ok(Box::new(FractalPainterApp::new(
                cc,
                context,
                Menu::new(actions),
            )))
        }),
    )
}

/// Application icon: a small dragon in the default palette
fn load_icon() -> egui::IconData {
    const ICON_SIZE: u32 = 32;

    let mut controller = RasterImageController::new(&ImageSettings::new(ICON_SIZE, ICON_SIZE));
    let settings = DragonSettings {
        iterations_count: 4000,
        ..DragonSettings::default()
    };
    DragonPainter::new(settings, Palette::default(), StdRng::seed_from_u64(1))
        .paint(&mut controller);

    egui::IconData {
        rgba: controller.canvas().as_raw().clone(),
        width: ICON_SIZE,
        height: ICON_SIZE,
    }
}
