//! Menu entries of the main window

use crate::context::AppContext;
use crate::dialogs::SettingsForm;
use fractal_painter::actions::CanExecuteListener;
use fractal_painter::{
    ActionResult, CanExecuteState, DragonSettingsGenerator, ImageController, KochPainter,
    MenuCategory, Painter, UiAction,
};
use log::debug;
use rand::Rng;

const DEFAULT_IMAGE_NAME: &str = "image.bmp";

/// Writes the canvas to a user-chosen file
///
/// Enabled only while the canvas holds a finished painting.
pub struct SaveImageAction {
    state: CanExecuteState,
}

impl SaveImageAction {
    pub fn new(state: CanExecuteState) -> Self {
        Self { state }
    }
}

impl UiAction<AppContext> for SaveImageAction {
    fn category(&self) -> MenuCategory {
        MenuCategory::File
    }

    fn name(&self) -> &str {
        "Save image..."
    }

    fn can_execute(&self) -> bool {
        self.state.get()
    }

    fn subscribe(&self, listener: CanExecuteListener) {
        self.state.subscribe(listener);
    }

    fn execute(&mut self, ctx: &mut AppContext) -> ActionResult<()> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Save image")
            .set_directory(&ctx.settings.images_directory)
            .set_file_name(DEFAULT_IMAGE_NAME)
            .add_filter("Bitmap", &["bmp"])
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .save_file()
        else {
            debug!("Save dialog cancelled");
            return Ok(());
        };

        ctx.image_controller.save_image(&path)?;
        ctx.report_info(format!("Saved {}", path.display()));
        Ok(())
    }
}

pub struct SaveSettingsAction;

impl UiAction<AppContext> for SaveSettingsAction {
    fn category(&self) -> MenuCategory {
        MenuCategory::File
    }

    fn name(&self) -> &str {
        "Save settings"
    }

    fn execute(&mut self, ctx: &mut AppContext) -> ActionResult<()> {
        ctx.settings_manager.save(&ctx.settings)?;
        ctx.report_info("Settings saved");
        Ok(())
    }
}

pub struct ImageSettingsAction;

impl UiAction<AppContext> for ImageSettingsAction {
    fn category(&self) -> MenuCategory {
        MenuCategory::Settings
    }

    fn name(&self) -> &str {
        "Image..."
    }

    fn execute(&mut self, ctx: &mut AppContext) -> ActionResult<()> {
        ctx.open_dialog(SettingsForm::Image(ctx.settings.image_settings));
        Ok(())
    }
}

pub struct PaletteSettingsAction;

impl UiAction<AppContext> for PaletteSettingsAction {
    fn category(&self) -> MenuCategory {
        MenuCategory::Settings
    }

    fn name(&self) -> &str {
        "Palette..."
    }

    fn execute(&mut self, ctx: &mut AppContext) -> ActionResult<()> {
        ctx.open_dialog(SettingsForm::Palette(ctx.settings.palette));
        Ok(())
    }
}

/// Proposes random dragon settings; the painting happens once the dialog is confirmed
pub struct DragonFractalAction<R> {
    generator: DragonSettingsGenerator<R>,
}

impl<R: Rng> DragonFractalAction<R> {
    pub fn new(generator: DragonSettingsGenerator<R>) -> Self {
        Self { generator }
    }
}

impl<R: Rng> UiAction<AppContext> for DragonFractalAction<R> {
    fn category(&self) -> MenuCategory {
        MenuCategory::Fractals
    }

    fn name(&self) -> &str {
        "Dragon"
    }

    fn execute(&mut self, ctx: &mut AppContext) -> ActionResult<()> {
        ctx.open_dialog(SettingsForm::Dragon(self.generator.generate()));
        Ok(())
    }
}

pub struct KochFractalAction;

impl UiAction<AppContext> for KochFractalAction {
    fn category(&self) -> MenuCategory {
        MenuCategory::Fractals
    }

    fn name(&self) -> &str {
        "Koch curve"
    }

    fn execute(&mut self, ctx: &mut AppContext) -> ActionResult<()> {
        KochPainter::new(ctx.settings.palette).paint(&mut ctx.image_controller);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Status;
    use crate::context::tests::test_context;
    use fractal_painter::{
        ActionError, AppSettings, CanvasEvent, ImageSettings, Menu, SettingsManager,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_dragon_action_opens_dialog_with_generated_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());
        let mut action = DragonFractalAction::new(DragonSettingsGenerator::new(
            StdRng::seed_from_u64(3),
        ));

        action.execute(&mut ctx).unwrap();

        let expected = DragonSettingsGenerator::new(StdRng::seed_from_u64(3)).generate();
        assert_eq!(ctx.dialog, Some(SettingsForm::Dragon(expected)));
        assert_eq!(ctx.image_controller.revision(), 0);
    }

    #[test]
    fn test_settings_actions_open_current_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());

        ImageSettingsAction.execute(&mut ctx).unwrap();
        assert_eq!(ctx.dialog, Some(SettingsForm::Image(ImageSettings::new(64, 48))));

        PaletteSettingsAction.execute(&mut ctx).unwrap();
        assert_eq!(ctx.dialog, Some(SettingsForm::Palette(ctx.settings.palette)));
    }

    #[test]
    fn test_save_settings_action_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());

        SaveSettingsAction.execute(&mut ctx).unwrap();

        let reloaded = SettingsManager::in_directory(dir.path()).load();
        assert_eq!(reloaded, ctx.settings);
        assert_ne!(reloaded, AppSettings::default());
        assert_eq!(ctx.status, Some(Status::Info("Settings saved".to_string())));
    }

    #[test]
    fn test_save_image_enabled_after_paint_until_recreate() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());
        let can_save = CanExecuteState::new(false);
        let sink = can_save.clone();
        ctx.image_controller
            .subscribe(move |event| sink.set(event == CanvasEvent::Updated));

        let mut menu = Menu::new(vec![
            Box::new(SaveImageAction::new(can_save)) as Box<dyn UiAction<AppContext>>,
            Box::new(KochFractalAction),
        ]);
        let categories = menu.categories();
        let save = categories[0].1[0].0;
        let koch = categories[1].1[0].0;
        drop(categories);

        assert!(matches!(
            menu.execute(save, &mut ctx),
            Err(ActionError::Disabled(_))
        ));

        menu.execute(koch, &mut ctx).unwrap();
        assert!(menu.categories()[0].1[0].1.is_enabled());

        ctx.image_controller.recreate_image(&ImageSettings::new(10, 10));
        assert!(!menu.categories()[0].1[0].1.is_enabled());
    }
}
