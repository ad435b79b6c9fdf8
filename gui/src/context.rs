use crate::dialogs::SettingsForm;
use fractal_painter::{
    AppSettings, DragonPainter, FileBlobStorage, ImageController, ImageSettings, Painter,
    RasterImageController, SettingsManager, XmlObjectSerializer,
};
use log::info;

pub type XmlSettingsManager = SettingsManager<XmlObjectSerializer, FileBlobStorage>;

/// Message shown in the banner above the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// State the menu actions operate on
pub struct AppContext {
    pub image_controller: RasterImageController,
    pub settings: AppSettings,
    pub settings_manager: XmlSettingsManager,
    /// Modal dialog currently on screen
    pub dialog: Option<SettingsForm>,
    pub status: Option<Status>,
    /// New canvas size the window still has to adopt
    pub resize_request: Option<ImageSettings>,
}

impl AppContext {
    pub fn new(
        settings: AppSettings,
        settings_manager: XmlSettingsManager,
        image_controller: RasterImageController,
    ) -> Self {
        Self {
            image_controller,
            settings,
            settings_manager,
            dialog: None,
            status: None,
            resize_request: None,
        }
    }

    pub fn open_dialog(&mut self, form: SettingsForm) {
        self.dialog = Some(form);
    }

    pub fn report_info(&mut self, message: impl Into<String>) {
        self.status = Some(Status::Info(message.into()));
    }

    pub fn report_error(&mut self, message: impl Into<String>) {
        self.status = Some(Status::Error(message.into()));
    }

    /// Commits a confirmed dialog
    pub fn apply_form(&mut self, form: SettingsForm) {
        match form {
            SettingsForm::Image(image_settings) => {
                info!(
                    "Image size set to {}x{}",
                    image_settings.width, image_settings.height
                );
                self.settings.image_settings = image_settings;
                self.image_controller.recreate_image(&image_settings);
                self.resize_request = Some(image_settings);
            }
            SettingsForm::Palette(palette) => {
                self.settings.palette = palette;
            }
            SettingsForm::Dragon(dragon_settings) => {
                self.settings.dragon_settings = dragon_settings;
                DragonPainter::new(dragon_settings, self.settings.palette, rand::rng())
                    .paint(&mut self.image_controller);
            }
        }
    }
}
