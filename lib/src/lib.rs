//! Fractal Painter - dragon and Koch curve rendering
//!
//! This library holds everything below the GUI: settings and their XML
//! persistence, the random dragon parameter generator, the batching canvas
//! controller, the painters, and the menu action model.
//!
//! # Example
//! ```no_run
//! use fractal_painter::{
//!     DragonPainter, DragonSettings, ImageController, ImageSettings, Painter, Palette,
//!     RasterImageController,
//! };
//!
//! let mut controller = RasterImageController::new(&ImageSettings::new(800, 600));
//! let mut painter = DragonPainter::new(DragonSettings::default(), Palette::default(), rand::rng());
//! painter.paint(&mut controller);
//! controller.save_image(std::path::Path::new("dragon.png")).unwrap();
//! ```

pub mod actions;
pub mod canvas;
pub mod dragon;
pub mod error;
pub mod generator;
pub mod koch;
pub mod painter;
pub mod persistence;
pub mod settings;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use actions::{CanExecuteState, Menu, MenuCategory, MenuItemId, UiAction};
pub use canvas::{CanvasEvent, DrawingContext, ImageController, ImageSize, RasterImageController};
pub use dragon::DragonPainter;
pub use error::{ActionError, ActionResult, CanvasError, PersistenceError, SettingsError};
pub use generator::DragonSettingsGenerator;
pub use koch::KochPainter;
pub use painter::Painter;
pub use persistence::{
    BlobStorage, FileBlobStorage, ObjectSerializer, SettingsManager, XmlObjectSerializer,
};
pub use settings::{AppSettings, Color, DragonSettings, ImageSettings, Palette};
