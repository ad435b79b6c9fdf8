use crate::error::SettingsError;
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::path::PathBuf;

/// Opaque RGB color, stored as `r`/`g`/`b` attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    #[serde(rename = "@r")]
    pub r: u8,
    #[serde(rename = "@g")]
    pub g: u8,
    #[serde(rename = "@b")]
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Rgba([color.r, color.g, color.b, 255])
    }
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    #[serde(rename = "@width")]
    pub width: u32, // 1-4096, default 800
    #[serde(rename = "@height")]
    pub height: u32, // 1-4096, default 600
}

impl ImageSettings {
    pub const MAX_DIMENSION: u32 = 4096;

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let in_range = |v: u32| (1..=Self::MAX_DIMENSION).contains(&v);
        if !in_range(self.width) || !in_range(self.height) {
            return Err(SettingsError::InvalidImageSize {
                width: self.width,
                height: self.height,
                max: Self::MAX_DIMENSION,
            });
        }
        Ok(())
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Colors used by the painters
///
/// The palette is an ordered set of named colors; [`Palette::entries`]
/// exposes them in display order for the palette dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Palette {
    pub primary: Color,    // default yellow
    pub secondary: Color,  // default red
    pub background: Color, // default black
}

impl Palette {
    pub fn entries(&self) -> [(&'static str, Color); 3] {
        [
            ("Primary", self.primary),
            ("Secondary", self.secondary),
            ("Background", self.background),
        ]
    }

    pub fn entries_mut(&mut self) -> [(&'static str, &mut Color); 3] {
        [
            ("Primary", &mut self.primary),
            ("Secondary", &mut self.secondary),
            ("Background", &mut self.background),
        ]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::YELLOW,
            secondary: Color::RED,
            background: Color::BLACK,
        }
    }
}

/// Parameters of the two-map dragon IFS
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DragonSettings {
    /// Rotation of the first map, radians
    pub angle1: f64,
    /// Rotation of the second map, radians
    pub angle2: f64,
    /// Contraction shared by both maps
    pub scale: f64,
    /// Translation of the second map, in units of the canvas half-size
    pub shift_x: f64,
    pub shift_y: f64,
    pub iterations_count: u32,
}

impl DragonSettings {
    pub const MAX_ITERATIONS: u32 = 1_000_000;

    pub fn validate(&self) -> Result<(), SettingsError> {
        let floats = [
            ("angle1", self.angle1),
            ("angle2", self.angle2),
            ("scale", self.scale),
            ("shift_x", self.shift_x),
            ("shift_y", self.shift_y),
        ];
        if let Some((field, value)) = floats.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(SettingsError::NonFinite { field, value });
        }
        if self.iterations_count > Self::MAX_ITERATIONS {
            return Err(SettingsError::TooManyIterations {
                count: self.iterations_count,
                max: Self::MAX_ITERATIONS,
            });
        }
        Ok(())
    }
}

impl Default for DragonSettings {
    /// The Heighway dragon
    fn default() -> Self {
        Self {
            angle1: FRAC_PI_4,
            angle2: 3.0 * FRAC_PI_4,
            scale: FRAC_1_SQRT_2,
            shift_x: 1.0,
            shift_y: 0.0,
            iterations_count: 20_000,
        }
    }
}

/// Everything persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "AppSettings", rename_all = "PascalCase")]
pub struct AppSettings {
    /// Starting directory of the save dialog
    pub images_directory: PathBuf,
    pub image_settings: ImageSettings,
    pub palette: Palette,
    /// Last dragon parameters confirmed by the user
    pub dragon_settings: DragonSettings,
}

impl AppSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.image_settings.validate()?;
        self.dragon_settings.validate()
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            images_directory: PathBuf::from("."),
            image_settings: ImageSettings::default(),
            palette: Palette::default(),
            dragon_settings: DragonSettings::default(),
        }
    }
}
