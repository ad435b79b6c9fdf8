use thiserror::Error;

/// Rejected settings values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("image size must be between 1x1 and {max}x{max}, got {width}x{height}")]
    InvalidImageSize { width: u32, height: u32, max: u32 },

    #[error("iterations_count must be at most {max}, got {count}")]
    TooManyIterations { count: u32, max: u32 },

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage error for '{name}': {source}")]
    Storage {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] quick_xml::SeError),

    #[error("failed to parse settings: {0}")]
    Deserialize(#[from] quick_xml::DeError),

    #[error("malformed settings document: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },

    #[error("settings file is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("invalid settings: {0}")]
    Invalid(#[from] SettingsError),
}

#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("canvas is empty, nothing to save")]
    EmptyCanvas,

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Failure of a user-triggered action, surfaced at the action boundary
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("'{0}' is currently disabled")]
    Disabled(String),

    #[error("no menu item with index {0}")]
    UnknownItem(usize),

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type ActionResult<T> = Result<T, ActionError>;
