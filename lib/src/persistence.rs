//! Loading and saving [`AppSettings`]
//!
//! A [`SettingsManager`] combines an [`ObjectSerializer`] (how settings turn
//! into bytes) with a [`BlobStorage`] (where the bytes live). The shipped pair
//! is [`XmlObjectSerializer`] + [`FileBlobStorage`], which produces an
//! `app.settings` XML document in the working directory:
//!
//! ```xml
//! <AppSettings>
//!   <ImagesDirectory>.</ImagesDirectory>
//!   <ImageSettings width="800" height="600"/>
//!   <Palette>
//!     <Primary r="255" g="255" b="0"/>
//!     ...
//!   </Palette>
//!   <DragonSettings><Angle1>0.785...</Angle1>...</DragonSettings>
//! </AppSettings>
//! ```

use crate::error::PersistenceError;
use crate::settings::AppSettings;
use log::{debug, info, warn};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILENAME: &str = "app.settings";
pub const SETTINGS_ROOT: &str = "AppSettings";

/// Turns values into documents whose top-level element is named `root`
pub trait ObjectSerializer {
    fn serialize<T: Serialize>(&self, value: &T, root: &str)
    -> Result<Vec<u8>, PersistenceError>;

    /// Fails when the document's top-level element is not `root`
    fn deserialize<T: DeserializeOwned>(
        &self,
        bytes: &[u8],
        root: &str,
    ) -> Result<T, PersistenceError>;
}

/// Named byte sequences on some storage medium
pub trait BlobStorage {
    /// `Ok(None)` when no blob with that name exists
    fn get(&self, name: &str) -> Result<Option<Vec<u8>>, PersistenceError>;
    fn set(&self, name: &str, content: &[u8]) -> Result<(), PersistenceError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlObjectSerializer;

impl XmlObjectSerializer {
    /// Name of the first element in `text`, `None` for a document without one
    fn root_element(text: &str) -> Result<Option<String>, PersistenceError> {
        let mut reader = Reader::from_str(text);
        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) => {
                    return Ok(Some(String::from_utf8_lossy(e.name().as_ref()).into_owned()));
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }
}

impl ObjectSerializer for XmlObjectSerializer {
    fn serialize<T: Serialize>(
        &self,
        value: &T,
        root: &str,
    ) -> Result<Vec<u8>, PersistenceError> {
        Ok(quick_xml::se::to_string_with_root(root, value)?.into_bytes())
    }

    fn deserialize<T: DeserializeOwned>(
        &self,
        bytes: &[u8],
        root: &str,
    ) -> Result<T, PersistenceError> {
        let text = String::from_utf8(bytes.to_vec())?;
        match Self::root_element(&text)? {
            Some(found) if found != root => {
                return Err(PersistenceError::UnexpectedRoot {
                    expected: root.to_string(),
                    found,
                });
            }
            _ => {}
        }
        Ok(quick_xml::de::from_str(&text)?)
    }
}

/// Blobs stored as files in a base directory
#[derive(Debug, Clone)]
pub struct FileBlobStorage {
    base_dir: PathBuf,
}

impl FileBlobStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }
}

impl Default for FileBlobStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl BlobStorage for FileBlobStorage {
    fn get(&self, name: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        match fs::read(self.path_of(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Storage {
                name: name.to_string(),
                source,
            }),
        }
    }

    fn set(&self, name: &str, content: &[u8]) -> Result<(), PersistenceError> {
        let storage_error = |source: std::io::Error| PersistenceError::Storage {
            name: name.to_string(),
            source,
        };
        let path = self.path_of(name);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(storage_error)?;
        }
        fs::write(&path, content).map_err(storage_error)
    }
}

pub struct SettingsManager<S, B> {
    serializer: S,
    storage: B,
    settings_filename: String,
}

impl<S: ObjectSerializer, B: BlobStorage> SettingsManager<S, B> {
    pub fn new(serializer: S, storage: B) -> Self {
        Self {
            serializer,
            storage,
            settings_filename: SETTINGS_FILENAME.to_string(),
        }
    }

    pub fn with_filename(mut self, name: impl Into<String>) -> Self {
        self.settings_filename = name.into();
        self
    }

    /// Reads the stored settings, `Ok(None)` if nothing has been saved yet
    ///
    /// Fields missing from the document take their default values. A document
    /// with another root element, or one that fails validation, is an error.
    pub fn try_load(&self) -> Result<Option<AppSettings>, PersistenceError> {
        let Some(bytes) = self.storage.get(&self.settings_filename)? else {
            debug!("No '{}' found", self.settings_filename);
            return Ok(None);
        };
        let settings: AppSettings = self.serializer.deserialize(&bytes, SETTINGS_ROOT)?;
        settings.validate()?;
        Ok(Some(settings))
    }

    /// Reads the stored settings, falling back to defaults on any failure
    pub fn load(&self) -> AppSettings {
        match self.try_load() {
            Ok(Some(settings)) => settings,
            Ok(None) => AppSettings::default(),
            Err(e) => {
                warn!("Using default settings: {e}");
                AppSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &AppSettings) -> Result<(), PersistenceError> {
        let bytes = self.serializer.serialize(settings, SETTINGS_ROOT)?;
        self.storage.set(&self.settings_filename, &bytes)?;
        info!("Saved settings to '{}'", self.settings_filename);
        Ok(())
    }

    pub fn storage(&self) -> &B {
        &self.storage
    }
}

impl SettingsManager<XmlObjectSerializer, FileBlobStorage> {
    /// XML settings file inside `dir`
    pub fn in_directory(dir: &Path) -> Self {
        Self::new(XmlObjectSerializer, FileBlobStorage::new(dir))
    }
}
