//! Recording fakes shared by the painter tests

use crate::canvas::{DrawOp, DrawTarget, DrawingContext, ImageController, ImageSize};
use crate::error::CanvasError;
use crate::settings::ImageSettings;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Commit(Vec<DrawOp>),
    Update,
}

#[derive(Debug, Default)]
pub struct Journal {
    pub entries: Vec<Recorded>,
}

impl DrawTarget for Journal {
    fn commit(&mut self, ops: &[DrawOp]) {
        self.entries.push(Recorded::Commit(ops.to_vec()));
    }
}

/// Controller that records commits and update notifications in order
pub struct RecordingController {
    pub size: ImageSize,
    pub journal: Journal,
}

impl RecordingController {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: ImageSize::new(width, height),
            journal: Journal::default(),
        }
    }

    /// The ops of the only commit, panicking if the journal is not `[Commit, Update]`
    pub fn single_paint(&self) -> &[DrawOp] {
        match self.journal.entries.as_slice() {
            [Recorded::Commit(ops), Recorded::Update] => ops,
            other => panic!("expected one commit followed by one update, got {other:?}"),
        }
    }
}

impl ImageController for RecordingController {
    fn image_size(&self) -> ImageSize {
        self.size
    }

    fn recreate_image(&mut self, settings: &ImageSettings) {
        self.size = ImageSize::new(settings.width, settings.height);
    }

    fn drawing_context(&mut self) -> DrawingContext<'_> {
        DrawingContext::new(&mut self.journal)
    }

    fn update_ui(&mut self) {
        self.journal.entries.push(Recorded::Update);
    }

    fn save_image(&self, _path: &Path) -> Result<(), CanvasError> {
        Ok(())
    }
}
