//! Canvas abstraction used by the painters
//!
//! Painters never touch pixels directly. They acquire a [`DrawingContext`]
//! from an [`ImageController`], queue draw operations on it, and the queued
//! batch is committed to the surface when the context is dropped. After the
//! context is released the painter calls [`ImageController::update_ui`] once.

use crate::error::CanvasError;
use crate::settings::{Color, ImageSettings};
use image::{DynamicImage, ImageFormat, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use log::{debug, info};
use std::path::Path;

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A single pixel at `point`
    pub fn pixel(point: PointF) -> Self {
        Self::new(point.x, point.y, 1.0, 1.0)
    }

    /// The whole canvas
    pub fn covering(size: ImageSize) -> Self {
        Self::new(0.0, 0.0, size.width as f32, size.height as f32)
    }

    /// Integer rect clipped to a `width` x `height` surface, `None` if nothing is left
    fn clip(&self, width: u32, height: u32) -> Option<Rect> {
        let coords = [self.x, self.y, self.width, self.height];
        if coords.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let left = self.x.floor().max(0.0);
        let top = self.y.floor().max(0.0);
        let right = (self.x + self.width).ceil().min(width as f32);
        let bottom = (self.y + self.height).ceil().min(height as f32);
        if right <= left || bottom <= top {
            return None;
        }

        Some(
            Rect::at(left as i32, top as i32)
                .of_size((right - left) as u32, (bottom - top) as u32),
        )
    }
}

/// A queued draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    FillRect { rect: RectF, color: Color },
    Line { from: PointF, to: PointF, color: Color },
}

/// Surface that accepts a committed batch of draw calls
pub trait DrawTarget {
    fn commit(&mut self, ops: &[DrawOp]);
}

impl DrawTarget for RgbaImage {
    fn commit(&mut self, ops: &[DrawOp]) {
        let (width, height) = self.dimensions();
        for op in ops {
            match *op {
                DrawOp::FillRect { rect, color } => {
                    if let Some(clipped) = rect.clip(width, height) {
                        draw_filled_rect_mut(self, clipped, color.into());
                    }
                }
                DrawOp::Line { from, to, color } => {
                    draw_line_segment_mut(self, (from.x, from.y), (to.x, to.y), color.into());
                }
            }
        }
    }
}

/// Scoped, batching handle to a surface
///
/// The batch is committed exactly once, in `Drop`, so the surface is also
/// flushed when a paint returns early or unwinds.
pub struct DrawingContext<'a> {
    target: &'a mut dyn DrawTarget,
    pending: Vec<DrawOp>,
}

impl<'a> DrawingContext<'a> {
    pub fn new(target: &'a mut dyn DrawTarget) -> Self {
        Self {
            target,
            pending: Vec::new(),
        }
    }

    pub fn fill_rectangle(&mut self, color: Color, rect: RectF) {
        self.pending.push(DrawOp::FillRect { rect, color });
    }

    pub fn draw_line(&mut self, color: Color, from: PointF, to: PointF) {
        self.pending.push(DrawOp::Line { from, to, color });
    }

    /// Number of queued, not yet committed, operations
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Drop for DrawingContext<'_> {
    fn drop(&mut self) {
        let ops = std::mem::take(&mut self.pending);
        self.target.commit(&ops);
    }
}

/// Owner of the drawable canvas
pub trait ImageController {
    fn image_size(&self) -> ImageSize;

    /// Replaces the canvas with a blank one sized by `settings`
    fn recreate_image(&mut self, settings: &ImageSettings);

    fn drawing_context(&mut self) -> DrawingContext<'_>;

    /// Tells the UI layer the canvas changed
    fn update_ui(&mut self);

    fn save_image(&self, path: &Path) -> Result<(), CanvasError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    /// A paint finished and the canvas holds new content
    Updated,
    /// The canvas was reallocated and is blank
    Recreated,
}

/// [`ImageController`] backed by an in-memory RGBA buffer
pub struct RasterImageController {
    canvas: RgbaImage,
    revision: u64,
    listeners: Vec<Box<dyn FnMut(CanvasEvent)>>,
}

impl RasterImageController {
    pub fn new(settings: &ImageSettings) -> Self {
        Self {
            canvas: RgbaImage::new(settings.width, settings.height),
            revision: 0,
            listeners: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Bumped on every update and recreate; the UI re-uploads when it changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, listener: impl FnMut(CanvasEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: CanvasEvent) {
        self.revision += 1;
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

impl ImageController for RasterImageController {
    fn image_size(&self) -> ImageSize {
        let (width, height) = self.canvas.dimensions();
        ImageSize::new(width, height)
    }

    fn recreate_image(&mut self, settings: &ImageSettings) {
        debug!("Recreating canvas at {}x{}", settings.width, settings.height);
        self.canvas = RgbaImage::new(settings.width, settings.height);
        self.notify(CanvasEvent::Recreated);
    }

    fn drawing_context(&mut self) -> DrawingContext<'_> {
        DrawingContext::new(&mut self.canvas)
    }

    fn update_ui(&mut self) {
        self.notify(CanvasEvent::Updated);
    }

    fn save_image(&self, path: &Path) -> Result<(), CanvasError> {
        if self.image_size().is_empty() {
            return Err(CanvasError::EmptyCanvas);
        }

        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Bmp);
        // Drop alpha so every raster format (JPEG included) accepts the buffer
        let rgb = DynamicImage::ImageRgba8(self.canvas.clone()).into_rgb8();
        rgb.save_with_format(path, format)?;
        info!("Saved image to {} as {:?}", path.display(), format);
        Ok(())
    }
}
