use crate::canvas::{DrawingContext, ImageController, PointF, RectF};
use crate::painter::Painter;
use crate::settings::Palette;
use log::debug;
use std::f32::consts::FRAC_PI_3;

/// Koch curve along the bottom of the canvas
///
/// Each segment is split into four at a fixed recursion depth, with the
/// peak pointing up on screen. The outer pieces of a segment swap between
/// the primary and secondary colors while the peak keeps its parent's color.
pub struct KochPainter {
    palette: Palette,
    depth: u32,
}

impl KochPainter {
    pub const DEFAULT_DEPTH: u32 = 6;
    pub const MAX_DEPTH: u32 = 8;

    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            depth: Self::DEFAULT_DEPTH,
        }
    }

    /// Overrides the recursion depth, capped at [`Self::MAX_DEPTH`]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth.min(Self::MAX_DEPTH);
        self
    }

    fn draw_segment(
        &self,
        ctx: &mut DrawingContext<'_>,
        from: PointF,
        to: PointF,
        depth: u32,
        primary: bool,
    ) {
        if depth == 0 {
            let color = if primary {
                self.palette.primary
            } else {
                self.palette.secondary
            };
            ctx.draw_line(color, from, to);
            return;
        }

        let third = PointF::new((to.x - from.x) / 3.0, (to.y - from.y) / 3.0);
        let a = PointF::new(from.x + third.x, from.y + third.y);
        let b = PointF::new(from.x + 2.0 * third.x, from.y + 2.0 * third.y);
        // Screen y grows downwards, so a negative turn raises the peak
        let (sin, cos) = (-FRAC_PI_3).sin_cos();
        let peak = PointF::new(
            a.x + third.x * cos - third.y * sin,
            a.y + third.x * sin + third.y * cos,
        );

        self.draw_segment(ctx, from, a, depth - 1, !primary);
        self.draw_segment(ctx, a, peak, depth - 1, primary);
        self.draw_segment(ctx, peak, b, depth - 1, primary);
        self.draw_segment(ctx, b, to, depth - 1, !primary);
    }
}

impl Painter for KochPainter {
    fn paint(&mut self, image_controller: &mut dyn ImageController) {
        let image_size = image_controller.image_size();
        if image_size.is_empty() {
            debug!("Skipping Koch paint on an empty canvas");
            return;
        }

        let baseline = image_size.height as f32 * 0.9;
        {
            let mut ctx = image_controller.drawing_context();
            ctx.fill_rectangle(self.palette.background, RectF::covering(image_size));
            self.draw_segment(
                &mut ctx,
                PointF::new(0.0, baseline),
                PointF::new(image_size.width as f32, baseline),
                self.depth,
                true,
            );
        }

        image_controller.update_ui();
        debug!("Painted Koch curve at depth {}", self.depth);
    }
}
