use crate::canvas::{ImageController, PointF, RectF};
use crate::painter::Painter;
use crate::settings::{DragonSettings, Palette};
use log::debug;
use rand::Rng;

/// Renders the attractor of a two-map iterated function system
///
/// Starting at the origin, each step applies one of two maps chosen by a coin
/// flip and plots the resulting point relative to the canvas center:
/// - map A: `p' = scale * R(angle1) * p`
/// - map B: `p' = scale * R(angle2) * p + shift`
///
/// The random source is injected so a seeded generator gives a reproducible
/// picture.
pub struct DragonPainter<R> {
    settings: DragonSettings,
    palette: Palette,
    rng: R,
}

/// Rotation by a fixed angle followed by uniform scaling
#[derive(Debug, Clone, Copy)]
struct Similarity {
    cos: f32,
    sin: f32,
    scale: f32,
}

impl Similarity {
    fn new(angle: f64, scale: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            cos: cos as f32,
            sin: sin as f32,
            scale: scale as f32,
        }
    }

    fn apply(&self, p: PointF) -> PointF {
        PointF::new(
            self.scale * (p.x * self.cos - p.y * self.sin),
            self.scale * (p.x * self.sin + p.y * self.cos),
        )
    }
}

impl<R: Rng> DragonPainter<R> {
    pub fn new(settings: DragonSettings, palette: Palette, rng: R) -> Self {
        Self {
            settings,
            palette,
            rng,
        }
    }
}

impl<R: Rng> Painter for DragonPainter<R> {
    fn paint(&mut self, image_controller: &mut dyn ImageController) {
        let image_size = image_controller.image_size();
        if image_size.is_empty() {
            debug!("Skipping dragon paint on an empty canvas");
            return;
        }

        let size = image_size.width.min(image_size.height) as f32 / 2.1;
        let center = PointF::new(image_size.width as f32 / 2.0, image_size.height as f32 / 2.0);
        let shift = PointF::new(
            self.settings.shift_x as f32 * size * 0.8,
            self.settings.shift_y as f32 * size * 0.8,
        );
        let first = Similarity::new(self.settings.angle1, self.settings.scale);
        let second = Similarity::new(self.settings.angle2, self.settings.scale);

        {
            let mut ctx = image_controller.drawing_context();
            ctx.fill_rectangle(self.palette.background, RectF::covering(image_size));

            let mut p = PointF::new(0.0, 0.0);
            for _ in 0..self.settings.iterations_count {
                p = if self.rng.random_bool(0.5) {
                    first.apply(p)
                } else {
                    let q = second.apply(p);
                    PointF::new(q.x + shift.x, q.y + shift.y)
                };
                ctx.fill_rectangle(
                    self.palette.primary,
                    RectF::pixel(PointF::new(center.x + p.x, center.y + p.y)),
                );
            }
        }

        image_controller.update_ui();
        debug!(
            "Painted dragon: {} points on {}x{}",
            self.settings.iterations_count, image_size.width, image_size.height
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RasterImageController};
    use crate::settings::ImageSettings;
    use crate::test_support::RecordingController;
    use image::Rgba;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn painter(iterations_count: u32, seed: u64) -> DragonPainter<StdRng> {
        let settings = DragonSettings {
            iterations_count,
            ..DragonSettings::default()
        };
        DragonPainter::new(settings, Palette::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_zero_iterations_only_clears() {
        let mut controller = RecordingController::new(80, 60);
        painter(0, 1).paint(&mut controller);

        let ops = controller.single_paint();
        assert_eq!(
            ops,
            [DrawOp::FillRect {
                rect: RectF::new(0.0, 0.0, 80.0, 60.0),
                color: Palette::default().background,
            }]
        );
    }

    #[test]
    fn test_n_iterations_plot_n_pixels_after_clear() {
        let mut controller = RecordingController::new(200, 100);
        painter(1500, 3).paint(&mut controller);

        let ops = controller.single_paint();
        assert_eq!(ops.len(), 1501);
        assert!(matches!(
            ops[0],
            DrawOp::FillRect { color, .. } if color == Palette::default().background
        ));
        for op in &ops[1..] {
            match op {
                DrawOp::FillRect { rect, color } => {
                    assert_eq!(*color, Palette::default().primary);
                    assert_eq!((rect.width, rect.height), (1.0, 1.0));
                }
                other => panic!("unexpected op {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_canvas_is_skipped() {
        let mut controller = RecordingController::new(0, 100);
        painter(100, 1).paint(&mut controller);
        assert!(controller.journal.entries.is_empty());
    }

    #[test]
    fn test_same_seed_same_points() {
        let mut a = RecordingController::new(120, 120);
        let mut b = RecordingController::new(120, 120);
        painter(300, 99).paint(&mut a);
        painter(300, 99).paint(&mut b);
        assert_eq!(a.single_paint(), b.single_paint());
    }

    #[test]
    fn test_zero_shift_stays_at_center() {
        // Without a shift both maps fix the origin
        let settings = DragonSettings {
            shift_x: 0.0,
            shift_y: 0.0,
            iterations_count: 10,
            ..DragonSettings::default()
        };
        let mut controller = RecordingController::new(100, 100);
        DragonPainter::new(settings, Palette::default(), StdRng::seed_from_u64(5))
            .paint(&mut controller);

        for op in &controller.single_paint()[1..] {
            if let DrawOp::FillRect { rect, .. } = op {
                assert_eq!((rect.x, rect.y), (50.0, 50.0));
            }
        }
    }

    #[test]
    fn test_paints_onto_raster_canvas() {
        let mut controller = RasterImageController::new(&ImageSettings::new(200, 150));
        painter(5000, 11).paint(&mut controller);

        let yellow = Rgba([255, 255, 0, 255]);
        let black = Rgba([0, 0, 0, 255]);
        let canvas = controller.canvas();
        assert!(canvas.pixels().any(|p| *p == yellow));
        assert!(canvas.pixels().all(|p| *p == yellow || *p == black));
        assert_eq!(controller.revision(), 1);
    }
}
