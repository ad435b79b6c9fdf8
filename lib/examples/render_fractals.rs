/// Headless example: paint both fractals and save them next to the binary
///
/// Run with `RUST_LOG=debug` to see the painter summaries.
use fractal_painter::{
    DragonPainter, DragonSettingsGenerator, ImageController, ImageSettings, KochPainter, Painter,
    Palette, RasterImageController,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let image_settings = ImageSettings::new(800, 600);
    let palette = Palette::default();
    let mut controller = RasterImageController::new(&image_settings);

    // Fixed seed so repeated runs give the same picture
    let settings = DragonSettingsGenerator::new(StdRng::seed_from_u64(7)).generate();
    println!("Dragon settings: {settings:#?}");
    DragonPainter::new(settings, palette, StdRng::seed_from_u64(7)).paint(&mut controller);
    controller.save_image(Path::new("dragon.png"))?;
    println!("✓ Saved dragon.png");

    KochPainter::new(palette).paint(&mut controller);
    controller.save_image(Path::new("koch.png"))?;
    println!("✓ Saved koch.png");

    Ok(())
}
