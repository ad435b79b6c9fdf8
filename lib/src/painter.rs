use crate::canvas::ImageController;

/// Draws a complete picture onto the controller's canvas
///
/// Implementations clear the canvas, queue their draw calls on a single
/// drawing context and fire exactly one [`ImageController::update_ui`] after
/// the context is released. A zero-sized canvas is left untouched.
pub trait Painter {
    fn paint(&mut self, image_controller: &mut dyn ImageController);
}
