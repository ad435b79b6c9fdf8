use crate::context::{AppContext, Status};
use crate::dialogs::{self, DialogOutcome};
use eframe::egui;
use fractal_painter::{Menu, MenuItemId};
use log::error;

/// Height reserved for the menu bar above the canvas
pub const MENU_SIZE: f32 = 32.0;

/// Main window: a menu bar over a single canvas
pub struct FractalPainterApp {
    context: AppContext,
    menu: Menu<AppContext>,

    /// Texture handle for the canvas display
    texture: Option<egui::TextureHandle>,
    /// Controller revision the texture was last uploaded from
    shown_revision: Option<u64>,
}

impl FractalPainterApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        context: AppContext,
        menu: Menu<AppContext>,
    ) -> Self {
        Self {
            context,
            menu,
            texture: None,
            shown_revision: None,
        }
    }

    /// Runs a menu action, turning any failure into a status message
    fn run_action(&mut self, id: MenuItemId) {
        if let Err(e) = self.menu.execute(id, &mut self.context) {
            error!("Action failed: {e}");
            self.context.report_error(e.to_string());
        }
    }

    /// Render the menu bar, returning the clicked item
    fn render_menu(&self, ui: &mut egui::Ui) -> Option<MenuItemId> {
        let mut clicked = None;

        egui::MenuBar::new().ui(ui, |ui| {
            for (category, items) in self.menu.categories() {
                ui.menu_button(category.title(), |ui| {
                    for (id, item) in items {
                        if ui
                            .add_enabled(item.is_enabled(), egui::Button::new(item.name()))
                            .clicked()
                        {
                            clicked = Some(id);
                            ui.close();
                        }
                    }
                });
            }
        });

        clicked
    }

    /// Re-upload the canvas when the controller reports new content
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let controller = &self.context.image_controller;
        let revision = controller.revision();
        if self.shown_revision == Some(revision) {
            return;
        }

        let canvas = controller.canvas();
        let (width, height) = canvas.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            canvas.as_raw(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(color_image, egui::TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ctx.load_texture("canvas", color_image, egui::TextureOptions::NEAREST));
            }
        }
        self.shown_revision = Some(revision);
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        let Some(status) = &self.context.status else {
            return;
        };

        let mut dismissed = false;
        ui.horizontal(|ui| {
            match status {
                Status::Info(msg) => ui.label(msg),
                Status::Error(msg) => ui.colored_label(egui::Color32::RED, msg),
            };
            dismissed = ui.small_button("✕").clicked();
        });
        if dismissed {
            self.context.status = None;
        }
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let outcome = match self.context.dialog.as_mut() {
            Some(form) => dialogs::show(ctx, form),
            None => return,
        };

        match outcome {
            DialogOutcome::Open => {}
            DialogOutcome::Cancelled => self.context.dialog = None,
            DialogOutcome::Confirmed => {
                if let Some(form) = self.context.dialog.take() {
                    self.context.apply_form(form);
                }
            }
        }
    }
}

impl eframe::App for FractalPainterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        let clicked = egui::TopBottomPanel::top("menu_bar")
            .exact_height(MENU_SIZE)
            .show(ctx, |ui| self.render_menu(ui))
            .inner;
        if let Some(id) = clicked {
            self.run_action(id);
        }

        self.render_dialog(ctx);

        if let Some(image_settings) = self.context.resize_request.take() {
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                image_settings.width as f32,
                image_settings.height as f32 + MENU_SIZE,
            )));
        }

        self.sync_texture(ctx);

        // Central panel: canvas
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.render_status(ui);
                if let Some(texture) = &self.texture {
                    ui.image((texture.id(), texture.size_vec2()));
                }
            });
    }
}
