use eframe::egui;
use fractal_painter::{Color, DragonSettings, ImageSettings, Palette};
use std::f64::consts::TAU;

/// Working copy of the settings a modal dialog edits
///
/// The copy is committed by [`crate::context::AppContext::apply_form`] when
/// the user confirms and dropped when they cancel.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsForm {
    Image(ImageSettings),
    Palette(Palette),
    Dragon(DragonSettings),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Open,
    Confirmed,
    Cancelled,
}

impl SettingsForm {
    pub fn title(&self) -> &'static str {
        match self {
            SettingsForm::Image(_) => "Image",
            SettingsForm::Palette(_) => "Palette",
            SettingsForm::Dragon(_) => "Dragon",
        }
    }

    pub fn validation_error(&self) -> Option<String> {
        let result = match self {
            SettingsForm::Image(settings) => settings.validate(),
            SettingsForm::Palette(_) => Ok(()),
            SettingsForm::Dragon(settings) => settings.validate(),
        };
        result.err().map(|e| e.to_string())
    }

    fn render_fields(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("settings_form")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| match self {
                SettingsForm::Image(settings) => render_image_fields(ui, settings),
                SettingsForm::Palette(palette) => render_palette_fields(ui, palette),
                SettingsForm::Dragon(settings) => render_dragon_fields(ui, settings),
            });
    }
}

fn render_image_fields(ui: &mut egui::Ui, settings: &mut ImageSettings) {
    let range = 1..=ImageSettings::MAX_DIMENSION;

    ui.label("Width");
    ui.add(egui::DragValue::new(&mut settings.width).range(range.clone()).suffix(" px"));
    ui.end_row();

    ui.label("Height");
    ui.add(egui::DragValue::new(&mut settings.height).range(range).suffix(" px"));
    ui.end_row();
}

fn render_palette_fields(ui: &mut egui::Ui, palette: &mut Palette) {
    for (name, color) in palette.entries_mut() {
        ui.label(name);
        let mut rgb = color.to_array();
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            *color = Color::from(rgb);
        }
        ui.end_row();
    }
}

fn render_dragon_fields(ui: &mut egui::Ui, settings: &mut DragonSettings) {
    ui.label("Angle 1");
    ui.add(egui::Slider::new(&mut settings.angle1, 0.0..=TAU).suffix(" rad"))
        .on_hover_text("Rotation of the first map");
    ui.end_row();

    ui.label("Angle 2");
    ui.add(egui::Slider::new(&mut settings.angle2, 0.0..=TAU).suffix(" rad"))
        .on_hover_text("Rotation of the second map");
    ui.end_row();

    ui.label("Scale");
    ui.add(egui::Slider::new(&mut settings.scale, 0.0..=1.0))
        .on_hover_text("Contraction shared by both maps");
    ui.end_row();

    ui.label("Shift X");
    ui.add(egui::Slider::new(&mut settings.shift_x, -1.0..=1.0));
    ui.end_row();

    ui.label("Shift Y");
    ui.add(egui::Slider::new(&mut settings.shift_y, -1.0..=1.0));
    ui.end_row();

    ui.label("Iterations");
    ui.add(
        egui::DragValue::new(&mut settings.iterations_count)
            .range(0..=DragonSettings::MAX_ITERATIONS)
            .speed(100),
    );
    ui.end_row();

    ui.label("");
    if ui.button("Classic dragon").clicked() {
        *settings = DragonSettings::default();
    }
    ui.end_row();
}

/// Shows `form` as a modal dialog for one frame
pub fn show(ctx: &egui::Context, form: &mut SettingsForm) -> DialogOutcome {
    let response = egui::Modal::new(egui::Id::new("settings_dialog")).show(ctx, |ui| {
        ui.heading(form.title());
        ui.separator();
        form.render_fields(ui);
        ui.add_space(8.0);

        let error = form.validation_error();
        if let Some(message) = &error {
            ui.colored_label(egui::Color32::RED, message);
        }

        let mut outcome = DialogOutcome::Open;
        ui.horizontal(|ui| {
            if ui.add_enabled(error.is_none(), egui::Button::new("OK")).clicked() {
                outcome = DialogOutcome::Confirmed;
            }
            if ui.button("Cancel").clicked() {
                outcome = DialogOutcome::Cancelled;
            }
        });
        outcome
    });

    if response.inner == DialogOutcome::Open && response.should_close() {
        DialogOutcome::Cancelled
    } else {
        response.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(SettingsForm::Image(ImageSettings::default()).title(), "Image");
        assert_eq!(SettingsForm::Palette(Palette::default()).title(), "Palette");
        assert_eq!(SettingsForm::Dragon(DragonSettings::default()).title(), "Dragon");
    }

    #[test]
    fn test_validation_error_blocks_invalid_forms() {
        assert!(SettingsForm::Image(ImageSettings::new(640, 480)).validation_error().is_none());
        assert!(SettingsForm::Image(ImageSettings::new(0, 480)).validation_error().is_some());

        let dragon = DragonSettings {
            angle1: f64::INFINITY,
            ..DragonSettings::default()
        };
        assert!(SettingsForm::Dragon(dragon).validation_error().is_some());
    }
}
