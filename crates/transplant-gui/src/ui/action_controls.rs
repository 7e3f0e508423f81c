use eframe::egui;

use crate::TransplantApp;

pub(crate) fn actions_section(app: &mut TransplantApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let spacing = ui.spacing().item_spacing.x;
        ui.spacing_mut().item_spacing.x = spacing.max(8.0);

        if ui
            .button("Open save folder")
            .on_hover_text("Show the game's save games folder in the file browser.")
            .clicked()
        {
            app.open_save_folder();
        }

        if ui
            .add_enabled(
                app.can_start_conversion(),
                egui::Button::new("Transplant"),
            )
            .on_hover_text("Run the converter's ia command on the selected saves.")
            .on_disabled_hover_text("Drop a source and a destination save first.")
            .clicked()
        {
            app.handle_conversion_request();
        }
    });
}
