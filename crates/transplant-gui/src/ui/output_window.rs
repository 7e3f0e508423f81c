use csav_transplant::presenter::OUTPUT_WINDOW_SIZE;
use csav_transplant::DismissAction;
use eframe::egui;

use crate::TransplantApp;

const BUTTON_ROW_HEIGHT: f32 = 40.0;

pub(crate) fn output_window(app: &mut TransplantApp, ctx: &egui::Context) {
    let Some(output) = app.output.as_ref() else {
        return;
    };
    let title = output.title;
    let body = output.body.clone();
    let dismiss = output.dismiss;

    let mut open = true;
    let mut chosen = None;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .default_size(OUTPUT_WINDOW_SIZE)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .open(&mut open)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .max_height(OUTPUT_WINDOW_SIZE[1] - BUTTON_ROW_HEIGHT)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    let mut text = body.as_str();
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .desired_width(f32::INFINITY)
                            .code_editor(),
                    );
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button(dismiss.button_label()).clicked() {
                    chosen = Some(dismiss);
                }
                if dismiss != DismissAction::ExitApp
                    && ui
                        .button("Exit")
                        .on_hover_text("Close the application.")
                        .clicked()
                {
                    chosen = Some(DismissAction::ExitApp);
                }
            });
        });

    if !open && chosen.is_none() {
        chosen = Some(DismissAction::CloseView);
    }

    if let Some(action) = chosen {
        app.dismiss_output(ctx, action);
    }
}
