use eframe::egui;

use crate::TransplantApp;

pub(crate) fn error_dialog(app: &mut TransplantApp, ctx: &egui::Context) {
    let Some(message) = app.error_message.clone() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(message).color(egui::Color32::LIGHT_RED));
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                app.clear_error_message();
            }
        });
}

pub(crate) fn conversion_progress(app: &mut TransplantApp, ctx: &egui::Context) {
    if !app.is_conversion_running() {
        return;
    }

    egui::Window::new("conversion_progress")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .frame(egui::Frame::popup(&ctx.style()))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Transplanting…");
                ui.add_space(8.0);
                ui.add(egui::Spinner::new());
                ui.add_space(8.0);
                let cancelling = app.is_cancelling();
                let label = if cancelling { "Cancelling…" } else { "Cancel" };
                if ui
                    .add_enabled(!cancelling, egui::Button::new(label))
                    .on_hover_text("Stop the converter process.")
                    .clicked()
                {
                    app.cancel_conversion();
                }
            });
        });
}

pub(crate) fn exit_confirmation(app: &mut TransplantApp, ctx: &egui::Context) {
    if app.show_exit_confirm {
        egui::Window::new("Confirm Exit")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                if app.is_conversion_running() {
                    ui.label("A conversion is still running and will be stopped.");
                }
                ui.label("Are you sure you want to exit?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let yes_clicked = ui.button("Yes").clicked();
                    let no_clicked = ui.button("No").clicked();

                    if yes_clicked {
                        app.show_exit_confirm = false;
                        app.exit(ctx);
                    } else if no_clicked {
                        app.show_exit_confirm = false;
                    }
                });
            });
    }
}
