use std::path::PathBuf;

use csav_transplant::drop::{self, SAVE_EXTENSION};
use csav_transplant::save_dir::{self, SaveDirError};
use csav_transplant::SlotKind;
use eframe::egui;

use crate::TransplantApp;

pub(crate) fn file_menu(app: &mut TransplantApp, ui: &mut egui::Ui) {
    ui.menu_button("File", |ui| {
        file_menu_contents(app, ui, None);
    });
}

fn file_menu_contents(
    app: &mut TransplantApp,
    ui: &mut egui::Ui,
    mut recorder: Option<&mut dyn FileMenuRecorder>,
) {
    let conversion_running = app.is_conversion_running();

    let source_response = ui.add_enabled(
        !conversion_running,
        egui::Button::new("Select source save..."),
    );
    if let Some(recorder) = recorder.as_mut() {
        recorder.record(FileMenuItem::SelectSource, source_response.enabled());
    }
    if source_response.clicked() {
        app.browse_slot(SlotKind::Source);
        ui.close_menu();
    }

    let destination_response = ui.add_enabled(
        !conversion_running,
        egui::Button::new("Select destination save..."),
    );
    if let Some(recorder) = recorder.as_mut() {
        recorder.record(
            FileMenuItem::SelectDestination,
            destination_response.enabled(),
        );
    }
    if destination_response.clicked() {
        app.browse_slot(SlotKind::Destination);
        ui.close_menu();
    }

    let transplant_response = ui
        .add_enabled(app.can_start_conversion(), egui::Button::new("Transplant"))
        .on_hover_text("Run the converter on the selected saves.");
    if let Some(recorder) = recorder.as_mut() {
        recorder.record(FileMenuItem::Transplant, transplant_response.enabled());
    }
    if transplant_response.clicked() {
        app.handle_conversion_request();
        ui.close_menu();
    }

    if ui.button("Open save folder").clicked() {
        app.open_save_folder();
        ui.close_menu();
    }

    ui.separator();

    if ui.button("Exit").clicked() {
        app.show_exit_confirm = true;
        ui.close_menu();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum FileMenuItem {
    SelectSource,
    SelectDestination,
    Transplant,
}

trait FileMenuRecorder {
    fn record(&mut self, item: FileMenuItem, enabled: bool);
}

impl TransplantApp {
    pub(crate) fn browse_slot(&mut self, kind: SlotKind) {
        let mut dialog = rfd::FileDialog::new()
            .set_title(format!("Select {} save", kind.label()))
            .add_filter("CSAV save", &[SAVE_EXTENSION]);
        if let Some(dir) = self.save_dir().filter(|dir| dir.is_dir()) {
            dialog = dialog.set_directory(dir);
        }

        let Some(path) = dialog.pick_file() else {
            return;
        };
        self.handle_picked_file(kind, path);
    }

    pub(crate) fn handle_picked_file(&mut self, kind: SlotKind, path: PathBuf) {
        let picked = [path];
        if !drop::validate(&picked).is_accept() {
            self.set_error_message(format!(
                "{} is not an existing .{SAVE_EXTENSION} save.",
                picked[0].display()
            ));
            return;
        }
        self.handle_drop(kind, &picked);
    }

    pub(crate) fn open_save_folder(&mut self) {
        let result = match self.save_dir() {
            Some(dir) => save_dir::open_in_file_browser(dir),
            None => Err(SaveDirError::NotFound {
                path: PathBuf::new(),
            }),
        };

        if let Err(err) = result {
            self.set_error_message(err.to_string());
        }
    }
}
