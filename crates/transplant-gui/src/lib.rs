use std::path::{Path, PathBuf};

use csav_transplant::{
    present, ConversionJob, ConverterInvoker, DismissAction, DropDecision, DropOutcome,
    InvocationError, Phase, PresentedOutput, SlotKind, Startup, Workflow,
};
use eframe::egui;

pub mod ui;

pub use ui::{action_controls, dialogs, drop_zones, file_picker, output_window};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DropHover {
    pub(crate) slot: Option<SlotKind>,
    pub(crate) decision: DropDecision,
}

pub struct TransplantApp {
    pub(crate) workflow: Workflow,
    pub(crate) status: String,
    pub(crate) error_message: Option<String>,
    pub(crate) output: Option<PresentedOutput>,
    pub(crate) show_exit_confirm: bool,
    pub(crate) drop_zones: Vec<(SlotKind, egui::Rect)>,
    pub(crate) drop_hover: Option<DropHover>,
    invoker: ConverterInvoker,
    save_dir: Option<PathBuf>,
    dismiss_action: DismissAction,
    conversion_job: Option<ConversionJob>,
}

impl TransplantApp {
    pub fn new(cc: &eframe::CreationContext<'_>, startup: Startup) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self::from_startup(startup)
    }

    pub fn from_startup(startup: Startup) -> Self {
        let Startup { settings, invoker } = startup;
        Self {
            workflow: Workflow::new(),
            status: String::new(),
            error_message: None,
            output: None,
            show_exit_confirm: false,
            drop_zones: Vec::new(),
            drop_hover: None,
            save_dir: settings.save_dir(),
            dismiss_action: settings.dismiss_action(),
            invoker,
            conversion_job: None,
        }
    }

    pub(crate) fn set_error_message<M>(&mut self, message: M)
    where
        M: Into<String>,
    {
        self.error_message = Some(message.into());
        self.status.clear();
    }

    pub(crate) fn clear_error_message(&mut self) {
        self.error_message = None;
    }

    pub(crate) fn save_dir(&self) -> Option<&Path> {
        self.save_dir.as_deref()
    }

    pub(crate) fn handle_drop(&mut self, slot: SlotKind, paths: &[PathBuf]) {
        match self.workflow.drop_paths(slot, paths) {
            DropOutcome::Assigned => {
                self.clear_error_message();
                self.status = if self.workflow.pair().is_ready() {
                    "Ready to transplant.".to_string()
                } else {
                    format!("{} save selected.", slot.heading())
                };
            }
            DropOutcome::Rejected => {}
            DropOutcome::Duplicate(err) => self.set_error_message(err.to_string()),
        }
    }

    pub(crate) fn is_conversion_running(&self) -> bool {
        self.conversion_job.is_some()
    }

    pub(crate) fn can_start_conversion(&self) -> bool {
        !self.is_conversion_running() && self.workflow.can_convert()
    }

    pub(crate) fn handle_conversion_request(&mut self) {
        if self.is_conversion_running() {
            return;
        }

        let Some(request) = self.workflow.begin_conversion() else {
            return;
        };

        self.status = "Converting…".to_string();
        self.clear_error_message();
        self.conversion_job = Some(self.invoker.spawn(request));
    }

    pub(crate) fn cancel_conversion(&mut self) {
        if let Some(job) = &self.conversion_job {
            job.cancel();
            self.status = "Cancelling…".to_string();
        }
    }

    pub(crate) fn is_cancelling(&self) -> bool {
        self.conversion_job
            .as_ref()
            .map(ConversionJob::is_cancelling)
            .unwrap_or(false)
    }

    pub(crate) fn poll_conversion_job(&mut self) {
        let Some(job) = self.conversion_job.as_mut() else {
            return;
        };
        let Some(outcome) = job.poll() else {
            return;
        };
        self.conversion_job = None;
        self.workflow.finish_conversion(&outcome);

        match outcome {
            Ok(result) => {
                self.status = "Conversion finished.".to_string();
                self.output = Some(present(result, self.dismiss_action));
            }
            Err(InvocationError::Cancelled) => {
                self.status = "Conversion cancelled.".to_string();
            }
            Err(err) => {
                let message = format_invocation_error(&err);
                self.set_error_message(message);
            }
        }
    }

    pub(crate) fn dismiss_output(&mut self, ctx: &egui::Context, action: DismissAction) {
        self.output = None;
        self.workflow.dismiss(action);
        if self.workflow.phase() == Phase::Terminated {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        } else {
            self.status = "Ready to transplant.".to_string();
        }
    }

    pub(crate) fn exit(&mut self, ctx: &egui::Context) {
        self.cancel_conversion();
        self.workflow.terminate();
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl Drop for TransplantApp {
    fn drop(&mut self) {
        if let Some(job) = &self.conversion_job {
            job.cancel();
        }
    }
}

pub(crate) fn format_invocation_error(err: &InvocationError) -> String {
    match err {
        InvocationError::LaunchFailure { source, .. } => format!("Error: {source}"),
        InvocationError::InputMissing { path } => format!(
            "{} no longer exists. Drop the save again before transplanting.",
            path.display()
        ),
        InvocationError::Wait(source) => format!("Error: {source}"),
        InvocationError::Cancelled => "Conversion cancelled.".to_string(),
    }
}

impl eframe::App for TransplantApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_conversion_job();
        if self.is_conversion_running() {
            ctx.request_repaint();
        }

        ui::drop_zones::track_file_drag(self, ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui::file_picker::file_menu(self, ui);
            });
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            let status = if self.status.is_empty() {
                "Drop a source and a destination save."
            } else {
                self.status.as_str()
            };
            ui.small(status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::centered_column(ui, 480.0, |ui| {
                ui::drop_zones::drop_zones_section(self, ui);
                ui.add_space(12.0);
                ui::action_controls::actions_section(self, ui);
            });
        });

        ui::dialogs::conversion_progress(self, ctx);
        ui::output_window::output_window(self, ctx);
        ui::dialogs::error_dialog(self, ctx);
        ui::dialogs::exit_confirmation(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csav_transplant::{ConverterConfig, Settings};
    use std::fs;
    use std::time::{Duration, Instant};
    use tempfile::tempdir;

    pub(crate) fn app_with_converter(converter: PathBuf) -> TransplantApp {
        TransplantApp::from_startup(Startup {
            settings: Settings::default(),
            invoker: ConverterInvoker::new(ConverterConfig::new(converter)),
        })
    }

    fn save(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"csav").expect("write save");
        path
    }

    #[test]
    fn duplicate_drop_raises_an_error_dialog() {
        let dir = tempdir().expect("temp dir");
        let a = save(dir.path(), "a.csav");
        let mut app = app_with_converter(dir.path().join("davst"));

        app.handle_drop(SlotKind::Source, &[a.clone()]);
        assert!(app.error_message.is_none());
        app.handle_drop(SlotKind::Destination, &[a]);

        assert_eq!(
            app.error_message.as_deref(),
            Some("The source and destination paths can't be the same.")
        );
        assert!(app.workflow.pair().destination().is_empty());
        assert!(!app.can_start_conversion());
    }

    #[test]
    fn rejected_drop_is_silent() {
        let dir = tempdir().expect("temp dir");
        let txt = save(dir.path(), "notes.txt");
        let mut app = app_with_converter(dir.path().join("davst"));

        app.handle_drop(SlotKind::Source, &[txt]);
        assert!(app.error_message.is_none());
        assert!(app.status.is_empty());
        assert!(app.workflow.pair().source().is_empty());
    }

    #[test]
    fn conversion_request_is_ignored_until_ready() {
        let dir = tempdir().expect("temp dir");
        let a = save(dir.path(), "a.csav");
        let mut app = app_with_converter(dir.path().join("davst"));

        app.handle_conversion_request();
        assert!(!app.is_conversion_running());

        app.handle_drop(SlotKind::Source, &[a]);
        app.handle_conversion_request();
        assert!(!app.is_conversion_running());
    }

    #[test]
    fn launch_failure_is_reported_and_pair_is_kept() {
        let dir = tempdir().expect("temp dir");
        let a = save(dir.path(), "a.csav");
        let b = save(dir.path(), "b.csav");
        let mut app = app_with_converter(dir.path().join("missing-converter"));

        app.handle_drop(SlotKind::Source, &[a]);
        app.handle_drop(SlotKind::Destination, &[b]);
        assert!(app.can_start_conversion());

        app.handle_conversion_request();
        assert!(app.is_conversion_running());
        assert!(!app.can_start_conversion());

        let deadline = Instant::now() + Duration::from_secs(10);
        while app.is_conversion_running() {
            assert!(Instant::now() < deadline, "conversion did not finish");
            std::thread::sleep(Duration::from_millis(10));
            app.poll_conversion_job();
        }

        let message = app.error_message.clone().expect("error dialog");
        assert!(message.starts_with("Error: "), "{message}");
        assert!(app.output.is_none());
        assert_eq!(app.workflow.phase(), Phase::Ready);
        assert!(app.can_start_conversion());
    }
}
