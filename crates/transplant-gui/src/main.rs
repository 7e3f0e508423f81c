#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use csav_transplant::{logging, Startup};
use csav_transplant_gui::TransplantApp;
use eframe::{egui, NativeOptions, Renderer};

const APP_NAME: &str = "CSAV Transplant";

trait NativeOptionsExt {
    fn with_centered(self, centered: bool) -> Self;
}

impl NativeOptionsExt for eframe::NativeOptions {
    fn with_centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }
}

fn main() -> eframe::Result<()> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let startup = match Startup::resolve() {
        Ok(startup) => startup,
        Err(err) => {
            tracing::error!(%err, "startup failed");
            report_startup_error(&err);
            std::process::exit(1);
        }
    };

    let wgpu_result = run_app(create_native_options(Renderer::Wgpu), startup.clone());

    match wgpu_result {
        Ok(result) => Ok(result),
        Err(wgpu_error) => {
            report_renderer_error("WGPU", &wgpu_error);

            let glow_result = run_app(create_native_options(Renderer::Glow), startup);
            match glow_result {
                Ok(result) => Ok(result),
                Err(glow_error) => {
                    report_renderer_error("Glow", &glow_error);
                    Err(wgpu_error)
                }
            }
        }
    }
}

fn create_native_options(renderer: Renderer) -> NativeOptions {
    NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 320.0])
            .with_min_inner_size([560.0, 320.0])
            .with_resizable(false)
            .with_drag_and_drop(true),
        renderer,
        ..Default::default()
    }
    .with_centered(true)
}

fn run_app(options: NativeOptions, startup: Startup) -> eframe::Result<()> {
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(TransplantApp::new(cc, startup)))),
    )
}

fn report_startup_error(error: &csav_transplant::Error) {
    eprintln!("{error}");

    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(error.to_string())
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn report_renderer_error(renderer: &str, error: &eframe::Error) {
    tracing::error!(%error, "failed to initialize {renderer} renderer");

    #[cfg(target_os = "windows")]
    {
        use rfd::MessageDialog;

        MessageDialog::new()
            .set_title(APP_NAME)
            .set_description(format!(
                "Failed to initialize {renderer} renderer:\n{error}\n\nAttempting fallback..."
            ))
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}
