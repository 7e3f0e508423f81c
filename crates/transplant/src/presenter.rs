use crate::converter::{ConversionResult, LINE_SEPARATOR};

pub const OUTPUT_TITLE: &str = "Converter output";
pub const OUTPUT_WINDOW_SIZE: [f32; 2] = [500.0, 300.0];

/// What the output window's dismiss button does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DismissAction {
    /// Close the output window and return to the pair selection.
    #[default]
    CloseView,
    /// Terminate the whole application.
    ExitApp,
}

impl DismissAction {
    pub fn from_exit_on_dismiss(exit_on_dismiss: bool) -> Self {
        if exit_on_dismiss {
            DismissAction::ExitApp
        } else {
            DismissAction::CloseView
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            DismissAction::CloseView => "Close",
            DismissAction::ExitApp => "Exit",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentedOutput {
    pub title: &'static str,
    pub body: String,
    pub dismiss: DismissAction,
}

pub fn present(result: ConversionResult, dismiss: DismissAction) -> PresentedOutput {
    PresentedOutput {
        title: OUTPUT_TITLE,
        body: normalize_line_endings(&result.combined_output),
        dismiss,
    }
}

/// Rewrites every line break as [`LINE_SEPARATOR`]. Existing `\r\n` pairs are
/// kept as a single break.
pub fn normalize_line_endings(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut lines = text.split('\n').peekable();
    while let Some(line) = lines.next() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        normalized.push_str(line);
        if lines.peek().is_some() {
            normalized.push_str(LINE_SEPARATOR);
        }
    }
    normalized
}
