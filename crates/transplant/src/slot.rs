use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Source,
    Destination,
}

impl SlotKind {
    pub const ALL: [SlotKind; 2] = [SlotKind::Source, SlotKind::Destination];

    pub fn other(self) -> Self {
        match self {
            SlotKind::Source => SlotKind::Destination,
            SlotKind::Destination => SlotKind::Source,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotKind::Source => "source",
            SlotKind::Destination => "destination",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            SlotKind::Source => "Source",
            SlotKind::Destination => "Destination",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            SlotKind::Source => "Drag source save file here.",
            SlotKind::Destination => "Drag destination save file here.",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the two path-holding roles. Holds at most one validated save path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSlot {
    kind: SlotKind,
    path: Option<PathBuf>,
    display_label: String,
}

impl PathSlot {
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            path: None,
            display_label: kind.prompt().to_string(),
        }
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_none()
    }

    pub fn holds(&self, candidate: &Path) -> bool {
        self.path.as_deref() == Some(candidate)
    }

    pub(crate) fn set(&mut self, path: PathBuf) {
        self.display_label = base_name(&path);
        self.path = Some(path);
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
