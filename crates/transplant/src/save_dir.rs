use std::io;
use std::path::{Path, PathBuf};

use directories::UserDirs;

const SAVE_DIR_COMPONENTS: [&str; 3] = ["BioWare", "Dragon Age The Veilguard", "save games"];

#[derive(Debug, thiserror::Error)]
pub enum SaveDirError {
    #[error("Directory not found.")]
    NotFound { path: PathBuf },
    #[error("Error opening the directory: {0}")]
    Open(#[source] io::Error),
}

/// `<Documents>/BioWare/Dragon Age The Veilguard/save games` for the current
/// user, if a documents folder can be resolved.
pub fn default_save_dir() -> Option<PathBuf> {
    let dirs = UserDirs::new()?;
    let documents = dirs
        .document_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dirs.home_dir().join("Documents"));
    Some(save_dir_under(&documents))
}

fn save_dir_under(documents: &Path) -> PathBuf {
    SAVE_DIR_COMPONENTS
        .iter()
        .fold(documents.to_path_buf(), |path, component| path.join(component))
}

/// Opens `dir` in the platform file browser.
pub fn open_in_file_browser(dir: &Path) -> Result<(), SaveDirError> {
    if !dir.is_dir() {
        tracing::warn!(path = %dir.display(), "save directory not found");
        return Err(SaveDirError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    open::that(dir).map_err(|err| {
        tracing::error!(path = %dir.display(), %err, "failed to open file browser");
        SaveDirError::Open(err)
    })
}
