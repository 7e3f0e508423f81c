use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::converter::ConverterConfig;
use crate::presenter::DismissAction;
use crate::save_dir;

pub const SETTINGS_FILE_NAME: &str = "csav-transplant.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is invalid: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Optional overrides read from `csav-transplant.toml` next to the executable.
/// Nothing is ever written back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub converter: Option<PathBuf>,
    pub save_dir: Option<PathBuf>,
    pub exit_on_dismiss: bool,
}

impl Settings {
    /// Reads the settings file from `dir`. A missing file yields defaults.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(SETTINGS_FILE_NAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Relative converter overrides are resolved against `install_dir`.
    pub fn converter_config(&self, install_dir: &Path) -> ConverterConfig {
        match &self.converter {
            Some(path) if path.is_absolute() => ConverterConfig::new(path),
            Some(path) => ConverterConfig::new(install_dir.join(path)),
            None => ConverterConfig::beside(install_dir),
        }
    }

    pub fn save_dir(&self) -> Option<PathBuf> {
        self.save_dir.clone().or_else(save_dir::default_save_dir)
    }

    pub fn dismiss_action(&self) -> DismissAction {
        DismissAction::from_exit_on_dismiss(self.exit_on_dismiss)
    }
}

/// Directory holding the running executable.
pub fn install_dir() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "executable path has no parent directory",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().expect("temp dir");
        let settings = Settings::load_from(dir.path()).expect("load");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.dismiss_action(), DismissAction::CloseView);
        assert_eq!(
            settings.converter_config(dir.path()),
            ConverterConfig::beside(dir.path())
        );
    }

    #[test]
    fn overrides_are_honoured() {
        let dir = tempdir().expect("temp dir");
        fs::write(
            dir.path().join(SETTINGS_FILE_NAME),
            "converter = \"tools/davst\"\nsave_dir = \"/srv/saves\"\nexit_on_dismiss = true\n",
        )
        .expect("write settings");

        let settings = Settings::load_from(dir.path()).expect("load");
        assert_eq!(
            settings.converter_config(dir.path()).path(),
            dir.path().join("tools/davst")
        );
        assert_eq!(settings.save_dir(), Some(PathBuf::from("/srv/saves")));
        assert_eq!(settings.dismiss_action(), DismissAction::ExitApp);
    }

    #[cfg(unix)]
    #[test]
    fn absolute_converter_is_used_as_is() {
        let settings = Settings {
            converter: Some(PathBuf::from("/opt/davst/davst")),
            ..Settings::default()
        };
        assert_eq!(
            settings.converter_config(Path::new("/somewhere/else")).path(),
            Path::new("/opt/davst/davst")
        );
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join(SETTINGS_FILE_NAME), "exit_on_dismiss = \"maybe\"\n")
            .expect("write settings");
        assert!(matches!(
            Settings::load_from(dir.path()),
            Err(ConfigError::Parse { .. })
        ));

        fs::write(dir.path().join(SETTINGS_FILE_NAME), "colour = \"red\"\n")
            .expect("write settings");
        assert!(matches!(
            Settings::load_from(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
