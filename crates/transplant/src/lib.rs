//! Pick a source and a destination `.csav` save, then hand both to the
//! external converter for an inventory-apply transplant.
//!
//! The converter itself is a black box; this crate validates drops, keeps the
//! two selected paths apart, runs the converter and formats what it printed.

use std::path::PathBuf;

pub mod converter;
pub mod drop;
pub mod logging;
pub mod pair;
pub mod presenter;
pub mod save_dir;
pub mod settings;
pub mod slot;
pub mod workflow;

pub use converter::{
    ConversionJob, ConversionRequest, ConversionResult, ConverterConfig, ConverterInvoker,
    InvocationError,
};
pub use drop::{validate, DropDecision};
pub use pair::{AssignError, PairState};
pub use presenter::{present, DismissAction, PresentedOutput};
pub use settings::{ConfigError, Settings};
pub use slot::{PathSlot, SlotKind};
pub use workflow::{DropOutcome, Phase, Workflow};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("DAVST binary is missing: {}", path.display())]
    ConverterMissing { path: PathBuf },
    #[error("Could not locate the application directory: {0}")]
    InstallDir(#[source] std::io::Error),
}

/// Everything the front end needs at startup: settings plus a converter that
/// is known to exist.
#[derive(Clone, Debug)]
pub struct Startup {
    pub settings: Settings,
    pub invoker: ConverterInvoker,
}

impl Startup {
    /// Loads settings beside the executable and checks the converter is there.
    /// A broken settings file is logged and replaced by defaults.
    pub fn resolve() -> Result<Self, Error> {
        let install_dir = settings::install_dir().map_err(Error::InstallDir)?;
        Self::resolve_in(&install_dir)
    }

    pub fn resolve_in(install_dir: &std::path::Path) -> Result<Self, Error> {
        let settings = Settings::load_from(install_dir).unwrap_or_else(|err| {
            tracing::error!(%err, "ignoring settings file");
            Settings::default()
        });

        let config = settings.converter_config(install_dir);
        config.ensure_present()?;
        tracing::info!(converter = %config.path().display(), "converter found");

        Ok(Self {
            settings,
            invoker: ConverterInvoker::new(config),
        })
    }
}
