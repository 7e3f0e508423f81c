use std::path::{Path, PathBuf};

use crate::slot::{PathSlot, SlotKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    #[error("The source and destination paths can't be the same.")]
    DuplicatePath { slot: SlotKind, path: PathBuf },
}

/// The source and destination slots. The two never hold the same path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairState {
    source: PathSlot,
    destination: PathSlot,
}

impl Default for PairState {
    fn default() -> Self {
        Self {
            source: PathSlot::new(SlotKind::Source),
            destination: PathSlot::new(SlotKind::Destination),
        }
    }
}

impl PairState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, kind: SlotKind) -> &PathSlot {
        match kind {
            SlotKind::Source => &self.source,
            SlotKind::Destination => &self.destination,
        }
    }

    fn slot_mut(&mut self, kind: SlotKind) -> &mut PathSlot {
        match kind {
            SlotKind::Source => &mut self.source,
            SlotKind::Destination => &mut self.destination,
        }
    }

    pub fn source(&self) -> &PathSlot {
        &self.source
    }

    pub fn destination(&self) -> &PathSlot {
        &self.destination
    }

    /// Puts `path` into `kind`, overwriting whatever the slot held.
    ///
    /// The caller is expected to have run the path through
    /// [`crate::drop::validate`] already.
    pub fn try_assign(&mut self, kind: SlotKind, path: &Path) -> Result<(), AssignError> {
        if self.slot(kind.other()).holds(path) {
            tracing::warn!(slot = %kind, path = %path.display(), "path already used by the other slot");
            return Err(AssignError::DuplicatePath {
                slot: kind,
                path: path.to_path_buf(),
            });
        }

        self.slot_mut(kind).set(path.to_path_buf());
        tracing::info!(slot = %kind, path = %path.display(), "slot assigned");
        Ok(())
    }

    /// Both slots are filled. Slots cannot be cleared, so once this is true
    /// it stays true.
    pub fn is_ready(&self) -> bool {
        !self.source.is_empty() && !self.destination.is_empty()
    }

    pub fn first_empty(&self) -> Option<SlotKind> {
        SlotKind::ALL
            .into_iter()
            .find(|kind| self.slot(*kind).is_empty())
    }
}
