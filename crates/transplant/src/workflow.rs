use std::path::Path;

use crate::converter::{ConversionRequest, ConversionResult, InvocationError};
use crate::drop::{self, DropDecision};
use crate::pair::{AssignError, PairState};
use crate::presenter::DismissAction;
use crate::slot::SlotKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Empty,
    OnePathSet,
    Ready,
    Converting,
    ResultShown,
    Terminated,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Assigned,
    Rejected,
    Duplicate(AssignError),
}

/// Whole-app state: the selected pair plus where the user is in the
/// select → convert → read output cycle.
#[derive(Debug)]
pub struct Workflow {
    pair: PairState,
    phase: Phase,
}

impl Default for Workflow {
    fn default() -> Self {
        Self {
            pair: PairState::new(),
            phase: Phase::Empty,
        }
    }
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pair(&self) -> &PairState {
        &self.pair
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hover_decision<P>(&self, hovered: &[P]) -> DropDecision
    where
        P: AsRef<Path>,
    {
        drop::validate(hovered)
    }

    pub fn drop_paths<P>(&mut self, slot: SlotKind, dropped: &[P]) -> DropOutcome
    where
        P: AsRef<Path>,
    {
        if self.phase == Phase::Terminated {
            return DropOutcome::Rejected;
        }

        if !drop::validate(dropped).is_accept() {
            return DropOutcome::Rejected;
        }

        // validate() only accepts single-path drops
        let path = dropped[0].as_ref();
        match self.pair.try_assign(slot, path) {
            Ok(()) => {
                self.refresh_selection_phase();
                DropOutcome::Assigned
            }
            Err(err) => DropOutcome::Duplicate(err),
        }
    }

    fn refresh_selection_phase(&mut self) {
        if !matches!(self.phase, Phase::Empty | Phase::OnePathSet) {
            return;
        }

        self.phase = if self.pair.is_ready() {
            Phase::Ready
        } else if SlotKind::ALL
            .iter()
            .any(|kind| !self.pair.slot(*kind).is_empty())
        {
            Phase::OnePathSet
        } else {
            Phase::Empty
        };
    }

    pub fn can_convert(&self) -> bool {
        self.phase == Phase::Ready && self.pair.is_ready()
    }

    /// Snapshots both paths and moves to `Converting`.
    pub fn begin_conversion(&mut self) -> Option<ConversionRequest> {
        if !self.can_convert() {
            return None;
        }

        let source = self.pair.source().path()?.to_path_buf();
        let destination = self.pair.destination().path()?.to_path_buf();
        self.phase = Phase::Converting;
        Some(ConversionRequest::new(source, destination))
    }

    /// Records how the conversion ended. Failures leave the pair untouched
    /// and return to `Ready`.
    pub fn finish_conversion(&mut self, outcome: &Result<ConversionResult, InvocationError>) {
        if self.phase != Phase::Converting {
            return;
        }

        self.phase = match outcome {
            Ok(_) => Phase::ResultShown,
            Err(_) => Phase::Ready,
        };
    }

    pub fn dismiss(&mut self, action: DismissAction) {
        if self.phase != Phase::ResultShown {
            return;
        }

        self.phase = match action {
            DismissAction::CloseView => Phase::Ready,
            DismissAction::ExitApp => Phase::Terminated,
        };
    }

    pub fn terminate(&mut self) {
        self.phase = Phase::Terminated;
    }
}
