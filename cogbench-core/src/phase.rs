use serde::{Deserialize, Serialize};

/// Phases a trial engine moves through during one session
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialPhase {
    #[default]
    Idle,
    Waiting,
    Armed,
    Feedback,
    Finished,
}

impl TrialPhase {
    /// Only an armed stimulus can be scored by a response.
    pub fn accepts_response(&self) -> bool {
        matches!(self, Self::Armed)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Input is looked at while waiting (too-early presses) and while armed.
    pub fn allows_input(&self) -> bool {
        matches!(self, Self::Waiting | Self::Armed)
    }

    /// Successor on the regular path. `quota_met` decides where feedback leads.
    pub fn next(&self, quota_met: bool) -> Option<Self> {
        use TrialPhase::*;
        Some(match self {
            Idle => Waiting,
            Waiting => Armed,
            Armed => Feedback,
            Feedback if quota_met => Finished,
            Feedback => Waiting,
            Finished => return None,
        })
    }

    /// Whether `to` is reachable in one step. Waiting may skip straight to
    /// feedback when a paradigm scores premature input.
    pub fn can_transition_to(&self, to: Self) -> bool {
        match (self, to) {
            (Self::Waiting, Self::Feedback) => true,
            (Self::Feedback, Self::Waiting | Self::Finished) => true,
            (from, to) => from.next(false) == Some(to),
        }
    }
}
