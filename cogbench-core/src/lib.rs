pub mod key;
pub mod paradigm;
pub mod phase;
pub mod report;
pub mod stats;
pub mod stimulus;
pub mod summary;
pub mod trial;

pub use key::Key;
pub use paradigm::{ParadigmKind, UnknownParadigm};
pub use phase::TrialPhase;
pub use report::{CompleteTestRequest, TestRound, TestStatistics};
pub use stimulus::{ArrowDirection, ColorName, DigitStimulus, GoNoGoCue, GoSignal, Stimulus, StroopStimulus};
pub use summary::SessionSummary;
pub use trial::{ResponseClass, TrialMetadata, TrialRecord};
