pub mod accumulator;
pub mod callbacks;
pub mod config;
pub mod paradigm;
pub mod paradigms;
pub mod simulate;
pub mod state;
pub mod trial;

pub use accumulator::SessionAccumulator;
pub use callbacks::EngineCallbacks;
pub use config::{ConfigError, ParadigmConfig, WaitSchedule};
pub use paradigm::{Classification, Paradigm};
pub use paradigms::{ChoiceReaction, GoNoGo, KeyMapError, NBack, SimpleReaction, Stroop, StroopKeyMap};
pub use simulate::SyntheticParticipant;
pub use state::TrialEngine;
pub use trial::{ActiveTrial, TrialTimestamps};
