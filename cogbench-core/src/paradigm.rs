use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The five task paradigms offered to participants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParadigmKind {
    SimpleReaction,
    ChoiceReaction,
    GoNoGo,
    /// 1-back working-memory task
    WorkingMemory,
    Stroop,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown paradigm `{0}`")]
pub struct UnknownParadigm(pub String);

impl ParadigmKind {
    pub const ALL: [ParadigmKind; 5] = [
        ParadigmKind::SimpleReaction,
        ParadigmKind::ChoiceReaction,
        ParadigmKind::GoNoGo,
        ParadigmKind::WorkingMemory,
        ParadigmKind::Stroop,
    ];

    /// Identifier used by the scoring backend.
    pub fn id(&self) -> &'static str {
        match self {
            Self::SimpleReaction => "SIMPLE_REACTION",
            Self::ChoiceReaction => "CHOICE_REACTION",
            Self::GoNoGo => "GO_NO_GO",
            Self::WorkingMemory => "WORKING_MEMORY",
            Self::Stroop => "STROOP",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SimpleReaction => "Simple Reaction",
            Self::ChoiceReaction => "Choice Reaction",
            Self::GoNoGo => "Go / No-Go",
            Self::WorkingMemory => "1-Back Memory",
            Self::Stroop => "Stroop Test",
        }
    }
}

impl fmt::Display for ParadigmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ParadigmKind {
    type Err = UnknownParadigm;

    /// Accepts backend ids as well as kebab/snake case in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().replace('-', "_").to_ascii_uppercase();
        let kind = match norm.as_str() {
            "SIMPLE_REACTION" | "SIMPLE" => Self::SimpleReaction,
            "CHOICE_REACTION" | "CHOICE" => Self::ChoiceReaction,
            "GO_NO_GO" | "GONOGO" => Self::GoNoGo,
            "WORKING_MEMORY" | "N_BACK" | "NBACK" | "ONE_BACK" | "1_BACK" => Self::WorkingMemory,
            "STROOP" => Self::Stroop,
            _ => return Err(UnknownParadigm(s.to_string())),
        };
        Ok(kind)
    }
}
