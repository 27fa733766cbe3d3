use crate::key::Key;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something shown to the participant at stimulus onset
pub trait Stimulus: Clone + Send + Sync + fmt::Debug + fmt::Display {
    /// Compact label used in engine logs.
    fn label(&self) -> String;
}

/// The single "go" signal of the simple reaction task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrowDirection {
    Left,
    Right,
}

impl ArrowDirection {
    pub fn key(&self) -> Key {
        match self {
            ArrowDirection::Left => Key::new(Key::ARROW_LEFT),
            ArrowDirection::Right => Key::new(Key::ARROW_RIGHT),
        }
    }

    pub fn from_key(key: &Key) -> Option<Self> {
        match key.as_str() {
            Key::ARROW_LEFT => Some(ArrowDirection::Left),
            Key::ARROW_RIGHT => Some(ArrowDirection::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoNoGoCue {
    Go,
    NoGo,
}

impl GoNoGoCue {
    pub fn is_go(&self) -> bool {
        matches!(self, GoNoGoCue::Go)
    }
}

/// One digit of the 1-back stream together with the digit it follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitStimulus {
    pub digit: u8,
    pub previous: Option<u8>,
    /// The generator decided this trial must repeat the previous digit.
    pub forced_match: bool,
}

impl DigitStimulus {
    pub fn is_match(&self) -> bool {
        self.previous == Some(self.digit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColorName {
    Red,
    Blue,
    Green,
    Yellow,
}

impl ColorName {
    pub const ALL: [ColorName; 4] = [
        ColorName::Red,
        ColorName::Blue,
        ColorName::Green,
        ColorName::Yellow,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorName::Red => "RED",
            ColorName::Blue => "BLUE",
            ColorName::Green => "GREEN",
            ColorName::Yellow => "YELLOW",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            ColorName::Red => "#FF4B4B",
            ColorName::Blue => "#1CB0F6",
            ColorName::Green => "#58CC02",
            ColorName::Yellow => "#FFC800",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// A colour word printed in an ink colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StroopStimulus {
    pub word: ColorName,
    pub ink: ColorName,
}

impl StroopStimulus {
    pub fn is_congruent(&self) -> bool {
        self.word == self.ink
    }
}

impl fmt::Display for GoSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PRESS!")
    }
}

impl fmt::Display for ArrowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrowDirection::Left => f.write_str("<--"),
            ArrowDirection::Right => f.write_str("-->"),
        }
    }
}

impl fmt::Display for GoNoGoCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoNoGoCue::Go => f.write_str("( GO )"),
            GoNoGoCue::NoGo => f.write_str("[STOP]"),
        }
    }
}

impl fmt::Display for DigitStimulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digit)
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for StroopStimulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ink: {})", self.word, self.ink)
    }
}

impl Stimulus for GoSignal {
    fn label(&self) -> String {
        "GO".to_string()
    }
}

impl Stimulus for ArrowDirection {
    fn label(&self) -> String {
        self.key().as_str().to_string()
    }
}

impl Stimulus for GoNoGoCue {
    fn label(&self) -> String {
        match self {
            GoNoGoCue::Go => "GO".to_string(),
            GoNoGoCue::NoGo => "NO_GO".to_string(),
        }
    }
}

impl Stimulus for DigitStimulus {
    fn label(&self) -> String {
        self.digit.to_string()
    }
}

impl Stimulus for StroopStimulus {
    fn label(&self) -> String {
        format!("{}/{}", self.word.name(), self.ink.name())
    }
}
