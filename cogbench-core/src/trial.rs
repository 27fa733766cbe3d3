use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Signal-detection class of a trial in the deadline paradigms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseClass {
    Hit,
    Miss,
    FalseAlarm,
    CorrectRejection,
}

impl ResponseClass {
    /// `signal` is whether a response was required, `responded` whether one came.
    pub fn classify(signal: bool, responded: bool) -> Self {
        match (signal, responded) {
            (true, true) => ResponseClass::Hit,
            (true, false) => ResponseClass::Miss,
            (false, true) => ResponseClass::FalseAlarm,
            (false, false) => ResponseClass::CorrectRejection,
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, ResponseClass::Hit | ResponseClass::CorrectRejection)
    }
}

/// Paradigm-specific tags attached to a trial record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub too_early: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_go_trial: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_match: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_congruent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ResponseClass>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrialMetadata {
    pub fn timed_out() -> Self {
        Self {
            timeout: Some(true),
            ..Self::default()
        }
    }

    pub fn too_early() -> Self {
        Self {
            too_early: Some(true),
            ..Self::default()
        }
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub fn is_timeout(&self) -> bool {
        self.timeout.unwrap_or(false)
    }

    pub fn is_too_early(&self) -> bool {
        self.too_early.unwrap_or(false)
    }
}

/// Recorded result per trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialRecord {
    /// 1-based position in the session
    pub trial_number: u32,
    pub correct: bool,
    /// Stimulus onset to response; absent on timeouts and premature presses
    #[serde(rename = "reactionTime", default, skip_serializing_if = "Option::is_none")]
    pub reaction_time_ms: Option<f64>,
    /// When the trial's waiting phase began, in ms on the session clock
    #[serde(rename = "timestamp")]
    pub timestamp_ms: f64,
    #[serde(default)]
    pub metadata: TrialMetadata,
}

impl TrialRecord {
    /// Reaction time that counts toward the session average.
    pub fn scored_reaction_time(&self) -> Option<f64> {
        if self.correct { self.reaction_time_ms } else { None }
    }
}
