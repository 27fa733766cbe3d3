use cogbench_core::ParadigmKind;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("trial quota must be at least 1")]
    ZeroTrials,

    #[error("invalid wait range: min_ms ({min_ms}) must not exceed max_ms ({max_ms})")]
    InvalidWaitRange { min_ms: u64, max_ms: u64 },

    #[error("invalid latency range: min_ms ({min_ms}) must not exceed max_ms ({max_ms})")]
    InvalidLatencyRange { min_ms: u64, max_ms: u64 },

    #[error("response window must be longer than 0 ms")]
    ZeroResponseWindow,

    #[error("target probability {0} is outside [0, 1]")]
    ProbabilityOutOfRange(f64),

    #[error("{field} of {ms} ms exceeds the {max} ms limit", max = ParadigmConfig::MAX_DELAY_MS)]
    DelayTooLong { field: &'static str, ms: u64 },
}

/// Pre-stimulus delay policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WaitSchedule {
    Fixed { ms: u64 },
    /// Uniform over the inclusive range
    Uniform { min_ms: u64, max_ms: u64 },
    /// Delay before the first trial only; later trials start immediately
    FirstOnly { ms: u64 },
}

impl WaitSchedule {
    /// Longest delay the schedule can produce.
    pub fn max_ms(&self) -> u64 {
        match *self {
            WaitSchedule::Fixed { ms } | WaitSchedule::FirstOnly { ms } => ms,
            WaitSchedule::Uniform { max_ms, .. } => max_ms,
        }
    }

    /// Delay before trial `trial_index` (0-based).
    pub fn sample<R: Rng>(&self, trial_index: u32, rng: &mut R) -> Duration {
        let ms = match *self {
            WaitSchedule::Fixed { ms } => ms,
            WaitSchedule::Uniform { min_ms, max_ms } => rng.random_range(min_ms..=max_ms),
            WaitSchedule::FirstOnly { ms } if trial_index == 0 => ms,
            WaitSchedule::FirstOnly { .. } => 0,
        };
        Duration::from_millis(ms)
    }
}

/// Per-paradigm timing and trial parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParadigmConfig {
    pub trials: u32,
    pub wait: WaitSchedule,
    /// `None` means the trial waits for a response indefinitely
    #[serde(default)]
    pub response_window_ms: Option<u64>,
    pub feedback_ms: u64,
    /// P(go) for Go/No-Go, P(forced match) for 1-back, P(congruent) for Stroop,
    /// P(left) for choice reaction. Ignored by simple reaction.
    pub target_probability: f64,
}

impl ParadigmConfig {
    pub const FEEDBACK_MS: u64 = 1000;
    /// Upper bound for every configured delay: one hour.
    pub const MAX_DELAY_MS: u64 = 3_600_000;

    pub fn defaults(kind: ParadigmKind) -> Self {
        let (trials, wait, response_window_ms, target_probability) = match kind {
            ParadigmKind::SimpleReaction => (
                5,
                WaitSchedule::Uniform {
                    min_ms: 1500,
                    max_ms: 3500,
                },
                None,
                1.0,
            ),
            ParadigmKind::ChoiceReaction => (
                8,
                WaitSchedule::Uniform {
                    min_ms: 800,
                    max_ms: 1300,
                },
                None,
                0.5,
            ),
            ParadigmKind::GoNoGo => (10, WaitSchedule::Fixed { ms: 800 }, Some(1500), 0.7),
            ParadigmKind::WorkingMemory => {
                (12, WaitSchedule::FirstOnly { ms: 1000 }, Some(1500), 0.3)
            }
            ParadigmKind::Stroop => (
                20,
                WaitSchedule::Uniform {
                    min_ms: 800,
                    max_ms: 1500,
                },
                None,
                0.5,
            ),
        };
        Self {
            trials,
            wait,
            response_window_ms,
            feedback_ms: Self::FEEDBACK_MS,
            target_probability,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        if let WaitSchedule::Uniform { min_ms, max_ms } = self.wait {
            if min_ms > max_ms {
                return Err(ConfigError::InvalidWaitRange { min_ms, max_ms });
            }
        }
        if self.response_window_ms == Some(0) {
            return Err(ConfigError::ZeroResponseWindow);
        }
        if !(0.0..=1.0).contains(&self.target_probability) {
            return Err(ConfigError::ProbabilityOutOfRange(self.target_probability));
        }
        let delays = [
            ("wait", Some(self.wait.max_ms())),
            ("response_window_ms", self.response_window_ms),
            ("feedback_ms", Some(self.feedback_ms)),
        ];
        for (field, ms) in delays {
            if let Some(ms) = ms.filter(|ms| *ms > Self::MAX_DELAY_MS) {
                return Err(ConfigError::DelayTooLong { field, ms });
            }
        }
        Ok(())
    }

    pub fn response_window(&self) -> Option<Duration> {
        self.response_window_ms.map(Duration::from_millis)
    }

    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn defaults_match_paradigm_table() {
        let quotas: Vec<u32> = ParadigmKind::ALL
            .iter()
            .map(|k| ParadigmConfig::defaults(*k).trials)
            .collect();
        assert_eq!(quotas, vec![5, 8, 10, 12, 20]);

        for kind in ParadigmKind::ALL {
            let cfg = ParadigmConfig::defaults(kind);
            assert_eq!(cfg.feedback_ms, 1000);
            assert_eq!(cfg.validate(), Ok(()));
        }
        assert_eq!(
            ParadigmConfig::defaults(ParadigmKind::GoNoGo).response_window_ms,
            Some(1500)
        );
        assert_eq!(
            ParadigmConfig::defaults(ParadigmKind::Stroop).response_window_ms,
            None
        );
    }

    #[test]
    fn uniform_wait_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let wait = WaitSchedule::Uniform {
            min_ms: 1500,
            max_ms: 3500,
        };
        for i in 0..500 {
            let d = wait.sample(i, &mut rng);
            assert!(d >= Duration::from_millis(1500) && d <= Duration::from_millis(3500));
        }
    }

    #[test]
    fn first_only_wait_applies_once() {
        let mut rng = StdRng::seed_from_u64(1);
        let wait = WaitSchedule::FirstOnly { ms: 1000 };
        assert_eq!(wait.sample(0, &mut rng), Duration::from_millis(1000));
        assert_eq!(wait.sample(1, &mut rng), Duration::ZERO);
        assert_eq!(wait.sample(11, &mut rng), Duration::ZERO);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut cfg = ParadigmConfig::defaults(ParadigmKind::ChoiceReaction);
        cfg.trials = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTrials));

        let mut cfg = ParadigmConfig::defaults(ParadigmKind::ChoiceReaction);
        cfg.wait = WaitSchedule::Uniform {
            min_ms: 900,
            max_ms: 100,
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidWaitRange {
                min_ms: 900,
                max_ms: 100
            })
        );

        let mut cfg = ParadigmConfig::defaults(ParadigmKind::GoNoGo);
        cfg.response_window_ms = Some(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroResponseWindow));

        let mut cfg = ParadigmConfig::defaults(ParadigmKind::GoNoGo);
        cfg.target_probability = 1.5;
        assert_eq!(cfg.validate(), Err(ConfigError::ProbabilityOutOfRange(1.5)));
    }

    #[test]
    fn validation_caps_delays() {
        let huge = u64::MAX / 1000;
        let mut cfg = ParadigmConfig::defaults(ParadigmKind::GoNoGo);
        cfg.wait = WaitSchedule::Fixed { ms: huge };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::DelayTooLong {
                field: "wait",
                ms: huge
            })
        );

        let mut cfg = ParadigmConfig::defaults(ParadigmKind::Stroop);
        cfg.wait = WaitSchedule::Uniform {
            min_ms: 0,
            max_ms: ParadigmConfig::MAX_DELAY_MS + 1,
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DelayTooLong { field: "wait", .. })
        ));

        let mut cfg = ParadigmConfig::defaults(ParadigmKind::GoNoGo);
        cfg.response_window_ms = Some(u64::MAX);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DelayTooLong {
                field: "response_window_ms",
                ..
            })
        ));

        let mut cfg = ParadigmConfig::defaults(ParadigmKind::SimpleReaction);
        cfg.feedback_ms = u64::MAX;
        assert!(cfg.validate().is_err());

        let mut cfg = ParadigmConfig::defaults(ParadigmKind::WorkingMemory);
        cfg.wait = WaitSchedule::FirstOnly {
            ms: ParadigmConfig::MAX_DELAY_MS,
        };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn wait_schedule_serde_is_tagged() {
        let json = serde_json::to_value(WaitSchedule::Fixed { ms: 800 }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "fixed", "ms": 800}));
    }
}
