//! Scripted participant that plays sessions on a virtual clock.

use crate::config::ConfigError;
use crate::paradigm::Paradigm;
use crate::state::TrialEngine;
use cogbench_core::TrialPhase;
use cogbench_timing::VirtualClock;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticParticipant {
    /// Probability of giving the correct answer on a trial, always within [0, 1]
    accuracy: f64,
    /// Inclusive response latency range after onset
    rt_range_ms: (u64, u64),
}

impl Default for SyntheticParticipant {
    fn default() -> Self {
        Self {
            accuracy: 0.85,
            rt_range_ms: (250, 650),
        }
    }
}

impl SyntheticParticipant {
    pub fn new(accuracy: f64, rt_range_ms: (u64, u64)) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&accuracy) {
            return Err(ConfigError::ProbabilityOutOfRange(accuracy));
        }
        let (min_ms, max_ms) = rt_range_ms;
        if min_ms > max_ms {
            return Err(ConfigError::InvalidLatencyRange { min_ms, max_ms });
        }
        Ok(Self {
            accuracy,
            rt_range_ms,
        })
    }

    pub fn perfect(rt_ms: u64) -> Self {
        Self {
            accuracy: 1.0,
            rt_range_ms: (rt_ms, rt_ms),
        }
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn rt_range_ms(&self) -> (u64, u64) {
        self.rt_range_ms
    }

    /// What to do on this stimulus; `None` withholds.
    pub fn choose<P: Paradigm, G: Rng>(
        &self,
        paradigm: &P,
        stimulus: &P::Stimulus,
        rng: &mut G,
    ) -> Option<P::Response> {
        let correct = paradigm.correct_response(stimulus);
        if rng.random_bool(self.accuracy) {
            return correct;
        }
        let wrong: Vec<P::Response> = paradigm
            .response_options()
            .into_iter()
            .filter(|o| Some(o) != correct.as_ref())
            .collect();
        if wrong.is_empty() {
            // Withholding is the only mistake left, and it needs a deadline to end the trial.
            if paradigm.response_window().is_some() { None } else { correct }
        } else {
            Some(wrong[rng.random_range(0..wrong.len())].clone())
        }
    }

    /// Plays the session to its end. Returns false if it stalled with nothing armed.
    pub fn play<P, T, R, G>(&self, engine: &mut TrialEngine<P, T, R>, rng: &mut G) -> bool
    where
        P: Paradigm,
        T: VirtualClock,
        R: Rng,
        G: Rng,
    {
        engine.start();
        while !engine.is_finished() && !engine.is_disposed() {
            if engine.phase() != TrialPhase::Armed {
                if !engine.advance_to_next() {
                    return false;
                }
                continue;
            }
            let Some(stimulus) = engine.stimulus().cloned() else {
                return false;
            };
            match self.choose(engine.paradigm(), &stimulus, rng) {
                Some(response) => {
                    let (lo, hi) = self.rt_range_ms;
                    let rt = rng.random_range(lo..=hi);
                    let trial = engine.count();
                    engine.advance(Duration::from_millis(rt));
                    // The deadline may have closed the trial while we were "thinking".
                    if engine.count() == trial && engine.phase() == TrialPhase::Armed {
                        engine.respond(response);
                    } else {
                        debug!(rt_ms = rt, "synthetic response too slow");
                    }
                }
                None => {
                    if !engine.advance_to_next() {
                        return false;
                    }
                }
            }
        }
        engine.is_finished()
    }
}
