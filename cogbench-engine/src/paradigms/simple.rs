use crate::config::ParadigmConfig;
use crate::paradigm::{Classification, Paradigm};
use cogbench_core::{GoSignal, Key, ParadigmKind, TrialMetadata};
use rand::Rng;

/// Press Space as soon as the go signal appears; pressing early forfeits the trial.
#[derive(Debug, Clone)]
pub struct SimpleReaction {
    config: ParadigmConfig,
}

impl SimpleReaction {
    pub fn new(config: ParadigmConfig) -> Self {
        Self { config }
    }
}

impl Default for SimpleReaction {
    fn default() -> Self {
        Self::new(ParadigmConfig::defaults(ParadigmKind::SimpleReaction))
    }
}

impl Paradigm for SimpleReaction {
    type Stimulus = GoSignal;
    type Response = ();

    fn kind(&self) -> ParadigmKind {
        ParadigmKind::SimpleReaction
    }

    fn config(&self) -> &ParadigmConfig {
        &self.config
    }

    fn generate<R: Rng>(&mut self, _rng: &mut R) -> GoSignal {
        GoSignal
    }

    fn interpret_key(&self, key: &Key) -> Option<()> {
        (key.as_str() == Key::SPACE).then_some(())
    }

    fn classify_response(&self, _stimulus: &GoSignal, _response: &()) -> Classification {
        Classification::new(true, TrialMetadata::default())
    }

    // Only reachable when a response window is configured.
    fn classify_timeout(&self, _stimulus: &GoSignal) -> Classification {
        Classification::new(false, TrialMetadata::timed_out())
    }

    fn classify_early(&self, _response: &()) -> Option<Classification> {
        Some(Classification::new(false, TrialMetadata::too_early()))
    }

    fn correct_response(&self, _stimulus: &GoSignal) -> Option<()> {
        Some(())
    }

    fn response_options(&self) -> Vec<()> {
        vec![()]
    }
}
