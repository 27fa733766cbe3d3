use crate::config::ParadigmConfig;
use crate::paradigm::{Classification, Paradigm};
use cogbench_core::{ArrowDirection, Key, ParadigmKind, TrialMetadata};
use rand::Rng;

/// Press the arrow key matching the direction shown.
#[derive(Debug, Clone)]
pub struct ChoiceReaction {
    config: ParadigmConfig,
}

impl ChoiceReaction {
    pub fn new(config: ParadigmConfig) -> Self {
        Self { config }
    }
}

impl Default for ChoiceReaction {
    fn default() -> Self {
        Self::new(ParadigmConfig::defaults(ParadigmKind::ChoiceReaction))
    }
}

impl Paradigm for ChoiceReaction {
    type Stimulus = ArrowDirection;
    type Response = ArrowDirection;

    fn kind(&self) -> ParadigmKind {
        ParadigmKind::ChoiceReaction
    }

    fn config(&self) -> &ParadigmConfig {
        &self.config
    }

    fn generate<R: Rng>(&mut self, rng: &mut R) -> ArrowDirection {
        if rng.random_bool(self.config.target_probability) {
            ArrowDirection::Left
        } else {
            ArrowDirection::Right
        }
    }

    fn interpret_key(&self, key: &Key) -> Option<ArrowDirection> {
        ArrowDirection::from_key(key)
    }

    fn classify_response(
        &self,
        stimulus: &ArrowDirection,
        response: &ArrowDirection,
    ) -> Classification {
        let metadata = TrialMetadata {
            expected_key: Some(stimulus.key().to_string()),
            actual_key: Some(response.key().to_string()),
            ..Default::default()
        };
        Classification::new(stimulus == response, metadata)
    }

    fn classify_timeout(&self, stimulus: &ArrowDirection) -> Classification {
        let metadata = TrialMetadata {
            expected_key: Some(stimulus.key().to_string()),
            ..TrialMetadata::timed_out()
        };
        Classification::new(false, metadata)
    }

    fn correct_response(&self, stimulus: &ArrowDirection) -> Option<ArrowDirection> {
        Some(*stimulus)
    }

    fn response_options(&self) -> Vec<ArrowDirection> {
        vec![ArrowDirection::Left, ArrowDirection::Right]
    }
}
