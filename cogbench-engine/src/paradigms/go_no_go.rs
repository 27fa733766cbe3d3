use crate::config::ParadigmConfig;
use crate::paradigm::{Classification, Paradigm};
use cogbench_core::{GoNoGoCue, Key, ParadigmKind, ResponseClass, TrialMetadata};
use rand::Rng;

/// Press Space for a go cue, withhold for a no-go cue, within the response window.
#[derive(Debug, Clone)]
pub struct GoNoGo {
    config: ParadigmConfig,
}

impl GoNoGo {
    pub fn new(config: ParadigmConfig) -> Self {
        Self { config }
    }

    fn classify(&self, cue: &GoNoGoCue, responded: bool) -> Classification {
        let outcome = ResponseClass::classify(cue.is_go(), responded);
        let metadata = TrialMetadata {
            is_go_trial: Some(cue.is_go()),
            outcome: Some(outcome),
            timeout: (!responded).then_some(true),
            ..Default::default()
        };
        Classification::new(outcome.is_correct(), metadata)
    }
}

impl Default for GoNoGo {
    fn default() -> Self {
        Self::new(ParadigmConfig::defaults(ParadigmKind::GoNoGo))
    }
}

impl Paradigm for GoNoGo {
    type Stimulus = GoNoGoCue;
    type Response = ();

    fn kind(&self) -> ParadigmKind {
        ParadigmKind::GoNoGo
    }

    fn config(&self) -> &ParadigmConfig {
        &self.config
    }

    fn generate<R: Rng>(&mut self, rng: &mut R) -> GoNoGoCue {
        if rng.random_bool(self.config.target_probability) {
            GoNoGoCue::Go
        } else {
            GoNoGoCue::NoGo
        }
    }

    fn interpret_key(&self, key: &Key) -> Option<()> {
        (key.as_str() == Key::SPACE).then_some(())
    }

    fn classify_response(&self, stimulus: &GoNoGoCue, _response: &()) -> Classification {
        self.classify(stimulus, true)
    }

    fn classify_timeout(&self, stimulus: &GoNoGoCue) -> Classification {
        self.classify(stimulus, false)
    }

    fn correct_response(&self, stimulus: &GoNoGoCue) -> Option<()> {
        stimulus.is_go().then_some(())
    }

    fn response_options(&self) -> Vec<()> {
        vec![()]
    }
}
