use crate::config::ParadigmConfig;
use crate::paradigm::{Classification, Paradigm};
use cogbench_core::{DigitStimulus, Key, ParadigmKind, ResponseClass, TrialMetadata};
use rand::Rng;

/// 1-back: press Space when the digit repeats the one before it.
#[derive(Debug, Clone)]
pub struct NBack {
    config: ParadigmConfig,
    previous: Option<u8>,
}

impl NBack {
    pub fn new(config: ParadigmConfig) -> Self {
        Self {
            config,
            previous: None,
        }
    }

    fn classify(&self, stimulus: &DigitStimulus, responded: bool) -> Classification {
        let outcome = ResponseClass::classify(stimulus.is_match(), responded);
        let metadata = TrialMetadata {
            is_match: Some(stimulus.is_match()),
            outcome: Some(outcome),
            timeout: (!responded).then_some(true),
            ..Default::default()
        };
        Classification::new(outcome.is_correct(), metadata)
    }
}

impl Default for NBack {
    fn default() -> Self {
        Self::new(ParadigmConfig::defaults(ParadigmKind::WorkingMemory))
    }
}

impl Paradigm for NBack {
    type Stimulus = DigitStimulus;
    type Response = ();

    fn kind(&self) -> ParadigmKind {
        ParadigmKind::WorkingMemory
    }

    fn config(&self) -> &ParadigmConfig {
        &self.config
    }

    fn generate<R: Rng>(&mut self, rng: &mut R) -> DigitStimulus {
        let previous = self.previous;
        let forced_match =
            previous.is_some() && rng.random_bool(self.config.target_probability);
        let digit = match previous {
            Some(prev) if forced_match => prev,
            _ => loop {
                let d = rng.random_range(1..=9u8);
                if Some(d) != previous {
                    break d;
                }
            },
        };
        self.previous = Some(digit);
        DigitStimulus {
            digit,
            previous,
            forced_match,
        }
    }

    fn interpret_key(&self, key: &Key) -> Option<()> {
        (key.as_str() == Key::SPACE).then_some(())
    }

    fn classify_response(&self, stimulus: &DigitStimulus, _response: &()) -> Classification {
        self.classify(stimulus, true)
    }

    fn classify_timeout(&self, stimulus: &DigitStimulus) -> Classification {
        self.classify(stimulus, false)
    }

    fn correct_response(&self, stimulus: &DigitStimulus) -> Option<()> {
        stimulus.is_match().then_some(())
    }

    fn response_options(&self) -> Vec<()> {
        vec![()]
    }
}
