use crate::config::ParadigmConfig;
use crate::paradigm::{Classification, Paradigm};
use cogbench_core::{ColorName, Key, ParadigmKind, StroopStimulus, TrialMetadata};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyMapError {
    #[error("key `{key}` is already assigned to {color}")]
    KeyInUse { key: String, color: ColorName },

    #[error("unknown colour `{0}`")]
    UnknownColor(String),
}

/// Which key selects which ink colour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StroopKeyMap {
    keys: [Key; 4],
}

impl Default for StroopKeyMap {
    fn default() -> Self {
        Self {
            keys: [Key::digit(1), Key::digit(2), Key::digit(3), Key::digit(4)],
        }
    }
}

impl StroopKeyMap {
    pub fn key_for(&self, color: ColorName) -> &Key {
        &self.keys[color.index()]
    }

    pub fn color_for(&self, key: &Key) -> Option<ColorName> {
        self.keys
            .iter()
            .position(|k| k == key)
            .and_then(ColorName::from_index)
    }

    /// Binds `key` to `color`. Rebinding a colour to its own key is fine; stealing
    /// another colour's key is not.
    pub fn assign(&mut self, color: ColorName, key: Key) -> Result<(), KeyMapError> {
        if let Some(owner) = self.color_for(&key) {
            if owner != color {
                return Err(KeyMapError::KeyInUse {
                    key: key.to_string(),
                    color: owner,
                });
            }
        }
        self.keys[color.index()] = key;
        Ok(())
    }

    /// Applies `(colour name, key code)` pairs in order.
    pub fn apply<'a>(
        &mut self,
        bindings: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<(), KeyMapError> {
        for (name, code) in bindings {
            let color =
                ColorName::parse(name).ok_or_else(|| KeyMapError::UnknownColor(name.to_string()))?;
            self.assign(color, Key::new(code))?;
        }
        Ok(())
    }

    pub fn bindings(&self) -> impl Iterator<Item = (ColorName, &Key)> {
        ColorName::ALL.into_iter().zip(self.keys.iter())
    }
}

/// Name the ink colour of a colour word, ignoring what the word says.
#[derive(Debug, Clone)]
pub struct Stroop {
    config: ParadigmConfig,
    keys: StroopKeyMap,
}

impl Stroop {
    pub fn new(config: ParadigmConfig) -> Self {
        Self {
            config,
            keys: StroopKeyMap::default(),
        }
    }

    pub fn with_key_map(mut self, keys: StroopKeyMap) -> Self {
        self.keys = keys;
        self
    }

    pub fn key_map(&self) -> &StroopKeyMap {
        &self.keys
    }
}

impl Default for Stroop {
    fn default() -> Self {
        Self::new(ParadigmConfig::defaults(ParadigmKind::Stroop))
    }
}

fn random_color<R: Rng>(rng: &mut R) -> ColorName {
    ColorName::ALL[rng.random_range(0..ColorName::ALL.len())]
}

impl Paradigm for Stroop {
    type Stimulus = StroopStimulus;
    type Response = ColorName;

    fn kind(&self) -> ParadigmKind {
        ParadigmKind::Stroop
    }

    fn config(&self) -> &ParadigmConfig {
        &self.config
    }

    fn generate<R: Rng>(&mut self, rng: &mut R) -> StroopStimulus {
        let word = random_color(rng);
        let ink = if rng.random_bool(self.config.target_probability) {
            word
        } else {
            loop {
                let c = random_color(rng);
                if c != word {
                    break c;
                }
            }
        };
        StroopStimulus { word, ink }
    }

    fn interpret_key(&self, key: &Key) -> Option<ColorName> {
        self.keys.color_for(key)
    }

    fn classify_response(&self, stimulus: &StroopStimulus, response: &ColorName) -> Classification {
        let metadata = TrialMetadata {
            is_congruent: Some(stimulus.is_congruent()),
            ..Default::default()
        }
        .with_extra("wordName", stimulus.word.name())
        .with_extra("wordColor", stimulus.word.hex())
        .with_extra("displayColor", stimulus.ink.hex())
        .with_extra("selectedColorIndex", response.index())
        .with_extra("expectedColorIndex", stimulus.ink.index());
        Classification::new(*response == stimulus.ink, metadata)
    }

    fn classify_timeout(&self, stimulus: &StroopStimulus) -> Classification {
        let metadata = TrialMetadata {
            is_congruent: Some(stimulus.is_congruent()),
            ..TrialMetadata::timed_out()
        }
        .with_extra("expectedColorIndex", stimulus.ink.index());
        Classification::new(false, metadata)
    }

    fn correct_response(&self, stimulus: &StroopStimulus) -> Option<ColorName> {
        Some(stimulus.ink)
    }

    fn response_options(&self) -> Vec<ColorName> {
        ColorName::ALL.to_vec()
    }
}
