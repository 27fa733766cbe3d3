//! Layered application configuration.

use crate::cli::Cli;
use crate::logging::{LogFormat, verbosity_to_directive};
use anyhow::{Context, Result};
use cogbench_core::ParadigmKind;
use cogbench_engine::{KeyMapError, ParadigmConfig, StroopKeyMap};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "cogbench.yaml";
pub const ENV_PREFIX: &str = "COGBENCH_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `cogbench_engine=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Human,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: Option<u64>,
    /// JSON Lines file that session reports are appended to; stdout when unset
    pub output: Option<PathBuf>,
    pub log: LogConfig,
    pub simple_reaction: ParadigmConfig,
    pub choice_reaction: ParadigmConfig,
    pub go_no_go: ParadigmConfig,
    pub working_memory: ParadigmConfig,
    pub stroop: ParadigmConfig,
    /// Colour name to key code, e.g. `red: KeyJ`
    pub stroop_keys: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            output: None,
            log: LogConfig::default(),
            simple_reaction: ParadigmConfig::defaults(ParadigmKind::SimpleReaction),
            choice_reaction: ParadigmConfig::defaults(ParadigmKind::ChoiceReaction),
            go_no_go: ParadigmConfig::defaults(ParadigmKind::GoNoGo),
            working_memory: ParadigmConfig::defaults(ParadigmKind::WorkingMemory),
            stroop: ParadigmConfig::defaults(ParadigmKind::Stroop),
            stroop_keys: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    pub fn paradigm(&self, kind: ParadigmKind) -> &ParadigmConfig {
        match kind {
            ParadigmKind::SimpleReaction => &self.simple_reaction,
            ParadigmKind::ChoiceReaction => &self.choice_reaction,
            ParadigmKind::GoNoGo => &self.go_no_go,
            ParadigmKind::WorkingMemory => &self.working_memory,
            ParadigmKind::Stroop => &self.stroop,
        }
    }

    /// Default Stroop bindings with the configured overrides applied.
    pub fn stroop_key_map(&self) -> Result<StroopKeyMap, KeyMapError> {
        let mut keys = StroopKeyMap::default();
        keys.apply(
            self.stroop_keys
                .iter()
                .map(|(color, code)| (color.as_str(), code.as_str())),
        )?;
        Ok(keys)
    }

    /// CLI flags win over every other layer.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(output) = &cli.output {
            self.output = Some(output.clone());
        }
        if let Some(format) = cli.log_format {
            self.log.format = format;
        }
        if let Some(level) = verbosity_to_directive(cli.verbose) {
            self.log.level = level.to_string();
        }
        self
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Precedence (lowest to highest):
    /// 1. built-in defaults
    /// 2. `path`, or `./cogbench.yaml` when no path is given (optional)
    /// 3. `COGBENCH_*` environment variables, `__` separating nested keys
    pub fn load(path: Option<&Path>) -> Result<AppConfig> {
        let file = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        if path.is_some() && !file.exists() {
            anyhow::bail!("config file {} does not exist", file.display());
        }
        let config: AppConfig = Self::figment(file)
            .extract()
            .with_context(|| format!("failed to load configuration ({})", file.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    pub fn figment(file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::file(file))
            // COGBENCH_LOG is the log filter, not the `log` table
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["log"]).split("__"))
    }

    pub fn validate(config: &AppConfig) -> Result<()> {
        for kind in ParadigmKind::ALL {
            config
                .paradigm(kind)
                .validate()
                .with_context(|| format!("invalid settings for {}", kind.display_name()))?;
        }
        config
            .stroop_key_map()
            .context("invalid stroop_keys")?;
        Ok(())
    }
}
