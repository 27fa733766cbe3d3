use crate::cli::{Command, SimulateArgs};
use crate::config::AppConfig;
use crate::input;
use crate::screen::{self, Screen};
use crate::session::{self, SessionOutcome};
use crate::sink::{CompleteReport, JsonFileSink, ResultSink, StdoutSink};
use anyhow::{Context, Result};
use cogbench_core::ParadigmKind;
use cogbench_engine::{ChoiceReaction, GoNoGo, NBack, SimpleReaction, Stroop, SyntheticParticipant};
use console::Term;
use rand::Rng;
use tracing::info;

/// Builds the paradigm for `kind` and hands it to `f`.
macro_rules! with_paradigm {
    ($config:expr, $kind:expr, |$p:ident| $body:expr) => {{
        let cfg = $config.paradigm($kind).clone();
        match $kind {
            ParadigmKind::SimpleReaction => {
                let $p = SimpleReaction::new(cfg);
                $body
            }
            ParadigmKind::ChoiceReaction => {
                let $p = ChoiceReaction::new(cfg);
                $body
            }
            ParadigmKind::GoNoGo => {
                let $p = GoNoGo::new(cfg);
                $body
            }
            ParadigmKind::WorkingMemory => {
                let $p = NBack::new(cfg);
                $body
            }
            ParadigmKind::Stroop => {
                let $p = Stroop::new(cfg).with_key_map($config.stroop_key_map()?);
                $body
            }
        }
    }};
}

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn run(self, command: Command) -> Result<()> {
        match command {
            Command::List => self.list(),
            Command::Run(args) => self.play(args.paradigm),
            Command::Simulate(args) => self.simulate(&args),
        }
    }

    fn seed(&self) -> u64 {
        self.config.seed.unwrap_or_else(|| rand::rng().random())
    }

    fn list(&self) -> Result<()> {
        let keys = self.config.stroop_key_map()?;
        for kind in ParadigmKind::ALL {
            let cfg = self.config.paradigm(kind);
            println!(
                "{:<16} {:<16} {:>3} trials  {}",
                kind.id(),
                kind.display_name(),
                cfg.trials,
                screen::instructions(kind, &keys)
            );
        }
        Ok(())
    }

    fn play(&self, kind: ParadigmKind) -> Result<()> {
        let seed = self.seed();
        info!(paradigm = %kind, seed, "starting session");

        let term = Term::stdout();
        let screen = Screen::new(term.clone());
        screen
            .intro(kind, &screen::instructions(kind, &self.config.stroop_key_map()?))
            .context("failed to draw on the terminal")?;
        let (events, _reader) = input::spawn(term).context("failed to start keyboard input")?;

        let outcome = with_paradigm!(self.config, kind, |p| session::play(
            p, seed, &screen, &events
        )?);
        self.report(kind, seed, outcome)
    }

    fn simulate(&self, args: &SimulateArgs) -> Result<()> {
        let seed = self.seed();
        let participant =
            SyntheticParticipant::new(args.accuracy, (args.min_rt_ms, args.max_rt_ms))
                .context("invalid simulated participant")?;
        info!(paradigm = %args.paradigm, seed, ?participant, "simulating session");

        let outcome = with_paradigm!(self.config, args.paradigm, |p| session::simulate(
            p,
            seed,
            &participant
        ));
        self.report(args.paradigm, seed, outcome)
    }

    fn report(&self, kind: ParadigmKind, seed: u64, outcome: SessionOutcome) -> Result<()> {
        let Some(summary) = outcome.summary else {
            println!("Session abandoned, nothing recorded.");
            return Ok(());
        };
        let report = CompleteReport::new(kind, seed, summary, outcome.elapsed);
        info!(
            paradigm = %kind,
            accuracy = report.summary.accuracy,
            avg_rt_ms = report.summary.avg_reaction_time_ms,
            "session complete"
        );
        let mut sink: Box<dyn ResultSink> = match &self.config.output {
            Some(path) => Box::new(JsonFileSink::new(path)),
            None => Box::new(StdoutSink),
        };
        sink.submit(&report).context("failed to store session report")?;
        Ok(())
    }
}
