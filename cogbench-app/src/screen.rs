//! Plain-text task display on stdout.

use cogbench_core::{ParadigmKind, Stimulus, TrialPhase, TrialRecord};
use cogbench_engine::StroopKeyMap;
use console::{Term, style};
use std::io;

pub const WAITING_LABEL: &str = "Waiting...";

pub fn instructions(kind: ParadigmKind, keys: &StroopKeyMap) -> String {
    match kind {
        ParadigmKind::SimpleReaction => {
            "Press Space as soon as the signal appears. Pressing early counts as a miss.".into()
        }
        ParadigmKind::ChoiceReaction => "Press the arrow key pointing the same way.".into(),
        ParadigmKind::GoNoGo => "Press Space on GO. Do nothing on STOP.".into(),
        ParadigmKind::WorkingMemory => {
            "Press Space when the digit is the same as the one before it.".into()
        }
        ParadigmKind::Stroop => {
            let hints: Vec<String> = keys
                .bindings()
                .map(|(color, key)| format!("{} {}", key.label(), color.name()))
                .collect();
            format!("Name the INK colour, not the word: {}.", hints.join(", "))
        }
    }
}

pub fn feedback_line(record: &TrialRecord) -> String {
    let meta = &record.metadata;
    if meta.is_too_early() {
        return "Too early!".into();
    }
    match (record.correct, meta.is_timeout(), record.reaction_time_ms) {
        (true, true, _) => "Correct, well withheld".into(),
        (true, false, Some(rt)) => format!("Correct  {rt:.0} ms"),
        (true, false, None) => "Correct".into(),
        (false, true, _) => "Too slow".into(),
        (false, false, _) => "Wrong".into(),
    }
}

/// Lines shown for the engine's current state.
pub fn frame<S: Stimulus>(
    phase: TrialPhase,
    stimulus: Option<&S>,
    last: Option<&TrialRecord>,
    (current, quota): (u32, u32),
    hits: u32,
) -> Vec<String> {
    let status = format!("Trial {current}/{quota}   correct {hits}");
    let body = match phase {
        TrialPhase::Idle | TrialPhase::Waiting => WAITING_LABEL.to_string(),
        TrialPhase::Armed => stimulus.map_or_else(String::new, |s| s.to_string()),
        TrialPhase::Feedback => last.map_or_else(String::new, feedback_line),
        TrialPhase::Finished => "Session complete".to_string(),
    };
    vec![status, String::new(), body]
}

pub struct Screen {
    term: Term,
}

impl Screen {
    pub fn new(term: Term) -> Self {
        Self { term }
    }

    pub fn intro(&self, kind: ParadigmKind, instructions: &str) -> io::Result<()> {
        self.term.clear_screen()?;
        self.term
            .write_line(&style(kind.display_name()).bold().to_string())?;
        self.term.write_line(instructions)?;
        self.term.write_line("Esc quits.")
    }

    pub fn draw(&self, lines: &[String]) -> io::Result<()> {
        self.term.clear_screen()?;
        for line in lines {
            self.term.write_line(line)?;
        }
        Ok(())
    }
}
