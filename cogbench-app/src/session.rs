//! Running one engine to completion, against the keyboard or a scripted participant.

use crate::input::InputEvent;
use crate::screen::{self, Screen};
use anyhow::Result;
use cogbench_core::SessionSummary;
use cogbench_engine::{EngineCallbacks, Paradigm, SyntheticParticipant, TrialEngine};
use cogbench_timing::{ManualTimer, MonotonicTimer, Timer, precise_sleep};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long to block on input when no timer is armed
const IDLE_POLL: Duration = Duration::from_millis(250);
/// Tail of each wait handed to `precise_sleep` instead of the channel
const SPIN_MARGIN: Duration = Duration::from_millis(2);

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    /// `None` when the session was abandoned
    pub summary: Option<SessionSummary>,
    pub elapsed: Duration,
}

type Finished = Rc<RefCell<Option<SessionSummary>>>;

fn callbacks(finished: &Finished) -> EngineCallbacks {
    let slot = finished.clone();
    EngineCallbacks::new(
        move |summary| *slot.borrow_mut() = Some(summary),
        |count, hits| debug!(count, hits, "stats updated"),
    )
}

/// Plays a session on a virtual clock; never blocks.
pub fn simulate<P: Paradigm>(
    paradigm: P,
    seed: u64,
    participant: &SyntheticParticipant,
) -> SessionOutcome {
    let finished = Finished::default();
    let mut engine = TrialEngine::new(
        paradigm,
        ManualTimer::new(),
        StdRng::seed_from_u64(seed),
        callbacks(&finished),
    );
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    if !participant.play(&mut engine, &mut rng) {
        warn!(phase = ?engine.phase(), "simulated session stalled");
    }
    let elapsed = Duration::from_nanos(engine.timer().now());
    drop(engine);

    SessionOutcome {
        summary: finished.take(),
        elapsed,
    }
}

/// Plays a session in real time, reading keys from `input` and drawing on `screen`.
pub fn play<P: Paradigm>(
    paradigm: P,
    seed: u64,
    screen: &Screen,
    input: &Receiver<InputEvent>,
) -> Result<SessionOutcome> {
    let finished = Finished::default();
    let mut engine = TrialEngine::new(
        paradigm,
        MonotonicTimer::new(),
        StdRng::seed_from_u64(seed),
        callbacks(&finished),
    );
    let started = Instant::now();
    engine.start();

    let mut shown = None;
    loop {
        let view = (engine.phase(), engine.trial_progress().0);
        if shown != Some(view) {
            screen.draw(&screen::frame(
                engine.phase(),
                engine.stimulus(),
                engine.last_record(),
                engine.trial_progress(),
                engine.hits(),
            ))?;
            shown = Some(view);
        }
        if engine.is_finished() {
            break;
        }

        let coarse = engine
            .timer()
            .until_next()
            .map_or(IDLE_POLL, |d| d.saturating_sub(SPIN_MARGIN));
        match input.recv_timeout(coarse) {
            Ok(InputEvent::Key { key, at }) => {
                // Deadlines that passed before the key was read win over the key.
                let at = engine.timer().stamp(at);
                if engine.timer().next_deadline().is_some_and(|d| d <= at) {
                    engine.pump();
                }
                engine.handle_key_at(&key, at);
            }
            Ok(InputEvent::Quit) | Err(RecvTimeoutError::Disconnected) => {
                info!(trials = engine.count(), "session abandoned");
                engine.dispose();
                break;
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(rest) = engine.timer().until_next() {
                    precise_sleep(rest);
                }
            }
        }
        engine.pump();
    }

    let cal = engine.timer().calibration_stats();
    debug!(
        samples = cal.samples,
        mean_lateness_us = cal.mean_lateness_ns / 1e3,
        jitter_us = cal.jitter_ns / 1e3,
        max_lateness_us = cal.max_lateness_ns / 1e3,
        "timer calibration"
    );
    drop(engine);

    Ok(SessionOutcome {
        summary: finished.take(),
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogbench_engine::{GoNoGo, NBack, SimpleReaction};

    #[test]
    fn simulation_reports_virtual_duration() {
        let outcome = simulate(SimpleReaction::default(), 8, &SyntheticParticipant::perfect(300));
        let summary = outcome.summary.unwrap();
        assert_eq!(summary.trials.len(), 5);
        assert_eq!(summary.avg_reaction_time_ms, 300.0);
        // 5 waits of at least 1.5 s, 5 responses and 5 feedback dwells
        assert!(outcome.elapsed >= Duration::from_millis(5 * (1500 + 300 + 1000)));
    }

    #[test]
    fn same_seed_same_session() {
        let who = SyntheticParticipant::default();
        let a = simulate(NBack::default(), 21, &who);
        let b = simulate(NBack::default(), 21, &who);
        assert_eq!(a, b);
    }

    #[test]
    fn quit_abandons_without_summary() {
        let (tx, rx) = std::sync::mpsc::channel();
        tx.send(InputEvent::Quit).unwrap();
        let screen = Screen::new(console::Term::buffered_stdout());
        let outcome = play(GoNoGo::default(), 1, &screen, &rx).unwrap();
        assert_eq!(outcome.summary, None);
    }

    #[test]
    fn queued_keys_are_handled_before_quit() {
        let (tx, rx) = std::sync::mpsc::channel();
        tx.send(InputEvent::Key {
            key: cogbench_core::Key::space(),
            at: Instant::now(),
        })
        .unwrap();
        tx.send(InputEvent::Quit).unwrap();
        let screen = Screen::new(console::Term::buffered_stdout());
        // The press lands in the pre-stimulus wait, which Go/No-Go ignores.
        let outcome = play(GoNoGo::default(), 1, &screen, &rx).unwrap();
        assert_eq!(outcome.summary, None);
        assert!(outcome.elapsed < Duration::from_millis(800));
    }

    #[test]
    fn closed_input_abandons_without_summary() {
        let (tx, rx) = std::sync::mpsc::channel::<InputEvent>();
        drop(tx);
        let screen = Screen::new(console::Term::buffered_stdout());
        let outcome = play(SimpleReaction::default(), 1, &screen, &rx).unwrap();
        assert!(outcome.summary.is_none());
    }
}
