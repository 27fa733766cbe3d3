mod common;

use cogbench_core::{Key, ParadigmKind, TrialPhase};
use cogbench_engine::{ChoiceReaction, GoNoGo, NBack, ParadigmConfig, SimpleReaction};
use cogbench_timing::Timer;
use common::{engine, ms};

fn go_no_go(go_probability: f64) -> GoNoGo {
    let mut cfg = ParadigmConfig::defaults(ParadigmKind::GoNoGo);
    cfg.target_probability = go_probability;
    GoNoGo::new(cfg)
}

#[test]
fn start_is_idempotent() {
    let (mut e, _) = engine(GoNoGo::default(), 1);
    assert_eq!(e.phase(), TrialPhase::Idle);
    assert!(e.start());
    assert!(!e.start());
    assert_eq!(e.phase(), TrialPhase::Waiting);
    assert_eq!(e.timer().pending(), 1);
}

#[test]
fn dispose_before_start_and_twice_is_harmless() {
    let (mut e, observed) = engine(ChoiceReaction::default(), 1);
    e.dispose();
    e.dispose();
    assert!(e.is_disposed());
    assert!(!e.has_pending_timers());
    assert_eq!(e.timer().pending(), 0);
    assert!(!e.start());
    e.advance(ms(60_000));
    assert!(observed.borrow().stats.is_empty());
}

#[test]
fn dispose_mid_session_cancels_everything() {
    let (mut e, observed) = engine(go_no_go(1.0), 1);
    e.start();
    e.advance(ms(800));
    assert_eq!(e.phase(), TrialPhase::Armed);
    assert_eq!(e.timer().pending(), 1);

    e.dispose();
    assert_eq!(e.timer().pending(), 0);
    assert!(!e.handle_key(&Key::space()));
    e.advance(ms(60_000));
    assert_eq!(e.count(), 0);
    assert!(observed.borrow().stats.is_empty());
    assert!(observed.borrow().summaries.is_empty());
}

#[test]
fn go_press_is_a_hit_with_reaction_time() {
    let (mut e, _) = engine(go_no_go(1.0), 2);
    e.start();
    e.advance(ms(800));
    e.advance(ms(320));
    assert!(e.handle_key(&Key::space()));

    let rec = e.last_record().unwrap();
    assert!(rec.correct);
    assert_eq!(rec.reaction_time_ms, Some(320.0));
    assert_eq!(rec.metadata.is_go_trial, Some(true));
    assert_eq!(e.hits(), 1);
    assert_eq!(e.phase(), TrialPhase::Feedback);
}

#[test]
fn withheld_no_go_is_a_correct_rejection() {
    let (mut e, _) = engine(go_no_go(0.0), 2);
    e.start();
    e.advance(ms(800));
    e.advance(ms(1499));
    assert_eq!(e.phase(), TrialPhase::Armed);
    e.advance(ms(1));

    let rec = e.last_record().unwrap();
    assert!(rec.correct);
    assert_eq!(rec.reaction_time_ms, None);
    assert!(rec.metadata.is_timeout());
    assert_eq!(e.hits(), 1);
}

#[test]
fn no_go_press_is_a_false_alarm() {
    let (mut e, _) = engine(go_no_go(0.0), 2);
    e.start();
    e.advance(ms(800));
    e.advance(ms(400));
    assert!(e.handle_key(&Key::space()));

    let rec = e.last_record().unwrap();
    assert!(!rec.correct);
    assert_eq!(e.hits(), 0);
}

#[test]
fn reaction_time_uses_the_key_read_timestamp() {
    let (mut e, _) = engine(go_no_go(1.0), 2);
    e.start();
    e.advance(ms(800));
    let onset = e.timer().now();
    // The key sat in the input queue for 300 ms before being handled.
    e.advance(ms(500));
    assert!(e.handle_key_at(&Key::space(), onset + 200_000_000));
    assert_eq!(e.last_record().unwrap().reaction_time_ms, Some(200.0));
}

#[test]
fn key_stamped_before_onset_counts_as_zero_latency() {
    let (mut e, _) = engine(go_no_go(1.0), 2);
    e.start();
    e.advance(ms(800));
    assert!(e.handle_key_at(&Key::space(), 0));
    assert_eq!(e.last_record().unwrap().reaction_time_ms, Some(0.0));
}

#[test]
fn input_after_finish_is_ignored() {
    let (mut e, observed) = engine(SimpleReaction::default(), 6);
    e.start();
    while !e.is_finished() {
        if e.phase() == TrialPhase::Armed {
            e.handle_key(&Key::space());
        }
        assert!(e.advance_to_next() || e.is_finished());
    }
    assert!(!e.handle_key(&Key::space()));
    assert!(!e.handle_key_at(&Key::space(), u64::MAX));
    assert_eq!(e.count(), 5);
    assert_eq!(observed.borrow().summaries.len(), 1);
}

#[test]
fn advancing_by_max_duration_saturates() {
    let (mut e, observed) = engine(go_no_go(0.0), 8);
    e.start();
    e.advance(std::time::Duration::MAX);
    assert!(e.is_finished());
    assert_eq!(e.timer().now(), u64::MAX);
    assert_eq!(observed.borrow().summaries.len(), 1);
}

#[test]
fn press_after_deadline_is_not_scored_twice() {
    let (mut e, _) = engine(go_no_go(1.0), 3);
    e.start();
    e.advance(ms(800 + 1500));
    assert_eq!(e.phase(), TrialPhase::Feedback);
    assert_eq!(e.count(), 1);

    assert!(!e.handle_key(&Key::space()));
    assert_eq!(e.count(), 1);
    assert_eq!(e.hits(), 0);
    assert_eq!(e.records().len(), 1);
}

#[test]
fn only_first_press_counts() {
    let (mut e, _) = engine(go_no_go(1.0), 3);
    e.start();
    e.advance(ms(900));
    assert!(e.handle_key(&Key::space()));
    assert!(!e.handle_key(&Key::space()));
    assert_eq!(e.count(), 1);
    // The deadline was cancelled; only the feedback timer remains.
    assert_eq!(e.timer().pending(), 1);
}

#[test]
fn irrelevant_keys_are_ignored() {
    let (mut e, _) = engine(go_no_go(1.0), 4);
    e.start();
    e.advance(ms(800));
    assert!(!e.handle_key(&Key::letter('z')));
    assert_eq!(e.phase(), TrialPhase::Armed);
}

#[test]
fn early_press_in_simple_reaction_does_not_end_session() {
    let (mut e, observed) = engine(SimpleReaction::default(), 5);
    e.start();
    e.advance(ms(1000));
    assert_eq!(e.phase(), TrialPhase::Waiting);
    assert!(e.handle_key(&Key::space()));

    let rec = e.last_record().unwrap().clone();
    assert!(!rec.correct);
    assert_eq!(rec.reaction_time_ms, None);
    assert!(rec.metadata.is_too_early());
    assert_eq!(e.phase(), TrialPhase::Feedback);
    assert_eq!(e.timer().pending(), 1);

    e.advance(ms(1000));
    assert_eq!(observed.borrow().stats, vec![(1, 0)]);
    assert_eq!(e.phase(), TrialPhase::Waiting);
    assert_eq!(e.trial_progress(), (2, 5));
}

#[test]
fn early_press_is_ignored_by_other_paradigms() {
    let (mut e, _) = engine(go_no_go(1.0), 5);
    e.start();
    e.advance(ms(400));
    assert!(!e.handle_key(&Key::space()));
    assert_eq!(e.phase(), TrialPhase::Waiting);
    assert_eq!(e.count(), 0);
}

#[test]
fn feedback_holds_for_one_second_before_stats() {
    let (mut e, observed) = engine(ChoiceReaction::default(), 6);
    e.start();
    e.advance(ms(1300));
    assert_eq!(e.phase(), TrialPhase::Armed);
    let dir = *e.stimulus().unwrap();
    assert!(e.handle_key(&dir.key()));

    e.advance(ms(999));
    assert!(observed.borrow().stats.is_empty());
    // Input during feedback is not scored.
    assert!(!e.handle_key(&dir.key()));
    e.advance(ms(1));
    assert_eq!(observed.borrow().stats, vec![(1, 1)]);
    assert_eq!(e.phase(), TrialPhase::Waiting);
}

#[test]
fn unbounded_paradigms_wait_forever() {
    let (mut e, _) = engine(ChoiceReaction::default(), 7);
    e.start();
    e.advance(ms(1300));
    assert_eq!(e.phase(), TrialPhase::Armed);
    assert!(!e.has_pending_timers());
    e.advance(ms(3_600_000));
    assert_eq!(e.phase(), TrialPhase::Armed);
    assert_eq!(e.count(), 0);
}

#[test]
fn n_back_only_waits_before_first_trial() {
    let (mut e, _) = engine(NBack::default(), 8);
    e.start();
    e.advance(ms(999));
    assert_eq!(e.phase(), TrialPhase::Waiting);
    e.advance(ms(1));
    assert_eq!(e.phase(), TrialPhase::Armed);

    e.advance(ms(1500));
    assert_eq!(e.phase(), TrialPhase::Feedback);
    e.advance(ms(1000));
    // Next digit appears straight after feedback.
    assert_eq!(e.phase(), TrialPhase::Armed);
    assert_eq!(e.trial_progress(), (2, 12));

    let first = &e.records()[0];
    assert_eq!(first.timestamp_ms, 0.0);
}

#[test]
fn record_timestamp_is_start_of_waiting() {
    let (mut e, _) = engine(go_no_go(1.0), 9);
    e.start();
    e.advance(ms(800 + 1500 + 1000));
    assert_eq!(e.phase(), TrialPhase::Waiting);
    e.advance(ms(800 + 200));
    e.handle_key(&Key::space());
    let rec = e.last_record().unwrap();
    assert_eq!(rec.trial_number, 2);
    assert_eq!(rec.timestamp_ms, 3300.0);
    assert_eq!(rec.reaction_time_ms, Some(200.0));
}

#[test]
fn foreign_timers_are_ignored() {
    let (mut e, _) = engine(go_no_go(1.0), 10);
    e.start();
    let foreign = e.timer_mut().arm(ms(100));
    e.advance(ms(100));
    assert_eq!(e.phase(), TrialPhase::Waiting);
    assert!(!e.timer_mut().cancel(foreign));
    e.advance(ms(700));
    assert_eq!(e.phase(), TrialPhase::Armed);
}

#[test]
fn finish_fires_once_and_is_absorbing() {
    let mut cfg = ParadigmConfig::defaults(ParadigmKind::GoNoGo);
    cfg.trials = 2;
    cfg.target_probability = 0.0;
    let (mut e, observed) = engine(GoNoGo::new(cfg), 11);
    e.start();
    e.advance(ms(2 * (800 + 1500 + 1000)));

    assert!(e.is_finished());
    assert_eq!(observed.borrow().summaries.len(), 1);
    assert_eq!(observed.borrow().stats, vec![(1, 1), (2, 2)]);
    assert!(!e.has_pending_timers());
    assert_eq!(e.timer().pending(), 0);

    assert!(!e.start());
    assert!(!e.handle_key(&Key::space()));
    e.advance(ms(10_000));
    e.dispose();
    assert_eq!(observed.borrow().summaries.len(), 1);

    let observed = observed.borrow();
    let summary = &observed.summaries[0];
    assert_eq!(summary.accuracy, 100.0);
    assert_eq!(summary.avg_reaction_time_ms, 0.0);
    assert_eq!(e.trial_progress(), (2, 2));
}
