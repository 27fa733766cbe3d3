use crate::accumulator::SessionAccumulator;
use crate::callbacks::EngineCallbacks;
use crate::paradigm::{Classification, Paradigm};
use crate::trial::ActiveTrial;
use cogbench_core::{Key, Stimulus, TrialPhase, TrialRecord};
use cogbench_timing::{saturating_nanos, Timer, TimerHandle, VirtualClock};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerSlot {
    Wait,
    Response,
    Feedback,
}

/// Outstanding timer handles, at most one per slot.
#[derive(Debug, Default)]
struct PendingTimers {
    wait: Option<TimerHandle>,
    response: Option<TimerHandle>,
    feedback: Option<TimerHandle>,
}

impl PendingTimers {
    fn slot_mut(&mut self, slot: TimerSlot) -> &mut Option<TimerHandle> {
        match slot {
            TimerSlot::Wait => &mut self.wait,
            TimerSlot::Response => &mut self.response,
            TimerSlot::Feedback => &mut self.feedback,
        }
    }

    fn arm<T: Timer>(&mut self, timer: &mut T, slot: TimerSlot, delay: Duration) {
        let entry = self.slot_mut(slot);
        if let Some(old) = entry.take() {
            timer.cancel(old);
        }
        *entry = Some(timer.arm(delay));
    }

    fn cancel_all<T: Timer>(&mut self, timer: &mut T) {
        for handle in [self.wait.take(), self.response.take(), self.feedback.take()]
            .into_iter()
            .flatten()
        {
            timer.cancel(handle);
        }
    }

    /// Matches a fired handle to its slot and clears it. Unknown handles are stale.
    fn claim(&mut self, handle: TimerHandle) -> Option<TimerSlot> {
        [TimerSlot::Wait, TimerSlot::Response, TimerSlot::Feedback]
            .into_iter()
            .find(|slot| {
                let entry = self.slot_mut(*slot);
                if *entry == Some(handle) {
                    *entry = None;
                    true
                } else {
                    false
                }
            })
    }

    fn is_empty(&self) -> bool {
        self.wait.is_none() && self.response.is_none() && self.feedback.is_none()
    }
}

/// One session of one paradigm, driven by timer expiries and key events.
///
/// The engine never blocks. The owner feeds it input through [`handle_key`](Self::handle_key)
/// or [`respond`](Self::respond) and lets timers run with [`pump`](Self::pump); every
/// callback runs to completion before the next one is looked at.
pub struct TrialEngine<P, T, R>
where
    P: Paradigm,
    T: Timer,
    R: Rng,
{
    paradigm: P,
    timer: T,
    rng: R,
    callbacks: EngineCallbacks,
    phase: TrialPhase,
    current: Option<ActiveTrial<P::Stimulus>>,
    accumulator: SessionAccumulator,
    timers: PendingTimers,
    disposed: bool,
}

impl<P, T, R> TrialEngine<P, T, R>
where
    P: Paradigm,
    T: Timer,
    R: Rng,
{
    pub fn new(paradigm: P, timer: T, rng: R, callbacks: EngineCallbacks) -> Self {
        Self {
            paradigm,
            timer,
            rng,
            callbacks,
            phase: TrialPhase::Idle,
            current: None,
            accumulator: SessionAccumulator::new(),
            timers: PendingTimers::default(),
            disposed: false,
        }
    }

    /// Starts the session. Returns false if it was already started or disposed.
    pub fn start(&mut self) -> bool {
        if self.disposed || self.phase != TrialPhase::Idle {
            trace!(phase = ?self.phase, "start ignored");
            return false;
        }
        info!(
            paradigm = %self.paradigm.kind(),
            quota = self.paradigm.quota(),
            "session started"
        );
        self.enter_waiting();
        true
    }

    /// Cancels every outstanding timer and stops reacting to input.
    /// Safe to call in any phase and any number of times.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.timers.cancel_all(&mut self.timer);
        self.disposed = true;
        debug!(phase = ?self.phase, trials = self.accumulator.count(), "engine disposed");
    }

    /// Feeds a key event pressed now. Returns true if it completed a trial.
    pub fn handle_key(&mut self, key: &Key) -> bool {
        let now = self.timer.now();
        self.handle_key_at(key, now)
    }

    /// Feeds a key event read at timer timestamp `at`, which is used for the
    /// reaction time. Timestamps before onset count as the onset itself.
    pub fn handle_key_at(&mut self, key: &Key, at: u64) -> bool {
        if self.disposed {
            return false;
        }
        match self.paradigm.interpret_key(key) {
            Some(response) => self.respond_at(response, at),
            None => {
                trace!(%key, "key ignored by paradigm");
                false
            }
        }
    }

    /// Feeds an already interpreted response. Returns true if it completed a trial.
    pub fn respond(&mut self, response: P::Response) -> bool {
        let now = self.timer.now();
        self.respond_at(response, now)
    }

    pub fn respond_at(&mut self, response: P::Response, at: u64) -> bool {
        if self.disposed {
            return false;
        }
        if !self.phase.allows_input() {
            trace!(phase = ?self.phase, "response outside window ignored");
            return false;
        }
        if self.phase.accepts_response() {
            self.complete_with_response(response, at);
            return true;
        }
        match self.paradigm.classify_early(&response) {
            Some(classification) => {
                debug!(trial = self.trial_number(), "response before onset");
                self.complete(classification, None);
                true
            }
            None => {
                trace!("response while waiting ignored");
                false
            }
        }
    }

    /// Runs every expired timer in deadline order. Returns how many fired.
    pub fn pump(&mut self) -> usize {
        let mut fired = 0;
        while let Some(handle) = self.timer.take_expired() {
            self.on_timer(handle);
            fired += 1;
        }
        fired
    }

    fn on_timer(&mut self, handle: TimerHandle) {
        if self.disposed {
            return;
        }
        match self.timers.claim(handle) {
            Some(TimerSlot::Wait) => self.on_wait_elapsed(),
            Some(TimerSlot::Response) => self.on_response_deadline(),
            Some(TimerSlot::Feedback) => self.on_feedback_elapsed(),
            None => trace!(?handle, "stale timer ignored"),
        }
    }

    fn enter(&mut self, next: TrialPhase) {
        assert!(
            self.phase.can_transition_to(next),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        debug!(trial = self.trial_number(), from = ?self.phase, to = ?next, "phase transition");
        self.phase = next;
    }

    fn enter_waiting(&mut self) {
        self.timers.cancel_all(&mut self.timer);
        self.enter(TrialPhase::Waiting);

        let index = self.accumulator.count();
        self.current = Some(ActiveTrial::new(index + 1, self.timer.now()));
        let delay = self.paradigm.wait_delay(index, &mut self.rng);
        self.timers.arm(&mut self.timer, TimerSlot::Wait, delay);
    }

    fn on_wait_elapsed(&mut self) {
        if self.phase != TrialPhase::Waiting {
            return;
        }
        self.timers.cancel_all(&mut self.timer);
        self.enter(TrialPhase::Armed);

        let stimulus = self.paradigm.generate(&mut self.rng);
        let now = self.timer.now();
        if let Some(trial) = self.current.as_mut() {
            debug!(trial = trial.number, stimulus = %stimulus.label(), "stimulus onset");
            trial.stimulus = Some(stimulus);
            trial.timestamps.onset = Some(now);
        }
        if let Some(window) = self.paradigm.response_window() {
            self.timers.arm(&mut self.timer, TimerSlot::Response, window);
        }
    }

    fn complete_with_response(&mut self, response: P::Response, at: u64) {
        let Some(trial) = self.current.as_mut() else {
            return;
        };
        let onset = trial.timestamps.onset.unwrap_or(at);
        trial.timestamps.response = Some(at.max(onset));
        let rt = trial.reaction_time_ms();
        let Some(stimulus) = trial.stimulus.as_ref() else {
            return;
        };
        let classification = self.paradigm.classify_response(stimulus, &response);
        self.complete(classification, rt);
    }

    fn on_response_deadline(&mut self) {
        // A response may already have completed this trial.
        if self.phase != TrialPhase::Armed {
            return;
        }
        let Some(stimulus) = self.current.as_ref().and_then(|t| t.stimulus.as_ref()) else {
            return;
        };
        let classification = self.paradigm.classify_timeout(stimulus);
        debug!(trial = self.trial_number(), "response window closed");
        self.complete(classification, None);
    }

    /// Appends the record for the current trial and shows feedback.
    fn complete(&mut self, classification: Classification, reaction_time_ms: Option<f64>) {
        let Some(trial) = self.current.as_ref() else {
            return;
        };
        let record = TrialRecord {
            trial_number: trial.number,
            correct: classification.correct,
            reaction_time_ms,
            timestamp_ms: trial.started_at_ms(),
            metadata: classification.metadata,
        };
        debug!(
            trial = record.trial_number,
            correct = record.correct,
            rt_ms = ?record.reaction_time_ms,
            "trial complete"
        );
        self.accumulator.record(record);

        self.timers.cancel_all(&mut self.timer);
        self.enter(TrialPhase::Feedback);
        let dwell = self.paradigm.feedback_dwell();
        self.timers.arm(&mut self.timer, TimerSlot::Feedback, dwell);
    }

    fn on_feedback_elapsed(&mut self) {
        if self.phase != TrialPhase::Feedback {
            return;
        }
        let (count, hits) = (self.accumulator.count(), self.accumulator.hits());
        self.callbacks.update_stats(count, hits);
        if count >= self.paradigm.quota() {
            self.finish();
        } else {
            self.enter_waiting();
        }
    }

    fn finish(&mut self) {
        self.timers.cancel_all(&mut self.timer);
        self.enter(TrialPhase::Finished);
        self.current = None;

        let summary = self.accumulator.finalize();
        info!(
            paradigm = %self.paradigm.kind(),
            trials = summary.trials.len(),
            accuracy = summary.accuracy,
            avg_rt_ms = summary.avg_reaction_time_ms,
            "session finished"
        );
        self.callbacks.finish(summary);
    }

    fn trial_number(&self) -> u32 {
        self.current.as_ref().map_or(0, |t| t.number)
    }

    pub fn phase(&self) -> TrialPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Stimulus on screen, if one has been shown in the current trial.
    pub fn stimulus(&self) -> Option<&P::Stimulus> {
        self.current.as_ref().and_then(|t| t.stimulus.as_ref())
    }

    pub fn last_record(&self) -> Option<&TrialRecord> {
        self.accumulator.last()
    }

    pub fn records(&self) -> &[TrialRecord] {
        self.accumulator.trials()
    }

    pub fn count(&self) -> u32 {
        self.accumulator.count()
    }

    pub fn hits(&self) -> u32 {
        self.accumulator.hits()
    }

    /// (current trial, quota); the current trial is the one in flight or the last one.
    pub fn trial_progress(&self) -> (u32, u32) {
        let current = self
            .current
            .as_ref()
            .map_or(self.accumulator.count(), |t| t.number);
        (current, self.paradigm.quota())
    }

    /// Whether the engine itself holds any armed timer.
    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn paradigm(&self) -> &P {
        &self.paradigm
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

impl<P, T, R> TrialEngine<P, T, R>
where
    P: Paradigm,
    T: VirtualClock,
    R: Rng,
{
    /// Moves a virtual clock forward, firing each due timer at its own deadline.
    pub fn advance(&mut self, by: Duration) {
        let target = self.timer.now().saturating_add(saturating_nanos(by));
        while let Some(deadline) = self.timer.next_deadline() {
            if deadline > target {
                break;
            }
            let now = self.timer.now().max(deadline);
            self.timer.set_now(now);
            self.pump();
        }
        self.timer.set_now(target);
    }

    /// Advances to the next armed deadline, if any. Returns false when nothing is pending.
    pub fn advance_to_next(&mut self) -> bool {
        match self.timer.next_deadline() {
            Some(deadline) => {
                let gap = deadline.saturating_sub(self.timer.now());
                self.advance(Duration::from_nanos(gap));
                true
            }
            None => false,
        }
    }
}

impl<P, T, R> Drop for TrialEngine<P, T, R>
where
    P: Paradigm,
    T: Timer,
    R: Rng,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
