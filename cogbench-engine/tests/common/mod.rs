#![allow(dead_code)]

use cogbench_core::SessionSummary;
use cogbench_engine::{EngineCallbacks, Paradigm, TrialEngine};
use cogbench_timing::ManualTimer;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct Observed {
    pub stats: Vec<(u32, u32)>,
    pub summaries: Vec<SessionSummary>,
}

pub type Shared = Rc<RefCell<Observed>>;

pub type TestEngine<P> = TrialEngine<P, ManualTimer, StdRng>;

pub fn engine<P: Paradigm>(paradigm: P, seed: u64) -> (TestEngine<P>, Shared) {
    let observed: Shared = Rc::default();
    let on_finish = {
        let observed = observed.clone();
        move |summary| observed.borrow_mut().summaries.push(summary)
    };
    let on_stats = {
        let observed = observed.clone();
        move |count, hits| observed.borrow_mut().stats.push((count, hits))
    };
    let engine = TrialEngine::new(
        paradigm,
        ManualTimer::new(),
        StdRng::seed_from_u64(seed),
        EngineCallbacks::new(on_finish, on_stats),
    );
    (engine, observed)
}

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}
