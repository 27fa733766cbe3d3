use cogbench_core::SessionSummary;
use std::fmt;

type StatsFn = Box<dyn FnMut(u32, u32)>;
type FinishFn = Box<dyn FnOnce(SessionSummary)>;

/// The two externally visible effects of an engine.
///
/// `on_finish` is consumed when it runs, so a session can report at most once.
pub struct EngineCallbacks {
    on_update_stats: StatsFn,
    on_finish: Option<FinishFn>,
}

impl EngineCallbacks {
    pub fn new(
        on_finish: impl FnOnce(SessionSummary) + 'static,
        on_update_stats: impl FnMut(u32, u32) + 'static,
    ) -> Self {
        Self {
            on_update_stats: Box::new(on_update_stats),
            on_finish: Some(Box::new(on_finish)),
        }
    }

    pub fn noop() -> Self {
        Self::new(|_| {}, |_, _| {})
    }

    pub(crate) fn update_stats(&mut self, count: u32, hits: u32) {
        (self.on_update_stats)(count, hits);
    }

    /// Returns false if the finish callback already ran.
    pub(crate) fn finish(&mut self, summary: SessionSummary) -> bool {
        match self.on_finish.take() {
            Some(cb) => {
                cb(summary);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for EngineCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineCallbacks")
            .field("finished", &self.on_finish.is_none())
            .finish()
    }
}
