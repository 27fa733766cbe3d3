use cogbench_core::Stimulus;

/// The trial currently in flight
#[derive(Debug, Clone)]
pub struct ActiveTrial<S: Stimulus> {
    /// 1-based, equals the record number this trial will produce
    pub number: u32,
    pub stimulus: Option<S>,
    pub timestamps: TrialTimestamps,
}

/// Session-clock timestamps in ns
#[derive(Debug, Clone, Default)]
pub struct TrialTimestamps {
    pub waiting_start: u64,
    pub onset: Option<u64>,
    pub response: Option<u64>,
}

impl<S: Stimulus> ActiveTrial<S> {
    pub fn new(number: u32, waiting_start: u64) -> Self {
        Self {
            number,
            stimulus: None,
            timestamps: TrialTimestamps {
                waiting_start,
                onset: None,
                response: None,
            },
        }
    }

    /// Onset-to-response latency in ms, if both happened.
    pub fn reaction_time_ms(&self) -> Option<f64> {
        let onset = self.timestamps.onset?;
        let response = self.timestamps.response?;
        Some(response.saturating_sub(onset) as f64 / 1_000_000.0)
    }

    pub fn started_at_ms(&self) -> f64 {
        self.timestamps.waiting_start as f64 / 1_000_000.0
    }
}
