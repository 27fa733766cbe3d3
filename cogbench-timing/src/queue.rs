use crate::timer::TimerHandle;

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: TimerHandle,
    deadline_ns: u64,
}

/// Pending deadlines in arming order. Engines keep at most a handful armed,
/// so a linear scan beats a heap here.
#[derive(Debug, Clone, Default)]
pub(crate) struct TimerQueue {
    pending: Vec<Pending>,
    next_id: u64,
}

impl TimerQueue {
    pub fn push(&mut self, deadline_ns: u64) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push(Pending {
            handle,
            deadline_ns,
        });
        handle
    }

    pub fn remove(&mut self, handle: TimerHandle) -> bool {
        match self.pending.iter().position(|p| p.handle == handle) {
            Some(idx) => {
                self.pending.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|p| p.deadline_ns).min()
    }

    /// Earliest deadline not after `now_ns`; ties go to the first armed.
    pub fn pop_due(&mut self, now_ns: u64) -> Option<(TimerHandle, u64)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline_ns <= now_ns)
            .min_by_key(|(_, p)| (p.deadline_ns, p.handle.0))
            .map(|(idx, _)| idx)?;
        let p = self.pending.remove(idx);
        Some((p.handle, p.deadline_ns))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
