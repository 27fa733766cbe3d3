mod queue;
pub mod sleep;
pub mod timer;

pub use sleep::precise_sleep;
pub use timer::{
    saturating_nanos, CalibrationStats, ManualTimer, MonotonicTimer, Timer, TimerHandle, VirtualClock,
};
