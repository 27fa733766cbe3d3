use std::time::Duration;

/// Sleeps with the finest resolution the platform offers.
pub fn precise_sleep(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    #[cfg(target_os = "linux")]
    linux_sleep(duration);
    #[cfg(not(target_os = "linux"))]
    std::thread::sleep(duration);
}

#[cfg(target_os = "linux")]
fn linux_sleep(duration: Duration) {
    use libc::{clock_nanosleep, timespec, CLOCK_MONOTONIC};

    let req = timespec {
        tv_sec: duration.as_secs() as libc::time_t,
        tv_nsec: duration.subsec_nanos() as libc::c_long,
    };

    // Relative sleep; an interrupted sleep just returns early and the caller re-checks its deadline.
    unsafe {
        clock_nanosleep(CLOCK_MONOTONIC, 0, &req, std::ptr::null_mut());
    }
}
