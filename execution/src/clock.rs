//! Countdown that closes betting.
//!
//! The clock never reads wall time. An external source calls [`RoundClock::tick`] on a
//! fixed cadence (once per second in the service) and the clock reports what happened.

/// Result of one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockTick {
    pub remaining: u32,
    /// `MM:SS` of `remaining`.
    pub display: String,
    /// Set on exactly one tick: the one that reached zero.
    pub lock: bool,
}

#[derive(Clone, Debug)]
pub struct RoundClock {
    duration: u32,
    remaining: u32,
    locked: bool,
}

impl RoundClock {
    /// Callers validate `duration > 0` (see [`crate::RoundConfig::validate`]).
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            locked: false,
        }
    }

    pub fn tick(&mut self) -> ClockTick {
        let mut lock = false;
        if !self.locked && self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.locked = true;
                lock = true;
            }
        }
        ClockTick {
            remaining: self.remaining,
            display: format_clock(self.remaining),
            lock,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Rewind to the configured duration for the next round.
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.locked = false;
    }
}

/// Format whole seconds as zero-padded `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
