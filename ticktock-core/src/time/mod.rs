//! Monotonic time
//!
//! Time is counted in ticks of a periodic hardware interrupt. The tick
//! period is fixed at [`TICK_PERIOD_MS`], so a tick count and a duration
//! in milliseconds are the same number.

pub mod tick;
pub mod time_of_day;

pub use tick::{TickClock, TickCounter};
pub use time_of_day::TimeOfDay;

/// Raw tick counter value; wraps around on overflow
pub type Tick = u32;

/// Duration in milliseconds
pub type Millis = u32;

/// Period of the tick interrupt
pub const TICK_PERIOD_MS: u32 = 1;

/// Ticks between an `earlier` and a `later` reading.
///
/// Correct across counter overflow as long as the true distance is less
/// than the counter range.
#[inline]
pub const fn elapsed(earlier: Tick, later: Tick) -> Millis {
    later.wrapping_sub(earlier)
}

/// Source of monotonic time
pub trait Clock {
    /// Current tick count
    fn now(&self) -> Tick;

    /// Milliseconds since `start`
    fn elapsed_since(&self, start: Tick) -> Millis {
        elapsed(start, self.now())
    }

    /// Busy-wait until `duration` has elapsed.
    ///
    /// Never returns early and cannot be cancelled.
    fn wait_for(&self, duration: Millis) {
        let start = self.now();
        while self.elapsed_since(start) < duration {
            core::hint::spin_loop();
        }
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Tick {
        C::now(self)
    }
}
