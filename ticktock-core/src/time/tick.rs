//! Interrupt-driven tick counter
//!
//! The counter is written by exactly one interrupt handler and read by
//! foreground code. A plain load/store on a machine word is all the
//! synchronisation that needs; the interrupt must never wait on the
//! foreground, so there is no lock.

use core::sync::atomic::{AtomicU32, Ordering};

use embedded_hal::delay::DelayNs;
use ticktock_hal::PeriodicTimer;

use super::{Clock, Tick, TICK_PERIOD_MS};

/// Tick counter shared between the timer interrupt and the foreground
///
/// Lives in a `static` so the interrupt handler can reach it; everything
/// else accesses it through a [`TickClock`] handle.
pub struct TickCounter {
    ticks: AtomicU32,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
        }
    }

    /// Advance the counter by one tick.
    ///
    /// Interrupt context only. This is the single writer, so a load
    /// followed by a store cannot lose an increment.
    #[inline]
    pub fn on_tick(&self) {
        let next = self.ticks.load(Ordering::Relaxed).wrapping_add(1);
        self.ticks.store(next, Ordering::Relaxed);
    }

    /// Current counter value
    #[inline]
    pub fn ticks(&self) -> Tick {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Only called before the timer interrupt is armed
    fn reset(&self) {
        self.ticks.store(0, Ordering::Relaxed);
    }

    #[cfg(test)]
    pub(crate) fn preset(&self, ticks: Tick) {
        self.ticks.store(ticks, Ordering::Relaxed);
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Foreground handle to a running [`TickCounter`]
///
/// Cheap to copy; hand one to every driver that needs time.
#[derive(Clone, Copy)]
pub struct TickClock<'a> {
    counter: &'a TickCounter,
}

impl<'a> TickClock<'a> {
    /// Reset the counter to zero and start the periodic interrupt.
    pub fn start<T: PeriodicTimer>(counter: &'a TickCounter, timer: &mut T) -> Self {
        counter.reset();
        timer.start_periodic(TICK_PERIOD_MS);
        Self { counter }
    }
}

impl Clock for TickClock<'_> {
    #[inline]
    fn now(&self) -> Tick {
        self.counter.ticks()
    }
}

/// Delays are rounded up to whole ticks.
impl DelayNs for TickClock<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.wait_for(ns.div_ceil(1_000_000))
    }

    fn delay_us(&mut self, us: u32) {
        self.wait_for(us.div_ceil(1_000))
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wait_for(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::thread;

    struct MockTimer {
        period_ms: Option<u32>,
    }

    impl PeriodicTimer for MockTimer {
        fn start_periodic(&mut self, period_ms: u32) {
            self.period_ms = Some(period_ms);
        }
    }

    /// Run `f` while a background thread plays the timer interrupt.
    fn with_ticking<R>(counter: &TickCounter, f: impl FnOnce() -> R) -> R {
        let done = AtomicBool::new(false);
        thread::scope(|s| {
            s.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    counter.on_tick();
                    thread::yield_now();
                }
            });
            let result = f();
            done.store(true, Ordering::Relaxed);
            result
        })
    }

    #[test]
    fn test_start_resets_and_arms_timer() {
        let counter = TickCounter::new();
        counter.preset(1234);
        let mut timer = MockTimer { period_ms: None };

        let clock = TickClock::start(&counter, &mut timer);

        assert_eq!(timer.period_ms, Some(TICK_PERIOD_MS));
        assert_eq!(clock.now(), 0);
    }

    #[test]
    fn test_on_tick_increments_by_one() {
        let counter = TickCounter::new();
        let clock = TickClock { counter: &counter };

        counter.on_tick();
        counter.on_tick();
        counter.on_tick();

        assert_eq!(clock.now(), 3);
    }

    #[test]
    fn test_counter_wraps() {
        let counter = TickCounter::new();
        counter.preset(u32::MAX);
        counter.on_tick();
        assert_eq!(counter.ticks(), 0);
    }

    #[test]
    fn test_wait_for_with_interrupt_running() {
        let counter = TickCounter::new();
        let clock = TickClock { counter: &counter };

        let (start, end) = with_ticking(&counter, || {
            let start = clock.now();
            clock.wait_for(50);
            (start, clock.now())
        });

        assert!(super::super::elapsed(start, end) >= 50);
    }

    #[test]
    fn test_wait_for_across_counter_overflow() {
        let counter = TickCounter::new();
        counter.preset(u32::MAX - 10);
        let clock = TickClock { counter: &counter };

        let end = with_ticking(&counter, || {
            clock.wait_for(25);
            clock.now()
        });

        // Still on the far side of the wrap, not stuck before it
        assert!(end >= 14 && end < u32::MAX - 10);
    }

    #[test]
    fn test_delay_ns_rounds_up_to_a_tick() {
        let counter = TickCounter::new();
        let mut clock = TickClock { counter: &counter };

        let end = with_ticking(&counter, || {
            clock.delay_us(1);
            clock.now()
        });

        assert!(end >= 1);
    }
}
