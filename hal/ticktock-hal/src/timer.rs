//! Periodic timer abstraction
//!
//! The tick clock needs exactly one thing from the hardware: an interrupt
//! that fires at a fixed period. Which timer provides it (SysTick, a
//! general purpose timer, ...) is up to the chip HAL.

/// A hardware timer that raises an interrupt every `period_ms`
///
/// The interrupt handler itself is bound by the firmware; it must call
/// `TickCounter::on_tick` exactly once per period.
pub trait PeriodicTimer {
    /// Program the period register and arm the interrupt.
    ///
    /// Calling this again reprograms the period and restarts counting.
    fn start_periodic(&mut self, period_ms: u32);
}

/// Reload value that makes a down-counting timer clocked at
/// `timer_clock_hz` wrap every `period_ms`.
///
/// `None` when the period is zero or needs more than `max_reload`.
pub fn reload_value(timer_clock_hz: u32, period_ms: u32, max_reload: u32) -> Option<u32> {
    let ticks = (timer_clock_hz / 1000).checked_mul(period_ms)?;
    let reload = ticks.checked_sub(1)?;
    (reload <= max_reload).then_some(reload)
}
