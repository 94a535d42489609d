//! SysTick as the 1 ms tick source

use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::{SCB, SYST};
use ticktock_hal::timer::reload_value;
use ticktock_hal::PeriodicTimer;

/// Highest exception priority
const SYSTICK_PRIORITY: u8 = 0;

/// SysTick reload register is 24 bits wide
const MAX_RELOAD: u32 = 0x00FF_FFFF;

/// SysTick clocked from the core clock
pub struct SysTickTimer {
    syst: SYST,
    sysclk_hz: u32,
}

impl SysTickTimer {
    /// Take SysTick and raise its priority above every other source
    pub fn new(syst: SYST, scb: &mut SCB, sysclk_hz: u32) -> Self {
        // SAFETY: called once at startup before SysTick is enabled
        unsafe { scb.set_priority(SystemHandler::SysTick, SYSTICK_PRIORITY) };
        Self { syst, sysclk_hz }
    }
}

/// Panics when `period_ms` does not fit the 24-bit reload register.
impl PeriodicTimer for SysTickTimer {
    fn start_periodic(&mut self, period_ms: u32) {
        let Some(reload) = reload_value(self.sysclk_hz, period_ms, MAX_RELOAD) else {
            panic!("SysTick cannot count {} ms at {} Hz", period_ms, self.sysclk_hz);
        };
        self.syst.disable_counter();
        self.syst.set_clock_source(SystClkSource::Core);
        self.syst.set_reload(reload);
        self.syst.clear_current();
        self.syst.enable_interrupt();
        self.syst.enable_counter();
    }
}
