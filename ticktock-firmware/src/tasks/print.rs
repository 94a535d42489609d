//! Greeting on button press
//!
//! The EXTI0 handler only raises [`BUTTON`]; the serial link is driven
//! from here, in the foreground.

use defmt::warn;
use ticktock_core::interrupt::EventFlag;
use ticktock_core::scheduler::Task;
use ticktock_core::time::{Clock, Millis};
use ticktock_drivers::serial::SerialLink;
use ticktock_hal::UsartRegisters;

/// Raised from EXTI0 on a rising edge of PA0
pub static BUTTON: EventFlag = EventFlag::new();

/// Sets [`BUTTON`]; registered in the EXTI0 handler chain
pub fn on_button() {
    BUTTON.raise();
}

pub struct PrintTask<'a, U, C> {
    link: SerialLink<U, C>,
    button: &'a EventFlag,
    timeout: Millis,
}

impl<'a, U: UsartRegisters, C: Clock> PrintTask<'a, U, C> {
    pub fn new(link: SerialLink<U, C>, button: &'a EventFlag, timeout: Millis) -> Self {
        Self {
            link,
            button,
            timeout,
        }
    }
}

impl<U: UsartRegisters, C: Clock> Task for PrintTask<'_, U, C> {
    fn run(&mut self) {
        if !self.button.take() {
            return;
        }

        // No retry: the next press tries again
        if let Err(e) = self.link.print(format_args!("Hello World!\n"), self.timeout) {
            warn!("Greeting not sent: {}", e);
        }
    }
}
