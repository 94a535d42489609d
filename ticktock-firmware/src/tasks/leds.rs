//! Switch-controlled LEDs
//!
//! Green (PB13) follows the switch on PA8, red (PB14) the switch on PA15.

use ticktock_core::scheduler::Task;
use ticktock_hal::{InputPin, OutputPin};

pub struct LedsTask<O, I> {
    green: O,
    red: O,
    green_switch: I,
    red_switch: I,
}

impl<O: OutputPin, I: InputPin> LedsTask<O, I> {
    /// Both LEDs are switched on until the first run
    pub fn new(mut green: O, mut red: O, green_switch: I, red_switch: I) -> Self {
        green.set_high();
        red.set_high();
        Self {
            green,
            red,
            green_switch,
            red_switch,
        }
    }
}

impl<O: OutputPin, I: InputPin> Task for LedsTask<O, I> {
    fn run(&mut self) {
        self.green.set_state(self.green_switch.is_high());
        self.red.set_state(self.red_switch.is_high());
    }
}
