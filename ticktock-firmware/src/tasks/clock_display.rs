//! Wall clock on the segment display
//!
//! Counts one second per run, so the shown time is only as accurate as
//! the scheduler period. Starts at 00:00 on every reset.

use ticktock_core::scheduler::Task;
use ticktock_core::time::{Clock, TimeOfDay};
use ticktock_drivers::display::SegmentDisplay;
use ticktock_hal::OutputPin;

pub struct ClockDisplayTask<CLK, DIO, C> {
    display: SegmentDisplay<CLK, DIO, C>,
    time: TimeOfDay,
}

impl<CLK: OutputPin, DIO: OutputPin, C: Clock> ClockDisplayTask<CLK, DIO, C> {
    pub fn new(display: SegmentDisplay<CLK, DIO, C>) -> Self {
        Self {
            display,
            time: TimeOfDay::new(),
        }
    }
}

impl<CLK: OutputPin, DIO: OutputPin, C: Clock> Task for ClockDisplayTask<CLK, DIO, C> {
    fn run(&mut self) {
        self.time.advance_second();
        self.display.set_clock(self.time.hours(), self.time.minutes());
    }
}
