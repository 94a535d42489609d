//! Scheduler tasks
//!
//! Registration order in `main` is execution order: print, LEDs, clock.
//! Each task owns the peripherals it drives.

pub mod clock_display;
pub mod leds;
pub mod print;

pub use clock_display::ClockDisplayTask;
pub use leds::LedsTask;
pub use print::PrintTask;
