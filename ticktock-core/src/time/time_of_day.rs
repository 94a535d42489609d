//! Wall clock bookkeeping
//!
//! A free-running 24 hour clock advanced one second at a time by the
//! caller. There is no RTC behind it; it starts at 00:00:00 on reset.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SECONDS_PER_MINUTE: u8 = 60;
const MINUTES_PER_HOUR: u8 = 60;
const HOURS_PER_DAY: u8 = 24;

/// Hours, minutes and seconds since midnight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeOfDay {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl TimeOfDay {
    /// Midnight
    pub const fn new() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// Build from components, `None` if any is out of range
    pub const fn from_hms(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        if hours >= HOURS_PER_DAY || minutes >= MINUTES_PER_HOUR || seconds >= SECONDS_PER_MINUTE
        {
            return None;
        }
        Some(Self {
            hours,
            minutes,
            seconds,
        })
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Advance by one second, rolling over at midnight
    pub fn advance_second(&mut self) {
        self.seconds += 1;
        if self.seconds < SECONDS_PER_MINUTE {
            return;
        }

        self.seconds = 0;
        self.minutes += 1;
        if self.minutes < MINUTES_PER_HOUR {
            return;
        }

        self.minutes = 0;
        self.hours += 1;
        if self.hours >= HOURS_PER_DAY {
            self.hours = 0;
        }
    }
}
