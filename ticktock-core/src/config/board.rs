//! Board configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::divisor::BaudDivisor;
use crate::time::Millis;

/// Largest mantissa the 12-bit baud rate register field can hold
pub const MAX_BAUD_MANTISSA: u32 = 0x0FFF;

/// Highest display brightness level
pub const MAX_BRIGHTNESS: u8 = 7;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Scheduler loop period is zero
    ZeroLoopPeriod,
    /// Baud rate is zero
    ZeroBaudRate,
    /// Peripheral clock too slow for the baud rate (mantissa would be 0)
    BaudRateTooHigh,
    /// Mantissa does not fit the baud rate register
    BaudRateTooLow,
    /// Brightness above [`MAX_BRIGHTNESS`]
    BrightnessOutOfRange,
}

/// Serial link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerialConfig {
    /// Line rate in bits per second
    pub baud_rate: u32,
    /// Clock feeding the USART peripheral in Hz
    pub peripheral_clock_hz: u32,
    /// Time budget for one formatted print
    pub print_timeout_ms: Millis,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            peripheral_clock_hz: 72_000_000,
            print_timeout_ms: 1000,
        }
    }
}

/// Segment display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Initial brightness (0-7)
    pub brightness: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { brightness: 4 }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Delay before each scheduler iteration
    pub loop_period_ms: Millis,
    pub serial: SerialConfig,
    pub display: DisplayConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            loop_period_ms: 1000,
            serial: SerialConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl SerialConfig {
    /// Accepts exactly the rates [`BaudDivisor::compute`] can program
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baud_rate == 0 {
            return Err(ConfigError::ZeroBaudRate);
        }

        if BaudDivisor::compute(self.baud_rate, self.peripheral_clock_hz).is_some() {
            return Ok(());
        }

        // The peripheral oversamples 16x per bit
        if u64::from(self.peripheral_clock_hz) < u64::from(self.baud_rate) * 16 {
            Err(ConfigError::BaudRateTooHigh)
        } else {
            Err(ConfigError::BaudRateTooLow)
        }
    }
}

impl BoardConfig {
    /// Check every field, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loop_period_ms == 0 {
            return Err(ConfigError::ZeroLoopPeriod);
        }

        self.serial.validate()?;

        if self.display.brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::BrightnessOutOfRange);
        }

        Ok(())
    }
}
