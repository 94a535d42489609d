//! USART register abstraction
//!
//! The serial link polls the peripheral's status register directly in its
//! timing loop, so the abstraction is a thin register view rather than a
//! buffered read/write API.

/// Hardware line faults reported in the status register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineFault {
    /// Parity error
    Parity,
    /// Framing error
    Framing,
    /// Noise detected on the line
    Noise,
    /// Overrun error
    Overrun,
}

/// One snapshot of the USART status register
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsartStatus {
    pub parity_error: bool,
    pub framing_error: bool,
    pub noise: bool,
    pub overrun: bool,
    /// Transmit data register empty: the next byte may be written
    pub tx_empty: bool,
    /// Shift register drained: the last byte has left the pin
    pub tx_complete: bool,
}

impl UsartStatus {
    /// First fault flag set in this snapshot, if any
    pub fn fault(&self) -> Option<LineFault> {
        if self.parity_error {
            Some(LineFault::Parity)
        } else if self.framing_error {
            Some(LineFault::Framing)
        } else if self.noise {
            Some(LineFault::Noise)
        } else if self.overrun {
            Some(LineFault::Overrun)
        } else {
            None
        }
    }
}

/// Transmit-side USART registers
///
/// Implementations own the peripheral exclusively; there is one instance
/// per physical USART for the lifetime of the program.
pub trait UsartRegisters {
    /// Read the status register
    fn status(&self) -> UsartStatus;

    /// Write one byte to the transmit data register
    fn write_data(&mut self, byte: u8);

    /// Program the baud rate register
    ///
    /// `fraction` is in sixteenths of a peripheral clock tick (0-15).
    fn set_baud_divisor(&mut self, mantissa: u16, fraction: u8);
}
