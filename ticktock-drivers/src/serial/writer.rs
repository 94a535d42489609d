//! Writer adapters over a [`SerialLink`]

use core::fmt;

use ticktock_core::time::{Clock, Millis};
use ticktock_hal::UsartRegisters;

use super::link::{SerialLink, TransferError};

/// Borrowed writer that sends every chunk as one transmit
///
/// Each `write` call gets its own `timeout` window.
pub struct SerialWriter<'a, U, C> {
    link: &'a mut SerialLink<U, C>,
    timeout: Millis,
}

impl<'a, U: UsartRegisters, C: Clock> SerialWriter<'a, U, C> {
    pub fn new(link: &'a mut SerialLink<U, C>, timeout: Millis) -> Self {
        Self { link, timeout }
    }
}

impl<U: UsartRegisters, C: Clock> fmt::Write for SerialWriter<'_, U, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.link
            .transmit(s.as_bytes(), self.timeout)
            .map_err(|_| fmt::Error)
    }
}

impl<U, C> embedded_io::ErrorType for SerialWriter<'_, U, C> {
    type Error = TransferError;
}

impl<U: UsartRegisters, C: Clock> embedded_io::Write for SerialWriter<'_, U, C> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.link.transmit(buf, self.timeout)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        // transmit already waits for the line to go idle
        Ok(())
    }
}
