//! Blocking, timeout-bounded serial transmit
//!
//! Every call polls the status register until each byte is accepted and
//! the line is idle again. A single timeout window covers the whole call;
//! it is not reset between bytes. On every poll a line fault wins over
//! readiness, and readiness wins over the timeout check.

use core::fmt::{self, Write as _};

use heapless::String;
use ticktock_core::config::BaudDivisor;
use ticktock_core::time::{Clock, Millis};
use ticktock_hal::{LineFault, UsartRegisters};

use super::writer::SerialWriter;

/// Capacity of the formatting buffer used by [`SerialLink::print`]
pub const PRINT_BUFFER_LEN: usize = 128;

/// Why a transmit did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferError {
    /// The peripheral flagged a line fault; remaining bytes were dropped
    Fault(LineFault),
    /// The time budget ran out; remaining bytes were dropped
    Timeout,
}

impl embedded_io::Error for TransferError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            TransferError::Fault(_) => embedded_io::ErrorKind::Other,
            TransferError::Timeout => embedded_io::ErrorKind::TimedOut,
        }
    }
}

/// Why a formatted print did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrintError {
    /// Formatted text does not fit [`PRINT_BUFFER_LEN`]; nothing was sent
    Overflow,
    /// Transmit failed
    Transfer(TransferError),
}

impl From<TransferError> for PrintError {
    fn from(e: TransferError) -> Self {
        PrintError::Transfer(e)
    }
}

/// Transmit side of one USART
///
/// Owns the peripheral; the baud divisor is programmed once at
/// construction and never changes.
pub struct SerialLink<U, C> {
    usart: U,
    clock: C,
    divisor: BaudDivisor,
}

impl<U: UsartRegisters, C: Clock> SerialLink<U, C> {
    /// Take ownership of `usart` and program its baud rate
    pub fn new(mut usart: U, clock: C, divisor: BaudDivisor) -> Self {
        usart.set_baud_divisor(divisor.mantissa(), divisor.fraction());
        Self {
            usart,
            clock,
            divisor,
        }
    }

    /// Divisor programmed at construction
    pub fn divisor(&self) -> BaudDivisor {
        self.divisor
    }

    /// Send `bytes` in order and wait for the line to go idle.
    ///
    /// An empty slice skips straight to the idle wait.
    pub fn transmit(&mut self, bytes: &[u8], timeout: Millis) -> Result<(), TransferError> {
        let start = self.clock.now();
        let mut pending = bytes.iter().copied().peekable();

        while let Some(&byte) = pending.peek() {
            let status = self.usart.status();
            if let Some(fault) = status.fault() {
                return Err(TransferError::Fault(fault));
            }

            if status.tx_empty {
                self.usart.write_data(byte);
                pending.next();
            } else if self.clock.elapsed_since(start) >= timeout {
                return Err(TransferError::Timeout);
            }
        }

        loop {
            let status = self.usart.status();
            if let Some(fault) = status.fault() {
                return Err(TransferError::Fault(fault));
            }

            if status.tx_complete {
                return Ok(());
            }

            if self.clock.elapsed_since(start) >= timeout {
                return Err(TransferError::Timeout);
            }
        }
    }

    /// Format `args` and send the result as a single transmit.
    ///
    /// The whole message shares one `timeout` window.
    pub fn print(&mut self, args: fmt::Arguments<'_>, timeout: Millis) -> Result<(), PrintError> {
        let mut buf: String<PRINT_BUFFER_LEN> = String::new();
        buf.write_fmt(args).map_err(|_| PrintError::Overflow)?;
        self.transmit(buf.as_bytes(), timeout)?;
        Ok(())
    }

    /// Borrow the link as a `core::fmt` / `embedded_io` writer
    pub fn writer(&mut self, timeout: Millis) -> SerialWriter<'_, U, C> {
        SerialWriter::new(self, timeout)
    }

    /// Give back the peripheral
    pub fn release(self) -> U {
        self.usart
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::cell::Cell;
    use std::vec::Vec;
    use ticktock_core::time::Tick;
    use ticktock_hal::UsartStatus;

    /// Clock advancing one tick per read
    pub(crate) struct MockClock {
        ticks: Cell<Tick>,
    }

    impl MockClock {
        pub(crate) fn new() -> Self {
            Self { ticks: Cell::new(0) }
        }

        pub(crate) fn peek(&self) -> Tick {
            self.ticks.get()
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Tick {
            let t = self.ticks.get();
            self.ticks.set(t + 1);
            t
        }
    }

    /// Scriptable USART
    pub(crate) struct MockUsart {
        pub(crate) written: Vec<u8>,
        pub(crate) divisor: Option<(u16, u8)>,
        /// Transmit register accepts a byte on every n-th poll (0 = never)
        pub(crate) ready_every: usize,
        /// Transmit register stops accepting after this many bytes
        pub(crate) stall_after: Option<usize>,
        /// Fault flag appears once this many bytes were written
        pub(crate) fault_after: Option<(usize, LineFault)>,
        /// Line goes idle once everything is written
        pub(crate) completes: bool,
        pub(crate) polls: Cell<usize>,
    }

    impl MockUsart {
        pub(crate) fn healthy() -> Self {
            Self {
                written: Vec::new(),
                divisor: None,
                ready_every: 1,
                stall_after: None,
                fault_after: None,
                completes: true,
                polls: Cell::new(0),
            }
        }
    }

    impl UsartRegisters for MockUsart {
        fn status(&self) -> UsartStatus {
            let poll = self.polls.get() + 1;
            self.polls.set(poll);

            let stalled = self
                .stall_after
                .is_some_and(|n| self.written.len() >= n);
            let tx_empty = !stalled && self.ready_every != 0 && poll % self.ready_every == 0;

            let mut status = UsartStatus {
                tx_empty,
                tx_complete: self.completes,
                ..Default::default()
            };

            if let Some((after, fault)) = self.fault_after {
                if self.written.len() >= after {
                    match fault {
                        LineFault::Parity => status.parity_error = true,
                        LineFault::Framing => status.framing_error = true,
                        LineFault::Noise => status.noise = true,
                        LineFault::Overrun => status.overrun = true,
                    }
                }
            }

            status
        }

        fn write_data(&mut self, byte: u8) {
            self.written.push(byte);
        }

        fn set_baud_divisor(&mut self, mantissa: u16, fraction: u8) {
            self.divisor = Some((mantissa, fraction));
        }
    }

    fn link(usart: MockUsart, clock: &MockClock) -> SerialLink<MockUsart, &MockClock> {
        let divisor = BaudDivisor::compute(115_200, 72_000_000).unwrap();
        SerialLink::new(usart, clock, divisor)
    }

    #[test]
    fn test_new_programs_divisor() {
        let clock = MockClock::new();
        let link = link(MockUsart::healthy(), &clock);
        assert_eq!(link.release().divisor, Some((39, 1)));
    }

    #[test]
    fn test_transmit_sends_bytes_in_order() {
        let clock = MockClock::new();
        let mut link = link(MockUsart::healthy(), &clock);

        assert_eq!(link.transmit(b"hello", 100), Ok(()));
        assert_eq!(link.release().written, b"hello");
    }

    #[test]
    fn test_empty_transmit_is_ok_without_writes() {
        let clock = MockClock::new();
        let mut link = link(MockUsart::healthy(), &clock);

        assert_eq!(link.transmit(&[], 0), Ok(()));
        let usart = link.release();
        assert!(usart.written.is_empty());
        // Only the idle check touched the status register
        assert_eq!(usart.polls.get(), 1);
    }

    #[test]
    fn test_fault_aborts_immediately() {
        let clock = MockClock::new();
        let usart = MockUsart {
            fault_after: Some((0, LineFault::Parity)),
            ..MockUsart::healthy()
        };
        let mut link = link(usart, &clock);

        assert_eq!(
            link.transmit(b"abc", 1000),
            Err(TransferError::Fault(LineFault::Parity))
        );
        assert!(link.release().written.is_empty());
    }

    #[test]
    fn test_fault_mid_transfer_drops_remaining_bytes() {
        let clock = MockClock::new();
        let usart = MockUsart {
            fault_after: Some((2, LineFault::Overrun)),
            ..MockUsart::healthy()
        };
        let mut link = link(usart, &clock);

        assert_eq!(
            link.transmit(b"abcdef", 1000),
            Err(TransferError::Fault(LineFault::Overrun))
        );
        assert_eq!(link.release().written, b"ab");
    }

    #[test]
    fn test_fault_beats_ready_and_timeout() {
        let clock = MockClock::new();
        let usart = MockUsart {
            fault_after: Some((0, LineFault::Noise)),
            ..MockUsart::healthy()
        };
        let mut link = link(usart, &clock);

        assert_eq!(
            link.transmit(b"x", 0),
            Err(TransferError::Fault(LineFault::Noise))
        );
    }

    #[test]
    fn test_fault_while_waiting_for_idle() {
        let clock = MockClock::new();
        let usart = MockUsart {
            fault_after: Some((3, LineFault::Framing)),
            completes: false,
            ..MockUsart::healthy()
        };
        let mut link = link(usart, &clock);

        assert_eq!(
            link.transmit(b"abc", 1000),
            Err(TransferError::Fault(LineFault::Framing))
        );
        assert_eq!(link.release().written, b"abc");
    }

    #[test]
    fn test_zero_timeout_when_not_ready() {
        let clock = MockClock::new();
        let usart = MockUsart {
            ready_every: 0,
            ..MockUsart::healthy()
        };
        let mut link = link(usart, &clock);

        assert_eq!(link.transmit(b"x", 0), Err(TransferError::Timeout));
        let usart = link.release();
        assert!(usart.written.is_empty());
        assert_eq!(usart.polls.get(), 1);
    }

    #[test]
    fn test_timeout_when_never_ready() {
        let clock = MockClock::new();
        let usart = MockUsart {
            ready_every: 0,
            ..MockUsart::healthy()
        };
        let mut link = link(usart, &clock);

        assert_eq!(link.transmit(b"xyz", 25), Err(TransferError::Timeout));
        assert!(clock.peek() >= 25);
        assert!(link.release().written.is_empty());
    }

    #[test]
    fn test_timeout_after_stall_keeps_sent_prefix() {
        let clock = MockClock::new();
        let usart = MockUsart {
            stall_after: Some(3),
            ..MockUsart::healthy()
        };
        let mut link = link(usart, &clock);

        assert_eq!(link.transmit(b"abcdef", 10), Err(TransferError::Timeout));
        assert_eq!(link.release().written, b"abc");
    }

    #[test]
    fn test_timeout_covers_whole_call() {
        // Each byte needs three not-ready polls (three ticks) before it is
        // accepted: ~30 ticks for ten bytes. A per-byte budget of 20 would
        // never expire; the whole-call budget does.
        let clock = MockClock::new();
        let usart = MockUsart {
            ready_every: 4,
            ..MockUsart::healthy()
        };
        let mut link = link(usart, &clock);

        assert_eq!(link.transmit(&[0x55; 10], 20), Err(TransferError::Timeout));
        let written = link.release().written.len();
        assert!(written > 0 && written < 10);
    }

    #[test]
    fn test_timeout_waiting_for_idle() {
        let clock = MockClock::new();
        let usart = MockUsart {
            completes: false,
            ..MockUsart::healthy()
        };
        let mut link = link(usart, &clock);

        assert_eq!(link.transmit(b"ab", 15), Err(TransferError::Timeout));
        assert_eq!(link.release().written, b"ab");
    }

    #[test]
    fn test_print_sends_formatted_text() {
        let clock = MockClock::new();
        let mut link = link(MockUsart::healthy(), &clock);

        assert_eq!(link.print(format_args!("t={}s\n", 42), 100), Ok(()));
        assert_eq!(link.release().written, b"t=42s\n");
    }

    #[test]
    fn test_print_overflow_sends_nothing() {
        let clock = MockClock::new();
        let mut link = link(MockUsart::healthy(), &clock);
        let long = [b'x'; PRINT_BUFFER_LEN + 1];
        let text = core::str::from_utf8(&long).unwrap();

        assert_eq!(
            link.print(format_args!("{}", text), 100),
            Err(PrintError::Overflow)
        );
        assert!(link.release().written.is_empty());
    }

    #[test]
    fn test_print_reports_transfer_error() {
        let clock = MockClock::new();
        let usart = MockUsart {
            ready_every: 0,
            ..MockUsart::healthy()
        };
        let mut link = link(usart, &clock);

        assert_eq!(
            link.print(format_args!("hi"), 5),
            Err(PrintError::Transfer(TransferError::Timeout))
        );
    }
}
