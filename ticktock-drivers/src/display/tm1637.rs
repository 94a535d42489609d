//! TM1637-style bit-banged display driver
//!
//! The display controller is driven over two GPIO lines (CLK and DIO)
//! with hand-timed delays; no hardware serial peripheral is involved.
//!
//! # Wire protocol
//!
//! Every transaction is framed as:
//!
//! ```text
//! Start -> SendByte -> Ack [-> SendByte -> Ack ...] -> Stop
//! ```
//!
//! - Start: DIO falls while CLK is high
//! - Stop: DIO rises while CLK is high
//! - Bits are sent LSB first, DIO is stable while CLK is high
//! - The acknowledge slot after each byte is timed but never sampled
//!
//! A digit write is three transactions: the auto-increment command, the
//! start address followed by the four digit bytes, and the brightness
//! command. The controller does not keep its brightness across a data
//! write, so brightness is sent again every time.

use ticktock_core::time::{Clock, Millis};
use ticktock_hal::OutputPin;

/// Segment patterns for digits 0-9 (bit 0 = segment A ... bit 6 = segment G)
pub const SEGMENT_DIGITS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Colon segment, carried by the second digit
pub const COLON_SEGMENT: u8 = 0x80;

/// Pattern for a digit with nothing lit
pub const BLANK_SEGMENTS: u8 = 0x00;

/// Controller command bytes
pub mod cmd {
    /// Data command: write to display registers, auto-increment address
    pub const ADDRESS_AUTO_INCREMENT: u8 = 0x40;
    /// Address command: start at the first digit
    pub const START_ADDRESS: u8 = 0xC0;
    /// Display control: display on, OR with brightness (0-7)
    pub const BRIGHTNESS: u8 = 0x88;
    /// Bits of the display control byte carrying the brightness
    pub const BRIGHTNESS_MASK: u8 = 0x07;
}

/// Brightness applied at construction
pub const DEFAULT_BRIGHTNESS: u8 = 4;

const SHORT_DELAY_MS: Millis = 2;
const MIDDLE_DELAY_MS: Millis = 3;
const LONG_DELAY_MS: Millis = 5;

/// Four digits and the colon flag for one display update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFrame {
    /// Digit values, leftmost first (0-9; anything else shows blank)
    pub digits: [u8; 4],
    /// Light the colon between the second and third digit
    pub colon: bool,
}

impl DisplayFrame {
    pub const fn new(digits: [u8; 4], colon: bool) -> Self {
        Self { digits, colon }
    }

    /// Decimal digits of `value`, no colon.
    ///
    /// Values above 9999 keep their lowest four digits.
    pub const fn from_counter(value: u16) -> Self {
        Self {
            digits: [
                ((value / 1000) % 10) as u8,
                ((value / 100) % 10) as u8,
                ((value / 10) % 10) as u8,
                (value % 10) as u8,
            ],
            colon: false,
        }
    }

    /// `HH:MM` layout; each field keeps its lowest two digits
    pub const fn from_clock(hours: u8, minutes: u8, colon: bool) -> Self {
        Self {
            digits: [(hours / 10) % 10, hours % 10, (minutes / 10) % 10, minutes % 10],
            colon,
        }
    }

    /// Segment bytes in transmission order
    pub fn encode(&self) -> [u8; 4] {
        let mut segments = self.digits.map(|d| {
            SEGMENT_DIGITS
                .get(d as usize)
                .copied()
                .unwrap_or(BLANK_SEGMENTS)
        });
        if self.colon {
            segments[1] |= COLON_SEGMENT;
        }
        segments
    }
}

/// Bit-banged 4-digit display
///
/// Owns both lines exclusively. No operation can fail: without a
/// connected display the sequence still runs to completion.
pub struct SegmentDisplay<CLK, DIO, C> {
    clk: CLK,
    dio: DIO,
    clock: C,
    brightness: u8,
    colon: bool,
}

impl<CLK: OutputPin, DIO: OutputPin, C: Clock> SegmentDisplay<CLK, DIO, C> {
    /// Take ownership of the lines and apply [`DEFAULT_BRIGHTNESS`]
    pub fn new(clk: CLK, dio: DIO, clock: C) -> Self {
        let mut display = Self {
            clk,
            dio,
            clock,
            brightness: DEFAULT_BRIGHTNESS,
            colon: false,
        };
        display.set_brightness(DEFAULT_BRIGHTNESS);
        display
    }

    /// Last brightness passed to [`set_brightness`](Self::set_brightness)
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Colon state used by the next [`set_clock`](Self::set_clock) toggle
    pub fn colon(&self) -> bool {
        self.colon
    }

    /// Show `frame`, then re-send the stored brightness
    pub fn write_digits(&mut self, frame: DisplayFrame) {
        let segments = frame.encode();

        self.start();
        self.send_byte(cmd::ADDRESS_AUTO_INCREMENT);
        self.acknowledge();
        self.stop();

        self.start();
        self.send_byte(cmd::START_ADDRESS);
        self.acknowledge();
        for byte in segments {
            self.send_byte(byte);
            self.acknowledge();
        }
        self.stop();

        self.set_brightness(self.brightness);
    }

    /// Store `level` and send it to the controller.
    ///
    /// Only the low three bits reach the wire; the stored value is kept
    /// as given.
    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = level;

        self.start();
        self.send_byte(cmd::BRIGHTNESS | (level & cmd::BRIGHTNESS_MASK));
        self.acknowledge();
        self.stop();
    }

    /// Show `value` as four decimal digits
    pub fn set_counter(&mut self, value: u16) {
        self.write_digits(DisplayFrame::from_counter(value));
    }

    /// Show `hours:minutes`, toggling the colon on every call
    pub fn set_clock(&mut self, hours: u8, minutes: u8) {
        self.colon = !self.colon;
        self.write_digits(DisplayFrame::from_clock(hours, minutes, self.colon));
    }

    /// Give back the CLK and DIO lines
    pub fn release(self) -> (CLK, DIO) {
        (self.clk, self.dio)
    }

    fn start(&mut self) {
        self.clk.set_high();
        self.dio.set_high();
        self.clock.wait_for(SHORT_DELAY_MS);
        self.dio.set_low();
    }

    fn stop(&mut self) {
        self.clk.set_low();
        self.clock.wait_for(SHORT_DELAY_MS);
        self.dio.set_low();
        self.clock.wait_for(SHORT_DELAY_MS);
        self.clk.set_high();
        self.clock.wait_for(SHORT_DELAY_MS);
        self.dio.set_high();
    }

    // Receiver may pull DIO low here; it is not read back.
    fn acknowledge(&mut self) {
        self.clk.set_low();
        self.clock.wait_for(LONG_DELAY_MS);
        self.clk.set_high();
        self.clock.wait_for(SHORT_DELAY_MS);
        self.clk.set_low();
    }

    fn send_byte(&mut self, mut value: u8) {
        for _ in 0..8 {
            self.clk.set_low();
            self.dio.set_state(value & 0x01 != 0);
            self.clock.wait_for(MIDDLE_DELAY_MS);
            self.clk.set_high();
            self.clock.wait_for(MIDDLE_DELAY_MS);
            value >>= 1;
        }
    }
}
