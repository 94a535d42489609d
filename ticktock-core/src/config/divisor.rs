//! Baud rate divisor arithmetic
//!
//! The USART divides its clock by `16 * USARTDIV` where USARTDIV is a
//! fixed-point value: a 12-bit mantissa and a 4-bit fraction in
//! sixteenths. Computing it in floating point gives off-by-one fractions
//! for rates like 230769 baud (19.50001... ticks per bit), so the ratio is
//! first rounded to four decimal places and only then split. Everything is
//! done in integer arithmetic scaled by 10^4.

use super::board::MAX_BAUD_MANTISSA;

/// Decimal places kept before splitting mantissa and fraction
const SCALE: u64 = 10_000;

/// Samples per bit
const OVERSAMPLING: u64 = 16;

/// Mantissa and fraction of a USART baud rate divisor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaudDivisor {
    mantissa: u16,
    fraction: u8,
}

impl BaudDivisor {
    /// Divisor for `baud_rate` with the peripheral clocked at
    /// `peripheral_clock_hz`.
    ///
    /// Returns `None` for a zero baud rate or when the mantissa falls
    /// outside 1..=4095.
    pub fn compute(baud_rate: u32, peripheral_clock_hz: u32) -> Option<Self> {
        if baud_rate == 0 {
            return None;
        }

        let denominator = u64::from(baud_rate) * OVERSAMPLING;
        let numerator = u64::from(peripheral_clock_hz) * SCALE;

        // ticks per bit, x10^4, rounded half up
        let scaled = (2 * numerator + denominator) / (2 * denominator);

        let mut mantissa = scaled / SCALE;
        let sixteenths = ((scaled % SCALE) * OVERSAMPLING).div_ceil(SCALE);

        // A fraction that rounds up to 16/16 carries into the mantissa
        mantissa += sixteenths / OVERSAMPLING;
        let fraction = (sixteenths % OVERSAMPLING) as u8;

        if mantissa == 0 || mantissa > u64::from(MAX_BAUD_MANTISSA) {
            return None;
        }

        Some(Self {
            mantissa: mantissa as u16,
            fraction,
        })
    }

    /// Integer part of the divisor
    pub fn mantissa(&self) -> u16 {
        self.mantissa
    }

    /// Fractional part of the divisor in sixteenths
    pub fn fraction(&self) -> u8 {
        self.fraction
    }

    /// Value for the baud rate register (`mantissa << 4 | fraction`)
    pub fn register_value(&self) -> u16 {
        (self.mantissa << 4) | u16::from(self.fraction)
    }

    /// Baud rate actually produced by this divisor
    pub fn effective_baud_rate(&self, peripheral_clock_hz: u32) -> u32 {
        peripheral_clock_hz / u32::from(self.register_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CLOCK_HZ: u32 = 72_000_000;

    #[test]
    fn test_reference_divisors_at_72mhz() {
        let cases = [
            (2400, 1875, 0),
            (9600, 468, 12),
            (19200, 234, 6),
            (57600, 78, 2),
            (88253, 51, 0),
            (115200, 39, 1),
            (230769, 19, 8),
            (461538, 9, 12),
            (923076, 4, 14),
            (2250000, 2, 0),
            (4500000, 1, 0),
        ];

        for (baud, mantissa, fraction) in cases {
            let div = BaudDivisor::compute(baud, CLOCK_HZ).unwrap();
            assert_eq!(
                (div.mantissa(), div.fraction()),
                (mantissa, fraction),
                "baud rate {}",
                baud
            );
        }
    }

    #[test]
    fn test_fraction_carry_into_mantissa() {
        // 50.9898 ticks per bit: the fraction rounds up to 16/16
        let div = BaudDivisor::compute(88253, CLOCK_HZ).unwrap();
        assert_eq!(div.mantissa(), 51);
        assert_eq!(div.fraction(), 0);
    }

    #[test]
    fn test_rounding_happens_before_split() {
        // 19.500016 ticks per bit: unrounded this would ceil to 9/16
        let div = BaudDivisor::compute(230769, CLOCK_HZ).unwrap();
        assert_eq!(div.fraction(), 8);
    }

    #[test]
    fn test_register_value() {
        let div = BaudDivisor::compute(9600, CLOCK_HZ).unwrap();
        assert_eq!(div.register_value(), 0x1D4C);
        assert_eq!(div.effective_baud_rate(CLOCK_HZ), 9600);
    }

    #[test]
    fn test_out_of_range_rates() {
        assert!(BaudDivisor::compute(0, CLOCK_HZ).is_none());
        assert!(BaudDivisor::compute(5_000_000, CLOCK_HZ).is_none());
        assert!(BaudDivisor::compute(300, CLOCK_HZ).is_none());
    }

    #[test]
    fn test_carry_past_largest_mantissa() {
        // 4095.95 ticks per bit: the fraction carries the mantissa to 4096
        assert!(BaudDivisor::compute(10, 655_352).is_none());

        // 4095.90 ticks per bit still fits as 4095 + 15/16
        let div = BaudDivisor::compute(10, 655_344).unwrap();
        assert_eq!((div.mantissa(), div.fraction()), (4095, 15));
    }

    proptest! {
        #[test]
        fn prop_divisor_tracks_requested_rate(baud in 1100u32..=4_500_000) {
            let div = BaudDivisor::compute(baud, CLOCK_HZ).unwrap();
            prop_assert!(div.fraction() < 16);

            // clock / baud, rounded to 4 places in ticks per bit, then up to a sixteenth
            let exact = f64::from(CLOCK_HZ) / f64::from(baud);
            let brr = f64::from(div.register_value());
            prop_assert!((brr - exact).abs() <= 1.001, "brr {} exact {}", brr, exact);
        }
    }
}
