//! GPIO pin abstractions
//!
//! Pins are configured (direction, pull, drive mode) by the chip HAL when
//! they are constructed; after that only level access is needed. None of
//! these operations can fail.

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Invert the driven level
    fn toggle(&mut self);

    /// Drive the pin to `high`
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Level currently written to the output data register
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Sampled level of the pin
    fn is_high(&self) -> bool;

    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        T::set_high(self)
    }

    fn set_low(&mut self) {
        T::set_low(self)
    }

    fn toggle(&mut self) {
        T::toggle(self)
    }

    fn is_set_high(&self) -> bool {
        T::is_set_high(self)
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        T::is_high(self)
    }
}
