//! 4-digit 7-segment display

pub mod tm1637;

pub use tm1637::{DisplayFrame, SegmentDisplay};
