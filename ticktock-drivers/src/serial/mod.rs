//! Serial link (transmit only)

pub mod link;
pub mod writer;

pub use ticktock_core::config::BaudDivisor;
pub use link::{PrintError, SerialLink, TransferError, PRINT_BUFFER_LEN};
pub use writer::SerialWriter;
