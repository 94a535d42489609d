//! Cooperative task scheduler
//!
//! A fixed list of independent tasks, polled once each per loop
//! iteration after a fixed delay.

pub mod executor;
pub mod task;

pub use executor::Scheduler;
pub use task::Task;
