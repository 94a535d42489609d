//! Round-robin loop executor
//!
//! Runs a fixed, ordered set of tasks forever. Each iteration first
//! busy-waits the configured period, then runs every task once in
//! registration order. The list cannot change after construction.
//!
//! Tasks are not isolated from each other: two tasks must not drive the
//! same pin or peripheral unless their accesses commute.

use super::task::Task;
use crate::time::{Clock, Millis};

/// Loop executor over `N` tasks
pub struct Scheduler<'a, C, const N: usize> {
    clock: C,
    period: Millis,
    tasks: [&'a mut dyn Task; N],
    iterations: u32,
}

impl<'a, C: Clock, const N: usize> Scheduler<'a, C, N> {
    /// Create a scheduler. Execution order is the array order.
    pub fn new(clock: C, period: Millis, tasks: [&'a mut dyn Task; N]) -> Self {
        Self {
            clock,
            period,
            tasks,
            iterations: 0,
        }
    }

    /// Delay between the end of one iteration and the start of the next
    pub fn period(&self) -> Millis {
        self.period
    }

    /// Number of registered tasks
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Completed iterations (wraps)
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Wait one period, then run every task once
    pub fn run_iteration(&mut self) {
        self.clock.wait_for(self.period);

        for task in self.tasks.iter_mut() {
            task.run();
        }

        self.iterations = self.iterations.wrapping_add(1);
    }

    /// Run forever
    pub fn run(&mut self) -> ! {
        loop {
            self.run_iteration();
        }
    }
}
