//! Unit of scheduled work

/// An independently schedulable unit of repeated work
///
/// A task owns the peripheral handles it needs. It is created at startup,
/// polled forever and never dropped. Tasks run to completion; any blocking
/// they do (busy-waits, bounded serial transmits) delays every task after
/// them in the same iteration.
pub trait Task {
    /// Do one slice of work
    fn run(&mut self);
}

impl<T: Task + ?Sized> Task for &mut T {
    fn run(&mut self) {
        T::run(self)
    }
}
