//! Interrupt-side plumbing
//!
//! [`HandlerChain`] is the ordered list of callbacks bound to one
//! interrupt line. [`EventFlag`] carries "this happened" from interrupt
//! context to a foreground task without sharing any peripheral.

use core::sync::atomic::{AtomicBool, Ordering};

/// Ordered, fixed set of handlers for one interrupt line
///
/// Built as a `static` and dispatched from the line's vector. Handlers
/// run in array order, in interrupt context, so they must be short and
/// must not block.
pub struct HandlerChain<const N: usize> {
    handlers: [fn(); N],
}

impl<const N: usize> HandlerChain<N> {
    pub const fn new(handlers: [fn(); N]) -> Self {
        Self { handlers }
    }

    /// Call every handler in order
    pub fn dispatch(&self) {
        for handler in &self.handlers {
            handler();
        }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

/// Single-bit mailbox from an interrupt to the foreground
///
/// Raising an already raised flag is a no-op; events that arrive before
/// the foreground takes the flag coalesce into one.
pub struct EventFlag {
    raised: AtomicBool,
}

impl EventFlag {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Mark the event as pending (interrupt context)
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Consume the pending event, returning whether there was one
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::Acquire)
    }

    /// Check without consuming
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

impl Default for EventFlag {
    fn default() -> Self {
        Self::new()
    }
}
