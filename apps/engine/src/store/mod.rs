//! Shared mutable state: the session store and the timer registry.

pub mod sessions;
pub mod timers;
