//! Realtime boundary: event envelopes, the broadcast gateway contract, and
//! the in-process connection registry.

pub mod events;
pub mod gateway;
pub mod registry;
