//! Passive observer of the external order-placement stream.
//!
//! The messaging transport and deserialization live outside this
//! crate; the sink consumes already-typed events and logs preparation
//! start. It mutates no state, so a processing failure is terminal for
//! that message; there is nothing to compensate.

pub mod event;
pub mod sink;

pub use event::{OrderItemDetails, OrderPlacedEvent};
pub use sink::OrderPlacedSink;
