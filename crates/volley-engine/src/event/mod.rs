//! Typed publish/subscribe primitive.
//!
//! Every stateful capability owns one [`EventChannel`] scoped to its entity.
//! Dispatch is synchronous and single-threaded: `emit` returns only after all
//! listeners registered for that event kind have run (or one has failed).

mod channel;

pub use channel::{Event, EventChannel, ListenerId};
