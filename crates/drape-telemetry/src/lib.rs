//! # drape-telemetry
//!
//! Event bus for simulation telemetry. The engine emits structured
//! events (step timing, constraint passes, contacts, SDF rebuilds) that
//! pluggable sinks consume: an in-memory log, `tracing`, or a JSON-lines
//! writer.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, JsonLinesSink, TracingSink, VecSink};
