//! Dreambox progress-event infrastructure.
//!
//! This crate owns the typed event vocabulary that generation pipelines
//! publish and the transport layer serializes:
//!
//! - [`GenerationEvent`] — the canonical progress event, serialized to the
//!   exact wire shapes the streaming endpoints emit.
//! - [`ProgressEmitter`] — non-blocking, channel-backed emitter decoupling
//!   pipeline timing from transport delivery timing.

pub mod emitter;
pub mod progress;

pub use emitter::ProgressEmitter;
pub use progress::{CompleteData, GenerationEvent};
