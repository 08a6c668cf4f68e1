//! structviz choreography core (engine-agnostic)
//!
//! The animation choreography engine behind the structviz lessons: the
//! subsystem that takes a pre-produced sequence of timed visual mutation
//! steps and turns it into a precisely-timed, scrubbable, speed-controllable
//! playback timeline synchronized with source-code highlighting.
//!
//! This crate defines the step/sequence data model, the timeline with
//! absolute offsets, the scheduler that drives the clock from an external
//! per-frame tick, and the controller exposing the normalized (0-100)
//! control surface. Sequence producers for concrete data structures live in
//! `structviz-producers`.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod outputs;
pub mod producer;
pub mod scheduler;
pub mod stored_sequence;
pub mod time;
pub mod timeline;

// Re-exports for consumers (hosts and producer crates)
pub use config::{Config, RestartPolicy};
pub use controller::Controller;
pub use data::{EffectHandle, HighlightTarget, Sequence, Step};
pub use error::{ChoreoError, Result};
pub use outputs::{ChoreoEvent, NullObserver, Outputs, ProgressObserver, ProgressUpdate};
pub use producer::SequenceProducer;
pub use scheduler::{PlayState, PlayTransition, Scheduler, TickResult};
pub use stored_sequence::{parse_stored_sequence_json, StoredSequence};
pub use time::AnimTime;
pub use timeline::{ScheduledStep, Timeline};
