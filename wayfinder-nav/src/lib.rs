//! wayfinder-nav: sequential corridor-navigation decision engine
//!
//! Turns a noisy, frame-by-frame stream of object classifications into a
//! small number of reliable, temporally-gated voice instructions that guide
//! a person through a fixed sequence of corridors.
//!
//! The engine is an actor with a single mailbox: detection events, timer
//! callbacks and operator queries are all serialized onto one task, which is
//! what makes the state machine's guards safe without locks.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod speech;
pub mod stabilizer;

pub use catalog::{Waypoint, WaypointCatalog, WaypointId};
pub use config::NavConfig;
pub use engine::{NavigationEngine, NavigationHandle};
pub use error::NavError;
pub use gate::AnnouncementGate;
pub use speech::{ConsoleSpeechSink, MemorySpeechSink, SpeechSink};
pub use stabilizer::DetectionStabilizer;
