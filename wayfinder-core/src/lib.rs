//! wayfinder-core: shared types for the corridor navigation engine
//!
//! Leaf crate holding the object vocabulary, observation record, navigation
//! state enumeration and announcement types shared by the engine and the
//! operator-facing tools. No async, no I/O.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    Announcement, AnnouncementKind, NavigationState, NavigationStatus, ObjectType, Observation,
};
