//! Shared data types for corridor navigation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Object classes the detector can emit
///
/// Closed vocabulary: labels outside this set map to `Unknown` and never
/// drive a navigation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    FireExtinguisher,
    FireHoseCabinet,
    HumanPainting,
    MainDoor,
    Peacock,
    Printer,
    TrashBin,
    VendingMachine,
    Unknown,
}

impl ObjectType {
    /// Parse a detector label (case-insensitive)
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "fire_extinguisher" | "fireextinguisher" => ObjectType::FireExtinguisher,
            "fire_hose_cabinet" | "firehosecabinet" => ObjectType::FireHoseCabinet,
            "human_painting" | "humanpainting" => ObjectType::HumanPainting,
            "main_door" | "maindoor" => ObjectType::MainDoor,
            "peacock" => ObjectType::Peacock,
            "printer" => ObjectType::Printer,
            "trash_bin" | "trashbin" => ObjectType::TrashBin,
            "vending_machine" | "vendingmachine" => ObjectType::VendingMachine,
            _ => ObjectType::Unknown,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ObjectType::FireExtinguisher => "fire extinguisher",
            ObjectType::FireHoseCabinet => "fire hose cabinet",
            ObjectType::HumanPainting => "painting",
            ObjectType::MainDoor => "main door",
            ObjectType::Peacock => "peacock",
            ObjectType::Printer => "printer",
            ObjectType::TrashBin => "trash bin",
            ObjectType::VendingMachine => "vending machine",
            ObjectType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One detected instance in one processed camera frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub object: ObjectType,
    /// Detector confidence in [0, 1]
    pub confidence: f32,
    pub timestamp: DateTime<Utc>,
}

impl Observation {
    /// Create an observation stamped with the current wall-clock time
    pub fn new(object: ObjectType, confidence: f32) -> Self {
        Self {
            object,
            confidence,
            timestamp: Utc::now(),
        }
    }

    /// Create an observation with an explicit timestamp (replay and tests)
    pub fn at(object: ObjectType, confidence: f32, timestamp: DateTime<Utc>) -> Self {
        Self {
            object,
            confidence,
            timestamp,
        }
    }
}

/// Navigation state machine states
///
/// `DestinationReached` is terminal; every other state can only move forward
/// along the itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationState {
    Initial,
    DetectingWaypoint,
    WaypointConfirmed,
    WalkingToTurnObject,
    ReadyToTurn,
    TransitioningWaypoint,
    DestinationReached,
}

impl fmt::Display for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NavigationState::Initial => "initial",
            NavigationState::DetectingWaypoint => "detecting waypoint",
            NavigationState::WaypointConfirmed => "waypoint confirmed",
            NavigationState::WalkingToTurnObject => "walking to turn object",
            NavigationState::ReadyToTurn => "ready to turn",
            NavigationState::TransitioningWaypoint => "transitioning",
            NavigationState::DestinationReached => "destination reached",
        };
        write!(f, "{}", s)
    }
}

/// Classification of an announcement for cooldown purposes
///
/// Tagged explicitly at the call site; never inferred from text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnouncementKind {
    /// A movement instruction (welcome, corridor entry, turn, arrival)
    Navigation,
    /// A landmark sighting notice
    ObjectNotice,
}

/// A gate-checked request to speak a phrase to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub text: String,
    pub kind: AnnouncementKind,
}

impl Announcement {
    pub fn navigation(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: AnnouncementKind::Navigation,
        }
    }

    pub fn object_notice(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: AnnouncementKind::ObjectNotice,
        }
    }
}

/// Read-only status snapshot for the operator query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationStatus {
    /// Label of the most recently observed object, if any
    pub last_detection: Option<String>,
    pub state: NavigationState,
    /// Name of the current waypoint, none before the first confirmation
    pub waypoint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_type_from_label() {
        assert_eq!(
            ObjectType::from_label("fire_extinguisher"),
            ObjectType::FireExtinguisher
        );
        assert_eq!(
            ObjectType::from_label("FireExtinguisher"),
            ObjectType::FireExtinguisher
        );
        assert_eq!(
            ObjectType::from_label("vending_machine"),
            ObjectType::VendingMachine
        );
        assert_eq!(ObjectType::from_label("peacock"), ObjectType::Peacock);
        assert_eq!(ObjectType::from_label("zebra"), ObjectType::Unknown);
        assert_eq!(ObjectType::from_label(""), ObjectType::Unknown);
    }

    #[test]
    fn test_object_type_label_round_trip() {
        let all = [
            ObjectType::FireExtinguisher,
            ObjectType::FireHoseCabinet,
            ObjectType::HumanPainting,
            ObjectType::MainDoor,
            ObjectType::Peacock,
            ObjectType::Printer,
            ObjectType::TrashBin,
            ObjectType::VendingMachine,
        ];
        for object in all {
            assert_ne!(object.label(), "unknown");
        }
    }

    #[test]
    fn test_observation_new() {
        let obs = Observation::new(ObjectType::Printer, 0.8);
        assert_eq!(obs.object, ObjectType::Printer);
        assert!((obs.confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_navigation_state_display() {
        assert_eq!(NavigationState::Initial.to_string(), "initial");
        assert_eq!(
            NavigationState::DestinationReached.to_string(),
            "destination reached"
        );
    }

    #[test]
    fn test_announcement_constructors() {
        let a = Announcement::navigation("Turn right");
        assert_eq!(a.kind, AnnouncementKind::Navigation);
        let b = Announcement::object_notice("Printer ahead");
        assert_eq!(b.kind, AnnouncementKind::ObjectNotice);
    }

    #[test]
    fn test_status_serializes() {
        let status = NavigationStatus {
            last_detection: Some("printer".to_string()),
            state: NavigationState::DetectingWaypoint,
            waypoint: None,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("printer"));
        assert!(json.contains("DetectingWaypoint"));
    }
}
