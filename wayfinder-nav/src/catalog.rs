//! Waypoint catalog: the fixed corridor itinerary
//!
//! Pure lookup table. Which objects identify a corridor, which object marks
//! its exit, what is said when, and how long the engine pauses after a
//! confirmation are all data here; the engine owns every decision.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use wayfinder_core::ObjectType;

/// Ordinal identifier of a waypoint within the itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaypointId(pub u8);

impl std::fmt::Display for WaypointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One corridor of the itinerary
///
/// All `identification_objects` must independently stabilize before the
/// waypoint confirms. A waypoint without a `turn_object` is exited by
/// walking straight ahead once `post_confirm_delay` elapses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub name: String,
    pub identification_objects: Vec<ObjectType>,
    pub turn_object: Option<ObjectType>,
    pub next: Option<WaypointId>,
    /// Spoken when the waypoint is confirmed
    pub confirm_phrase: String,
    /// Spoken when the turn object stabilizes
    pub turn_phrase: Option<String>,
    /// Pause after confirmation before walking on or transitioning
    pub post_confirm_delay: Duration,
}

impl Waypoint {
    /// Whether the given set of confirmed objects satisfies this waypoint
    pub fn is_satisfied_by(&self, confirmed: &std::collections::HashSet<ObjectType>) -> bool {
        self.identification_objects
            .iter()
            .all(|object| confirmed.contains(object))
    }

    /// Whether an object is one of this waypoint's identification objects
    pub fn identifies_with(&self, object: ObjectType) -> bool {
        self.identification_objects.contains(&object)
    }
}

/// Ordered, immutable description of the corridor route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointCatalog {
    waypoints: Vec<Waypoint>,
}

impl WaypointCatalog {
    /// Build a catalog from an explicit waypoint list
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }

    /// The four-corridor route of the reference building
    pub fn standard_route() -> Self {
        let waypoints = vec![
            Waypoint {
                id: WaypointId(1),
                name: "Corridor 1".to_string(),
                identification_objects: vec![
                    ObjectType::FireHoseCabinet,
                    ObjectType::VendingMachine,
                ],
                turn_object: Some(ObjectType::FireExtinguisher),
                next: Some(WaypointId(2)),
                confirm_phrase: "You are in corridor 1. Walk forward and look for the fire extinguisher.".to_string(),
                turn_phrase: Some("Fire extinguisher reached. Turn right.".to_string()),
                post_confirm_delay: Duration::from_secs(2),
            },
            Waypoint {
                id: WaypointId(2),
                name: "Corridor 2".to_string(),
                identification_objects: vec![ObjectType::Printer],
                turn_object: Some(ObjectType::TrashBin),
                next: Some(WaypointId(3)),
                confirm_phrase: "You are in corridor 2. Walk forward and look for the trash bin.".to_string(),
                turn_phrase: Some("Trash bin reached. Turn left.".to_string()),
                post_confirm_delay: Duration::from_secs(3),
            },
            Waypoint {
                id: WaypointId(3),
                name: "Corridor 3".to_string(),
                identification_objects: vec![ObjectType::HumanPainting],
                turn_object: None,
                next: Some(WaypointId(4)),
                confirm_phrase: "You are in corridor 3. Walk straight ahead.".to_string(),
                turn_phrase: None,
                post_confirm_delay: Duration::from_secs(10),
            },
            Waypoint {
                id: WaypointId(4),
                name: "Corridor 4".to_string(),
                identification_objects: vec![ObjectType::Peacock, ObjectType::MainDoor],
                turn_object: None,
                next: None,
                confirm_phrase: "You are in corridor 4. The main door is ahead.".to_string(),
                turn_phrase: None,
                post_confirm_delay: Duration::from_secs(4),
            },
        ];

        Self { waypoints }
    }

    /// Look up a waypoint by id
    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.id == id)
    }

    /// The first waypoint of the route
    pub fn first(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Validate the route: non-empty, a strictly linear chain starting at
    /// the first entry, every successor present, no waypoint visited twice
    pub fn validate(&self) -> Result<(), String> {
        let first = match self.waypoints.first() {
            Some(w) => w,
            None => return Err("Catalog must contain at least one waypoint".to_string()),
        };

        for waypoint in &self.waypoints {
            if waypoint.identification_objects.is_empty() {
                return Err(format!(
                    "Waypoint {} has no identification objects",
                    waypoint.id
                ));
            }
            if waypoint.identification_objects.contains(&ObjectType::Unknown) {
                return Err(format!(
                    "Waypoint {} uses the unknown object type",
                    waypoint.id
                ));
            }
            if waypoint.turn_object.is_some() != waypoint.turn_phrase.is_some() {
                return Err(format!(
                    "Waypoint {} has a turn object without a turn phrase (or vice versa)",
                    waypoint.id
                ));
            }
        }

        // Walk the chain from the first waypoint
        let mut visited = std::collections::HashSet::new();
        let mut cursor = Some(first.id);
        while let Some(id) = cursor {
            if !visited.insert(id) {
                return Err(format!("Route revisits waypoint {}", id));
            }
            let waypoint = self
                .get(id)
                .ok_or_else(|| format!("Route references missing waypoint {}", id))?;
            cursor = waypoint.next;
        }

        if visited.len() != self.waypoints.len() {
            return Err("Route does not reach every waypoint in the catalog".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_route_shape() {
        let catalog = WaypointCatalog::standard_route();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.validate().is_ok());

        let first = catalog.first().unwrap();
        assert_eq!(first.id, WaypointId(1));
        assert_eq!(first.identification_objects.len(), 2);
        assert_eq!(first.turn_object, Some(ObjectType::FireExtinguisher));

        let last = catalog.get(WaypointId(4)).unwrap();
        assert!(last.next.is_none());
        assert!(last.turn_object.is_none());
    }

    #[test]
    fn test_standard_route_chain_is_linear() {
        let catalog = WaypointCatalog::standard_route();
        let mut cursor = catalog.first().map(|w| w.id);
        let mut hops = 0;
        while let Some(id) = cursor {
            cursor = catalog.get(id).unwrap().next;
            hops += 1;
        }
        assert_eq!(hops, 4);
    }

    #[test]
    fn test_waypoint_satisfaction_is_conjunctive() {
        let catalog = WaypointCatalog::standard_route();
        let first = catalog.first().unwrap();

        let mut confirmed = HashSet::new();
        assert!(!first.is_satisfied_by(&confirmed));

        confirmed.insert(ObjectType::FireHoseCabinet);
        assert!(!first.is_satisfied_by(&confirmed));

        confirmed.insert(ObjectType::VendingMachine);
        assert!(first.is_satisfied_by(&confirmed));
    }

    #[test]
    fn test_identifies_with() {
        let catalog = WaypointCatalog::standard_route();
        let second = catalog.get(WaypointId(2)).unwrap();
        assert!(second.identifies_with(ObjectType::Printer));
        assert!(!second.identifies_with(ObjectType::Peacock));
        assert!(!second.identifies_with(ObjectType::Unknown));
    }

    #[test]
    fn test_validate_rejects_empty_catalog() {
        let catalog = WaypointCatalog::new(vec![]);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let mut waypoints = WaypointCatalog::standard_route().waypoints;
        waypoints[3].next = Some(WaypointId(1));
        let catalog = WaypointCatalog::new(waypoints);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_successor() {
        let mut waypoints = WaypointCatalog::standard_route().waypoints;
        waypoints[1].next = Some(WaypointId(9));
        let catalog = WaypointCatalog::new(waypoints);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unreachable_waypoint() {
        let mut waypoints = WaypointCatalog::standard_route().waypoints;
        // Cut the chain after corridor 2; corridors 3 and 4 become orphans
        waypoints[1].next = None;
        let catalog = WaypointCatalog::new(waypoints);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_turn_object_without_phrase() {
        let mut waypoints = WaypointCatalog::standard_route().waypoints;
        waypoints[0].turn_phrase = None;
        let catalog = WaypointCatalog::new(waypoints);
        assert!(catalog.validate().is_err());
    }
}
