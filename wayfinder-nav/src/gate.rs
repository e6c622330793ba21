//! Announcement gate: cooldown policy for voice output
//!
//! Two layered cooldowns keep speech from spamming or overlapping: a global
//! gap between any two announcements, and a longer gap between movement
//! instructions. A denied announcement is dropped for good; the navigation
//! state that prompted it persists, so nothing is lost but the utterance.

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use wayfinder_core::AnnouncementKind;

/// Enforces the announcement cooldown policy
#[derive(Debug)]
pub struct AnnouncementGate {
    object_cooldown: Duration,
    navigation_cooldown: Duration,
    last_any: Option<Instant>,
    last_navigation: Option<Instant>,
}

impl AnnouncementGate {
    pub fn new(object_cooldown: Duration, navigation_cooldown: Duration) -> Self {
        Self {
            object_cooldown,
            navigation_cooldown,
            last_any: None,
            last_navigation: None,
        }
    }

    /// Ask permission to announce; records the timestamp when allowed
    pub fn try_announce(&mut self, kind: AnnouncementKind, now: Instant) -> bool {
        if let Some(last) = self.last_any {
            if now.duration_since(last) < self.object_cooldown {
                debug!(?kind, "Announcement suppressed by object cooldown");
                return false;
            }
        }

        if kind == AnnouncementKind::Navigation {
            if let Some(last) = self.last_navigation {
                if now.duration_since(last) < self.navigation_cooldown {
                    debug!("Announcement suppressed by navigation cooldown");
                    return false;
                }
            }
            self.last_navigation = Some(now);
        }

        self.last_any = Some(now);
        true
    }

    /// Forget both cooldown marks (navigation restart)
    pub fn reset(&mut self) {
        self.last_any = None;
        self.last_navigation = None;
    }
}
