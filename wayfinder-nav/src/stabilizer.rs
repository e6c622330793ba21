//! Detection stabilizer: counting/decay filter over raw observations
//!
//! The detector flickers. A single frame of "printer" in a corridor full of
//! paintings must not move the state machine, so every type accumulates
//! support frame by frame and loses it again whenever a different type is
//! seen. The few frames of added latency buy resistance to jitter.

use std::collections::HashMap;
use tracing::trace;
use wayfinder_core::{ObjectType, Observation};

/// Converts a noisy per-frame observation stream into stable detections
#[derive(Debug)]
pub struct DetectionStabilizer {
    counts: HashMap<ObjectType, u32>,
    confidence_floor: f32,
    stability_threshold: u32,
}

impl DetectionStabilizer {
    pub fn new(confidence_floor: f32, stability_threshold: u32) -> Self {
        Self {
            counts: HashMap::new(),
            confidence_floor,
            stability_threshold,
        }
    }

    /// Feed one observation; returns true if the observed type is stable
    ///
    /// Repeated calls for an already-stable type keep returning true. The
    /// engine's per-phase bookkeeping is responsible for acting only once.
    pub fn observe(&mut self, observation: &Observation) -> bool {
        if observation.confidence < self.confidence_floor {
            trace!(
                object = %observation.object,
                confidence = observation.confidence,
                "Observation below confidence floor, ignored"
            );
            return false;
        }

        let observed = observation.object;

        // Decay support for every other tracked type
        self.counts.retain(|object, count| {
            if *object == observed {
                return true;
            }
            *count = count.saturating_sub(1);
            *count > 0
        });

        let count = self.counts.entry(observed).or_insert(0);
        *count += 1;

        trace!(object = %observed, count = *count, "Observation counted");
        *count >= self.stability_threshold
    }

    /// Current support count for a type (0 if untracked)
    pub fn count(&self, object: ObjectType) -> u32 {
        self.counts.get(&object).copied().unwrap_or(0)
    }

    /// Whether a type has already reached the stability threshold
    pub fn is_stable(&self, object: ObjectType) -> bool {
        self.count(object) >= self.stability_threshold
    }

    /// Drop all accumulated support (phase reset)
    pub fn reset(&mut self) {
        self.counts.clear();
    }
}
