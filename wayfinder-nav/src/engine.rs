//! Navigation engine: the corridor state machine
//!
//! The engine runs as a single task consuming one mailbox. Detection events,
//! timer callbacks, operator queries and restarts are all serialized through
//! it, so the guards (`transitioning`, the per-phase confirmed set) can never
//! race. Delayed transitions are one-shot sleep tasks that post a timer
//! command back into the mailbox, stamped with the epoch at schedule time; a
//! restart bumps the epoch and every in-flight timer dies as a no-op.

use crate::catalog::{Waypoint, WaypointCatalog, WaypointId};
use crate::config::NavConfig;
use crate::error::NavError;
use crate::gate::AnnouncementGate;
use crate::speech::SpeechSink;
use crate::stabilizer::DetectionStabilizer;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use wayfinder_core::{Announcement, NavigationState, NavigationStatus, ObjectType, Observation};

const WELCOME_PHRASE: &str =
    "Welcome. Corridor navigation is starting. Point the camera ahead of you.";
const ARRIVAL_PHRASE: &str = "You have arrived at your destination.";

/// Commands accepted by the engine mailbox
enum EngineCommand {
    Observation(Observation),
    TimerFired { epoch: u64, event: TimerEvent },
    Status(oneshot::Sender<NavigationStatus>),
    Restart,
    Shutdown,
}

/// Delayed transitions scheduled by the engine against itself
#[derive(Debug, Clone, Copy)]
enum TimerEvent {
    /// Initial -> DetectingWaypoint, welcome message
    Startup,
    /// Post-confirmation pause elapsed; walk to the turn object or move on
    AdvancePhase,
    /// Leave the current corridor
    BeginTransition,
    /// Transition window over; start detecting the next corridor
    FinishTransition,
}

/// Cloneable handle to a running navigation engine
#[derive(Clone)]
pub struct NavigationHandle {
    tx: mpsc::Sender<EngineCommand>,
}

impl NavigationHandle {
    /// Push one observation; never blocks the caller
    ///
    /// If the mailbox is full the frame is dropped with a warning. The
    /// detector runs at camera rate and must not be back-pressured.
    pub fn observe(&self, observation: Observation) {
        if self
            .tx
            .try_send(EngineCommand::Observation(observation))
            .is_err()
        {
            warn!("Engine mailbox unavailable, dropping observation");
        }
    }

    /// Read-only status snapshot (on-demand operator query)
    pub async fn status(&self) -> Result<NavigationStatus, NavError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(EngineCommand::Status(reply_tx))
            .await
            .map_err(|_| NavError::Channel("Engine mailbox closed".to_string()))?;
        reply_rx
            .await
            .map_err(|_| NavError::Channel("Engine dropped status request".to_string()))
    }

    /// Reset the engine to its initial state and start over
    pub async fn restart(&self) -> Result<(), NavError> {
        self.tx
            .send(EngineCommand::Restart)
            .await
            .map_err(|_| NavError::Channel("Engine mailbox closed".to_string()))
    }

    /// Stop the engine task
    pub async fn shutdown(&self) -> Result<(), NavError> {
        self.tx
            .send(EngineCommand::Shutdown)
            .await
            .map_err(|_| NavError::Channel("Engine mailbox closed".to_string()))
    }
}

/// The corridor navigation state machine
pub struct NavigationEngine {
    config: NavConfig,
    catalog: WaypointCatalog,
    sink: Arc<dyn SpeechSink>,
    rx: mpsc::Receiver<EngineCommand>,
    self_tx: mpsc::Sender<EngineCommand>,
    stabilizer: DetectionStabilizer,
    gate: AnnouncementGate,
    state: NavigationState,
    /// Confirmed waypoint; none until the first confirmation
    current: Option<WaypointId>,
    /// Objects already consumed in the current phase
    confirmed: HashSet<ObjectType>,
    /// True strictly during the window between corridors
    transitioning: bool,
    last_detection: Option<String>,
    /// Bumped on restart; stale timers carry an older value and are ignored
    epoch: u64,
}

impl NavigationEngine {
    /// Validate config and catalog, spawn the engine task, schedule startup
    pub fn spawn(
        config: NavConfig,
        catalog: WaypointCatalog,
        sink: Arc<dyn SpeechSink>,
    ) -> Result<(NavigationHandle, tokio::task::JoinHandle<()>), NavError> {
        config.validate().map_err(NavError::Config)?;
        catalog.validate().map_err(NavError::Catalog)?;

        let (tx, rx) = mpsc::channel(config.mailbox_capacity);

        let engine = NavigationEngine {
            stabilizer: DetectionStabilizer::new(
                config.confidence_floor,
                config.stability_threshold,
            ),
            gate: AnnouncementGate::new(config.object_cooldown(), config.navigation_cooldown()),
            state: NavigationState::Initial,
            current: None,
            confirmed: HashSet::new(),
            transitioning: false,
            last_detection: None,
            epoch: 0,
            self_tx: tx.clone(),
            rx,
            config,
            catalog,
            sink,
        };

        engine.schedule_timer(TimerEvent::Startup, engine.config.startup_delay());

        let handle = NavigationHandle { tx };
        let join = tokio::spawn(engine.run());
        Ok((handle, join))
    }

    async fn run(mut self) {
        info!(waypoints = self.catalog.len(), sink = self.sink.name(), "Navigation engine started");

        while let Some(command) = self.rx.recv().await {
            match command {
                EngineCommand::Observation(observation) => {
                    self.handle_observation(observation).await;
                }
                EngineCommand::TimerFired { epoch, event } => {
                    if epoch != self.epoch {
                        debug!(?event, "Stale timer ignored");
                        continue;
                    }
                    self.handle_timer(event).await;
                }
                EngineCommand::Status(reply) => {
                    let _ = reply.send(self.status_snapshot());
                }
                EngineCommand::Restart => {
                    self.restart();
                }
                EngineCommand::Shutdown => break,
            }
        }

        info!("Navigation engine stopped");
    }

    async fn handle_observation(&mut self, observation: Observation) {
        self.last_detection = Some(observation.object.label().to_string());

        if self.state == NavigationState::DestinationReached {
            return;
        }

        if !self.stabilizer.observe(&observation) {
            return;
        }

        // Stabilized, but never promoted while advancing between corridors
        if self.transitioning {
            debug!(object = %observation.object, "Stable detection ignored during transition");
            return;
        }

        match self.state {
            NavigationState::DetectingWaypoint => {
                self.on_identification_stable(observation.object).await;
            }
            NavigationState::WalkingToTurnObject => {
                self.on_turn_object_stable(observation.object).await;
            }
            // Other states have no relevant object types
            _ => {}
        }
    }

    /// A stabilized detection while looking for the target waypoint
    async fn on_identification_stable(&mut self, object: ObjectType) {
        let target = match self.target_waypoint() {
            Some(waypoint) => waypoint.clone(),
            None => return,
        };

        if !target.identifies_with(object) || self.confirmed.contains(&object) {
            return;
        }

        self.confirmed.insert(object);
        debug!(object = %object, waypoint = %target.id, "Identification object stabilized");

        if target.is_satisfied_by(&self.confirmed) {
            self.confirm_waypoint(&target).await;
        } else {
            self.announce(Announcement::object_notice(format!(
                "Found the {}.",
                object.label()
            )))
            .await;
        }
    }

    /// All identification objects of the target waypoint have stabilized
    async fn confirm_waypoint(&mut self, waypoint: &Waypoint) {
        info!(waypoint = %waypoint.id, name = %waypoint.name, "Waypoint confirmed");

        self.state = NavigationState::WaypointConfirmed;
        self.current = Some(waypoint.id);
        self.confirmed.clear();
        self.stabilizer.reset();

        self.announce(Announcement::navigation(waypoint.confirm_phrase.clone()))
            .await;

        self.schedule_timer(TimerEvent::AdvancePhase, waypoint.post_confirm_delay);
    }

    /// A stabilized detection while walking toward the turn object
    async fn on_turn_object_stable(&mut self, object: ObjectType) {
        let waypoint = match self.current.and_then(|id| self.catalog.get(id)) {
            Some(waypoint) => waypoint.clone(),
            None => return,
        };

        if waypoint.turn_object != Some(object) {
            return;
        }

        info!(waypoint = %waypoint.id, object = %object, "Turn object reached");
        self.state = NavigationState::ReadyToTurn;

        if let Some(phrase) = waypoint.turn_phrase.clone() {
            self.announce(Announcement::navigation(phrase)).await;
        }

        self.schedule_timer(
            TimerEvent::BeginTransition,
            self.config.ready_to_turn_delay(),
        );
    }

    async fn handle_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Startup => {
                if self.state == NavigationState::Initial {
                    self.state = NavigationState::DetectingWaypoint;
                    self.announce(Announcement::navigation(WELCOME_PHRASE)).await;
                }
            }
            TimerEvent::AdvancePhase => {
                if self.state != NavigationState::WaypointConfirmed {
                    return;
                }
                let has_turn_object = self
                    .current
                    .and_then(|id| self.catalog.get(id))
                    .map(|w| w.turn_object.is_some())
                    .unwrap_or(false);
                if has_turn_object {
                    self.state = NavigationState::WalkingToTurnObject;
                    debug!("Walking to turn object");
                } else {
                    self.begin_transition().await;
                }
            }
            TimerEvent::BeginTransition => {
                if self.state == NavigationState::ReadyToTurn {
                    self.begin_transition().await;
                }
            }
            TimerEvent::FinishTransition => {
                if self.state == NavigationState::TransitioningWaypoint {
                    self.transitioning = false;
                    self.state = NavigationState::DetectingWaypoint;
                    debug!(waypoint = ?self.current, "Transition finished, detecting next waypoint");
                }
            }
        }
    }

    /// Leave the current corridor: clear per-phase state and advance
    async fn begin_transition(&mut self) {
        self.state = NavigationState::TransitioningWaypoint;
        self.transitioning = true;
        self.stabilizer.reset();
        self.confirmed.clear();

        let next = self
            .current
            .and_then(|id| self.catalog.get(id))
            .and_then(|w| w.next);

        match next.and_then(|id| self.catalog.get(id)) {
            Some(next_waypoint) => {
                let name = next_waypoint.name.clone();
                self.current = Some(next_waypoint.id);
                info!(waypoint = %next_waypoint.id, "Transitioning to next waypoint");
                self.announce(Announcement::navigation(format!("Entering {}.", name)))
                    .await;
                self.schedule_timer(
                    TimerEvent::FinishTransition,
                    self.config.transition_duration(),
                );
            }
            None => {
                self.transitioning = false;
                self.state = NavigationState::DestinationReached;
                info!("Destination reached");
                self.announce(Announcement::navigation(ARRIVAL_PHRASE)).await;
            }
        }
    }

    /// Reset everything and start over; in-flight timers become no-ops
    fn restart(&mut self) {
        info!("Navigation restarting");
        self.epoch += 1;
        self.state = NavigationState::Initial;
        self.current = None;
        self.transitioning = false;
        self.confirmed.clear();
        self.stabilizer.reset();
        self.gate.reset();
        self.last_detection = None;
        self.schedule_timer(TimerEvent::Startup, self.config.startup_delay());
    }

    /// The waypoint detections are currently matched against
    fn target_waypoint(&self) -> Option<&Waypoint> {
        match self.current {
            Some(id) => self.catalog.get(id),
            None => self.catalog.first(),
        }
    }

    fn status_snapshot(&self) -> NavigationStatus {
        NavigationStatus {
            last_detection: self.last_detection.clone(),
            state: self.state,
            waypoint: self
                .current
                .and_then(|id| self.catalog.get(id))
                .map(|w| w.name.clone()),
        }
    }

    /// Gate-check an announcement and push it to the sink
    ///
    /// A denied announcement is dropped for good; a sink failure is logged
    /// and swallowed. State has already moved on either way.
    async fn announce(&mut self, announcement: Announcement) {
        if !self.gate.try_announce(announcement.kind, Instant::now()) {
            debug!(text = %announcement.text, "Announcement suppressed");
            return;
        }
        if let Err(e) = self.sink.announce(&announcement.text).await {
            warn!("Speech sink error: {}", e);
        }
    }

    fn schedule_timer(&self, event: TimerEvent, delay: Duration) {
        let tx = self.self_tx.clone();
        let epoch = self.epoch;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(EngineCommand::TimerFired { epoch, event }).await;
        });
    }
}
