//! Replay a clean detection walk through the standard route
//!
//! Feeds each landmark at camera-ish rate and waits for the engine to work
//! through its fixed delays before showing the next one, the way a person
//! walking the corridors would.
//!
//! Run with: cargo run --example guided_walk

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use wayfinder_core::{NavigationState, ObjectType, Observation};
use wayfinder_nav::{
    ConsoleSpeechSink, NavConfig, NavigationEngine, NavigationHandle, WaypointCatalog,
};

async fn show_landmark(handle: &NavigationHandle, object: ObjectType) {
    for _ in 0..4 {
        handle.observe(Observation::new(object, 0.9));
        sleep(Duration::from_millis(60)).await;
    }
}

async fn wait_for_state(handle: &NavigationHandle, wanted: NavigationState) {
    let poll = async {
        loop {
            match handle.status().await {
                Ok(status) if status.state == wanted => break,
                Ok(_) => sleep(Duration::from_millis(100)).await,
                Err(_) => break,
            }
        }
    };
    if timeout(Duration::from_secs(20), poll).await.is_err() {
        eprintln!("timed out waiting for state {}", wanted);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = NavConfig {
        startup_delay_ms: 200,
        ..NavConfig::default()
    };
    let catalog = WaypointCatalog::standard_route();
    let (handle, join) = NavigationEngine::spawn(config, catalog, Arc::new(ConsoleSpeechSink))?;

    wait_for_state(&handle, NavigationState::DetectingWaypoint).await;

    // Corridor 1: both identification objects, then the turn object
    show_landmark(&handle, ObjectType::FireHoseCabinet).await;
    sleep(Duration::from_secs(2)).await;
    show_landmark(&handle, ObjectType::VendingMachine).await;
    wait_for_state(&handle, NavigationState::WalkingToTurnObject).await;
    show_landmark(&handle, ObjectType::FireExtinguisher).await;
    wait_for_state(&handle, NavigationState::DetectingWaypoint).await;

    // Corridor 2
    show_landmark(&handle, ObjectType::Printer).await;
    wait_for_state(&handle, NavigationState::WalkingToTurnObject).await;
    show_landmark(&handle, ObjectType::TrashBin).await;
    wait_for_state(&handle, NavigationState::DetectingWaypoint).await;

    // Corridor 3 has no turn object; the engine walks straight on its own
    show_landmark(&handle, ObjectType::HumanPainting).await;
    wait_for_state(&handle, NavigationState::DetectingWaypoint).await;

    // Corridor 4
    show_landmark(&handle, ObjectType::Peacock).await;
    sleep(Duration::from_secs(2)).await;
    show_landmark(&handle, ObjectType::MainDoor).await;
    wait_for_state(&handle, NavigationState::DestinationReached).await;

    let status = handle.status().await?;
    println!(
        "final state: {} (waypoint: {})",
        status.state,
        status.waypoint.as_deref().unwrap_or("-")
    );

    handle.shutdown().await?;
    join.await?;
    Ok(())
}
