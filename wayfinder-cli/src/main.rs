// Wayfinder Command Line Interface
// Replays scripted detection walks through the corridor navigation engine

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::info;
use wayfinder_core::{NavigationState, ObjectType, Observation};
use wayfinder_nav::{
    ConsoleSpeechSink, NavConfig, NavigationEngine, NavigationHandle, WaypointCatalog,
};

#[derive(Parser)]
#[command(name = "wayfinder")]
#[command(about = "Corridor navigation engine - scripted walk and status demos", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the canonical route and print what the guide says
    Walk {
        /// Milliseconds between simulated camera frames
        #[arg(long, default_value = "60")]
        frame_interval_ms: u64,

        /// Frames fed per landmark sighting
        #[arg(long, default_value = "4")]
        frames_per_landmark: u32,

        /// Divide the engine's fixed delays by this factor
        #[arg(long, default_value = "1")]
        time_scale: u64,
    },

    /// Run a partial walk and print the engine status as JSON
    StatusDemo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&cli.log_level)
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match cli.command {
        Commands::Walk {
            frame_interval_ms,
            frames_per_landmark,
            time_scale,
        } => walk(frame_interval_ms, frames_per_landmark, time_scale).await,
        Commands::StatusDemo => status_demo().await,
    }
}

fn scaled_config(time_scale: u64) -> NavConfig {
    let scale = time_scale.max(1);
    let mut config = NavConfig::default();
    config.startup_delay_ms = (config.startup_delay_ms / scale).max(1);
    config.ready_to_turn_delay_ms = (config.ready_to_turn_delay_ms / scale).max(1);
    config.transition_duration_ms = (config.transition_duration_ms / scale).max(1);
    config.object_cooldown_ms = (config.object_cooldown_ms / scale).max(1);
    config.navigation_cooldown_ms = (config.navigation_cooldown_ms / scale).max(1);
    config
}

async fn show_landmark(
    handle: &NavigationHandle,
    object: ObjectType,
    frames: u32,
    frame_interval: Duration,
) {
    info!(object = %object, "Simulating landmark sighting");
    for _ in 0..frames {
        handle.observe(Observation::new(object, 0.9));
        sleep(frame_interval).await;
    }
}

async fn wait_for_state(handle: &NavigationHandle, wanted: NavigationState) -> anyhow::Result<()> {
    let poll = async {
        loop {
            let status = handle.status().await?;
            if status.state == wanted {
                return Ok::<(), anyhow::Error>(());
            }
            sleep(Duration::from_millis(100)).await;
        }
    };
    timeout(Duration::from_secs(30), poll)
        .await
        .with_context(|| format!("timed out waiting for state '{}'", wanted))?
}

async fn walk(frame_interval_ms: u64, frames_per_landmark: u32, time_scale: u64) -> anyhow::Result<()> {
    let config = scaled_config(time_scale);
    let catalog = WaypointCatalog::standard_route();
    let (handle, join) = NavigationEngine::spawn(config, catalog, Arc::new(ConsoleSpeechSink))
        .map_err(|e| anyhow::anyhow!("failed to start engine: {}", e))?;

    let frame_interval = Duration::from_millis(frame_interval_ms);
    let frames = frames_per_landmark;

    wait_for_state(&handle, NavigationState::DetectingWaypoint).await?;

    show_landmark(&handle, ObjectType::FireHoseCabinet, frames, frame_interval).await;
    sleep(Duration::from_secs(2)).await;
    show_landmark(&handle, ObjectType::VendingMachine, frames, frame_interval).await;
    wait_for_state(&handle, NavigationState::WalkingToTurnObject).await?;
    show_landmark(&handle, ObjectType::FireExtinguisher, frames, frame_interval).await;
    wait_for_state(&handle, NavigationState::DetectingWaypoint).await?;

    show_landmark(&handle, ObjectType::Printer, frames, frame_interval).await;
    wait_for_state(&handle, NavigationState::WalkingToTurnObject).await?;
    show_landmark(&handle, ObjectType::TrashBin, frames, frame_interval).await;
    wait_for_state(&handle, NavigationState::DetectingWaypoint).await?;

    show_landmark(&handle, ObjectType::HumanPainting, frames, frame_interval).await;
    wait_for_state(&handle, NavigationState::DetectingWaypoint).await?;

    show_landmark(&handle, ObjectType::Peacock, frames, frame_interval).await;
    sleep(Duration::from_secs(2)).await;
    show_landmark(&handle, ObjectType::MainDoor, frames, frame_interval).await;
    wait_for_state(&handle, NavigationState::DestinationReached).await?;

    let status = handle.status().await?;
    println!("{}", serde_json::to_string_pretty(&status)?);

    handle.shutdown().await?;
    join.await?;
    Ok(())
}

async fn status_demo() -> anyhow::Result<()> {
    let config = scaled_config(4);
    let catalog = WaypointCatalog::standard_route();
    let (handle, join) = NavigationEngine::spawn(config, catalog, Arc::new(ConsoleSpeechSink))
        .map_err(|e| anyhow::anyhow!("failed to start engine: {}", e))?;

    wait_for_state(&handle, NavigationState::DetectingWaypoint).await?;

    // Confirm corridor 1, then snapshot mid-route
    show_landmark(&handle, ObjectType::FireHoseCabinet, 4, Duration::from_millis(60)).await;
    sleep(Duration::from_secs(2)).await;
    show_landmark(&handle, ObjectType::VendingMachine, 4, Duration::from_millis(60)).await;
    sleep(Duration::from_millis(500)).await;

    let status = handle.status().await?;
    println!("{}", serde_json::to_string_pretty(&status)?);

    handle.shutdown().await?;
    join.await?;
    Ok(())
}
