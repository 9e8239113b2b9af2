//! Locomotion Sim demo
//!
//! Runs a scripted session on flat ground: walk, sprint, roll until
//! stamina runs out, idle regen and a jump. Then replays the recorded
//! input and checks the state hash.
//!
//! Usage: `locomotion-sim [config.json]` (or set `LOCOMOTION_CONFIG`).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use glam::Vec2;
use tracing::info;
use tracing_subscriber::EnvFilter;

use locomotion::{
    game::{
        animation::NullSink,
        events::LocomotionEventData,
        fps::FrameRateMeter,
        session::first_divergence,
    },
    replay_recording, FlatGround, InputFrame, Session, SimConfig, DEFAULT_TICK_RATE, VERSION,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Locomotion Sim v{}", VERSION);

    let config = load_config()?;
    info!(
        speed = config.locomotion.speed,
        max_stamina = config.locomotion.max_stamina,
        roll_cost = config.locomotion.roll_cost,
        jump_enabled = config.locomotion.jump_enabled,
        "config loaded"
    );

    demo_session(&config)
}

fn load_config() -> Result<SimConfig> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("LOCOMOTION_CONFIG").map(PathBuf::from));

    match path {
        Some(path) => SimConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(SimConfig::default()),
    }
}

/// Scripted input: (ticks, frame) phases.
fn script() -> Vec<(u32, InputFrame)> {
    let mut phases = vec![
        // Walk forward for 2 seconds
        (120, InputFrame::with_movement(0, 127)),
        // Sprint diagonally while panning the camera
        (180, InputFrame::from_axis(Vec2::new(0.7, 0.7)).sprinting().looking(3)),
    ];

    // Roll repeatedly, waiting out the cooldown between each
    for i in 0..6 {
        let x = if i % 2 == 0 { 127 } else { -127 };
        phases.push((1, InputFrame::with_movement(x, 0).rolling()));
        phases.push((75, InputFrame::new()));
    }

    // Catch breath, then hop
    phases.push((240, InputFrame::new()));
    phases.push((1, InputFrame::new().jumping()));
    phases.push((60, InputFrame::new()));
    phases
}

fn demo_session(config: &SimConfig) -> Result<()> {
    info!("=== Starting Demo Session ===");

    let dt = 1.0 / DEFAULT_TICK_RATE as f32;
    let mut session = Session::new(config, FlatGround::origin(), dt)
        .context("creating session")?;
    let mut fps = FrameRateMeter::new(&config.fps);
    let mut animator = NullSink;
    let mut hud = NullSink;

    let mut total_events = 0usize;
    let mut rolls = 0usize;
    let mut last_frame = Instant::now();

    for (ticks, frame) in script() {
        for _ in 0..ticks {
            let output = session.step(frame);
            output.publish(&mut animator, &mut hud);
            total_events += output.events.len();

            let now = Instant::now();
            fps.update(now.duration_since(last_frame).as_secs_f32());
            last_frame = now;

            for event in &output.events {
                match &event.data {
                    LocomotionEventData::RollStarted { direction, stamina_after } => {
                        rolls += 1;
                        info!(
                            "Tick {}: roll {} toward ({:.2}, {:.2}), stamina {:.1}",
                            event.tick, rolls, direction.x, direction.z, stamina_after
                        );
                    }
                    LocomotionEventData::SprintStopped { exhausted: true } => {
                        info!("Tick {}: sprint stopped, out of stamina", event.tick);
                    }
                    LocomotionEventData::Jumped { velocity } => {
                        info!("Tick {}: jumped at {:.2} m/s", event.tick, velocity);
                    }
                    LocomotionEventData::StaminaFull => {
                        info!("Tick {}: stamina full", event.tick);
                    }
                    _ => {}
                }
            }

            if output.tick % 120 == 0 {
                let state = session.controller().state();
                info!(
                    "Tick {}: pos ({:.2}, {:.2}, {:.2}), stamina {:.1}, rolling {}",
                    output.tick,
                    state.position.x,
                    state.position.y,
                    state.position.z,
                    state.stamina.current(),
                    state.is_rolling()
                );
            }
        }
    }

    info!("=== Session Results ===");
    let hash = session.state_hash();
    info!("Final State Hash: {}", hex::encode(hash));
    info!("Ticks: {}, events: {}, rolls: {}", session.recording().tick_count(), total_events, rolls);
    info!(
        "Recording: {} deltas, {} bytes",
        session.recording().delta_count(),
        session.recording().to_bytes().context("encoding recording")?.len()
    );
    for line in fps.summary().lines() {
        info!("{}", line);
    }

    info!("=== Verifying Replay ===");
    let (replayed, _) = replay_recording(config, session.recording(), FlatGround::origin())
        .context("replaying recording")?;
    let replay_hash = replayed.state_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    match first_divergence(session.checkpoints(), replayed.checkpoints()) {
        None if hash == replay_hash => info!("REPLAY VERIFIED: Hashes match!"),
        None => info!("REPLAY FAILURE: final hashes differ"),
        Some(tick) => info!("REPLAY FAILURE: diverged at tick {}", tick),
    }

    Ok(())
}
