//! Fox Escape headless runner
//!
//! Builds a world from a built-in map name or a JSON map file and plays a
//! scripted session at a fixed 60 Hz step, logging what happens.
//!
//! Usage: `fox-escape [forest|meadow|path/to/map.json] [seed] [seconds]`

use std::process::ExitCode;

use fox_escape::consts::FRAME_DT;
use fox_escape::sim::{FrameInput, GameEvent, GamePhase, PlayerInput, World};
use fox_escape::{MapConfig, SessionConfig};

fn load_map(arg: &str) -> Result<MapConfig, String> {
    if let Some(map) = MapConfig::preset(arg) {
        return Ok(map);
    }

    let json = std::fs::read_to_string(arg).map_err(|e| format!("cannot read {arg}: {e}"))?;
    MapConfig::from_json(&json).map_err(|e| format!("{arg}: {e}"))
}

/// Scripted players: the fox circles, the dragon shadows it and keeps firing
fn scripted_input(frame: u64) -> FrameInput {
    let t = frame as f32 * FRAME_DT;
    let heading = glam::Vec2::new((t * 0.5).cos(), (t * 0.5).sin());

    FrameInput {
        evader: PlayerInput::new(heading, frame % 900 == 450),
        attacker: PlayerInput::new(heading, frame % 30 == 0),
        fire_forward: frame % 45 == 0,
        start: frame == 0,
    }
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let map_arg = args.next().unwrap_or_else(|| "forest".to_string());
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);

    let map = match load_map(&map_arg) {
        Ok(map) => map,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Fox Escape (headless) on '{}' with seed {}", map.name, seed);

    let mut world = match World::new(map, SessionConfig::default(), seed) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Invalid map: {e}");
            return ExitCode::FAILURE;
        }
    };

    let frames = (seconds / FRAME_DT).ceil() as u64;
    for frame in 0..frames {
        world.update(FRAME_DT, &scripted_input(frame));

        for event in world.drain_events() {
            match event {
                GameEvent::PhaseChanged(phase) => log::info!("Phase: {phase:?}"),
                other => log::debug!("{other:?}"),
            }
        }

        if world.phase() == GamePhase::Ended {
            log::info!("Session ended after {:.1}s", (frame + 1) as f32 * FRAME_DT);
            break;
        }
    }

    let hud = world.hud();
    println!(
        "{} | score {} | difficulty {:.2} | food {} | hunters {} | {:?}",
        world.map().name,
        hud.score,
        hud.difficulty,
        hud.resources_collected,
        hud.adversaries,
        hud.phase
    );
    ExitCode::SUCCESS
}
