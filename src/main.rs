//! Slime Ascent - headless native runner
//!
//! Plays one game with a simple autopilot against a synthetic song clock and
//! prints the final stats as JSON. Pass a settings JSON file as the only
//! argument to override the defaults.

use slime_ascent::consts::FRAME_RATE;
use slime_ascent::sim::character::JUMP_INPUT_WINDOW;
use slime_ascent::sim::{Beat, Character, MAX_METEORS, World};
use slime_ascent::{FrameInput, Session, SessionState, Settings};

/// Frames per song phase
const PHASE_FRAMES: u32 = 1150;
/// Frames per meteor beat
const BEAT_FRAMES: u32 = FRAME_RATE;
/// Platforms above the cursor the autopilot considers
const AUTOPILOT_LOOKAHEAD: usize = 6;
/// Hard stop in case the clock never reaches the terminal phase
const MAX_FRAMES: u32 = 5 * PHASE_FRAMES;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Slime Ascent (headless) starting...");

    let settings = load_settings();
    let seed = settings.seed.unwrap_or_else(rand::random);
    let mut session = Session::new(settings, seed);

    session.update(Beat::default(), &FrameInput::default());
    session.update(
        Beat::default(),
        &FrameInput {
            start_pressed: true,
            ..Default::default()
        },
    );

    let mut frame = 0;
    while session.state() == SessionState::Playing && frame < MAX_FRAMES {
        let input = autopilot(session.world());
        session.update(song_clock(frame), &input);
        frame += 1;
    }
    log::info!("Played {frame} frames");

    match session.stats().map(serde_json::to_string_pretty) {
        Some(Ok(json)) => println!("{json}"),
        Some(Err(e)) => log::error!("Failed to serialize stats: {e}"),
        None => log::warn!("Game did not finish"),
    }
}

fn load_settings() -> Settings {
    let Some(path) = std::env::args().nth(1) else {
        log::info!("Using default settings");
        return Settings::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| Settings::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Could not load settings from {path}: {e}");
            Settings::default()
        }
    }
}

/// Packed beat value, one beat per second and four even phases
fn song_clock(frame: u32) -> Beat {
    let index = (frame / BEAT_FRAMES).min(MAX_METEORS as u32);
    let phase = frame / PHASE_FRAMES;
    Beat::from_packed((phase << 16) | index)
}

/// Pick the first angle whose held jump lands on a higher platform
fn autopilot(world: &World) -> FrameInput {
    let character = &world.character;
    let mut input = FrameInput {
        angle: i32::from(character.angle()),
        ..Default::default()
    };
    if !character.is_resting() {
        input.jump_held = character.in_flight < JUMP_INPUT_WINDOW;
        return input;
    }

    let platforms = world.platforms();
    let top = (world.cursor() + AUTOPILOT_LOOKAHEAD).min(platforms.len() - 1);
    for target in (world.cursor() + 1..=top).rev() {
        let platform = &platforms[target];
        if platform.y >= character.pixel_y() {
            continue;
        }
        for angle in (-60..=60).step_by(4) {
            if lands_on(character, angle, platform.y, platform.span()) {
                input.angle = angle;
                input.jump_held = true;
                return input;
            }
        }
    }

    // Nothing in reach: hop in place and look again
    input.angle = 0;
    input.jump_held = true;
    input
}

fn lands_on(from: &Character, angle: i32, y: i32, (x0, x1): (i32, i32)) -> bool {
    let mut ghost = Character::ghost(from.x, from.y, angle.rem_euclid(360) as u16);
    for _ in 0..120 {
        ghost.jump();
        let old_y = ghost.pixel_y();
        ghost.step();
        let new_y = ghost.pixel_y();
        if ghost.is_resting() {
            return false;
        }
        if new_y > old_y {
            if old_y <= y && y <= new_y {
                return ghost.collides_horizontally(x0, x1);
            }
            if new_y > y {
                return false;
            }
        }
    }
    false
}
