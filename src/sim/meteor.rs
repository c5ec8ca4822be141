//! Meteors
//!
//! One meteor is spawned per beat of the song, aimed at the character and
//! entering from just off one side of the screen. Spawned meteors form a
//! contiguous live window `meteor_start..len` that only shrinks from the
//! front.

use glam::IVec2;
use rand::Rng;

use super::state::{Meteor, World};
use crate::consts::SCREEN_WIDTH;

/// Range of each velocity component, in pixels per frame
pub const METEOR_SPEED: (i32, i32) = (5, 15);
/// Distance beyond either screen edge where meteors enter and leave
pub const METEOR_MARGIN: i32 = 64;
/// Half-size of the square hit box around the character's center
pub const METEOR_HIT_BOX: i32 = 16;
/// Rotation frames per turn
pub const METEOR_FRAMES: u8 = 18;
/// Character center above its feet
pub const CHARACTER_CENTER_OFFSET: i32 = 9;
/// Character this close to a side edge gets meteors from the other side
const EDGE_ZONE: i32 = 100;

/// Where meteors aim: the character's center in pixels
fn target(world: &World) -> IVec2 {
    IVec2::new(
        world.character.pixel_x(),
        world.character.pixel_y() - CHARACTER_CENTER_OFFSET,
    )
}

/// Spawn one meteor for every beat not yet covered
pub fn spawn_meteors<R: Rng + ?Sized>(world: &mut World, rng: &mut R) {
    let aim = target(world);
    while world.meteors.len() < usize::from(world.beat) {
        let meteor = aimed_meteor(rng, aim);
        let index = world.meteors.push(meteor);
        log::trace!("meteor {index} from {} moving {}", meteor.pos, meteor.vel);
    }
}

/// A meteor that passes through `aim`, starting just off screen
fn aimed_meteor<R: Rng + ?Sized>(rng: &mut R, aim: IVec2) -> Meteor {
    let frame = rng.random_range(0..METEOR_FRAMES);
    let (lo, hi) = METEOR_SPEED;

    // Near an edge the meteor comes from the far side so it stays visible longer
    let vx = if aim.x < EDGE_ZONE {
        -rng.random_range(lo..=hi)
    } else if aim.x > SCREEN_WIDTH - EDGE_ZONE {
        rng.random_range(lo..=hi)
    } else {
        let speed = rng.random_range(lo..=hi);
        if rng.random_bool(0.5) { -speed } else { speed }
    };
    let vy = rng.random_range(lo..=hi);
    let vel = IVec2::new(vx, vy);

    let distance = if vx < 0 {
        -(SCREEN_WIDTH + METEOR_MARGIN - aim.x)
    } else {
        METEOR_MARGIN + aim.x
    };
    let frames = distance / vx;
    debug_assert!(frames >= 0);

    Meteor {
        pos: aim - vel * frames,
        vel,
        frame,
        hit: false,
    }
}

/// Move live meteors, apply hits, and retire the ones that have left
pub fn animate_meteors(world: &mut World) {
    let aim = target(world);
    let start = world.meteor_start;
    for i in start..world.meteors.len() {
        let meteor = &mut world.meteors[i];
        meteor.pos += meteor.vel;
        if world.meteors_disabled {
            meteor.pos.x = SCREEN_WIDTH + METEOR_MARGIN + 1;
            meteor.vel.x = 1;
        }

        let d = (meteor.pos - aim).abs();
        if !meteor.hit && d.x < METEOR_HIT_BOX && d.y < METEOR_HIT_BOX {
            meteor.hit = true;
            world.character.hit(meteor.vel.x, meteor.vel.y);
            log::trace!("meteor {i} hit at {}", meteor.pos);
        }

        let (gone, next_frame) = if meteor.vel.x > 0 {
            (
                meteor.pos.x > SCREEN_WIDTH + METEOR_MARGIN,
                (meteor.frame + 1) % METEOR_FRAMES,
            )
        } else {
            (
                meteor.pos.x < -METEOR_MARGIN,
                (meteor.frame + METEOR_FRAMES - 1) % METEOR_FRAMES,
            )
        };
        if gone {
            // Only the oldest meteor may leave the window
            if i == world.meteor_start {
                world.meteor_start += 1;
            }
        } else {
            meteor.frame = next_frame;
        }
    }
    debug_assert!(world.meteor_start <= world.meteors.len());
}
