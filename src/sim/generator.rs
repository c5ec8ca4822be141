//! Level generator
//!
//! Platforms are generated lazily, just ahead of the camera, so the style of
//! new platforms follows the song as closely as possible. Every platform on
//! the main path is placed by simulating a jump from the current top platform
//! with a throwaway [`Character`], so it is reachable by construction.

use rand::Rng;

use super::character::Character;
use super::fixed::Fixed;
use super::state::{Platform, PlatformStyle, Spring, TILES_PER_BAND, World};
use crate::consts::SCREEN_WIDTH;

/// Pixels below the ghost's apex where a new platform goes, to make the jump easier
pub const LANDING_SLACK: i32 = 5;
/// Spread of chain jump angles around straight up, in degrees
pub const CHAIN_ANGLE_SPREAD: i32 = 60;
/// Horizontal step between platforms of a predefined shape
pub const SHAPE_STEP: i32 = 96;

/// Diversion platform horizontal offset range
const DIVERSION_OFFSET_X: (i32, i32) = (100, 300);
/// Diversion platform vertical offset range (below the new top)
const DIVERSION_OFFSET_Y: (i32, i32) = (1, 5);
/// Bases at or above this never drift
const STATIONARY_BASE: u8 = 12;
const MAX_DRIFT: i32 = 3;

/// Generate platforms until the top one is far enough above the view
pub fn generate<R: Rng + ?Sized>(world: &mut World, rng: &mut R) {
    while needs_platforms(world) {
        match world.style {
            PlatformStyle::Trees => append_simple_chain(world, rng, 18, 6),
            PlatformStyle::Rocks => {
                if rng.random_range(0..=9) == 0 {
                    append_predefined_shape(world, rng, 12);
                } else {
                    append_simple_chain(world, rng, 12, 5);
                }
            }
            PlatformStyle::Clouds => {
                if rng.random_range(0..=6) == 0 {
                    append_predefined_shape(world, rng, 6);
                } else {
                    append_simple_chain(world, rng, 6, 4);
                }
            }
            PlatformStyle::Space => append_simple_chain(world, rng, 0, 0),
        }
        debug_assert!(world.platforms_sorted());
    }
}

/// Whether the top platform's tallest visual would still reach into the view
fn needs_platforms(world: &World) -> bool {
    world.ceiling() + world.style.lookahead_height() + world.scroll_offset_y >= 0
}

/// Drift velocity for a new platform group
pub fn platform_velocity<R: Rng + ?Sized>(rng: &mut R, base: u8) -> i32 {
    if base >= STATIONARY_BASE || rng.random_range(0..=2) > 0 {
        return 0;
    }
    rng.random_range(-MAX_DRIFT..=MAX_DRIFT)
}

/// Run a held jump from a random point on the top platform until it peaks
///
/// Returns the ghost at its apex.
fn ghost_apex<R: Rng + ?Sized>(world: &World, rng: &mut R, angle: Option<u16>) -> Character {
    let top = world.platforms()[world.platforms().len() - 1];
    let (x0, x1) = top.jump_span();
    let x = rng.random_range(Fixed::from_int(x0).raw()..=Fixed::from_int(x1 - 1).raw());
    let x = Fixed::from_raw(x).rem_euclid(Fixed::from_int(SCREEN_WIDTH));
    let angle = angle.unwrap_or_else(|| {
        rng.random_range(360 - CHAIN_ANGLE_SPREAD..=360 + CHAIN_ANGLE_SPREAD)
            .rem_euclid(360) as u16
    });

    let mut ghost = Character::ghost(x, Fixed::from_int(top.y), angle);
    while ghost.vy <= Fixed::ZERO {
        ghost.jump();
        ghost.step();
    }
    ghost
}

/// Append one platform reachable from the top, plus an optional side diversion
///
/// `diversion_rate` of 0 never diverts; higher values divert more often.
pub fn append_simple_chain<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    base: u8,
    diversion_rate: u32,
) {
    let prev_top = world.ceiling();
    let tile = base + rng.random_range(0..TILES_PER_BAND);
    let half_width = super::state::tile_width(Some(tile)) / 2;

    let ghost = ghost_apex(world, rng, None);
    let vx = platform_velocity(rng, base);
    let top = Platform::new(
        ghost.pixel_x() - half_width,
        ghost.pixel_y() + LANDING_SLACK,
        tile,
        vx,
    );
    debug_assert!(top.y < prev_top, "new platform must be above the old top");
    world.platforms.push(top);
    log::debug!(
        "chain platform {} at ({}, {}) tile {tile} angle {}",
        world.platforms.len() - 1,
        top.x,
        top.y,
        ghost.angle()
    );

    if rng.random_range(0..=diversion_rate) > 0 {
        append_diversion(world, rng, &top, base);
    }
}

/// Side platform just below the new top; never the next top of the chain
fn append_diversion<R: Rng + ?Sized>(world: &mut World, rng: &mut R, top: &Platform, base: u8) {
    let (tile, vx) = if base == 12 && rng.random_range(0..=2) == 0 {
        // Drifting cloud among the rocks
        let tile = rng.random_range(6..12u8);
        let speed = rng.random_range(1..=3);
        (tile, if rng.random_bool(0.5) { speed } else { -speed })
    } else {
        (base + rng.random_range(0..TILES_PER_BAND), platform_velocity(rng, base))
    };

    let x = top.x + rng.random_range(DIVERSION_OFFSET_X.0..=DIVERSION_OFFSET_X.1);
    let y = top.y + rng.random_range(DIVERSION_OFFSET_Y.0..=DIVERSION_OFFSET_Y.1);
    let mut diversion = Platform::new(x, y, tile, vx);

    if !world.springs.is_full() && rng.random_range(0..=2) > 0 {
        let (x0, x1) = diversion.jump_span();
        let spring = Spring {
            x: rng.random_range(x0..=x1) % SCREEN_WIDTH,
            y: diversion.y,
            compression: 0,
        };
        diversion.spring = Some(world.springs.push(spring));
        log::debug!("spring {} at ({}, {})", world.springs.len() - 1, spring.x, spring.y);
    }

    world.platforms.push(diversion);
    sort_suffix(world);
}

/// Move the just-appended platform down into elevation order
fn sort_suffix(world: &mut World) {
    let len = world.platforms.len();
    debug_assert!(len > 1);
    let y = world.platforms[len - 1].y;
    let index = world.platforms[..len - 1].partition_point(|p| p.y >= y);
    debug_assert!(index > 0, "nothing may sort below the floor");
    world.platforms.rotate_last_to(index);
}

/// Append a fixed S-shaped run of four platforms
///
/// A straight-up jump sets the base point and vertical spacing; the
/// zig-zag direction is picked from two mirror layouts.
pub fn append_predefined_shape<R: Rng + ?Sized>(world: &mut World, rng: &mut R, base: u8) {
    let prev_top = world.ceiling();
    let ghost = ghost_apex(world, rng, Some(0));
    let vx = platform_velocity(rng, base);

    let p0 = Platform::new(
        ghost.pixel_x(),
        ghost.pixel_y() + LANDING_SLACK,
        base + rng.random_range(4..=5),
        vx,
    );
    let rise = prev_top - p0.y;
    debug_assert!(rise > 0);
    world.platforms.push(p0);

    let p1y = p0.y - rise / 2;
    let p2y = p0.y - rise;
    let p3y = p1y - rise;
    let (p1x, p2x, p3x) = if rng.random_bool(0.5) {
        let p2x = p0.x;
        let p1x = p2x + SHAPE_STEP;
        (p1x, p2x, p1x + SHAPE_STEP)
    } else {
        let p2x = p0.x - SHAPE_STEP;
        let p1x = p2x - SHAPE_STEP;
        (p1x, p2x, p1x - 32)
    };

    let p1 = Platform::new(p1x, p1y, base + rng.random_range(0..=1), vx);
    let p2 = Platform::new(p2x, p2y, base + rng.random_range(0..=1), vx);
    let p3 = Platform::new(p3x, p3y, base + rng.random_range(4..=5), vx);
    for p in [p1, p2, p3] {
        world.platforms.push(p);
    }
    log::debug!(
        "shape at ({}, {}) rise {rise}, top now {}",
        p0.x,
        p0.y,
        world.ceiling()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Whether some held jump from `from` comes down through `to`'s span
    fn reachable(from: &Platform, to: &Platform, angles: &[i32], x_step: usize) -> bool {
        let (x0, x1) = from.jump_span();
        let (tx0, tx1) = to.span();
        for &angle in angles {
            for x in (x0..x1).step_by(x_step) {
                let mut c = Character::ghost(
                    Fixed::from_int(x.rem_euclid(SCREEN_WIDTH)),
                    Fixed::from_int(from.y),
                    angle.rem_euclid(360) as u16,
                );
                for frame in 0..200 {
                    c.jump();
                    let old_y = c.pixel_y();
                    c.step();
                    let new_y = c.pixel_y();
                    if c.is_resting() && frame > 0 {
                        break;
                    }
                    if new_y > old_y {
                        if old_y <= to.y && to.y <= new_y && c.collides_horizontally(tx0, tx1) {
                            return true;
                        }
                        if new_y > to.y {
                            break;
                        }
                    }
                }
            }
        }
        false
    }

    fn chain_angles() -> Vec<i32> {
        (300..=420).step_by(3).collect()
    }

    #[test]
    fn test_chain_platforms_are_reachable() {
        let mut rng = Pcg32::seed_from_u64(7);
        let angles = chain_angles();
        for (base, rate) in [(18, 6), (12, 5), (6, 4), (0, 0)] {
            let mut world = World::new();
            for _ in 0..12 {
                let from = world.platforms()[world.platforms().len() - 1];
                append_simple_chain(&mut world, &mut rng, base, rate);
                let to = world.platforms()[world.platforms().len() - 1];
                assert!(to.y < from.y);
                assert!(
                    reachable(&from, &to, &angles, 2),
                    "platform at ({}, {}) unreachable from ({}, {})",
                    to.x,
                    to.y,
                    from.x,
                    from.y
                );
            }
        }
    }

    #[test]
    fn test_shape_platforms_are_reachable() {
        let mut rng = Pcg32::seed_from_u64(11);
        let angles: Vec<i32> = (0..360).step_by(3).collect();
        for base in [12, 6] {
            let mut world = World::new();
            for _ in 0..4 {
                append_simple_chain(&mut world, &mut rng, base, 0);
            }
            for _ in 0..3 {
                let start = world.platforms().len();
                append_predefined_shape(&mut world, &mut rng, base);
                assert_eq!(world.platforms().len(), start + 4);
                for i in start..start + 4 {
                    let to = world.platforms()[i];
                    let ok = world.platforms()[i - 4..i]
                        .iter()
                        .rev()
                        .any(|from| from.y > to.y && reachable(from, &to, &angles, 3));
                    assert!(ok, "shape platform {i} at ({}, {}) unreachable", to.x, to.y);
                }
            }
        }
    }

    #[test]
    fn test_shape_layout() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut world = World::new();
        append_predefined_shape(&mut world, &mut rng, 6);
        let p = world.platforms();
        assert_eq!(p.len(), 5);
        let rise = p[0].y - p[1].y;
        assert_eq!(p[2].y, p[1].y - rise / 2);
        assert_eq!(p[3].y, p[1].y - rise);
        assert_eq!(p[4].y, p[2].y - rise);
        // One drift velocity for the whole group
        assert!(p[1..].iter().all(|q| q.vx == p[1].vx));
        // Narrow tiles at the ends, wide in the middle
        assert_eq!(p[1].width(), 64);
        assert_eq!(p[2].width(), 128);
        assert_eq!(p[3].width(), 128);
        assert_eq!(p[4].width(), 64);
    }

    #[test]
    fn test_space_never_diverts_or_drifts() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut world = World::new();
        for _ in 0..50 {
            append_simple_chain(&mut world, &mut rng, 0, 0);
        }
        assert_eq!(world.platforms().len(), 51);
        assert!(world.springs().is_empty());
        assert!(world.platforms().iter().skip(1).all(|p| p.band() == Some(0)));
    }

    #[test]
    fn test_rocks_never_drift_except_clouds() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut world = World::new();
        for _ in 0..200 {
            append_simple_chain(&mut world, &mut rng, 12, 5);
        }
        for p in world.platforms().iter().skip(1) {
            match p.band() {
                Some(2) => assert_eq!(p.vx, 0),
                Some(1) => assert!((1..=3).contains(&p.vx.abs())),
                other => panic!("unexpected band {other:?}"),
            }
        }
    }

    #[test]
    fn test_diversions_carry_springs() {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut world = World::new();
        for _ in 0..100 {
            append_simple_chain(&mut world, &mut rng, 18, 6);
        }
        assert!(!world.springs().is_empty());
        for p in world.platforms() {
            if let Some(index) = p.spring {
                let spring = world.springs()[index];
                assert_eq!(spring.y, p.y);
                assert!((0..SCREEN_WIDTH).contains(&spring.x));
            }
        }
    }

    #[test]
    fn test_spring_capacity_is_not_fatal() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut world = World::new();
        for _ in 0..600 {
            append_simple_chain(&mut world, &mut rng, 18, 6);
        }
        assert!(world.springs.is_full());
        assert!(world.platforms_sorted());
    }

    #[test]
    fn test_generate_fills_lookahead() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut world = World::new();
        generate(&mut world, &mut rng);
        assert!(world.platforms().len() > 1);
        let style = world.style;
        assert!(world.ceiling() + style.lookahead_height() + world.scroll_offset_y() < 0);

        // Already satisfied: nothing more to do
        let len = world.platforms().len();
        generate(&mut world, &mut rng);
        assert_eq!(world.platforms().len(), len);
    }

    #[test]
    fn test_platform_velocity_range() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut drifting = 0;
        for _ in 0..300 {
            assert_eq!(platform_velocity(&mut rng, 12), 0);
            let vx = platform_velocity(&mut rng, 6);
            assert!((-MAX_DRIFT..=MAX_DRIFT).contains(&vx));
            drifting += (vx != 0) as u32;
        }
        assert!(drifting > 0);
    }

    fn style() -> impl Strategy<Value = PlatformStyle> {
        prop_oneof![
            Just(PlatformStyle::Trees),
            Just(PlatformStyle::Rocks),
            Just(PlatformStyle::Clouds),
            Just(PlatformStyle::Space),
        ]
    }

    proptest! {
        #[test]
        fn prop_generation_keeps_elevation_order(
            seed in any::<u64>(),
            styles in prop::collection::vec(style(), 1..6),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut world = World::new();
            for style in styles {
                world.style = style;
                world.scroll_offset_y += 400;
                generate(&mut world, &mut rng);
                prop_assert!(world.platforms_sorted());
                prop_assert!(world.platforms()[0].is_floor());
            }
        }
    }
}
