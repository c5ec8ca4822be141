//! Fixed timestep simulation tick
//!
//! One call advances the world by one frame at [`crate::consts::FRAME_RATE`].

use rand::Rng;

use super::generator::generate;
use super::meteor::{animate_meteors, spawn_meteors};
use super::state::{Beat, World};
use crate::consts::SCREEN_WIDTH;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Facing angle in degrees, any value (normalized on use)
    pub angle: i32,
    /// Jump requested this frame; hold to keep adding lift
    pub jump: bool,
}

impl World {
    /// Take the music clock's reading for this frame
    ///
    /// The terminal phase leaves the style alone.
    pub fn observe_beat(&mut self, beat: Beat) {
        debug_assert!(beat.index >= self.beat, "beat went backwards");
        if let Some(style) = beat.phase.style() {
            debug_assert!(style >= self.style, "phase went backwards");
            if style != self.style {
                log::info!("platform style {:?} -> {:?} at beat {}", self.style, style, beat.index);
                self.style = style;
            }
        }
        self.beat = beat.index;
    }

    /// Advance one frame
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        generate(self, rng);

        spawn_meteors(self, rng);
        animate_meteors(self);

        self.drift_platforms();

        if let Some(index) = self.step_character() {
            log::trace!("landed on platform {index}");
        }

        self.update_camera();
        self.update_background();
    }

    /// Apply player input, after the frame's physics
    pub fn apply_input(&mut self, input: &TickInput) {
        self.character.set_angle(input.angle);
        if input.jump {
            self.character.jump();
        }
    }

    /// Move drifting platforms and their springs
    fn drift_platforms(&mut self) {
        for platform in self.platforms.iter_mut().filter(|p| p.vx != 0) {
            platform.x = (platform.x + platform.vx).rem_euclid(SCREEN_WIDTH);
            if let Some(index) = platform.spring {
                let spring = &mut self.springs[index];
                spring.x = (spring.x + platform.vx).rem_euclid(SCREEN_WIDTH);
            }
        }
    }
}

/// Advance the world one frame: beat, physics, then input
pub fn tick<R: Rng + ?Sized>(world: &mut World, beat: Beat, input: &TickInput, rng: &mut R) {
    world.observe_beat(beat);
    world.step(rng);
    world.apply_input(input);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Phase, Platform, PlatformStyle, Spring};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn beat(phase: Phase, index: u16) -> Beat {
        Beat { phase, index }
    }

    #[test]
    fn test_first_frame_generates_and_settles() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut world = World::new();
        tick(&mut world, Beat::default(), &TickInput::default(), &mut rng);

        assert!(world.platforms().len() > 1);
        assert!(world.platforms_sorted());
        assert!(world.character.is_resting());
        assert_eq!(world.cursor(), 0);
        assert_eq!(world.scroll_offset_y(), 22);
    }

    #[test]
    fn test_input_applies_after_physics() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut world = World::new();
        let input = TickInput {
            angle: 30,
            jump: true,
        };
        tick(&mut world, Beat::default(), &input, &mut rng);
        // Launched but not moved yet
        assert_eq!(world.character.angle(), 30);
        assert_eq!(world.character.in_flight, 1);
        assert_eq!(world.character.pixel_y(), 0);

        tick(&mut world, Beat::default(), &TickInput::default(), &mut rng);
        assert!(world.character.pixel_y() < 0);
    }

    #[test]
    fn test_beat_drives_style_and_meteors() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut world = World::new();
        tick(&mut world, beat(Phase::Rocks, 4), &TickInput::default(), &mut rng);
        assert_eq!(world.style, PlatformStyle::Rocks);
        assert_eq!(world.meteors_spawned(), 4);

        // Terminal keeps the last style
        tick(&mut world, beat(Phase::Terminal, 4), &TickInput::default(), &mut rng);
        assert_eq!(world.style, PlatformStyle::Rocks);
    }

    #[test]
    fn test_drift_moves_platform_and_spring() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut world = World::new();
        let spring = world.springs.push(Spring {
            x: 399,
            y: -10,
            compression: 0,
        });
        let mut platform = Platform::new(398, -10, 0, 2);
        platform.spring = Some(spring);
        world.platforms.push(platform);

        world.step(&mut rng);
        assert_eq!(world.platforms()[1].x, 0);
        assert_eq!(world.springs()[spring].x, 1);
    }

    #[test]
    fn test_determinism() {
        let inputs: Vec<TickInput> = (0..600)
            .map(|i| TickInput {
                angle: (i * 7) % 120 - 60,
                jump: i % 40 < 8,
            })
            .collect();

        let run = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut world = World::new();
            for (frame, input) in inputs.iter().enumerate() {
                let b = beat(Phase::Trees, (frame / 30) as u16);
                tick(&mut world, b, input, &mut rng);
            }
            world.snapshot()
        };

        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_reset_after_play() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut world = World::new();
        for frame in 0..200u16 {
            let input = TickInput {
                angle: 20,
                jump: true,
            };
            tick(&mut world, beat(Phase::Trees, frame / 30), &input, &mut rng);
        }
        world.reset();
        assert_eq!(world.platforms().len(), 1);
        assert_eq!(world.meteors_spawned(), 0);
        assert_eq!(world.scroll_offset_y(), 0);

        tick(&mut world, Beat::default(), &TickInput::default(), &mut rng);
        assert!(world.platforms().len() > 1);
    }

    fn input() -> impl Strategy<Value = TickInput> {
        (-90i32..90, any::<bool>()).prop_map(|(angle, jump)| TickInput { angle, jump })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_step_keeps_world_invariants(
            seed in any::<u64>(),
            inputs in prop::collection::vec((input(), 0u16..2), 1..300),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut world = World::new();
            let mut index = 0u16;
            let mut meteor_start = 0;
            for (input, beats) in inputs {
                index += beats;
                tick(&mut world, beat(Phase::Trees, index), &input, &mut rng);

                prop_assert!(world.platforms_sorted());
                let cursor = world.cursor();
                prop_assert!(world.platforms()[cursor].y >= world.character.pixel_y());
                prop_assert!(cursor + 1 < world.platforms().len());
                prop_assert!(world.meteor_start() >= meteor_start);
                prop_assert!(world.meteor_start() <= world.meteors_spawned());
                prop_assert!(world.character.vy <= crate::sim::character::TERMINAL_VELOCITY);
                prop_assert!(world.scroll_offset_y() % 2 == 0);
                meteor_start = world.meteor_start();
            }
        }
    }
}
