//! Controlled character physics
//!
//! The character is either resting on something (`in_flight == 0`) or in
//! flight (`in_flight > 0`, counting frames since launch). Being stunned is
//! orthogonal: input is ignored while `stun > 0` but gravity and animation
//! keep running.
//!
//! Coordinates: `y` is 0 on the ground floor and grows downward, so every
//! height above the floor is negative. `x` wraps around the screen width.

use serde::{Deserialize, Serialize};

use super::fixed::Fixed;
use super::velocity_table::jump_velocity;
use crate::consts::SCREEN_WIDTH;

/// Gravity in sub-units per frame per frame
pub const GRAVITY: Fixed = Fixed::from_raw(200);
/// Maximum downward velocity
pub const TERMINAL_VELOCITY: Fixed = Fixed::from_int(8);
/// Highest animation frame (fully stretched)
pub const PEAK_FRAME: u8 = 7;
/// Jump input keeps adding vertical velocity while in-flight time is below this
pub const JUMP_INPUT_WINDOW: u32 = 5;
/// Frames of stun after a meteor hit
pub const STUN_FRAMES: u32 = 15;

const FIXED_SCREEN_WIDTH: Fixed = Fixed::from_int(SCREEN_WIDTH);

/// The player-controlled character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Bottom center of the sprite
    pub x: Fixed,
    pub y: Fixed,
    pub vx: Fixed,
    pub vy: Fixed,
    /// Facing angle in degrees [0, 360), 0 is up and 90 is right
    angle: u16,
    /// Animation frame [0, PEAK_FRAME]
    pub frame: u8,
    /// Frames spent in flight, 0 while resting
    pub in_flight: u32,
    /// Remaining stun frames
    pub stun: u32,
    /// Highest point reached (lowest y)
    pub peak: Fixed,
    /// Longest distance fallen in one go
    pub max_fall: Fixed,
    /// Height where the current fall began
    pub fall_start: Fixed,
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

impl Character {
    /// Character standing on the floor at the horizontal center
    pub fn new() -> Self {
        Self::at(Fixed::from_int(SCREEN_WIDTH / 2), Fixed::ZERO, 0)
    }

    /// Disposable character used for reachability simulation
    pub fn ghost(x: Fixed, y: Fixed, angle: u16) -> Self {
        Self::at(x, y, angle)
    }

    fn at(x: Fixed, y: Fixed, angle: u16) -> Self {
        debug_assert!(angle < 360);
        Self {
            x,
            y,
            vx: Fixed::ZERO,
            vy: Fixed::ZERO,
            angle,
            frame: 0,
            in_flight: 0,
            stun: 0,
            peak: Fixed::ZERO,
            max_fall: Fixed::ZERO,
            fall_start: Fixed::ZERO,
        }
    }

    /// Return to the session start state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Facing angle in degrees
    #[inline]
    pub fn angle(&self) -> u16 {
        self.angle
    }

    /// Set facing angle, normalizing any input into [0, 360)
    pub fn set_angle(&mut self, degrees: i32) {
        self.angle = degrees.rem_euclid(360) as u16;
    }

    #[inline]
    pub fn is_resting(&self) -> bool {
        self.in_flight == 0
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.stun > 0
    }

    /// Horizontal position in whole pixels
    #[inline]
    pub fn pixel_x(&self) -> i32 {
        self.x.to_int()
    }

    /// Vertical position in whole pixels
    #[inline]
    pub fn pixel_y(&self) -> i32 {
        self.y.to_int()
    }

    /// Apply jump input for this frame
    ///
    /// Holding jump over the first few frames of a flight keeps adding
    /// vertical velocity, so tap and hold give different heights. A resting
    /// character must have settled back to animation frame 0 first.
    pub fn jump(&mut self) {
        debug_assert!(self.angle < 360);
        if self.is_stunned() {
            return;
        }

        let (vx, vy) = jump_velocity(self.angle);
        if self.in_flight < JUMP_INPUT_WINDOW {
            if self.in_flight == 0 {
                if self.frame > 0 {
                    return;
                }
                self.in_flight = 1;
            }
            let old_vy = self.vy;
            self.vy = (self.vy + vy).min(TERMINAL_VELOCITY);
            self.track_fall_start(old_vy);
        }

        // Only takes effect while in flight
        self.vx = vx;
    }

    /// Advance one frame
    pub fn step(&mut self) {
        debug_assert!(self.angle < 360);
        if self.stun > 0 {
            self.stun -= 1;
        }

        if self.is_resting() {
            self.frame = self.frame.saturating_sub(1);
            return;
        }
        self.in_flight += 1;

        self.x = (self.x + self.vx).rem_euclid(FIXED_SCREEN_WIDTH);
        self.y += self.vy;

        if self.y > Fixed::ZERO {
            self.land(0);
            return;
        }
        self.peak = self.peak.min(self.y);

        let old_vy = self.vy;
        self.vy = (self.vy + GRAVITY).min(TERMINAL_VELOCITY);
        self.track_fall_start(old_vy);

        if self.frame < PEAK_FRAME {
            self.frame += 1;
        }

        // Airborne steering follows the live input angle
        if !self.is_stunned() {
            self.vx = jump_velocity(self.angle).0;
        }
    }

    /// Take a meteor hit carrying velocity `(vx, vy)` in whole pixels per frame
    ///
    /// Stun does not accumulate: repeated hits reset it to the same duration.
    pub fn hit(&mut self, vx: i32, vy: i32) {
        self.stun = STUN_FRAMES;
        if self.is_resting() {
            self.in_flight = 1;
        }

        let old_vy = self.vy;
        self.vx += Fixed::from_quarters(vx);
        self.vy = (self.vy + Fixed::from_quarters(vy)).min(TERMINAL_VELOCITY);
        self.track_fall_start(old_vy);
    }

    /// Come to rest at `height` (whole pixels)
    pub fn land(&mut self, height: i32) {
        self.y = Fixed::from_int(height);
        self.vx = Fixed::ZERO;
        self.vy = Fixed::ZERO;
        self.in_flight = 0;

        let fall = self.y - self.fall_start;
        self.max_fall = self.max_fall.max(fall);
    }

    /// Whether the character's column lies within `[x0, x1]`
    ///
    /// `x0 > x1` means the span crosses the screen seam. `x0 == x1` is a
    /// full-width span (the floor).
    pub fn collides_horizontally(&self, x0: i32, x1: i32) -> bool {
        let x = self.pixel_x();
        if x0 < x1 {
            x0 <= x && x <= x1
        } else {
            x <= x1 || x0 <= x
        }
    }

    fn track_fall_start(&mut self, old_vy: Fixed) {
        if old_vy <= Fixed::ZERO && self.vy > Fixed::ZERO {
            self.fall_start = self.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run_until_rest(c: &mut Character) -> u32 {
        let mut frames = 0;
        while !c.is_resting() {
            c.step();
            frames += 1;
            assert!(frames < 1000, "never landed");
        }
        frames
    }

    #[test]
    fn test_straight_jump_returns_to_ground() {
        let mut c = Character::new();
        c.jump();
        assert_eq!(c.in_flight, 1);
        c.step();
        run_until_rest(&mut c);

        assert_eq!(c.y, Fixed::ZERO);
        assert!(c.peak < Fixed::ZERO);
        assert_eq!(c.max_fall, -c.peak);
        assert_eq!(c.pixel_x(), SCREEN_WIDTH / 2);
    }

    #[test]
    fn test_held_jump_goes_higher() {
        let mut tap = Character::new();
        tap.jump();
        tap.step();
        run_until_rest(&mut tap);

        let mut held = Character::new();
        for _ in 0..10 {
            held.jump();
            held.step();
        }
        run_until_rest(&mut held);

        assert!(held.peak < tap.peak);
    }

    #[test]
    fn test_jump_requires_settled_animation() {
        let mut c = Character::new();
        c.frame = 3;
        c.jump();
        assert!(c.is_resting());
        assert_eq!(c.vy, Fixed::ZERO);

        // Resting steps relax the frame back to 0
        for _ in 0..3 {
            c.step();
        }
        assert_eq!(c.frame, 0);
        c.jump();
        assert!(!c.is_resting());
    }

    #[test]
    fn test_jump_window_closes() {
        let mut c = Character::new();
        c.in_flight = JUMP_INPUT_WINDOW;
        c.vy = Fixed::from_int(-1);
        c.set_angle(90);
        c.jump();
        assert_eq!(c.vy, Fixed::from_int(-1));
        // Horizontal velocity still tracks the angle
        assert_eq!(c.vx, Fixed::from_int(6));
    }

    #[test]
    fn test_stunned_ignores_jump() {
        let mut c = Character::new();
        c.stun = 2;
        c.jump();
        assert!(c.is_resting());
        c.step();
        c.step();
        assert!(!c.is_stunned());
    }

    #[test]
    fn test_hit_on_resting_character() {
        let mut c = Character::new();
        c.hit(10, 10);
        assert_eq!(c.stun, 15);
        assert_eq!(c.in_flight, 1);
        assert_eq!(c.vy, Fixed::from_raw(10 << (Fixed::FRACTION_BITS - 2)));
        assert_eq!(c.vx, Fixed::from_raw(10 << (Fixed::FRACTION_BITS - 2)));
        // Downward velocity starts a fall here
        assert_eq!(c.fall_start, Fixed::ZERO);
    }

    #[test]
    fn test_hit_stun_does_not_stack() {
        let mut c = Character::new();
        c.hit(5, 5);
        c.step();
        c.hit(5, 5);
        assert_eq!(c.stun, STUN_FRAMES);
    }

    #[test]
    fn test_hit_clamps_to_terminal_velocity() {
        let mut c = Character::new();
        c.vy = Fixed::from_int(7);
        c.in_flight = 3;
        c.hit(0, 15);
        assert_eq!(c.vy, TERMINAL_VELOCITY);
    }

    #[test]
    fn test_stunned_flight_keeps_momentum() {
        let mut c = Character::new();
        c.y = Fixed::from_int(-100);
        c.hit(-12, 5);
        let vx = c.vx;
        c.set_angle(90);
        c.step();
        assert_eq!(c.vx, vx);
    }

    #[test]
    fn test_horizontal_wraparound() {
        let mut c = Character::new();
        c.x = Fixed::from_int(SCREEN_WIDTH - 1);
        c.set_angle(90);
        c.jump();
        c.step();
        assert!(c.pixel_x() < 10);
    }

    #[test]
    fn test_land_records_longest_fall() {
        let mut c = Character::new();
        c.fall_start = Fixed::from_int(-50);
        c.land(-10);
        assert_eq!(c.max_fall, Fixed::from_int(40));
        c.fall_start = Fixed::from_int(-20);
        c.land(-10);
        assert_eq!(c.max_fall, Fixed::from_int(40));
        assert!(c.is_resting());
    }

    #[test]
    fn test_collides_horizontally() {
        let mut c = Character::new();
        c.x = Fixed::from_int(100);
        assert!(c.collides_horizontally(50, 150));
        assert!(c.collides_horizontally(100, 100 + 64));
        assert!(!c.collides_horizontally(101, 200));

        // Span crossing the seam
        c.x = Fixed::from_int(5);
        assert!(c.collides_horizontally(380, 20));
        c.x = Fixed::from_int(390);
        assert!(c.collides_horizontally(380, 20));
        c.x = Fixed::from_int(200);
        assert!(!c.collides_horizontally(380, 20));

        // Full-width floor
        assert!(c.collides_horizontally(0, 0));
    }

    #[test]
    fn test_set_angle_normalizes() {
        let mut c = Character::new();
        c.set_angle(-30);
        assert_eq!(c.angle(), 330);
        c.set_angle(725);
        assert_eq!(c.angle(), 5);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Jump,
        Step,
        Hit(i32, i32),
        Angle(i32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Jump),
            6 => Just(Op::Step),
            1 => (-15i32..=15, 5i32..=15).prop_map(|(vx, vy)| Op::Hit(vx, vy)),
            1 => (-720i32..720).prop_map(Op::Angle),
        ]
    }

    proptest! {
        #[test]
        fn prop_vertical_velocity_never_exceeds_terminal(ops in prop::collection::vec(op(), 0..400)) {
            let mut c = Character::new();
            for op in ops {
                match op {
                    Op::Jump => c.jump(),
                    Op::Step => c.step(),
                    Op::Hit(vx, vy) => c.hit(vx, vy),
                    Op::Angle(a) => c.set_angle(a),
                }
                prop_assert!(c.vy <= TERMINAL_VELOCITY);
                prop_assert!(c.angle() < 360);
                prop_assert!(c.y <= Fixed::ZERO);
                prop_assert!(c.frame <= PEAK_FRAME);
            }
        }
    }
}
