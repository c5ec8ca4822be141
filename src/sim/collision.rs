//! Character collision against platforms and springs
//!
//! Platforms are sorted by elevation, so instead of searching the whole
//! list every frame a cursor tracks the highest platform at or below the
//! character. Height changes little between frames, so moving the cursor is
//! a short walk.

use super::fixed::Fixed;
use super::state::{Platform, World};
use crate::consts::SCREEN_WIDTH;

/// Springs are checked within this many pixels below the character
pub const SPRING_BAND: i32 = 24;
/// Horizontal reach of a spring from its center
pub const SPRING_REACH: i32 = 16;
/// Beyond this distance above the spring the fall is slowed harder
pub const SPRING_FAR: i32 = 12;
/// Fall speed while a spring compresses and the character is still far above
pub const SPRING_FAR_CLAMP: Fixed = Fixed::ONE;
/// Fall speed while a spring compresses close to the character
pub const SPRING_NEAR_CLAMP: Fixed = Fixed::from_raw(32);
/// Velocity from a fully compressed spring
pub const SPRING_LAUNCH: Fixed = Fixed::from_int(-20);
/// Compression state that launches
pub const SPRING_COMPRESSED: u8 = 2;

/// Move `cursor` to the highest platform at or below `y`
///
/// Platforms must be sorted by elevation. There must be a platform above `y`,
/// which the generator's lookahead guarantees for the character.
pub fn adjust_cursor(platforms: &[Platform], cursor: usize, y: i32) -> usize {
    debug_assert!(y <= 0);
    debug_assert!(!platforms.is_empty());
    let mut cursor = cursor.min(platforms.len() - 1);

    while cursor + 1 < platforms.len() && platforms[cursor + 1].y >= y {
        cursor += 1;
    }
    debug_assert!(cursor + 1 < platforms.len(), "character reached the top platform");

    while cursor > 0 && platforms[cursor].y < y {
        cursor -= 1;
    }
    debug_assert!(platforms[cursor].y >= y || cursor == 0);
    cursor
}

impl World {
    /// Step the character and resolve what it runs into
    ///
    /// Returns the index of the platform landed on this frame, if any.
    pub(crate) fn step_character(&mut self) -> Option<usize> {
        let old_y = self.character.pixel_y();
        self.cursor = adjust_cursor(&self.platforms, self.cursor, old_y);
        let old_cursor = self.cursor;

        self.character.step();

        let new_y = self.character.pixel_y();
        self.cursor = adjust_cursor(&self.platforms, self.cursor, new_y);

        if new_y > old_y {
            self.bounce_on_springs(new_y);
            self.land_on_platforms(old_y, new_y, old_cursor)
        } else {
            self.carry_resting(old_y, old_cursor);
            None
        }
    }

    /// Slow or launch a falling character over a spring
    fn bounce_on_springs(&mut self, new_y: i32) {
        let x = self.character.pixel_x();
        for spring in self.springs.iter_mut().rev() {
            if spring.y < new_y || spring.y > new_y + SPRING_BAND {
                spring.compression = 0;
                continue;
            }
            debug_assert!((0..SCREEN_WIDTH).contains(&spring.x));
            let d = (spring.x - x).abs();
            if d > SPRING_REACH && d < SCREEN_WIDTH - SPRING_REACH {
                spring.compression = 0;
                continue;
            }

            if spring.compression < SPRING_COMPRESSED {
                self.character.vy = if spring.y - new_y > SPRING_FAR {
                    SPRING_FAR_CLAMP
                } else {
                    SPRING_NEAR_CLAMP
                };
                spring.compression += 1;
            } else {
                self.character.vy = SPRING_LAUNCH;
                spring.compression = 0;
                log::debug!("spring launch at ({}, {})", spring.x, spring.y);
            }
        }
    }

    /// Scan down from where the fall started for a platform to land on
    fn land_on_platforms(&mut self, old_y: i32, new_y: i32, old_cursor: usize) -> Option<usize> {
        // Starting exactly on a platform means jumping down through it
        let start = if self.platforms[old_cursor].y == old_y {
            old_cursor.checked_sub(1)?
        } else {
            old_cursor
        };

        for i in (self.cursor..=start).rev() {
            let platform = &self.platforms[i];
            if platform.y > new_y {
                break;
            }
            let (x0, x1) = platform.span();
            if self.character.collides_horizontally(x0, x1) {
                self.character.land(platform.y);
                return Some(i);
            }
        }
        None
    }

    /// A resting character rides its drifting platform
    fn carry_resting(&mut self, old_y: i32, old_cursor: usize) {
        let platform = &self.platforms[old_cursor];
        if platform.vx != 0 && self.character.is_resting() && platform.y == old_y {
            self.character.x = (self.character.x + Fixed::from_int(platform.vx))
                .rem_euclid(Fixed::from_int(SCREEN_WIDTH));
        }
    }
}
