//! Camera, background shade, and the read-only snapshot handed to renderers

use std::ops::Range;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::character::Character;
use super::state::{Meteor, Platform, Spring, World};
use crate::consts::SCREEN_HEIGHT;

/// Screen row the camera keeps the character near (3/4 down)
pub const CAMERA_ANCHOR_Y: i32 = 3 * SCREEN_HEIGHT / 4;
/// Background gray per style band: space, clouds, rocks, trees
pub const GRAY_LEVELS: [u8; 4] = [0, 7, 49, 62];
/// Platforms examined above the cursor when drawing
pub const VISIBLE_PLATFORM_LIMIT: usize = 30;
/// Platform sprite top relative to the collision edge
pub const PLATFORM_SPRITE_OFFSET_Y: i32 = -48;
/// Spring sprite top relative to its base
pub const SPRING_SPRITE_OFFSET_Y: i32 = -31;
const SPRING_SPRITE_HEIGHT: i32 = 32;

/// Where and how to draw the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPose {
    /// Bottom center in world pixels
    pub pos: IVec2,
    pub angle: u16,
    pub frame: u8,
    pub resting: bool,
    pub stunned: bool,
}

impl From<&Character> for CharacterPose {
    fn from(c: &Character) -> Self {
        Self {
            pos: IVec2::new(c.pixel_x(), c.pixel_y()),
            angle: c.angle(),
            frame: c.frame,
            resting: c.is_resting(),
            stunned: c.is_stunned(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub character: CharacterPose,
    /// Platforms near the view, lowest first
    pub platforms: Vec<Platform>,
    pub springs: Vec<Spring>,
    pub meteors: Vec<Meteor>,
    /// Added to world y to get screen y
    pub scroll_offset_y: i32,
    /// Background gray [0, 64]
    pub background_level: u8,
    /// Height readout in pixels, only while above the ground floor
    pub height: Option<i32>,
}

/// Height above ground in whole pixels, `None` on the floor
pub fn height_readout(character: &Character) -> Option<i32> {
    let y = character.y.raw();
    (y < 0).then(|| -y >> super::Fixed::FRACTION_BITS)
}

/// Ease `offset` toward keeping `character_y` at the camera anchor
///
/// Always lands on even values so the view scrolls in 2 pixel steps.
pub fn smooth_scroll(offset: i32, character_y: i32) -> i32 {
    let target = CAMERA_ANCHOR_Y - character_y;
    ((7 * offset + target) / 8) & !1
}

/// Average background gray over all scanlines
///
/// Each platform shades the rows from its sprite top down to the next
/// platform below it. Rows not covered by any platform use the trees level.
pub fn background_level(platforms: &[Platform], cursor: usize, scroll_offset_y: i32) -> u8 {
    let mut rows = [GRAY_LEVELS[3]; SCREEN_HEIGHT as usize];
    let end = (cursor + VISIBLE_PLATFORM_LIMIT).min(platforms.len());

    for i in (1..end).rev() {
        let platform = &platforms[i];
        let mut height = platforms[i - 1].y - platform.y;
        debug_assert!(height >= 0);
        let mut top = platform.y + PLATFORM_SPRITE_OFFSET_Y + scroll_offset_y;
        if top >= SCREEN_HEIGHT {
            break;
        }
        if top + height < 0 {
            continue;
        }
        if top < 0 {
            height += top;
            top = 0;
        }
        height = height.min(SCREEN_HEIGHT - top);

        let level = platform
            .band()
            .map_or(GRAY_LEVELS[3], |band| GRAY_LEVELS[usize::from(band)]);
        rows[top as usize..(top + height) as usize].fill(level);
    }

    let total: u32 = rows.iter().map(|&r| u32::from(r)).sum();
    (total / SCREEN_HEIGHT as u32) as u8
}

impl World {
    pub(crate) fn update_camera(&mut self) {
        self.scroll_offset_y = smooth_scroll(self.scroll_offset_y, self.character.pixel_y());
    }

    pub(crate) fn update_background(&mut self) {
        self.background_level =
            background_level(&self.platforms, self.cursor, self.scroll_offset_y);
        debug_assert!(self.background_level <= 64);
    }

    /// Indices of platforms that may be on screen
    pub fn visible_platforms(&self) -> Range<usize> {
        let end = (self.cursor + VISIBLE_PLATFORM_LIMIT).min(self.platforms.len());
        let mut start = end;
        while start > 0 {
            start -= 1;
            if self.platforms[start].y + PLATFORM_SPRITE_OFFSET_Y + self.scroll_offset_y
                >= SCREEN_HEIGHT
            {
                break;
            }
        }
        start..end
    }

    /// Read-only view of the current frame
    pub fn snapshot(&self) -> WorldSnapshot {
        let springs = self
            .springs
            .iter()
            .filter(|s| {
                let top = s.y + SPRING_SPRITE_OFFSET_Y + self.scroll_offset_y;
                (-SPRING_SPRITE_HEIGHT..SCREEN_HEIGHT).contains(&top)
            })
            .copied()
            .collect();

        WorldSnapshot {
            character: CharacterPose::from(&self.character),
            platforms: self.platforms[self.visible_platforms()].to_vec(),
            springs,
            meteors: self.live_meteors().to_vec(),
            scroll_offset_y: self.scroll_offset_y,
            background_level: self.background_level,
            height: height_readout(&self.character),
        }
    }
}
