//! World state and core simulation types
//!
//! Everything one play session needs lives in [`World`]. The caller owns it
//! and the random source; nothing here is global.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::bounded::Bounded;
use super::character::Character;
use crate::consts::SCREEN_WIDTH;

/// Maximum number of platforms in one session
///
/// A full song allows at most ~580 jumps at 8 frames each, doubled for
/// diversions. Springs let the player skip platforms, so the bound is padded
/// generously.
pub const MAX_PLATFORMS: usize = 8192;
/// Maximum number of meteors, one per beat of the song
pub const MAX_METEORS: usize = 138;
/// Maximum number of springs
pub const MAX_SPRINGS: usize = MAX_METEORS;

/// Inset from each platform edge where a jump may start
pub const PLATFORM_MARGIN: i32 = 16;
/// Number of tiles in each style band
pub const TILES_PER_BAND: u8 = 6;
/// Total number of platform tiles
pub const TILE_COUNT: u8 = 24;

/// A platform the character can stand on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Top left corner of the collision rectangle, in pixels
    pub x: i32,
    /// Never positive: 0 is the ground floor and higher platforms are more negative
    pub y: i32,
    /// Tile index [0, 24), selecting width and look. `None` is the ground floor.
    pub tile: Option<u8>,
    /// Horizontal drift in pixels per frame
    pub vx: i32,
    /// Spring riding on this platform
    pub spring: Option<usize>,
}

impl Platform {
    /// The full-width ground floor
    pub fn floor() -> Self {
        Self {
            x: 0,
            y: 0,
            tile: None,
            vx: 0,
            spring: None,
        }
    }

    pub fn new(x: i32, y: i32, tile: u8, vx: i32) -> Self {
        debug_assert!(tile < TILE_COUNT);
        Self {
            x: x.rem_euclid(SCREEN_WIDTH),
            y,
            tile: Some(tile),
            vx,
            spring: None,
        }
    }

    #[inline]
    pub fn is_floor(&self) -> bool {
        self.tile.is_none()
    }

    /// Collision width in pixels
    pub fn width(&self) -> i32 {
        tile_width(self.tile)
    }

    /// Style band of the tile (0 space, 1 clouds, 2 rocks, 3 trees)
    pub fn band(&self) -> Option<u8> {
        self.tile.map(|t| t / TILES_PER_BAND)
    }

    /// Inclusive collision span `[x0, x1]`, wrapping across the seam
    pub fn span(&self) -> (i32, i32) {
        (self.x, (self.x + self.width()) % SCREEN_WIDTH)
    }

    /// Half-open range `[x0, x1)` where a jump may start, not wrapped
    pub fn jump_span(&self) -> (i32, i32) {
        let x0 = self.x + PLATFORM_MARGIN;
        (x0, x0 + self.width() - 2 * PLATFORM_MARGIN)
    }
}

/// Collision width for a tile index (`None` is the floor)
pub fn tile_width(tile: Option<u8>) -> i32 {
    match tile {
        None => SCREEN_WIDTH,
        Some(t) => match t % TILES_PER_BAND {
            0 | 1 => 128,
            2 | 3 => 96,
            _ => 64,
        },
    }
}

/// A spring that slows a falling character and then launches it upward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spring {
    /// Center of the bottom edge
    pub x: i32,
    pub y: i32,
    /// Compression state [0, 2], 0 is relaxed
    pub compression: u8,
}

/// A falling meteor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meteor {
    /// Center, in pixels
    pub pos: IVec2,
    /// Pixels per frame, `vel.y` is always positive
    pub vel: IVec2,
    /// Rotation frame [0, 18)
    pub frame: u8,
    /// Already hit the character; a meteor only hits once
    pub hit: bool,
}

/// Style of newly generated platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum PlatformStyle {
    #[default]
    Trees,
    Rocks,
    Clouds,
    Space,
}

impl PlatformStyle {
    /// First tile of this style's band
    pub fn base_tile(self) -> u8 {
        match self {
            PlatformStyle::Trees => 18,
            PlatformStyle::Rocks => 12,
            PlatformStyle::Clouds => 6,
            PlatformStyle::Space => 0,
        }
    }

    /// Tallest visible extent below a platform's collision edge
    ///
    /// Platforms are generated until the topmost one sits this far above
    /// the top of the view.
    pub fn lookahead_height(self) -> i32 {
        match self {
            PlatformStyle::Trees => 184,
            PlatformStyle::Rocks => 181,
            PlatformStyle::Clouds => 42,
            PlatformStyle::Space => 31,
        }
    }
}

/// Coarse stage of the song
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Trees,
    Rocks,
    Clouds,
    Space,
    /// Song is over
    Terminal,
}

impl Phase {
    /// Decode a phase number; anything past the known range is terminal
    pub fn from_index(index: u16) -> Self {
        match index {
            0 => Phase::Trees,
            1 => Phase::Rocks,
            2 => Phase::Clouds,
            3 => Phase::Space,
            _ => Phase::Terminal,
        }
    }

    /// Platform style for this phase, `None` once the song is over
    pub fn style(self) -> Option<PlatformStyle> {
        match self {
            Phase::Trees => Some(PlatformStyle::Trees),
            Phase::Rocks => Some(PlatformStyle::Rocks),
            Phase::Clouds => Some(PlatformStyle::Clouds),
            Phase::Space => Some(PlatformStyle::Space),
            Phase::Terminal => None,
        }
    }
}

/// Song position reported by the music clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beat {
    pub phase: Phase,
    /// Number of meteor beats so far; never decreases
    pub index: u16,
}

impl Default for Beat {
    fn default() -> Self {
        Self {
            phase: Phase::Trees,
            index: 0,
        }
    }
}

impl Beat {
    /// Decode the clock's packed form: beat index in the low 16 bits, phase above
    pub fn from_packed(packed: u32) -> Self {
        Self {
            phase: Phase::from_index((packed >> 16) as u16),
            index: (packed & 0xffff) as u16,
        }
    }
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Player-controlled character
    pub character: Character,
    /// Platforms sorted by elevation, floor first
    pub(crate) platforms: Bounded<Platform>,
    /// Highest platform at or below the character
    pub(crate) cursor: usize,
    /// Style of newly generated platforms
    pub style: PlatformStyle,
    /// Beat index at last observation, one meteor per beat
    pub beat: u16,
    pub(crate) springs: Bounded<Spring>,
    /// Every meteor ever spawned; the live window is `meteor_start..`
    pub(crate) meteors: Bounded<Meteor>,
    pub(crate) meteor_start: usize,
    /// Park live meteors off screen and keep new ones harmless
    pub meteors_disabled: bool,
    /// Added to world y to get screen y
    pub(crate) scroll_offset_y: i32,
    /// Background shade [0, 64]
    pub(crate) background_level: u8,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Fresh world with only the ground floor
    pub fn new() -> Self {
        let mut world = Self {
            character: Character::new(),
            platforms: Bounded::new("platform", MAX_PLATFORMS),
            cursor: 0,
            style: PlatformStyle::Trees,
            beat: 0,
            springs: Bounded::new("spring", MAX_SPRINGS),
            meteors: Bounded::new("meteor", MAX_METEORS),
            meteor_start: 0,
            meteors_disabled: false,
            scroll_offset_y: 0,
            background_level: 0,
        };
        world.platforms.push(Platform::floor());
        world
    }

    /// Back to the session start state; the meteor toggle is kept
    pub fn reset(&mut self) {
        self.character.reset();
        self.platforms.clear();
        self.platforms.push(Platform::floor());
        self.cursor = 0;
        self.style = PlatformStyle::Trees;
        self.beat = 0;
        self.springs.clear();
        self.meteors.clear();
        self.meteor_start = 0;
        self.scroll_offset_y = 0;
        self.background_level = 0;
    }

    /// All platforms, lowest first
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// Meteors still in flight
    pub fn live_meteors(&self) -> &[Meteor] {
        &self.meteors[self.meteor_start..]
    }

    /// Total meteors spawned so far (end of the live window)
    pub fn meteors_spawned(&self) -> usize {
        self.meteors.len()
    }

    /// Start of the live meteor window
    pub fn meteor_start(&self) -> usize {
        self.meteor_start
    }

    /// Index of the highest platform at or below the character
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll_offset_y(&self) -> i32 {
        self.scroll_offset_y
    }

    pub fn background_level(&self) -> u8 {
        self.background_level
    }

    /// Y of the topmost platform
    pub fn ceiling(&self) -> i32 {
        let top = self.platforms.last().map_or(0, |p| p.y);
        debug_assert!(top <= 0);
        top
    }

    /// Elevation never decreases with index
    pub fn platforms_sorted(&self) -> bool {
        self.platforms.windows(2).all(|w| w[0].y >= w[1].y)
    }
}
