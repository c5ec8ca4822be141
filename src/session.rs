//! Title, play and game over loop around one [`World`]

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{Beat, Phase, TickInput, World, WorldSnapshot};
use crate::stats::{Leaderboard, SessionStats};

/// Where the player is in the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// World runs without input behind the title
    #[default]
    Title,
    Playing,
    /// World is frozen showing the final stats
    GameOver,
}

/// Device input for one frame, already resolved to an angle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Facing angle in degrees
    pub angle: i32,
    /// Jump button currently held
    pub jump_held: bool,
    /// Start button pressed this frame
    pub start_pressed: bool,
}

/// One player's run of games
pub struct Session {
    world: World,
    rng: Pcg32,
    state: SessionState,
    settings: Settings,
    stats: Option<SessionStats>,
    leaderboard: Leaderboard,
}

impl Session {
    pub fn new(settings: Settings, seed: u64) -> Self {
        log::info!("Session created with seed {seed}");
        Self {
            world: World::new(),
            rng: Pcg32::seed_from_u64(seed),
            state: SessionState::Title,
            settings,
            stats: None,
            leaderboard: Leaderboard::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings changed here take effect on the next frame
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Stats of the game that just ended, while on the game over screen
    pub fn stats(&self) -> Option<&SessionStats> {
        self.stats.as_ref()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.snapshot()
    }

    /// Run one frame
    ///
    /// `beat` is the music clock's reading; it is only consulted while playing.
    pub fn update(&mut self, beat: Beat, input: &FrameInput) -> SessionState {
        self.world.meteors_disabled = !self.settings.meteors_enabled;

        match self.state {
            SessionState::Title => {
                // Keeps the view populated; nothing else changes without input
                self.world.step(&mut self.rng);
                if input.start_pressed {
                    log::info!("Game started");
                    self.state = SessionState::Playing;
                }
            }
            SessionState::Playing => {
                self.world.observe_beat(beat);
                self.world.step(&mut self.rng);
                self.world.apply_input(&TickInput {
                    angle: input.angle,
                    jump: self.settings.control_mode.jump(input.jump_held),
                });

                if beat.phase == Phase::Terminal {
                    self.finish();
                }
            }
            SessionState::GameOver => {
                if input.start_pressed {
                    self.world.reset();
                    self.stats = None;
                    self.state = SessionState::Title;
                    log::info!("Back to title");
                }
            }
        }
        self.state
    }

    fn finish(&mut self) {
        let stats = SessionStats::from_character(&self.world.character);
        log::info!(
            "Game over: final height {}, peak height {}, longest fall {}",
            stats.final_height,
            stats.peak_height,
            stats.longest_fall
        );
        log::debug!(
            "platforms {}, cursor {}, ceiling {}, meteors {}..{}, springs {}",
            self.world.platforms().len(),
            self.world.cursor(),
            self.world.ceiling(),
            self.world.meteor_start(),
            self.world.meteors_spawned(),
            self.world.springs().len()
        );
        if let Some(rank) = self.leaderboard.record(stats) {
            log::info!("New leaderboard entry at rank {rank}");
        }
        self.stats = Some(stats);
        self.state = SessionState::GameOver;
    }
}
