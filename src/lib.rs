//! Verse Cricket - an arcade cricket batting mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball flight, hit timing, session state)
//! - `game`: Facade tying the simulation to the leaderboard and profile
//! - `leaderboard`: Best score per player, persisted across sessions
//! - `persistence`: Key-value storage (LocalStorage on web, memory elsewhere)
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod leaderboard;
pub mod persistence;
pub mod profile;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, Snapshot};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use persistence::{KeyValueStore, MemoryStore, StorageError};
pub use profile::{PlayerProfile, ProfileError};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Ball spawn point in normalized field coordinates
    pub const BALL_SPAWN_X: f32 = 0.5;
    pub const BALL_SPAWN_Y: f32 = 0.35;
    /// Vertical travel from spawn to the batter
    pub const BALL_DROP: f32 = 0.47;
    /// Exponent of the decelerating approach arc
    pub const BALL_ARC_EXPONENT: f32 = 0.8;

    /// Lateral targets for each swing direction
    pub const SWING_TARGET_LEFT: f32 = 0.46;
    pub const SWING_TARGET_RIGHT: f32 = 0.54;
    pub const SWING_MAGNITUDE: f32 = 0.04;

    /// Depth per tick before jitter and difficulty
    pub const BALL_BASE_SPEED: f32 = 0.008;
    pub const BALL_SPEED_JITTER: f32 = 0.002;
    /// Difficulty ramps every N deliveries
    pub const DIFFICULTY_STEP: u32 = 5;
    pub const DIFFICULTY_INCREMENT: f32 = 0.15;

    /// Timing window (inclusive depth range)
    pub const HIT_WINDOW_START: f32 = 0.75;
    pub const HIT_WINDOW_END: f32 = 0.98;

    /// Depth a struck ball loses per tick
    pub const STRUCK_RECEDE_RATE: f32 = 0.01;

    /// Timer delays (ms)
    pub const NEXT_BALL_DELAY_MS: f64 = 1000.0;
    pub const GAME_OVER_DELAY_MS: f64 = 1000.0;

    pub const RUN_VALUES: [u32; 5] = [1, 2, 3, 4, 6];
    pub const MAX_OUTS: u32 = 3;
    pub const HISTORY_LEN: usize = 10;

    /// Bat swing animation
    pub const BAT_SWING_STEP: f32 = 0.4;
    pub const BAT_SWING_END: f32 = std::f32::consts::PI * 0.8;

    /// Floating reward text
    pub const FLOATING_TEXT_START_Y: f32 = 0.7;
    pub const FLOATING_TEXT_RISE: f32 = 0.005;
    pub const FLOATING_TEXT_FADE: f32 = 0.02;

    /// Banner color for a wicket
    pub const OUT_COLOR: &str = "#ef4444";

    /// Name used for scores saved without a profile
    pub const DEFAULT_PLAYER_NAME: &str = "Player";
}

/// Banner color for a run value
pub fn run_color(runs: u32) -> &'static str {
    match runs {
        1 => "#ffffff",
        2 => "#3b82f6",
        3 => "#a855f7",
        4 => "#22c55e",
        6 => "#eab308",
        _ => "#9ca3af",
    }
}
