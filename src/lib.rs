//! Rock Dodge - a falling-rocks dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, scoring)
//! - `renderer`: Canvas2D rendering surface (wasm only)
//! - `settings`: Display preferences
//! - `highscores`: Local leaderboard

pub mod highscores;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Width of the region rocks and the player live in
    pub const PLAY_AREA_WIDTH: f32 = 470.0;
    /// Height of the play area (rocks past this are gone)
    pub const PLAY_AREA_HEIGHT: f32 = 500.0;
    /// Full canvas width; the strip right of the play area is the metrics panel
    pub const CANVAS_WIDTH: f32 = 640.0;

    /// Player square edge length
    pub const PLAYER_SIZE: f32 = 35.0;
    /// Horizontal distance moved per input event
    pub const PLAYER_STEP: f32 = 15.0;

    /// Rock square edge length range
    pub const ROCK_MIN_SIZE: f32 = 10.0;
    pub const ROCK_MAX_SIZE: f32 = 35.0;
    /// Rock color channels are drawn from [0, this)
    pub const ROCK_COLOR_MAX: u8 = 200;

    /// Fall speed starts at the minimum and steps up on level-up
    pub const MIN_FALL_SPEED: f32 = 1.0;
    pub const MAX_FALL_SPEED: f32 = 4.0;
    pub const FALL_SPEED_STEP: f32 = 0.5;

    /// Spawn interval starts at the maximum and steps down on level-up
    pub const MAX_SPAWN_INTERVAL: u32 = 40;
    pub const MIN_SPAWN_INTERVAL: u32 = 4;
    pub const SPAWN_INTERVAL_STEP: u32 = 9;

    /// Level N is cleared once score exceeds LEVEL_UP_POINTS * N^2
    pub const LEVEL_UP_POINTS: u32 = 30;
}
