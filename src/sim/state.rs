//! Game state and core simulation types
//!
//! One `GameState` owns everything a session mutates; every operation takes it
//! by reference so a host loop, a timer, or a test harness can drive it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No session yet; waiting for the start button
    NotStarted,
    /// Active gameplay
    Running,
    /// Session frozen, resumable
    Paused,
    /// Session ended by collision; only a reset leaves this phase
    GameOver,
}

/// Discrete horizontal movement input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// 8-bit RGB color for rock rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Random color with every channel below `max`
    pub fn random(rng: &mut impl Rng, max: u8) -> Self {
        Self {
            r: rng.random_range(0..max),
            g: rng.random_range(0..max),
            b: rng.random_range(0..max),
        }
    }

    /// CSS `rgb(r,g,b)` string for canvas fill styles
    pub fn to_css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// The player-controlled character (a fixed-size square)
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vec2,
}

impl Player {
    /// Starting position: bottom of the play area, horizontally centered
    pub fn at_start() -> Self {
        Self {
            pos: Vec2::new(
                (PLAY_AREA_WIDTH - PLAYER_SIZE) / 2.0,
                PLAY_AREA_HEIGHT - PLAYER_SIZE,
            ),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, PLAYER_SIZE)
    }
}

/// A falling rock (an axis-aligned square)
#[derive(Debug, Clone, Copy)]
pub struct Rock {
    pub pos: Vec2,
    pub size: f32,
    pub color: Rgb,
}

impl Rock {
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// Complete session state (deterministic for a given seed + input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Session RNG (rock sizes, positions, colors)
    rng: Pcg32,
    pub score: u32,
    pub level: u32,
    /// Pixels of vertical displacement per tick
    pub fall_speed: f32,
    /// Ticks between rock spawns
    pub spawn_interval: u32,
    /// Ticks since the last spawn
    pub ticks: u32,
    pub phase: GamePhase,
    pub player: Player,
    pub rocks: Vec<Rock>,
}

impl GameState {
    /// Create a pristine state waiting for the first start
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            level: 1,
            fall_speed: MIN_FALL_SPEED,
            spawn_interval: MAX_SPAWN_INTERVAL,
            ticks: 0,
            phase: GamePhase::NotStarted,
            player: Player::at_start(),
            rocks: Vec::new(),
        }
    }

    /// Begin a fresh session: all counters back to defaults, player at the
    /// start position, phase Running
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(seed);
        self.phase = GamePhase::Running;
        log::info!("Session started (seed {})", seed);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Move the player one step, clamped to the play area. Total over all
    /// phases; out-of-range movement is clamped, never rejected.
    pub fn handle_input(&mut self, dir: Direction) {
        let dx = match dir {
            Direction::Left => -PLAYER_STEP,
            Direction::Right => PLAYER_STEP,
        };
        self.player.pos.x = (self.player.pos.x + dx).clamp(0.0, PLAY_AREA_WIDTH - PLAYER_SIZE);
    }

    /// Flip between Running and Paused. Ignored before the first start and
    /// after game over. Returns whether the session is running afterwards so
    /// the host knows to re-request a frame.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => self.phase = GamePhase::Paused,
            GamePhase::Paused => self.phase = GamePhase::Running,
            GamePhase::NotStarted | GamePhase::GameOver => {}
        }
        self.is_running()
    }

    /// Spawn one rock just above the play area at a random x, clamped so the
    /// whole rock fits horizontally
    pub fn spawn_rock(&mut self) {
        let size = self.rng.random_range(ROCK_MIN_SIZE..ROCK_MAX_SIZE);
        let x = self.rng.random_range(0.0..PLAY_AREA_WIDTH - size);
        let color = Rgb::random(&mut self.rng, ROCK_COLOR_MAX);
        self.rocks.push(Rock {
            pos: Vec2::new(x, -size),
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_starts_inside_play_area() {
        let player = Player::at_start();
        assert!(player.pos.x >= 0.0);
        assert!(player.pos.x <= PLAY_AREA_WIDTH - PLAYER_SIZE);
        assert_eq!(player.pos.y, PLAY_AREA_HEIGHT - PLAYER_SIZE);
    }

    #[test]
    fn test_handle_input_clamps_left_edge() {
        let mut state = GameState::new(1);
        state.reset(1);
        for _ in 0..200 {
            state.handle_input(Direction::Left);
        }
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_handle_input_clamps_right_edge() {
        let mut state = GameState::new(1);
        state.reset(1);
        for _ in 0..200 {
            state.handle_input(Direction::Right);
        }
        assert_eq!(state.player.pos.x, PLAY_AREA_WIDTH - PLAYER_SIZE);
    }

    #[test]
    fn test_toggle_pause_dead_after_game_over() {
        let mut state = GameState::new(1);
        state.reset(1);
        state.phase = GamePhase::GameOver;
        assert!(!state.toggle_pause());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_spawn_rock_fits_play_area() {
        let mut state = GameState::new(7);
        state.reset(7);
        for _ in 0..100 {
            state.spawn_rock();
        }
        for rock in &state.rocks {
            assert!(rock.size >= ROCK_MIN_SIZE && rock.size < ROCK_MAX_SIZE);
            assert!(rock.pos.x >= 0.0);
            assert!(rock.pos.x + rock.size <= PLAY_AREA_WIDTH);
            assert_eq!(rock.pos.y, -rock.size);
            assert!(rock.color.r < ROCK_COLOR_MAX);
        }
    }

    #[test]
    fn test_rgb_css_format() {
        let c = Rgb { r: 12, g: 0, b: 199 };
        assert_eq!(c.to_css(), "rgb(12,0,199)");
    }
}
