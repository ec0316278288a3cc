//! Per-frame simulation tick
//!
//! Core game loop that advances one session deterministically. The host
//! scheduler (an animation-frame callback, a timer, or a test) calls `tick`
//! once per frame, draws the state, and re-requests a frame only while the
//! session is running.

use super::collision::rects_overlap;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Advance the session by one animation tick. No-op unless Running.
///
/// Per-tick side effects, in order: spawn (when the tick counter reaches the
/// spawn interval, followed by scoring/cleanup and a counter reset), rock
/// movement, collision check, counter increment.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }

    if state.ticks == state.spawn_interval {
        state.spawn_rock();
        update_score_and_level(state);
        state.ticks = 0;
    }

    for rock in &mut state.rocks {
        rock.pos.y += state.fall_speed;
    }

    collision_check(state);

    state.ticks += 1;
}

/// Drop rocks whose top edge passed the bottom boundary, credit one point per
/// dropped rock, then evaluate the level threshold.
///
/// The threshold compares against the level value before any increment, so a
/// single evaluation can raise the level at most once.
fn update_score_and_level(state: &mut GameState) {
    let before = state.rocks.len();
    state.rocks.retain(|rock| rock.pos.y <= PLAY_AREA_HEIGHT);
    state.score += (before - state.rocks.len()) as u32;

    if state.score > LEVEL_UP_POINTS * state.level * state.level {
        level_up(state);
    }
}

/// Raise the level and tighten the difficulty knobs toward their bounds
fn level_up(state: &mut GameState) {
    state.level += 1;
    state.fall_speed = (state.fall_speed + FALL_SPEED_STEP).min(MAX_FALL_SPEED);
    state.spawn_interval = state
        .spawn_interval
        .saturating_sub(SPAWN_INTERVAL_STEP)
        .max(MIN_SPAWN_INTERVAL);
    log::info!(
        "Level {}: fall speed {}, spawn interval {}",
        state.level,
        state.fall_speed,
        state.spawn_interval
    );
}

/// Any rock overlapping the player ends the session
fn collision_check(state: &mut GameState) {
    let player = state.player.bounds();
    if state
        .rocks
        .iter()
        .any(|rock| rects_overlap(&rock.bounds(), &player))
    {
        end_session(state);
    }
}

/// Terminal transition: only `GameState::reset` leaves GameOver
fn end_session(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over: score {} at level {}",
        state.score,
        state.level
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Direction, Rgb, Rock};
    use glam::Vec2;
    use proptest::prelude::*;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.reset(seed);
        state
    }

    fn rock_at(x: f32, y: f32, size: f32) -> Rock {
        Rock {
            pos: Vec2::new(x, y),
            size,
            color: Rgb::BLACK,
        }
    }

    #[test]
    fn test_fresh_session_defaults() {
        let state = running_state(1);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.fall_speed, MIN_FALL_SPEED);
        assert_eq!(state.spawn_interval, MAX_SPAWN_INTERVAL);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.rocks.is_empty());
    }

    #[test]
    fn test_first_tick_spawns_nothing() {
        let mut state = running_state(1);
        tick(&mut state);
        assert!(state.rocks.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_spawn_after_full_interval() {
        let mut state = running_state(1);
        for _ in 0..MAX_SPAWN_INTERVAL {
            tick(&mut state);
        }
        assert!(state.rocks.is_empty());

        // Tick counter has reached the interval; this tick spawns
        tick(&mut state);
        assert_eq!(state.rocks.len(), 1);
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_rocks_fall_by_current_speed() {
        let mut state = running_state(1);
        state.rocks.push(rock_at(10.0, 50.0, 20.0));
        tick(&mut state);
        assert_eq!(state.rocks[0].pos.y, 50.0 + MIN_FALL_SPEED);
    }

    #[test]
    fn test_cleanup_scores_fallen_rocks() {
        let mut state = running_state(1);
        state.rocks.push(rock_at(10.0, PLAY_AREA_HEIGHT + 1.0, 20.0));
        state.rocks.push(rock_at(60.0, PLAY_AREA_HEIGHT + 9.0, 15.0));
        state.rocks.push(rock_at(120.0, 40.0, 20.0));
        state.ticks = state.spawn_interval;

        tick(&mut state);

        assert_eq!(state.score, 2);
        // The surviving rock plus the one spawned this tick
        assert_eq!(state.rocks.len(), 2);
    }

    #[test]
    fn test_rock_exactly_on_boundary_survives() {
        let mut state = running_state(1);
        state.rocks.push(rock_at(10.0, PLAY_AREA_HEIGHT, 20.0));
        state.ticks = state.spawn_interval;
        tick(&mut state);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_level_up_past_threshold() {
        let mut state = running_state(1);
        state.score = 30;
        state.rocks.push(rock_at(10.0, PLAY_AREA_HEIGHT + 1.0, 20.0));
        state.ticks = state.spawn_interval;

        tick(&mut state);

        assert_eq!(state.score, 31);
        assert_eq!(state.level, 2);
        assert_eq!(state.fall_speed, MIN_FALL_SPEED + FALL_SPEED_STEP);
        assert_eq!(
            state.spawn_interval,
            MAX_SPAWN_INTERVAL - SPAWN_INTERVAL_STEP
        );
    }

    #[test]
    fn test_no_level_up_at_exact_threshold() {
        let mut state = running_state(1);
        state.score = 30;
        state.ticks = state.spawn_interval;

        // Spawn tick with nothing to clean up: score stays at 30, which does
        // not exceed 30 * 1^2
        tick(&mut state);

        assert_eq!(state.score, 30);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_difficulty_knobs_stay_bounded() {
        let mut state = running_state(1);
        state.score = 1_000_000;

        let mut last_level = state.level;
        for _ in 0..200 {
            state.ticks = state.spawn_interval;
            tick(&mut state);
            // Keep the arena clear so a collision can't end the run early
            state.rocks.clear();

            assert!(state.level >= last_level);
            assert!(state.fall_speed <= MAX_FALL_SPEED);
            assert!(state.spawn_interval >= MIN_SPAWN_INTERVAL);
            last_level = state.level;
        }

        assert_eq!(state.fall_speed, MAX_FALL_SPEED);
        assert_eq!(state.spawn_interval, MIN_SPAWN_INTERVAL);
    }

    #[test]
    fn test_collision_ends_session() {
        let mut state = running_state(1);
        let p = state.player.pos;
        state.rocks.push(rock_at(p.x + 5.0, p.y - 5.0, 20.0));

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_grazing_rock_is_a_near_miss() {
        let mut state = running_state(1);
        let p = state.player.pos;
        // Falls flush along the player's right edge
        state.rocks.push(rock_at(p.x + PLAYER_SIZE, p.y, 20.0));
        state.fall_speed = 0.0;

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_game_over_freezes_the_session() {
        let mut state = running_state(1);
        state.phase = GamePhase::GameOver;
        state.rocks.push(rock_at(10.0, 50.0, 20.0));

        tick(&mut state);

        assert_eq!(state.ticks, 0);
        assert_eq!(state.rocks[0].pos.y, 50.0);
    }

    #[test]
    fn test_pause_stops_ticking_until_resume() {
        let mut state = running_state(1);
        tick(&mut state);
        assert_eq!(state.ticks, 1);

        assert!(!state.toggle_pause());
        tick(&mut state);
        tick(&mut state);
        assert_eq!(state.ticks, 1);

        assert!(state.toggle_pause());
        tick(&mut state);
        assert_eq!(state.ticks, 2);
    }

    #[test]
    fn test_determinism() {
        let mut a = running_state(99999);
        let mut b = running_state(99999);

        for i in 0..500u32 {
            if i % 7 == 0 {
                a.handle_input(Direction::Left);
                b.handle_input(Direction::Left);
            }
            if i % 11 == 0 {
                a.handle_input(Direction::Right);
                b.handle_input(Direction::Right);
            }
            tick(&mut a);
            tick(&mut b);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.rocks.len(), b.rocks.len());
        for (ra, rb) in a.rocks.iter().zip(&b.rocks) {
            assert_eq!(ra.pos, rb.pos);
            assert_eq!(ra.size, rb.size);
            assert_eq!(ra.color, rb.color);
        }
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            seed in any::<u64>(),
            moves in proptest::collection::vec(any::<bool>(), 0..500),
        ) {
            let mut state = running_state(seed);
            for &right in &moves {
                state.handle_input(if right { Direction::Right } else { Direction::Left });
                tick(&mut state);
                prop_assert!(state.player.pos.x >= 0.0);
                prop_assert!(state.player.pos.x <= PLAY_AREA_WIDTH - PLAYER_SIZE);
            }
        }

        #[test]
        fn prop_spawned_rocks_fit_horizontally(seed in any::<u64>()) {
            let mut state = running_state(seed);
            for _ in 0..500 {
                tick(&mut state);
                for rock in &state.rocks {
                    prop_assert!(rock.pos.x >= 0.0);
                    prop_assert!(rock.pos.x + rock.size <= PLAY_AREA_WIDTH);
                    prop_assert!(rock.size >= ROCK_MIN_SIZE && rock.size < ROCK_MAX_SIZE);
                }
            }
        }

        #[test]
        fn prop_difficulty_is_monotonic(
            seed in any::<u64>(),
            head_start in 0u32..100_000,
        ) {
            let mut state = running_state(seed);
            state.score = head_start;

            let mut last_level = state.level;
            let mut last_score = state.score;
            for _ in 0..2_000 {
                tick(&mut state);
                if state.phase == GamePhase::GameOver {
                    break;
                }
                prop_assert!(state.level >= last_level);
                prop_assert!(state.score >= last_score);
                prop_assert!(state.fall_speed <= MAX_FALL_SPEED);
                prop_assert!(state.spawn_interval >= MIN_SPAWN_INTERVAL);
                last_level = state.level;
                last_score = state.score;
            }
        }
    }
}
