//! Fixed timestep simulation tick
//!
//! Advances the game by exactly one tick and returns the events the tick
//! produced. The frame driver feeds wall-clock time through an accumulator
//! and calls this once per 60 Hz step, so a backgrounded tab can never
//! produce a single oversized physics jump.

use glam::Vec2;

use super::collision;
use super::difficulty::Difficulty;
use super::state::{Cloud, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick. One-shot flags: the driver latches
/// UI events and clears them after the tick that consumed them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Primary activation - tap/click/space. Starts a session from the
    /// title or game-over screen, flaps while playing.
    pub activate: bool,
    /// Secondary navigation - back to the title screen from game over
    pub menu: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    // Clouds drift in every phase, wrapping once fully off-screen
    for i in 0..state.clouds.len() {
        state.clouds[i].pos.x -= state.clouds[i].speed;
        if state.clouds[i].pos.x < Cloud::WRAP_X {
            let y = 50.0 + state.random() * 150.0;
            state.clouds[i].pos = Vec2::new(PLAYFIELD_WIDTH + 50.0, y);
        }
    }

    match state.phase {
        GamePhase::Start => {
            // Non-physical floating idle animation
            state.bird.pos.y = BIRD_START_Y + (state.time_ticks as f32 * 0.05).sin() * 15.0;
            state.bird.rotation = 0.0;

            if input.activate {
                state.start_session();
            }
        }

        GamePhase::Playing => {
            // 1. Integrate physics: gravity, position, derived rotation
            state.bird.integrate(state.difficulty.gravity);

            // Flap overwrites velocity unconditionally - repeated
            // activations never accumulate
            if input.activate {
                state.bird.velocity = state.difficulty.jump_impulse;
                events.push(GameEvent::Flapped);
            }

            // 2. Spawn decision
            state.ticks_since_spawn += 1;
            if state.ticks_since_spawn >= state.difficulty.spawn_interval_ticks {
                state.spawn_pipe();
            }

            // 3. Advance pipes, score passes, retire off-screen pipes
            let speed = state.difficulty.pipe_speed;
            let bird_x = state.bird.pos.x;
            for pipe in &mut state.pipes {
                pipe.x -= speed;
                if !pipe.passed && pipe.right_edge() < bird_x {
                    pipe.passed = true;
                    state.score += 1;
                    events.push(GameEvent::Scored);
                }
            }
            // Only removal path; pipes stay in spawn order
            state.pipes.retain(|p| p.x > -p.width);

            // 4. Recompute difficulty from the new score so the next
            // spawn and every existing pipe pick up the new pace
            state.difficulty = Difficulty::for_score(state.score);

            state.ground_offset = (state.ground_offset + speed) % GROUND_PATTERN;

            // 5. Collision test on the just-updated positions
            if collision::check_collision(&state.bird, &state.pipes) {
                events.push(GameEvent::Collided);
                state.phase = GamePhase::GameOver;
                if state.score > state.high_score {
                    state.high_score = state.score;
                    state.new_high_score = true;
                    events.push(GameEvent::NewHighScore);
                }
            }
        }

        GamePhase::GameOver => {
            // Simulation frozen; only transitions are legal here
            if input.menu {
                state.to_menu();
            } else if input.activate {
                state.start_session();
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::{BASE_PIPE_SPEED, JUMP_IMPULSE, SPAWN_INTERVAL_TICKS};
    use crate::sim::state::Pipe;
    use proptest::prelude::*;

    const ACTIVATE: TickInput = TickInput {
        activate: true,
        menu: false,
    };
    const MENU: TickInput = TickInput {
        activate: false,
        menu: true,
    };

    /// A state already in Playing with the bird at its initial pose
    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, 0);
        tick(&mut state, &ACTIVATE);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    #[test]
    fn test_gravity_closed_form() {
        let mut state = playing_state(1);
        // 10 ticks, no flap: v = 10 * 0.35, y = 300 + 0.35 * (1+2+...+10)
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert!((state.bird.velocity - 3.5).abs() < 1e-4);
        assert!((state.bird.pos.y - 319.25).abs() < 1e-3);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_velocity_monotonic_without_flap() {
        let mut state = playing_state(2);
        let mut prev = state.bird.velocity;
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
            let delta = state.bird.velocity - prev;
            assert!((delta - state.difficulty.gravity).abs() < 1e-5);
            prev = state.bird.velocity;
        }
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let mut state = playing_state(3);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.bird.velocity > 0.0);

        tick(&mut state, &ACTIVATE);
        assert_eq!(state.bird.velocity, JUMP_IMPULSE);

        // A second flap does not accumulate
        tick(&mut state, &ACTIVATE);
        assert_eq!(state.bird.velocity, JUMP_IMPULSE);
    }

    #[test]
    fn test_rotation_derived_and_clamped() {
        let mut state = playing_state(4);

        // Shallow descent pitches the nose down proportionally
        state.bird.velocity = 4.0;
        tick(&mut state, &TickInput::default());
        assert!((state.bird.rotation - 4.35 * ROTATION_GAIN).abs() < 1e-5);

        // Steep descent clamps at the sharp nose-down limit
        state.bird.velocity = 50.0;
        state.bird.pos.y = 100.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bird.rotation, ROTATION_MAX);

        // Fast ascent clamps at the mild nose-up limit
        state.bird.velocity = -20.0;
        state.bird.pos.y = 300.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bird.rotation, ROTATION_MIN);
    }

    #[test]
    fn test_first_pipe_spawns_on_first_playing_tick() {
        let mut state = playing_state(5);
        assert!(state.pipes.is_empty());

        tick(&mut state, &TickInput::default());
        assert_eq!(state.pipes.len(), 1);

        let pipe = state.pipes[0];
        let gap = pipe.bottom_y - pipe.top_height;
        assert!((gap - 160.0).abs() < 1e-3);
        assert!(pipe.top_height >= MIN_TOP_HEIGHT);
        assert!(pipe.bottom_y <= PLAYFIELD_HEIGHT - GROUND_HEIGHT - SPAWN_MARGIN_BELOW);
    }

    #[test]
    fn test_pipe_spawn_cadence() {
        let mut state = playing_state(5);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.pipes.len(), 1);

        // The second pipe arrives a full interval after the first
        for _ in 0..SPAWN_INTERVAL_TICKS {
            assert_eq!(state.pipes.len(), 1);
            // Hover: flap whenever the bird drifts below its start height
            let input = if state.bird.pos.y >= BIRD_START_Y {
                ACTIVATE
            } else {
                TickInput::default()
            };
            tick(&mut state, &input);
        }
        assert_eq!(state.pipes.len(), 2);
    }

    #[test]
    fn test_pipe_scored_exactly_once() {
        let mut state = playing_state(6);
        // Right edge starts at 84, just ahead of the bird at x=80
        state.pipes.push(Pipe {
            x: 24.0,
            top_height: 100.0,
            bottom_y: 500.0,
            width: PIPE_WIDTH,
            passed: false,
        });

        // 84 -> 81.5: still not past the bird
        let events = tick(&mut state, &TickInput::default());
        assert!(!events.contains(&GameEvent::Scored));
        assert_eq!(state.score, 0);

        // 81.5 -> 79: crosses below the bird's x, scores once
        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::Scored));
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].passed);

        // Never double-scored
        let events = tick(&mut state, &TickInput::default());
        assert!(!events.contains(&GameEvent::Scored));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_speed_change_applies_to_existing_pipes() {
        let mut state = playing_state(14);
        // One pipe about to be passed, one far pipe that must pick up
        // the new pace the moment the score changes
        state.pipes.push(Pipe {
            x: 24.0,
            top_height: 100.0,
            bottom_y: 500.0,
            width: PIPE_WIDTH,
            passed: false,
        });
        state.pipes.push(Pipe {
            x: 300.0,
            top_height: 100.0,
            bottom_y: 500.0,
            width: PIPE_WIDTH,
            passed: false,
        });

        tick(&mut state, &TickInput::default());
        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::Scored));
        assert_eq!(state.score, 1);

        // Every active pipe advances by the post-score speed on the
        // next tick, not the base speed
        let new_speed = Difficulty::for_score(1).pipe_speed;
        assert!(new_speed > BASE_PIPE_SPEED);
        let before: Vec<f32> = state.pipes.iter().map(|p| p.x).collect();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.pipes.len(), before.len());
        for (pipe, x0) in state.pipes.iter().zip(&before) {
            assert!((x0 - pipe.x - new_speed).abs() < 1e-4);
        }
    }

    #[test]
    fn test_pipe_advance_and_retire() {
        let mut state = playing_state(7);
        // Marked passed so scoring never fires and speed stays at base.
        // top_height 77 is below the legal spawn minimum, so it uniquely
        // tags this pipe among any spawned during the run.
        state.pipes.push(Pipe {
            x: PLAYFIELD_WIDTH,
            top_height: 77.0,
            bottom_y: 500.0,
            width: PIPE_WIDTH,
            passed: true,
        });

        let run = |state: &mut GameState, n: u32| {
            for _ in 0..n {
                // Hold the bird mid-gap so nothing ends the run
                state.bird.pos.y = 300.0;
                state.bird.velocity = 0.0;
                tick(state, &TickInput::default());
                // Discard spawned pipes so only the tagged pipe ever
                // reaches the bird or the scoring line
                state.pipes.retain(|p| p.top_height == 77.0);
            }
        };

        run(&mut state, 136);
        assert!((state.pipes[0].x - 60.0).abs() < 1e-3);

        run(&mut state, 40);
        assert!((state.pipes[0].x - (-40.0)).abs() < 1e-3);

        // Dropped once fully past the left edge (x <= -width)
        run(&mut state, 8);
        assert!(state.pipes.iter().all(|p| p.top_height != 77.0));
    }

    #[test]
    fn test_collision_transitions_to_game_over() {
        let mut state = playing_state(8);
        // Free fall until the ground ends the run
        let mut collided = false;
        for _ in 0..2000 {
            let events = tick(&mut state, &TickInput::default());
            if events.contains(&GameEvent::Collided) {
                collided = true;
                break;
            }
        }
        assert!(collided);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Frozen: further ticks without input change nothing
        let y = state.bird.pos.y;
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.bird.pos.y, y);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_new_high_score_on_game_over() {
        let mut state = playing_state(9);
        state.score = 7;
        state.high_score = 3;
        state.bird.pos.y = PLAYFIELD_HEIGHT; // force a ground hit

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::Collided));
        assert!(events.contains(&GameEvent::NewHighScore));
        assert_eq!(state.high_score, 7);
        assert!(state.new_high_score);
    }

    #[test]
    fn test_no_high_score_event_when_not_beaten() {
        let mut state = playing_state(10);
        state.score = 2;
        state.high_score = 9;
        state.bird.pos.y = PLAYFIELD_HEIGHT;

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&GameEvent::Collided));
        assert!(!events.contains(&GameEvent::NewHighScore));
        assert_eq!(state.high_score, 9);
        assert!(!state.new_high_score);
    }

    #[test]
    fn test_restart_resets_session_but_keeps_high_score() {
        let mut state = playing_state(11);
        state.score = 5;
        state.high_score = 2;
        state.bird.pos.y = PLAYFIELD_HEIGHT;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 5);

        tick(&mut state, &ACTIVATE);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(!state.new_high_score);
        assert!(state.pipes.is_empty());
        assert_eq!(state.difficulty, Difficulty::base());
        assert_eq!(state.high_score, 5);
        assert_eq!(state.bird.pos, Vec2::new(BIRD_X, BIRD_START_Y));

        // The restarted session gets its first pipe right away too
        tick(&mut state, &TickInput::default());
        assert_eq!(state.pipes.len(), 1);
    }

    #[test]
    fn test_menu_returns_to_start() {
        let mut state = playing_state(12);
        state.bird.pos.y = PLAYFIELD_HEIGHT;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &MENU);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_start_screen_idle_is_non_physical() {
        let mut state = GameState::new(13, 0);
        for _ in 0..120 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.phase, GamePhase::Start);
            assert_eq!(state.bird.rotation, 0.0);
            assert!((state.bird.pos.y - BIRD_START_Y).abs() <= 15.0);
        }
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(42, 0);
        let mut b = GameState::new(42, 0);
        for i in 0..600u32 {
            let input = if i % 37 == 0 {
                ACTIVATE
            } else {
                TickInput::default()
            };
            let ea = tick(&mut a, &input);
            let eb = tick(&mut b, &input);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.pipes.len(), b.pipes.len());
        assert_eq!(a.bird.pos, b.bird.pos);
    }

    proptest! {
        /// Spawned gaps always match the current difficulty and the top
        /// height always lands inside the legal band.
        #[test]
        fn prop_spawn_respects_bounds(seed in 0u64..10_000, score in 0u32..200) {
            let mut state = GameState::new(seed, 0);
            state.start_session();
            state.score = score;
            state.difficulty = Difficulty::for_score(score);
            let gap = state.difficulty.pipe_gap;

            state.spawn_pipe();
            let pipe = state.pipes[0];

            prop_assert!((pipe.bottom_y - pipe.top_height - gap).abs() < 1e-3);
            prop_assert!(pipe.top_height >= MIN_TOP_HEIGHT);
            prop_assert!(
                pipe.top_height
                    <= PLAYFIELD_HEIGHT - GROUND_HEIGHT - gap - SPAWN_MARGIN_BELOW
            );
        }
    }
}
