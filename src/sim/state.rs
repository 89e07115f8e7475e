//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::difficulty::Difficulty;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Idle title screen - bird floats, no obstacles
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, final score displayed
    GameOver,
}

/// Events produced by a single tick, consumed by the frame driver
/// for audio cues and persistence. The sim itself never touches
/// storage or audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player flapped (velocity overwritten with the jump impulse)
    Flapped,
    /// A pipe was passed; score incremented by one
    Scored,
    /// Bird hit a pipe, the ground, or the ceiling
    Collided,
    /// The run that just ended beat the stored high score
    NewHighScore,
}

/// The player-controlled bird
#[derive(Debug, Clone, Copy)]
pub struct Bird {
    /// Position of the sprite center; x is constant during play
    pub pos: Vec2,
    /// Vertical velocity, pixels per tick (positive is down)
    pub velocity: f32,
    /// Pitch in radians, derived from velocity - never independently stateful
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

impl Bird {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(BIRD_X, BIRD_START_Y),
            velocity: 0.0,
            rotation: 0.0,
            width: BIRD_WIDTH,
            height: BIRD_HEIGHT,
        }
    }

    /// Apply one tick of gravity and recompute the derived pitch.
    ///
    /// The rotation clamp is asymmetric on purpose: a mild nose-up limit
    /// on ascent, a sharper nose-down limit on descent.
    pub fn integrate(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.pos.y += self.velocity;
        self.rotation = (self.velocity * ROTATION_GAIN).clamp(ROTATION_MIN, ROTATION_MAX);
    }
}

/// A gated pipe pair scrolling right to left
#[derive(Debug, Clone, Copy)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Bottom edge of the upper barrier
    pub top_height: f32,
    /// Top edge of the lower barrier (top_height + gap at spawn time)
    pub bottom_y: f32,
    pub width: f32,
    /// Set once the pipe has been scored, never cleared
    pub passed: bool,
}

impl Pipe {
    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }
}

/// Decorative background cloud - no gameplay effect
#[derive(Debug, Clone, Copy)]
pub struct Cloud {
    pub pos: Vec2,
    pub scale: f32,
    /// Drift speed, pixels per tick
    pub speed: f32,
}

impl Cloud {
    /// Clouds wrap once fully off the left edge
    pub const WRAP_X: f32 = -100.0;

    pub fn new(x: f32, rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(x, 50.0 + rng.random::<f32>() * 150.0),
            scale: 0.5 + rng.random::<f32>() * 0.5,
            speed: 0.5 + rng.random::<f32>() * 0.5,
        }
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Score of the current session
    pub score: u32,
    /// Best score ever, loaded from persistence at startup
    pub high_score: u32,
    /// Whether the current game-over screen shows a new record
    pub new_high_score: bool,
    /// Simulation tick counter (advances in every phase)
    pub time_ticks: u64,
    /// Ticks since the last pipe spawn
    pub ticks_since_spawn: u32,
    /// Pacing parameters for the current score
    pub difficulty: Difficulty,
    pub bird: Bird,
    /// Active pipes in spawn order
    pub pipes: Vec<Pipe>,
    /// Background clouds
    pub clouds: Vec<Cloud>,
    /// Ground scroll offset for rendering, wraps at the pattern width
    pub ground_offset: f32,
}

impl GameState {
    /// Create a new game state on the title screen
    pub fn new(seed: u64, high_score: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = vec![
            Cloud::new(100.0, &mut rng),
            Cloud::new(250.0, &mut rng),
            Cloud::new(400.0, &mut rng),
        ];
        Self {
            seed,
            rng,
            phase: GamePhase::Start,
            score: 0,
            high_score,
            new_high_score: false,
            time_ticks: 0,
            ticks_since_spawn: 0,
            difficulty: Difficulty::base(),
            bird: Bird::new(),
            pipes: Vec::new(),
            clouds,
            ground_offset: 0.0,
        }
    }

    /// Uniform sample in `[0, 1)` from the injected source
    pub fn random(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Spawn a pipe at the right edge with the gap placed uniformly at
    /// random within the allowed band, and reset the spawn timer.
    pub fn spawn_pipe(&mut self) {
        let gap = self.difficulty.pipe_gap;
        let max_top = PLAYFIELD_HEIGHT - GROUND_HEIGHT - gap - SPAWN_MARGIN_BELOW;
        let top_height = MIN_TOP_HEIGHT + self.random() * (max_top - MIN_TOP_HEIGHT);

        self.pipes.push(Pipe {
            x: PLAYFIELD_WIDTH,
            top_height,
            bottom_y: top_height + gap,
            width: PIPE_WIDTH,
            passed: false,
        });
        self.ticks_since_spawn = 0;
    }

    /// Begin a fresh playing session (start screen or game-over restart)
    pub fn start_session(&mut self) {
        self.bird = Bird::new();
        self.pipes.clear();
        self.difficulty = Difficulty::base();
        self.score = 0;
        self.new_high_score = false;
        // Timer starts expired so the first pipe of every session appears
        // on the first playing tick, not a full interval in
        self.ticks_since_spawn = self.difficulty.spawn_interval_ticks;
        self.phase = GamePhase::Playing;
    }

    /// Return to the title screen. The high score is kept; difficulty is
    /// left as-is since the next session resets it anyway.
    pub fn to_menu(&mut self) {
        self.bird = Bird::new();
        self.pipes.clear();
        self.score = 0;
        self.new_high_score = false;
        self.phase = GamePhase::Start;
    }
}
