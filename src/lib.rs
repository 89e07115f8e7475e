//! Flappy Wings - a flappy-bird style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `renderer`: Canvas 2D rendering (wasm only)
//! - `audio`: Procedural Web Audio sound cues (wasm only)
//! - `highscore`: Best score persisted to LocalStorage
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscore;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep; all per-tick constants assume 60 Hz
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 6;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Height of the scrolling ground band at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Bird defaults - x never changes during play
    pub const BIRD_X: f32 = 80.0;
    pub const BIRD_START_Y: f32 = PLAYFIELD_HEIGHT / 2.0;
    pub const BIRD_WIDTH: f32 = 40.0;
    pub const BIRD_HEIGHT: f32 = 30.0;
    /// Collision box insets approximating the visible sprite
    pub const BIRD_INSET_X: f32 = 8.0;
    pub const BIRD_INSET_Y: f32 = 5.0;

    /// Rotation derived from vertical velocity (radians)
    pub const ROTATION_GAIN: f32 = 0.05;
    pub const ROTATION_MIN: f32 = -0.5;
    pub const ROTATION_MAX: f32 = 1.2;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    /// Lowest allowed bottom edge of the upper barrier
    pub const MIN_TOP_HEIGHT: f32 = 80.0;
    /// Margin kept between the lower barrier and the ground at spawn time
    pub const SPAWN_MARGIN_BELOW: f32 = 80.0;

    /// Ground scroll pattern repeats every 40 px
    pub const GROUND_PATTERN: f32 = 40.0;
}

/// Y coordinate of the ground line (top of the ground band)
#[inline]
pub fn ground_line() -> f32 {
    consts::PLAYFIELD_HEIGHT - consts::GROUND_HEIGHT
}
