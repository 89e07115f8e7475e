//! Score-driven pacing
//!
//! Difficulty is a pure function of score, recomputed every tick so that
//! newly spawned and existing pipes immediately reflect the new pace.
//! Speed gain and gap loss are capped so the game stays winnable.

/// Base pacing values
pub const BASE_GRAVITY: f32 = 0.35;
pub const JUMP_IMPULSE: f32 = -7.0;
pub const BASE_PIPE_SPEED: f32 = 2.5;
pub const BASE_PIPE_GAP: f32 = 160.0;
/// 2000 ms at 60 ticks per second
pub const SPAWN_INTERVAL_TICKS: u32 = 120;

/// Ramp rates and caps
pub const SPEED_GAIN_PER_POINT: f32 = 0.1;
pub const SPEED_CAP: f32 = 3.0;
pub const GAP_LOSS_PER_POINT: f32 = 2.0;
pub const GAP_CAP: f32 = 30.0;

/// Mutable snapshot of the pacing parameters for a given score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Velocity assigned on flap (negative = up)
    pub jump_impulse: f32,
    /// Horizontal pipe speed per tick
    pub pipe_speed: f32,
    /// Vertical gap between barriers at spawn time
    pub pipe_gap: f32,
    /// Ticks between pipe spawns
    pub spawn_interval_ticks: u32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::base()
    }
}

impl Difficulty {
    /// The fixed base configuration
    pub fn base() -> Self {
        Self {
            gravity: BASE_GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            pipe_speed: BASE_PIPE_SPEED,
            pipe_gap: BASE_PIPE_GAP,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
        }
    }

    /// Pacing for the given score
    pub fn for_score(score: u32) -> Self {
        let speed_gain = (score as f32 * SPEED_GAIN_PER_POINT).min(SPEED_CAP);
        let gap_loss = (score as f32 * GAP_LOSS_PER_POINT).min(GAP_CAP);
        Self {
            pipe_speed: BASE_PIPE_SPEED + speed_gain,
            pipe_gap: BASE_PIPE_GAP - gap_loss,
            ..Self::base()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_matches_score_zero() {
        assert_eq!(Difficulty::base(), Difficulty::for_score(0));
    }

    #[test]
    fn test_ramp_is_monotonic() {
        let mut prev = Difficulty::for_score(0);
        for score in 1..200 {
            let d = Difficulty::for_score(score);
            assert!(d.pipe_speed >= prev.pipe_speed);
            assert!(d.pipe_gap <= prev.pipe_gap);
            prev = d;
        }
    }

    #[test]
    fn test_caps() {
        // Speed cap reached at score 30, gap cap at score 15
        let d = Difficulty::for_score(100);
        assert!((d.pipe_speed - (BASE_PIPE_SPEED + SPEED_CAP)).abs() < f32::EPSILON);
        assert!((d.pipe_gap - (BASE_PIPE_GAP - GAP_CAP)).abs() < f32::EPSILON);
        assert_eq!(d, Difficulty::for_score(1000));
    }

    #[test]
    fn test_gravity_and_impulse_do_not_scale() {
        let d = Difficulty::for_score(50);
        assert_eq!(d.gravity, BASE_GRAVITY);
        assert_eq!(d.jump_impulse, JUMP_IMPULSE);
        assert_eq!(d.spawn_interval_ticks, SPAWN_INTERVAL_TICKS);
    }
}
