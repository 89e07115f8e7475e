//! Collision tests for the bird against ground, ceiling and pipes
//!
//! The bird's nominal box is shrunk by a small symmetric inset so the
//! collision shape approximates the visible sprite rather than its
//! bounding rectangle. All checks run on already-updated positions.

use super::state::{Bird, Pipe};
use crate::consts::{BIRD_INSET_X, BIRD_INSET_Y};
use crate::ground_line;

/// Bird's lower edge reached or passed the ground line
#[inline]
pub fn hits_ground(bird: &Bird) -> bool {
    bird.pos.y + bird.height / 2.0 >= ground_line()
}

/// Bird's upper edge reached or passed the playfield ceiling
#[inline]
pub fn hits_ceiling(bird: &Bird) -> bool {
    bird.pos.y - bird.height / 2.0 <= 0.0
}

/// Inset bird box overlaps the pipe's span while outside its gap
pub fn hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    let left = bird.pos.x - bird.width / 2.0 + BIRD_INSET_X;
    let right = bird.pos.x + bird.width / 2.0 - BIRD_INSET_X;
    let top = bird.pos.y - bird.height / 2.0 + BIRD_INSET_Y;
    let bottom = bird.pos.y + bird.height / 2.0 - BIRD_INSET_Y;

    let overlaps_x = right > pipe.x && left < pipe.x + pipe.width;
    overlaps_x && (top < pipe.top_height || bottom > pipe.bottom_y)
}

/// True if the bird collides with anything this tick
pub fn check_collision(bird: &Bird, pipes: &[Pipe]) -> bool {
    hits_ground(bird) || hits_ceiling(bird) || pipes.iter().any(|p| hits_pipe(bird, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn pipe_at(x: f32) -> Pipe {
        Pipe {
            x,
            top_height: 200.0,
            bottom_y: 360.0,
            width: PIPE_WIDTH,
            passed: false,
        }
    }

    fn bird_at(y: f32) -> Bird {
        let mut bird = Bird::new();
        bird.pos.y = y;
        bird
    }

    #[test]
    fn test_no_collision_mid_air() {
        let bird = bird_at(300.0);
        assert!(!check_collision(&bird, &[]));
    }

    #[test]
    fn test_ground_collision() {
        // Ground line is at 520; lower edge is y + 15
        assert!(!hits_ground(&bird_at(504.9)));
        assert!(hits_ground(&bird_at(505.0)));
        assert!(hits_ground(&bird_at(600.0)));
    }

    #[test]
    fn test_ceiling_collision() {
        assert!(!hits_ceiling(&bird_at(15.1)));
        assert!(hits_ceiling(&bird_at(15.0)));
        assert!(hits_ceiling(&bird_at(-5.0)));
    }

    #[test]
    fn test_bird_left_of_pipe_misses() {
        // Bird inset box spans x 68..92; pipe starts at 100
        let bird = bird_at(300.0);
        assert!(!hits_pipe(&bird, &pipe_at(100.0)));
    }

    #[test]
    fn test_bird_in_gap_misses() {
        // Overlapping horizontally, vertically inside the 200..360 gap
        let bird = bird_at(280.0);
        assert!(!hits_pipe(&bird, &pipe_at(60.0)));
    }

    #[test]
    fn test_bird_above_gap_collides() {
        // Inset top edge at y - 10; at y = 180 that's 170 < top_height
        let bird = bird_at(180.0);
        assert!(hits_pipe(&bird, &pipe_at(60.0)));
    }

    #[test]
    fn test_bird_below_gap_collides() {
        // Inset bottom edge at y + 10; at y = 380 that's 390 > bottom_y
        let bird = bird_at(380.0);
        assert!(hits_pipe(&bird, &pipe_at(60.0)));
    }

    #[test]
    fn test_inset_forgives_grazing_contact() {
        // The nominal box would clip the barrier, the inset box does not:
        // nominal top edge 185 < 200, inset top edge 190+..
        let bird = bird_at(200.0 + BIRD_HEIGHT / 2.0 - BIRD_INSET_Y + 0.1);
        let pipe = pipe_at(60.0);
        assert!(bird.pos.y - bird.height / 2.0 < pipe.top_height);
        assert!(!hits_pipe(&bird, &pipe));
    }
}
