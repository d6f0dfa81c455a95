//! The delivered ball
//!
//! Positions are normalized field coordinates: x across the pitch, y down the
//! screen toward the batter. Depth runs from 0 (release) to 1 (at the bat).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Left or right, for both swing and shot direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Lifecycle of a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallState {
    /// Nothing in flight
    #[default]
    Idle,
    /// Travelling toward the batter
    Approaching,
    /// Hit, flying away on its post-hit path
    Struck,
    /// Passed the batter or mistimed
    Missed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub depth: f32,
    pub state: BallState,
    /// Depth gained per tick while approaching
    pub speed: f32,
    pub pos: Vec2,
    pub origin_x: f32,
    pub swing: Direction,
    /// Signed curve applied at full depth
    pub swing_magnitude: f32,
    /// Post-hit velocity per tick
    pub vel: Vec2,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            depth: 0.0,
            state: BallState::Idle,
            speed: BALL_BASE_SPEED,
            pos: Vec2::new(BALL_SPAWN_X, BALL_SPAWN_Y),
            origin_x: BALL_SPAWN_X,
            swing: Direction::Left,
            swing_magnitude: 0.0,
            vel: Vec2::ZERO,
        }
    }
}

impl Ball {
    /// Bowl a fresh ball. `balls_faced` already counts this delivery.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, balls_faced: u32) -> Self {
        let swing = if rng.random_bool(0.5) {
            Direction::Left
        } else {
            Direction::Right
        };
        // Left-swinging balls curve back toward the middle late in flight
        let swing_magnitude = match swing {
            Direction::Left => tuning.swing_magnitude,
            Direction::Right => -tuning.swing_magnitude,
        };
        let jitter = rng.random::<f32>() * tuning.speed_jitter;
        let speed = (tuning.base_speed + jitter) * tuning.difficulty_multiplier(balls_faced);

        Self {
            depth: 0.0,
            state: BallState::Approaching,
            speed,
            pos: Vec2::new(BALL_SPAWN_X, BALL_SPAWN_Y),
            origin_x: BALL_SPAWN_X,
            swing,
            swing_magnitude,
            vel: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == BallState::Approaching
    }

    #[inline]
    pub fn is_struck(&self) -> bool {
        self.state == BallState::Struck
    }

    /// Lateral aim point for the current swing
    fn target_x(&self) -> f32 {
        match self.swing {
            Direction::Left => SWING_TARGET_LEFT,
            Direction::Right => SWING_TARGET_RIGHT,
        }
    }

    /// Position on the approach path at the current depth
    pub fn approach_position(&self) -> Vec2 {
        let z = self.depth.max(0.0);
        let y = BALL_SPAWN_Y + BALL_DROP * z.powf(BALL_ARC_EXPONENT);
        let linear_x = self.origin_x + (self.target_x() - self.origin_x) * z;
        // Curve grows with depth², so the swing only shows late
        let x = linear_x + z * z * self.swing_magnitude;
        Vec2::new(x, y)
    }

    /// Advance one frame. Returns true if an approaching ball just passed the batter.
    pub fn advance(&mut self, tuning: &Tuning) -> bool {
        match self.state {
            BallState::Approaching => {
                self.depth += self.speed;
                self.pos = self.approach_position();
                self.depth > 1.0
            }
            BallState::Struck => {
                self.pos += self.vel;
                self.depth -= tuning.recede_rate;
                if self.depth <= 0.0 {
                    self.depth = 0.0;
                    self.state = BallState::Idle;
                }
                false
            }
            BallState::Idle | BallState::Missed => false,
        }
    }

    /// Send the ball away after a well timed shot
    pub fn strike<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R, tuning: &Tuning) {
        let vx = tuning.hit_vx_base + rng.random::<f32>() * tuning.hit_vx_spread;
        let vy = tuning.hit_vy_base + rng.random::<f32>() * tuning.hit_vy_spread;
        self.vel = Vec2::new(direction.sign() * vx, -vy);
        self.state = BallState::Struck;
    }

    pub fn mark_missed(&mut self) {
        self.state = BallState::Missed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn approaching(swing: Direction) -> Ball {
        Ball {
            state: BallState::Approaching,
            swing,
            swing_magnitude: match swing {
                Direction::Left => SWING_MAGNITUDE,
                Direction::Right => -SWING_MAGNITUDE,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_spawn_defaults() {
        let mut rng = Pcg32::seed_from_u64(1);
        let tuning = Tuning::default();
        let ball = Ball::spawn(&mut rng, &tuning, 1);
        assert!(ball.is_active());
        assert_eq!(ball.depth, 0.0);
        assert_eq!(ball.pos, Vec2::new(0.5, 0.35));
        assert_eq!(ball.swing_magnitude.abs(), 0.04);
        assert!(ball.speed >= 0.008 && ball.speed < 0.010);
    }

    #[test]
    fn test_spawn_speed_scales_with_difficulty() {
        let tuning = Tuning::default();
        let slow = Ball::spawn(&mut Pcg32::seed_from_u64(7), &tuning, 1);
        let fast = Ball::spawn(&mut Pcg32::seed_from_u64(7), &tuning, 10);
        assert!((fast.speed / slow.speed - 1.30).abs() < 1e-4);
    }

    #[test]
    fn test_approach_arc_endpoints() {
        let mut ball = approaching(Direction::Right);
        ball.depth = 1.0;
        let p = ball.approach_position();
        assert!((p.y - 0.82).abs() < 1e-6);
        // 0.54 target, minus the full right-hand curve
        assert!((p.x - 0.50).abs() < 1e-6);
    }

    #[test]
    fn test_swing_is_late() {
        let mut ball = approaching(Direction::Left);
        ball.depth = 0.2;
        let early = ball.approach_position().x - (0.5 - 0.04 * 0.2);
        ball.depth = 0.9;
        let late = ball.approach_position().x - (0.5 - 0.04 * 0.9);
        assert!(early.abs() < late.abs());
    }

    #[test]
    fn test_advance_reports_overshoot() {
        let tuning = Tuning::default();
        let mut ball = approaching(Direction::Left);
        ball.speed = 0.01;
        ball.depth = 0.995;
        assert!(ball.advance(&tuning));
        assert!(ball.depth > 1.0);
    }

    #[test]
    fn test_struck_ball_recedes_then_idles() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ball = approaching(Direction::Left);
        ball.depth = 0.8;
        ball.strike(Direction::Left, &mut rng, &tuning);
        assert!(ball.is_struck());
        assert!(ball.vel.x < 0.0 && ball.vel.y < 0.0);

        let start = ball.pos;
        assert!(!ball.advance(&tuning));
        assert!((ball.depth - 0.79).abs() < 1e-6);
        assert_ne!(ball.pos, start);

        for _ in 0..100 {
            ball.advance(&tuning);
        }
        assert_eq!(ball.state, BallState::Idle);
    }

    #[test]
    fn test_right_shot_goes_right() {
        let tuning = Tuning::default();
        let mut ball = approaching(Direction::Left);
        ball.strike(Direction::Right, &mut Pcg32::seed_from_u64(9), &tuning);
        assert!(ball.vel.x >= 0.02 && ball.vel.x < 0.03);
        assert!(ball.vel.y <= -0.02 && ball.vel.y > -0.04);
    }
}
