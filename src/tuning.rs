//! Data-driven game balance
//!
//! Every number the simulation needs lives in [`Tuning`]. The defaults
//! reproduce the arcade feel; tests and experiments can swap in their own.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Depth gained per tick before jitter and difficulty
    pub base_speed: f32,
    /// Upper bound of the uniform jitter added to `base_speed`
    pub speed_jitter: f32,
    /// Deliveries per difficulty step
    pub difficulty_step: u32,
    /// Multiplier increase per difficulty step
    pub difficulty_increment: f32,

    /// Earliest depth that counts as a hit
    pub window_start: f32,
    /// Latest depth that counts as a hit
    pub window_end: f32,

    /// Lateral curve magnitude applied at full depth (signed by direction)
    pub swing_magnitude: f32,

    /// Delay before the next delivery is bowled (ms)
    pub next_ball_delay_ms: f64,
    /// Delay between the final wicket and the game-over transition (ms)
    pub game_over_delay_ms: f64,

    /// Possible run values for a well timed shot
    pub run_values: Vec<u32>,
    /// Wickets before the innings ends
    pub max_outs: u32,
    /// Outcome tokens kept in the rolling history
    pub history_len: usize,

    /// Horizontal post-hit speed: base + U[0, spread)
    pub hit_vx_base: f32,
    pub hit_vx_spread: f32,
    /// Upward post-hit speed: base + U[0, spread)
    pub hit_vy_base: f32,
    pub hit_vy_spread: f32,
    /// Depth lost per tick by a struck ball
    pub recede_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: BALL_BASE_SPEED,
            speed_jitter: BALL_SPEED_JITTER,
            difficulty_step: DIFFICULTY_STEP,
            difficulty_increment: DIFFICULTY_INCREMENT,

            window_start: HIT_WINDOW_START,
            window_end: HIT_WINDOW_END,

            swing_magnitude: SWING_MAGNITUDE,

            next_ball_delay_ms: NEXT_BALL_DELAY_MS,
            game_over_delay_ms: GAME_OVER_DELAY_MS,

            run_values: RUN_VALUES.to_vec(),
            max_outs: MAX_OUTS,
            history_len: HISTORY_LEN,

            hit_vx_base: 0.02,
            hit_vx_spread: 0.01,
            hit_vy_base: 0.02,
            hit_vy_spread: 0.02,
            recede_rate: STRUCK_RECEDE_RATE,
        }
    }
}

impl Tuning {
    /// Speed multiplier for a delivery, stepping up every `difficulty_step` balls
    pub fn difficulty_multiplier(&self, balls_faced: u32) -> f32 {
        let step = self.difficulty_step.max(1);
        1.0 + (balls_faced / step) as f32 * self.difficulty_increment
    }

    /// Whether an input at `depth` lands inside the timing window
    #[inline]
    pub fn in_window(&self, depth: f32) -> bool {
        depth >= self.window_start && depth <= self.window_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_steps_every_five_balls() {
        let t = Tuning::default();
        assert_eq!(t.difficulty_multiplier(0), 1.0);
        assert_eq!(t.difficulty_multiplier(4), 1.0);
        assert!((t.difficulty_multiplier(5) - 1.15).abs() < 1e-6);
        assert!((t.difficulty_multiplier(9) - 1.15).abs() < 1e-6);
        assert!((t.difficulty_multiplier(10) - 1.30).abs() < 1e-6);
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let t = Tuning::default();
        assert!(t.in_window(0.75));
        assert!(t.in_window(0.98));
        assert!(!t.in_window(0.7499));
        assert!(!t.in_window(0.9801));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = serde_json::from_str::<Tuning>(r#"{ "max_outs": 5 }"#).unwrap();
        assert_eq!(t.max_outs, 5);
        assert_eq!(t.run_values, vec![1, 2, 3, 4, 6]);
    }

    proptest::proptest! {
        #[test]
        fn prop_difficulty_non_decreasing(n in 0u32..10_000) {
            let t = Tuning::default();
            proptest::prop_assert!(t.difficulty_multiplier(n + 1) >= t.difficulty_multiplier(n));
            let expected = 1.0 + (n / 5) as f32 * 0.15;
            proptest::prop_assert!((t.difficulty_multiplier(n) - expected).abs() < 1e-4);
        }
    }
}
