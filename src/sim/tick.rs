//! Per-frame simulation tick
//!
//! Called once per display refresh with the frame timestamp. Order inside a
//! tick: one-shot input, due timer, bat, ball advance, miss check (which
//! arms the next timer), floating text.

use super::ball::Direction;
use super::clock::TimerKind;
use super::evaluator::{evaluate_input, resolve_timeout};
use super::state::{GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start or replay an innings
    pub start: bool,
    /// Shot played this frame
    pub swing: Option<Direction>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    if input.start {
        state.start_innings();
    }

    if let Some(direction) = input.swing {
        evaluate_input(state, direction, now_ms);
    }

    match state.clock.poll(now_ms) {
        Some(TimerKind::NextDelivery) => state.spawn_delivery(),
        Some(TimerKind::GameOver) => state.end_innings(),
        None => {}
    }

    if state.phase == GamePhase::Playing {
        state.bat.advance();

        let tuning = &state.tuning;
        if state.ball.advance(tuning) {
            resolve_timeout(state, now_ms);
        }
    }

    state.floating_text.advance();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameEvent;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Tick with no input until the ball is resolved or the phase changes
    fn run_until_resolved(state: &mut GameState, now: &mut f64) {
        for _ in 0..10_000 {
            if !state.ball.is_active() {
                return;
            }
            *now += FRAME_MS;
            tick(state, &TickInput::default(), *now);
        }
        panic!("ball never resolved");
    }

    #[test]
    fn test_idle_until_started() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.session.balls_faced, 0);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.ball.is_active());
        assert!(state.ball.depth > 0.0);
    }

    #[test]
    fn test_unplayed_ball_is_out() {
        let mut state = GameState::new(7);
        state.start_innings();
        state.ball.depth = 0.999;

        tick(&mut state, &TickInput::default(), 0.0);

        assert!(state.ball.depth > 1.0);
        assert_eq!(state.session.outs, 1);
        assert_eq!(state.session.history_tokens(), vec!["W"]);
        assert_eq!(state.session.last_outcome_label, "OUT (MISSED)");
    }

    #[test]
    fn test_next_ball_after_delay() {
        let mut state = GameState::new(8);
        state.start_innings();
        let mut now = 0.0;
        run_until_resolved(&mut state, &mut now);
        let resolved_at = now;

        while now < resolved_at + 990.0 {
            now += FRAME_MS;
            tick(&mut state, &TickInput::default(), now);
            if now < resolved_at + 1000.0 {
                assert_eq!(state.session.balls_faced, 1);
            }
        }
        now = resolved_at + 1000.0;
        tick(&mut state, &TickInput::default(), now);
        assert_eq!(state.session.balls_faced, 2);
        assert!(state.ball.is_active());
    }

    #[test]
    fn test_three_misses_end_the_innings_once() {
        let mut state = GameState::new(99);
        state.start_innings();
        let mut now = 0.0;
        let mut game_overs = 0;

        for _ in 0..600 {
            now += FRAME_MS;
            tick(&mut state, &TickInput::default(), now);
            game_overs += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count();
            assert!(state.session.outs <= 3);
        }

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.session.outs, 3);
        assert_eq!(state.session.balls_faced, 3);
        assert_eq!(game_overs, 1);
        assert!(state.clock.pending().is_none());
    }

    #[test]
    fn test_swing_on_time_scores() {
        let mut state = GameState::new(21);
        state.start_innings();
        let mut now = 0.0;
        while state.ball.depth < 0.8 {
            now += FRAME_MS;
            tick(&mut state, &TickInput::default(), now);
        }
        let input = TickInput {
            swing: Some(Direction::Right),
            ..Default::default()
        };
        now += FRAME_MS;
        tick(&mut state, &input, now);
        assert!(state.ball.is_struck());
        assert!(state.session.score > 0);
        assert_eq!(state.session.outs, 0);
    }

    #[test]
    fn test_replay_resets_session() {
        let mut state = GameState::new(5);
        state.start_innings();
        let mut now = 0.0;
        for _ in 0..600 {
            now += FRAME_MS;
            tick(&mut state, &TickInput::default(), now);
        }
        assert_eq!(state.phase, GamePhase::Ended);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, now + FRAME_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.session.outs, 0);
        assert_eq!(state.session.balls_faced, 1);
        assert_eq!(state.session.history().count(), 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                start: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                swing: Some(Direction::Left),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for (i, input) in inputs.iter().enumerate() {
            let now = i as f64 * FRAME_MS;
            tick(&mut state1, input, now);
            tick(&mut state2, input, now);
        }

        assert_eq!(state1.session.outs, state2.session.outs);
        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert!((state1.ball.depth - state2.ball.depth).abs() < 0.0001);
    }
}
