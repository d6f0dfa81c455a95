//! Hit evaluation
//!
//! Timing is the only skill check: the shot direction picks which way the
//! ball flies, never whether it connects.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::Direction;
use super::clock::TimerKind;
use super::state::{GameEvent, GamePhase, GameState, SoundCue};
use crate::consts::OUT_COLOR;
use crate::run_color;

/// How a delivery was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Hit { runs: u32 },
    Out,
}

/// Handle a left/right input.
///
/// Ignored outside of play. While playing the bat always swings; the ball is
/// only judged if one is still approaching, and each ball is judged once.
pub fn evaluate_input(state: &mut GameState, direction: Direction, now_ms: f64) -> Option<Outcome> {
    if state.phase != GamePhase::Playing {
        return None;
    }

    state.bat.start(direction);
    state.emit(GameEvent::BatSwung(direction));

    if !state.ball.is_active() {
        return None;
    }

    if state.tuning.in_window(state.ball.depth) {
        Some(resolve_hit(state, direction, now_ms))
    } else {
        log::debug!("Mistimed at depth {:.3}", state.ball.depth);
        Some(resolve_out(state, now_ms))
    }
}

/// The ball went past the bat untouched
pub fn resolve_timeout(state: &mut GameState, now_ms: f64) -> Option<Outcome> {
    if state.phase != GamePhase::Playing || !state.ball.is_active() {
        return None;
    }
    Some(resolve_out(state, now_ms))
}

fn resolve_hit(state: &mut GameState, direction: Direction, now_ms: f64) -> Outcome {
    let runs = pick_runs(&mut state.rng, &state.tuning.run_values);

    state.session.add_runs(runs);
    state.ball.strike(direction, &mut state.rng, &state.tuning);
    log::debug!("Ball {}: {} runs", state.session.balls_faced, runs);

    let color = run_color(runs);
    state.emit_banner(
        format!("BALL {}: {} RUNS", state.session.balls_faced, runs),
        color,
    );
    state.floating_text.show(format!("+{}", runs), color);
    state.emit(GameEvent::Sound(SoundCue::Hit));
    if runs == 4 || runs == 6 {
        state.emit(GameEvent::Sound(SoundCue::Cheer));
    }

    let delay = state.tuning.next_ball_delay_ms;
    state.clock.arm(TimerKind::NextDelivery, now_ms, delay);

    Outcome::Hit { runs }
}

fn resolve_out(state: &mut GameState, now_ms: f64) -> Outcome {
    state.ball.mark_missed();
    let outs = state.session.add_wicket();
    log::debug!("Ball {}: out ({} down)", state.session.balls_faced, outs);

    state.emit_banner(format!("BALL {}: OUT", state.session.balls_faced), OUT_COLOR);
    state.floating_text.show("OUT!".to_string(), OUT_COLOR);
    state.emit(GameEvent::Sound(SoundCue::Out));

    if outs >= state.tuning.max_outs {
        let delay = state.tuning.game_over_delay_ms;
        state.clock.arm(TimerKind::GameOver, now_ms, delay);
    } else {
        let delay = state.tuning.next_ball_delay_ms;
        state.clock.arm(TimerKind::NextDelivery, now_ms, delay);
    }

    Outcome::Out
}

/// Uniform pick from the configured run values
pub fn pick_runs<R: Rng + ?Sized>(rng: &mut R, run_values: &[u32]) -> u32 {
    if run_values.is_empty() {
        return 0;
    }
    run_values[rng.random_range(0..run_values.len())]
}
