//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped ball flight, timers on a caller-supplied clock
//! - Seeded RNG only
//! - No rendering, audio or storage dependencies

pub mod ball;
pub mod clock;
pub mod evaluator;
pub mod session;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallState, Direction};
pub use clock::{DeliveryClock, ScheduledTask, TimerKind};
pub use evaluator::{Outcome, evaluate_input, pick_runs, resolve_timeout};
pub use session::{OutcomeToken, Session};
pub use state::{BatSwing, FloatingText, GameEvent, GamePhase, GameState, RewardBanner, SoundCue};
pub use tick::{TickInput, tick};
