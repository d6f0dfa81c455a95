//! Game state and core simulation types
//!
//! One owned record holds everything the frame loop, the timers and the
//! input handlers touch. Handlers get it by `&mut`, never by capture.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, Direction};
use super::clock::DeliveryClock;
use super::session::Session;
use crate::consts::*;
use crate::tuning::Tuning;

/// Top-level phase shared by simulation and presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to pick a name
    EnteringName,
    /// Name known, innings not started
    #[default]
    Idle,
    /// Balls are being bowled
    Playing,
    /// Innings over, score saved
    Ended,
}

/// Bat animation (presentation only, no effect on scoring)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BatSwing {
    pub swinging: bool,
    pub direction: Direction,
    /// Radians swept so far
    pub angle: f32,
}

impl BatSwing {
    pub fn start(&mut self, direction: Direction) {
        self.swinging = true;
        self.direction = direction;
        self.angle = 0.0;
    }

    pub fn advance(&mut self) {
        if self.swinging {
            self.angle += BAT_SWING_STEP;
            if self.angle > BAT_SWING_END {
                self.swinging = false;
            }
        }
    }
}

/// "+4" / "OUT!" text that drifts up and fades over the pitch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub color: String,
    pub y: f32,
    pub opacity: f32,
    pub active: bool,
}

impl FloatingText {
    pub fn show(&mut self, text: String, color: &str) {
        self.text = text;
        self.color = color.to_string();
        self.y = FLOATING_TEXT_START_Y;
        self.opacity = 1.0;
        self.active = true;
    }

    pub fn advance(&mut self) {
        if self.active {
            self.y -= FLOATING_TEXT_RISE;
            self.opacity -= FLOATING_TEXT_FADE;
            if self.opacity <= 0.0 {
                self.opacity = 0.0;
                self.active = false;
            }
        }
    }
}

/// One-shot banner announcing a delivery's result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBanner {
    pub text: String,
    pub color: String,
    /// Strictly increasing, lets the UI restart its animation
    pub id: u64,
}

/// Audio cues requested by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Bat on ball
    Hit,
    /// Crowd for a boundary
    Cheer,
    /// Wicket
    Out,
}

/// Things the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DeliverySpawned { ball_number: u32 },
    BatSwung(Direction),
    Banner(RewardBanner),
    Sound(SoundCue),
    GameOver { score: u32 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    pub session: Session,
    pub ball: Ball,
    pub bat: BatSwing,
    pub floating_text: FloatingText,
    pub clock: DeliveryClock,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_banner_id: u64,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            session: Session::new(tuning.history_len),
            ball: Ball::default(),
            bat: BatSwing::default(),
            floating_text: FloatingText::default(),
            clock: DeliveryClock::new(),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_banner_id: 1,
        }
    }

    /// Begin a new innings (first play or replay). Returns false if not allowed now.
    pub fn start_innings(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::Idle | GamePhase::Ended) {
            log::warn!("Ignoring start request in {:?}", self.phase);
            return false;
        }

        self.session.reset();
        self.clock.cancel();
        self.ball = Ball::default();
        self.bat = BatSwing::default();
        self.floating_text.active = false;
        self.phase = GamePhase::Playing;
        log::info!("Innings started");

        self.spawn_delivery();
        true
    }

    /// Bowl the next ball. No-op outside of play, so a late timer is harmless.
    pub fn spawn_delivery(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        let ball_number = self.session.record_delivery();
        self.ball = Ball::spawn(&mut self.rng, &self.tuning, ball_number);
        self.floating_text.active = false;
        log::debug!(
            "Ball {} bowled: speed {:.4}, swing {:?}",
            ball_number,
            self.ball.speed,
            self.ball.swing
        );
        self.emit(GameEvent::DeliverySpawned { ball_number });
    }

    /// Close the innings
    pub fn end_innings(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.clock.cancel();
        self.phase = GamePhase::Ended;
        log::info!(
            "Innings over: {} runs from {} balls",
            self.session.score,
            self.session.balls_faced
        );
        self.emit(GameEvent::GameOver {
            score: self.session.score,
        });
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn emit_banner(&mut self, text: String, color: &str) {
        let id = self.next_banner_id;
        self.next_banner_id += 1;
        self.emit(GameEvent::Banner(RewardBanner {
            text,
            color: color.to_string(),
            id,
        }));
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
