//! Game facade
//!
//! Owns the simulation, the leaderboard, the player profile and the store
//! they persist to. Front ends queue input here, call [`Game::tick`] once per
//! frame and render from [`Game::snapshot`] plus the returned events.

use serde::Serialize;

use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::persistence::KeyValueStore;
use crate::profile::{PlayerProfile, ProfileError};
use crate::sim::{Direction, GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Read-only view for the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub score: u32,
    pub outs: u32,
    pub balls_faced: u32,
    pub last_outcome_label: String,
    pub outcome_history: Vec<String>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub phase: GamePhase,
    pub player_name: Option<String>,
}

pub struct Game<S: KeyValueStore> {
    state: GameState,
    leaderboard: Leaderboard,
    profile: PlayerProfile,
    store: S,
    input: TickInput,
}

impl<S: KeyValueStore> Game<S> {
    pub fn new(store: S, seed: u64) -> Self {
        Self::with_tuning(store, seed, Tuning::default())
    }

    pub fn with_tuning(store: S, seed: u64, tuning: Tuning) -> Self {
        let profile = PlayerProfile::load(&store);
        let leaderboard = Leaderboard::load(&store);
        let mut state = GameState::with_tuning(seed, tuning);
        state.phase = if profile.name().is_some() {
            GamePhase::Idle
        } else {
            GamePhase::EnteringName
        };

        Self {
            state,
            leaderboard,
            profile,
            store,
            input: TickInput::default(),
        }
    }

    /// Set (or change) the player name. Not allowed mid-innings.
    pub fn submit_name(&mut self, name: &str) -> Result<(), ProfileError> {
        if self.state.phase == GamePhase::Playing {
            return Err(ProfileError::InningsInProgress);
        }
        self.profile.set_name(&mut self.store, name)?;
        if self.state.phase == GamePhase::EnteringName {
            self.state.phase = GamePhase::Idle;
        }
        log::info!("Playing as {}", self.profile.display_name());
        Ok(())
    }

    /// Queue a start/replay for the next tick
    pub fn start(&mut self) {
        self.input.start = true;
    }

    /// Queue a shot for the next tick
    pub fn swing(&mut self, direction: Direction) {
        self.input.swing = Some(direction);
    }

    /// Run one frame and return what happened
    pub fn tick(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, now_ms);

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::GameOver { score } = event {
                self.save_score(*score);
            }
        }
        events
    }

    fn save_score(&mut self, score: u32) {
        let name = self.profile.display_name().to_string();
        match self.leaderboard.record(&mut self.store, &name, score) {
            Ok(true) => log::info!("New best for {}: {}", name, score),
            Ok(false) => log::info!(
                "{} scored {} (best {:?})",
                name,
                score,
                self.leaderboard.best_for(&name)
            ),
            Err(e) => log::warn!("Score not persisted: {}", e),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let session = &self.state.session;
        Snapshot {
            score: session.score,
            outs: session.outs,
            balls_faced: session.balls_faced,
            last_outcome_label: session.last_outcome_label.clone(),
            outcome_history: session.history_tokens(),
            leaderboard: self.leaderboard.entries().to_vec(),
            phase: self.state.phase,
            player_name: self.profile.name().map(str::to_string),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
