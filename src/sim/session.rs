//! Innings bookkeeping: score, wickets, balls faced and recent outcomes

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::HISTORY_LEN;

/// Result of one delivery as shown in the ball-by-ball strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum OutcomeToken {
    Runs(u32),
    Wicket,
}

impl fmt::Display for OutcomeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeToken::Runs(r) => write!(f, "{}", r),
            OutcomeToken::Wicket => f.write_str("W"),
        }
    }
}

impl From<OutcomeToken> for String {
    fn from(token: OutcomeToken) -> Self {
        token.to_string()
    }
}

impl TryFrom<String> for OutcomeToken {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == "W" {
            return Ok(OutcomeToken::Wicket);
        }
        s.parse::<u32>()
            .map(OutcomeToken::Runs)
            .map_err(|_| format!("invalid outcome token: {}", s))
    }
}

/// Label shown before the first delivery of an innings
pub const NO_OUTCOME_LABEL: &str = "-";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub score: u32,
    pub outs: u32,
    pub balls_faced: u32,
    pub last_outcome_label: String,
    history: VecDeque<OutcomeToken>,
    history_len: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(HISTORY_LEN)
    }
}

impl Session {
    pub fn new(history_len: usize) -> Self {
        Self {
            score: 0,
            outs: 0,
            balls_faced: 0,
            last_outcome_label: NO_OUTCOME_LABEL.to_string(),
            history: VecDeque::with_capacity(history_len + 1),
            history_len,
        }
    }

    /// Count the upcoming delivery (before its difficulty is computed)
    pub fn record_delivery(&mut self) -> u32 {
        self.balls_faced += 1;
        self.balls_faced
    }

    /// Push an outcome, evicting the oldest beyond the history length
    pub fn append_history(&mut self, token: OutcomeToken) {
        self.history.push_back(token);
        while self.history.len() > self.history_len {
            self.history.pop_front();
        }
    }

    /// Oldest first
    pub fn history(&self) -> impl Iterator<Item = &OutcomeToken> {
        self.history.iter()
    }

    pub fn history_tokens(&self) -> Vec<String> {
        self.history.iter().map(ToString::to_string).collect()
    }

    pub fn add_runs(&mut self, runs: u32) {
        self.score += runs;
        self.last_outcome_label = format!("{} RUNS", runs);
        self.append_history(OutcomeToken::Runs(runs));
    }

    /// Record a wicket and return the new out count
    pub fn add_wicket(&mut self) -> u32 {
        self.outs += 1;
        self.last_outcome_label = "OUT (MISSED)".to_string();
        self.append_history(OutcomeToken::Wicket);
        self.outs
    }

    /// Start a fresh innings
    pub fn reset(&mut self) {
        self.score = 0;
        self.outs = 0;
        self.balls_faced = 0;
        self.last_outcome_label = NO_OUTCOME_LABEL.to_string();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_history_evicts_oldest() {
        let mut s = Session::default();
        for r in 1..=12 {
            s.append_history(OutcomeToken::Runs(r));
        }
        let tokens = s.history_tokens();
        assert_eq!(tokens.len(), 10);
        assert_eq!(tokens.first().map(String::as_str), Some("3"));
        assert_eq!(tokens.last().map(String::as_str), Some("12"));
    }

    #[test]
    fn test_runs_and_wickets() {
        let mut s = Session::default();
        s.add_runs(4);
        assert_eq!(s.score, 4);
        assert_eq!(s.last_outcome_label, "4 RUNS");
        assert_eq!(s.add_wicket(), 1);
        assert_eq!(s.last_outcome_label, "OUT (MISSED)");
        assert_eq!(s.history_tokens(), vec!["4", "W"]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut s = Session::default();
        s.record_delivery();
        s.add_runs(6);
        s.add_wicket();
        s.reset();
        assert_eq!((s.score, s.outs, s.balls_faced), (0, 0, 0));
        assert_eq!(s.last_outcome_label, "-");
        assert_eq!(s.history().count(), 0);
    }

    #[test]
    fn test_token_serializes_as_string() {
        let json = serde_json::to_string(&[OutcomeToken::Runs(6), OutcomeToken::Wicket]).unwrap();
        assert_eq!(json, r#"["6","W"]"#);
        let back: Vec<OutcomeToken> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![OutcomeToken::Runs(6), OutcomeToken::Wicket]);
    }

    proptest! {
        #[test]
        fn prop_history_bounded_fifo(tokens in proptest::collection::vec(0u32..7, 0..60)) {
            let mut s = Session::default();
            for &t in &tokens {
                s.append_history(OutcomeToken::Runs(t));
            }
            let kept: Vec<_> = s.history().copied().collect();
            prop_assert!(kept.len() <= 10);
            let start = tokens.len().saturating_sub(10);
            let expected: Vec<_> = tokens[start..].iter().map(|&t| OutcomeToken::Runs(t)).collect();
            prop_assert_eq!(kept, expected);
        }
    }
}
