//! Delivery clock
//!
//! Holds at most one pending task. Arming a new task cancels the previous
//! one, so a stale next-ball timer can never fire after the game-over timer
//! has been armed (or vice versa).

use serde::{Deserialize, Serialize};

/// What happens when the pending task fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Bowl the next ball
    NextDelivery,
    /// Close the innings
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub kind: TimerKind,
    /// Absolute deadline on the frame clock (ms)
    pub due_at_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryClock {
    pending: Option<ScheduledTask>,
}

impl DeliveryClock {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule `kind` to fire `delay_ms` after `now_ms`, replacing any pending task
    pub fn arm(&mut self, kind: TimerKind, now_ms: f64, delay_ms: f64) {
        if let Some(old) = self.pending.replace(ScheduledTask {
            kind,
            due_at_ms: now_ms + delay_ms,
        }) {
            log::debug!("Cancelled pending {:?} timer", old.kind);
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&ScheduledTask> {
        self.pending.as_ref()
    }

    /// Take the pending task if its deadline has passed
    pub fn poll(&mut self, now_ms: f64) -> Option<TimerKind> {
        match self.pending {
            Some(task) if now_ms >= task.due_at_ms => {
                self.pending = None;
                Some(task.kind)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_deadline() {
        let mut clock = DeliveryClock::new();
        clock.arm(TimerKind::NextDelivery, 100.0, 1000.0);
        assert_eq!(clock.poll(1099.0), None);
        assert_eq!(clock.poll(1100.0), Some(TimerKind::NextDelivery));
        assert_eq!(clock.poll(5000.0), None);
    }

    #[test]
    fn test_rearm_replaces_pending() {
        let mut clock = DeliveryClock::new();
        clock.arm(TimerKind::NextDelivery, 0.0, 1000.0);
        clock.arm(TimerKind::GameOver, 500.0, 1000.0);
        assert_eq!(clock.poll(1000.0), None);
        assert_eq!(clock.poll(1500.0), Some(TimerKind::GameOver));
        assert!(clock.pending().is_none());
    }

    #[test]
    fn test_cancel() {
        let mut clock = DeliveryClock::new();
        clock.arm(TimerKind::GameOver, 0.0, 10.0);
        clock.cancel();
        assert_eq!(clock.poll(100.0), None);
    }
}
