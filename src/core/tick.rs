//! Events produced by one simulation step.
//!
//! The session never touches renderer, audio or storage. It reports what
//! happened here and the driver (or any host) turns that into side effects.

use crate::obstacles::ObstacleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Obstacle(ObstacleId),
    Floor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// Idle -> Flying.
    Started,
    Flapped,
    /// Dead -> Idle. Score reset, pipes cleared.
    Restarted,
    Spawned { id: ObstacleId, gap_center: f64 },
    Retired { id: ObstacleId },
    Scored { id: ObstacleId, score: u32 },
    GoalReached { score: u32 },
    /// Flying -> Dead. Fires at most once per life.
    Died { cause: DeathCause, score: u32 },
    NewHighScore { previous: u32, high_score: u32 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Events in the order they happened.
    pub events: Vec<TickEvent>,
    /// The high score rose at a death this step and should be persisted.
    /// The host owns the actual write.
    pub high_score_changed: bool,
}

impl TickResult {
    pub fn died(&self) -> Option<DeathCause> {
        self.events.iter().find_map(|e| match e {
            TickEvent::Died { cause, .. } => Some(*cause),
            _ => None,
        })
    }

    pub fn points_scored(&self) -> u32 {
        self.events
            .iter()
            .filter(|e| matches!(e, TickEvent::Scored { .. }))
            .count() as u32
    }
}
