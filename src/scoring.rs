//! Score, goal and high score bookkeeping.

use crate::obstacles::{ObstacleId, PipePair};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    /// Zones passed this life.
    pub score: u32,
    /// Best score seen by this process, seeded from storage at startup.
    pub high_score: u32,
    pub goal: Option<u32>,
    /// Set once per life when `score` first reaches `goal`.
    pub goal_reached: bool,
}

impl Scoreboard {
    pub fn new(high_score: u32, goal: Option<u32>) -> Self {
        Self {
            score: 0,
            high_score,
            goal,
            goal_reached: false,
        }
    }

    /// Mark every unpassed zone the player is now strictly right of and
    /// count it. Returns the ids scored this call.
    pub fn check_zones(&mut self, pipes: &mut [PipePair], player_x: f64) -> Vec<ObstacleId> {
        let mut scored = Vec::new();
        for pipe in pipes.iter_mut() {
            if !pipe.zone.passed && pipe.zone.x < player_x {
                pipe.zone.passed = true;
                self.score += 1;
                scored.push(pipe.id);
            }
        }
        scored
    }

    /// True exactly once per life, on the call where the goal is first met.
    pub fn take_goal(&mut self) -> bool {
        match self.goal {
            Some(goal) if !self.goal_reached && self.score >= goal => {
                self.goal_reached = true;
                true
            }
            _ => false,
        }
    }

    /// Called at the death transition. Raises the high score only when the
    /// current score is strictly greater; returns the previous value if so.
    pub fn settle_high_score(&mut self) -> Option<u32> {
        if self.score > self.high_score {
            let previous = self.high_score;
            self.high_score = self.score;
            Some(previous)
        } else {
            None
        }
    }

    /// New life: score back to zero, high score kept.
    pub fn reset(&mut self) {
        self.score = 0;
        self.goal_reached = false;
    }
}
