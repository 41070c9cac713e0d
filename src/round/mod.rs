//! Round controller
//!
//! Owns the round timer and the terminal outcome. The first terminal
//! condition wins and every later one is ignored; a finished round can
//! only leave the Over phase through an explicit reset.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::types::Side;

/// Round lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    PreMatch,
    Active,
    Paused,
    Over,
}

/// How the round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(side) => write!(f, "{side} wins!"),
            Outcome::Draw => write!(f, "Draw!"),
        }
    }
}

/// Timer, pause flag, and terminal outcome for one round
#[derive(Debug, Clone)]
pub struct RoundState {
    pub phase: RoundPhase,
    /// Seconds left on the round clock
    pub remaining: f32,
    pub outcome: Option<Outcome>,
    duration: f32,
}

impl RoundState {
    pub fn new(duration: f32) -> Self {
        Self {
            phase: RoundPhase::PreMatch,
            remaining: duration,
            outcome: None,
            duration,
        }
    }

    /// Begin the round; only meaningful from PreMatch
    pub fn start(&mut self) {
        if self.phase == RoundPhase::PreMatch {
            self.phase = RoundPhase::Active;
            info!("round started, {}s on the clock", self.duration);
        }
    }

    /// Simulation advances only in this phase
    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::Over
    }

    /// Flip between Active and Paused; no-op in any other phase
    pub fn toggle_pause(&mut self) {
        match self.phase {
            RoundPhase::Active => {
                self.phase = RoundPhase::Paused;
                info!("round paused");
            }
            RoundPhase::Paused => {
                self.phase = RoundPhase::Active;
                info!("round resumed");
            }
            _ => {}
        }
    }

    /// A hit just brought a fighter to zero health
    ///
    /// Called synchronously from hit resolution. Ignored unless the round
    /// is still Active, which makes the first knockout final.
    pub fn record_knockout(&mut self, winner: Side) {
        if self.phase != RoundPhase::Active {
            return;
        }
        self.phase = RoundPhase::Over;
        self.outcome = Some(Outcome::Winner(winner));
        info!(winner = %winner, "round over by knockout");
    }

    /// Run the round clock down; on timeout the higher health wins
    pub fn advance_timer(&mut self, dt: f32, health_a: f32, health_b: f32) {
        if self.phase != RoundPhase::Active {
            return;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        if self.remaining > 0.0 {
            return;
        }

        self.phase = RoundPhase::Over;
        let outcome = if health_a > health_b {
            Outcome::Winner(Side::A)
        } else if health_b > health_a {
            Outcome::Winner(Side::B)
        } else {
            Outcome::Draw
        };
        self.outcome = Some(outcome);
        info!(%outcome, "round over by timeout");
    }

    /// Abort whatever is happening and rearm for a fresh round
    ///
    /// Lands directly in Active; the match host decides when to call it.
    pub fn reset(&mut self) {
        self.phase = RoundPhase::Active;
        self.remaining = self.duration;
        self.outcome = None;
        info!("round reset");
    }
}
