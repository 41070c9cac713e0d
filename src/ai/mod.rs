//! Scripted opponent controller
//!
//! Stands in for a human input source on one fighter. Decisions come out
//! as an [`Intent`] and flow through the same fighter entry point as
//! keyboard input, so the controller is bound by the same cooldowns and
//! state transitions. Randomness comes from a seedable ChaCha8 stream so
//! a match can be replayed in tests.
//!
//! State across ticks is deliberately tiny: a retrigger countdown and the
//! currently chosen drift direction. Everything else is re-derived from
//! the fighters each tick.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::AiConfig;
use crate::fighter::Fighter;
use crate::input::Intent;

/// Difficulty tier for the scripted controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiTier {
    /// Acts only on a randomized timer, weighted toward melee
    Lenient,
    /// Closes distance every tick and attacks whenever in range
    Aggressive,
}

/// One fighter's scripted brain
pub struct ScriptedController {
    tier: AiTier,
    rng: ChaCha8Rng,
    /// Lenient tier: seconds until the next decision
    retrigger: f32,
    /// Lenient tier: drift direction held between decisions
    drift: f32,
}

impl ScriptedController {
    /// Create with a fixed default seed (deterministic for testing)
    pub fn new(tier: AiTier) -> Self {
        Self::with_seed(tier, 42)
    }

    /// Create with a specific RNG seed for reproducible behavior
    pub fn with_seed(tier: AiTier, seed: u64) -> Self {
        Self {
            tier,
            rng: ChaCha8Rng::seed_from_u64(seed),
            retrigger: 0.0,
            drift: 0.0,
        }
    }

    pub fn tier(&self) -> AiTier {
        self.tier
    }

    /// Decide this tick's intent for the controlled fighter
    ///
    /// A stunned or impact-frozen fighter gets a neutral intent; the
    /// controller does not queue decisions for later.
    pub fn decide(&mut self, me: &Fighter, foe: &Fighter, dt: f32, config: &AiConfig) -> Intent {
        if me.is_stunned() || me.in_hit_stop() {
            return Intent::default();
        }

        match self.tier {
            AiTier::Lenient => self.decide_lenient(me, foe, dt, config),
            AiTier::Aggressive => self.decide_aggressive(me, foe, dt, config),
        }
    }

    fn decide_lenient(
        &mut self,
        me: &Fighter,
        foe: &Fighter,
        dt: f32,
        config: &AiConfig,
    ) -> Intent {
        let lenient = &config.lenient;
        let mut intent = Intent {
            move_dir: self.drift,
            ..Intent::default()
        };

        self.retrigger -= dt;
        if self.retrigger > 0.0 {
            return intent;
        }
        self.retrigger = self.rng.gen_range(lenient.delay_min..=lenient.delay_max);

        let total = lenient.weight_melee
            + lenient.weight_ranged
            + lenient.weight_reposition
            + lenient.weight_jump;
        let roll = self.rng.gen::<f32>() * total;

        if roll < lenient.weight_melee {
            self.drift = 0.0;
            intent.move_dir = 0.0;
            intent.melee = true;
        } else if roll < lenient.weight_melee + lenient.weight_ranged {
            self.drift = 0.0;
            intent.move_dir = 0.0;
            intent.ranged = true;
        } else if roll < lenient.weight_melee + lenient.weight_ranged + lenient.weight_reposition {
            // Close in when far, back off when crowded
            let dx = foe.position.x - me.position.x;
            let toward = if dx < 0.0 { -1.0 } else { 1.0 };
            self.drift = if dx.abs() > lenient.preferred_range {
                toward
            } else {
                -toward
            };
            intent.move_dir = self.drift;
        } else if me.on_ground {
            intent.jump = true;
        }

        intent
    }

    fn decide_aggressive(
        &mut self,
        me: &Fighter,
        foe: &Fighter,
        dt: f32,
        config: &AiConfig,
    ) -> Intent {
        let aggressive = &config.aggressive;
        let mut intent = Intent::default();

        let dx = foe.position.x - me.position.x;
        if dx.abs() > aggressive.close_range {
            intent.move_dir = if dx < 0.0 { -1.0 } else { 1.0 };
        } else {
            intent.melee = self.roll(aggressive.melee_rate * dt);
            intent.ranged = self.roll(aggressive.ranged_rate * dt);
            intent.dash = self.roll(aggressive.dash_rate * dt);
        }

        // Independent of range, ape the original's random hops
        if me.on_ground && self.roll(aggressive.jump_rate * dt) {
            intent.jump = true;
        }

        intent
    }

    fn roll(&mut self, probability: f32) -> bool {
        self.rng.gen::<f32>() < probability
    }
}
