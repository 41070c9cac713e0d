//! Simulation tuning configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Defaults are calibrated against
//! a 60 fps frame budget (one frame = 16.7 ms); all durations are seconds
//! and all distances pixels, so the simulation stays stable under a
//! variable dt.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{DuelError, Result};
use crate::core::types::Vec2;

/// Arena geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Playable width in pixels; walls clamp fighter and projectile x
    pub width: f32,
    /// Visible height in pixels (only referenced by renderers)
    pub height: f32,
    /// Y coordinate of the floor line (y grows downward)
    pub floor_y: f32,
    /// Start-of-round x position for fighter A
    pub spawn_a_x: f32,
    /// Start-of-round x position for fighter B
    pub spawn_b_x: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 480.0,
            floor_y: 400.0,
            spawn_a_x: 200.0,
            spawn_b_x: 600.0,
        }
    }
}

/// Movement and integration constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration in px/s^2
    ///
    /// 2160 is the 60 fps equivalent of 0.6 px/frame^2, which gives a
    /// jump arc of roughly a third of a second to apex.
    pub gravity: f32,

    /// Horizontal acceleration while grounded (px/s^2)
    ///
    /// High enough that a fighter reaches the ground speed cap in about
    /// a tenth of a second; walking should feel immediate, not floaty.
    pub ground_accel: f32,

    /// Horizontal acceleration while airborne (px/s^2)
    ///
    /// Lower than ground_accel so air control exists but a jump commits
    /// the fighter to most of its arc.
    pub air_accel: f32,

    /// Horizontal speed cap while grounded (px/s)
    pub ground_speed_cap: f32,

    /// Horizontal speed cap while airborne (px/s)
    pub air_speed_cap: f32,

    /// Exponential damping rate applied to vx while grounded (1/s)
    ///
    /// At 8.0, a knockback impulse bleeds off in roughly half a second
    /// of ground contact. Applied as vx *= max(0, 1 - rate * dt).
    pub ground_damping: f32,

    /// Exponential damping rate applied to vx while airborne (1/s)
    ///
    /// Much lower than ground damping so knockback carries through the
    /// air instead of dying instantly.
    pub air_damping: f32,

    /// Upward launch speed on jump (px/s)
    pub jump_speed: f32,

    /// Upper bound on a single simulation step (seconds)
    ///
    /// Steps are clamped here by the clock so a paused tab or debugger
    /// stop never produces one huge unstable integration step.
    pub max_dt: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 2160.0,
            ground_accel: 2400.0,
            air_accel: 1400.0,
            ground_speed_cap: 240.0,
            air_speed_cap: 300.0,
            ground_damping: 8.0,
            air_damping: 1.0,
            jump_speed: 720.0,
            max_dt: 1.0 / 30.0,
        }
    }
}

/// Per-fighter body constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterConfig {
    /// Health at round start; damage clamps into [0, max_health]
    pub max_health: f32,
    /// Half-width of the collision box (px)
    pub half_width: f32,
    /// Half-height of the collision box (px)
    pub half_height: f32,
}

impl Default for FighterConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            half_width: 32.0,
            half_height: 32.0,
        }
    }
}

/// Melee arc tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeConfig {
    /// Damage per connected swing
    pub damage: f32,
    /// Knockback impulse (px/s); x is along facing, y negative is upward
    pub knockback: Vec2,
    /// Hit-stun inflicted on the target (seconds)
    pub stun: f32,
    /// Re-trigger cooldown (seconds)
    pub cooldown: f32,
    /// Hitbox lifetime (seconds); a few ticks, the arc is instantaneous
    pub lifetime: f32,
    /// Hitbox half-width (px), extends from the fighter's facing edge
    pub reach: f32,
    /// Hitbox half-height (px), covers the upper body
    pub half_height: f32,
    /// How long the attacking animation holds the fighter (seconds)
    pub active: f32,
    /// Impact freeze applied to the attacker on throw (seconds)
    ///
    /// A short self hit-stop sells the swing's weight without giving the
    /// defender a frame advantage.
    pub self_hit_stop: f32,
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            damage: 15.0,
            knockback: Vec2::new(360.0, -360.0),
            stun: 0.33,
            cooldown: 0.5,
            lifetime: 0.05,
            reach: 12.0,
            half_height: 16.0,
            active: 0.25,
            self_hit_stop: 0.04,
        }
    }
}

/// Projectile tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RangedConfig {
    /// Damage per projectile hit
    pub damage: f32,
    /// Knockback impulse (px/s); smaller than melee by design intent
    pub knockback: Vec2,
    /// Hit-stun inflicted on the target (seconds)
    pub stun: f32,
    /// Re-trigger cooldown (seconds); the longest of the two attacks
    pub cooldown: f32,
    /// Time before the projectile fizzles on its own (seconds)
    pub lifetime: f32,
    /// Horizontal travel speed (px/s), sign applied from facing
    pub speed: f32,
    /// Small downward drift (px/s); keeps long shots from flying forever
    pub drift: f32,
    /// Projectile half-extent (px), square box
    pub half_size: f32,
    /// How long the attacking animation holds the fighter (seconds)
    pub active: f32,
}

impl Default for RangedConfig {
    fn default() -> Self {
        Self {
            damage: 20.0,
            knockback: Vec2::new(240.0, -180.0),
            stun: 0.33,
            cooldown: 1.0,
            lifetime: 1.5,
            speed: 360.0,
            drift: 20.0,
            half_size: 8.0,
            active: 0.3,
        }
    }
}

/// Dash tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Horizontal burst speed (px/s), applied along facing
    pub speed: f32,
    /// Re-trigger cooldown (seconds); longest of the three moves
    pub cooldown: f32,
    /// Whether the dash spawns a contact hitbox over the fighter's
    /// footprint. With false the dash is pure repositioning.
    pub contact_damage: bool,
    /// Contact damage when contact_damage is on
    pub damage: f32,
    /// Contact knockback (px/s)
    pub knockback: Vec2,
    /// Contact hit-stun (seconds)
    pub stun: f32,
    /// Contact hitbox lifetime (seconds)
    pub lifetime: f32,
    /// How long the dash animation holds the fighter (seconds)
    pub active: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            speed: 720.0,
            cooldown: 1.5,
            contact_damage: true,
            damage: 10.0,
            knockback: Vec2::new(420.0, -120.0),
            stun: 0.25,
            lifetime: 0.1,
            active: 0.25,
        }
    }
}

/// Hit reaction and combo-limiting constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StunConfig {
    /// Impact freeze on receiving a hit (seconds)
    ///
    /// Freezes physics integration but not timer decay, which is what
    /// distinguishes it from hit-stun.
    pub hit_stop: f32,

    /// Invulnerability granted after every hit (seconds)
    ///
    /// Short grace so a single melee arc cannot connect on consecutive
    /// ticks of its lifetime.
    pub per_hit_invuln: f32,

    /// Invulnerability granted when the combo threshold is reached
    ///
    /// The "mercy" window; long enough to escape a corner loop.
    pub mercy_invuln: f32,

    /// Time after a hit during which further hits extend the combo
    pub combo_window: f32,

    /// Consecutive hits that trigger the mercy window
    pub combo_threshold: u32,
}

impl Default for StunConfig {
    fn default() -> Self {
        Self {
            hit_stop: 0.08,
            per_hit_invuln: 0.25,
            mercy_invuln: 1.0,
            combo_window: 1.2,
            combo_threshold: 4,
        }
    }
}

/// Round timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Round length in seconds; timeout compares remaining health
    pub duration: f32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self { duration: 60.0 }
    }
}

/// Lenient-tier controller tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LenientAiConfig {
    /// Lower bound of the re-rolled decision delay (seconds)
    pub delay_min: f32,
    /// Upper bound of the re-rolled decision delay (seconds)
    pub delay_max: f32,
    /// Decision weight: attempt melee
    pub weight_melee: f32,
    /// Decision weight: attempt ranged
    pub weight_ranged: f32,
    /// Decision weight: drift toward/away from the opponent
    pub weight_reposition: f32,
    /// Decision weight: jump if grounded
    pub weight_jump: f32,
    /// Distance the controller tries to keep when repositioning (px)
    pub preferred_range: f32,
}

impl Default for LenientAiConfig {
    fn default() -> Self {
        Self {
            delay_min: 0.4,
            delay_max: 1.2,
            // melee > ranged > reposition > jump
            weight_melee: 4.0,
            weight_ranged: 3.0,
            weight_reposition: 2.0,
            weight_jump: 1.0,
            preferred_range: 140.0,
        }
    }
}

/// Aggressive-tier controller tuning
///
/// Rates are expressed per second and rolled as rate * dt each tick, so
/// the tier behaves the same under a variable frame budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggressiveAiConfig {
    /// Horizontal distance beyond which the controller closes in (px)
    pub close_range: f32,
    /// Melee attempt rate while in range (1/s)
    pub melee_rate: f32,
    /// Ranged attempt rate while in range (1/s)
    pub ranged_rate: f32,
    /// Dash attempt rate while in range (1/s)
    pub dash_rate: f32,
    /// Jump rate while grounded, rolled independently (1/s)
    pub jump_rate: f32,
}

impl Default for AggressiveAiConfig {
    fn default() -> Self {
        Self {
            close_range: 110.0,
            melee_rate: 1.8,
            ranged_rate: 1.2,
            dash_rate: 0.6,
            jump_rate: 0.6,
        }
    }
}

/// Scripted-opponent tuning for both tiers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub lenient: LenientAiConfig,
    pub aggressive: AggressiveAiConfig,
}

/// Complete tuning surface for one match
///
/// These values have been tuned to reproduce the feel of the reference
/// build; changing them changes pacing, not correctness.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub arena: ArenaConfig,
    pub physics: PhysicsConfig,
    pub fighter: FighterConfig,
    pub melee: MeleeConfig,
    pub ranged: RangedConfig,
    pub dash: DashConfig,
    pub stun: StunConfig,
    pub round: RoundConfig,
    pub ai: AiConfig,
}

impl TuningConfig {
    /// Parse a config from a TOML string; absent keys keep defaults
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: TuningConfig = toml::from_str(input)?;
        config.validate().map_err(DuelError::Config)?;
        Ok(config)
    }

    /// Load and validate a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.arena.floor_y <= 0.0 || self.arena.floor_y > self.arena.height {
            return Err(format!(
                "floor_y ({}) must lie inside the arena height ({})",
                self.arena.floor_y, self.arena.height
            ));
        }

        if self.arena.spawn_a_x == self.arena.spawn_b_x {
            return Err("fighters cannot share a spawn position".into());
        }

        if self.physics.max_dt <= 0.0 {
            return Err("max_dt must be positive".into());
        }

        if self.physics.ground_speed_cap <= 0.0 || self.physics.air_speed_cap <= 0.0 {
            return Err("speed caps must be positive".into());
        }

        if self.fighter.max_health <= 0.0 {
            return Err("max_health must be positive".into());
        }

        if self.stun.combo_threshold < 2 {
            return Err(format!(
                "combo_threshold ({}) below 2 would grant mercy on every hit",
                self.stun.combo_threshold
            ));
        }

        if self.ai.lenient.delay_min > self.ai.lenient.delay_max {
            return Err(format!(
                "lenient delay_min ({}) must be <= delay_max ({})",
                self.ai.lenient.delay_min, self.ai.lenient.delay_max
            ));
        }

        Ok(())
    }
}
