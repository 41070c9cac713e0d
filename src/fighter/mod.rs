//! Fighter state and hit reception
//!
//! A fighter owns its position, velocity, health, facing, per-move
//! cooldowns, and the four status timers. Locomotion state is derived,
//! not stored: hit-stun, an active attack animation, ground contact, and
//! horizontal speed fully determine it, so it can never disagree with the
//! physical state. Invulnerability is a modifier on top of whatever state
//! the fighter is in, never a state of its own.
//!
//! Per-tick ordering is load-bearing for determinism:
//! timers -> intent -> physics -> collision. The world drives each phase;
//! this module provides them.

pub mod moves;
pub mod physics;

use serde::{Deserialize, Serialize};

use crate::attack::{Aabb, Attack};
use crate::core::config::{StunConfig, TuningConfig};
use crate::core::types::{Facing, Side, Vec2};
use crate::input::ControlSource;

pub use moves::MoveKind;

/// Remaining cooldown per move (seconds, clamped at zero)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Cooldowns {
    pub melee: f32,
    pub ranged: f32,
    pub dash: f32,
}

/// The four status timers (seconds, clamped at zero)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatusTimers {
    /// Forced loss of control after being hit
    pub hit_stun: f32,
    /// Impact freeze: physics stops, timers keep decaying
    pub hit_stop: f32,
    /// Incoming attacks are ignored while positive
    pub invulnerability: f32,
    /// Hits landed while positive extend the consecutive-hit counter
    pub combo_window: f32,
}

/// Derived locomotion/action state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FighterState {
    Idle,
    Move,
    Airborne,
    Attacking(MoveKind),
    Stunned,
}

/// Sprite-row selector for a renderer; mirrors the original's animation
/// states without implementing any drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualState {
    Idle,
    Walk,
    Jump,
    Melee,
    Ranged,
    Dash,
    Hit,
}

/// One of the two combatants
#[derive(Debug, Clone)]
pub struct Fighter {
    pub side: Side,
    pub control: ControlSource,
    /// Center of the collision box; y grows downward
    pub position: Vec2,
    pub velocity: Vec2,
    pub half_extents: Vec2,
    pub facing: Facing,
    pub health: f32,
    pub on_ground: bool,
    pub cooldowns: Cooldowns,
    pub status: StatusTimers,
    /// Consecutive hits taken inside the current combo window
    pub combo_hits: u32,
    /// Horizontal movement request resolved from this tick's intent,
    /// consumed by the physics phase
    pub(crate) move_dir: f32,
    /// Active attack animation, if any, and its remaining hold time
    pub(crate) attack_anim: Option<MoveKind>,
    pub(crate) attack_timer: f32,
}

impl Fighter {
    /// Spawn a fighter standing on the floor at the given x
    pub fn new(side: Side, control: ControlSource, spawn_x: f32, config: &TuningConfig) -> Self {
        let half_extents = Vec2::new(config.fighter.half_width, config.fighter.half_height);
        Self {
            side,
            control,
            position: Vec2::new(spawn_x, config.arena.floor_y - half_extents.y),
            velocity: Vec2::default(),
            half_extents,
            // Overwritten by the first intent phase's auto-face
            facing: Facing::Right,
            health: config.fighter.max_health,
            on_ground: true,
            cooldowns: Cooldowns::default(),
            status: StatusTimers::default(),
            combo_hits: 0,
            move_dir: 0.0,
            attack_anim: None,
            attack_timer: 0.0,
        }
    }

    /// Restore start-of-round state in place, keeping side and control
    pub fn reset(&mut self, spawn_x: f32, config: &TuningConfig) {
        *self = Fighter::new(self.side, self.control, spawn_x, config);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.half_extents)
    }

    /// Current derived state; stun dominates, then an active attack
    pub fn state(&self) -> FighterState {
        if self.status.hit_stun > 0.0 {
            FighterState::Stunned
        } else if let Some(kind) = self.attack_anim {
            FighterState::Attacking(kind)
        } else if !self.on_ground {
            FighterState::Airborne
        } else if self.move_dir != 0.0 || self.velocity.x.abs() > 1.0 {
            FighterState::Move
        } else {
            FighterState::Idle
        }
    }

    /// Sprite-facing view of [`state`](Self::state)
    pub fn visual_state(&self) -> VisualState {
        match self.state() {
            FighterState::Stunned => VisualState::Hit,
            FighterState::Attacking(MoveKind::Melee) => VisualState::Melee,
            FighterState::Attacking(MoveKind::Ranged) => VisualState::Ranged,
            FighterState::Attacking(MoveKind::Dash) => VisualState::Dash,
            FighterState::Airborne => VisualState::Jump,
            FighterState::Move => VisualState::Walk,
            FighterState::Idle => VisualState::Idle,
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.status.hit_stun > 0.0
    }

    pub fn in_hit_stop(&self) -> bool {
        self.status.hit_stop > 0.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.status.invulnerability > 0.0
    }

    /// Phase 1 of the tick: decay cooldowns and status timers
    ///
    /// The combo window resetting the consecutive-hit counter on expiry
    /// happens here, before any new hit can land this tick.
    pub fn tick_timers(&mut self, dt: f32) {
        self.cooldowns.melee = (self.cooldowns.melee - dt).max(0.0);
        self.cooldowns.ranged = (self.cooldowns.ranged - dt).max(0.0);
        self.cooldowns.dash = (self.cooldowns.dash - dt).max(0.0);

        self.status.hit_stun = (self.status.hit_stun - dt).max(0.0);
        self.status.hit_stop = (self.status.hit_stop - dt).max(0.0);
        self.status.invulnerability = (self.status.invulnerability - dt).max(0.0);

        if self.status.combo_window > 0.0 {
            self.status.combo_window = (self.status.combo_window - dt).max(0.0);
            if self.status.combo_window == 0.0 {
                self.combo_hits = 0;
            }
        }

        if self.attack_timer > 0.0 {
            self.attack_timer = (self.attack_timer - dt).max(0.0);
            if self.attack_timer == 0.0 {
                self.attack_anim = None;
            }
        }
    }

    /// Apply a connecting attack's full effect
    ///
    /// The caller has already checked liveness, overlap, invulnerability,
    /// and hit-stop. Returns true when this hit brought health to zero.
    pub fn receive_hit(&mut self, attack: &Attack, stun: &StunConfig, max_health: f32) -> bool {
        self.health = (self.health - attack.damage).clamp(0.0, max_health);

        // Stuns refresh to the longer of the two, never stack
        self.status.hit_stun = self.status.hit_stun.max(attack.stun);
        self.status.hit_stop = stun.hit_stop;
        self.velocity += attack.knockback;

        // Being hit interrupts whatever the fighter was winding up
        self.attack_anim = None;
        self.attack_timer = 0.0;

        self.combo_hits += 1;
        if self.combo_hits >= stun.combo_threshold {
            // Mercy window: the combo is force-ended
            self.status.invulnerability = self.status.invulnerability.max(stun.mercy_invuln);
            self.combo_hits = 0;
            self.status.combo_window = 0.0;
        } else {
            self.status.invulnerability = self.status.invulnerability.max(stun.per_hit_invuln);
            self.status.combo_window = stun.combo_window;
        }

        self.health == 0.0
    }
}
