//! Attack records and hitbox geometry
//!
//! One tagged record covers every attack kind. Melee arcs are stationary
//! boxes that live a few ticks; projectiles carry their own velocity and
//! survive until they expire, leave the arena, or land a hit. An attack
//! holds only its owner's [`Side`], never the fighter itself - attacks are
//! owned by the world's live collection and must not outlive a round.

pub mod resolution;

use serde::{Deserialize, Serialize};

use crate::core::config::ArenaConfig;
use crate::core::types::{AttackId, Side, Vec2};

/// Attack kind tag; kind-specific behavior keys off this
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackKind {
    Melee,
    Projectile,
}

/// Axis-aligned box, center plus half-extents, y growing downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    /// Strict-overlap test; touching edges do not count as a hit
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// A live hitbox in the world's attack collection
#[derive(Debug, Clone)]
pub struct Attack {
    pub id: AttackId,
    /// Non-owning back-reference, resolves "whose attack" and attributes wins
    pub owner: Side,
    pub kind: AttackKind,
    pub position: Vec2,
    pub half_extents: Vec2,
    pub damage: f32,
    /// Impulse added to the target's velocity; signs baked in at spawn
    pub knockback: Vec2,
    /// Hit-stun inflicted on the target (seconds)
    pub stun: f32,
    /// Remaining time before natural expiry (seconds)
    pub lifetime: f32,
    /// Self-motion; zero for melee arcs
    pub velocity: Vec2,
    /// Piercing attacks survive resolved hits until natural expiry
    pub pierce: bool,
    /// Dead attacks stay in the collection until end of tick, but are
    /// skipped by collision testing
    pub alive: bool,
}

impl Attack {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.half_extents)
    }

    /// Advance lifetime and (for projectiles) position by one step
    ///
    /// Marks the attack dead on expiry, on leaving the arena walls, or on
    /// touching the floor. Does not remove it from the collection.
    pub fn advance(&mut self, dt: f32, arena: &ArenaConfig) {
        if !self.alive {
            return;
        }

        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.alive = false;
            return;
        }

        if self.kind == AttackKind::Projectile {
            self.position += self.velocity * dt;
            let aabb = self.aabb();
            if aabb.right() < 0.0 || aabb.left() > arena.width || aabb.bottom() >= arena.floor_y {
                self.alive = false;
            }
        }
    }
}
