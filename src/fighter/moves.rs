//! Intent resolution and move generation
//!
//! All control paths, human and scripted, land in [`Fighter::apply_intent`].
//! Cooldown gating lives here, so no controller can bypass it; triggering
//! a move that is still cooling down is a silent no-op.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attack::{Attack, AttackKind};
use crate::core::config::TuningConfig;
use crate::core::types::{AttackId, Facing, Vec2};
use crate::fighter::Fighter;
use crate::input::Intent;

/// The three triggerable moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Melee,
    Ranged,
    Dash,
}

impl Fighter {
    /// Phase 3 of the tick: resolve one intent into movement and moves
    ///
    /// The world skips this while the fighter is stunned. New attacks are
    /// appended to `attacks` in trigger order, which fixes their
    /// resolution order for the rest of the round.
    pub fn apply_intent(
        &mut self,
        intent: &Intent,
        opponent_x: f32,
        config: &TuningConfig,
        attacks: &mut Vec<Attack>,
    ) {
        // Auto-face the opponent, but an active attack keeps its
        // committed direction
        if self.attack_anim.is_none() {
            self.facing = Facing::toward(self.position.x, opponent_x);
        }

        self.move_dir = intent.move_dir.clamp(-1.0, 1.0);

        if intent.jump && self.on_ground {
            self.velocity.y = -config.physics.jump_speed;
            self.on_ground = false;
        }

        if intent.melee && self.cooldowns.melee == 0.0 {
            self.trigger_melee(config, attacks);
        }
        if intent.ranged && self.cooldowns.ranged == 0.0 {
            self.trigger_ranged(config, attacks);
        }
        if intent.dash && self.cooldowns.dash == 0.0 {
            self.trigger_dash(config, attacks);
        }
    }

    /// Instantaneous arc adjacent to the facing edge, upper body height
    fn trigger_melee(&mut self, config: &TuningConfig, attacks: &mut Vec<Attack>) {
        let melee = &config.melee;
        let sign = self.facing.sign();

        let attack = Attack {
            id: AttackId::new(),
            owner: self.side,
            kind: AttackKind::Melee,
            position: Vec2::new(
                self.position.x + sign * (self.half_extents.x + melee.reach),
                self.position.y - self.half_extents.y / 2.0,
            ),
            half_extents: Vec2::new(melee.reach, melee.half_height),
            damage: melee.damage,
            knockback: Vec2::new(sign * melee.knockback.x, melee.knockback.y),
            stun: melee.stun,
            lifetime: melee.lifetime,
            velocity: Vec2::default(),
            pierce: false,
            alive: true,
        };
        debug!(side = %self.side, id = ?attack.id, "melee arc spawned");
        attacks.push(attack);

        self.cooldowns.melee = melee.cooldown;
        // Brief self-freeze sells the swing
        self.status.hit_stop = self.status.hit_stop.max(melee.self_hit_stop);
        self.attack_anim = Some(MoveKind::Melee);
        self.attack_timer = melee.active;
    }

    /// Projectile launched from chest height in the facing direction
    fn trigger_ranged(&mut self, config: &TuningConfig, attacks: &mut Vec<Attack>) {
        let ranged = &config.ranged;
        let sign = self.facing.sign();

        let attack = Attack {
            id: AttackId::new(),
            owner: self.side,
            kind: AttackKind::Projectile,
            position: Vec2::new(
                self.position.x + sign * self.half_extents.x,
                self.position.y - self.half_extents.y / 2.0,
            ),
            half_extents: Vec2::new(ranged.half_size, ranged.half_size),
            damage: ranged.damage,
            knockback: Vec2::new(sign * ranged.knockback.x, ranged.knockback.y),
            stun: ranged.stun,
            lifetime: ranged.lifetime,
            velocity: Vec2::new(sign * ranged.speed, ranged.drift),
            pierce: false,
            alive: true,
        };
        debug!(side = %self.side, id = ?attack.id, "projectile launched");
        attacks.push(attack);

        self.cooldowns.ranged = ranged.cooldown;
        self.attack_anim = Some(MoveKind::Ranged);
        self.attack_timer = ranged.active;
    }

    /// Horizontal burst; contact hitbox only when configured
    fn trigger_dash(&mut self, config: &TuningConfig, attacks: &mut Vec<Attack>) {
        let dash = &config.dash;
        let sign = self.facing.sign();

        self.velocity.x = sign * dash.speed;

        if dash.contact_damage {
            let attack = Attack {
                id: AttackId::new(),
                owner: self.side,
                kind: AttackKind::Melee,
                position: self.position,
                half_extents: self.half_extents,
                damage: dash.damage,
                knockback: Vec2::new(sign * dash.knockback.x, dash.knockback.y),
                stun: dash.stun,
                lifetime: dash.lifetime,
                velocity: Vec2::default(),
                pierce: false,
                alive: true,
            };
            debug!(side = %self.side, id = ?attack.id, "dash contact hitbox spawned");
            attacks.push(attack);
        }

        self.cooldowns.dash = dash.cooldown;
        self.attack_anim = Some(MoveKind::Dash);
        self.attack_timer = dash.active;
    }
}
