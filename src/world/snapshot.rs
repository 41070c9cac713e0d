//! Read-only snapshots for render/HUD collaborators
//!
//! A renderer consumes one snapshot per tick and never reaches back into
//! the simulation. Everything here is plain serializable data, so a host
//! can also dump frames as JSON for offline inspection.

use serde::{Deserialize, Serialize};

use crate::attack::AttackKind;
use crate::core::types::{Facing, Side, Vec2};
use crate::fighter::VisualState;
use crate::round::{Outcome, RoundPhase};
use crate::world::World;

/// What a renderer needs to draw one fighter and its health bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterSnapshot {
    pub side: Side,
    pub position: Vec2,
    pub half_extents: Vec2,
    pub facing: Facing,
    pub health: f32,
    pub max_health: f32,
    pub visual: VisualState,
    /// Renderers typically flicker the sprite while this holds
    pub invulnerable: bool,
}

/// What a renderer needs to draw one live hitbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackSnapshot {
    pub kind: AttackKind,
    pub position: Vec2,
    pub half_extents: Vec2,
}

/// What the HUD needs: clock, pause flag, and the outcome banner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub remaining: f32,
    pub paused: bool,
    /// Outcome banner text, present only once the round is over
    pub banner: Option<String>,
}

/// One frame's complete display state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub fighters: [FighterSnapshot; 2],
    pub attacks: Vec<AttackSnapshot>,
    pub round: RoundSnapshot,
}

impl World {
    /// Capture the current display state
    pub fn snapshot(&self) -> WorldSnapshot {
        let fighters = [
            snapshot_fighter(self, Side::A),
            snapshot_fighter(self, Side::B),
        ];
        let attacks = self
            .attacks
            .iter()
            .filter(|attack| attack.alive)
            .map(|attack| AttackSnapshot {
                kind: attack.kind,
                position: attack.position,
                half_extents: attack.half_extents,
            })
            .collect();
        let round = RoundSnapshot {
            remaining: self.round.remaining,
            paused: self.round.phase == RoundPhase::Paused,
            banner: self.round.outcome.map(|outcome: Outcome| outcome.to_string()),
        };
        WorldSnapshot {
            fighters,
            attacks,
            round,
        }
    }
}

fn snapshot_fighter(world: &World, side: Side) -> FighterSnapshot {
    let fighter = world.fighter(side);
    FighterSnapshot {
        side,
        position: fighter.position,
        half_extents: fighter.half_extents,
        facing: fighter.facing,
        health: fighter.health,
        max_health: world.config.fighter.max_health,
        visual: fighter.visual_state(),
        invulnerable: fighter.is_invulnerable(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TuningConfig;
    use crate::input::Action;

    #[test]
    fn test_snapshot_reflects_world() {
        let mut world = World::new(TuningConfig::default()).unwrap();
        world.start();
        world.input_mut(Side::A).press(Action::Ranged);
        world.step(1.0 / 60.0);

        let snap = world.snapshot();
        assert_eq!(snap.fighters[0].side, Side::A);
        assert_eq!(snap.fighters[0].visual, crate::fighter::VisualState::Ranged);
        assert_eq!(snap.attacks.len(), 1);
        assert_eq!(snap.attacks[0].kind, AttackKind::Projectile);
        assert!(snap.round.banner.is_none());
        assert!(!snap.round.paused);
    }

    #[test]
    fn test_outcome_banner_after_knockout() {
        let mut world = World::new(TuningConfig::default()).unwrap();
        world.start();
        world.round.record_knockout(Side::B);
        let snap = world.snapshot();
        assert_eq!(snap.round.banner.as_deref(), Some("B wins!"));
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut world = World::new(TuningConfig::default()).unwrap();
        world.start();
        world.step(1.0 / 60.0);
        let json = serde_json::to_string(&world.snapshot()).unwrap();
        assert!(json.contains("\"health\":100.0"));
    }
}
