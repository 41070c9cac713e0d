//! Hitbox-vs-fighter collision resolution
//!
//! Runs once per tick over a stable snapshot of the live collection:
//! attacks are tested in creation order, dead ones are only marked here
//! and purged by the world at end of tick. Each attack checks the
//! target's invulnerability and hit-stop at the moment it is processed,
//! so the grace granted by the first resolved hit suppresses a second
//! attack landing in the same tick. That ordering is part of the game's
//! rules, not an accident.

use tracing::debug;

use crate::attack::Attack;
use crate::core::config::TuningConfig;
use crate::fighter::Fighter;
use crate::round::RoundState;

/// Resolve every live attack against the fighter it does not own
///
/// Applies damage, stun, hit-stop, knockback, and combo accounting, and
/// reports knockouts to the round controller synchronously within the
/// resolution that caused them.
pub fn resolve_attacks(
    attacks: &mut [Attack],
    fighters: &mut [Fighter; 2],
    round: &mut RoundState,
    config: &TuningConfig,
) {
    for attack in attacks.iter_mut() {
        if !attack.alive {
            continue;
        }

        let target = &mut fighters[attack.owner.opponent().index()];
        if target.is_invulnerable() || target.in_hit_stop() {
            continue;
        }
        if !attack.aabb().overlaps(&target.aabb()) {
            continue;
        }

        let knocked_out =
            target.receive_hit(attack, &config.stun, config.fighter.max_health);
        debug!(
            attacker = %attack.owner,
            target = %target.side,
            damage = attack.damage,
            health = target.health,
            "hit resolved"
        );

        if knocked_out {
            round.record_knockout(attack.owner);
        }

        if !attack.pierce {
            attack.alive = false;
        }
    }
}
