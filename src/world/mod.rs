//! The match world
//!
//! One value owns everything a round touches: both fighters, the live
//! attack collection, the round state, the tuning config, and the
//! scripted controllers. There are no ambient globals; hosts hold a
//! `World` and call [`World::step`] once per frame with a bounded dt.
//!
//! A tick always runs its full sequence to completion:
//! timers -> intent -> physics -> attack advance -> resolution -> purge
//! -> round clock. Pause is handled by not stepping at all, never by
//! stopping half-way.

pub mod snapshot;

use tracing::debug;

use crate::ai::{AiTier, ScriptedController};
use crate::attack::resolution::resolve_attacks;
use crate::attack::Attack;
use crate::core::config::TuningConfig;
use crate::core::error::{DuelError, Result};
use crate::core::types::{Side, Tick};
use crate::fighter::Fighter;
use crate::input::{ControlSource, InputFrame, Intent};
use crate::round::RoundState;

/// A complete two-fighter match
pub struct World {
    pub config: TuningConfig,
    pub fighters: [Fighter; 2],
    pub attacks: Vec<Attack>,
    pub round: RoundState,
    pub current_tick: Tick,
    inputs: [InputFrame; 2],
    controllers: [Option<ScriptedController>; 2],
}

impl World {
    /// Build a world with both fighters human-controlled at their spawns
    pub fn new(config: TuningConfig) -> Result<Self> {
        config.validate().map_err(DuelError::Config)?;
        let fighters = [
            Fighter::new(Side::A, ControlSource::Human, config.arena.spawn_a_x, &config),
            Fighter::new(Side::B, ControlSource::Human, config.arena.spawn_b_x, &config),
        ];
        let round = RoundState::new(config.round.duration);
        Ok(Self {
            config,
            fighters,
            attacks: Vec::new(),
            round,
            current_tick: 0,
            inputs: [InputFrame::new(), InputFrame::new()],
            controllers: [None, None],
        })
    }

    /// Hand one side to a scripted controller with a reproducible seed
    pub fn set_scripted(&mut self, side: Side, tier: AiTier, seed: u64) {
        self.fighters[side.index()].control = ControlSource::Scripted;
        self.controllers[side.index()] = Some(ScriptedController::with_seed(tier, seed));
    }

    /// Hand one side back to human input
    pub fn set_human(&mut self, side: Side) {
        self.fighters[side.index()].control = ControlSource::Human;
        self.controllers[side.index()] = None;
    }

    /// Host-side input frame for a human-controlled fighter
    pub fn input_mut(&mut self, side: Side) -> &mut InputFrame {
        &mut self.inputs[side.index()]
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        &self.fighters[side.index()]
    }

    /// Begin the round from pre-match
    pub fn start(&mut self) {
        self.round.start();
    }

    pub fn toggle_pause(&mut self) {
        self.round.toggle_pause();
    }

    /// Abort the current round and restore start-of-round state
    pub fn reset(&mut self) {
        let config = self.config.clone();
        self.fighters[0].reset(config.arena.spawn_a_x, &config);
        self.fighters[1].reset(config.arena.spawn_b_x, &config);
        self.attacks.clear();
        for input in &mut self.inputs {
            input.clear();
        }
        self.round.reset();
    }

    /// Advance the simulation by one bounded step
    ///
    /// No-op unless the round is Active: a paused or finished round
    /// consumes no input and decays no timers. The dt is defensively
    /// re-clamped even though the frame clock already bounds it.
    pub fn step(&mut self, dt: f32) {
        if !self.round.is_active() {
            return;
        }
        let dt = dt.clamp(0.0, self.config.physics.max_dt);
        self.current_tick += 1;

        // Phase 1: timer decay (hit-stop freezes physics, not timers)
        for fighter in &mut self.fighters {
            fighter.tick_timers(dt);
        }

        // Phase 2+3: resolve and apply intents; stunned fighters skip
        // both, leaving their pressed edges unconsumed
        let intents = self.collect_intents(dt);
        let opponent_x = [
            self.fighters[1].position.x,
            self.fighters[0].position.x,
        ];
        for (i, intent) in intents.iter().enumerate() {
            if let Some(intent) = intent {
                self.fighters[i].apply_intent(intent, opponent_x[i], &self.config, &mut self.attacks);
            }
        }

        // Phase 4: physics integration, frozen during hit-stop
        for fighter in &mut self.fighters {
            if !fighter.in_hit_stop() {
                fighter.integrate(dt, &self.config.physics, &self.config.arena);
            }
        }

        // Phase 5: advance lifetimes and projectile motion
        for attack in &mut self.attacks {
            attack.advance(dt, &self.config.arena);
        }

        // Phase 6: collision resolution over the stable snapshot
        resolve_attacks(
            &mut self.attacks,
            &mut self.fighters,
            &mut self.round,
            &self.config,
        );

        // Phase 7: purge, strictly after all testing is done
        let before = self.attacks.len();
        self.attacks.retain(|attack| attack.alive);
        if self.attacks.len() != before {
            debug!(purged = before - self.attacks.len(), "dead attacks purged");
        }

        // Phase 8: round clock and timeout outcome
        self.round
            .advance_timer(dt, self.fighters[0].health, self.fighters[1].health);
    }

    fn collect_intents(&mut self, dt: f32) -> [Option<Intent>; 2] {
        let mut intents = [None, None];
        for i in 0..2 {
            if self.fighters[i].is_stunned() {
                continue;
            }
            intents[i] = Some(match self.fighters[i].control {
                ControlSource::Human => Intent::from_input(&mut self.inputs[i]),
                ControlSource::Scripted => {
                    let foe = &self.fighters[1 - i];
                    let me = &self.fighters[i];
                    match self.controllers[i].as_mut() {
                        Some(controller) => controller.decide(me, foe, dt, &self.config.ai),
                        None => Intent::default(),
                    }
                }
            });
        }
        intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::input::Action;
    use crate::round::Outcome;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn started_world(config: TuningConfig) -> World {
        let mut world = World::new(config).unwrap();
        world.start();
        world
    }

    /// B moved adjacent to A's melee arc
    fn adjacent_world() -> World {
        let mut world = started_world(TuningConfig::default());
        let ax = world.fighters[0].position.x;
        world.fighters[1].position.x = ax + 80.0;
        world
    }

    #[test]
    fn test_melee_scenario_hits_exactly_once() {
        let mut world = adjacent_world();
        let config = world.config.clone();
        world.input_mut(Side::A).press(Action::Melee);
        world.step(DT);

        let b = world.fighter(Side::B);
        assert_eq!(b.health, config.fighter.max_health - config.melee.damage);
        assert_eq!(b.status.hit_stun, config.melee.stun);
        assert!(b.velocity.x > 0.0);
        assert!(b.velocity.y < 0.0);
        // Non-piercing arc resolved and was purged by end of tick
        assert!(world.attacks.is_empty());

        // Holding the button cannot land a second hit during cooldown
        for _ in 0..5 {
            world.input_mut(Side::A).press(Action::Melee);
            world.step(DT);
        }
        assert_eq!(
            world.fighter(Side::B).health,
            config.fighter.max_health - config.melee.damage
        );
    }

    #[test]
    fn test_projectile_crosses_arena_and_hits() {
        let mut world = started_world(TuningConfig::default());
        world.input_mut(Side::A).press(Action::Ranged);
        let start_health = world.fighter(Side::B).health;
        for _ in 0..120 {
            world.step(DT);
            if world.fighter(Side::B).health < start_health {
                break;
            }
        }
        assert_eq!(
            world.fighter(Side::B).health,
            start_health - world.config.ranged.damage
        );
    }

    #[test]
    fn test_timeout_higher_health_wins() {
        let mut config = TuningConfig::default();
        config.round.duration = 0.05;
        let mut world = started_world(config);
        world.fighters[0].health = 60.0;
        world.fighters[1].health = 40.0;
        for _ in 0..10 {
            world.step(DT);
        }
        assert_eq!(world.round.outcome, Some(Outcome::Winner(Side::A)));
    }

    #[test]
    fn test_timeout_equal_health_is_draw() {
        let mut config = TuningConfig::default();
        config.round.duration = 0.05;
        let mut world = started_world(config);
        for _ in 0..10 {
            world.step(DT);
        }
        assert_eq!(world.round.outcome, Some(Outcome::Draw));
    }

    #[test]
    fn test_reset_mid_round_restores_everything() {
        let mut world = adjacent_world();
        world.input_mut(Side::A).press(Action::Melee);
        world.input_mut(Side::B).press(Action::Ranged);
        for _ in 0..30 {
            world.step(DT);
        }
        world.reset();

        let config = &world.config;
        for (fighter, spawn_x) in world
            .fighters
            .iter()
            .zip([config.arena.spawn_a_x, config.arena.spawn_b_x])
        {
            assert_eq!(fighter.health, config.fighter.max_health);
            assert_eq!(fighter.position.x, spawn_x);
            assert_eq!(fighter.status.hit_stun, 0.0);
            assert_eq!(fighter.status.invulnerability, 0.0);
            assert_eq!(fighter.cooldowns.melee, 0.0);
        }
        assert!(world.attacks.is_empty());
        assert!(world.round.is_active());
        assert_eq!(world.round.remaining, world.config.round.duration);
    }

    #[test]
    fn test_paused_world_is_frozen() {
        let mut world = started_world(TuningConfig::default());
        world.fighters[0].status.hit_stun = 0.5;
        world.toggle_pause();

        let before_tick = world.current_tick;
        let before_remaining = world.round.remaining;
        world.input_mut(Side::A).press(Action::Melee);
        for _ in 0..30 {
            world.step(DT);
        }
        assert_eq!(world.current_tick, before_tick);
        assert_eq!(world.round.remaining, before_remaining);
        assert_eq!(world.fighters[0].status.hit_stun, 0.5);
        assert!(world.attacks.is_empty());

        // The buffered press survives the pause and fires on resume
        world.toggle_pause();
        world.step(DT);
        assert_eq!(world.attacks.len(), 1);
    }

    #[test]
    fn test_over_round_ignores_further_steps() {
        let mut world = adjacent_world();
        world.fighters[1].health = 1.0;
        world.input_mut(Side::A).press(Action::Melee);
        world.step(DT);
        assert_eq!(world.round.outcome, Some(Outcome::Winner(Side::A)));

        let tick = world.current_tick;
        world.step(DT);
        assert_eq!(world.current_tick, tick);
    }

    #[test]
    fn test_stunned_fighter_ignores_input_but_keeps_edges() {
        let mut world = started_world(TuningConfig::default());
        world.fighters[0].status.hit_stun = 3.0 * DT + DT / 2.0;
        world.input_mut(Side::A).press(Action::Ranged);
        world.step(DT);
        assert!(world.attacks.is_empty());
        // Stun expires; the unconsumed edge then fires
        for _ in 0..4 {
            world.step(DT);
        }
        assert_eq!(world.attacks.len(), 1);
    }

    #[test]
    fn test_hit_stop_freezes_motion_but_not_timers() {
        let mut world = started_world(TuningConfig::default());
        world.fighters[0].status.hit_stop = 0.05;
        world.fighters[0].velocity = Vec2::new(100.0, 0.0);
        let x = world.fighters[0].position.x;
        world.step(DT);
        assert_eq!(world.fighters[0].position.x, x);
        assert!(world.fighters[0].status.hit_stop < 0.05);
    }

    #[test]
    fn test_scripted_match_is_reproducible() {
        let run = |seed_a: u64, seed_b: u64| -> (f32, f32, u64) {
            let mut world = started_world(TuningConfig::default());
            world.set_scripted(Side::A, AiTier::Aggressive, seed_a);
            world.set_scripted(Side::B, AiTier::Lenient, seed_b);
            for _ in 0..1800 {
                world.step(DT);
            }
            (
                world.fighter(Side::A).health,
                world.fighter(Side::B).health,
                world.current_tick,
            )
        };
        assert_eq!(run(11, 22), run(11, 22));
    }

    #[test]
    fn test_scripted_fighters_actually_fight() {
        let mut world = started_world(TuningConfig::default());
        world.set_scripted(Side::A, AiTier::Aggressive, 5);
        world.set_scripted(Side::B, AiTier::Aggressive, 9);
        for _ in 0..3600 {
            world.step(DT);
        }
        let total = world.fighter(Side::A).health + world.fighter(Side::B).health;
        // An aggressive mirror match cannot go a minute without damage
        assert!(total < 2.0 * world.config.fighter.max_health);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut config = TuningConfig::default();
        config.fighter.max_health = 0.0;
        assert!(World::new(config).is_err());
    }

    proptest! {
        /// Whatever the inputs, core invariants hold every tick: health
        /// stays in range, timers stay non-negative, a grounded fighter
        /// rests exactly on the floor line.
        #[test]
        fn prop_invariants_hold_under_random_input(
            seed in 0u64..1000,
            presses in proptest::collection::vec(0u8..6, 0..200),
        ) {
            let mut world = started_world(TuningConfig::default());
            world.set_scripted(Side::B, AiTier::Aggressive, seed);

            for (tick, press) in presses.iter().enumerate() {
                let action = Action::ALL[*press as usize];
                world.input_mut(Side::A).press(action);
                if tick % 3 == 0 {
                    world.input_mut(Side::A).release(action);
                }
                world.step(DT);

                for fighter in &world.fighters {
                    let max = world.config.fighter.max_health;
                    prop_assert!(fighter.health >= 0.0 && fighter.health <= max);
                    prop_assert!(fighter.status.hit_stun >= 0.0);
                    prop_assert!(fighter.status.hit_stop >= 0.0);
                    prop_assert!(fighter.status.invulnerability >= 0.0);
                    prop_assert!(fighter.status.combo_window >= 0.0);
                    prop_assert!(fighter.cooldowns.melee >= 0.0);
                    if fighter.on_ground {
                        prop_assert!(
                            (fighter.aabb().bottom() - world.config.arena.floor_y).abs() < 1e-3
                        );
                    }
                }
            }
        }
    }
}
