//! Movement integration
//!
//! One fighter, one step: gravity, horizontal drive or damping, speed
//! caps, position, then floor and wall clamps. The world skips this phase
//! entirely while the fighter is in hit-stop; hit-stun does NOT skip it,
//! a stunned fighter still falls and slides under knockback.

use crate::core::config::{ArenaConfig, PhysicsConfig};
use crate::fighter::Fighter;

impl Fighter {
    /// Integrate one bounded step of motion
    pub fn integrate(&mut self, dt: f32, physics: &PhysicsConfig, arena: &ArenaConfig) {
        self.velocity.y += physics.gravity * dt;

        let (accel, damping, speed_cap) = if self.on_ground {
            (
                physics.ground_accel,
                physics.ground_damping,
                physics.ground_speed_cap,
            )
        } else {
            (
                physics.air_accel,
                physics.air_damping,
                physics.air_speed_cap,
            )
        };

        if self.move_dir != 0.0 {
            // Drive toward the capped walk speed. The cap binds the drive
            // only; a dash burst or knockback impulse above it is bled off
            // at the same acceleration rate instead of being clamped away.
            let target = self.move_dir * speed_cap;
            let max_step = accel * dt;
            let delta = (target - self.velocity.x).clamp(-max_step, max_step);
            self.velocity.x += delta;
        } else {
            self.velocity.x *= (1.0 - damping * dt).max(0.0);
        }

        self.position += self.velocity * dt;

        // Floor: clamp, kill vertical motion, ground the fighter
        let floor = arena.floor_y - self.half_extents.y;
        if self.position.y >= floor {
            self.position.y = floor;
            self.velocity.y = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        // Walls: clamp and stop dead, no bounce
        let left_limit = self.half_extents.x;
        let right_limit = arena.width - self.half_extents.x;
        if self.position.x <= left_limit {
            self.position.x = left_limit;
            self.velocity.x = self.velocity.x.max(0.0);
        } else if self.position.x >= right_limit {
            self.position.x = right_limit;
            self.velocity.x = self.velocity.x.min(0.0);
        }

        // Intent is per-tick; a stunned fighter must not coast on the
        // last pre-stun movement request
        self.move_dir = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use crate::core::config::TuningConfig;
    use crate::core::types::{Side, Vec2};
    use crate::fighter::Fighter;
    use crate::input::ControlSource;

    const DT: f32 = 1.0 / 60.0;

    fn grounded_fighter(config: &TuningConfig) -> Fighter {
        Fighter::new(Side::A, ControlSource::Human, 400.0, config)
    }

    #[test]
    fn test_grounded_fighter_stays_on_floor() {
        let config = TuningConfig::default();
        let mut f = grounded_fighter(&config);
        for _ in 0..10 {
            f.integrate(DT, &config.physics, &config.arena);
        }
        assert!(f.on_ground);
        assert_eq!(f.aabb().bottom(), config.arena.floor_y);
        assert_eq!(f.velocity.y, 0.0);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let config = TuningConfig::default();
        let mut f = grounded_fighter(&config);
        f.velocity.y = -config.physics.jump_speed;
        f.on_ground = false;

        let mut left_ground = false;
        for _ in 0..240 {
            f.integrate(DT, &config.physics, &config.arena);
            if !f.on_ground {
                left_ground = true;
            }
        }
        assert!(left_ground);
        assert!(f.on_ground);
        // Exactly one of grounded/airborne at the end of the phase
        assert_eq!(f.aabb().bottom(), config.arena.floor_y);
    }

    #[test]
    fn test_ground_speed_cap_holds() {
        let config = TuningConfig::default();
        let mut f = grounded_fighter(&config);
        for _ in 0..120 {
            f.move_dir = 1.0;
            f.integrate(DT, &config.physics, &config.arena);
        }
        assert!(f.velocity.x <= config.physics.ground_speed_cap);
        assert!(f.velocity.x > config.physics.ground_speed_cap * 0.9);
    }

    #[test]
    fn test_burst_above_cap_decays_instead_of_clamping() {
        let config = TuningConfig::default();
        let mut f = grounded_fighter(&config);
        f.velocity.x = config.dash.speed;
        f.move_dir = 1.0;
        f.integrate(DT, &config.physics, &config.arena);
        // Still well above the walk cap one tick after the burst
        assert!(f.velocity.x > config.physics.ground_speed_cap * 1.5);
        // But converging on it
        assert!(f.velocity.x < config.dash.speed);
    }

    #[test]
    fn test_damping_stops_horizontal_drift() {
        let config = TuningConfig::default();
        let mut f = grounded_fighter(&config);
        f.velocity.x = 240.0;
        for _ in 0..120 {
            f.integrate(DT, &config.physics, &config.arena);
        }
        assert!(f.velocity.x.abs() < 1.0);
    }

    #[test]
    fn test_wall_clamps_without_bounce() {
        let config = TuningConfig::default();
        let mut f = grounded_fighter(&config);
        f.position.x = config.arena.width - f.half_extents.x - 1.0;
        f.velocity.x = 5000.0;
        f.integrate(DT, &config.physics, &config.arena);
        assert_eq!(f.position.x, config.arena.width - f.half_extents.x);
        assert!(f.velocity.x <= 0.0);

        f.position.x = f.half_extents.x + 1.0;
        f.velocity.x = -5000.0;
        f.integrate(DT, &config.physics, &config.arena);
        assert_eq!(f.position.x, f.half_extents.x);
        assert!(f.velocity.x >= 0.0);
    }

    #[test]
    fn test_move_dir_is_consumed_each_step() {
        let config = TuningConfig::default();
        let mut f = grounded_fighter(&config);
        f.move_dir = 1.0;
        f.integrate(DT, &config.physics, &config.arena);
        assert_eq!(f.move_dir, 0.0);
    }

    #[test]
    fn test_airborne_wall_clamp_keeps_falling() {
        let config = TuningConfig::default();
        let mut f = grounded_fighter(&config);
        f.position = Vec2::new(f.half_extents.x + 1.0, 100.0);
        f.on_ground = false;
        f.velocity = Vec2::new(-500.0, 0.0);
        f.integrate(DT, &config.physics, &config.arena);
        assert_eq!(f.position.x, f.half_extents.x);
        // Vertical motion unaffected by the wall clamp
        assert!(f.velocity.y > 0.0);
    }
}
