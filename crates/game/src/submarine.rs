//! Player submarine state and per-tick physics integration.

use engine_core::{Health, Transform, Vec3};
use ocean::TerrainQuery;

use crate::config::SimConfig;
use crate::effects::EffectSink;
use crate::input::HelmInput;

/// The player-controlled submarine.
#[derive(Debug, Clone)]
pub struct Submarine {
    pub transform: Transform,
    /// Actual displacement per second, derived each tick. Consumed by the
    /// intercept pattern and torpedo lead prediction.
    pub velocity: Vec3,
    /// Propulsion scalar in [-max/2, max].
    pub propulsion: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// True while above the surface.
    pub airborne: bool,
    /// Accumulated fall speed while airborne.
    pub fall_velocity: f32,
    /// Derived display depth in whole units, never negative.
    pub depth: u32,
    pub hull: Health,
    pub last_fired_at: f32,
    /// Last resolved seafloor height, used while a terrain query is pending.
    pub last_floor_height: f32,
}

impl Submarine {
    pub fn new(position: Vec3, config: &SimConfig) -> Self {
        Self {
            transform: Transform::from_position(position),
            velocity: Vec3::ZERO,
            propulsion: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            airborne: position.y > config.surface_level,
            fall_velocity: 0.0,
            depth: (-position.y).max(0.0).floor() as u32,
            hull: Health::new(config.player_hull),
            last_fired_at: f32::NEG_INFINITY,
            last_floor_height: position.y - 200.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn is_destroyed(&self) -> bool {
        self.hull.is_dead()
    }
}

/// Integrate one tick of player input into position and orientation.
/// Returns the pre-update position for the host's obstacle-collision pass.
pub fn update_physics(
    sub: &mut Submarine,
    input: &HelmInput,
    terrain: &dyn TerrainQuery,
    effects: &mut dyn EffectSink,
    config: &SimConfig,
    dt: f32,
) -> Vec3 {
    let previous = sub.transform.position;

    // ── Propulsion ──────────────────────────────────────────────────────
    if input.forward {
        sub.propulsion += config.propulsion_acceleration * dt;
    } else if input.backward {
        sub.propulsion -= config.propulsion_acceleration * dt;
    } else {
        // Decay factor is defined per 60 Hz update; scale to this dt
        sub.propulsion *= config.propulsion_decay.powf(dt * 60.0);
    }
    sub.propulsion = sub
        .propulsion
        .clamp(-config.max_propulsion * 0.5, config.max_propulsion);
    if sub.propulsion.abs() < 0.01 {
        sub.propulsion = 0.0;
    }

    // ── Orientation: target angles come straight from the input provider ─
    sub.yaw = input.target_yaw;
    sub.pitch = input
        .target_pitch
        .clamp(-config.max_pitch_angle, config.max_pitch_angle);
    sub.transform.set_yaw_pitch(sub.yaw, sub.pitch);

    // ── Movement ────────────────────────────────────────────────────────
    let thrust_scale = if sub.airborne { 0.3 } else { 1.0 };
    let strafe_scale = if sub.airborne { 0.2 } else { 1.0 };
    let forward = sub.transform.forward();
    let right = sub.transform.right();

    sub.transform.position +=
        forward * (sub.propulsion * config.movement_speed * thrust_scale * dt);
    sub.transform.position +=
        right * (input.strafe_dir() * config.strafe_speed * strafe_scale * dt);
    if !sub.airborne {
        sub.transform.position.y += input.vertical_dir() * config.vertical_speed * dt;
    }

    // ── Buoyancy & gravity ──────────────────────────────────────────────
    if sub.airborne {
        sub.fall_velocity += config.gravity * dt;
        sub.transform.position.y -= sub.fall_velocity * dt;
    } else {
        let y = sub.transform.position.y - config.surface_level;
        if y > -5.0 {
            sub.transform.position.y += config.buoyancy_shallow * dt;
        } else if y > -20.0 {
            sub.transform.position.y += config.buoyancy_mid * dt;
        }
    }

    // ── Surface transition ──────────────────────────────────────────────
    let above = sub.transform.position.y > config.surface_level;
    if above != sub.airborne {
        let splash_pos = Vec3::new(
            sub.transform.position.x,
            config.surface_level,
            sub.transform.position.z,
        );
        let splash_speed = if sub.airborne {
            sub.fall_velocity
        } else {
            sub.velocity.length()
        };
        effects.on_splash(splash_pos, (splash_speed * 0.2).clamp(0.5, 4.0));
        sub.airborne = above;
        sub.fall_velocity = 0.0;
    }

    // ── Floor collision ─────────────────────────────────────────────────
    let floor_query = terrain.height_at(sub.transform.position.x, sub.transform.position.z);
    let floor = floor_query.ready_or(sub.last_floor_height);
    if floor_query.is_ready() {
        sub.last_floor_height = floor;
    }
    clamp_to_floor(sub, floor, config, effects, dt);

    // ── Derived state ───────────────────────────────────────────────────
    sub.velocity = if dt > 0.0 {
        (sub.transform.position - previous) / dt
    } else {
        Vec3::ZERO
    };
    sub.depth = (-(sub.transform.position.y - config.surface_level))
        .max(0.0)
        .floor() as u32;

    previous
}

/// Clamp the submarine above the seafloor clearance. Idempotent: a second
/// call with the same floor height moves nothing.
pub fn clamp_to_floor(
    sub: &mut Submarine,
    floor: f32,
    config: &SimConfig,
    effects: &mut dyn EffectSink,
    dt: f32,
) {
    let min_y = floor + config.floor_buffer;
    if sub.transform.position.y < min_y {
        let penetration = min_y - sub.transform.position.y;
        sub.transform.position.y = min_y;

        // Clear excess nose-down pitch so the boat levels off the sand
        if sub.pitch < 0.0 {
            sub.pitch = 0.0;
            sub.transform.set_yaw_pitch(sub.yaw, sub.pitch);
        }

        // Impact speed approximated from how far we sank past the buffer
        let impact = if dt > 0.0 { penetration / dt } else { penetration };
        if impact > 1.0 {
            effects.on_sand_impact(
                sub.transform.position,
                (impact * 0.1).clamp(0.5, 3.0),
                (impact * 0.05).clamp(0.1, 1.0),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::NullSinks;

    fn deep_water(_x: f32, _z: f32) -> f32 {
        -300.0
    }

    fn setup() -> (Submarine, SimConfig, NullSinks) {
        let config = SimConfig::default();
        let sub = Submarine::new(Vec3::new(0.0, -60.0, 0.0), &config);
        (sub, config, NullSinks::new())
    }

    #[test]
    fn propulsion_never_exceeds_limits() {
        let (mut sub, config, mut sinks) = setup();
        let forward = HelmInput {
            forward: true,
            ..Default::default()
        };
        for _ in 0..600 {
            update_physics(&mut sub, &forward, &deep_water, &mut sinks, &config, 1.0 / 60.0);
            assert!(sub.propulsion <= config.max_propulsion + 1e-5);
        }
        let backward = HelmInput {
            backward: true,
            ..Default::default()
        };
        for _ in 0..600 {
            update_physics(&mut sub, &backward, &deep_water, &mut sinks, &config, 1.0 / 60.0);
            assert!(sub.propulsion >= -config.max_propulsion * 0.5 - 1e-5);
        }
    }

    #[test]
    fn propulsion_decays_to_zero_when_idle() {
        let (mut sub, config, mut sinks) = setup();
        sub.propulsion = config.max_propulsion;
        let idle = HelmInput::default();
        for _ in 0..600 {
            update_physics(&mut sub, &idle, &deep_water, &mut sinks, &config, 1.0 / 60.0);
        }
        assert_eq!(sub.propulsion, 0.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let (mut sub, config, mut sinks) = setup();
        let input = HelmInput {
            target_pitch: 2.0,
            ..Default::default()
        };
        update_physics(&mut sub, &input, &deep_water, &mut sinks, &config, 1.0 / 60.0);
        assert!(sub.pitch <= config.max_pitch_angle);

        let input = HelmInput {
            target_pitch: -2.0,
            ..Default::default()
        };
        update_physics(&mut sub, &input, &deep_water, &mut sinks, &config, 1.0 / 60.0);
        assert!(sub.pitch >= -config.max_pitch_angle);
    }

    #[test]
    fn floor_clamp_is_idempotent() {
        let (mut sub, config, mut sinks) = setup();
        sub.transform.position.y = -320.0;
        clamp_to_floor(&mut sub, -300.0, &config, &mut sinks, 1.0 / 60.0);
        let after_first = sub.transform.position;
        clamp_to_floor(&mut sub, -300.0, &config, &mut sinks, 1.0 / 60.0);
        assert_eq!(sub.transform.position, after_first);
        assert_eq!(sub.transform.position.y, -300.0 + config.floor_buffer);
    }

    #[test]
    fn floor_clamp_clears_nose_down_pitch() {
        let (mut sub, config, mut sinks) = setup();
        sub.pitch = -0.5;
        sub.transform.position.y = -320.0;
        clamp_to_floor(&mut sub, -300.0, &config, &mut sinks, 1.0 / 60.0);
        assert_eq!(sub.pitch, 0.0);
    }

    #[test]
    fn surface_crossing_raises_splash_and_flips_airborne() {
        let (mut sub, config, mut sinks) = setup();
        sub.transform.position.y = -0.05;
        // Shallow buoyancy pushes the boat through the surface
        let idle = HelmInput::default();
        for _ in 0..120 {
            update_physics(&mut sub, &idle, &deep_water, &mut sinks, &config, 1.0 / 60.0);
            if sub.airborne {
                break;
            }
        }
        assert!(sub.airborne);
        assert!(sinks.splashes >= 1);
    }

    #[test]
    fn pending_terrain_uses_last_known_height() {
        let (mut sub, config, mut sinks) = setup();
        sub.last_floor_height = -70.0;
        sub.transform.position.y = -68.0;

        struct PendingTerrain;
        impl ocean::TerrainQuery for PendingTerrain {
            fn height_at(&self, _x: f32, _z: f32) -> ocean::HeightQuery {
                ocean::HeightQuery::Pending
            }
        }

        update_physics(
            &mut sub,
            &HelmInput::default(),
            &PendingTerrain,
            &mut sinks,
            &config,
            1.0 / 60.0,
        );
        // Clamped against the remembered floor, not left to sink
        assert!(sub.transform.position.y >= -70.0 + config.floor_buffer - 1e-4);
    }

    #[test]
    fn depth_is_non_negative_integer() {
        let (mut sub, config, mut sinks) = setup();
        sub.transform.position.y = -37.6;
        update_physics(
            &mut sub,
            &HelmInput::default(),
            &deep_water,
            &mut sinks,
            &config,
            1.0 / 60.0,
        );
        assert!(sub.depth >= 37 && sub.depth <= 38);
    }
}
