//! Free-swimming wildlife: sharks.
//!
//! Sharks wander, fill out the biome, and can eat a torpedo meant for
//! something smarter. They carry no health pool — any torpedo hit kills.

use engine_core::{Transform, Vec3, Velocity};
use ocean::{BiomeConfig, BiomeQuery, TerrainQuery};
use rand::prelude::*;

use crate::config::SimConfig;
use crate::effects::{SceneSink, VisualKind};
use crate::registry::ActorRegistry;

/// Shark actor component.
#[derive(Debug, Clone, Copy)]
pub struct Shark {
    pub cruise_speed: f32,
    /// Phase driving the lazy sinusoidal heading change.
    pub wander_phase: f32,
    /// Per-shark turn tendency, radians/second.
    pub turn_bias: f32,
}

/// Maintains the shark population around the player.
pub struct Wildlife {
    spawn_timer: f32,
    rng: StdRng,
}

impl Wildlife {
    pub fn new(seed: u64) -> Self {
        Self {
            spawn_timer: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn roll + wander update + distance despawn for all sharks.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        registry: &mut ActorRegistry,
        player_pos: Vec3,
        terrain: &dyn TerrainQuery,
        biomes: &dyn BiomeQuery,
        scene: &mut dyn SceneSink,
        config: &SimConfig,
        dt: f32,
    ) {
        self.spawn_timer += dt;
        if self.spawn_timer >= config.shark_spawn_interval {
            self.spawn_timer = 0.0;
            if registry.count::<Shark>() < config.max_sharks {
                self.try_spawn(registry, player_pos, terrain, biomes, scene, config);
            }
        }

        // Wander: heading drifts sinusoidally, position follows the nose,
        // and the shark stays out of the sand and below the chop.
        let mut wanderers: Vec<hecs::Entity> = Vec::new();
        for (entity, _) in registry.world.query::<&Shark>().iter() {
            wanderers.push(entity);
        }

        for entity in wanderers {
            let (position, new_rotation, speed) = {
                let Ok(mut q) = registry.world.query_one::<(&Transform, &mut Shark)>(entity)
                else {
                    continue;
                };
                let Some((transform, shark)) = q.get() else {
                    continue;
                };
                shark.wander_phase += dt * 0.4;
                let turn = shark.turn_bias + shark.wander_phase.sin() * 0.3;
                let (yaw, pitch, _) = transform.rotation.to_euler(glam::EulerRot::YXZ);
                let rotation =
                    engine_core::Quat::from_euler(glam::EulerRot::YXZ, yaw + turn * dt, pitch, 0.0);
                (transform.position, rotation, shark.cruise_speed)
            };
            // Non-finite positions are retired by the simulation sweep
            if !position.is_finite() {
                continue;
            }

            let floor = terrain
                .height_at(position.x, position.z)
                .ready_or(position.y - 40.0);
            let mut next = position + new_rotation * -Vec3::Z * speed * dt;
            let min_y = (floor + config.floor_buffer).min(config.surface_level - 8.0);
            next.y = next.y.clamp(min_y, config.surface_level - 8.0);

            if let Ok(mut transform) = registry.world.get::<&mut Transform>(entity) {
                transform.position = next;
                transform.rotation = new_rotation;
            }
            if let Ok(mut velocity) = registry.world.get::<&mut Velocity>(entity) {
                velocity.linear = (next - position) / dt.max(1e-6);
            }

            if next.distance(player_pos) > config.enemy_despawn_distance {
                registry.mark_for_removal(entity);
            }
        }
    }

    fn try_spawn(
        &mut self,
        registry: &mut ActorRegistry,
        player_pos: Vec3,
        terrain: &dyn TerrainQuery,
        biomes: &dyn BiomeQuery,
        scene: &mut dyn SceneSink,
        config: &SimConfig,
    ) {
        let angle = self.rng.gen::<f32>() * std::f32::consts::TAU;
        let distance = config.enemy_spawn_distance * (0.5 + self.rng.gen::<f32>() * 0.5);
        let x = player_pos.x + angle.cos() * distance;
        let z = player_pos.z + angle.sin() * distance;

        let density: f32 = biomes
            .blend_at(x, z)
            .iter()
            .map(|(ty, w)| w * BiomeConfig::from_type(*ty).creature_density)
            .sum();
        if density * 0.8 <= self.rng.gen::<f32>() {
            return;
        }

        let floor = terrain.height_at(x, z).ready_or(-200.0);
        let low = floor + config.floor_buffer * 2.0;
        let high = (config.surface_level - 10.0).max(low + 1.0);
        let y = self.rng.gen_range(low..high);

        let transform = Transform::from_position(Vec3::new(x, y, z));
        registry.spawn_actor(
            scene,
            VisualKind::Shark,
            transform,
            (
                Shark {
                    cruise_speed: config.shark_speed * (0.8 + self.rng.gen::<f32>() * 0.4),
                    wander_phase: self.rng.gen::<f32>() * std::f32::consts::TAU,
                    turn_bias: self.rng.gen_range(-0.2..0.2),
                },
                Velocity::default(),
            ),
        );
        log::debug!("shark spawned at ({x:.0}, {y:.0}, {z:.0})");
    }
}
