//! Enemy submarine force: spawning, behavior patterns, and torpedo fire
//! discipline.
//!
//! Each enemy is committed to one behavior pattern for life, drawn at spawn
//! time from configured weights. Firing is gated per enemy and globally so a
//! surrounded player faces a rhythm of shots, not a wall.

use engine_core::{Entity, Health, Transform, Vec3, Velocity};
use ocean::{hostile_density_at, BiomeQuery, TerrainQuery};
use rand::prelude::*;

use crate::config::SimConfig;
use crate::effects::{EffectSink, SceneSink, VisualKind};
use crate::registry::ActorRegistry;
use crate::submarine::Submarine;
use crate::torpedo::{self, steer_toward};

/// How an enemy submarine hunts. Fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorPattern {
    /// Steer straight at the player's current position.
    Chase,
    /// Steer at a lead point ahead of the player's velocity.
    Intercept,
    /// Swim legs around a home anchor until the player comes close.
    Patrol,
    /// Hold near a lurk point, then spring into a chase with a free shot.
    StealthAmbush,
}

impl BehaviorPattern {
    /// Weighted draw over (chase, intercept, patrol, ambush).
    pub fn draw(weights: &[f32; 4], rng: &mut impl Rng) -> Self {
        let total: f32 = weights.iter().sum();
        let mut roll = rng.gen::<f32>() * total.max(1e-6);
        for (i, w) in weights.iter().enumerate() {
            if roll < *w {
                return match i {
                    0 => Self::Chase,
                    1 => Self::Intercept,
                    2 => Self::Patrol,
                    _ => Self::StealthAmbush,
                };
            }
            roll -= w;
        }
        Self::Chase
    }
}

/// Enemy submarine actor component.
#[derive(Debug, Clone, Copy)]
pub struct EnemySub {
    pub pattern: BehaviorPattern,
    pub speed: f32,
    /// Randomized per-boat launch spacing in seconds.
    pub torpedo_cooldown: f32,
    pub last_fired_at: f32,
    /// Patrol home and current leg.
    pub patrol_anchor: Vec3,
    pub patrol_dir: Vec3,
    pub patrol_distance: f32,
    /// Lurk point for the ambush pattern.
    pub ambush_point: Vec3,
    /// Time spent waiting at the lurk point.
    pub ambush_wait: f32,
    /// Skip the suppression roll on the next valid fire solution.
    pub force_fire: bool,
    /// Fallback height while a terrain sample is pending.
    pub last_floor_height: f32,
}

impl EnemySub {
    pub fn new(
        pattern: BehaviorPattern,
        position: Vec3,
        config: &SimConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let patrol_yaw = rng.gen::<f32>() * std::f32::consts::TAU;
        Self {
            pattern,
            speed: config.enemy_speed * (0.9 + rng.gen::<f32>() * 0.2),
            torpedo_cooldown: rng.gen_range(config.enemy_cooldown_min..=config.enemy_cooldown_max),
            last_fired_at: f32::NEG_INFINITY,
            patrol_anchor: position,
            patrol_dir: Vec3::new(patrol_yaw.cos(), 0.0, patrol_yaw.sin()),
            patrol_distance: rng.gen_range(config.patrol_distance_min..=config.patrol_distance_max),
            ambush_point: position,
            ambush_wait: 0.0,
            force_fire: false,
            last_floor_height: position.y - 100.0,
        }
    }
}

/// Spawns, steers, and retires the enemy submarine population.
pub struct EnemyForce {
    /// Last launch time across the whole force.
    global_last_fired_at: f32,
    spawn_timer: f32,
    rng: StdRng,
}

impl EnemyForce {
    pub fn new(seed: u64) -> Self {
        Self {
            global_last_fired_at: f32::NEG_INFINITY,
            spawn_timer: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// One tick for the whole force: spawn roll, steering, health
    /// regeneration, fire attempts, distance despawn.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        registry: &mut ActorRegistry,
        player: &Submarine,
        terrain: &dyn TerrainQuery,
        biomes: &dyn BiomeQuery,
        scene: &mut dyn SceneSink,
        effects: &mut dyn EffectSink,
        config: &SimConfig,
        now: f32,
        dt: f32,
    ) {
        self.spawn_timer += dt;
        if self.spawn_timer >= config.enemy_spawn_interval {
            self.spawn_timer = 0.0;
            if registry.count::<EnemySub>() < config.max_enemies {
                self.try_spawn(registry, player, terrain, biomes, scene, config);
            }
        }

        let boats: Vec<Entity> = registry
            .world
            .query::<&EnemySub>()
            .iter()
            .map(|(e, _)| e)
            .collect();

        for entity in boats {
            let (mut enemy, mut transform) = {
                let Ok(mut q) = registry.world.query_one::<(&EnemySub, &Transform)>(entity)
                else {
                    continue;
                };
                let Some((e, t)) = q.get() else { continue };
                (*e, *t)
            };

            if transform.position.distance(player.position()) > config.enemy_despawn_distance {
                log::debug!("enemy {:?} left the engagement area", entity);
                registry.mark_for_removal(entity);
                continue;
            }

            let target = self.steer_target(&mut enemy, &transform, player, config, dt);

            // Terrain avoidance: never steer into the sand
            let floor_query = terrain.height_at(transform.position.x, transform.position.z);
            let floor = floor_query.ready_or(enemy.last_floor_height);
            if floor_query.is_ready() {
                enemy.last_floor_height = floor;
            }
            let min_y = (floor + config.floor_buffer).min(config.surface_level - 3.0);
            let target_floor = (min_y + 5.0).min(config.surface_level - 5.0);
            let target = Vec3::new(
                target.x,
                target.y.clamp(target_floor, config.surface_level - 5.0),
                target.z,
            );

            steer_toward(
                &mut transform.rotation,
                transform.position,
                target,
                config.enemy_turn_rate,
                dt,
            );

            // Throttle down while badly misaligned, never below half speed
            let forward = transform.forward();
            let to_target = (target - transform.position).normalize_or_zero();
            let throttle = forward.dot(to_target).clamp(0.5, 1.0);
            let previous = transform.position;
            transform.position += forward * enemy.speed * throttle * dt;
            transform.position.y = transform
                .position
                .y
                .clamp(min_y, config.surface_level - 3.0);

            if let Ok(mut health) = registry.world.get::<&mut Health>(entity) {
                health.regenerate(now, dt);
            }

            if let Ok(mut t) = registry.world.get::<&mut Transform>(entity) {
                *t = transform;
            }
            if let Ok(mut v) = registry.world.get::<&mut Velocity>(entity) {
                v.linear = (transform.position - previous) / dt.max(1e-6);
            }

            self.try_fire(registry, scene, effects, &mut enemy, &transform, player, config, now);

            if let Ok(mut e) = registry.world.get::<&mut EnemySub>(entity) {
                *e = enemy;
            }
        }
    }

    /// Where this boat wants to go right now, per its pattern.
    fn steer_target(
        &mut self,
        enemy: &mut EnemySub,
        transform: &Transform,
        player: &Submarine,
        config: &SimConfig,
        dt: f32,
    ) -> Vec3 {
        let player_pos = player.position();
        match enemy.pattern {
            BehaviorPattern::Chase => player_pos,
            BehaviorPattern::Intercept => {
                let distance = transform.position.distance(player_pos);
                let lead_time = distance / enemy.speed.max(1e-3);
                player_pos + player.velocity * lead_time * config.intercept_lead_factor
            }
            BehaviorPattern::Patrol => {
                if transform.position.distance(player_pos)
                    < config.enemy_attack_range * config.patrol_aggro_fraction
                {
                    return player_pos;
                }
                let waypoint = enemy.patrol_anchor + enemy.patrol_dir * enemy.patrol_distance;
                if transform.position.distance(waypoint) < 10.0 {
                    enemy.patrol_dir = -enemy.patrol_dir;
                }
                waypoint
            }
            BehaviorPattern::StealthAmbush => {
                // After springing, chase until the forced shot is away
                if enemy.force_fire {
                    return player_pos;
                }
                if transform.position.distance(enemy.ambush_point) < 10.0 {
                    enemy.ambush_wait += dt;
                }
                let sprung = player_pos.distance(transform.position) < config.ambush_distance
                    || enemy.ambush_wait > config.max_ambush_time;
                if sprung {
                    enemy.force_fire = true;
                    enemy.ambush_wait = 0.0;
                    // Re-arm: lurk somewhere new along the player's path
                    let dir = self.rng.gen::<f32>() * std::f32::consts::TAU;
                    let range = self.rng.gen_range(60.0..120.0);
                    enemy.ambush_point = player_pos
                        + Vec3::new(dir.cos() * range, 0.0, dir.sin() * range);
                    log::debug!("ambush sprung");
                    return player_pos;
                }
                enemy.ambush_point
            }
        }
    }

    /// Attempt a torpedo launch. Gates, in order: per-boat cooldown, global
    /// cooldown, salvo cap, fire envelope, patrol aggro radius, fire cone,
    /// suppression roll (the roll is skipped once after an ambush springs).
    #[allow(clippy::too_many_arguments)]
    fn try_fire(
        &mut self,
        registry: &mut ActorRegistry,
        scene: &mut dyn SceneSink,
        effects: &mut dyn EffectSink,
        enemy: &mut EnemySub,
        transform: &Transform,
        player: &Submarine,
        config: &SimConfig,
        now: f32,
    ) -> Option<Entity> {
        if now - enemy.last_fired_at < enemy.torpedo_cooldown {
            return None;
        }
        if now - self.global_last_fired_at < config.global_torpedo_cooldown {
            return None;
        }
        if torpedo::enemy_torpedo_count(&registry.world) >= config.max_enemy_torpedoes {
            return None;
        }

        let to_player = player.position() - transform.position;
        let distance = to_player.length();
        if distance < config.enemy_min_fire_distance || distance > config.enemy_attack_range {
            return None;
        }
        // Patrol boats only engage once the player breaches the aggro radius
        if enemy.pattern == BehaviorPattern::Patrol
            && distance > config.enemy_attack_range * config.patrol_aggro_fraction
        {
            return None;
        }
        if transform.forward().dot(to_player / distance.max(1e-3))
            < config.enemy_fire_cone_deg.to_radians().cos()
        {
            return None;
        }

        if !enemy.force_fire && self.rng.gen::<f32>() < config.enemy_fire_suppression {
            // Shot passed up; full cooldown before the next attempt
            enemy.last_fired_at = now;
            return None;
        }

        let launched =
            torpedo::spawn_enemy_torpedo(registry, scene, effects, transform, config, now);
        enemy.last_fired_at = now;
        enemy.torpedo_cooldown = self
            .rng
            .gen_range(config.enemy_cooldown_min..=config.enemy_cooldown_max);
        enemy.force_fire = false;
        self.global_last_fired_at = now;
        log::debug!("enemy torpedo in the water, range {distance:.0}");
        Some(launched)
    }

    /// Spawn roll on a ring around the player, weighted by biome hostility.
    fn try_spawn(
        &mut self,
        registry: &mut ActorRegistry,
        player: &Submarine,
        terrain: &dyn TerrainQuery,
        biomes: &dyn BiomeQuery,
        scene: &mut dyn SceneSink,
        config: &SimConfig,
    ) {
        let player_pos = player.position();
        let angle = self.rng.gen::<f32>() * std::f32::consts::TAU;
        let x = player_pos.x + angle.cos() * config.enemy_spawn_distance;
        let z = player_pos.z + angle.sin() * config.enemy_spawn_distance;

        let density = hostile_density_at(biomes, x, z) * config.enemy_spawn_density_scale;
        if density <= self.rng.gen::<f32>() {
            return;
        }

        let floor = terrain.height_at(x, z).ready_or(-200.0);
        let low = floor + config.enemy_spawn_min_height;
        let mut high = (-50.0_f32).min(player_pos.y + 80.0);
        if high <= low {
            high = low + 10.0;
        }
        let y = self.rng.gen_range(low..high);
        let position = Vec3::new(x, y, z);

        let pattern = BehaviorPattern::draw(&config.pattern_weights, &mut self.rng);
        let mut enemy = EnemySub::new(pattern, position, config, &mut self.rng);
        if pattern == BehaviorPattern::StealthAmbush {
            // Lurk along the player's likely path rather than at the spawn ring
            let lurk_angle = self.rng.gen::<f32>() * std::f32::consts::TAU;
            let lurk_range = self.rng.gen_range(60.0..120.0);
            enemy.ambush_point = player_pos
                + Vec3::new(
                    lurk_angle.cos() * lurk_range,
                    0.0,
                    lurk_angle.sin() * lurk_range,
                );
            enemy.ambush_point.y = enemy.ambush_point.y.clamp(low, high);
        }

        let mut transform = Transform::from_position(position);
        transform.look_at(player_pos);
        registry.spawn_actor(
            scene,
            VisualKind::EnemySub,
            transform,
            (
                enemy,
                Velocity::default(),
                Health::with_regen(
                    config.enemy_health,
                    config.enemy_regen_rate,
                    config.enemy_damage_recovery,
                ),
            ),
        );
        log::info!("enemy submarine ({pattern:?}) spawned at ({x:.0}, {y:.0}, {z:.0})");
    }
}
