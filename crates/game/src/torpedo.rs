//! Torpedoes: launch, guidance, target lock, and collision resolution.
//!
//! Friendly and enemy torpedoes share one actor shape; a `friendly` flag
//! decides who they hunt. Player targeting state lives in an explicit
//! [`TargetingContext`] owned by the simulation — no module globals.

use engine_core::{Entity, Quat, Transform, Vec3, Velocity, World};
use ocean::TerrainQuery;

use crate::config::SimConfig;
use crate::effects::{EffectSink, MessageSink, SceneSink, VisualKind};
use crate::enemy::EnemySub;
use crate::registry::ActorRegistry;
use crate::shark::Shark;
use crate::submarine::Submarine;

/// Who a guided torpedo is tracking. Weak by construction: an `Actor` entry
/// is looked up by identity each tick and may have despawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRef {
    /// The player submarine.
    Player,
    /// An enemy submarine or shark.
    Actor(Entity),
}

/// Torpedo actor component.
#[derive(Debug, Clone, Copy)]
pub struct Torpedo {
    pub friendly: bool,
    pub guided: bool,
    pub speed: f32,
    pub spawned_at: f32,
    pub lifetime: f32,
    pub target: Option<TargetRef>,
    /// Base guidance turn rate; adaptive scaling caps at 3x.
    pub turn_rate: f32,
    pub damage: f32,
    pub collision_radius: f32,
    /// Fallback height while a terrain sample is pending.
    pub last_floor_height: f32,
}

impl Torpedo {
    /// Hit-test radius: guided torpedoes sweep a larger volume.
    fn hit_radius(&self, config: &SimConfig) -> f32 {
        if self.guided {
            self.collision_radius * config.guided_radius_factor
        } else {
            self.collision_radius
        }
    }
}

/// Player auto-targeting state. At most one target at a time; while `fired`
/// is set, acquisition is suspended until no guided torpedo still tracks the
/// fired-at actor.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetingContext {
    pub target: Option<Entity>,
    pub lock_started_at: f32,
    pub locked: bool,
    pub fired: bool,
}

impl TargetingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the current target and all lock state.
    pub fn clear(&mut self) {
        self.target = None;
        self.lock_started_at = 0.0;
        self.locked = false;
        self.fired = false;
    }

    fn retarget(&mut self, target: Option<Entity>, now: f32) {
        self.target = target;
        self.lock_started_at = now;
        self.locked = false;
    }
}

/// Number of live enemy torpedoes (the salvo cap input).
pub fn enemy_torpedo_count(world: &World) -> usize {
    world
        .query::<&Torpedo>()
        .iter()
        .filter(|(_, t)| !t.friendly)
        .count()
}

/// Continuous player-side target acquisition.
///
/// Scans enemy actors in the detection cone each tick, locks after
/// continuously tracking the same actor for `target_lock_time`, and goes
/// quiet after a guided launch until that torpedo is gone.
pub fn update_targeting(
    ctx: &mut TargetingContext,
    world: &World,
    player: &Submarine,
    messages: &mut dyn MessageSink,
    config: &SimConfig,
    now: f32,
) {
    if ctx.fired {
        let still_tracking = match ctx.target {
            Some(locked) => world
                .query::<&Torpedo>()
                .iter()
                .any(|(_, t)| t.guided && t.target == Some(TargetRef::Actor(locked))),
            None => false,
        };
        if still_tracking {
            return;
        }
        ctx.clear();
    }

    let origin = player.position();
    let forward = player.transform.forward();
    let cone_cos = config.detection_cone_deg.to_radians().cos();

    let mut best: Option<(Entity, f32)> = None;
    let mut consider = |entity: Entity, position: Vec3| {
        let to_actor = position - origin;
        let distance = to_actor.length();
        if distance > config.detection_range || distance < 1e-3 {
            return;
        }
        if forward.dot(to_actor / distance) < cone_cos {
            return;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((entity, distance));
        }
    };
    for (entity, (transform, _)) in world.query::<(&Transform, &EnemySub)>().iter() {
        consider(entity, transform.position);
    }
    for (entity, (transform, _)) in world.query::<(&Transform, &Shark)>().iter() {
        consider(entity, transform.position);
    }

    match (ctx.target, best.map(|(e, _)| e)) {
        (Some(current), Some(found)) if current == found => {
            if !ctx.locked && now - ctx.lock_started_at >= config.target_lock_time {
                ctx.locked = true;
                messages.post_message("Target locked", 1500);
            }
        }
        (_, found) => ctx.retarget(found, now),
    }
}

/// Launch a player torpedo; guided when a lock is held. Returns the spawned
/// actor, or None while the launcher is cycling.
pub fn fire_player_torpedo(
    registry: &mut ActorRegistry,
    scene: &mut dyn SceneSink,
    effects: &mut dyn EffectSink,
    ctx: &mut TargetingContext,
    player: &mut Submarine,
    config: &SimConfig,
    now: f32,
) -> Option<Entity> {
    if now - player.last_fired_at < config.player_fire_cooldown {
        return None;
    }

    let forward = player.transform.forward();
    let origin = player.position() + forward * 8.0;
    let guided = ctx.locked && ctx.target.is_some();

    let torpedo = Torpedo {
        friendly: true,
        guided,
        speed: config.torpedo_speed,
        spawned_at: now,
        lifetime: config.torpedo_lifetime,
        target: ctx.target.filter(|_| guided).map(TargetRef::Actor),
        turn_rate: config.torpedo_turn_rate,
        damage: if guided {
            config.damage_guided
        } else {
            config.damage_unguided
        },
        collision_radius: config.torpedo_radius,
        last_floor_height: origin.y - 100.0,
    };

    let transform = Transform::from_position_rotation(origin, player.transform.rotation);
    let entity = registry.spawn_actor(
        scene,
        VisualKind::Torpedo,
        transform,
        (torpedo, Velocity::new(forward * config.torpedo_speed)),
    );

    effects.on_muzzle_flash(origin);
    effects.on_bubble(origin, 1.0);
    player.last_fired_at = now;
    if guided {
        ctx.fired = true;
    }
    Some(entity)
}

/// Launch an enemy torpedo at the player from the given transform.
pub fn spawn_enemy_torpedo(
    registry: &mut ActorRegistry,
    scene: &mut dyn SceneSink,
    effects: &mut dyn EffectSink,
    from: &Transform,
    config: &SimConfig,
    now: f32,
) -> Entity {
    let forward = from.forward();
    let origin = from.position + forward * 10.0;

    let torpedo = Torpedo {
        friendly: false,
        guided: true,
        speed: config.enemy_torpedo_speed,
        spawned_at: now,
        lifetime: config.torpedo_lifetime,
        target: Some(TargetRef::Player),
        turn_rate: config.enemy_torpedo_turn_rate,
        damage: config.enemy_torpedo_damage,
        collision_radius: config.torpedo_radius,
        last_floor_height: origin.y - 100.0,
    };

    let transform = Transform::from_position_rotation(origin, from.rotation);
    let entity = registry.spawn_actor(
        scene,
        VisualKind::Torpedo,
        transform,
        (torpedo, Velocity::new(forward * config.enemy_torpedo_speed)),
    );

    effects.on_muzzle_flash(origin);
    effects.on_bubble(origin, 0.8);
    entity
}

/// Guide, move, and collision-resolve every torpedo for one tick.
///
/// Check order per torpedo: lifetime, world boundary, max-depth safety,
/// seafloor proximity, surface breach, actor collision. All removals are
/// marked and flushed by the registry after the pass.
#[allow(clippy::too_many_arguments)]
pub fn update_torpedoes(
    registry: &mut ActorRegistry,
    ctx: &mut TargetingContext,
    player: &mut Submarine,
    terrain: &dyn TerrainQuery,
    effects: &mut dyn EffectSink,
    messages: &mut dyn MessageSink,
    config: &SimConfig,
    now: f32,
    dt: f32,
) {
    // Snapshots first: torpedo steering must not hold borrows while reading
    // other actors, and insertion order fixes the resolution order.
    let torpedoes: Vec<Entity> = registry
        .world
        .query::<&Torpedo>()
        .iter()
        .map(|(e, _)| e)
        .collect();
    let enemy_subs: Vec<(Entity, Vec3)> = registry
        .world
        .query::<(&Transform, &EnemySub)>()
        .iter()
        .map(|(e, (t, _))| (e, t.position))
        .collect();
    let sharks: Vec<(Entity, Vec3)> = registry
        .world
        .query::<(&Transform, &Shark)>()
        .iter()
        .map(|(e, (t, _))| (e, t.position))
        .collect();

    for entity in torpedoes {
        let (mut torpedo, mut transform, mut velocity) = {
            let Ok(mut q) = registry
                .world
                .query_one::<(&Torpedo, &Transform, &Velocity)>(entity)
            else {
                continue;
            };
            let Some((t, tr, v)) = q.get() else { continue };
            (*t, *tr, *v)
        };

        // 1. Lifetime expiry: fizzle quietly
        if now - torpedo.spawned_at >= torpedo.lifetime {
            effects.on_bubble(transform.position, 0.5);
            registry.mark_for_removal(entity);
            continue;
        }

        // Guidance toward a lead position ahead of the target
        if torpedo.guided {
            if let Some(target) = torpedo.target {
                match resolve_target(&registry.world, player, target) {
                    Some((target_pos, target_vel)) => {
                        let distance = transform.position.distance(target_pos);
                        let lead = target_pos
                            + target_vel * (distance / torpedo.speed) * config.prediction_factor;
                        steer_toward(&mut transform.rotation, transform.position, lead, torpedo.turn_rate, dt);
                        velocity.linear = transform.rotation * -Vec3::Z * torpedo.speed;
                    }
                    None => {
                        // Target gone: run straight on the last heading
                        torpedo.target = None;
                    }
                }
            }
        }

        transform.position += velocity.linear * dt;

        // 2. World boundary (unless a chunk system streams terrain forever)
        let planar = Vec3::new(transform.position.x, 0.0, transform.position.z);
        if !config.infinite_world && planar.length() > config.world_radius {
            registry.mark_for_removal(entity);
            continue;
        }

        // 3. Below maximum depth: safety detonation
        if transform.position.y < config.max_torpedo_depth {
            effects.on_explosion(transform.position, 1.5);
            registry.mark_for_removal(entity);
            continue;
        }

        // 4. Seafloor proximity (terrain may answer a tick late)
        let floor_query = terrain.height_at(transform.position.x, transform.position.z);
        let floor = floor_query.ready_or(torpedo.last_floor_height);
        if floor_query.is_ready() {
            torpedo.last_floor_height = floor;
        }
        if transform.position.y <= floor + config.floor_buffer {
            effects.on_explosion(transform.position, 2.0);
            effects.on_sand_impact(transform.position, 2.0, 0.8);
            registry.mark_for_removal(entity);
            continue;
        }

        // 5. Surface breach
        if transform.position.y >= config.surface_level {
            effects.on_splash(transform.position, 1.5);
            registry.mark_for_removal(entity);
            continue;
        }

        // 6. Actor collision
        let mut detonated = false;
        if torpedo.friendly {
            let hit_radius = torpedo.hit_radius(config);
            for &(enemy, enemy_pos) in &enemy_subs {
                if transform.position.distance(enemy_pos)
                    < hit_radius + config.enemy_sub_radius
                {
                    hit_enemy_sub(registry, ctx, effects, messages, enemy, enemy_pos, &torpedo, now);
                    detonated = true;
                    break;
                }
            }
            if !detonated {
                for &(shark, shark_pos) in &sharks {
                    if transform.position.distance(shark_pos)
                        < hit_radius + config.shark_radius
                    {
                        effects.on_explosion(shark_pos, 1.5);
                        registry.mark_for_removal(shark);
                        if ctx.target == Some(shark) {
                            ctx.clear();
                        }
                        detonated = true;
                        break;
                    }
                }
            }
        } else if transform.position.distance(player.position())
            < torpedo.hit_radius(config) + config.player_radius
        {
            effects.on_explosion(player.position(), 2.0);
            player.hull.take_damage(torpedo.damage, now);
            messages.post_message("Hull breach — torpedo impact!", 2000);
            detonated = true;
        }
        if detonated {
            registry.mark_for_removal(entity);
            continue;
        }

        // Write the advanced state back
        if let Ok(mut t) = registry.world.get::<&mut Torpedo>(entity) {
            *t = torpedo;
        }
        if let Ok(mut tr) = registry.world.get::<&mut Transform>(entity) {
            *tr = transform;
        }
        if let Ok(mut v) = registry.world.get::<&mut Velocity>(entity) {
            *v = velocity;
        }
    }
}

/// Look up a target's position and velocity by identity. None if despawned.
fn resolve_target(world: &World, player: &Submarine, target: TargetRef) -> Option<(Vec3, Vec3)> {
    match target {
        TargetRef::Player => Some((player.position(), player.velocity)),
        TargetRef::Actor(entity) => {
            let mut q = world.query_one::<(&Transform, Option<&Velocity>)>(entity).ok()?;
            let (transform, velocity) = q.get()?;
            Some((
                transform.position,
                velocity.map(|v| v.linear).unwrap_or(Vec3::ZERO),
            ))
        }
    }
}

/// Slerp a heading toward a look-at target at an error-adaptive rate
/// (up to 3x the base turn rate when pointing the wrong way).
pub(crate) fn steer_toward(rotation: &mut Quat, from: Vec3, target: Vec3, base_rate: f32, dt: f32) {
    let desired = Transform::look_rotation(from, target);
    let error = rotation.angle_between(desired);
    if error < 1e-4 {
        return;
    }
    let rate = base_rate * (1.0 + 2.0 * (error / std::f32::consts::PI).min(1.0));
    let t = ((rate * dt) / error).min(1.0);
    *rotation = rotation.slerp(desired, t);
}

fn hit_enemy_sub(
    registry: &mut ActorRegistry,
    ctx: &mut TargetingContext,
    effects: &mut dyn EffectSink,
    messages: &mut dyn MessageSink,
    enemy: Entity,
    enemy_pos: Vec3,
    torpedo: &Torpedo,
    now: f32,
) {
    effects.on_explosion(enemy_pos, 2.0);

    let destroyed = match registry.world.get::<&mut engine_core::Health>(enemy) {
        Ok(mut health) => {
            health.take_damage(torpedo.damage, now);
            health.is_dead()
        }
        Err(_) => false,
    };
    if destroyed {
        effects.on_explosion(enemy_pos, 4.0);
        messages.post_message("Enemy submarine destroyed", 2000);
        registry.mark_for_removal(enemy);
    }
    if ctx.target == Some(enemy) {
        ctx.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::NullSinks;
    use crate::enemy::{BehaviorPattern, EnemySub};
    use engine_core::Health;
    use rand::{rngs::StdRng, SeedableRng};

    fn deep_water(_x: f32, _z: f32) -> f32 {
        -400.0
    }

    fn spawn_enemy(registry: &mut ActorRegistry, sinks: &mut NullSinks, position: Vec3, config: &SimConfig) -> Entity {
        let mut rng = StdRng::seed_from_u64(1);
        let enemy = EnemySub::new(BehaviorPattern::Chase, position, config, &mut rng);
        registry.spawn_actor(
            sinks,
            VisualKind::EnemySub,
            Transform::from_position(position),
            (
                enemy,
                Velocity::default(),
                Health::with_regen(config.enemy_health, config.enemy_regen_rate, config.enemy_damage_recovery),
            ),
        )
    }

    #[test]
    fn lock_engages_after_continuous_tracking() {
        let config = SimConfig::default();
        let mut registry = ActorRegistry::new();
        let mut sinks = NullSinks::new();
        let player = Submarine::new(Vec3::new(0.0, -60.0, 0.0), &config);
        // Dead ahead of the default heading (-Z)
        let enemy = spawn_enemy(&mut registry, &mut sinks, Vec3::new(0.0, -60.0, -150.0), &config);

        let mut ctx = TargetingContext::new();
        update_targeting(&mut ctx, &registry.world, &player, &mut sinks, &config, 0.0);
        assert_eq!(ctx.target, Some(enemy));
        assert!(!ctx.locked);

        // Just short of the lock time: still unlocked
        update_targeting(
            &mut ctx,
            &registry.world,
            &player,
            &mut sinks,
            &config,
            config.target_lock_time * 0.9,
        );
        assert!(!ctx.locked);

        update_targeting(
            &mut ctx,
            &registry.world,
            &player,
            &mut sinks,
            &config,
            config.target_lock_time,
        );
        assert!(ctx.locked);
        assert!(sinks.messages.iter().any(|m| m.contains("locked")));
    }

    #[test]
    fn switching_targets_resets_the_lock_timer() {
        let config = SimConfig::default();
        let mut registry = ActorRegistry::new();
        let mut sinks = NullSinks::new();
        let player = Submarine::new(Vec3::new(0.0, -60.0, 0.0), &config);
        let far = spawn_enemy(&mut registry, &mut sinks, Vec3::new(0.0, -60.0, -200.0), &config);

        let mut ctx = TargetingContext::new();
        update_targeting(&mut ctx, &registry.world, &player, &mut sinks, &config, 0.0);
        assert_eq!(ctx.target, Some(far));

        // A nearer contact appears: target switches and the timer restarts
        let near = spawn_enemy(&mut registry, &mut sinks, Vec3::new(0.0, -60.0, -100.0), &config);
        update_targeting(&mut ctx, &registry.world, &player, &mut sinks, &config, 0.8);
        assert_eq!(ctx.target, Some(near));
        assert!(!ctx.locked);
        assert_eq!(ctx.lock_started_at, 0.8);
    }

    #[test]
    fn locked_fire_launches_guided_and_suppresses_search() {
        let config = SimConfig::default();
        let mut registry = ActorRegistry::new();
        let mut sinks = NullSinks::new();
        let mut player = Submarine::new(Vec3::new(0.0, -60.0, 0.0), &config);
        let enemy = spawn_enemy(&mut registry, &mut sinks, Vec3::new(0.0, -60.0, -150.0), &config);

        let mut ctx = TargetingContext::new();
        update_targeting(&mut ctx, &registry.world, &player, &mut sinks, &config, 0.0);
        update_targeting(&mut ctx, &registry.world, &player, &mut sinks, &config, 1.0);
        assert!(ctx.locked);

        let fired = fire_player_torpedo(
            &mut registry, &mut sinks, &mut sinks_effects(), &mut ctx, &mut player, &config, 1.0,
        );
        let torpedo_entity = fired.expect("launcher ready");
        let torpedo = *registry.world.get::<&Torpedo>(torpedo_entity).unwrap();
        assert!(torpedo.guided);
        assert!(torpedo.friendly);
        assert_eq!(torpedo.target, Some(TargetRef::Actor(enemy)));
        assert!(ctx.fired);

        // Acquisition stays suppressed while the torpedo tracks
        update_targeting(&mut ctx, &registry.world, &player, &mut sinks, &config, 1.5);
        assert!(ctx.fired);
        assert_eq!(ctx.target, Some(enemy));

        // Torpedo gone: search resumes from scratch
        registry.mark_for_removal(torpedo_entity);
        registry.flush_removals(&mut sinks);
        update_targeting(&mut ctx, &registry.world, &player, &mut sinks, &config, 2.0);
        assert!(!ctx.fired);
    }

    fn sinks_effects() -> NullSinks {
        NullSinks::new()
    }

    #[test]
    fn unlocked_fire_is_unguided() {
        let config = SimConfig::default();
        let mut registry = ActorRegistry::new();
        let mut sinks = NullSinks::new();
        let mut player = Submarine::new(Vec3::new(0.0, -60.0, 0.0), &config);

        let mut ctx = TargetingContext::new();
        let fired = fire_player_torpedo(
            &mut registry, &mut sinks, &mut sinks_effects(), &mut ctx, &mut player, &config, 0.0,
        )
        .unwrap();
        let torpedo = *registry.world.get::<&Torpedo>(fired).unwrap();
        assert!(!torpedo.guided);
        assert_eq!(torpedo.target, None);
        assert!(!ctx.fired);
    }

    #[test]
    fn fire_cooldown_blocks_rapid_launch() {
        let config = SimConfig::default();
        let mut registry = ActorRegistry::new();
        let mut sinks = NullSinks::new();
        let mut player = Submarine::new(Vec3::new(0.0, -60.0, 0.0), &config);
        let mut ctx = TargetingContext::new();

        assert!(fire_player_torpedo(
            &mut registry, &mut sinks, &mut sinks_effects(), &mut ctx, &mut player, &config, 0.0,
        )
        .is_some());
        assert!(fire_player_torpedo(
            &mut registry, &mut sinks, &mut sinks_effects(), &mut ctx, &mut player, &config, 0.5,
        )
        .is_none());
        assert!(fire_player_torpedo(
            &mut registry, &mut sinks, &mut sinks_effects(), &mut ctx, &mut player, &config, 1.1,
        )
        .is_some());
    }

    #[test]
    fn floor_proximity_detonates_torpedo() {
        let config = SimConfig::default();
        let mut registry = ActorRegistry::new();
        let mut sinks = NullSinks::new();
        let mut player = Submarine::new(Vec3::new(0.0, -60.0, 0.0), &config);
        let mut ctx = TargetingContext::new();

        // Drop a torpedo 3 units above a floor at -100: inside the 5-unit buffer
        let torpedo = Torpedo {
            friendly: true,
            guided: false,
            speed: 0.0,
            spawned_at: 0.0,
            lifetime: 10.0,
            target: None,
            turn_rate: 1.0,
            damage: 30.0,
            collision_radius: config.torpedo_radius,
            last_floor_height: -100.0,
        };
        let entity = registry.spawn_actor(
            &mut sinks,
            VisualKind::Torpedo,
            Transform::from_position(Vec3::new(0.0, -97.0, 0.0)),
            (torpedo, Velocity::default()),
        );

        let floor = |_: f32, _: f32| -100.0;
        let mut effects = NullSinks::new();
        update_torpedoes(
            &mut registry, &mut ctx, &mut player, &floor, &mut effects, &mut sinks, &config, 0.1, 1.0 / 60.0,
        );
        assert!(registry.is_marked(entity));
        assert_eq!(effects.explosions.len(), 1);
        assert!(effects.explosions[0].0.distance(Vec3::new(0.0, -97.0, 0.0)) < 1.0);
    }

    #[test]
    fn overkill_damage_clamps_and_destroys() {
        let config = SimConfig::default();
        let mut registry = ActorRegistry::new();
        let mut sinks = NullSinks::new();
        let mut player = Submarine::new(Vec3::new(0.0, -60.0, 0.0), &config);
        let mut ctx = TargetingContext::new();

        let enemy = spawn_enemy(&mut registry, &mut sinks, Vec3::new(0.0, -60.0, -20.0), &config);
        {
            let mut health = registry.world.get::<&mut Health>(enemy).unwrap();
            health.current = 40.0;
        }

        // Torpedo already touching the enemy, damage 100
        let torpedo = Torpedo {
            friendly: true,
            guided: false,
            speed: 0.0,
            spawned_at: 0.0,
            lifetime: 10.0,
            target: None,
            turn_rate: 1.0,
            damage: 100.0,
            collision_radius: config.torpedo_radius,
            last_floor_height: -400.0,
        };
        let entity = registry.spawn_actor(
            &mut sinks,
            VisualKind::Torpedo,
            Transform::from_position(Vec3::new(0.0, -60.0, -22.0)),
            (torpedo, Velocity::default()),
        );

        let mut effects = NullSinks::new();
        update_torpedoes(
            &mut registry, &mut ctx, &mut player, &deep_water, &mut effects, &mut sinks, &config, 0.1, 1.0 / 60.0,
        );

        let health = *registry.world.get::<&Health>(enemy).unwrap();
        assert_eq!(health.current, 0.0);
        assert!(registry.is_marked(enemy));
        assert!(registry.is_marked(entity));
    }

    #[test]
    fn lifetime_expiry_removes_torpedo() {
        let config = SimConfig::default();
        let mut registry = ActorRegistry::new();
        let mut sinks = NullSinks::new();
        let mut player = Submarine::new(Vec3::new(0.0, -60.0, 0.0), &config);
        let mut ctx = TargetingContext::new();

        let entity = fire_player_torpedo(
            &mut registry, &mut sinks, &mut sinks_effects(), &mut ctx, &mut player, &config, 0.0,
        )
        .unwrap();

        let mut effects = NullSinks::new();
        update_torpedoes(
            &mut registry,
            &mut ctx,
            &mut player,
            &deep_water,
            &mut effects,
            &mut sinks,
            &config,
            config.torpedo_lifetime + 0.1,
            1.0 / 60.0,
        );
        assert!(registry.is_marked(entity));
    }

    #[test]
    fn enemy_torpedo_damages_player_hull() {
        let config = SimConfig::default();
        let mut registry = ActorRegistry::new();
        let mut sinks = NullSinks::new();
        let mut player = Submarine::new(Vec3::new(0.0, -60.0, 0.0), &config);
        let mut ctx = TargetingContext::new();

        let mut launcher = Transform::from_position(Vec3::new(0.0, -60.0, -20.0));
        launcher.look_at(player.position());
        spawn_enemy_torpedo(&mut registry, &mut sinks, &mut sinks_effects(), &launcher, &config, 0.0);

        let before = player.hull.current;
        let mut effects = NullSinks::new();
        // The 10-unit spawn offset puts the torpedo inside the player hit radius
        update_torpedoes(
            &mut registry, &mut ctx, &mut player, &deep_water, &mut effects, &mut sinks, &config, 0.1, 1.0 / 60.0,
        );
        assert!(player.hull.current < before);
    }
}
