//! The simulation facade: owns all state, runs one fixed tick at a time.
//!
//! Collaborators (terrain, biomes, scene, effects, messages) are borrowed per
//! tick so the host can own them however it likes. Tick order is fixed:
//! player physics, enemy force, wildlife, targeting, player fire, torpedoes,
//! then visual sync and the removal flush.

use engine_core::{Entity, Transform, Vec3};
use ocean::{BiomeQuery, TerrainQuery};

use crate::config::SimConfig;
use crate::effects::{EffectSink, MessageSink, SceneSink, VisualHandle, VisualKind};
use crate::enemy::{EnemyForce, EnemySub};
use crate::input::HelmInput;
use crate::registry::ActorRegistry;
use crate::shark::{Shark, Wildlife};
use crate::submarine::{self, Submarine};
use crate::torpedo::{self, TargetingContext, Torpedo};
use crate::SimError;

/// Everything the simulation borrows from the host for one tick.
pub struct Collaborators<'a> {
    pub terrain: &'a dyn TerrainQuery,
    pub biomes: &'a dyn BiomeQuery,
    pub scene: &'a mut dyn SceneSink,
    pub effects: &'a mut dyn EffectSink,
    pub messages: &'a mut dyn MessageSink,
}

/// The whole underwater combat simulation.
pub struct Simulation {
    pub config: SimConfig,
    pub registry: ActorRegistry,
    pub submarine: Submarine,
    pub targeting: TargetingContext,
    enemies: EnemyForce,
    wildlife: Wildlife,
    player_visual: VisualHandle,
    now: f32,
    destruction_announced: bool,
}

impl Simulation {
    /// Start a simulation with the player at the given position. The seed
    /// fixes every spawn roll, so identical seeds and inputs replay the same
    /// engagement.
    pub fn new(
        config: SimConfig,
        seed: u64,
        start_position: Vec3,
        scene: &mut dyn SceneSink,
    ) -> Self {
        let submarine = Submarine::new(start_position, &config);
        let player_visual = scene.spawn_visual(VisualKind::PlayerSub, &submarine.transform);
        Self {
            config,
            registry: ActorRegistry::new(),
            submarine,
            targeting: TargetingContext::new(),
            enemies: EnemyForce::new(seed),
            wildlife: Wildlife::new(seed.wrapping_add(1)),
            player_visual,
            now: 0.0,
            destruction_announced: false,
        }
    }

    /// Advance the simulation by `dt` seconds. Returns the player's
    /// pre-update position for the host's obstacle-collision pass.
    pub fn tick(&mut self, input: &HelmInput, dt: f32, c: &mut Collaborators) -> Vec3 {
        self.now += dt;

        let previous = submarine::update_physics(
            &mut self.submarine,
            input,
            c.terrain,
            c.effects,
            &self.config,
            dt,
        );

        self.enemies.update(
            &mut self.registry,
            &self.submarine,
            c.terrain,
            c.biomes,
            c.scene,
            c.effects,
            &self.config,
            self.now,
            dt,
        );

        self.wildlife.update(
            &mut self.registry,
            self.submarine.position(),
            c.terrain,
            c.biomes,
            c.scene,
            &self.config,
            dt,
        );

        torpedo::update_targeting(
            &mut self.targeting,
            &self.registry.world,
            &self.submarine,
            c.messages,
            &self.config,
            self.now,
        );

        if input.fire {
            torpedo::fire_player_torpedo(
                &mut self.registry,
                c.scene,
                c.effects,
                &mut self.targeting,
                &mut self.submarine,
                &self.config,
                self.now,
            );
        }

        torpedo::update_torpedoes(
            &mut self.registry,
            &mut self.targeting,
            &mut self.submarine,
            c.terrain,
            c.effects,
            c.messages,
            &self.config,
            self.now,
            dt,
        );

        if self.submarine.is_destroyed() && !self.destruction_announced {
            self.destruction_announced = true;
            c.effects.on_explosion(self.submarine.position(), 4.0);
            c.messages.post_message("Hull integrity lost", 4000);
        }

        self.retire_invalid_actors();
        self.registry.sync_visuals(c.scene);
        c.scene
            .update_visual(self.player_visual, &self.submarine.transform);
        self.registry.flush_removals(c.scene);

        previous
    }

    /// Sweep for actors whose state went non-finite. They are logged and
    /// retired rather than allowed to poison every distance check.
    fn retire_invalid_actors(&mut self) {
        let bad: Vec<Entity> = self
            .registry
            .world
            .query::<&Transform>()
            .iter()
            .filter(|(_, t)| !t.position.is_finite())
            .map(|(e, _)| e)
            .collect();
        for entity in bad {
            log::error!("{}", SimError::NonFiniteActor(entity));
            self.registry.mark_for_removal(entity);
        }
    }

    /// Seafloor height directly under the player.
    pub fn floor_under_player(&self, terrain: &dyn TerrainQuery) -> Result<f32, SimError> {
        let p = self.submarine.position();
        let height = terrain.height_at(p.x, p.z).ready_or(self.submarine.last_floor_height);
        if height.is_finite() {
            Ok(height)
        } else {
            Err(SimError::InvalidHeight(p.x, p.z))
        }
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn enemy_count(&self) -> usize {
        self.registry.count::<EnemySub>()
    }

    pub fn shark_count(&self) -> usize {
        self.registry.count::<Shark>()
    }

    pub fn torpedo_count(&self) -> usize {
        self.registry.count::<Torpedo>()
    }

    /// Current auto-target, if any.
    pub fn current_target(&self) -> Option<Entity> {
        self.targeting.target
    }

    pub fn has_lock(&self) -> bool {
        self.targeting.locked
    }

    pub fn depth(&self) -> u32 {
        self.submarine.depth
    }

    pub fn hull_percentage(&self) -> f32 {
        self.submarine.hull.percentage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::NullSinks;
    use ocean::{OceanBiomes, Seafloor};

    struct Harness {
        scene: NullSinks,
        effects: NullSinks,
        messages: NullSinks,
        terrain: Seafloor,
        biomes: OceanBiomes,
    }

    impl Harness {
        fn new(seed: u64) -> Self {
            Self {
                scene: NullSinks::new(),
                effects: NullSinks::new(),
                messages: NullSinks::new(),
                terrain: Seafloor::new(seed as u32),
                biomes: OceanBiomes::from_seed(seed),
            }
        }

        fn collaborators(&mut self) -> Collaborators<'_> {
            Collaborators {
                terrain: &self.terrain,
                biomes: &self.biomes,
                scene: &mut self.scene,
                effects: &mut self.effects,
                messages: &mut self.messages,
            }
        }
    }

    #[test]
    fn simulation_survives_a_long_run() {
        let mut h = Harness::new(42);
        let mut sim = Simulation::new(
            SimConfig::default(),
            42,
            Vec3::new(0.0, -80.0, 0.0),
            &mut h.scene,
        );

        let input = HelmInput {
            forward: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..1800 {
            let mut c = h.collaborators();
            sim.tick(&input, 1.0 / 60.0, &mut c);
        }

        // Position stays finite and the population caps hold
        assert!(sim.submarine.position().is_finite());
        assert!(sim.enemy_count() <= sim.config.max_enemies);
        assert!(sim.shark_count() <= sim.config.max_sharks);
        assert!(sim.depth() < 1000);
    }

    #[test]
    fn same_seed_and_inputs_replay_identically() {
        let run = |seed: u64| {
            let mut h = Harness::new(seed);
            let mut sim = Simulation::new(
                SimConfig::default(),
                seed,
                Vec3::new(0.0, -80.0, 0.0),
                &mut h.scene,
            );
            let input = HelmInput {
                forward: true,
                target_yaw: 0.3,
                ..Default::default()
            };
            for _ in 0..600 {
                let mut c = h.collaborators();
                sim.tick(&input, 1.0 / 60.0, &mut c);
            }
            (sim.submarine.position(), sim.enemy_count(), sim.shark_count())
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn tick_returns_pre_update_position() {
        let mut h = Harness::new(1);
        let mut sim = Simulation::new(
            SimConfig::default(),
            1,
            Vec3::new(0.0, -80.0, 0.0),
            &mut h.scene,
        );
        let before = sim.submarine.position();
        let input = HelmInput {
            forward: true,
            ..Default::default()
        };
        let mut c = h.collaborators();
        let returned = sim.tick(&input, 1.0 / 60.0, &mut c);
        assert_eq!(returned, before);
    }

    #[test]
    fn non_finite_actors_are_retired() {
        let mut h = Harness::new(3);
        let mut sim = Simulation::new(
            SimConfig::default(),
            3,
            Vec3::new(0.0, -80.0, 0.0),
            &mut h.scene,
        );
        let rogue = sim.registry.spawn_actor(
            &mut h.scene,
            crate::effects::VisualKind::Shark,
            Transform::from_position(Vec3::new(f32::NAN, 0.0, 0.0)),
            (crate::shark::Shark {
                cruise_speed: 0.0,
                wander_phase: 0.0,
                turn_bias: 0.0,
            },),
        );

        let mut c = h.collaborators();
        sim.tick(&HelmInput::default(), 1.0 / 60.0, &mut c);
        assert!(!sim.registry.world.contains(rogue));
    }

    #[test]
    fn visuals_track_the_actor_population() {
        let mut h = Harness::new(9);
        let mut sim = Simulation::new(
            SimConfig {
                enemy_spawn_interval: 0.1,
                enemy_spawn_density_scale: 10.0,
                ..Default::default()
            },
            9,
            Vec3::new(0.0, -80.0, 0.0),
            &mut h.scene,
        );
        for _ in 0..600 {
            let mut c = h.collaborators();
            sim.tick(&HelmInput::default(), 1.0 / 60.0, &mut c);
        }
        // Player visual + one visual per live actor
        let actors = sim.enemy_count() + sim.shark_count() + sim.torpedo_count();
        assert_eq!(h.scene.live_count(), actors + 1);
    }
}
