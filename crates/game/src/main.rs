//! Headless OpenDepths run: drives the simulation at a fixed 60 Hz with a
//! scripted patrol and logs what happens. Useful for soak-testing the combat
//! core without a renderer attached.

use anyhow::Result;
use engine_core::{Time, Transform, Vec3};
use game::{
    Collaborators, EffectSink, HelmInput, MessageSink, SceneSink, SimConfig, Simulation,
    VisualHandle, VisualKind,
};
use ocean::{OceanBiomes, Seafloor};

/// Scene/effect/message sinks that narrate to the log.
#[derive(Default)]
struct LogSinks {
    next_handle: u64,
    live: usize,
}

impl SceneSink for LogSinks {
    fn spawn_visual(&mut self, kind: VisualKind, transform: &Transform) -> VisualHandle {
        self.next_handle += 1;
        self.live += 1;
        log::debug!("visual {:?} spawned at {:?}", kind, transform.position);
        VisualHandle(self.next_handle)
    }

    fn despawn_visual(&mut self, handle: VisualHandle) {
        self.live = self.live.saturating_sub(1);
        log::debug!("visual {:?} despawned", handle);
    }
}

impl EffectSink for LogSinks {
    fn on_explosion(&mut self, position: Vec3, size: f32) {
        log::info!(
            "explosion ({size:.1}) at ({:.0}, {:.0}, {:.0})",
            position.x,
            position.y,
            position.z
        );
    }

    fn on_splash(&mut self, position: Vec3, _size: f32) {
        log::debug!("splash at ({:.0}, {:.0})", position.x, position.z);
    }

    fn on_sand_impact(&mut self, position: Vec3, _size: f32, _intensity: f32) {
        log::debug!("sand impact at ({:.0}, {:.0})", position.x, position.z);
    }

    fn on_muzzle_flash(&mut self, _position: Vec3) {}

    fn on_bubble(&mut self, _position: Vec3, _size: f32) {}
}

impl MessageSink for LogSinks {
    fn post_message(&mut self, text: &str, _duration_ms: u32) {
        log::info!("[HUD] {text}");
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let duration: f32 = std::env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(30.0);
    let seed: u64 = std::env::args()
        .nth(2)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(2026);

    let config = SimConfig::load();
    let terrain = Seafloor::new(seed as u32);
    let biomes = OceanBiomes::from_seed(seed);
    let mut scene = LogSinks::default();
    let mut effects = LogSinks::default();
    let mut messages = LogSinks::default();

    let mut sim = Simulation::new(config, seed, Vec3::new(0.0, -80.0, 0.0), &mut scene);
    log::info!("OpenDepths headless run: {duration:.0}s at seed {seed}");

    let time = Time::new();
    let dt = time.fixed_timestep_seconds();
    let ticks = (duration / dt).ceil() as u64;
    let mut last_report = 0.0_f32;

    for tick in 0..ticks {
        let t = tick as f32 * dt;

        // Scripted patrol: cruise forward, slow yaw sweep, fire every 3s
        let input = HelmInput {
            forward: true,
            fire: (t % 3.0) < dt,
            target_yaw: (t * 0.05).sin() * 0.8,
            target_pitch: -0.05,
            ..Default::default()
        };

        let mut c = Collaborators {
            terrain: &terrain,
            biomes: &biomes,
            scene: &mut scene,
            effects: &mut effects,
            messages: &mut messages,
        };
        sim.tick(&input, dt, &mut c);

        if sim.now() - last_report >= 5.0 {
            last_report = sim.now();
            let floor = sim.floor_under_player(&terrain)?;
            log::info!(
                "t={:.0}s depth={}m floor={:.0}m hull={:.0}% enemies={} sharks={} torpedoes={} lock={}",
                sim.now(),
                sim.depth(),
                -floor,
                sim.hull_percentage() * 100.0,
                sim.enemy_count(),
                sim.shark_count(),
                sim.torpedo_count(),
                sim.has_lock(),
            );
        }

        if sim.submarine.is_destroyed() {
            log::warn!("player submarine destroyed at t={:.1}s", sim.now());
            break;
        }
    }

    log::info!(
        "run complete: {:.0} sim-seconds, {} live visuals",
        sim.now(),
        scene.live
    );
    Ok(())
}
