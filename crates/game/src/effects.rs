//! Collaborator interfaces: scene presentation, visual effects, messaging.
//!
//! The core never touches rendering internals; it raises fire-and-forget
//! events through these sinks and owns only the opaque handles the scene
//! gives back.

use engine_core::{Transform, Vec3};

/// Opaque handle to a visual spawned by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u64);

/// What kind of actor a visual represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    PlayerSub,
    EnemySub,
    Shark,
    Torpedo,
}

/// Scene-graph presentation of actors. The registry owns every handle and
/// releases each exactly once.
pub trait SceneSink {
    fn spawn_visual(&mut self, kind: VisualKind, transform: &Transform) -> VisualHandle;
    fn despawn_visual(&mut self, handle: VisualHandle);
    /// Per-frame transform sync. Default no-op for sinks that poll instead.
    fn update_visual(&mut self, _handle: VisualHandle, _transform: &Transform) {}
}

/// Fire-and-forget visual effect hooks. The collaborator owns all timing and
/// appearance; the core never awaits results.
pub trait EffectSink {
    fn on_explosion(&mut self, position: Vec3, size: f32);
    fn on_splash(&mut self, position: Vec3, size: f32);
    fn on_sand_impact(&mut self, position: Vec3, size: f32, intensity: f32);
    fn on_muzzle_flash(&mut self, position: Vec3);
    fn on_bubble(&mut self, position: Vec3, size: f32);
}

/// Fire-and-forget user-facing notifications.
pub trait MessageSink {
    fn post_message(&mut self, text: &str, duration_ms: u32);
}

/// Recording no-op sinks for tests and headless runs. Tracks handle churn so
/// tests can assert visuals are released exactly once.
#[derive(Debug, Default)]
pub struct NullSinks {
    next_handle: u64,
    pub live_visuals: Vec<VisualHandle>,
    pub despawned: Vec<VisualHandle>,
    pub explosions: Vec<(Vec3, f32)>,
    pub splashes: usize,
    pub sand_impacts: usize,
    pub muzzle_flashes: usize,
    pub bubbles: usize,
    pub messages: Vec<String>,
}

impl NullSinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live_visuals.len()
    }
}

impl SceneSink for NullSinks {
    fn spawn_visual(&mut self, _kind: VisualKind, _transform: &Transform) -> VisualHandle {
        self.next_handle += 1;
        let handle = VisualHandle(self.next_handle);
        self.live_visuals.push(handle);
        handle
    }

    fn despawn_visual(&mut self, handle: VisualHandle) {
        if let Some(idx) = self.live_visuals.iter().position(|h| *h == handle) {
            self.live_visuals.swap_remove(idx);
            self.despawned.push(handle);
        } else {
            log::warn!("double despawn of visual {:?}", handle);
        }
    }
}

impl EffectSink for NullSinks {
    fn on_explosion(&mut self, position: Vec3, size: f32) {
        self.explosions.push((position, size));
    }

    fn on_splash(&mut self, _position: Vec3, _size: f32) {
        self.splashes += 1;
    }

    fn on_sand_impact(&mut self, _position: Vec3, _size: f32, _intensity: f32) {
        self.sand_impacts += 1;
    }

    fn on_muzzle_flash(&mut self, _position: Vec3) {
        self.muzzle_flashes += 1;
    }

    fn on_bubble(&mut self, _position: Vec3, _size: f32) {
        self.bubbles += 1;
    }
}

impl MessageSink for NullSinks {
    fn post_message(&mut self, text: &str, _duration_ms: u32) {
        self.messages.push(text.to_string());
    }
}
