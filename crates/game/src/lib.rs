//! OpenDepths simulation core.
//!
//! Real-time underwater combat: player submarine physics, enemy submarine
//! behavior patterns, torpedo guidance and collision, and the actor registry
//! that owns every lifecycle. Rendering, audio, input devices, and terrain
//! generation live behind the collaborator traits in [`effects`] and the
//! query traits in the `ocean` crate.

pub mod config;
pub mod effects;
pub mod enemy;
pub mod input;
pub mod registry;
pub mod shark;
pub mod submarine;
pub mod torpedo;
pub mod update;

pub use config::SimConfig;
pub use effects::{EffectSink, MessageSink, NullSinks, SceneSink, VisualHandle, VisualKind};
pub use enemy::{BehaviorPattern, EnemyForce, EnemySub};
pub use input::HelmInput;
pub use registry::{ActorRegistry, Visual};
pub use shark::{Shark, Wildlife};
pub use submarine::Submarine;
pub use torpedo::{TargetRef, TargetingContext, Torpedo};
pub use update::{Collaborators, Simulation};

/// Errors raised by per-actor updates. These never abort a tick; the update
/// loop logs them and queues the offending actor for removal.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("actor {0:?} reached a non-finite position")]
    NonFiniteActor(hecs::Entity),
    #[error("terrain produced a non-finite height at ({0}, {1})")]
    InvalidHeight(f32, f32),
}
