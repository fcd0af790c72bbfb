//! Actor registry: owns the ECS world, visual handles, and removal order.
//!
//! Systems reference actors by `Entity` identity only. Removal is two-phase:
//! anything may mark an actor during the update pass, and the registry flushes
//! marks at end of pass so in-flight iteration never observes a half-removed
//! actor. Visual teardown happens exactly once, here and nowhere else.

use engine_core::Transform;
use hecs::{DynamicBundle, Entity, World};

use crate::effects::{SceneSink, VisualHandle, VisualKind};

/// Component linking an actor to its scene-graph visual.
#[derive(Debug, Clone, Copy)]
pub struct Visual(pub VisualHandle);

#[derive(Default)]
pub struct ActorRegistry {
    pub world: World,
    pending_removal: Vec<Entity>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an actor with a transform, a scene visual, and extra components.
    pub fn spawn_actor(
        &mut self,
        scene: &mut dyn SceneSink,
        kind: VisualKind,
        transform: Transform,
        extra: impl DynamicBundle,
    ) -> Entity {
        let handle = scene.spawn_visual(kind, &transform);
        let entity = self.world.spawn(extra);
        // Entity was just created; insert cannot fail
        let _ = self.world.insert(entity, (transform, Visual(handle)));
        entity
    }

    /// Queue an actor for removal at end of pass. Duplicate marks are fine.
    pub fn mark_for_removal(&mut self, entity: Entity) {
        if !self.pending_removal.contains(&entity) {
            self.pending_removal.push(entity);
        }
    }

    pub fn is_marked(&self, entity: Entity) -> bool {
        self.pending_removal.contains(&entity)
    }

    /// Remove every marked actor, releasing each visual handle exactly once.
    pub fn flush_removals(&mut self, scene: &mut dyn SceneSink) {
        for entity in std::mem::take(&mut self.pending_removal) {
            // Taking the component (not just reading it) is what guarantees
            // single teardown even if the same entity is flushed twice.
            if let Ok(visual) = self.world.remove_one::<Visual>(entity) {
                scene.despawn_visual(visual.0);
            }
            if self.world.despawn(entity).is_err() {
                log::warn!("removal of already-despawned actor {:?}", entity);
            }
        }
    }

    /// Push current transforms to the scene for all live visual actors.
    pub fn sync_visuals(&mut self, scene: &mut dyn SceneSink) {
        for (_, (transform, visual)) in self.world.query_mut::<(&Transform, &Visual)>() {
            scene.update_visual(visual.0, transform);
        }
    }

    /// Count live actors carrying component `T`.
    pub fn count<T: hecs::Component>(&self) -> usize {
        self.world.query::<&T>().iter().count()
    }
}
