//! Helm input snapshot.
//!
//! Device binding is the host's problem; the simulation consumes one
//! already-resolved snapshot per tick. Target yaw/pitch come from the host's
//! mouse handling, pre-clamped (physics clamps pitch again regardless).

/// Discrete and continuous control state for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelmInput {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub dive: bool,
    pub surface: bool,
    pub fire: bool,
    /// Desired heading in radians.
    pub target_yaw: f32,
    /// Desired pitch in radians, negative nose-down.
    pub target_pitch: f32,
}

impl HelmInput {
    /// Strafe direction: -1 left, 0 idle, 1 right.
    pub fn strafe_dir(&self) -> f32 {
        (self.strafe_right as i32 - self.strafe_left as i32) as f32
    }

    /// Vertical thrust direction: -1 dive, 0 idle, 1 surface.
    pub fn vertical_dir(&self) -> f32 {
        (self.surface as i32 - self.dive as i32) as f32
    }
}
