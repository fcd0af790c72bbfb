//! Shared actor components used across the simulation.

use glam::Vec3;

/// Velocity component for moving actors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Velocity {
    pub linear: Vec3,
}

impl Velocity {
    pub fn new(linear: Vec3) -> Self {
        Self { linear }
    }
}

/// Health component for damageable actors.
///
/// Supports delayed regeneration: once `regen_delay` seconds have passed
/// since the last hit, `regenerate` restores `regen_rate` health per second
/// up to `max`. Actors without regeneration use `new` (rate 0).
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    /// Health restored per second once recovery starts.
    pub regen_rate: f32,
    /// Seconds after the last hit before regeneration resumes.
    pub regen_delay: f32,
    /// Simulation time of the last damage application.
    pub last_damage_at: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            regen_rate: 0.0,
            regen_delay: 0.0,
            last_damage_at: f32::NEG_INFINITY,
        }
    }

    pub fn with_regen(max: f32, regen_rate: f32, regen_delay: f32) -> Self {
        Self {
            regen_rate,
            regen_delay,
            ..Self::new(max)
        }
    }

    /// Apply damage, clamping at zero, and record the hit time.
    pub fn take_damage(&mut self, amount: f32, now: f32) {
        self.current = (self.current - amount).max(0.0);
        self.last_damage_at = now;
    }

    /// Tick regeneration. No-op while dead or still inside the recovery delay.
    pub fn regenerate(&mut self, now: f32, dt: f32) {
        if self.is_dead() || self.regen_rate <= 0.0 {
            return;
        }
        if now - self.last_damage_at >= self.regen_delay {
            self.current = (self.current + self.regen_rate * dt).min(self.max);
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        self.current / self.max
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_at_zero() {
        let mut h = Health::new(40.0);
        h.take_damage(100.0, 5.0);
        assert_eq!(h.current, 0.0);
        assert!(h.is_dead());
    }

    #[test]
    fn regen_waits_for_recovery_delay() {
        let mut h = Health::with_regen(100.0, 10.0, 3.0);
        h.take_damage(50.0, 0.0);

        // Inside the delay window: no recovery
        h.regenerate(2.0, 1.0);
        assert_eq!(h.current, 50.0);

        // Past the delay: recovers at regen_rate
        h.regenerate(3.5, 1.0);
        assert_eq!(h.current, 60.0);

        // Never exceeds max
        h.regenerate(100.0, 100.0);
        assert_eq!(h.current, h.max);
    }

    #[test]
    fn dead_actors_do_not_regenerate() {
        let mut h = Health::with_regen(100.0, 10.0, 0.0);
        h.take_damage(100.0, 0.0);
        h.regenerate(10.0, 1.0);
        assert!(h.is_dead());
    }
}
