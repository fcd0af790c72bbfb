//! Simulation tuning. Loaded from config.ron at startup.
//!
//! Every "feel" constant lives here rather than in the systems that consume
//! it: fire-suppression odds, lock timing, spawn densities and cooldowns are
//! tunable, not invariants.

use serde::{Deserialize, Serialize};

/// Tuning constants for the whole simulation. Loaded from `config.ron` in the
/// current directory; a missing or invalid file falls back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Player submarine ────────────────────────────────────────────────
    /// Forward propulsion ceiling. Reverse is limited to half of this.
    pub max_propulsion: f32,
    /// Propulsion gained per second of held thrust input.
    pub propulsion_acceleration: f32,
    /// Per-update decay factor applied at 60 Hz equivalence when idle.
    pub propulsion_decay: f32,
    /// Forward speed in units/second at full propulsion.
    pub movement_speed: f32,
    /// Lateral strafe speed in units/second.
    pub strafe_speed: f32,
    /// Vertical dive/surface speed in units/second.
    pub vertical_speed: f32,
    /// Pitch clamp in radians.
    pub max_pitch_angle: f32,
    /// Downward acceleration while airborne.
    pub gravity: f32,
    /// Water surface height.
    pub surface_level: f32,
    /// Minimum clearance kept between an actor and the seafloor.
    pub floor_buffer: f32,
    /// Upward drift per second in the (-5, 0) depth band.
    pub buoyancy_shallow: f32,
    /// Upward drift per second in the (-20, -5) depth band.
    pub buoyancy_mid: f32,
    /// Player hull integrity.
    pub player_hull: f32,
    /// Player sphere radius for enemy torpedo hits.
    pub player_radius: f32,
    /// Seconds between player torpedo launches.
    pub player_fire_cooldown: f32,

    // ── Enemy submarines ────────────────────────────────────────────────
    /// Maximum enemy submarines alive at once.
    pub max_enemies: usize,
    /// Seconds between spawn attempts.
    pub enemy_spawn_interval: f32,
    /// Global multiplier on biome hostile density for the spawn roll.
    pub enemy_spawn_density_scale: f32,
    /// Ring radius around the player where enemies appear.
    pub enemy_spawn_distance: f32,
    /// Enemies further than this from the player are despawned.
    pub enemy_despawn_distance: f32,
    /// Minimum spawn clearance above the seafloor.
    pub enemy_spawn_min_height: f32,
    /// Cruise speed in units/second.
    pub enemy_speed: f32,
    /// Base turn rate in radians/second; scales up to 3x with angular error.
    pub enemy_turn_rate: f32,
    pub enemy_health: f32,
    /// Health per second recovered after the damage recovery window.
    pub enemy_regen_rate: f32,
    /// Seconds without damage before regeneration resumes.
    pub enemy_damage_recovery: f32,
    /// Outer edge of the torpedo fire envelope.
    pub enemy_attack_range: f32,
    /// Inner edge of the fire envelope (too close to arm).
    pub enemy_min_fire_distance: f32,
    /// Max angle (degrees) off the enemy's nose for a fire solution.
    pub enemy_fire_cone_deg: f32,
    /// Chance a valid fire solution is passed up anyway.
    pub enemy_fire_suppression: f32,
    /// Per-enemy cooldown randomized in [min, max] seconds.
    pub enemy_cooldown_min: f32,
    pub enemy_cooldown_max: f32,
    /// Minimum spacing between launches across ALL enemies.
    pub global_torpedo_cooldown: f32,
    /// Enemy torpedoes in the water at once.
    pub max_enemy_torpedoes: usize,
    /// Velocity lead factor for the intercept pattern.
    pub intercept_lead_factor: f32,
    /// Patrol leg length randomized in [min, max].
    pub patrol_distance_min: f32,
    pub patrol_distance_max: f32,
    /// Patrol enemies chase once the player is inside this fraction of attack range.
    pub patrol_aggro_fraction: f32,
    /// Ambushers spring when the player comes this close.
    pub ambush_distance: f32,
    /// ...or after waiting this long at the ambush point.
    pub max_ambush_time: f32,
    /// Behavior pattern draw weights (chase, intercept, patrol, ambush).
    pub pattern_weights: [f32; 4],

    // ── Torpedoes & targeting ───────────────────────────────────────────
    pub torpedo_speed: f32,
    pub enemy_torpedo_speed: f32,
    /// Seconds before a torpedo fizzles out.
    pub torpedo_lifetime: f32,
    /// Base guidance turn rate in radians/second.
    pub torpedo_turn_rate: f32,
    /// Enemy torpedoes steer more lazily.
    pub enemy_torpedo_turn_rate: f32,
    /// Lead-prediction factor for guidance.
    pub prediction_factor: f32,
    pub torpedo_radius: f32,
    /// Guided torpedoes check a larger hit volume.
    pub guided_radius_factor: f32,
    pub enemy_sub_radius: f32,
    pub shark_radius: f32,
    pub damage_unguided: f32,
    pub damage_guided: f32,
    pub enemy_torpedo_damage: f32,
    /// Depth at which a torpedo safety-detonates.
    pub max_torpedo_depth: f32,
    /// Horizontal world boundary; ignored when `infinite_world` is set.
    pub world_radius: f32,
    /// Set when a streaming chunk system provides unbounded terrain.
    pub infinite_world: bool,
    /// Auto-targeting scan radius.
    pub detection_range: f32,
    /// Max angle (degrees) off the player's nose for target acquisition.
    pub detection_cone_deg: f32,
    /// Continuous tracking time before a lock engages.
    pub target_lock_time: f32,

    // ── Wildlife ────────────────────────────────────────────────────────
    pub max_sharks: usize,
    pub shark_spawn_interval: f32,
    pub shark_speed: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_propulsion: 1.0,
            propulsion_acceleration: 1.2,
            propulsion_decay: 0.95,
            movement_speed: 30.0,
            strafe_speed: 18.0,
            vertical_speed: 10.0,
            max_pitch_angle: 0.7,
            gravity: 9.8,
            surface_level: 0.0,
            floor_buffer: 5.0,
            buoyancy_shallow: 3.0,
            buoyancy_mid: 1.2,
            player_hull: 200.0,
            player_radius: 6.0,
            player_fire_cooldown: 1.0,

            max_enemies: 5,
            enemy_spawn_interval: 5.0,
            enemy_spawn_density_scale: 0.6,
            enemy_spawn_distance: 300.0,
            enemy_despawn_distance: 600.0,
            enemy_spawn_min_height: 20.0,
            enemy_speed: 25.0,
            enemy_turn_rate: 1.5,
            enemy_health: 100.0,
            enemy_regen_rate: 2.0,
            enemy_damage_recovery: 8.0,
            enemy_attack_range: 230.0,
            enemy_min_fire_distance: 80.0,
            enemy_fire_cone_deg: 75.0,
            enemy_fire_suppression: 0.4,
            enemy_cooldown_min: 5.0,
            enemy_cooldown_max: 9.0,
            global_torpedo_cooldown: 2.0,
            max_enemy_torpedoes: 3,
            intercept_lead_factor: 0.8,
            patrol_distance_min: 60.0,
            patrol_distance_max: 140.0,
            patrol_aggro_fraction: 0.7,
            ambush_distance: 120.0,
            max_ambush_time: 25.0,
            pattern_weights: [0.4, 0.3, 0.2, 0.1],

            torpedo_speed: 60.0,
            enemy_torpedo_speed: 45.0,
            torpedo_lifetime: 10.0,
            torpedo_turn_rate: 1.2,
            enemy_torpedo_turn_rate: 0.6,
            prediction_factor: 0.7,
            torpedo_radius: 3.0,
            guided_radius_factor: 1.8,
            enemy_sub_radius: 8.0,
            shark_radius: 4.0,
            damage_unguided: 30.0,
            damage_guided: 40.0,
            enemy_torpedo_damage: 25.0,
            max_torpedo_depth: -500.0,
            world_radius: 2000.0,
            infinite_world: false,
            detection_range: 400.0,
            detection_cone_deg: 60.0,
            target_lock_time: 1.0,

            max_sharks: 6,
            shark_spawn_interval: 7.0,
            shark_speed: 8.0,
        }
    }
}

impl SimConfig {
    /// Load config from `config.ron`. If the file is missing or invalid,
    /// returns defaults.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_ron() {
        let config = SimConfig::default();
        let text = ron::ser::to_string(&config).unwrap();
        let back: SimConfig = ron::from_str(&text).unwrap();
        assert_eq!(back.enemy_attack_range, config.enemy_attack_range);
        assert_eq!(back.pattern_weights, config.pattern_weights);
    }

    #[test]
    fn fire_envelope_is_sane() {
        let config = SimConfig::default();
        assert!(config.enemy_min_fire_distance < config.enemy_attack_range);
        assert!(config.enemy_cooldown_min <= config.enemy_cooldown_max);
    }
}
