//! Core simulation types for OpenDepths.
//!
//! This crate provides the foundational types used by every simulation
//! system:
//! - Transform and spatial helpers
//! - Frame timing
//! - Shared actor components (velocity, health)

pub mod components;
pub mod time;
pub mod transform;

pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
