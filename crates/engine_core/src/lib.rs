//! Core engine types and utilities for the journey workspace.
//!
//! This crate provides the foundational types used across all systems:
//! - Transform and spatial data
//! - Frame timing
//! - Cancellable one-shot timers

pub mod time;
pub mod timer;
pub mod transform;

pub use time::*;
pub use timer::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
