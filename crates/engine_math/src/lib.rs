//! # engine_math
//!
//! Math types for the sample game engine. Re-exports [`glam`] for linear
//! algebra and defines the engine's spatial [`Transform`].

pub mod transform;

// Re-export glam types for convenience.
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use transform::Transform;
