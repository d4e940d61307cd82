//! # engine_systems
//!
//! The three subsystems the game loop drives each frame:
//!
//! - [`RenderSystem`] — walks visible objects in priority order once per
//!   frame with an interpolation factor (placeholder depth: no draw calls).
//! - [`PhysicsSystem`] — stepped at a fixed rate by the loop's accumulator;
//!   owns gravity and the collision bookkeeping.
//! - [`InputSystem`] — pumped once per frame before gameplay; exposes
//!   edge-triggered key and mouse state.

pub mod error;
pub mod input;
pub mod physics;
pub mod render;

pub use error::SystemError;
pub use input::{InputSystem, KeyCode, MouseButton};
pub use physics::{CollisionInfo, PhysicsSystem};
pub use render::RenderSystem;
