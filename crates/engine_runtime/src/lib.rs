//! # engine_runtime
//!
//! The engine context and the fixed-timestep game loop.
//!
//! [`Engine`] is an explicitly constructed object — "one engine per process"
//! is a caller convention, not a hidden global. The loop decouples physics
//! from frame rate: physics drains fixed 1/60 s slices from an accumulator
//! while gameplay updates on the variable frame delta, and the renderer
//! receives the leftover fraction for visual interpolation.

pub mod config;
pub mod engine;
pub mod error;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, FIXED_TIMESTEP};
pub use error::EngineError;
