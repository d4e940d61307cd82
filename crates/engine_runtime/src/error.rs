//! Runtime error type.

use engine_systems::SystemError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by [`Engine`](crate::Engine) operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine is not initialized")]
    NotInitialized,

    #[error(transparent)]
    Subsystem(#[from] SystemError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
