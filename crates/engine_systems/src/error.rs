//! Subsystem error types.

/// Errors raised while bringing a subsystem up.
///
/// Per-frame subsystem calls never fail; initialization is the only
/// fallible surface, and the engine aborts its own initialization on the
/// first error.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// The render target dimensions are unusable.
    #[error("invalid window size: {width}x{height}")]
    InvalidWindowSize { width: u32, height: u32 },
}
