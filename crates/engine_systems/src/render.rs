//! Render subsystem.
//!
//! Placeholder depth: the render pass sorts registered, still-live, visible
//! objects by render priority and traces each would-be draw. No windowing or
//! GPU work happens here.

use engine_scene::{ObjectId, Scene};
use tracing::{info, trace};

use crate::error::SystemError;

/// Walks visible objects once per frame in priority order.
#[derive(Debug, Default)]
pub struct RenderSystem {
    width: u32,
    height: u32,
    title: String,
    renderables: Vec<ObjectId>,
    active_camera: Option<ObjectId>,
    initialized: bool,
}

impl RenderSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the renderer up for the given window parameters.
    ///
    /// Idempotent once initialized. Fails on zero dimensions.
    pub fn initialize(
        &mut self,
        width: u32,
        height: u32,
        title: impl Into<String>,
    ) -> Result<(), SystemError> {
        if self.initialized {
            return Ok(());
        }
        if width == 0 || height == 0 {
            return Err(SystemError::InvalidWindowSize { width, height });
        }

        self.width = width;
        self.height = height;
        self.title = title.into();
        self.initialized = true;

        info!(width, height, title = %self.title, "render system initialized");
        Ok(())
    }

    /// Release render state. Safe to call when never initialized.
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        self.renderables.clear();
        self.active_camera = None;
        self.initialized = false;
        info!("render system shut down");
    }

    /// Render one frame.
    ///
    /// `interpolation` is the fraction of the current unconsumed physics
    /// slice, in `[0, 1)`, for blending between physics states. Registered
    /// ids whose objects are gone or invisible are skipped.
    pub fn render(&self, scene: &Scene, interpolation: f32) {
        if !self.initialized {
            return;
        }

        let mut order: Vec<(i32, ObjectId)> = self
            .renderables
            .iter()
            .filter_map(|&id| {
                scene
                    .get(id)
                    .filter(|object| object.is_visible())
                    .map(|object| (object.render_priority(), id))
            })
            .collect();
        order.sort_by_key(|&(priority, id)| (priority, id));

        for (priority, id) in order {
            trace!(object = %id, priority, interpolation, "draw");
        }
    }

    /// Register an object for rendering. Already-registered ids are kept
    /// once.
    pub fn register_renderable(&mut self, id: ObjectId) {
        if id.is_valid() && !self.renderables.contains(&id) {
            self.renderables.push(id);
        }
    }

    pub fn unregister_renderable(&mut self, id: ObjectId) {
        self.renderables.retain(|&registered| registered != id);
    }

    /// The object whose camera component drives the view, if any.
    #[must_use]
    pub fn active_camera(&self) -> Option<ObjectId> {
        self.active_camera
    }

    pub fn set_active_camera(&mut self, camera: Option<ObjectId>) {
        self.active_camera = camera;
    }

    #[must_use]
    pub fn window_width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn window_height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
