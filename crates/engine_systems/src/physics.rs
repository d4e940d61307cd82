//! Physics subsystem.
//!
//! Stepped at a fixed rate by the game loop. Owns world gravity, the
//! collider registry, and per-step collision bookkeeping. Placeholder depth:
//! the broad-phase pair loop and the raycast report nothing.

use engine_math::Vec3;
use engine_scene::ObjectId;
use tracing::{info, trace};

/// Contact data for a detected collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    pub a: ObjectId,
    pub b: ObjectId,
    pub contact_point: Vec3,
    pub contact_normal: Vec3,
    pub penetration_depth: f32,
}

type CollisionCallback = Box<dyn FnMut(&CollisionInfo)>;

/// Fixed-step physics simulation.
#[derive(Default)]
pub struct PhysicsSystem {
    gravity: Vec3,
    colliders: Vec<ObjectId>,
    collisions: Vec<CollisionInfo>,
    reported: Vec<CollisionInfo>,
    collision_callback: Option<CollisionCallback>,
    steps: u64,
    initialized: bool,
}

impl PhysicsSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            colliders: Vec::new(),
            collisions: Vec::new(),
            reported: Vec::new(),
            collision_callback: None,
            steps: 0,
            initialized: false,
        }
    }

    /// Bring the simulation up. Idempotent; never fails.
    pub fn initialize(&mut self) -> Result<(), crate::SystemError> {
        if self.initialized {
            return Ok(());
        }
        self.initialized = true;
        info!(gravity = ?self.gravity, "physics system initialized");
        Ok(())
    }

    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        self.colliders.clear();
        self.collisions.clear();
        self.reported.clear();
        self.initialized = false;
        info!("physics system shut down");
    }

    /// Advance the simulation by one fixed step.
    pub fn update(&mut self, delta_time: f32) {
        if !self.initialized {
            return;
        }

        self.collisions.clear();
        self.collisions.append(&mut self.reported);
        self.detect_collisions();
        self.resolve_collisions();

        if let Some(callback) = self.collision_callback.as_mut() {
            for collision in &self.collisions {
                callback(collision);
            }
        }

        self.steps += 1;
        trace!(step = self.steps, delta_time, "physics step");
    }

    /// World gravity, consumed by rigidbody integration.
    #[must_use]
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    pub fn register_collider(&mut self, id: ObjectId) {
        if id.is_valid() {
            self.colliders.push(id);
        }
    }

    pub fn unregister_collider(&mut self, id: ObjectId) {
        if let Some(index) = self.colliders.iter().position(|&c| c == id) {
            self.colliders.remove(index);
        }
    }

    pub fn set_collision_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&CollisionInfo) + 'static,
    {
        self.collision_callback = Some(Box::new(callback));
    }

    /// Queue a contact from an external narrow-phase source. It is folded
    /// into the next step's collision set and runs through resolution and
    /// the callback like a detected one.
    pub fn report_collision(&mut self, info: CollisionInfo) {
        self.reported.push(info);
    }

    /// Collisions processed by the most recent step.
    #[must_use]
    pub fn collisions(&self) -> &[CollisionInfo] {
        &self.collisions
    }

    /// Cast a ray against the registered colliders.
    ///
    /// Placeholder: always reports no hit.
    #[must_use]
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<CollisionInfo> {
        trace!(?origin, ?direction, max_distance, "raycast");
        None
    }

    /// Total fixed steps executed since initialization.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn detect_collisions(&mut self) {
        // Brute-force broad phase over registered collider pairs.
        for i in 0..self.colliders.len() {
            for _j in (i + 1)..self.colliders.len() {
                // A narrow-phase test would push into self.collisions here.
            }
        }
    }

    fn resolve_collisions(&mut self) {
        for _collision in &self.collisions {
            // Separation and response forces would be applied here.
        }
    }
}

impl std::fmt::Debug for PhysicsSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsSystem")
            .field("gravity", &self.gravity)
            .field("colliders", &self.colliders.len())
            .field("steps", &self.steps)
            .field("initialized", &self.initialized)
            .finish()
    }
}
