//! Components: modular behaviour attached to game objects.
//!
//! The set of behaviours is a closed tagged union rather than an open trait
//! hierarchy, so kind lookup is an enum tag comparison and dispatch is a
//! `match` — no downcasting.

use engine_math::{Mat4, Transform, Vec3};

use crate::object::ObjectId;

/// Stable tag identifying a component behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Rigidbody,
    MeshRenderer,
    Camera,
}

impl ComponentKind {
    /// Human-readable kind name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Rigidbody => "Rigidbody",
            ComponentKind::MeshRenderer => "MeshRenderer",
            ComponentKind::Camera => "Camera",
        }
    }
}

/// Per-update context handed to component behaviours.
///
/// Components never reach for global state; the owner's transform and the
/// world gravity are injected by the update driver.
pub struct ComponentCtx<'a> {
    /// The owning object's transform.
    pub transform: &'a mut Transform,
    /// World gravity, from the physics system.
    pub gravity: Vec3,
}

/// The closed set of component behaviours.
#[derive(Debug)]
pub enum Behaviour {
    Rigidbody(Rigidbody),
    MeshRenderer(MeshRenderer),
    Camera(Camera),
}

impl Behaviour {
    /// The kind tag for this behaviour.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Behaviour::Rigidbody(_) => ComponentKind::Rigidbody,
            Behaviour::MeshRenderer(_) => ComponentKind::MeshRenderer,
            Behaviour::Camera(_) => ComponentKind::Camera,
        }
    }
}

/// A component slot: enablement, owner back-reference, and behaviour.
///
/// The owner is a weak back-reference by id; a component with no owner (or a
/// stale owner id) updates without faulting.
#[derive(Debug)]
pub struct Component {
    enabled: bool,
    owner: Option<ObjectId>,
    behaviour: Behaviour,
}

impl Component {
    /// Wrap a behaviour in an enabled, unowned component slot.
    #[must_use]
    pub fn new(behaviour: Behaviour) -> Self {
        Self {
            enabled: true,
            owner: None,
            behaviour,
        }
    }

    /// The behaviour kind tag.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.behaviour.kind()
    }

    /// Whether the component participates in updates.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The owning object, if any. Exactly one owner at a time; attaching the
    /// component to another object overwrites this.
    #[must_use]
    pub fn owner(&self) -> Option<ObjectId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: ObjectId) {
        self.owner = Some(owner);
    }

    #[must_use]
    pub fn behaviour(&self) -> &Behaviour {
        &self.behaviour
    }

    pub fn behaviour_mut(&mut self) -> &mut Behaviour {
        &mut self.behaviour
    }

    #[must_use]
    pub fn as_rigidbody(&self) -> Option<&Rigidbody> {
        match &self.behaviour {
            Behaviour::Rigidbody(rb) => Some(rb),
            _ => None,
        }
    }

    pub fn as_rigidbody_mut(&mut self) -> Option<&mut Rigidbody> {
        match &mut self.behaviour {
            Behaviour::Rigidbody(rb) => Some(rb),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_mesh_renderer(&self) -> Option<&MeshRenderer> {
        match &self.behaviour {
            Behaviour::MeshRenderer(mr) => Some(mr),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_camera(&self) -> Option<&Camera> {
        match &self.behaviour {
            Behaviour::Camera(cam) => Some(cam),
            _ => None,
        }
    }

    pub(crate) fn update(&mut self, ctx: &mut ComponentCtx<'_>, delta_time: f32) {
        if !self.enabled {
            return;
        }
        match &mut self.behaviour {
            Behaviour::Rigidbody(rb) => rb.update(ctx, delta_time),
            Behaviour::MeshRenderer(mr) => mr.update(delta_time),
            Behaviour::Camera(cam) => cam.update(delta_time),
        }
    }
}

/// Physics behaviour: force integration against the owner's transform.
#[derive(Debug, Clone)]
pub struct Rigidbody {
    mass: f32,
    velocity: Vec3,
    angular_velocity: Vec3,
    force_accumulator: Vec3,
    use_gravity: bool,
    kinematic: bool,
    linear_drag: f32,
    angular_drag: f32,
}

impl Rigidbody {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mass: 1.0,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            force_accumulator: Vec3::ZERO,
            use_gravity: true,
            kinematic: false,
            linear_drag: 0.1,
            angular_drag: 0.1,
        }
    }

    #[must_use]
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    #[must_use]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
    }

    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    #[must_use]
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.angular_velocity = angular_velocity;
    }

    /// Accumulate a force for the next update.
    pub fn add_force(&mut self, force: Vec3) {
        self.force_accumulator += force;
    }

    /// Apply an impulse: an instant velocity change of `impulse / mass`.
    pub fn add_impulse(&mut self, impulse: Vec3) {
        if self.mass > 0.0 {
            self.velocity += impulse / self.mass;
        }
    }

    #[must_use]
    pub fn use_gravity(&self) -> bool {
        self.use_gravity
    }

    pub fn set_use_gravity(&mut self, use_gravity: bool) {
        self.use_gravity = use_gravity;
    }

    /// Kinematic bodies are moved by code, not by force integration.
    #[must_use]
    pub fn is_kinematic(&self) -> bool {
        self.kinematic
    }

    pub fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
    }

    fn update(&mut self, ctx: &mut ComponentCtx<'_>, delta_time: f32) {
        if self.kinematic {
            return;
        }

        if self.use_gravity {
            let weight = ctx.gravity * self.mass;
            self.add_force(weight);
        }

        self.velocity *= 1.0 - self.linear_drag * delta_time;
        self.angular_velocity *= 1.0 - self.angular_drag * delta_time;

        // F = ma, so a = F/m.
        if self.mass > 0.0 {
            let acceleration = self.force_accumulator / self.mass;
            self.velocity += acceleration * delta_time;
        }

        ctx.transform.translate(self.velocity * delta_time);
        ctx.transform.rotate(self.angular_velocity * delta_time);

        self.force_accumulator = Vec3::ZERO;
    }
}

impl Default for Rigidbody {
    fn default() -> Self {
        Self::new()
    }
}

/// Mesh rendering behaviour: names the mesh and material resources to draw.
///
/// With either resource missing the component is a silent no-op.
#[derive(Debug, Clone, Default)]
pub struct MeshRenderer {
    mesh: Option<String>,
    material: Option<String>,
}

impl MeshRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mesh(&mut self, mesh: impl Into<String>) {
        self.mesh = Some(mesh.into());
    }

    #[must_use]
    pub fn mesh(&self) -> Option<&str> {
        self.mesh.as_deref()
    }

    pub fn set_material(&mut self, material: impl Into<String>) {
        self.material = Some(material.into());
    }

    #[must_use]
    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    fn update(&mut self, _delta_time: f32) {
        if self.mesh.is_none() || self.material.is_none() {
            return;
        }
        // A full renderer would refresh animation state and enqueue a draw
        // registration here.
    }
}

/// Camera behaviour: projection parameters plus view-matrix derivation from
/// the owner's transform.
#[derive(Debug, Clone)]
pub struct Camera {
    fov_y_degrees: f32,
    near: f32,
    far: f32,
}

impl Camera {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    #[must_use]
    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    pub fn set_fov_y_degrees(&mut self, fov: f32) {
        self.fov_y_degrees = fov;
    }

    /// Perspective projection matrix for the given aspect ratio.
    #[must_use]
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }

    /// View matrix: the inverse of the owning transform's model matrix.
    #[must_use]
    pub fn view_matrix(&self, transform: &Transform) -> Mat4 {
        transform.to_matrix().inverse()
    }

    fn update(&mut self, _delta_time: f32) {}
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
