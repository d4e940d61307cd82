//! Game object identifiers and the game object itself.
//!
//! An [`ObjectId`] is a lightweight `u64` identifier allocated by the scene.
//! Ids start at 1 and are never reused, so a stored id is a safe weak handle:
//! whether the object still exists is a scene lookup, never a dangling
//! pointer.

use engine_math::{Transform, Vec3};

use crate::character::Character;
use crate::component::{Component, ComponentCtx, ComponentKind, Rigidbody};
use crate::enemy::{self, EnemyState};
use crate::player::PlayerState;

/// A unique game object identifier.
///
/// Identity and ordering of game objects are defined solely by their id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// The null / invalid object sentinel.
    pub const INVALID: ObjectId = ObjectId(0);

    /// Create an object id from a raw `u64`.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is a valid (non-zero) id.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Object({})", self.0)
    }
}

/// Allocates monotonically increasing object ids.
///
/// Ids start at 1 (0 is reserved for [`ObjectId::INVALID`]) and are never
/// recycled, which is what makes stale ids safe to hold.
#[derive(Debug)]
pub struct ObjectIdAllocator {
    next_id: u64,
}

impl ObjectIdAllocator {
    /// Creates a new allocator.
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocates a fresh object id.
    pub fn allocate(&mut self) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        ObjectId(id)
    }

    /// Returns the number of ids allocated so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for ObjectIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Gameplay role of an object, selecting its specialised capability.
#[derive(Debug)]
pub enum Role {
    /// The player character.
    Player(PlayerState),
    /// An AI-controlled enemy.
    Enemy(EnemyState),
}

/// An entity in the game world.
///
/// A game object owns its [`Transform`] and components exclusively. Gameplay
/// specialisation is composition, not inheritance: health/leveling lives in
/// an optional [`Character`] capability and player/enemy behaviour in an
/// optional [`Role`].
#[derive(Debug)]
pub struct GameObject {
    pub(crate) id: ObjectId,
    pub(crate) name: String,
    pub(crate) active: bool,
    pub(crate) visible: bool,
    pub(crate) render_priority: i32,
    pub(crate) transform: Transform,
    pub(crate) components: Vec<Component>,
    pub(crate) character: Option<Character>,
    pub(crate) role: Option<Role>,
}

impl GameObject {
    pub(crate) fn new(id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            active: true,
            visible: true,
            render_priority: 0,
            transform: Transform::IDENTITY,
            components: Vec::new(),
            character: None,
            role: None,
        }
    }

    /// The object's unique identifier.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The object's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the object participates in the update pass.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether the object is considered by the render pass.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Draw-order priority; lower values render first.
    #[must_use]
    pub fn render_priority(&self) -> i32 {
        self.render_priority
    }

    pub fn set_render_priority(&mut self, priority: i32) {
        self.render_priority = priority;
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Attach a component, taking ownership and overwriting its owner
    /// back-reference.
    ///
    /// Duplicate kinds are allowed; kind lookup returns the first match in
    /// insertion order. A component attached while an update pass is in
    /// flight runs starting with its owner's next update.
    pub fn add_component(&mut self, mut component: Component) {
        component.set_owner(self.id);
        self.components.push(component);
    }

    /// First component of the given kind, in insertion order.
    #[must_use]
    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    pub fn component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.kind() == kind)
    }

    /// All attached components in insertion order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// First rigidbody component, if any.
    #[must_use]
    pub fn rigidbody(&self) -> Option<&Rigidbody> {
        self.components.iter().find_map(Component::as_rigidbody)
    }

    pub fn rigidbody_mut(&mut self) -> Option<&mut Rigidbody> {
        self.components.iter_mut().find_map(Component::as_rigidbody_mut)
    }

    /// Grant this object the character capability (health, leveling,
    /// locomotion stats).
    pub fn set_character(&mut self, character: Character) {
        self.character = Some(character);
    }

    #[must_use]
    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    pub fn character_mut(&mut self) -> Option<&mut Character> {
        self.character.as_mut()
    }

    /// Assign the object's gameplay role.
    pub fn set_role(&mut self, role: Role) {
        self.role = Some(role);
    }

    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    #[must_use]
    pub fn player(&self) -> Option<&PlayerState> {
        match &self.role {
            Some(Role::Player(state)) => Some(state),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.role {
            Some(Role::Player(state)) => Some(state),
            _ => None,
        }
    }

    #[must_use]
    pub fn enemy(&self) -> Option<&EnemyState> {
        match &self.role {
            Some(Role::Enemy(state)) => Some(state),
            _ => None,
        }
    }

    pub fn enemy_mut(&mut self) -> Option<&mut EnemyState> {
        match &mut self.role {
            Some(Role::Enemy(state)) => Some(state),
            _ => None,
        }
    }

    /// Advance the object by one frame.
    ///
    /// No-op while inactive. The role hook (enemy AI) runs first, then every
    /// enabled component in insertion order; disabled components are iterated
    /// but skipped. `target_position` is the resolved world position of the
    /// AI target, if this object is an enemy whose target is still alive.
    pub fn update(&mut self, delta_time: f32, gravity: Vec3, target_position: Option<Vec3>) {
        if !self.active {
            return;
        }

        enemy::update_ai(self, target_position, delta_time);

        for component in self.components.iter_mut() {
            let mut ctx = ComponentCtx {
                transform: &mut self.transform,
                gravity,
            };
            component.update(&mut ctx, delta_time);
        }
    }

    /// Translate the object by `direction * move_speed`.
    ///
    /// The direction is not normalized here; that is the caller's
    /// responsibility. No-op while inactive, without the character
    /// capability, or dead.
    pub fn walk(&mut self, direction: Vec3) {
        if !self.active {
            return;
        }
        let Some(character) = self.character.as_ref() else {
            return;
        };
        if !character.is_alive() {
            return;
        }
        let movement = direction * character.move_speed();
        self.transform.translate(movement);
    }

    /// Player jump: applies an upward impulse through the first rigidbody.
    ///
    /// No-op unless the object is a grounded, living player with a rigidbody.
    pub fn jump(&mut self) {
        let alive = self.character.as_ref().is_some_and(|c| c.is_alive());
        let Some(Role::Player(player)) = self.role.as_mut() else {
            return;
        };
        if !player.is_grounded() || !alive {
            return;
        }
        let impulse = Vec3::new(0.0, player.jump_force(), 0.0);
        if let Some(rigidbody) = self.components.iter_mut().find_map(Component::as_rigidbody_mut) {
            rigidbody.add_impulse(impulse);
            player.set_grounded(false);
        }
    }
}
