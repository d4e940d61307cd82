//! # engine_scene
//!
//! The entity/component core of the sample game engine.
//!
//! This crate provides:
//!
//! - [`ObjectId`] — monotonically allocated, never-reused object identifiers
//!   that double as safe weak handles.
//! - [`GameObject`] — a named entity owning a transform, a component list,
//!   and optional gameplay capabilities.
//! - [`Component`] — a closed tagged union of behaviours
//!   (rigidbody, mesh renderer, camera).
//! - [`Character`] / [`PlayerState`] / [`EnemyState`] — gameplay capability
//!   structs (health and leveling, jumping, the AI state machine).
//! - [`Scene`] — the owning registry driving per-frame updates with deferred
//!   destruction.
//! - [`EventDispatcher`] — gameplay event fan-out.

pub mod character;
pub mod component;
pub mod enemy;
pub mod events;
pub mod object;
pub mod player;
pub mod scene;

pub use character::{Character, CharacterEvent};
pub use component::{Behaviour, Camera, Component, ComponentCtx, ComponentKind, MeshRenderer, Rigidbody};
pub use enemy::{AiState, EnemyState, EnemyType};
pub use events::{EventDispatcher, GameEvent, ListenerId};
pub use object::{GameObject, ObjectId, ObjectIdAllocator, Role};
pub use player::PlayerState;
pub use scene::Scene;
