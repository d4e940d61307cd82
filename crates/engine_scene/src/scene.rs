//! The owning object registry and per-frame update driver.
//!
//! Objects are stored in spawn order; since ids are allocated monotonically
//! the vector is always sorted by id and lookups binary-search. Destruction
//! is deferred: [`Scene::destroy`] only queues, and the live collection
//! changes once per frame in [`Scene::flush_destroyed`], after the update
//! pass — an object destroyed mid-frame still updates and still resolves as
//! a target for the rest of that frame.

use engine_math::Vec3;
use tracing::{debug, info};

use crate::character::CharacterEvent;
use crate::component::{Behaviour, Component, Rigidbody};
use crate::enemy::{EnemyState, EnemyType};
use crate::events::GameEvent;
use crate::object::{GameObject, ObjectId, ObjectIdAllocator, Role};
use crate::player::PlayerState;
use crate::Character;

/// Owns every game object and drives their updates.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<GameObject>,
    pending_destroy: Vec<ObjectId>,
    allocator: ObjectIdAllocator,
    events: Vec<GameEvent>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            pending_destroy: Vec::new(),
            allocator: ObjectIdAllocator::new(),
            events: Vec::new(),
        }
    }

    /// Spawn a plain game object.
    pub fn spawn(&mut self, name: impl Into<String>) -> ObjectId {
        let id = self.allocator.allocate();
        let object = GameObject::new(id, name);
        debug!(id = %id, name = object.name(), "object spawned");
        self.objects.push(object);
        id
    }

    /// Spawn a player: 150/150 health, player role, and a 70 kg rigidbody.
    pub fn spawn_player(&mut self, name: impl Into<String>) -> ObjectId {
        let id = self.allocator.allocate();
        let mut object = GameObject::new(id, name);
        object.set_character(Character::with_max_health(150));
        object.set_role(Role::Player(PlayerState::new()));
        object.add_component(Component::new(Behaviour::Rigidbody(
            Rigidbody::new().with_mass(70.0),
        )));
        info!(id = %id, name = object.name(), "player created");
        self.objects.push(object);
        id
    }

    /// Spawn an enemy with the base stats of its type.
    pub fn spawn_enemy(&mut self, name: impl Into<String>, enemy_type: EnemyType) -> ObjectId {
        let id = self.allocator.allocate();
        let stats = enemy_type.base_stats();
        let mut object = GameObject::new(id, name);
        object.set_character(
            Character::with_max_health(stats.max_health).with_move_speed(stats.move_speed),
        );
        object.set_role(Role::Enemy(EnemyState::new(enemy_type)));
        info!(id = %id, name = object.name(), ?enemy_type, "enemy spawned");
        self.objects.push(object);
        id
    }

    /// Whether the object still exists (destroyed-but-unflushed counts as
    /// existing until the end of the frame).
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.index_of(id).map(|i| &self.objects[i])
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.index_of(id).map(|i| &mut self.objects[i])
    }

    /// Queue an object for removal at the end of the frame.
    pub fn destroy(&mut self, id: ObjectId) {
        if self.contains(id) && !self.pending_destroy.contains(&id) {
            debug!(id = %id, "object queued for destruction");
            self.pending_destroy.push(id);
        }
    }

    /// Number of live objects (including destroyed-but-unflushed).
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate objects in spawn order.
    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    /// Update every active object with the variable frame delta.
    ///
    /// For each object in spawn order: resolve its AI target position (an
    /// expired handle resolves to `None`), run the object update (role hook,
    /// then components), and collect any buffered character transitions into
    /// the scene's event queue.
    pub fn update(&mut self, delta_time: f32, gravity: Vec3) {
        let ids: Vec<ObjectId> = self.objects.iter().map(|o| o.id()).collect();

        for id in ids {
            let target_position = self.enemy_target_position(id);
            let Some(index) = self.index_of(id) else {
                continue;
            };

            let object = &mut self.objects[index];
            if !object.is_active() {
                continue;
            }
            object.update(delta_time, gravity, target_position);

            let fired = object
                .character_mut()
                .map(Character::take_events)
                .unwrap_or_default();
            if fired.is_empty() {
                continue;
            }

            let name = self.objects[index].name().to_owned();
            for event in fired {
                match event {
                    CharacterEvent::Died => {
                        info!(id = %id, name = %name, "character died");
                        self.events.push(GameEvent::Death { object: id });
                    }
                    CharacterEvent::LeveledUp { level } => {
                        info!(id = %id, name = %name, level, "character leveled up");
                        self.events.push(GameEvent::LevelUp { object: id, level });
                    }
                }
            }
        }
    }

    /// Remove everything queued by [`Scene::destroy`]. Returns the number of
    /// objects removed.
    pub fn flush_destroyed(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending_destroy);
        let mut removed = 0;
        for id in pending {
            if let Some(index) = self.index_of(id) {
                self.objects.remove(index);
                removed += 1;
            }
        }
        removed
    }

    /// Drain the gameplay events collected during the update pass.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove all objects and queued state immediately.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.pending_destroy.clear();
        self.events.clear();
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        // Spawn order is id order, so the vector stays sorted through removals.
        self.objects.binary_search_by(|o| o.id().cmp(&id)).ok()
    }

    /// Resolve the world position of an enemy's target, if the object is an
    /// enemy and its target handle is still live.
    fn enemy_target_position(&self, id: ObjectId) -> Option<Vec3> {
        let object = self.get(id)?;
        let target = object.enemy()?.target()?;
        self.get(target).map(|t| t.transform().position)
    }
}

#[cfg(test)]
mod tests {
    use crate::enemy::AiState;

    use super::*;

    #[test]
    fn test_ids_are_unique_and_never_reused() {
        let mut scene = Scene::new();
        let a = scene.spawn("a");
        let b = scene.spawn("b");
        assert!(a < b);

        scene.destroy(a);
        scene.flush_destroyed();
        let c = scene.spawn("c");
        assert!(c > b);
        assert!(!scene.contains(a));
    }

    #[test]
    fn test_destroy_is_deferred_until_flush() {
        let mut scene = Scene::new();
        let id = scene.spawn("doomed");
        scene.destroy(id);

        // Still present through the frame's update pass.
        assert!(scene.contains(id));
        scene.update(0.016, Vec3::ZERO);
        assert!(scene.contains(id));

        assert_eq!(scene.flush_destroyed(), 1);
        assert!(!scene.contains(id));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_double_destroy_removes_once() {
        let mut scene = Scene::new();
        let id = scene.spawn("doomed");
        scene.spawn("bystander");
        scene.destroy(id);
        scene.destroy(id);
        assert_eq!(scene.flush_destroyed(), 1);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_inactive_objects_are_not_updated() {
        let mut scene = Scene::new();
        let id = scene.spawn_player("idle");
        scene.get_mut(id).unwrap().set_active(false);
        scene.update(1.0, Vec3::new(0.0, -9.81, 0.0));
        // Gravity never reached the rigidbody.
        assert_eq!(scene.get(id).unwrap().transform().position, Vec3::ZERO);
    }

    #[test]
    fn test_enemy_without_target_starts_patrolling() {
        let mut scene = Scene::new();
        let id = scene.spawn_enemy("skeleton", EnemyType::Skeleton);
        scene.update(0.016, Vec3::ZERO);

        let enemy = scene.get(id).unwrap().enemy().unwrap();
        assert_eq!(enemy.ai_state(), AiState::Patrolling);
        assert_eq!(enemy.patrol_target(), Vec3::new(10.0, 0.0, 10.0));

        // Patrolling does not move.
        scene.update(1.0, Vec3::ZERO);
        assert_eq!(scene.get(id).unwrap().transform().position, Vec3::ZERO);
    }

    #[test]
    fn test_enemy_ai_patrol_chase_attack_sequence() {
        let mut scene = Scene::new();
        let enemy = scene.spawn_enemy("skeleton", EnemyType::Skeleton);
        scene.update(1.0, Vec3::ZERO);
        assert_eq!(
            scene.get(enemy).unwrap().enemy().unwrap().ai_state(),
            AiState::Patrolling
        );

        // A resolvable target flips patrolling to chasing.
        let player = scene.spawn("hero");
        scene.get_mut(player).unwrap().transform_mut().position = Vec3::new(100.0, 0.0, 0.0);
        scene.get_mut(enemy).unwrap().enemy_mut().unwrap().set_target(player);
        scene.update(1.0, Vec3::ZERO);
        assert_eq!(
            scene.get(enemy).unwrap().enemy().unwrap().ai_state(),
            AiState::Chasing
        );

        // Chasing moves toward the target at move_speed (4.0) per second.
        scene.update(1.0, Vec3::ZERO);
        let position = scene.get(enemy).unwrap().transform().position;
        assert!((position.x - 4.0).abs() < 1e-4);
        assert_eq!(position.y, 0.0);
        assert_eq!(position.z, 0.0);

        // Bring the target into attack range (2.0): next tick attacks.
        scene.get_mut(player).unwrap().transform_mut().position = Vec3::new(4.5, 0.0, 0.0);
        scene.update(1.0, Vec3::ZERO);
        assert_eq!(
            scene.get(enemy).unwrap().enemy().unwrap().ai_state(),
            AiState::Attacking
        );
    }

    #[test]
    fn test_enemy_returns_to_idle_when_target_expires() {
        let mut scene = Scene::new();
        let enemy = scene.spawn_enemy("zombie", EnemyType::Zombie);
        let prey = scene.spawn("prey");
        scene.get_mut(prey).unwrap().transform_mut().position = Vec3::new(50.0, 0.0, 0.0);
        scene.get_mut(enemy).unwrap().enemy_mut().unwrap().set_target(prey);

        scene.update(0.1, Vec3::ZERO); // Idle -> Chasing
        assert_eq!(
            scene.get(enemy).unwrap().enemy().unwrap().ai_state(),
            AiState::Chasing
        );

        scene.destroy(prey);
        // Destroyed but unflushed: still resolvable this frame.
        scene.update(0.1, Vec3::ZERO);
        assert_eq!(
            scene.get(enemy).unwrap().enemy().unwrap().ai_state(),
            AiState::Chasing
        );

        scene.flush_destroyed();
        scene.update(0.1, Vec3::ZERO);
        assert_eq!(
            scene.get(enemy).unwrap().enemy().unwrap().ai_state(),
            AiState::Idle
        );
    }

    #[test]
    fn test_attack_resets_cooldown_and_falls_back_to_chasing() {
        let mut scene = Scene::new();
        let enemy = scene.spawn_enemy("zombie", EnemyType::Zombie);
        let prey = scene.spawn("prey");
        scene.get_mut(prey).unwrap().transform_mut().position = Vec3::new(1.0, 0.0, 0.0);
        scene.get_mut(enemy).unwrap().enemy_mut().unwrap().set_target(prey);

        scene.update(1.0, Vec3::ZERO); // Idle -> Chasing (timer now 1.0)
        scene.update(1.0, Vec3::ZERO); // Chasing -> Attacking (in range)
        assert_eq!(
            scene.get(enemy).unwrap().enemy().unwrap().ai_state(),
            AiState::Attacking
        );

        scene.update(0.1, Vec3::ZERO); // attack lands, cooldown resets
        let state = scene.get(enemy).unwrap().enemy().unwrap();
        assert_eq!(state.ai_state(), AiState::Chasing);
        assert!(state.time_since_last_attack() < 1.0);
    }

    #[test]
    fn test_death_event_reaches_scene_queue_once() {
        let mut scene = Scene::new();
        let id = scene.spawn_player("hero");
        scene
            .get_mut(id)
            .unwrap()
            .character_mut()
            .unwrap()
            .take_damage(500);

        scene.update(0.016, Vec3::ZERO);
        assert_eq!(scene.drain_events(), vec![GameEvent::Death { object: id }]);

        scene.update(0.016, Vec3::ZERO);
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn test_level_up_events_in_order() {
        let mut scene = Scene::new();
        let id = scene.spawn_player("hero");
        scene
            .get_mut(id)
            .unwrap()
            .character_mut()
            .unwrap()
            .add_experience(250);

        scene.update(0.016, Vec3::ZERO);
        assert_eq!(
            scene.drain_events(),
            vec![
                GameEvent::LevelUp { object: id, level: 2 },
                GameEvent::LevelUp { object: id, level: 3 }
            ]
        );
    }

    #[test]
    fn test_player_jump_imparts_velocity() {
        let mut scene = Scene::new();
        let id = scene.spawn_player("hero");
        let object = scene.get_mut(id).unwrap();

        object.jump();
        let velocity = object.rigidbody().unwrap().velocity();
        assert!((velocity.y - 10.0 / 70.0).abs() < 1e-6);
        assert!(!object.player().unwrap().is_grounded());

        // Airborne: a second jump is a no-op.
        object.jump();
        let again = object.rigidbody().unwrap().velocity();
        assert_eq!(velocity, again);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut scene = Scene::new();
        let id = scene.spawn_player("hero");
        scene.destroy(id);
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.flush_destroyed(), 0);
        assert!(scene.drain_events().is_empty());
    }
}
