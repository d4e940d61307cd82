//! The enemy capability: per-type base stats and the AI state machine.
//!
//! The AI runs once per object update on the variable frame delta. The
//! target is a weak handle ([`ObjectId`]); the scene resolves it to a world
//! position before the tick, and an unresolvable target reads as expired.

use engine_math::Vec3;
use tracing::debug;

use crate::object::{GameObject, ObjectId, Role};

/// The kinds of enemies in the sample game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyType {
    Zombie,
    Skeleton,
    Dragon,
    Boss,
}

/// Base stats fixed per enemy type at spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub max_health: i32,
    pub move_speed: f32,
    pub attack_damage: i32,
    pub attack_range: f32,
}

impl EnemyType {
    /// The stat table. Never changes after construction; later mutation goes
    /// through the normal character setters.
    #[must_use]
    pub fn base_stats(self) -> EnemyStats {
        match self {
            EnemyType::Zombie => EnemyStats {
                max_health: 50,
                move_speed: 2.0,
                attack_damage: 5,
                attack_range: 2.0,
            },
            EnemyType::Skeleton => EnemyStats {
                max_health: 30,
                move_speed: 4.0,
                attack_damage: 8,
                attack_range: 2.0,
            },
            EnemyType::Dragon => EnemyStats {
                max_health: 500,
                move_speed: 8.0,
                attack_damage: 50,
                attack_range: 10.0,
            },
            EnemyType::Boss => EnemyStats {
                max_health: 1000,
                move_speed: 3.0,
                attack_damage: 30,
                attack_range: 5.0,
            },
        }
    }
}

/// AI behaviour states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    Idle,
    Patrolling,
    Chasing,
    Attacking,
}

/// Enemy-specific state: targeting, attack parameters, and the AI machine.
#[derive(Debug)]
pub struct EnemyState {
    enemy_type: EnemyType,
    target: Option<ObjectId>,
    attack_damage: i32,
    attack_range: f32,
    attack_cooldown: f32,
    time_since_last_attack: f32,
    ai_state: AiState,
    patrol_target: Vec3,
}

impl EnemyState {
    /// Create enemy state with the attack stats of the given type.
    #[must_use]
    pub fn new(enemy_type: EnemyType) -> Self {
        let stats = enemy_type.base_stats();
        Self {
            enemy_type,
            target: None,
            attack_damage: stats.attack_damage,
            attack_range: stats.attack_range,
            attack_cooldown: 1.0,
            time_since_last_attack: 0.0,
            ai_state: AiState::Idle,
            patrol_target: Vec3::ZERO,
        }
    }

    #[must_use]
    pub fn enemy_type(&self) -> EnemyType {
        self.enemy_type
    }

    /// The current AI target. Weak: the referent may no longer exist.
    #[must_use]
    pub fn target(&self) -> Option<ObjectId> {
        self.target
    }

    pub fn set_target(&mut self, target: ObjectId) {
        self.target = Some(target);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    #[must_use]
    pub fn attack_damage(&self) -> i32 {
        self.attack_damage
    }

    pub fn set_attack_damage(&mut self, damage: i32) {
        self.attack_damage = damage;
    }

    #[must_use]
    pub fn attack_range(&self) -> f32 {
        self.attack_range
    }

    pub fn set_attack_range(&mut self, range: f32) {
        self.attack_range = range;
    }

    #[must_use]
    pub fn attack_cooldown(&self) -> f32 {
        self.attack_cooldown
    }

    pub fn set_attack_cooldown(&mut self, cooldown: f32) {
        self.attack_cooldown = cooldown;
    }

    /// Seconds since the last successful attack.
    #[must_use]
    pub fn time_since_last_attack(&self) -> f32 {
        self.time_since_last_attack
    }

    #[must_use]
    pub fn ai_state(&self) -> AiState {
        self.ai_state
    }

    /// Current patrol destination (set when entering `Patrolling`).
    #[must_use]
    pub fn patrol_target(&self) -> Vec3 {
        self.patrol_target
    }

    /// Squared-distance range test against a target position.
    #[must_use]
    fn in_range(&self, position: Vec3, target_position: Vec3) -> bool {
        position.distance_squared(target_position) <= self.attack_range * self.attack_range
    }

    /// Whether an attack would land right now: cooldown elapsed and the
    /// target in range. Liveness is checked by the AI driver.
    #[must_use]
    fn can_attack(&self, position: Vec3, target_position: Option<Vec3>) -> bool {
        if self.time_since_last_attack < self.attack_cooldown {
            return false;
        }
        target_position.is_some_and(|tp| self.in_range(position, tp))
    }
}

/// One AI tick for an enemy object.
///
/// `target_position` is the resolved position of the target, or `None` when
/// the target handle has expired (or was never set). Dead enemies do not
/// think. The attack timer accumulates every tick regardless of state.
pub(crate) fn update_ai(obj: &mut GameObject, target_position: Option<Vec3>, delta_time: f32) {
    let alive = obj.character.as_ref().is_some_and(|c| c.is_alive());
    let move_speed = obj.character.as_ref().map_or(0.0, |c| c.move_speed());
    let Some(Role::Enemy(enemy)) = obj.role.as_mut() else {
        return;
    };
    if !alive {
        return;
    }

    enemy.time_since_last_attack += delta_time;

    let position = obj.transform.position;

    match enemy.ai_state {
        AiState::Idle => {
            if target_position.is_some() {
                enemy.ai_state = AiState::Chasing;
            } else {
                enemy.patrol_target = position + Vec3::new(10.0, 0.0, 10.0);
                enemy.ai_state = AiState::Patrolling;
            }
        }

        AiState::Patrolling => {
            // The patrol point is only watched, never walked to; patrolling
            // waits for a target to appear.
            if target_position.is_some() {
                enemy.ai_state = AiState::Chasing;
            }
        }

        AiState::Chasing => match target_position {
            Some(tp) => {
                if enemy.in_range(position, tp) {
                    enemy.ai_state = AiState::Attacking;
                } else {
                    let direction = tp - position;
                    let length = direction.length();
                    if length > 0.001 {
                        // Normalized pursuit: displacement is move_speed * dt.
                        let step = direction / length * move_speed * delta_time;
                        obj.transform.translate(step);
                    }
                }
            }
            None => {
                enemy.ai_state = AiState::Idle;
            }
        },

        AiState::Attacking => {
            if enemy.can_attack(position, target_position) {
                debug!(
                    name = %obj.name,
                    damage = enemy.attack_damage,
                    "enemy attacks"
                );
                enemy.time_since_last_attack = 0.0;
            }
            if !enemy.can_attack(position, target_position) {
                enemy.ai_state = AiState::Chasing;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_table() {
        let zombie = EnemyType::Zombie.base_stats();
        assert_eq!(zombie.max_health, 50);
        assert_eq!(zombie.move_speed, 2.0);
        assert_eq!(zombie.attack_damage, 5);
        assert_eq!(zombie.attack_range, 2.0);

        let skeleton = EnemyType::Skeleton.base_stats();
        assert_eq!(skeleton.max_health, 30);
        assert_eq!(skeleton.move_speed, 4.0);
        assert_eq!(skeleton.attack_damage, 8);

        let dragon = EnemyType::Dragon.base_stats();
        assert_eq!(dragon.max_health, 500);
        assert_eq!(dragon.attack_range, 10.0);

        let boss = EnemyType::Boss.base_stats();
        assert_eq!(boss.max_health, 1000);
        assert_eq!(boss.attack_damage, 30);
        assert_eq!(boss.attack_range, 5.0);
    }

    #[test]
    fn test_new_state_starts_idle() {
        let state = EnemyState::new(EnemyType::Dragon);
        assert_eq!(state.ai_state(), AiState::Idle);
        assert!(state.target().is_none());
        assert_eq!(state.attack_damage(), 50);
        assert_eq!(state.attack_cooldown(), 1.0);
        assert_eq!(state.time_since_last_attack(), 0.0);
    }

    #[test]
    fn test_range_test_uses_squared_distance() {
        let state = EnemyState::new(EnemyType::Zombie); // range 2.0
        let origin = Vec3::ZERO;
        assert!(state.in_range(origin, Vec3::new(2.0, 0.0, 0.0)));
        assert!(!state.in_range(origin, Vec3::new(2.0, 0.1, 0.0)));
        assert!(state.in_range(origin, Vec3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_can_attack_requires_cooldown_and_range() {
        let mut state = EnemyState::new(EnemyType::Zombie);
        let origin = Vec3::ZERO;
        let near = Some(Vec3::new(1.0, 0.0, 0.0));
        // Cooldown not yet elapsed.
        assert!(!state.can_attack(origin, near));
        state.time_since_last_attack = 1.0;
        assert!(state.can_attack(origin, near));
        // Out of range.
        assert!(!state.can_attack(origin, Some(Vec3::new(5.0, 0.0, 0.0))));
        // No target.
        assert!(!state.can_attack(origin, None));
    }
}
