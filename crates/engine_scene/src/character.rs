//! The character capability: health, leveling, and locomotion stats.
//!
//! Damage, healing, and experience follow strict no-op rules for invalid
//! input: non-positive amounts and operations on the dead return 0 and leave
//! state untouched. Death and level-up transitions are buffered as
//! [`CharacterEvent`]s so the scene can fan them out exactly once.

/// A gameplay transition produced by a character mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterEvent {
    /// Health reached zero. Fired exactly once per death transition.
    Died,
    /// The character reached a new level.
    LeveledUp { level: i32 },
}

/// Health, leveling, and movement stats for a living entity.
///
/// Invariant: `0 <= health <= max_health`.
#[derive(Debug)]
pub struct Character {
    health: i32,
    max_health: i32,
    move_speed: f32,
    level: i32,
    experience: i32,
    experience_to_next_level: i32,
    events: Vec<CharacterEvent>,
}

impl Character {
    /// A fresh character: 100/100 health, speed 5, level 1, 100 XP to level 2.
    #[must_use]
    pub fn new() -> Self {
        Self {
            health: 100,
            max_health: 100,
            move_speed: 5.0,
            level: 1,
            experience: 0,
            experience_to_next_level: 100,
            events: Vec::new(),
        }
    }

    /// A fresh character at full health with the given maximum.
    #[must_use]
    pub fn with_max_health(max_health: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Set health directly, clamped to `[0, max_health]`.
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Set the health ceiling; current health is clamped down if needed.
    pub fn set_max_health(&mut self, max_health: i32) {
        self.max_health = max_health.max(0);
        self.health = self.health.min(self.max_health);
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[must_use]
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn set_move_speed(&mut self, speed: f32) {
        self.move_speed = speed;
    }

    #[must_use]
    pub fn level(&self) -> i32 {
        self.level
    }

    #[must_use]
    pub fn experience(&self) -> i32 {
        self.experience
    }

    #[must_use]
    pub fn experience_to_next_level(&self) -> i32 {
        self.experience_to_next_level
    }

    /// Apply damage and return the amount actually dealt.
    ///
    /// Non-positive damage and damage to the dead are no-ops returning 0.
    /// Damage never drives health below zero; reaching zero buffers a single
    /// [`CharacterEvent::Died`].
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        if damage <= 0 || !self.is_alive() {
            return 0;
        }

        let actual = damage.min(self.health);
        self.health -= actual;

        if !self.is_alive() {
            self.events.push(CharacterEvent::Died);
        }

        actual
    }

    /// Heal and return the amount actually restored.
    ///
    /// Non-positive amounts and healing the dead are no-ops returning 0.
    /// Healing never raises health above `max_health`.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount <= 0 || !self.is_alive() {
            return 0;
        }

        let actual = amount.min(self.max_health - self.health);
        self.health += actual;
        actual
    }

    /// Grant experience, cascading through as many level-ups as it covers.
    ///
    /// Each level-up consumes the current threshold, grows it by ×1.5
    /// (truncated), raises `max_health` by 10, fully heals, and buffers a
    /// [`CharacterEvent::LeveledUp`]. Non-positive amounts are no-ops.
    pub fn add_experience(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }

        self.experience += amount;

        while self.experience >= self.experience_to_next_level {
            self.experience -= self.experience_to_next_level;
            self.level += 1;

            self.experience_to_next_level = (self.experience_to_next_level as f32 * 1.5) as i32;

            self.max_health += 10;
            self.health = self.max_health;

            self.events.push(CharacterEvent::LeveledUp { level: self.level });
        }
    }

    /// Drain the buffered transition events.
    pub fn take_events(&mut self) -> Vec<CharacterEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}
