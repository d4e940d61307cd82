//! The player capability: jumping and the optional weapon slot.
//!
//! The jump itself lives on [`GameObject::jump`](crate::GameObject::jump)
//! because it couples this state with the character capability and the
//! rigidbody component.

/// Player-specific state.
#[derive(Debug, Clone)]
pub struct PlayerState {
    jump_force: f32,
    is_grounded: bool,
    weapon: Option<String>,
}

impl PlayerState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            jump_force: 10.0,
            is_grounded: true,
            weapon: None,
        }
    }

    #[must_use]
    pub fn jump_force(&self) -> f32 {
        self.jump_force
    }

    pub fn set_jump_force(&mut self, force: f32) {
        self.jump_force = force;
    }

    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn set_grounded(&mut self, grounded: bool) {
        self.is_grounded = grounded;
    }

    pub fn set_weapon(&mut self, weapon: impl Into<String>) {
        self.weapon = Some(weapon.into());
    }

    #[must_use]
    pub fn weapon(&self) -> Option<&str> {
        self.weapon.as_deref()
    }

    pub fn clear_weapon(&mut self) {
        self.weapon = None;
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = PlayerState::new();
        assert_eq!(p.jump_force(), 10.0);
        assert!(p.is_grounded());
        assert!(p.weapon().is_none());
    }

    #[test]
    fn test_weapon_slot() {
        let mut p = PlayerState::new();
        p.set_weapon("Iron Sword");
        assert_eq!(p.weapon(), Some("Iron Sword"));
        p.clear_weapon();
        assert!(p.weapon().is_none());
    }
}
