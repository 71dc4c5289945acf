use serde::{Deserialize, Serialize};
use std::fmt;

/// Состояние клавиши
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyState {
    Pressed,
    Released,
}

impl KeyState {
    pub fn is_key_up(&self) -> bool {
        matches!(self, KeyState::Released)
    }
}

/// Код виртуальной клавиши платформы (Windows VK_*)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCode(pub u8);

impl KeyCode {
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VK_0x{:02X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_display() {
        assert_eq!(KeyCode::new(0x41).to_string(), "VK_0x41");
        assert_eq!(KeyCode::new(0x0D).to_string(), "VK_0x0D");
    }

    #[test]
    fn test_key_state_direction() {
        assert!(KeyState::Released.is_key_up());
        assert!(!KeyState::Pressed.is_key_up());
    }
}
