use crate::error::{KeyboardError, Result};
use crate::events::KeyCode;
use crate::mappings::KeyNameToVkCode;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Категория логических клавиш (используется в справке)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCategory {
    Alphabet,
    Numbers,
    Function,
    Control,
    Arrows,
    Modifiers,
    Special,
    Numpad,
}

impl KeyCategory {
    pub const ALL: [KeyCategory; 8] = [
        KeyCategory::Alphabet,
        KeyCategory::Numbers,
        KeyCategory::Function,
        KeyCategory::Control,
        KeyCategory::Arrows,
        KeyCategory::Modifiers,
        KeyCategory::Special,
        KeyCategory::Numpad,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            KeyCategory::Alphabet => "Alphabet (a-z)",
            KeyCategory::Numbers => "Numbers (0-9)",
            KeyCategory::Function => "Function Keys",
            KeyCategory::Control => "Control Keys",
            KeyCategory::Arrows => "Arrow Keys",
            KeyCategory::Modifiers => "Modifier Keys (held until end)",
            KeyCategory::Special => "Special Characters",
            KeyCategory::Numpad => "Numpad Keys",
        }
    }

    pub fn names(&self) -> &'static [&'static str] {
        match self {
            KeyCategory::Alphabet => &[
                "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p",
                "q", "r", "s", "t", "u", "v", "w", "x", "y", "z",
            ],
            KeyCategory::Numbers => &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"],
            KeyCategory::Function => &[
                "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12",
            ],
            KeyCategory::Control => &[
                "enter", "return", "tab", "backspace", "space", "escape", "delete", "insert",
                "home", "end", "pageup", "pagedown", "printscreen", "pause",
            ],
            KeyCategory::Arrows => &["left", "up", "right", "down"],
            KeyCategory::Modifiers => MODIFIER_NAMES,
            KeyCategory::Special => &[
                "!", "@", "#", "$", "%", "^", "&", "*", "(", ")", "-", "_", "=", "+", "[", "{",
                "]", "}", ";", ":", "'", "\"", ",", "<", ".", ">", "/", "?", "`", "~",
            ],
            KeyCategory::Numpad => &[
                "numpad0", "numpad1", "numpad2", "numpad3", "numpad4", "numpad5", "numpad6",
                "numpad7", "numpad8", "numpad9", "numpad*", "numpad+", "numpad-", "numpad.",
                "numpad/",
            ],
        }
    }
}

const MODIFIER_NAMES: &[&str] = &[
    "shift", "ctrl", "control", "alt", "capslock", "caps", "numlock", "scroll", "menu", "super",
    "win",
];

/// Обратная карта для логов: первое (каноническое) имя для каждого кода
static CODE_TO_KEY_NAME: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for category in KeyCategory::ALL {
        for &name in category.names() {
            if let Some(code) = KeyNameToVkCode::translate(name) {
                map.entry(code).or_insert(name);
            }
        }
    }
    map
});

/// Таблица логических клавиш: имя -> VK код, классификация модификаторов
pub struct KeyCodeTable;

impl KeyCodeTable {
    /// Получить код клавиши по её имени (регистронезависимо)
    pub fn resolve(key_name: &str) -> Result<KeyCode> {
        let normalized = key_name.to_lowercase();
        KeyNameToVkCode::translate(&normalized)
            .map(KeyCode::new)
            .ok_or_else(|| KeyboardError::unknown_key(key_name))
    }

    /// Проверить, является ли клавиша модификатором (удерживается до конца)
    pub fn is_modifier(key_name: &str) -> bool {
        let normalized = key_name.to_lowercase();
        MODIFIER_NAMES.contains(&normalized.as_str())
    }

    /// Получить имя клавиши по её коду
    pub fn key_name(code: KeyCode) -> Option<&'static str> {
        CODE_TO_KEY_NAME.get(&code.value()).copied()
    }
}
