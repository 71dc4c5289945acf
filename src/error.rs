use thiserror::Error;

/// Ошибки обработки команды. Текст `Display` совпадает с полем `message`
/// ответа, который уходит клиенту.
#[derive(Error, Debug)]
pub enum KeyboardError {
    #[error("Empty message")]
    EmptyMessage,

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Invalid {action} request: {source}")]
    InvalidRequest {
        action: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing {0}")]
    MissingField(&'static str),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Unknown key: {name}")]
    UnknownKey { name: String },

    #[error("Window not found: '{pattern}'. Use 'list_visible_windows' action to see available windows.")]
    WindowNotFound {
        pattern: String,
        available: Vec<String>,
    },

    #[error("Window system error: {0}")]
    WindowSystem(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KeyboardError {
    pub fn unknown_key(name: impl Into<String>) -> Self {
        KeyboardError::UnknownKey { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, KeyboardError>;

#[macro_export]
macro_rules! kb_error {
    (window_system, $($arg:tt)*) => {
        $crate::error::KeyboardError::WindowSystem(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_wire_format() {
        assert_eq!(
            KeyboardError::UnknownAction("dance".into()).to_string(),
            "Unknown action: dance"
        );
        assert_eq!(
            KeyboardError::MissingField("window_title field").to_string(),
            "Missing window_title field"
        );
        assert_eq!(KeyboardError::unknown_key("zz").to_string(), "Unknown key: zz");
    }

    #[test]
    fn window_not_found_mentions_pattern() {
        let err = KeyboardError::WindowNotFound {
            pattern: "ZZZ".into(),
            available: vec!["Notepad".into()],
        };
        assert!(err.to_string().starts_with("Window not found: 'ZZZ'."));
    }

    #[test]
    fn window_system_macro_formats() {
        let err = kb_error!(window_system, "wmctrl exited with {}", 1);
        assert_eq!(err.to_string(), "Window system error: wmctrl exited with 1");
    }
}
