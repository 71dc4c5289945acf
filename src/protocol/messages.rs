//! Протокол: одна JSON-команда на строку, один JSON-ответ на строку.

use crate::error::{KeyboardError, Result};
use serde::de::{self, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Первая фаза разбора: только дискриминатор `action`
#[derive(Debug, Deserialize)]
struct ActionEnvelope {
    #[serde(default)]
    action: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KeypressWire {
    #[serde(default)]
    window_title: Option<String>,
    #[serde(default)]
    keys: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypressRequest {
    pub window_title_pattern: String,
    /// Порядок значим: клавиши воспроизводятся именно в нём
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListVisibleWindows,
    ListAllWindows,
    Keypress(KeypressRequest),
}

impl Command {
    pub const LIST_VISIBLE_WINDOWS: &'static str = "list_visible_windows";
    pub const LIST_ALL_WINDOWS: &'static str = "list_all_windows";
    pub const KEYPRESS: &'static str = "keypress";

    /// Двухфазный разбор строки: сначала `action`, затем полная схема для него.
    /// Строка принимается байтами: невалидный UTF-8 - это тоже `Invalid JSON`.
    pub fn decode(line: impl AsRef<[u8]>) -> Result<Command> {
        let line = line.as_ref();
        if line.is_empty() {
            return Err(KeyboardError::EmptyMessage);
        }

        let value: Value = serde_json::from_slice(line).map_err(KeyboardError::InvalidJson)?;
        // derive(Deserialize) для структур принимает и массивы (позиционно)
        if !value.is_object() {
            return Err(KeyboardError::InvalidJson(de::Error::invalid_type(
                unexpected(&value),
                &"a JSON object",
            )));
        }

        let envelope = ActionEnvelope::deserialize(&value).map_err(KeyboardError::InvalidJson)?;
        let action = envelope.action.unwrap_or_default();

        let invalid = |source: serde_json::Error| KeyboardError::InvalidRequest {
            action: action.clone(),
            source,
        };

        match action.as_str() {
            Self::LIST_VISIBLE_WINDOWS => Ok(Command::ListVisibleWindows),
            Self::LIST_ALL_WINDOWS => Ok(Command::ListAllWindows),
            Self::KEYPRESS => {
                let wire = KeypressWire::deserialize(&value).map_err(invalid)?;

                let window_title_pattern = wire.window_title.unwrap_or_default();
                if window_title_pattern.is_empty() {
                    return Err(KeyboardError::MissingField("window_title field"));
                }

                let keys = wire.keys.unwrap_or_default();
                if keys.is_empty() {
                    return Err(KeyboardError::MissingField("or empty keys array"));
                }

                Ok(Command::Keypress(KeypressRequest {
                    window_title_pattern,
                    keys,
                }))
            }
            _ => Err(KeyboardError::UnknownAction(action.clone())),
        }
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorData {
    pub searched_for: String,
    pub available_windows: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Success {
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        windows: Option<Vec<String>>,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<ErrorData>,
    },
}

impl Response {
    pub fn windows(titles: Vec<String>) -> Self {
        Response::Success {
            message: None,
            windows: Some(titles),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Response::Success {
            message: Some(message.into()),
            windows: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    /// Одна строка JSON без завершающего перевода строки
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({ "status": "error", "message": format!("Serialization error: {}", e) })
                .to_string()
        })
    }
}

impl From<&KeyboardError> for Response {
    fn from(err: &KeyboardError) -> Self {
        let data = match err {
            KeyboardError::WindowNotFound { pattern, available } => Some(ErrorData {
                searched_for: pattern.clone(),
                available_windows: available.clone(),
            }),
            _ => None,
        };

        Response::Error {
            message: err.to_string(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_value(response: &Response) -> Value {
        serde_json::from_str(&response.to_json()).unwrap()
    }

    fn decode_err(line: impl AsRef<[u8]>) -> String {
        Command::decode(line).unwrap_err().to_string()
    }

    #[test]
    fn test_decode_list_commands() {
        assert_eq!(
            Command::decode(r#"{"action":"list_visible_windows"}"#).unwrap(),
            Command::ListVisibleWindows
        );
        assert_eq!(
            Command::decode(r#"{"action":"list_all_windows","extra":1}"#).unwrap(),
            Command::ListAllWindows
        );
    }

    #[test]
    fn test_decode_keypress() {
        let command =
            Command::decode(r#"{"action":"keypress","window_title":"note","keys":["ctrl","s"]}"#)
                .unwrap();
        assert_eq!(
            command,
            Command::Keypress(KeypressRequest {
                window_title_pattern: "note".into(),
                keys: vec!["ctrl".into(), "s".into()],
            })
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(decode_err("not-json").starts_with("Invalid JSON: "));
        assert!(decode_err(r#"{"action":5}"#).starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_schema_mismatch_for_action() {
        let message = decode_err(r#"{"action":"keypress","window_title":"x","keys":"a"}"#);
        assert!(message.starts_with("Invalid keypress request: "), "{}", message);
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            decode_err(r#"{"action":"keypress","keys":["a"]}"#),
            "Missing window_title field"
        );
        assert_eq!(
            decode_err(r#"{"action":"keypress","window_title":"x","keys":[]}"#),
            "Missing or empty keys array"
        );
        assert_eq!(
            decode_err(r#"{"action":"keypress","window_title":"x"}"#),
            "Missing or empty keys array"
        );
    }

    #[test]
    fn test_unknown_and_empty_action() {
        assert_eq!(decode_err(r#"{"action":"dance"}"#), "Unknown action: dance");
        assert_eq!(decode_err(r#"{}"#), "Unknown action: ");
        assert_eq!(decode_err(""), "Empty message");
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        for line in [r#"["list_all_windows"]"#, r#""keypress""#, "42", "null"] {
            let message = decode_err(line);
            assert!(message.starts_with("Invalid JSON: "), "{} -> {}", line, message);
            assert!(message.contains("a JSON object"), "{}", message);
        }
    }

    #[test]
    fn test_invalid_utf8_is_invalid_json() {
        assert!(decode_err(b"\xff\xfe garbage").starts_with("Invalid JSON: "));
        assert!(decode_err(b"{\"action\":\"\xff\"}").starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_response_shapes() {
        assert_eq!(
            to_value(&Response::windows(vec!["A".into(), "B".into()])),
            json!({"status": "success", "windows": ["A", "B"]})
        );
        assert_eq!(
            to_value(&Response::message("done")),
            json!({"status": "success", "message": "done"})
        );
        assert_eq!(
            to_value(&Response::from(&KeyboardError::UnknownAction("x".into()))),
            json!({"status": "error", "message": "Unknown action: x"})
        );
    }

    #[test]
    fn test_window_not_found_carries_data() {
        let err = KeyboardError::WindowNotFound {
            pattern: "ZZZ".into(),
            available: vec!["Notepad".into()],
        };
        let value = to_value(&Response::from(&err));

        assert_eq!(value["status"], "error");
        assert_eq!(value["data"]["searched_for"], "ZZZ");
        assert_eq!(value["data"]["available_windows"], json!(["Notepad"]));
    }
}
