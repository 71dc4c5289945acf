use crate::services::keycode_map::KeyCategory;
use std::fmt::Write;

const MESSAGES: &str = r#"ALLOWED TCP MESSAGE STRUCTURES (one JSON object per line):

1. List Visible Windows (recommended):
   {"action":"list_visible_windows"}
   Response: {"status":"success","windows":["Window1","Window2",...]}
   - Shows only visible windows you can see on screen

2. List All Windows:
   {"action":"list_all_windows"}
   Response: {"status":"success","windows":["Window1","Window2",...]}
   - Shows all windows including hidden/background processes

3. Press Keys:
   {"action":"keypress","window_title":"Window Title","keys":["a","b","c"]}
   - window_title: Partial match of window title (case-insensitive)
   - keys: Array of key names to press sequentially
   Response: {"status":"success","message":"Pressed keys [a b c] in window 'Window Title'"}
   - Shifted symbols (e.g. ! @ _ +) reuse the base key; add "shift" yourself
"#;

/// Справка по протоколу и список допустимых клавиш по категориям
pub fn protocol_reference() -> String {
    let mut text = String::from(MESSAGES);
    text.push_str("\nACCEPTED KEYS:\n");

    for category in KeyCategory::ALL {
        let _ = write!(
            text,
            "\n  {}:\n    {}\n",
            category.title(),
            category.names().join(" ")
        );
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_lists_every_category() {
        let text = protocol_reference();
        for category in KeyCategory::ALL {
            assert!(text.contains(category.title()));
        }
        assert!(text.contains("numpad/"));
        assert!(text.contains("list_visible_windows"));
    }
}
