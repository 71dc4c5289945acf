/// Преобразование VK кодов в имена X11 keysym для `xdotool keydown/keyup`
pub struct VkCodeToKeysym;

impl VkCodeToKeysym {
    pub fn translate(vk: u8) -> Option<&'static str> {
        const LETTERS: [&str; 26] = [
            "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q",
            "r", "s", "t", "u", "v", "w", "x", "y", "z",
        ];
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        const FUNCTION: [&str; 12] = [
            "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
        ];
        const NUMPAD: [&str; 10] = [
            "KP_0", "KP_1", "KP_2", "KP_3", "KP_4", "KP_5", "KP_6", "KP_7", "KP_8", "KP_9",
        ];

        let keysym = match vk {
            0x41..=0x5A => LETTERS[(vk - 0x41) as usize],
            0x30..=0x39 => DIGITS[(vk - 0x30) as usize],
            0x70..=0x7B => FUNCTION[(vk - 0x70) as usize],
            0x60..=0x69 => NUMPAD[(vk - 0x60) as usize],

            0x08 => "BackSpace",
            0x09 => "Tab",
            0x0D => "Return",
            0x10 => "Shift_L",
            0x11 => "Control_L",
            0x12 => "Alt_L",
            0x13 => "Pause",
            0x14 => "Caps_Lock",
            0x1B => "Escape",
            0x20 => "space",
            0x21 => "Prior",
            0x22 => "Next",
            0x23 => "End",
            0x24 => "Home",
            0x25 => "Left",
            0x26 => "Up",
            0x27 => "Right",
            0x28 => "Down",
            0x2C => "Print",
            0x2D => "Insert",
            0x2E => "Delete",
            0x5B => "Super_L",
            0x5D => "Menu",
            0x6A => "KP_Multiply",
            0x6B => "KP_Add",
            0x6D => "KP_Subtract",
            0x6E => "KP_Decimal",
            0x6F => "KP_Divide",
            0x90 => "Num_Lock",
            0x91 => "Scroll_Lock",
            0xBA => "semicolon",
            0xBB => "equal",
            0xBC => "comma",
            0xBD => "minus",
            0xBE => "period",
            0xBF => "slash",
            0xC0 => "grave",
            0xDB => "bracketleft",
            0xDD => "bracketright",
            0xDE => "apostrophe",
            _ => return None,
        };

        Some(keysym)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert_eq!(VkCodeToKeysym::translate(0x41), Some("a"));
        assert_eq!(VkCodeToKeysym::translate(0x5A), Some("z"));
        assert_eq!(VkCodeToKeysym::translate(0x39), Some("9"));
        assert_eq!(VkCodeToKeysym::translate(0x7B), Some("F12"));
        assert_eq!(VkCodeToKeysym::translate(0x60), Some("KP_0"));
    }

    #[test]
    fn test_unmapped_code() {
        assert_eq!(VkCodeToKeysym::translate(0xFF), None);
    }
}
