/// Преобразование имён клавиш в виртуальные коды Windows (VK_*)
/// Отвечает за трансляцию строковых имён клавиш в числовые коды платформы
pub struct KeyNameToVkCode;

impl KeyNameToVkCode {
    /// Получить VK код клавиши по её имени (имя уже в нижнем регистре)
    pub fn translate(normalized: &str) -> Option<u8> {
        let code = match normalized {
            // Буквенные клавиши
            "a" => 0x41,
            "b" => 0x42,
            "c" => 0x43,
            "d" => 0x44,
            "e" => 0x45,
            "f" => 0x46,
            "g" => 0x47,
            "h" => 0x48,
            "i" => 0x49,
            "j" => 0x4A,
            "k" => 0x4B,
            "l" => 0x4C,
            "m" => 0x4D,
            "n" => 0x4E,
            "o" => 0x4F,
            "p" => 0x50,
            "q" => 0x51,
            "r" => 0x52,
            "s" => 0x53,
            "t" => 0x54,
            "u" => 0x55,
            "v" => 0x56,
            "w" => 0x57,
            "x" => 0x58,
            "y" => 0x59,
            "z" => 0x5A,

            // Цифровые клавиши (верхний ряд)
            "0" => 0x30,
            "1" => 0x31,
            "2" => 0x32,
            "3" => 0x33,
            "4" => 0x34,
            "5" => 0x35,
            "6" => 0x36,
            "7" => 0x37,
            "8" => 0x38,
            "9" => 0x39,

            // Функциональные клавиши
            "f1" => 0x70,
            "f2" => 0x71,
            "f3" => 0x72,
            "f4" => 0x73,
            "f5" => 0x74,
            "f6" => 0x75,
            "f7" => 0x76,
            "f8" => 0x77,
            "f9" => 0x78,
            "f10" => 0x79,
            "f11" => 0x7A,
            "f12" => 0x7B,

            // Управляющие клавиши
            "enter" | "return" => 0x0D, // VK_RETURN
            "tab" => 0x09,
            "backspace" => 0x08,
            "space" => 0x20,
            "escape" => 0x1B,
            "delete" => 0x2E,
            "insert" => 0x2D,
            "home" => 0x24,
            "end" => 0x23,
            "pageup" => 0x21,   // VK_PRIOR
            "pagedown" => 0x22, // VK_NEXT
            "printscreen" => 0x2C, // VK_SNAPSHOT
            "pause" => 0x13,

            // Стрелки
            "left" => 0x25,
            "up" => 0x26,
            "right" => 0x27,
            "down" => 0x28,

            // Спецсимволы: shift-варианты делят код с базовой клавишей,
            // Shift сам по себе не нажимается
            "!" => 0x31,
            "@" => 0x32,
            "#" => 0x33,
            "$" => 0x34,
            "%" => 0x35,
            "^" => 0x36,
            "&" => 0x37,
            "*" => 0x38,
            "(" => 0x39,
            ")" => 0x30,
            "-" | "_" => 0xBD, // VK_OEM_MINUS
            "=" | "+" => 0xBB, // VK_OEM_PLUS
            "[" | "{" => 0xDB, // VK_OEM_4
            "]" | "}" => 0xDD, // VK_OEM_6
            ";" | ":" => 0xBA, // VK_OEM_1
            "'" | "\"" => 0xDE, // VK_OEM_7
            "," | "<" => 0xBC, // VK_OEM_COMMA
            "." | ">" => 0xBE, // VK_OEM_PERIOD
            "/" | "?" => 0xBF, // VK_OEM_2
            "`" | "~" => 0xC0, // VK_OEM_3

            // Модификаторы
            "shift" => 0x10,
            "ctrl" | "control" => 0x11,
            "alt" => 0x12, // VK_MENU
            "capslock" | "caps" => 0x14,
            "numlock" => 0x90,
            "scroll" => 0x91,
            "menu" => 0x5D, // VK_APPS
            "super" | "win" => 0x5B, // VK_LWIN

            // Цифровой блок
            "numpad0" => 0x60,
            "numpad1" => 0x61,
            "numpad2" => 0x62,
            "numpad3" => 0x63,
            "numpad4" => 0x64,
            "numpad5" => 0x65,
            "numpad6" => 0x66,
            "numpad7" => 0x67,
            "numpad8" => 0x68,
            "numpad9" => 0x69,
            "numpad*" => 0x6A,
            "numpad+" => 0x6B,
            "numpad-" => 0x6D,
            "numpad." => 0x6E,
            "numpad/" => 0x6F,

            _ => return None,
        };

        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_translation() {
        assert_eq!(KeyNameToVkCode::translate("a"), Some(0x41));
        assert_eq!(KeyNameToVkCode::translate("f12"), Some(0x7B));
        assert_eq!(KeyNameToVkCode::translate("numpad/"), Some(0x6F));
    }

    #[test]
    fn test_aliases_share_code() {
        assert_eq!(KeyNameToVkCode::translate("enter"), KeyNameToVkCode::translate("return"));
        assert_eq!(KeyNameToVkCode::translate("ctrl"), KeyNameToVkCode::translate("control"));
        assert_eq!(KeyNameToVkCode::translate("win"), KeyNameToVkCode::translate("super"));
    }

    #[test]
    fn test_expects_normalized_input() {
        assert_eq!(KeyNameToVkCode::translate("A"), None);
        assert_eq!(KeyNameToVkCode::translate(""), None);
    }
}
