use serde::{Deserialize, Serialize};
use std::fmt;

/// Непрозрачный идентификатор окна верхнего уровня (HWND, X11 window id).
/// Принадлежит оконной системе, живёт не дольше одного запроса.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub u64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Информация об окне. Собирается заново при каждом перечислении.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowRecord {
    pub handle: WindowHandle,
    pub title: String,
    pub visible: bool,
}

impl WindowRecord {
    pub fn new(handle: WindowHandle, title: impl Into<String>, visible: bool) -> Self {
        Self {
            handle,
            title: title.into(),
            visible,
        }
    }

    /// Окна без заголовка не попадают ни в списки, ни в поиск
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Проверить, содержит ли заголовок паттерн (регистронезависимо).
    /// `pattern_lower` должен быть уже приведён к нижнему регистру.
    pub fn matches_pattern_lower(&self, pattern_lower: &str) -> bool {
        self.title.to_lowercase().contains(pattern_lower)
    }
}

impl fmt::Display for WindowRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.visible {
            write!(f, "\"{}\" [{}]", self.title, self.handle)
        } else {
            write!(f, "\"{}\" [{}, hidden]", self.title, self.handle)
        }
    }
}
