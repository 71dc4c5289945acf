use crate::error::{KeyboardError, Result};
use crate::events::WindowRecord;
use crate::services::window_system::WindowSystem;
use std::sync::Arc;
use tracing::warn;

/// Каталог окон верхнего уровня. Ничего не кэширует: каждый вызов
/// перечисляет окна заново, набор окон меняется между запросами.
pub struct WindowDirectory {
    window_system: Arc<dyn WindowSystem>,
}

impl WindowDirectory {
    pub fn new(window_system: Arc<dyn WindowSystem>) -> Self {
        Self { window_system }
    }

    /// Все окна с заголовком, видимые и скрытые
    pub async fn list_all(&self) -> Result<Vec<WindowRecord>> {
        let windows = self.window_system.enumerate_windows().await?;
        Ok(windows.into_iter().filter(WindowRecord::has_title).collect())
    }

    /// Только видимые окна с заголовком
    pub async fn list_visible(&self) -> Result<Vec<WindowRecord>> {
        let windows = self.list_all().await?;
        Ok(windows.into_iter().filter(|w| w.visible).collect())
    }

    /// Первое в порядке перечисления окно, заголовок которого содержит
    /// `pattern` без учёта регистра. Порядок перечисления между вызовами
    /// не гарантирован, поэтому при нескольких совпадениях выбор может меняться.
    pub async fn resolve(&self, pattern: &str) -> Result<WindowRecord> {
        let windows = self.list_all().await?;
        let pattern_lower = pattern.to_lowercase();

        if let Some(found) = windows
            .iter()
            .find(|w| w.matches_pattern_lower(&pattern_lower))
        {
            return Ok(found.clone());
        }

        let available: Vec<String> = windows.into_iter().map(|w| w.title).collect();
        warn!(
            "Окно не найдено: '{}'. Доступные окна: {:?}",
            pattern, available
        );
        Err(KeyboardError::WindowNotFound {
            pattern: pattern.to_string(),
            available,
        })
    }
}
