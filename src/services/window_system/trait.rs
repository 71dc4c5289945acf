use crate::config::Config;
use crate::error::Result;
use crate::events::{VirtualKeyEvent, WindowHandle, WindowRecord};
use std::sync::Arc;

/// Узкий интерфейс к оконной системе хоста.
///
/// Это общий глобально изменяемый ресурс: фокус ввода один на всю систему,
/// и реализации не сериализуют вызовы из разных соединений. Две параллельные
/// команды keypress могут перехватывать фокус друг у друга.
#[async_trait::async_trait]
pub trait WindowSystem: Send + Sync {
    /// Имя бэкенда для логов
    fn name(&self) -> &'static str;

    /// Все окна верхнего уровня в порядке перечисления оконной системы
    async fn enumerate_windows(&self) -> Result<Vec<WindowRecord>>;

    /// Развернуть окно, если оно свёрнуто. Для обычного окна ничего не делает.
    async fn restore(&self, handle: WindowHandle) -> Result<()>;

    /// Запросить передачу фокуса. ОС вправе отказать, подтверждение только через опрос.
    async fn set_foreground(&self, handle: WindowHandle) -> Result<()>;

    async fn foreground_window(&self) -> Result<Option<WindowHandle>>;

    async fn send_key_event(&self, event: VirtualKeyEvent) -> Result<()>;
}

/// Factory function to create an appropriate window system based on the dry_run flag
pub fn create_window_system(config: &Config, dry_run: bool) -> Result<Arc<dyn WindowSystem>> {
    if dry_run || config.is_dry_run() {
        return Ok(Arc::new(super::DryRunWindowSystem::with_demo_windows()));
    }

    #[cfg(windows)]
    {
        Ok(Arc::new(super::win32::Win32WindowSystem::new()))
    }

    #[cfg(not(windows))]
    {
        Ok(Arc::new(super::x11::X11WindowSystem::new()?))
    }
}
