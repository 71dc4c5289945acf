use crate::error::Result;
use crate::events::{VirtualKeyEvent, WindowHandle, WindowRecord};
use crate::services::keycode_map::KeyCodeTable;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::time::Instant;
use tracing::info;

use super::r#trait::WindowSystem;

/// Журнал хранит только последние вызовы
const JOURNAL_CAPACITY: usize = 1024;

/// Вызов оконной системы, записанный в журнал эмуляции
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowSystemCall {
    Restore(WindowHandle),
    SetForeground(WindowHandle),
    Key(VirtualKeyEvent),
}

#[derive(Debug)]
struct DryRunState {
    windows: Vec<WindowRecord>,
    foreground: Option<WindowHandle>,
    /// Сколько запросов фокуса ОС отклонит, прежде чем уступить.
    /// `None` - фокус заблокирован насовсем.
    denials_left: Option<u32>,
    journal: VecDeque<(Instant, WindowSystemCall)>,
}

/// Оконная система в памяти: используется в режиме --dry-run и в тестах
pub struct DryRunWindowSystem {
    state: Mutex<DryRunState>,
}

impl DryRunWindowSystem {
    pub fn new(windows: Vec<WindowRecord>) -> Self {
        Self {
            state: Mutex::new(DryRunState {
                windows,
                foreground: None,
                denials_left: Some(0),
                journal: VecDeque::with_capacity(JOURNAL_CAPACITY),
            }),
        }
    }

    pub fn with_demo_windows() -> Self {
        Self::new(vec![
            WindowRecord::new(WindowHandle(0x1001), "Terminal - dry_run", true),
            WindowRecord::new(WindowHandle(0x1002), "Browser - dry_run", true),
            WindowRecord::new(WindowHandle(0x1003), "Editor - dry_run", true),
            WindowRecord::new(WindowHandle(0x1004), "", true),
            WindowRecord::new(WindowHandle(0x1005), "Tray Helper - dry_run", false),
        ])
    }

    /// Отклонять первые `count` запросов фокуса
    #[cfg(test)]
    pub fn deny_focus_requests(self, count: u32) -> Self {
        self.state.lock().denials_left = Some(count);
        self
    }

    /// Никогда не отдавать фокус (другой процесс держит блокировку ввода)
    #[cfg(test)]
    pub fn lock_focus(self) -> Self {
        self.state.lock().denials_left = None;
        self
    }

    #[cfg(test)]
    pub fn journal(&self) -> Vec<WindowSystemCall> {
        self.state
            .lock()
            .journal
            .iter()
            .map(|(_, call)| call.clone())
            .collect()
    }

    /// События клавиатуры с моментами их отправки
    #[cfg(test)]
    pub fn key_events(&self) -> Vec<(Instant, VirtualKeyEvent)> {
        self.state
            .lock()
            .journal
            .iter()
            .filter_map(|(at, call)| match call {
                WindowSystemCall::Key(event) => Some((*at, *event)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: WindowSystemCall) {
        let mut state = self.state.lock();
        if state.journal.len() == JOURNAL_CAPACITY {
            state.journal.pop_front();
        }
        state.journal.push_back((Instant::now(), call));
    }
}

#[async_trait::async_trait]
impl WindowSystem for DryRunWindowSystem {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    async fn enumerate_windows(&self) -> Result<Vec<WindowRecord>> {
        Ok(self.state.lock().windows.clone())
    }

    async fn restore(&self, handle: WindowHandle) -> Result<()> {
        self.record(WindowSystemCall::Restore(handle));
        Ok(())
    }

    async fn set_foreground(&self, handle: WindowHandle) -> Result<()> {
        self.record(WindowSystemCall::SetForeground(handle));

        let mut state = self.state.lock();
        match state.denials_left {
            Some(0) => state.foreground = Some(handle),
            Some(n) => state.denials_left = Some(n - 1),
            None => {}
        }
        Ok(())
    }

    async fn foreground_window(&self) -> Result<Option<WindowHandle>> {
        Ok(self.state.lock().foreground)
    }

    async fn send_key_event(&self, event: VirtualKeyEvent) -> Result<()> {
        info!(
            "[DRY RUN] Виртуальное событие: {} ({}) {:?}",
            event.key_code,
            KeyCodeTable::key_name(event.key_code).unwrap_or("?"),
            event.state
        );
        self.record(WindowSystemCall::Key(event));
        Ok(())
    }
}
