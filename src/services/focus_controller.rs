use crate::config::FocusConfig;
use crate::debug_if_enabled;
use crate::events::WindowHandle;
use crate::services::window_system::WindowSystem;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Итог фокусировки. `Unconfirmed` - мягкий отказ: ОС могла не отдать
/// фокус (блокировка ввода другим процессом), ввод клавиш всё равно идёт.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    Confirmed,
    Unconfirmed,
}

impl FocusOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, FocusOutcome::Confirmed)
    }
}

/// Выводит окно на передний план: restore, затем до `max_attempts` попыток
/// запросить фокус с опросом подтверждения, затем короткая финальная проверка.
pub struct FocusController {
    window_system: Arc<dyn WindowSystem>,
    config: FocusConfig,
}

impl FocusController {
    pub fn new(window_system: Arc<dyn WindowSystem>, config: FocusConfig) -> Self {
        Self {
            window_system,
            config,
        }
    }

    pub async fn bring_to_foreground(&self, handle: WindowHandle) -> FocusOutcome {
        if let Err(e) = self.window_system.restore(handle).await {
            warn!("Не удалось развернуть окно {}: {}", handle, e);
        }

        for attempt in 1..=self.config.max_attempts {
            if let Err(e) = self.window_system.set_foreground(handle).await {
                warn!("Запрос фокуса для {} (попытка {}) не удался: {}", handle, attempt, e);
            }

            if self
                .wait_for_foreground(handle, self.config.confirm_timeout())
                .await
            {
                debug!("Окно {} получило фокус с попытки {}", handle, attempt);
                break;
            }

            debug_if_enabled!("Попытка {} фокусировки {} не подтверждена", attempt, handle);
            sleep(self.config.retry_delay()).await;
        }

        if self
            .wait_for_foreground(handle, self.config.final_check())
            .await
        {
            FocusOutcome::Confirmed
        } else {
            FocusOutcome::Unconfirmed
        }
    }

    /// Опрос с шагом `poll_interval`, пока окно не станет активным или не истечёт `timeout`
    async fn wait_for_foreground(&self, handle: WindowHandle, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            match self.window_system.foreground_window().await {
                Ok(Some(current)) if current == handle => return true,
                Ok(_) => {}
                Err(e) => debug!("Не удалось получить активное окно: {}", e),
            }
            sleep(self.config.poll_interval()).await;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WindowRecord;
    use crate::services::window_system::{DryRunWindowSystem, WindowSystemCall};

    const TARGET: WindowHandle = WindowHandle(0x42);

    fn window_system() -> DryRunWindowSystem {
        DryRunWindowSystem::new(vec![WindowRecord::new(TARGET, "Target", true)])
    }

    fn controller(ws: &Arc<DryRunWindowSystem>) -> FocusController {
        FocusController::new(ws.clone(), FocusConfig::default())
    }

    fn focus_requests(ws: &DryRunWindowSystem) -> usize {
        ws.journal()
            .iter()
            .filter(|call| matches!(call, WindowSystemCall::SetForeground(_)))
            .count()
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmed_on_first_attempt() {
        let ws = Arc::new(window_system());
        let started = Instant::now();

        let outcome = controller(&ws).bring_to_foreground(TARGET).await;

        assert_eq!(outcome, FocusOutcome::Confirmed);
        assert_eq!(
            ws.journal()[..2],
            [
                WindowSystemCall::Restore(TARGET),
                WindowSystemCall::SetForeground(TARGET)
            ]
        );
        assert_eq!(focus_requests(&ws), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_os_grants_focus() {
        let ws = Arc::new(window_system().deny_focus_requests(2));
        let started = Instant::now();

        let outcome = controller(&ws).bring_to_foreground(TARGET).await;

        assert_eq!(outcome, FocusOutcome::Confirmed);
        assert_eq!(focus_requests(&ws), 3);
        // Две неудачные попытки: 350 мс опроса + 75 мс паузы каждая
        assert_eq!(started.elapsed(), Duration::from_millis(2 * (350 + 75)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_attempts_yield_unconfirmed() {
        let ws = Arc::new(window_system().lock_focus());
        let started = Instant::now();

        let outcome = controller(&ws).bring_to_foreground(TARGET).await;

        assert_eq!(outcome, FocusOutcome::Unconfirmed);
        assert!(!outcome.is_confirmed());
        assert_eq!(focus_requests(&ws), 5);
        assert_eq!(
            started.elapsed(),
            Duration::from_millis(5 * (350 + 75) + 100)
        );
    }
}
