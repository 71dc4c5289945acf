use crate::config::Config;
use crate::error::Result;
use crate::protocol::{Command, KeypressRequest, Response};
use crate::services::focus_controller::FocusController;
use crate::services::key_injector::KeyInjector;
use crate::services::window_directory::WindowDirectory;
use crate::services::window_system::WindowSystem;
use std::sync::Arc;
use tracing::{info, warn};

/// Разбирает строку протокола, выполняет команду и формирует ответ.
/// Любая ошибка превращается в ответ со статусом `error`, соединение продолжает работу.
pub struct CommandRouter {
    directory: WindowDirectory,
    focus: FocusController,
    injector: KeyInjector,
}

impl CommandRouter {
    pub fn new(window_system: Arc<dyn WindowSystem>, config: &Config) -> Self {
        Self {
            directory: WindowDirectory::new(window_system.clone()),
            focus: FocusController::new(window_system.clone(), config.focus.clone()),
            injector: KeyInjector::new(window_system, config.injection.clone()),
        }
    }

    pub async fn route(&self, line: &[u8]) -> Response {
        match self.execute(line).await {
            Ok(response) => response,
            Err(e) => Response::from(&e),
        }
    }

    async fn execute(&self, line: &[u8]) -> Result<Response> {
        match Command::decode(line)? {
            Command::ListVisibleWindows => {
                let windows = self.directory.list_visible().await?;
                Ok(Response::windows(windows.into_iter().map(|w| w.title).collect()))
            }
            Command::ListAllWindows => {
                let windows = self.directory.list_all().await?;
                Ok(Response::windows(windows.into_iter().map(|w| w.title).collect()))
            }
            Command::Keypress(request) => self.keypress(request).await,
        }
    }

    /// resolve -> focus -> inject. Неподтверждённый фокус не прерывает команду.
    async fn keypress(&self, request: KeypressRequest) -> Result<Response> {
        let pattern = &request.window_title_pattern;
        let window = self.directory.resolve(pattern).await?;
        info!("Целевое окно для '{}': {}", pattern, window);

        if !self.focus.bring_to_foreground(window.handle).await.is_confirmed() {
            warn!(
                "Предупреждение: окно не стало активным: '{}', клавиши отправляются всё равно",
                pattern
            );
        }

        let pressed = self.injector.press(&request.keys).await?;

        Ok(Response::message(format!(
            "Pressed keys [{}] in window '{}'",
            pressed.join(" "),
            pattern
        )))
    }
}
