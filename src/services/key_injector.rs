use crate::config::InjectionConfig;
use crate::debug_if_enabled;
use crate::error::Result;
use crate::events::{KeyCode, VirtualKeyEvent};
use crate::services::keycode_map::KeyCodeTable;
use crate::services::window_system::WindowSystem;
use smallvec::SmallVec;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{error, warn};

type HeldModifiers = SmallVec<[KeyCode; 4]>;

/// Воспроизводит последовательность логических клавиш в активное окно.
///
/// Обычная клавиша: down, пауза, up, пауза. Модификатор: down, пауза, и он
/// остаётся зажатым до конца последовательности; затем все модификаторы
/// отпускаются в порядке нажатия. Shift для символов вроде `!` не
/// добавляется: клиент сам передаёт "shift" в последовательности.
pub struct KeyInjector {
    window_system: Arc<dyn WindowSystem>,
    config: InjectionConfig,
}

impl KeyInjector {
    pub fn new(window_system: Arc<dyn WindowSystem>, config: InjectionConfig) -> Self {
        Self {
            window_system,
            config,
        }
    }

    /// Возвращает имена нажатых клавиш в исходном написании.
    ///
    /// Неизвестная клавиша прерывает последовательность: уже отправленные события
    /// не откатываются, а зажатые модификаторы остаются зажатыми, если не включён
    /// `release_modifiers_on_abort`.
    pub async fn press(&self, keys: &[String]) -> Result<Vec<String>> {
        let mut held: HeldModifiers = SmallVec::new();
        let mut pressed = Vec::with_capacity(keys.len());

        for key in keys {
            if let Err(e) = self.press_one(key, &mut held).await {
                self.abort(&held).await;
                return Err(e);
            }
            pressed.push(key.clone());
        }

        for code in &held {
            self.send(VirtualKeyEvent::release(*code)).await?;
        }

        Ok(pressed)
    }

    async fn press_one(&self, key: &str, held: &mut HeldModifiers) -> Result<()> {
        let code = KeyCodeTable::resolve(key)?;

        if KeyCodeTable::is_modifier(key) {
            debug_if_enabled!("Зажимаем модификатор '{}' ({})", key, code);
            self.send(VirtualKeyEvent::press(code)).await?;
            held.push(code);
        } else {
            debug_if_enabled!("Нажатие клавиши '{}' ({})", key, code);
            self.send(VirtualKeyEvent::press(code)).await?;
            self.send(VirtualKeyEvent::release(code)).await?;
        }

        Ok(())
    }

    /// Событие + пауза между событиями
    async fn send(&self, event: VirtualKeyEvent) -> Result<()> {
        self.window_system.send_key_event(event).await?;
        sleep(self.config.key_delay()).await;
        Ok(())
    }

    async fn abort(&self, held: &HeldModifiers) {
        if held.is_empty() {
            return;
        }

        if !self.config.release_modifiers_on_abort {
            warn!(
                "Последовательность прервана, {} модификатор(ов) остаются зажатыми",
                held.len()
            );
            return;
        }

        for code in held {
            if let Err(e) = self.send(VirtualKeyEvent::release(*code)).await {
                error!("Не удалось отпустить модификатор {}: {}", code, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyboardError;
    use crate::services::window_system::DryRunWindowSystem;
    use std::time::Duration;

    const SHIFT: KeyCode = KeyCode::new(0x10);
    const CTRL: KeyCode = KeyCode::new(0x11);
    const KEY_A: KeyCode = KeyCode::new(0x41);
    const KEY_B: KeyCode = KeyCode::new(0x42);

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn injector(ws: &Arc<DryRunWindowSystem>, release_on_abort: bool) -> KeyInjector {
        KeyInjector::new(
            ws.clone(),
            InjectionConfig {
                key_delay_ms: 50,
                release_modifiers_on_abort: release_on_abort,
            },
        )
    }

    fn events(ws: &DryRunWindowSystem) -> Vec<VirtualKeyEvent> {
        ws.key_events().into_iter().map(|(_, e)| e).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_modifier_held_across_sequence_with_pacing() {
        let ws = Arc::new(DryRunWindowSystem::new(Vec::new()));

        let pressed = injector(&ws, false)
            .press(&keys(&["shift", "a"]))
            .await
            .unwrap();

        assert_eq!(pressed, keys(&["shift", "a"]));
        assert_eq!(
            events(&ws),
            vec![
                VirtualKeyEvent::press(SHIFT),
                VirtualKeyEvent::press(KEY_A),
                VirtualKeyEvent::release(KEY_A),
                VirtualKeyEvent::release(SHIFT),
            ]
        );

        let times: Vec<_> = ws.key_events().into_iter().map(|(at, _)| at).collect();
        for pair in times.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::from_millis(50));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_modifiers_released_in_press_order() {
        let ws = Arc::new(DryRunWindowSystem::new(Vec::new()));

        injector(&ws, false)
            .press(&keys(&["CTRL", "Shift", "b"]))
            .await
            .unwrap();

        assert_eq!(
            events(&ws),
            vec![
                VirtualKeyEvent::press(CTRL),
                VirtualKeyEvent::press(SHIFT),
                VirtualKeyEvent::press(KEY_B),
                VirtualKeyEvent::release(KEY_B),
                VirtualKeyEvent::release(CTRL),
                VirtualKeyEvent::release(SHIFT),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_shifted_symbol_sends_no_implicit_shift() {
        let ws = Arc::new(DryRunWindowSystem::new(Vec::new()));

        injector(&ws, false).press(&keys(&["!"])).await.unwrap();

        let one = KeyCode::new(0x31);
        assert_eq!(
            events(&ws),
            vec![VirtualKeyEvent::press(one), VirtualKeyEvent::release(one)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_key_aborts_after_prior_keys() {
        let ws = Arc::new(DryRunWindowSystem::new(Vec::new()));

        let result = injector(&ws, false)
            .press(&keys(&["a", "zz-unknown", "b"]))
            .await;

        match result {
            Err(KeyboardError::UnknownKey { name }) => assert_eq!(name, "zz-unknown"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(
            events(&ws),
            vec![VirtualKeyEvent::press(KEY_A), VirtualKeyEvent::release(KEY_A)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_leaves_modifiers_held_by_default() {
        let ws = Arc::new(DryRunWindowSystem::new(Vec::new()));

        let result = injector(&ws, false).press(&keys(&["ctrl", "nope"])).await;

        assert!(result.is_err());
        assert_eq!(events(&ws), vec![VirtualKeyEvent::press(CTRL)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_releases_modifiers_when_configured() {
        let ws = Arc::new(DryRunWindowSystem::new(Vec::new()));

        let result = injector(&ws, true).press(&keys(&["ctrl", "nope"])).await;

        assert!(result.is_err());
        assert_eq!(
            events(&ws),
            vec![VirtualKeyEvent::press(CTRL), VirtualKeyEvent::release(CTRL)]
        );
    }
}
