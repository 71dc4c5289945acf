use crate::error::Result;
use crate::kb_error;
use crate::events::{VirtualKeyEvent, WindowHandle, WindowRecord};
use crate::mappings::VkCodeToKeysym;
use tracing::info;

use super::r#trait::WindowSystem;
use super::wmctrl::WmctrlClient;
use super::xdotool::XdotoolClient;

/// Оконная система X11 поверх утилит wmctrl и xdotool
pub struct X11WindowSystem {
    wmctrl: WmctrlClient,
    xdotool: XdotoolClient,
}

impl X11WindowSystem {
    pub fn new() -> Result<Self> {
        if std::env::var_os("DISPLAY").is_none() {
            return Err(kb_error!(
                window_system,
                "DISPLAY не задан: нужен X11 сервер (или запустите с --dry-run)"
            ));
        }

        info!("Инициализация X11WindowSystem (wmctrl + xdotool)");
        Ok(Self {
            wmctrl: WmctrlClient::new(),
            xdotool: XdotoolClient::new(),
        })
    }
}

#[async_trait::async_trait]
impl WindowSystem for X11WindowSystem {
    fn name(&self) -> &'static str {
        "x11"
    }

    async fn enumerate_windows(&self) -> Result<Vec<WindowRecord>> {
        let windows = self.wmctrl.list_windows().await?;
        let visible = self.xdotool.visible_windows().await?;

        Ok(windows
            .into_iter()
            .map(|(handle, title)| {
                let is_visible = visible.contains(&handle);
                WindowRecord::new(handle, title, is_visible)
            })
            .collect())
    }

    async fn restore(&self, handle: WindowHandle) -> Result<()> {
        self.wmctrl.unminimize(handle).await
    }

    async fn set_foreground(&self, handle: WindowHandle) -> Result<()> {
        self.xdotool.activate(handle).await
    }

    async fn foreground_window(&self) -> Result<Option<WindowHandle>> {
        self.xdotool.active_window().await
    }

    async fn send_key_event(&self, event: VirtualKeyEvent) -> Result<()> {
        let keysym = VkCodeToKeysym::translate(event.key_code.value())
            .ok_or_else(|| kb_error!(window_system, "Нет X11 keysym для {}", event.key_code))?;
        self.xdotool.key(keysym, event.state.is_key_up()).await
    }
}
