use crate::error::Result;
use crate::kb_error;
use crate::events::WindowHandle;
use std::collections::HashSet;
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

pub struct XdotoolClient;

impl XdotoolClient {
    pub fn new() -> Self {
        Self
    }

    async fn output(&self, args: &[&str]) -> Result<Output> {
        Command::new("xdotool").args(args).output().await.map_err(|e| {
            debug!("xdotool не найден или не работает: {}", e);
            kb_error!(window_system, "xdotool не найден: {}", e)
        })
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("xdotool {:?} вернул ошибку: {}", args, stderr);
            return Err(kb_error!(window_system, "xdotool вернул ошибку: {}", stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Идентификаторы видимых (отображённых) окон с непустым именем
    pub async fn visible_windows(&self) -> Result<HashSet<WindowHandle>> {
        let output = self
            .output(&["search", "--onlyvisible", "--name", "."])
            .await?;
        parse_search_output(
            output.status.code(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )
    }

    pub async fn activate(&self, handle: WindowHandle) -> Result<()> {
        self.run(&["windowactivate", &handle.0.to_string()]).await?;
        Ok(())
    }

    pub async fn active_window(&self) -> Result<Option<WindowHandle>> {
        let stdout = self.run(&["getactivewindow"]).await?;
        Ok(stdout.parse().ok().map(WindowHandle))
    }

    pub async fn key(&self, keysym: &str, key_up: bool) -> Result<()> {
        let action = if key_up { "keyup" } else { "keydown" };
        self.run(&[action, keysym]).await?;
        Ok(())
    }
}

/// `xdotool search` завершается с кодом 1 без текста ошибки, если ничего
/// не нашлось. Любой другой неуспех - ошибка оконной системы.
fn parse_search_output(
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<HashSet<WindowHandle>> {
    match code {
        Some(0) => Ok(stdout
            .lines()
            .filter_map(|line| line.trim().parse().ok().map(WindowHandle))
            .collect()),
        Some(1) if stderr.trim().is_empty() => Ok(HashSet::new()),
        _ => Err(kb_error!(
            window_system,
            "xdotool search вернул ошибку ({:?}): {}",
            code,
            stderr.trim()
        )),
    }
}
