use crate::error::Result;
use crate::kb_error;
use crate::events::WindowHandle;
use tokio::process::Command;
use tracing::debug;

pub struct WmctrlClient;

impl WmctrlClient {
    pub fn new() -> Self {
        Self
    }

    /// Окна под управлением WM в порядке стека: (id, заголовок)
    pub async fn list_windows(&self) -> Result<Vec<(WindowHandle, String)>> {
        let output = Command::new("wmctrl")
            .arg("-l")
            .output()
            .await
            .map_err(|e| kb_error!(window_system, "wmctrl не найден: {}", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(kb_error!(window_system, "wmctrl вернул ошибку: {}", stderr.trim()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let windows: Vec<_> = stdout.lines().filter_map(parse_wmctrl_line).collect();
        debug!("wmctrl вернул {} окон", windows.len());
        Ok(windows)
    }

    /// Снять состояние "hidden" (свёрнуто); для видимого окна ничего не меняет
    pub async fn unminimize(&self, handle: WindowHandle) -> Result<()> {
        let status = Command::new("wmctrl")
            .args(["-i", "-r", &format!("0x{:x}", handle.0), "-b", "remove,hidden"])
            .status()
            .await
            .map_err(|e| kb_error!(window_system, "wmctrl не найден: {}", e))?;

        if status.success() {
            Ok(())
        } else {
            Err(kb_error!(window_system, "wmctrl не смог развернуть окно {}", handle))
        }
    }
}

/// Строка `wmctrl -l`: `0x03a00003  0 host Заголовок окна`
fn parse_wmctrl_line(line: &str) -> Option<(WindowHandle, String)> {
    let mut rest = line.trim_start();
    let mut fields = [""; 3];
    for field in fields.iter_mut() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        *field = &rest[..end];
        rest = rest[end..].trim_start();
    }

    let id = u64::from_str_radix(fields[0].trim_start_matches("0x"), 16).ok()?;
    Some((WindowHandle(id), rest.trim_end().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_keeps_title_spacing() {
        let parsed = parse_wmctrl_line("0x03a00003  0 myhost Notes  -  draft.txt").unwrap();
        assert_eq!(parsed.0, WindowHandle(0x03a00003));
        assert_eq!(parsed.1, "Notes  -  draft.txt");
    }

    #[test]
    fn test_parse_line_without_title() {
        let parsed = parse_wmctrl_line("0x01200001 -1 myhost").unwrap();
        assert_eq!(parsed.0, WindowHandle(0x01200001));
        assert_eq!(parsed.1, "");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_wmctrl_line("garbage").is_none());
    }
}
