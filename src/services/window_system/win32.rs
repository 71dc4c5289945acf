use crate::error::{KeyboardError, Result};
use crate::events::{VirtualKeyEvent, WindowHandle, WindowRecord};
use std::mem;
use tracing::{debug, info};
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, TRUE};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetForegroundWindow, GetWindowTextW, IsIconic, IsWindowVisible,
    SetForegroundWindow, ShowWindow, SW_RESTORE,
};

use super::r#trait::WindowSystem;

/// Оконная система Win32 (user32)
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    pub fn new() -> Self {
        info!("Инициализация Win32WindowSystem");
        Self
    }
}

fn to_hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as usize as *mut _)
}

fn from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as usize as u64)
}

/// Extended flag нужен для стрелок, ins/del/home/end/pgup/pgdn, numlock, printscreen
fn is_extended_key(vk: u8) -> bool {
    matches!(
        vk,
        0x21..=0x28 | 0x2C | 0x2D | 0x2E | 0x5B | 0x5D | 0x6F | 0x90
    )
}

unsafe extern "system" fn enum_windows_cb(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let hwnds = &mut *(lparam.0 as *mut Vec<HWND>);
    hwnds.push(hwnd);
    TRUE
}

#[async_trait::async_trait]
impl WindowSystem for Win32WindowSystem {
    fn name(&self) -> &'static str {
        "win32"
    }

    async fn enumerate_windows(&self) -> Result<Vec<WindowRecord>> {
        let mut hwnds: Vec<HWND> = Vec::new();
        unsafe {
            EnumWindows(
                Some(enum_windows_cb),
                LPARAM(&mut hwnds as *mut Vec<HWND> as isize),
            )
            .map_err(|e| KeyboardError::WindowSystem(format!("EnumWindows: {}", e)))?;
        }

        let records = hwnds
            .into_iter()
            .map(|hwnd| unsafe {
                let mut buf = [0u16; 256];
                let len = GetWindowTextW(hwnd, &mut buf).max(0) as usize;
                let title = String::from_utf16_lossy(&buf[..len]);
                let visible = IsWindowVisible(hwnd).as_bool();
                WindowRecord::new(from_hwnd(hwnd), title, visible)
            })
            .collect();

        Ok(records)
    }

    async fn restore(&self, handle: WindowHandle) -> Result<()> {
        let hwnd = to_hwnd(handle);
        unsafe {
            if IsIconic(hwnd).as_bool() {
                debug!("Окно {} свёрнуто, разворачиваем", handle);
                let _ = ShowWindow(hwnd, SW_RESTORE);
            }
        }
        Ok(())
    }

    async fn set_foreground(&self, handle: WindowHandle) -> Result<()> {
        let granted = unsafe { SetForegroundWindow(to_hwnd(handle)) }.as_bool();
        debug!("SetForegroundWindow({}) -> {}", handle, granted);
        Ok(())
    }

    async fn foreground_window(&self) -> Result<Option<WindowHandle>> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0.is_null() {
            Ok(None)
        } else {
            Ok(Some(from_hwnd(hwnd)))
        }
    }

    async fn send_key_event(&self, event: VirtualKeyEvent) -> Result<()> {
        let vk = event.key_code.value();
        let mut flags = if is_extended_key(vk) {
            KEYEVENTF_EXTENDEDKEY
        } else {
            KEYBD_EVENT_FLAGS(0)
        };
        if event.state.is_key_up() {
            flags |= KEYEVENTF_KEYUP;
        }

        let input = [INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(vk as u16),
                    wScan: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        }];

        let sent = unsafe { SendInput(&input, mem::size_of::<INPUT>() as i32) };
        if sent == 0 {
            return Err(KeyboardError::WindowSystem(format!(
                "SendInput не принял событие {}",
                event.key_code
            )));
        }
        Ok(())
    }
}
