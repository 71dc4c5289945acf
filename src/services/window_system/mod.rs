//! Window system capability: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for talking to the host
//! window system: enumerating top-level windows, restoring/activating a window,
//! reading the foreground window and synthesizing key events. Title matching,
//! focus retries and key sequencing live in the services that consume it.

mod dry_run;
mod r#trait;
#[cfg(windows)]
mod win32;
#[cfg(not(windows))]
mod wmctrl;
#[cfg(not(windows))]
mod x11;
#[cfg(not(windows))]
mod xdotool;

pub use self::dry_run::DryRunWindowSystem;
#[cfg(test)]
pub use self::dry_run::WindowSystemCall;
pub use self::r#trait::{create_window_system, WindowSystem};
