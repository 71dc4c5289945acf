pub mod command_router;
pub mod focus_controller;
pub mod key_injector;
pub mod keycode_map;
pub mod window_directory;
pub mod window_system;

pub use command_router::CommandRouter;
pub use window_system::create_window_system;
