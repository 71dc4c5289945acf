pub mod messages;

pub use messages::{Command, KeypressRequest, Response};
