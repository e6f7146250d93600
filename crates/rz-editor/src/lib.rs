pub mod commands;
pub mod drag;
pub mod frame;
pub mod host;
pub mod input;
pub mod session;
pub mod sync;
pub mod toolbar;
