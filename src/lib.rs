// Library exports for testing and potential library use

/// Application version (root crate version).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod cli;
pub mod debug;

pub use tmux_tools_config as config;
pub use tmux_tools_layout as layout;
