//! Host capabilities used by the action agent.
//!
//! Each capability is a trait so the agent can be handed a real backend or a
//! stand-in, chosen once when the session is built.

mod hotkey;
mod launcher;

pub use hotkey::*;
pub use launcher::*;

use std::fmt::Debug;

/// Opens URIs and starts external processes without supervising them
pub trait Launcher: Debug + Send + Sync {
    /// Hands `url` to the host's default handler
    fn open_url(&self, url: &str) -> Result<(), String>;
    /// Starts `command_line` through the host shell and returns immediately
    fn spawn_command(&self, command_line: &str) -> Result<(), String>;
}

/// Simulated keyboard input
pub trait HotkeyBackend: Debug + Send + Sync {
    /// Human readable backend name, used in diagnostics
    fn name(&self) -> &str;
    /// Whether the backend can send keys on this host
    fn is_available(&self) -> bool;
    /// Presses `keys` together and releases them
    fn send(&self, keys: &[String]) -> Result<(), String>;
}
