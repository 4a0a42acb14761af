use crate::modules::HotkeyBackend;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Sends key combinations through the `xdotool` command line tool
#[derive(Debug)]
pub struct XdotoolHotkeys {
    program: String,
}

impl XdotoolHotkeys {
    pub fn new() -> Self {
        XdotoolHotkeys {
            program: "xdotool".to_string(),
        }
    }

    /// Returns the backend if `xdotool` can be executed on this host
    pub fn detect() -> Option<Self> {
        let backend = Self::new();
        let found = Command::new(&backend.program)
            .arg("version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);
        found.then_some(backend)
    }

    /// Maps common key names onto xdotool keysyms
    fn keysym(key: &str) -> String {
        match key.to_lowercase().as_str() {
            "win" | "windows" | "cmd" | "command" | "meta" => "super".to_string(),
            "control" => "ctrl".to_string(),
            "option" => "alt".to_string(),
            "esc" => "Escape".to_string(),
            "enter" => "Return".to_string(),
            "del" => "Delete".to_string(),
            other => other.to_string(),
        }
    }
}

impl Default for XdotoolHotkeys {
    fn default() -> Self {
        Self::new()
    }
}

impl HotkeyBackend for XdotoolHotkeys {
    fn name(&self) -> &str {
        "xdotool"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn send(&self, keys: &[String]) -> Result<(), String> {
        let combo = keys
            .iter()
            .map(|k| Self::keysym(k))
            .collect::<Vec<_>>()
            .join("+");
        debug!("Sending key combination: {}", combo);

        let status = Command::new(&self.program)
            .arg("key")
            .arg(&combo)
            .status()
            .map_err(|e| e.to_string())?;

        if status.success() {
            Ok(())
        } else {
            Err(format!("{} exited with {}", self.program, status))
        }
    }
}

/// Stand-in used when no automation backend exists on this host
#[derive(Debug, Default)]
pub struct UnsupportedHotkeys;

impl HotkeyBackend for UnsupportedHotkeys {
    fn name(&self) -> &str {
        "keyboard automation (xdotool)"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn send(&self, _keys: &[String]) -> Result<(), String> {
        Err("keyboard automation is not supported here".to_string())
    }
}

/// Picks the hotkey backend once, when the session is built
pub fn select_hotkey_backend() -> Box<dyn HotkeyBackend> {
    match XdotoolHotkeys::detect() {
        Some(backend) => {
            info!("Hotkey automation enabled via {}", backend.name());
            Box::new(backend)
        }
        None => {
            info!("Hotkey automation unavailable on this host");
            Box::new(UnsupportedHotkeys)
        }
    }
}
