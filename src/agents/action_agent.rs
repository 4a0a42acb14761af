use crate::constants::NO_ACTIONS_MESSAGE;
use crate::core::{Action, ActionKind, Step};
use crate::modules::{select_hotkey_backend, HotkeyBackend, Launcher, SystemLauncher};
use tracing::{debug, warn};

/// Agent that runs the automatable actions attached to a step.
///
/// Every action produces exactly one log line. A failing action never stops
/// the ones after it.
#[derive(Debug)]
pub struct ActionAgent {
    /// Opens URLs and starts applications
    launcher: Box<dyn Launcher>,
    /// Keyboard automation, possibly a stand-in that reports it is missing
    hotkeys: Box<dyn HotkeyBackend>,
}

impl ActionAgent {
    pub fn new(launcher: Box<dyn Launcher>, hotkeys: Box<dyn HotkeyBackend>) -> Self {
        ActionAgent { launcher, hotkeys }
    }

    /// Agent wired to the host launcher and whichever hotkey backend this host supports
    pub fn system() -> Self {
        Self::new(Box::new(SystemLauncher::new()), select_hotkey_backend())
    }

    /// Executes every action of `step` in order
    ///
    /// # Arguments
    /// * `step` - Step whose actions should run
    ///
    /// # Returns
    /// * `Vec<String>` - One log line per action, or a single line when the step has none
    pub fn execute_step(&self, step: &Step) -> Vec<String> {
        if step.actions.is_empty() {
            return vec![NO_ACTIONS_MESSAGE.to_string()];
        }

        step.actions
            .iter()
            .map(|action| self.execute_action(action))
            .collect()
    }

    fn execute_action(&self, action: &Action) -> String {
        debug!("Executing action {:?}", action);
        match action.kind() {
            ActionKind::OpenUrl(url) => {
                if let Err(e) = self.launcher.open_url(url) {
                    warn!("Opening {} failed: {}", url, e);
                }
                format!("Opened URL: {}", url)
            }
            ActionKind::OpenApp("") => "Skipped open_app: missing command value.".to_string(),
            ActionKind::OpenApp(command) => match self.launcher.spawn_command(command) {
                Ok(()) => format!("Launched app command: {}", command),
                Err(e) => {
                    warn!("Launching '{}' failed: {}", command, e);
                    format!("Failed to launch app command: {} ({})", command, e)
                }
            },
            ActionKind::Hotkey(combo) => self.send_hotkey(combo),
            ActionKind::Unrecognized(tag) => format!("Unknown action type: {}", tag),
        }
    }

    fn send_hotkey(&self, combo: &str) -> String {
        if !self.hotkeys.is_available() {
            return format!(
                "Hotkey action requires an optional capability that is not available: {}",
                self.hotkeys.name()
            );
        }

        let keys: Vec<String> = combo
            .split('+')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect();
        if keys.is_empty() {
            return "Skipped hotkey: no keys provided.".to_string();
        }

        match self.hotkeys.send(&keys) {
            Ok(()) => format!("Sent hotkey: {}", combo),
            Err(e) => {
                warn!("Hotkey {} failed: {}", combo, e);
                format!("Failed to send hotkey {}: {}", combo, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::UnsupportedHotkeys;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default, Clone)]
    struct RecordingLauncher {
        calls: Arc<Mutex<Vec<String>>>,
        fail_spawn: bool,
    }

    impl Launcher for RecordingLauncher {
        fn open_url(&self, url: &str) -> Result<(), String> {
            self.calls.lock().unwrap().push(format!("url:{}", url));
            Err("no browser".to_string())
        }

        fn spawn_command(&self, command_line: &str) -> Result<(), String> {
            self.calls.lock().unwrap().push(format!("cmd:{}", command_line));
            if self.fail_spawn {
                Err("not found".to_string())
            } else {
                Ok(())
            }
        }
    }

    #[derive(Debug, Default, Clone)]
    struct RecordingHotkeys {
        sent: Arc<Mutex<Vec<Vec<String>>>>,
    }

    impl HotkeyBackend for RecordingHotkeys {
        fn name(&self) -> &str {
            "recording"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn send(&self, keys: &[String]) -> Result<(), String> {
            self.sent.lock().unwrap().push(keys.to_vec());
            Ok(())
        }
    }

    fn step_with(actions: Vec<Action>) -> Step {
        Step {
            instruction: "x".to_string(),
            target: None,
            actions,
        }
    }

    fn action(action_type: &str, value: &str) -> Action {
        Action {
            action_type: action_type.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_step_without_actions() {
        let agent = ActionAgent::new(
            Box::new(RecordingLauncher::default()),
            Box::new(UnsupportedHotkeys),
        );
        let logs = agent.execute_step(&step_with(vec![]));
        assert_eq!(logs, vec![NO_ACTIONS_MESSAGE.to_string()]);
    }

    #[test]
    fn test_agent_handles_unknown_action() {
        let agent = ActionAgent::new(
            Box::new(RecordingLauncher::default()),
            Box::new(UnsupportedHotkeys),
        );
        let logs = agent.execute_step(&step_with(vec![action("unknown", "")]));
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("Unknown action type"));
        assert!(logs[0].contains("unknown"));
    }

    #[test]
    fn test_actions_run_in_order_despite_failures() {
        let launcher = RecordingLauncher {
            fail_spawn: true,
            ..Default::default()
        };
        let calls = launcher.calls.clone();
        let agent = ActionAgent::new(Box::new(launcher), Box::new(UnsupportedHotkeys));

        let logs = agent.execute_step(&step_with(vec![
            action("open_app", "settings"),
            action("open_url", "https://example.com"),
            action("open_app", ""),
        ]));

        assert_eq!(
            logs,
            vec![
                "Failed to launch app command: settings (not found)".to_string(),
                "Opened URL: https://example.com".to_string(),
                "Skipped open_app: missing command value.".to_string(),
            ]
        );
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["cmd:settings".to_string(), "url:https://example.com".to_string()]
        );
    }

    #[test]
    fn test_launched_app_is_reported() {
        let agent = ActionAgent::new(
            Box::new(RecordingLauncher::default()),
            Box::new(UnsupportedHotkeys),
        );
        let logs = agent.execute_step(&step_with(vec![action("open_app", "gnome-control-center")]));
        assert_eq!(logs, vec!["Launched app command: gnome-control-center".to_string()]);
    }

    #[test]
    fn test_hotkey_sends_trimmed_keys() {
        let hotkeys = RecordingHotkeys::default();
        let sent = hotkeys.sent.clone();
        let agent = ActionAgent::new(Box::new(RecordingLauncher::default()), Box::new(hotkeys));

        let logs = agent.execute_step(&step_with(vec![
            action("hotkey", " ctrl + alt+ t "),
            action("hotkey", " + "),
        ]));

        assert_eq!(logs[0], "Sent hotkey:  ctrl + alt+ t ");
        assert_eq!(logs[1], "Skipped hotkey: no keys provided.");
        assert_eq!(
            *sent.lock().unwrap(),
            vec![vec!["ctrl".to_string(), "alt".to_string(), "t".to_string()]]
        );
    }

    #[test]
    fn test_hotkey_without_backend_reports_capability() {
        let agent = ActionAgent::new(
            Box::new(RecordingLauncher::default()),
            Box::new(UnsupportedHotkeys),
        );
        let logs = agent.execute_step(&step_with(vec![action("hotkey", "win+a")]));
        assert_eq!(logs.len(), 1);
        assert!(logs[0].starts_with("Hotkey action requires an optional capability"));
    }
}
