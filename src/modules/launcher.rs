use crate::modules::Launcher;
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, warn};

/// Launcher backed by the host's opener and shell
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        SystemLauncher
    }

    /// Command that hands a URI to the desktop's default handler
    fn opener(url: &str) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }

    /// Command that runs a command line through the host shell
    fn shell(command_line: &str) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command_line]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command_line]);
            cmd
        }
    }

    /// Spawns without waiting and returns the child's pid.
    /// The child is reaped on a background thread once it exits.
    fn detach(mut cmd: Command) -> Result<u32, String> {
        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| e.to_string())?;

        let pid = child.id();
        debug!("Spawned process {}", pid);
        thread::spawn(move || match child.wait() {
            Ok(status) => debug!("Process {} exited with {}", pid, status),
            Err(e) => warn!("Could not reap process {}: {}", pid, e),
        });
        Ok(pid)
    }
}

impl Launcher for SystemLauncher {
    fn open_url(&self, url: &str) -> Result<(), String> {
        debug!("Opening URL: {}", url);
        Self::detach(Self::opener(url)).map(|_| ())
    }

    fn spawn_command(&self, command_line: &str) -> Result<(), String> {
        debug!("Launching command: {}", command_line);
        Self::detach(Self::shell(command_line)).map(|_| ())
    }
}
