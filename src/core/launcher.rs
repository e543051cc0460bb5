use crate::utils::error::Result;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

pub const DEFAULT_ZAP_COMMAND: &str = "zap -daemon";

/// Starts ZAP without a GUI so it can be driven over its REST API.
#[derive(Debug, Clone)]
pub struct ZapLauncher {
    install_path: PathBuf,
    command: String,
}

impl ZapLauncher {
    pub fn new(install_path: impl Into<PathBuf>) -> Self {
        Self {
            install_path: install_path.into(),
            command: DEFAULT_ZAP_COMMAND.to_string(),
        }
    }

    /// Shell command run inside the install directory, e.g. `./zap.sh -daemon -port 8090`.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn install_path(&self) -> &Path {
        &self.install_path
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Launches ZAP and returns immediately; whether ZAP actually came up is not checked.
    ///
    /// An install directory that is missing or cannot be entered only logs a
    /// warning and returns `Ok(None)`.
    pub fn launch(&self) -> Result<Option<Child>> {
        if !self.install_dir_accessible() {
            return Ok(self.warn_bad_path());
        }

        let spawned = shell_command(&self.command)
            .current_dir(&self.install_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                tracing::info!("ZAP RUNNING");
                Ok(Some(child))
            }
            Err(e) => self.spawn_failed(e),
        }
    }

    fn install_dir_accessible(&self) -> bool {
        self.install_path.is_dir() && std::fs::read_dir(&self.install_path).is_ok()
    }

    fn warn_bad_path(&self) -> Option<Child> {
        tracing::warn!("The OWASP ZAP path is not correctly configured!");
        tracing::debug!("ZAP install path {:?} cannot be entered", self.install_path);
        None
    }

    /// The child's chdir failure and a missing shell surface as the same
    /// spawn error; the directory state tells them apart.
    fn spawn_failed(&self, err: io::Error) -> Result<Option<Child>> {
        if self.install_dir_accessible() {
            Err(err.into())
        } else {
            Ok(self.warn_bad_path())
        }
    }
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

/// Runs `zap -daemon` from the ZAP install directory at `path`.
pub fn start_headless_zap(path: impl AsRef<Path>) -> Result<Option<Child>> {
    ZapLauncher::new(path.as_ref()).launch()
}
