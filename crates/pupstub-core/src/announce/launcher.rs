use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use super::{Announce, CLIENT_ID_VAR, LOG_VAR, SOCKET_VAR, WATCHDOG_VAR};
use crate::config::Config;
use crate::error::{PupstubError, Result};

/// Starts the add-on under test with the port in its environment
///
/// The child inherits the parent environment plus the `PUPPETEER_*`
/// variables, and is detached from the responder's standard streams so it
/// cannot interfere with the operator prompt.
#[derive(Debug)]
pub struct ChildLauncher {
    command: Vec<String>,
    client_id: String,
    log_path: PathBuf,
    watchdog: bool,
    child: Option<Child>,
}

impl ChildLauncher {
    pub fn new(command: Vec<String>, client_id: impl Into<String>, log_path: PathBuf) -> Self {
        Self {
            command,
            client_id: client_id.into(),
            log_path,
            watchdog: false,
            child: None,
        }
    }

    /// Build a launcher from the `[launcher]` config section
    pub fn from_config(config: &Config, client_id: impl Into<String>) -> Result<Self> {
        let launcher = Self::new(
            config.launcher.command.clone(),
            client_id,
            config.client_log_path()?,
        );
        Ok(launcher.with_watchdog(config.launcher.watchdog))
    }

    pub fn with_watchdog(mut self, watchdog: bool) -> Self {
        self.watchdog = watchdog;
        self
    }

    /// The spawned child, once [`Announce::announce`] has run
    pub fn child(&self) -> Option<&Child> {
        self.child.as_ref()
    }

    pub fn child_mut(&mut self) -> Option<&mut Child> {
        self.child.as_mut()
    }

    /// Prepare the child command for the given port without spawning it
    pub fn build_command(&self, port: u16) -> Result<Command> {
        let (program, args) = self.command.split_first().ok_or(PupstubError::EmptyCommand)?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .env(SOCKET_VAR, port.to_string())
            .env(CLIENT_ID_VAR, &self.client_id)
            .env(LOG_VAR, &self.log_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if self.watchdog {
            cmd.env(WATCHDOG_VAR, "1");
        }

        Ok(cmd)
    }
}

impl Announce for ChildLauncher {
    fn announce(&mut self, port: u16) -> Result<()> {
        let mut cmd = self.build_command(port)?;
        let child = cmd.spawn().map_err(|source| PupstubError::Launch {
            program: self.command[0].clone(),
            source,
        })?;

        tracing::info!(
            pid = child.id(),
            port,
            client_id = %self.client_id,
            log = %self.log_path.display(),
            "launched {}",
            self.command.join(" ")
        );

        self.child = Some(child);
        Ok(())
    }
}
