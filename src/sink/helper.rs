use crate::errors::DirClipError;
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// How the helper process finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperExit {
    pub code: Option<i32>,
}

impl HelperExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// External program that re-asserts clipboard ownership so clipboard managers
/// notice the new content.
#[async_trait]
pub trait OwnershipHelper: Send + Sync {
    fn name(&self) -> &str;

    /// Feeds `text` to the helper, closes its input and waits for it to exit.
    /// `Err` means the helper could not be run to completion; a non-zero exit
    /// is reported through [`HelperExit`].
    async fn handshake(&self, text: &str) -> Result<HelperExit, DirClipError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperCommand {
    pub program: String,
    pub args: Vec<String>,
    /// `None` waits as long as the helper takes.
    pub timeout: Option<Duration>,
}

impl HelperCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        HelperCommand {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parses a whitespace separated command line such as
    /// `xclip -selection clipboard -i`.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_owned);
        let program = parts.next()?;
        Some(HelperCommand::new(program, parts.collect()))
    }

    pub fn xclip() -> Self {
        HelperCommand::new(
            "xclip",
            vec!["-selection".into(), "clipboard".into(), "-i".into()],
        )
    }

    pub fn wl_copy() -> Self {
        HelperCommand::new("wl-copy", Vec::new())
    }

    /// The handshake only matters on Linux desktops. Wayland sessions without
    /// an X server get `wl-copy`, everything else `xclip`.
    #[cfg(target_os = "linux")]
    pub fn platform_default() -> Option<Self> {
        use super::clipboard::env_is_set;

        if env_is_set("WAYLAND_DISPLAY") && !env_is_set("DISPLAY") {
            Some(HelperCommand::wl_copy())
        } else {
            Some(HelperCommand::xclip())
        }
    }

    #[cfg(not(target_os = "linux"))]
    pub fn platform_default() -> Option<Self> {
        None
    }
}

#[async_trait]
impl OwnershipHelper for HelperCommand {
    fn name(&self) -> &str {
        &self.program
    }

    async fn handshake(&self, text: &str) -> Result<HelperExit, DirClipError> {
        debug!("Running clipboard helper: {} {:?}", self.program, self.args);

        // xclip forks a server that keeps any inherited pipe open, so output
        // must not be captured or the wait never finishes.
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DirClipError::HelperSpawnError(self.program.clone(), e.to_string()))?;

        let status = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, feed_and_wait(&mut child, text)).await {
                Ok(status) => status?,
                Err(_) => {
                    warn!("Clipboard helper {} timed out, killing it", self.program);
                    if let Err(e) = child.kill().await {
                        debug!("Failed to kill clipboard helper: {}", e);
                    }
                    return Err(DirClipError::HelperTimeout(self.program.clone(), limit));
                }
            },
            None => feed_and_wait(&mut child, text).await?,
        };

        debug!("Clipboard helper exited with {:?}", status.code());
        Ok(HelperExit {
            code: status.code(),
        })
    }
}

/// Writes `text` to the child's stdin, closes it and waits for the exit. The
/// deadline, when there is one, covers all three steps: a helper that stops
/// reading would otherwise block the write forever.
async fn feed_and_wait(child: &mut Child, text: &str) -> Result<ExitStatus, DirClipError> {
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| DirClipError::HelperWriteError("stdin not captured".to_owned()))?;
    stdin
        .write_all(text.as_bytes())
        .await
        .map_err(|e| DirClipError::HelperWriteError(e.to_string()))?;
    stdin
        .shutdown()
        .await
        .map_err(|e| DirClipError::HelperWriteError(e.to_string()))?;
    drop(stdin);

    child
        .wait()
        .await
        .map_err(|e| DirClipError::HelperWaitError(e.to_string()))
}
