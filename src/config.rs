use crate::aggregate::ScanRequest;
use crate::errors::DirClipError;
use crate::filter::ExtensionFilter;
use crate::sink::HelperCommand;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs as async_fs;

pub const DEFAULT_HELPER_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct DirClipConfig {
    pub source_dir: PathBuf,
    pub filter: ExtensionFilter,
    pub handshake: bool,
    /// Overrides the platform's handshake helper.
    pub helper: Option<HelperCommand>,
    pub helper_timeout: Option<Duration>,
    pub show_tree: bool,
}

impl Default for DirClipConfig {
    fn default() -> Self {
        DirClipConfig {
            source_dir: PathBuf::from("."),
            filter: ExtensionFilter::default(),
            handshake: true,
            helper: None,
            helper_timeout: Some(Duration::from_secs(DEFAULT_HELPER_TIMEOUT_SECS)),
            show_tree: false,
        }
    }
}

impl DirClipConfig {
    pub fn scan_request(&self) -> ScanRequest {
        ScanRequest::new(self.source_dir.clone(), self.filter.clone())
    }

    /// The helper to run after the clipboard is set, if any.
    pub fn resolved_helper(&self) -> Option<HelperCommand> {
        if !self.handshake {
            return None;
        }
        self.helper
            .clone()
            .or_else(HelperCommand::platform_default)
            .map(|helper| helper.with_timeout(self.helper_timeout))
    }
}

/// Timeout in seconds from the command line, where `0` means wait forever.
pub fn helper_timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Checks that `path` exists and is a directory before anything is scanned.
pub async fn validate_source_dir(path: &Path) -> Result<(), DirClipError> {
    let display = std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string();

    match async_fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(DirClipError::NotADirectory(display)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(DirClipError::SourceNotFound(display))
        }
        Err(e) => Err(e.into()),
    }
}
