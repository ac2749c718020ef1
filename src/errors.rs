use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirClipError {
    #[error("Source path does not exist: {0}")]
    SourceNotFound(String),

    #[error("Source path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Directory walk failed: {0}")]
    WalkError(String),

    #[error("Could not read file '{0}': {1}")]
    FileReadError(String, String),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWriteError(String),

    #[error("Failed to launch clipboard helper '{0}': {1}")]
    HelperSpawnError(String, String),

    #[error("Failed to write to clipboard helper: {0}")]
    HelperWriteError(String),

    #[error("Failed to wait for clipboard helper: {0}")]
    HelperWaitError(String),

    #[error("Clipboard helper '{0}' did not exit within {1:?}")]
    HelperTimeout(String, Duration),

    #[error("IO Error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for DirClipError {
    fn from(err: std::io::Error) -> Self {
        DirClipError::IoError(err.to_string())
    }
}

impl From<walkdir::Error> for DirClipError {
    fn from(err: walkdir::Error) -> Self {
        DirClipError::WalkError(err.to_string())
    }
}
