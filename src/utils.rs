use crate::errors::DirClipError;
use std::path::{Component, Path};
use tokio::fs as async_fs;

/// Renders `path` relative to `root` with `/` separators on every platform.
/// Falls back to the full path if `path` does not live under `root`.
pub fn relative_display(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::CurDir => None,
            other => Some(other.as_os_str().to_string_lossy().replace('\\', "/")),
        })
        .collect();

    parts.join("/")
}

pub async fn read_file_content(file_path: &Path, display_path: &str) -> Result<String, DirClipError> {
    async_fs::read_to_string(file_path)
        .await
        .map_err(|err| DirClipError::FileReadError(display_path.to_owned(), err.to_string()))
}

/// One block of the aggregate buffer: header line, blank line, raw content and
/// two trailing newlines.
pub fn format_file_block(relative_path: &str, content: &str) -> String {
    let mut block = String::with_capacity(content.len() + relative_path.len() + 20);
    block.push_str("--- File: ");
    block.push_str(relative_path);
    block.push_str(" ---\n\n");
    block.push_str(content);
    block.push_str("\n\n");
    block
}
