use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_TEXT_EXTENSIONS: &[&str] = &[
    "txt", "java", "py", "js", "html", "css", "xml", "json", "md", "csv", "log", "yaml", "yml",
    "sh", "bat", "sql", "conf", "config", "ini", "tsx",
];

/// Set of lowercase extensions, without the dot, that a file must carry to be
/// included. An empty filter includes every regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: BTreeSet<String>,
}

impl ExtensionFilter {
    /// `None` selects [`DEFAULT_TEXT_EXTENSIONS`]. A provided list replaces the
    /// defaults entirely, and an empty list matches everything.
    pub fn new(extensions: Option<Vec<String>>) -> Self {
        let extensions: BTreeSet<String> = match extensions {
            Some(list) => list
                .iter()
                .map(|ext| normalize_extension(ext))
                .filter(|ext| !ext.is_empty())
                .collect(),
            None => DEFAULT_TEXT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        };

        debug!("Using extension filter: {:?}", extensions);

        ExtensionFilter { extensions }
    }

    pub fn match_all() -> Self {
        ExtensionFilter {
            extensions: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Human readable description used in the scan banner.
    pub fn describe(&self) -> String {
        if self.is_empty() {
            "All (no specific filter)".to_string()
        } else {
            self.extensions().collect::<Vec<_>>().join(", ")
        }
    }

    pub fn matches<P: AsRef<Path>>(&self, path: P) -> bool {
        if self.is_empty() {
            return true;
        }

        let file_name = match path.as_ref().file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };

        match file_extension(&file_name) {
            Some(ext) => self.extensions.contains(&ext.to_lowercase()),
            None => false,
        }
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        ExtensionFilter::new(None)
    }
}

/// Lowercases and strips leading dots, so `.MD` and `md` are the same entry.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Suffix after the last dot, provided that dot is neither the first nor the
/// last character of the name.
fn file_extension(file_name: &str) -> Option<&str> {
    let dot = file_name.rfind('.')?;
    if dot == 0 || dot + 1 == file_name.len() {
        return None;
    }
    Some(&file_name[dot + 1..])
}
