use crate::errors::DirClipError;
use crate::filter::ExtensionFilter;
use crate::utils::{format_file_block, read_file_content, relative_display};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// What to scan and which files to keep.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    root: PathBuf,
    filter: ExtensionFilter,
}

impl ScanRequest {
    pub fn new(root: impl Into<PathBuf>, filter: ExtensionFilter) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        ScanRequest { root, filter }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }
}

/// A file that was read successfully. Only lives until it is folded into the
/// aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub relative_path: String,
    pub content: String,
    pub byte_length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    pub combined_text: String,
    pub files_processed: usize,
    pub total_characters: usize,
    /// Relative path and character count of each processed file, in visit order.
    pub file_stats: Vec<(String, usize)>,
}

impl AggregateResult {
    /// Appends the block for `record` and bumps the counters.
    pub fn fold(&mut self, record: FileRecord) {
        let chars = record.content.chars().count();
        self.combined_text
            .push_str(&format_file_block(&record.relative_path, &record.content));
        self.files_processed += 1;
        self.total_characters += chars;
        self.file_stats.push((record.relative_path, chars));
    }
}

#[async_trait]
pub trait Aggregator {
    async fn aggregate(&self, request: &ScanRequest) -> Result<AggregateResult, DirClipError>;
}

#[derive(Debug, Clone, Default)]
pub struct BasicAggregator;

impl BasicAggregator {
    pub fn new() -> Self {
        BasicAggregator
    }

    /// Walks the tree in file-name order and returns every matching regular
    /// file. Symlinks are never descended into; one pointing at a regular file
    /// counts as that file.
    ///
    /// The walk is synchronous, like `walkdir` itself; only the file reads
    /// that follow go through `tokio::fs`.
    fn collect_candidates(&self, request: &ScanRequest) -> Result<Vec<PathBuf>, DirClipError> {
        let root = request.root();
        let mut candidates = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    let location = e
                        .path()
                        .map(|p| relative_display(root, p))
                        .unwrap_or_else(|| "<unknown>".to_owned());
                    warn!("Warning: Skipping unreadable entry '{}': {}", location, e);
                    continue;
                }
            };

            if !is_regular_file(&entry) {
                continue;
            }
            if request.filter().matches(entry.path()) {
                candidates.push(entry.into_path());
            } else {
                trace!("Filtered out: {}", entry.path().display());
            }
        }

        Ok(candidates)
    }

    async fn read_record(&self, root: &Path, path: &Path) -> Result<FileRecord, DirClipError> {
        let relative_path = relative_display(root, path);
        let content = read_file_content(path, &relative_path).await?;
        Ok(FileRecord {
            relative_path,
            byte_length: content.len(),
            content,
        })
    }
}

#[async_trait]
impl Aggregator for BasicAggregator {
    async fn aggregate(&self, request: &ScanRequest) -> Result<AggregateResult, DirClipError> {
        debug!("Collecting files under {}", request.root().display());
        let candidates = self.collect_candidates(request)?;
        debug!("{} files matched the filter", candidates.len());

        let mut result = AggregateResult::default();
        for path in candidates {
            match self.read_record(request.root(), &path).await {
                Ok(record) => {
                    trace!(
                        "Read {} bytes from {}",
                        record.byte_length,
                        record.relative_path
                    );
                    info!("  Processed: {}", record.relative_path);
                    result.fold(record);
                }
                Err(e) => {
                    warn!("Warning: {}", e);
                }
            }
        }

        Ok(result)
    }
}

/// Runs during the synchronous walk. `entry.metadata()` does not traverse
/// links with `follow_links(false)`, so a symlink's target is stat'ed directly.
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        return std::fs::metadata(entry.path())
            .map(|meta| meta.is_file())
            .unwrap_or(false);
    }
    false
}

pub async fn aggregate_directory(request: &ScanRequest) -> Result<AggregateResult, DirClipError> {
    let aggregator = BasicAggregator::new();
    aggregator.aggregate(request).await
}
