pub mod aggregate;
pub mod config;
pub mod errors;
pub mod filter;
pub mod logger;
pub mod reporting;
pub mod sink;
pub mod trie;
pub mod utils;

pub use aggregate::{aggregate_directory, AggregateResult, Aggregator, BasicAggregator, ScanRequest};
pub use config::DirClipConfig;
pub use errors::DirClipError;
pub use filter::{ExtensionFilter, DEFAULT_TEXT_EXTENSIONS};
pub use sink::{DeliveryOutcome, DeliveryReport, Sink};

use crate::config::validate_source_dir;
use crate::reporting::{print_char_tree, print_summary, SEPARATOR};
use tracing::info;

/// Scans the configured directory and hands the combined text to the system
/// clipboard, falling back to stdout.
pub async fn copy_directory_to_clipboard(
    config: DirClipConfig,
) -> Result<DeliveryReport, DirClipError> {
    let mut sink = Sink::system(config.resolved_helper());
    copy_directory_with_sink(&config, &mut sink).await
}

pub async fn copy_directory_with_sink(
    config: &DirClipConfig,
    sink: &mut Sink,
) -> Result<DeliveryReport, DirClipError> {
    validate_source_dir(&config.source_dir).await?;

    let request = config.scan_request();
    info!("Scanning directory: {}", request.root().display());
    info!("Including file types: {}", request.filter().describe());
    info!("{}", SEPARATOR);

    let result = aggregate_directory(&request).await?;

    print_summary(&result);
    if config.show_tree {
        print_char_tree(&result);
    }
    info!("{}", SEPARATOR);

    Ok(sink.deliver(&result.combined_text).await)
}
