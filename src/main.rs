use clap::Parser;
use dirclip::config::{helper_timeout_from_secs, DEFAULT_HELPER_TIMEOUT_SECS};
use dirclip::logger::initialize_logger;
use dirclip::sink::HelperCommand;
use dirclip::{copy_directory_to_clipboard, DirClipConfig, ExtensionFilter, DEFAULT_TEXT_EXTENSIONS};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Copies the concatenated content of all text files in a directory (and subdirectories) to the system clipboard",
    after_help = usage_examples()
)]
struct CliArgs {
    /// The directory to scan
    #[arg(default_value = ".")]
    source_dir: PathBuf,

    /// File extensions to include, without the dot. Replaces the default set
    extensions: Vec<String>,

    /// Include every regular file regardless of extension
    #[arg(long, conflicts_with = "extensions")]
    all: bool,

    /// Skip the clipboard ownership handshake
    #[arg(long)]
    no_handshake: bool,

    /// Command line of the clipboard ownership helper
    #[arg(long, env = "DIRCLIP_HELPER")]
    helper: Option<String>,

    /// Seconds to wait for the helper, 0 waits indefinitely
    #[arg(long, env = "DIRCLIP_HELPER_TIMEOUT", default_value_t = DEFAULT_HELPER_TIMEOUT_SECS)]
    helper_timeout_secs: u64,

    /// Print a per-directory character tree after the summary
    #[arg(long)]
    tree: bool,
}

fn usage_examples() -> String {
    format!(
        "Default extensions:\n  {}\n\nExamples:\n  \
         dirclip\n    Scans current directory, uses default extensions.\n\n  \
         dirclip my_project_folder\n    Scans 'my_project_folder', uses default extensions.\n\n  \
         dirclip . java md\n    Scans current directory, only includes .java and .md files.\n\n  \
         dirclip ./docs txt\n    Scans './docs', only includes .txt files.",
        DEFAULT_TEXT_EXTENSIONS.join(", ")
    )
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    initialize_logger();

    let filter = if cli_args.all {
        ExtensionFilter::match_all()
    } else if cli_args.extensions.is_empty() {
        ExtensionFilter::default()
    } else {
        ExtensionFilter::new(Some(cli_args.extensions))
    };

    let config = DirClipConfig {
        source_dir: cli_args.source_dir,
        filter,
        handshake: !cli_args.no_handshake,
        helper: cli_args.helper.as_deref().and_then(HelperCommand::parse),
        helper_timeout: helper_timeout_from_secs(cli_args.helper_timeout_secs),
        show_tree: cli_args.tree,
    };

    match copy_directory_to_clipboard(config).await {
        Ok(report) => {
            debug!("Delivery finished: {:?}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
