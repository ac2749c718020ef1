use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. Warnings and errors go to stderr, the
/// rest of the diagnostics to stdout.
pub fn initialize_logger() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dirclip=info"));

    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_target(false)
        .without_time()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global logger: {}", e);
    }
}
