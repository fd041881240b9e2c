//! Tracing subscriber setup for binaries embedding the harvester

use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by verbosity
///
/// `RUST_LOG`, when set, takes precedence over `verbose` and `quiet`.
/// Calling this more than once returns an error instead of panicking.
///
/// # Arguments
///
/// * `verbose` - 0 for info, 1 for debug, 2 for trace of this crate, 3+ for trace everywhere
/// * `quiet` - Only show errors
pub fn init_logging(
    verbose: u8,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(default_directives(verbose, quiet)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .try_init()
}

fn default_directives(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }

    match verbose {
        0 => "reddit_harvest=info,warn",
        1 => "reddit_harvest=debug,info",
        2 => "reddit_harvest=trace,debug",
        _ => "trace",
    }
}
