//! Command-line interface for running Stride route recommendations.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod recommend;

pub use error::CliError;

use recommend::{RecommendArgs, run_recommend};

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_CANDIDATES: &str = "candidates";
pub(crate) const ARG_TRAILROUTER_BASE_URL: &str = "trailrouter-base-url";
pub(crate) const ARG_TRAILROUTER_API_KEY: &str = "trailrouter-api-key";
pub(crate) const ARG_CANDIDATE_COUNT: &str = "candidate-count";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ENV_REQUEST: &str = "STRIDE_REQUEST_PATH";

/// Environment variable holding the log filter directive.
pub const ENV_LOG: &str = "STRIDE_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Run the Stride CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments, configuration, the request, or
/// the candidate source fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging();
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
    }
}

/// Route `log` records to stderr, filtered by `STRIDE_LOG`.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        log::debug!("logger already installed: {err}");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "stride",
    about = "Recommend running routes near a starting point",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank candidate routes for a JSON recommendation request.
    Recommend(RecommendArgs),
}

#[cfg(test)]
mod tests;
