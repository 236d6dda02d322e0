//! Error types emitted by the Stride CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use stride_core::{CandidateError, RequestValidationError};
use stride_data::SourceBuildError;
use thiserror::Error;

/// Errors emitted by the Stride CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// An option holds a value the command cannot use.
    #[error("invalid --{field}: {reason}")]
    InvalidArgument {
        /// Option name.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Reading the request file failed.
    #[error("failed to open recommendation request at {path:?}: {source}")]
    OpenRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Request JSON could not be decoded.
    #[error("failed to parse recommendation request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The request payload failed validation.
    #[error("recommendation request in {path:?} failed validation: {source}")]
    InvalidRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: RequestValidationError,
    },
    /// Constructing the TrailRouter source failed.
    #[error("failed to build TrailRouter source: {source}")]
    BuildTrailRouter {
        /// Construction failure.
        #[source]
        source: SourceBuildError,
    },
    /// The candidate source failed.
    #[error("failed to fetch candidate routes: {source}")]
    Candidates {
        /// Source failure.
        #[source]
        source: CandidateError,
    },
    /// Serialising the response failed.
    #[error("failed to serialise recommendation response: {0}")]
    SerialiseResponse(#[source] serde_json::Error),
    /// Writing the response to stdout failed.
    #[error("failed to write recommendation output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing the response file failed.
    #[error("failed to write recommendation output to {path:?}: {source}")]
    WriteOutputFile {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
