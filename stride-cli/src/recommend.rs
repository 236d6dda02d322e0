//! Recommend command implementation for the Stride CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use stride_core::{CandidateSource, RecommendRequest, RecommendResponse, recommend_with_source};
use stride_data::trailrouter::DEFAULT_CANDIDATE_COUNT;
use stride_data::{JsonCatalogSource, TrailRouterConfig, TrailRouterSource};

use crate::{
    ARG_CANDIDATE_COUNT, ARG_CANDIDATES, ARG_OUTPUT, ARG_REQUEST, ARG_SEED,
    ARG_TRAILROUTER_API_KEY, ARG_TRAILROUTER_BASE_URL, CliError, ENV_REQUEST,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank running routes for a JSON-encoded recommendation \
                 request. Candidates come from a JSON route catalogue when \
                 --candidates is given, otherwise from the TrailRouter API. \
                 Options can also come from configuration files or STRIDE_* \
                 environment variables.",
    about = "Recommend running routes for a request"
)]
#[ortho_config(prefix = "STRIDE")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON file containing a recommendation request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// JSON route catalogue to rank instead of generating routes.
    #[arg(long = ARG_CANDIDATES, value_name = "path")]
    #[serde(default)]
    pub(crate) candidates: Option<Utf8PathBuf>,
    /// TrailRouter endpoint (e.g. "https://trailrouter.com/ors/experimentalroutes").
    #[arg(long = ARG_TRAILROUTER_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) trailrouter_base_url: Option<String>,
    /// Bearer token for TrailRouter.
    #[arg(long = ARG_TRAILROUTER_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) trailrouter_api_key: Option<String>,
    /// Number of routes to request from TrailRouter.
    #[arg(long = ARG_CANDIDATE_COUNT, value_name = "n")]
    #[serde(default)]
    pub(crate) candidate_count: Option<usize>,
    /// Seed for TrailRouter distance variation.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Write the response here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Where candidate routes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceConfig {
    /// A JSON route catalogue on disk.
    Catalogue(Utf8PathBuf),
    /// The TrailRouter API.
    TrailRouter(TrailRouterConfig),
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Candidate source settings.
    pub(crate) source: SourceConfig,
    /// Response destination; stdout when unset.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_REQUEST)?;
        if let SourceConfig::Catalogue(path) = &self.source {
            Self::require_existing(path, ARG_CANDIDATES)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match stride_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_REQUEST,
        })?;

        let candidate_count = args.candidate_count.unwrap_or(DEFAULT_CANDIDATE_COUNT);
        if candidate_count == 0 {
            return Err(CliError::InvalidArgument {
                field: ARG_CANDIDATE_COUNT,
                reason: "at least one candidate must be requested",
            });
        }

        let source = match args.candidates {
            Some(path) => SourceConfig::Catalogue(path),
            None => {
                let mut config = args
                    .trailrouter_base_url
                    .map_or_else(TrailRouterConfig::unconfigured, TrailRouterConfig::new)
                    .with_candidate_count(candidate_count);
                config.api_key = args.trailrouter_api_key;
                config.seed = args.seed;
                SourceConfig::TrailRouter(config)
            }
        };

        Ok(Self {
            request_path,
            source,
            output: args.output,
        })
    }
}

/// Builds the candidate source for the current invocation.
pub(super) trait CandidateSourceBuilder {
    fn build(&self, config: &RecommendConfig) -> Result<Box<dyn CandidateSource>, CliError>;
}

pub(super) struct DefaultCandidateSourceBuilder;

impl CandidateSourceBuilder for DefaultCandidateSourceBuilder {
    fn build(&self, config: &RecommendConfig) -> Result<Box<dyn CandidateSource>, CliError> {
        match &config.source {
            SourceConfig::Catalogue(path) => {
                let catalogue = JsonCatalogSource::load(path)
                    .map_err(|source| CliError::Candidates { source })?;
                Ok(Box::new(catalogue))
            }
            SourceConfig::TrailRouter(trailrouter) => {
                let generator = TrailRouterSource::with_config(trailrouter.clone())
                    .map_err(|source| CliError::BuildTrailRouter { source })?;
                Ok(Box::new(generator))
            }
        }
    }
}

pub(super) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultCandidateSourceBuilder;
    run_recommend_with(args, &builder, &mut stdout)
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    builder: &dyn CandidateSourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_recommend_config(args)?;
    let response = execute_recommend(&config, builder)?;
    match &config.output {
        Some(path) => write_response_file(path, &response),
        None => write_response(writer, &response),
    }
}

fn execute_recommend(
    config: &RecommendConfig,
    builder: &dyn CandidateSourceBuilder,
) -> Result<RecommendResponse, CliError> {
    let request = load_request(&config.request_path)?;
    let validated = request
        .validate()
        .map_err(|source| CliError::InvalidRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let candidate_source = builder.build(config)?;
    let response = recommend_with_source(candidate_source.as_ref(), &validated)
        .map_err(|source| CliError::Candidates { source })?;
    log::info!(
        "recommended {} routes from {}",
        response.count,
        config.request_path
    );
    Ok(response)
}

fn resolve_recommend_config(args: RecommendArgs) -> Result<RecommendConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`RecommendRequest`] from disk.
pub(super) fn load_request(path: &Utf8Path) -> Result<RecommendRequest, CliError> {
    let contents = stride_fs::read_utf8_to_string(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn render_response(response: &RecommendResponse) -> Result<String, CliError> {
    let mut payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerialiseResponse)?;
    payload.push('\n');
    Ok(payload)
}

fn write_response(writer: &mut dyn Write, response: &RecommendResponse) -> Result<(), CliError> {
    let payload = render_response(response)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)
}

fn write_response_file(path: &Utf8Path, response: &RecommendResponse) -> Result<(), CliError> {
    let payload = render_response(response)?;
    stride_fs::write_utf8_file(path, payload).map_err(|source| CliError::WriteOutputFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
