//! Focused unit tests covering recommend CLI configuration and request parsing.

use super::helpers::{SAMPLE_REQUEST, sample_routes, workspace, write_catalogue, write_utf8};
use super::*;
use crate::recommend::{
    DefaultCandidateSourceBuilder, RecommendConfig, SourceConfig, config_from_layers_for_test,
    load_request, run_recommend_with,
};
use camino::Utf8PathBuf;
use rstest::rstest;
use stride_core::RecommendResponse;
use stride_data::TrailRouterConfig;

fn trailrouter_config(request_path: Utf8PathBuf) -> RecommendConfig {
    RecommendConfig {
        request_path,
        source: SourceConfig::TrailRouter(TrailRouterConfig::unconfigured()),
        output: None,
    }
}

#[rstest]
fn converting_recommend_without_request_errors() {
    let args = RecommendArgs {
        request_path: None,
        ..RecommendArgs::default()
    };

    let err = RecommendConfig::try_from(args).expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(env, ENV_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn catalogue_path_selects_the_catalogue_source() {
    let args = RecommendArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        candidates: Some(Utf8PathBuf::from("routes.json")),
        trailrouter_base_url: Some("https://trailrouter.example/routes".to_owned()),
        ..RecommendArgs::default()
    };

    let config = RecommendConfig::try_from(args).expect("config should build");
    assert_eq!(
        config.source,
        SourceConfig::Catalogue(Utf8PathBuf::from("routes.json"))
    );
}

#[rstest]
fn trailrouter_settings_flow_into_the_source_config() {
    let args = RecommendArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        trailrouter_base_url: Some("https://trailrouter.example/routes".to_owned()),
        trailrouter_api_key: Some("secret".to_owned()),
        candidate_count: Some(4),
        seed: Some(7),
        ..RecommendArgs::default()
    };

    let config = RecommendConfig::try_from(args).expect("config should build");
    let SourceConfig::TrailRouter(trailrouter) = config.source else {
        panic!("expected TrailRouter source");
    };
    assert_eq!(
        trailrouter.base_url.as_deref(),
        Some("https://trailrouter.example/routes")
    );
    assert_eq!(trailrouter.api_key.as_deref(), Some("secret"));
    assert_eq!(trailrouter.candidate_count, 4);
    assert_eq!(trailrouter.seed, Some(7));
}

#[rstest]
fn trailrouter_defaults_apply_without_options() {
    let args = RecommendArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        ..RecommendArgs::default()
    };

    let config = RecommendConfig::try_from(args).expect("config should build");
    let SourceConfig::TrailRouter(trailrouter) = config.source else {
        panic!("expected TrailRouter source");
    };
    assert_eq!(trailrouter.base_url, None);
    assert_eq!(
        trailrouter.candidate_count,
        stride_data::trailrouter::DEFAULT_CANDIDATE_COUNT
    );
    assert_eq!(trailrouter.seed, None);
    assert_eq!(config.output, None);
}

#[rstest]
fn zero_candidate_count_is_rejected() {
    let args = RecommendArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        candidate_count: Some(0),
        ..RecommendArgs::default()
    };

    let err = RecommendConfig::try_from(args).expect_err("zero count should error");
    match err {
        CliError::InvalidArgument { field, .. } => assert_eq!(field, ARG_CANDIDATE_COUNT),
        other => panic!("expected InvalidArgument, found {other:?}"),
    }
}

#[rstest]
#[case::missing_request(ARG_REQUEST, false, true)]
#[case::missing_catalogue(ARG_CANDIDATES, true, false)]
fn validate_sources_reports_missing_files(
    #[case] expected_field: &'static str,
    #[case] write_request: bool,
    #[case] write_routes: bool,
) {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");
    let catalogue_path = root.join("routes.json");
    if write_request {
        write_utf8(&request_path, SAMPLE_REQUEST.as_bytes());
    }
    if write_routes {
        write_catalogue(&catalogue_path, &sample_routes());
    }

    let config = RecommendConfig {
        request_path,
        source: SourceConfig::Catalogue(catalogue_path),
        output: None,
    };

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, expected_field),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");
    std::fs::create_dir(&request_path).expect("request directory");

    let err = trailrouter_config(request_path.clone())
        .validate_sources()
        .expect_err("expected directory path to fail validation");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_ignores_catalogue_for_trailrouter() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");
    write_utf8(&request_path, SAMPLE_REQUEST.as_bytes());

    trailrouter_config(request_path)
        .validate_sources()
        .expect("request exists");
}

#[rstest]
fn load_request_decodes_json() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");
    write_utf8(
        &request_path,
        br#"{"userLat": 41.8781, "userLng": -87.6298, "targetDistance": 5, "limit": 2, "routeType": "out-and-back"}"#,
    );

    let request = load_request(&request_path).expect("request should decode");
    assert_eq!(request.limit, Some(2.0));
    assert_eq!(request.route_type, Some(stride_core::RouteShape::OutAndBack));
    assert_eq!(request.preferences.target_distance, Some(5.0));
    assert_eq!(request.preferences.user_lat, Some(41.8781));
}

#[rstest]
fn load_request_rejects_invalid_json() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");
    write_utf8(&request_path, b"{ not valid json");

    let err = load_request(&request_path).expect_err("invalid json should error");
    match err {
        CliError::ParseRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn load_request_io_error_returns_open_error() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");

    let err = load_request(&request_path).expect_err("missing request should error");
    match err {
        CliError::OpenRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("expected OpenRequest, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "request_path": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let (_tmp, root) = workspace();
    let env_request = root.join("from-env-request.json");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "request_path": root.join("from-file-request.json").as_str(),
            "trailrouter_base_url": "https://from-file.example/routes",
            "seed": 1,
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": env_request.as_str(),
        "seed": 2,
    }));
    composer.push_cli(json!({
        "candidate_count": 4,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, env_request);
    let SourceConfig::TrailRouter(trailrouter) = config.source else {
        panic!("expected TrailRouter source");
    };
    assert_eq!(
        trailrouter.base_url.as_deref(),
        Some("https://from-file.example/routes")
    );
    assert_eq!(trailrouter.seed, Some(2));
    assert_eq!(trailrouter.candidate_count, 4);
}

#[rstest]
fn output_option_writes_response_to_file() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");
    let catalogue_path = root.join("routes.json");
    let output_path = root.join("out/ranked.json");
    write_utf8(&request_path, SAMPLE_REQUEST.as_bytes());
    write_catalogue(&catalogue_path, &sample_routes());

    let args = RecommendArgs {
        request_path: Some(request_path),
        candidates: Some(catalogue_path),
        output: Some(output_path.clone()),
        ..RecommendArgs::default()
    };
    let mut stdout = Vec::new();
    run_recommend_with(args, &DefaultCandidateSourceBuilder, &mut stdout)
        .expect("recommend should succeed");

    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(&output_path).expect("read output");
    let response: RecommendResponse = serde_json::from_str(&written).expect("decode response");
    assert_eq!(response.count, 3);
    assert!(written.ends_with('\n'));
}
