//! Fixtures for writing request and catalogue files into scratch directories.

use camino::{Utf8Path, Utf8PathBuf};
use stride_core::test_support::RouteBuilder;
use stride_core::{Route, SurfaceType};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture");
}

pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// A request for four miles from downtown Chicago.
pub(super) const SAMPLE_REQUEST: &str = r#"{
    "userLat": 41.8781,
    "userLng": -87.6298,
    "targetDistance": 4.0,
    "scenicWeight": 0.4
}"#;

/// Four routes near downtown Chicago; the lakefront loop is the best fit
/// for [`SAMPLE_REQUEST`].
pub(super) fn sample_routes() -> Vec<Route> {
    vec![
        RouteBuilder::new("lakefront")
            .distance(4.0)
            .scenic_score(95.0)
            .start_at(41.8800, -87.6200)
            .build(),
        RouteBuilder::new("river-walk")
            .distance(3.6)
            .scenic_score(80.0)
            .start_at(41.8880, -87.6260)
            .build(),
        RouteBuilder::new("west-loop")
            .distance(5.5)
            .scenic_score(40.0)
            .surface(SurfaceType::Mixed)
            .start_at(41.8830, -87.6500)
            .build(),
        RouteBuilder::new("industrial")
            .distance(7.0)
            .scenic_score(15.0)
            .start_at(41.8500, -87.6600)
            .build(),
    ]
}

pub(super) fn write_catalogue(path: &Utf8Path, routes: &[Route]) {
    let payload = serde_json::to_string_pretty(routes).expect("serialise catalogue");
    write_utf8(path, payload.as_bytes());
}
