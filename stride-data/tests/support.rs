//! Mock TrailRouter service for behaviour tests, backed by `wiremock`.

use serde_json::{Value, json};
use stride_data::TrailRouterSource;
use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock answers on.
pub const ROUTES_PATH: &str = "/ors/experimentalroutes";

/// A base URL on the discard port, where nothing answers.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9/ors/experimentalroutes";

/// One loop of roughly four miles, as TrailRouter reports it.
pub fn loop_route_body() -> Value {
    json!({"routes": [{
        "distance": 6437.36,
        "ascent": 15.0,
        "geometry": {"type": "LineString", "coordinates": [
            [-87.6298, 41.8781, 180.0],
            [-87.6250, 41.8850, 182.0],
            [-87.6298, 41.8781, 180.0]
        ]}
    }]})
}

/// A mock TrailRouter service plus the multi-threaded runtime that drives
/// both the mock and the synchronous source calls made against it.
pub struct TrailRouterStub {
    server: MockServer,
    runtime: Runtime,
}

impl std::fmt::Debug for TrailRouterStub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrailRouterStub")
            .field("uri", &self.server.uri())
            .finish_non_exhaustive()
    }
}

impl TrailRouterStub {
    /// Start a mock service with no routes mounted.
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("test runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    /// Endpoint URL to configure the source with.
    pub fn base_url(&self) -> String {
        format!("{}{ROUTES_PATH}", self.server.uri())
    }

    /// Answer every request with a loop, expecting exactly `times` calls.
    pub fn answer_with_loops(&self, times: u64) {
        self.runtime.block_on(
            Mock::given(method("GET"))
                .and(path(ROUTES_PATH))
                .respond_with(ResponseTemplate::new(200).set_body_json(loop_route_body()))
                .expect(times)
                .mount(&self.server),
        );
    }

    /// Fail the first request with a 500, then answer with loops.
    pub fn fail_first_then_loop(&self) {
        self.runtime.block_on(async {
            Mock::given(method("GET"))
                .and(path(ROUTES_PATH))
                .respond_with(
                    ResponseTemplate::new(500)
                        .set_body_json(json!({"error": "routing engine unavailable"})),
                )
                .up_to_n_times(1)
                .expect(1)
                .mount(&self.server)
                .await;
            Mock::given(method("GET"))
                .and(path(ROUTES_PATH))
                .respond_with(ResponseTemplate::new(200).set_body_json(loop_route_body()))
                .mount(&self.server)
                .await;
        });
    }

    /// Answer with a loop only when the bearer token matches; anything
    /// else falls through to the mock's default 404.
    pub fn answer_bearer(&self, token: &str) {
        self.runtime.block_on(
            Mock::given(method("GET"))
                .and(path(ROUTES_PATH))
                .and(header("authorization", format!("Bearer {token}").as_str()))
                .respond_with(ResponseTemplate::new(200).set_body_json(loop_route_body()))
                .expect(1)
                .mount(&self.server),
        );
    }

    /// Run `call` on a runtime worker thread so the source takes its
    /// `block_in_place` path, then hand the source back for dropping here.
    pub fn run<T, F>(&self, source: TrailRouterSource, call: F) -> T
    where
        T: Send + 'static,
        F: FnOnce(&TrailRouterSource) -> T + Send + 'static,
    {
        let task = self.runtime.spawn(async move {
            let outcome = call(&source);
            (source, outcome)
        });
        let (source, outcome) = self.runtime.block_on(task).expect("source task");
        drop(source);
        outcome
    }

    /// Query strings of every request received so far, in arrival order.
    pub fn received_queries(&self) -> Vec<Vec<(String, String)>> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .map(|request| {
                request
                    .url
                    .query_pairs()
                    .map(|(key, value)| (key.into_owned(), value.into_owned()))
                    .collect()
            })
            .collect()
    }

    /// Check every mounted expectation.
    pub fn verify(&self) {
        self.runtime.block_on(self.server.verify());
    }
}
