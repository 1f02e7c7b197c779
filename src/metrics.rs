use axum::{routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the process-wide Prometheus recorder.
///
/// Also publishes the configured request timeout as a static gauge, so a
/// misconfigured client is visible on a dashboard.
pub fn install(timeout_secs: u64) -> PrometheusHandle {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("prometheus: install recorder");

    gauge!("apod_request_timeout_secs").set(timeout_secs as f64);
    handle
}

/// Router exposing `/metrics` with the Prometheus exposition format.
pub fn router(handle: PrometheusHandle) -> Router {
    Router::new().route(
        "/metrics",
        get(move || {
            let h = handle.clone();
            async move { h.render() }
        }),
    )
}
