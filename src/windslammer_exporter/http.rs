// windslammer_exporter - Prometheus metrics exporter for the Windslammer weather station
//
// Copyright 2026 Nick Pillitteri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use crate::client::WindslammerClient;
use crate::metrics::WindslammerMetrics;
use crate::parse;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Content type of the OpenMetrics text exposition format.
pub const TEXT_FORMAT: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// State shared by all HTTP requests.
#[derive(Debug)]
pub struct RequestState {
    pub client: WindslammerClient,
    pub metrics: WindslammerMetrics,
}

impl RequestState {
    pub fn new(client: WindslammerClient, metrics: WindslammerMetrics) -> Self {
        RequestState { client, metrics }
    }
}

/// Router exposing `/metrics` and `/health`.
pub fn router(state: Arc<RequestState>) -> Router {
    Router::new()
        .route("/metrics", get(text_metrics_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Fetch a new snapshot from the station, update gauges, and render them in text format.
///
/// Failing to fetch from the station does not fail the request: whatever values the gauges
/// currently hold are served.
pub async fn text_metrics_handler(State(state): State<Arc<RequestState>>) -> impl IntoResponse {
    match state.client.snapshot().await {
        Ok(body) => {
            let fields = parse::parse(&body);
            let updated = state.metrics.observe(&fields);
            tracing::info!(message = "updated metrics from station snapshot", fields = fields.len(), updated = updated);
        }
        Err(e) => {
            tracing::error!(message = "failed to fetch station snapshot", url = %state.client.station_url(), error = %e);
        }
    }

    let mut headers = HeaderMap::new();
    match state.metrics.snapshot() {
        Ok(buf) => {
            tracing::debug!(message = "encoded prometheus metrics to text format", num_bytes = buf.len());
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_FORMAT));
            (StatusCode::OK, headers, buf)
        }
        Err(e) => {
            tracing::error!(message = "error encoding metrics to text format", error = %e);
            (StatusCode::INTERNAL_SERVER_ERROR, headers, String::new())
        }
    }
}

pub async fn health_handler() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::{router, RequestState, TEXT_FORMAT};
    use crate::client::WindslammerClient;
    use crate::metrics::WindslammerMetrics;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    const UNREACHABLE: &str = "http://127.0.0.1:1/cgi-bin/ws.cgi";

    fn state(url: &str) -> Arc<RequestState> {
        let http = reqwest::Client::builder().timeout(Duration::from_secs(2)).build().unwrap();
        let client = WindslammerClient::new(http, url).unwrap();
        Arc::new(RequestState::new(client, WindslammerMetrics::new()))
    }

    fn station(body: &'static str) -> String {
        let app = Router::new().route("/cgi-bin/ws.cgi", post(move || async move { body }));
        let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(app.into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);
        format!("http://{}/cgi-bin/ws.cgi", addr)
    }

    async fn get(state: Arc<RequestState>, path: &str) -> (StatusCode, Option<String>, String) {
        let req = Request::builder().uri(path).body(Body::empty()).unwrap();
        let res = router(state).oneshot(req).await.unwrap();
        let status = res.status();
        let content_type = res
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_owned());
        let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_upstream_unreachable() {
        let (status, _, body) = get(state(UNREACHABLE), "/health").await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!("OK", body);
    }

    #[tokio::test]
    async fn test_metrics_updates_from_station() {
        let state = state(&station("wind_dir=180.5, wind_speed=12.3, humidity=50, garbage"));
        let (status, content_type, body) = get(state.clone(), "/metrics").await;

        assert_eq!(StatusCode::OK, status);
        assert_eq!(Some(TEXT_FORMAT), content_type.as_deref());
        assert!(body.contains("windslammer_wind_direction_degrees 180.5"), "unexpected body {}", body);
        assert!(body.contains("windslammer_wind_speed_mph 12.3"), "unexpected body {}", body);
        assert!(!body.contains("humidity"));
        assert_eq!(Some(0.0), state.metrics.get("temp_lo"));
    }

    #[tokio::test]
    async fn test_metrics_upstream_unreachable_serves_stale() {
        let state = state(UNREACHABLE);
        state.metrics.update("elev_hi", 1200.0);

        let (status, _, body) = get(state.clone(), "/metrics").await;

        assert_eq!(StatusCode::OK, status);
        assert!(body.contains("windslammer_elevation_upper_feet 1200"), "unexpected body {}", body);
        assert_eq!(Some(0.0), state.metrics.get("wind_dir"));
    }

    #[tokio::test]
    async fn test_metrics_repeated_scrapes_same_state() {
        let state = state(&station("wind_dir=180.5,temp_hi=40.1"));

        let (_, _, first) = get(state.clone(), "/metrics").await;
        let (_, _, second) = get(state.clone(), "/metrics").await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_metrics_wrong_method() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/metrics")
            .body(Body::empty())
            .unwrap();
        let res = router(state(UNREACHABLE)).oneshot(req).await.unwrap();
        assert_eq!(StatusCode::METHOD_NOT_ALLOWED, res.status());
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (status, _, _) = get(state(UNREACHABLE), "/nope").await;
        assert_eq!(StatusCode::NOT_FOUND, status);
    }
}
