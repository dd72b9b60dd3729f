use std::time::Instant;
use warp::http::{Method, StatusCode};
use warp::path::FullPath;
use warp::reject::Rejection;
use warp::reply::{Reply, Response};
use warp::Filter;

#[derive(Debug, Clone)]
struct RequestInfo {
    path: String,
    method: Method,
    start: Instant,
}

/// Wraps `filter` so each request is logged on the way in and its final
/// status on the way out.
pub fn with_request_logging<F, T>(
    filter: F,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone
where
    F: Filter<Extract = (T,), Error = Rejection> + Clone + Send + Sync + 'static,
    T: Reply,
{
    warp::any()
        .and(warp::path::full())
        .and(warp::method())
        .map(|path: FullPath, method: Method| {
            tracing::debug!(path = %path.as_str(), method = %method, "incoming request");
            RequestInfo {
                path: path.as_str().to_string(),
                method,
                start: Instant::now(),
            }
        })
        .and(filter)
        .map(|info: RequestInfo, reply: T| {
            let response = reply.into_response();
            log_response(
                response.status(),
                &info.path,
                info.method.as_str(),
                info.start.elapsed().as_millis(),
            );
            response
        })
}

pub fn log_response(status: StatusCode, path: &str, method: &str, duration_ms: u128) {
    if status.is_server_error() {
        tracing::error!(
            status = status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            status = status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "client error"
        );
    } else {
        tracing::info!(
            status = status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "response sent"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::TestLogSubscriber;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    #[tokio::test]
    async fn logs_request_and_status() {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone().into_layer::<Registry>());
        let _guard = tracing::subscriber::set_default(registry);

        let route = warp::path!("test")
            .and(warp::get())
            .map(|| warp::reply::json(&"success"));

        let response = warp::test::request()
            .method("GET")
            .path("/test")
            .reply(&with_request_logging(route))
            .await;

        assert_eq!(response.status(), StatusCode::OK);

        let entries = subscriber.entries();
        assert!(entries
            .iter()
            .any(|e| e.level == Level::DEBUG && e.message.contains("incoming request")));
        let sent = entries
            .iter()
            .find(|e| e.message.contains("response sent"))
            .expect("completion logged");
        assert_eq!(sent.field("status"), Some("200"));
        assert_eq!(sent.field("path"), Some("/test"));
    }

    #[test]
    fn log_level_follows_status_class() {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone().into_layer::<Registry>());

        tracing::subscriber::with_default(registry, || {
            log_response(StatusCode::CREATED, "/api/game", "POST", 3);
            log_response(StatusCode::CONFLICT, "/api/game/x/action", "POST", 1);
            log_response(StatusCode::INTERNAL_SERVER_ERROR, "/api/game/x", "GET", 2);
        });

        let entries = subscriber.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level, Level::INFO);
        assert_eq!(entries[1].level, Level::WARN);
        assert!(entries[1].message.contains("client error"));
        assert_eq!(entries[1].field("status"), Some("409"));
        assert_eq!(entries[2].level, Level::ERROR);
    }
}
