//! HTTP Middleware
//!
//! 协议层错误日志：路由不存在、方法不匹配、框架级异常等
//! 业务错误（code != 0）的 HTTP 状态码仍是 200，由 ApiError::into_response() 记录

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 记录 4xx / 5xx 响应及耗时
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    async fn teapot() -> StatusCode {
        StatusCode::IM_A_TEAPOT
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/ok", get(|| async { "OK" }))
            .route("/teapot", get(teapot))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        create_test_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_status_passes_through() {
        assert_eq!(status_of("/ok").await, StatusCode::OK);
        assert_eq!(status_of("/teapot").await, StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn test_unknown_route_is_logged_not_rewritten() {
        assert_eq!(status_of("/missing").await, StatusCode::NOT_FOUND);
    }
}
