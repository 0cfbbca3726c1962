//! Request Extractors
//!
//! 请求参数解析 + 校验；任何失败都转换成参数校验错误，不进入业务层

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Path, Query, Request},
    http::{request::Parts, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use super::error::ApiError;
use super::state::AppState;

/// 请求 DTO 的字段校验，返回第一个不通过字段的提示
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// 校验字符串字段非空白
pub fn require_not_blank(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

// ============================================================================
// ValidJson
// ============================================================================

/// JSON 请求体
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        value.validate().map_err(ApiError::Validation)?;

        Ok(Self(value))
    }
}

// ============================================================================
// ValidQuery
// ============================================================================

/// URL 查询参数
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        value.validate().map_err(ApiError::Validation)?;

        Ok(Self(value))
    }
}

// ============================================================================
// ValidPath
// ============================================================================

/// 路径参数，类型不匹配时返回校验错误而不是 axum 默认的 400 状态码
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        Ok(Self(value))
    }
}

// ============================================================================
// ClientAddr
// ============================================================================

/// 请求来源地址
///
/// 信任代理头时依次取 `X-Forwarded-For` 第一跳、`X-Real-IP`；
/// 否则只取 TCP 对端地址。都没有时为 `unknown`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(pub String);

impl ClientAddr {
    fn resolve(parts: &Parts, trust_proxy_headers: bool) -> String {
        let proxied = if trust_proxy_headers {
            Self::from_headers(&parts.headers)
        } else {
            None
        };

        proxied
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn from_headers(headers: &HeaderMap) -> Option<String> {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        let real_ip = || {
            headers
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        forwarded.or_else(real_ip).map(str::to_string)
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for ClientAddr {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(Self::resolve(parts, state.trust_proxy_headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request as HttpRequest};

    fn client_addr(request: HttpRequest<()>, trust_proxy_headers: bool) -> String {
        let (parts, _) = request.into_parts();
        ClientAddr::resolve(&parts, trust_proxy_headers)
    }

    fn with_peer(mut request: HttpRequest<()>) -> HttpRequest<()> {
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 9], 40000))));
        request
    }

    #[test]
    fn test_forwarded_for_first_hop_wins_behind_proxy() {
        let request = HttpRequest::builder()
            .header("x-forwarded-for", " 10.0.0.1 , 172.16.0.1")
            .header("x-real-ip", "10.0.0.2")
            .body(())
            .unwrap();

        assert_eq!(client_addr(with_peer(request), true), "10.0.0.1");
    }

    #[test]
    fn test_proxy_headers_ignored_by_default() {
        let request = HttpRequest::builder()
            .header("x-forwarded-for", "10.0.0.1")
            .header("x-real-ip", "10.0.0.2")
            .body(())
            .unwrap();
        assert_eq!(client_addr(with_peer(request), false), "192.168.1.9");

        let request = HttpRequest::builder()
            .header("x-forwarded-for", "10.0.0.1")
            .body(())
            .unwrap();
        assert_eq!(client_addr(request, false), "unknown");
    }

    #[test]
    fn test_real_ip_then_peer_then_unknown() {
        let request = HttpRequest::builder()
            .header("x-real-ip", "10.0.0.2")
            .body(())
            .unwrap();
        assert_eq!(client_addr(request, true), "10.0.0.2");

        let request = HttpRequest::builder().body(()).unwrap();
        assert_eq!(client_addr(with_peer(request), true), "192.168.1.9");

        let request = HttpRequest::builder().body(()).unwrap();
        assert_eq!(client_addr(request, true), "unknown");
    }

    #[test]
    fn test_blank_forwarded_for_is_ignored() {
        let mut request = HttpRequest::builder().body(()).unwrap();
        request
            .headers_mut()
            .insert("x-forwarded-for", HeaderValue::from_static(" "));
        request
            .headers_mut()
            .insert("x-real-ip", HeaderValue::from_static("10.0.0.3"));

        assert_eq!(client_addr(request, true), "10.0.0.3");
    }

    #[test]
    fn test_require_not_blank() {
        assert!(require_not_blank(" ", "【名称】不能为空").is_err());
        assert!(require_not_blank("Go", "【名称】不能为空").is_ok());
    }
}
