//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                     GET     健康检查
//! - /ebook/list                   GET     分页查询电子书
//! - /ebook/save                   POST    保存电子书
//! - /ebook/delete/:id             DELETE  删除电子书
//! - /doc/query/:ebook_id          GET     获取一本书的全部文档
//! - /doc/query                    GET     分页查询文档
//! - /doc/save                     POST    保存文档及内容
//! - /doc/delete                   DELETE  批量删除文档
//! - /doc/read-content/:doc_id     GET     读取内容（阅读数 + 1）
//! - /doc/vote/:doc_id             GET     点赞
//! - /doc/refresh-counters         POST    立即刷新电子书统计
//! - /user/list                    GET     分页查询用户
//! - /user/save                    POST    保存用户
//! - /user/delete/:id              DELETE  删除用户
//! - /user/reset-password          POST    重置密码
//! - /user/login                   POST    登录校验
//! - /ws/events                    WS      主题消息推送

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        .nest("/ebook", ebook_routes())
        .nest("/doc", doc_routes())
        .nest("/user", user_routes())
        .route("/ws/events", get(handlers::events_websocket_handler))
}

/// Ebook 路由
fn ebook_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_ebooks))
        .route("/save", post(handlers::save_ebook))
        .route("/delete/:id", delete(handlers::delete_ebook))
}

/// Doc 路由
fn doc_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/query", get(handlers::list_docs))
        .route("/query/:ebook_id", get(handlers::list_docs_by_ebook))
        .route("/save", post(handlers::save_doc))
        .route("/delete", delete(handlers::delete_docs))
        .route("/read-content/:doc_id", get(handlers::read_doc_content))
        .route("/vote/:doc_id", get(handlers::vote_doc))
        .route("/refresh-counters", post(handlers::refresh_counters))
}

/// User 路由
fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_users))
        .route("/save", post(handlers::save_user))
        .route("/delete/:id", delete(handlers::delete_user))
        .route("/reset-password", post(handlers::reset_password))
        .route("/login", post(handlers::login))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::state::{test_app_state, test_state};
    use axum::{
        body::{to_bytes, Body},
        extract::ConnectInfo,
        http::{Method, Request, StatusCode},
    };
    use std::net::SocketAddr;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    struct TestApp {
        router: Router,
    }

    impl TestApp {
        async fn new() -> Self {
            Self {
                router: create_routes().with_state(test_state().await),
            }
        }

        async fn behind_proxy() -> Self {
            let state = test_app_state().await.with_trust_proxy_headers(true);
            Self {
                router: create_routes().with_state(Arc::new(state)),
            }
        }

        async fn send(&self, request: Request<Body>) -> Value {
            let response = self.router.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            serde_json::from_slice(&bytes).unwrap()
        }

        async fn get(&self, uri: &str) -> Value {
            self.send(Request::get(uri).body(Body::empty()).unwrap())
                .await
        }

        async fn json(&self, method: Method, uri: &str, body: Value) -> Value {
            self.send(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
        }

        /// 从 `peer` 发起点赞，`forwarded_for` 模拟代理头
        async fn vote_from(
            &self,
            doc_id: i64,
            peer: [u8; 4],
            forwarded_for: Option<&str>,
        ) -> Value {
            let mut builder = Request::get(format!("/doc/vote/{}", doc_id));
            if let Some(forwarded_for) = forwarded_for {
                builder = builder.header("x-forwarded-for", forwarded_for);
            }
            let mut request = builder.body(Body::empty()).unwrap();
            request
                .extensions_mut()
                .insert(ConnectInfo(SocketAddr::from((peer, 50000))));
            self.send(request).await
        }

        async fn vote(&self, doc_id: i64, peer: [u8; 4]) -> Value {
            self.vote_from(doc_id, peer, None).await
        }

        async fn create_doc(&self) -> (i64, i64) {
            let ebook = self
                .json(Method::POST, "/ebook/save", json!({"name": "Rust"}))
                .await;
            let ebook_id = ebook["data"]["id"].as_i64().unwrap();
            let doc = self
                .json(
                    Method::POST,
                    "/doc/save",
                    json!({"ebookId": ebook_id, "parent": 0, "name": "intro", "sort": 1, "content": "<p>hi</p>"}),
                )
                .await;
            (ebook_id, doc["data"]["id"].as_i64().unwrap())
        }
    }

    #[tokio::test]
    async fn test_ping() {
        let app = TestApp::new().await;
        let body = app.get("/api/ping").await;

        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_ebook_create_update_list() {
        let app = TestApp::new().await;

        let created = app
            .json(Method::POST, "/ebook/save", json!({"name": "Go", "category2Id": 7}))
            .await;
        assert_eq!(created["code"], 0);
        let id = created["data"]["id"].as_i64().unwrap();
        assert!(id > 0);
        assert_eq!(created["data"]["viewCount"], 0);
        assert_eq!(created["data"]["voteCount"], 0);

        let updated = app
            .json(
                Method::POST,
                "/ebook/save",
                json!({"id": id, "name": "Go 进阶", "category2Id": 7}),
            )
            .await;
        assert_eq!(updated["data"]["id"], id);

        let list = app
            .get("/ebook/list?pageNum=1&pageSize=10&categoryId2=7")
            .await;
        assert_eq!(list["data"]["total"], 1);
        assert_eq!(list["data"]["list"][0]["name"], "Go 进阶");
        assert_eq!(list["data"]["list"][0]["id"], id);
    }

    #[tokio::test]
    async fn test_update_missing_ebook_is_business_error() {
        let app = TestApp::new().await;

        let body = app
            .json(Method::POST, "/ebook/save", json!({"id": 404, "name": "Go"}))
            .await;
        assert_eq!(body["code"], 409);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_validation_errors_use_code_400() {
        let app = TestApp::new().await;

        let blank_name = app
            .json(Method::POST, "/ebook/save", json!({"name": "  "}))
            .await;
        assert_eq!(blank_name["code"], 400);
        assert_eq!(blank_name["message"], "【名称】不能为空");

        let bad_page = app.get("/ebook/list?pageNum=1&pageSize=1001").await;
        assert_eq!(bad_page["code"], 400);

        let missing_page = app.get("/doc/query").await;
        assert_eq!(missing_page["code"], 400);

        let bad_path = app.get("/doc/read-content/abc").await;
        assert_eq!(bad_path["code"], 400);

        let malformed = app
            .send(
                Request::post("/user/login")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await;
        assert_eq!(malformed["code"], 400);
    }

    #[tokio::test]
    async fn test_doc_flow_with_vote_dedup() {
        let app = TestApp::new().await;

        let (ebook_id, doc_id) = app.create_doc().await;

        let content = app.get(&format!("/doc/read-content/{}", doc_id)).await;
        assert_eq!(content["data"], "<p>hi</p>");

        let first = app.vote(doc_id, [10, 0, 0, 1]).await;
        assert_eq!(first["code"], 0);
        let repeated = app.vote(doc_id, [10, 0, 0, 1]).await;
        assert_eq!(repeated["code"], 409);
        assert_eq!(repeated["message"], "您已点赞过");
        let other = app.vote(doc_id, [10, 0, 0, 2]).await;
        assert_eq!(other["code"], 0);

        let docs = app.get(&format!("/doc/query/{}", ebook_id)).await;
        assert_eq!(docs["data"][0]["voteCount"], 2);
        assert_eq!(docs["data"][0]["viewCount"], 1);

        let refreshed = app
            .send(Request::post("/doc/refresh-counters").body(Body::empty()).unwrap())
            .await;
        assert_eq!(refreshed["data"]["ebooks"], 1);

        let list = app.get("/ebook/list?pageNum=1&pageSize=10").await;
        assert_eq!(list["data"]["list"][0]["docCount"], 1);
        assert_eq!(list["data"]["list"][0]["voteCount"], 2);

        let deleted = app
            .json(Method::DELETE, "/doc/delete", json!({"ids": [doc_id]}))
            .await;
        assert_eq!(deleted["data"]["deleted"], 1);

        let empty = app
            .json(Method::DELETE, "/doc/delete", json!({"ids": []}))
            .await;
        assert_eq!(empty["code"], 400);
    }

    #[tokio::test]
    async fn test_read_content_of_missing_doc_is_empty_string() {
        let app = TestApp::new().await;

        let body = app.get("/doc/read-content/123").await;
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"], "");
    }

    #[tokio::test]
    async fn test_user_flow() {
        let app = TestApp::new().await;

        let created = app
            .json(
                Method::POST,
                "/user/save",
                json!({"loginName": "sam", "name": "Sam", "password": "abc123"}),
            )
            .await;
        assert_eq!(created["code"], 0);
        assert!(created["data"].get("password").is_none());
        let id = created["data"]["id"].as_i64().unwrap();

        let duplicate = app
            .json(
                Method::POST,
                "/user/save",
                json!({"loginName": "sam", "name": "Other", "password": "abc123"}),
            )
            .await;
        assert_eq!(duplicate["code"], 409);
        assert_eq!(duplicate["message"], "登录名已存在");

        let weak = app
            .json(
                Method::POST,
                "/user/reset-password",
                json!({"id": id, "password": "123456"}),
            )
            .await;
        assert_eq!(weak["code"], 400);

        let reset = app
            .json(
                Method::POST,
                "/user/reset-password",
                json!({"id": id, "password": "new456pwd"}),
            )
            .await;
        assert_eq!(reset["code"], 0);

        let old = app
            .json(
                Method::POST,
                "/user/login",
                json!({"loginName": "sam", "password": "abc123"}),
            )
            .await;
        let unknown = app
            .json(
                Method::POST,
                "/user/login",
                json!({"loginName": "nobody", "password": "abc123"}),
            )
            .await;
        assert_eq!(old["code"], 409);
        assert_eq!(old["message"], unknown["message"]);

        let login = app
            .json(
                Method::POST,
                "/user/login",
                json!({"loginName": "sam", "password": "new456pwd"}),
            )
            .await;
        assert_eq!(login["code"], 0);
        assert_eq!(login["data"]["loginName"], "sam");

        let list = app.get("/user/list?pageNum=1&pageSize=10&loginName=sam").await;
        assert_eq!(list["data"]["total"], 1);

        let deleted = app
            .send(
                Request::delete(format!("/user/delete/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(deleted["code"], 0);

        let list = app.get("/user/list?pageNum=1&pageSize=10").await;
        assert_eq!(list["data"]["total"], 0);
    }

    #[tokio::test]
    async fn test_forged_forwarded_for_does_not_bypass_vote_dedup() {
        let app = TestApp::new().await;
        let (ebook_id, doc_id) = app.create_doc().await;

        let mut accepted = 0;
        for i in 0..5 {
            let forged = format!("1.1.1.{}", i);
            let body = app
                .vote_from(doc_id, [203, 0, 113, 7], Some(&forged))
                .await;
            if body["code"] == 0 {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);

        let docs = app.get(&format!("/doc/query/{}", ebook_id)).await;
        assert_eq!(docs["data"][0]["voteCount"], 1);
    }

    #[tokio::test]
    async fn test_forwarded_for_used_behind_trusted_proxy() {
        let app = TestApp::behind_proxy().await;
        let (ebook_id, doc_id) = app.create_doc().await;

        let first = app
            .vote_from(doc_id, [10, 1, 1, 1], Some("198.51.100.1"))
            .await;
        let second = app
            .vote_from(doc_id, [10, 1, 1, 1], Some("198.51.100.2"))
            .await;
        let repeated = app
            .vote_from(doc_id, [10, 1, 1, 2], Some("198.51.100.1"))
            .await;

        assert_eq!(first["code"], 0);
        assert_eq!(second["code"], 0);
        assert_eq!(repeated["code"], 409);

        let docs = app.get(&format!("/doc/query/{}", ebook_id)).await;
        assert_eq!(docs["data"][0]["voteCount"], 2);
    }
}
