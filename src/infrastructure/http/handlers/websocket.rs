//! WebSocket Handler
//!
//! 把发布到主题的消息推送给客户端，`?topic=` 为空时推送所有主题

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::infrastructure::events::TopicMessage;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub topic: Option<String>,
}

/// 事件 WebSocket 连接处理
pub async fn events_websocket_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<EventsQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let event_rx = match query.topic.as_deref() {
        Some(topic) if !topic.is_empty() => state.event_publisher.subscribe(topic),
        _ => state.event_publisher.subscribe_global(),
    };

    ws.on_upgrade(move |socket| handle_events_socket(socket, event_rx, query.topic, state))
}

async fn handle_events_socket(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<TopicMessage>,
    topic: Option<String>,
    state: Arc<AppState>,
) {
    let (mut sender, mut receiver) = socket.split();

    tracing::info!(topic = ?topic, "Events WebSocket connected");

    // 事件转发任务
    let forward_task = tokio::spawn(async move {
        loop {
            let event = match event_rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "Events WebSocket lagged, messages dropped");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let msg = match serde_json::to_string(&event) {
                Ok(json) => Message::Text(json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize event");
                    continue;
                }
            };

            if let Err(e) = sender.send(msg).await {
                tracing::debug!(error = %e, "Failed to send WebSocket message");
                break;
            }
        }
    });

    // 接收客户端消息（心跳）
    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!("Events WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Events WebSocket error");
                    break;
                }
                // Ping 由 axum 自动回复 Pong
                _ => {}
            }
        }
    });

    join_first(forward_task, receive_task).await;

    // 清理已无订阅者的主题通道
    state.event_publisher.prune_topics();
    tracing::info!(topic = ?topic, "Events WebSocket disconnected");
}

/// 任一任务结束后停止另一个，并等它退出，保证订阅已释放
async fn join_first(mut first: JoinHandle<()>, mut second: JoinHandle<()>) {
    tokio::select! {
        _ = &mut first => {
            second.abort();
            let _ = second.await;
        }
        _ = &mut second => {
            first.abort();
            let _ = first.await;
        }
    }
}
