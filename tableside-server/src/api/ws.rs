//! Kitchen WebSocket endpoint - 实时新订单推送
//!
//! GET /api/kitchen/ws
//!
//! 协议: Server → Kitchen: `{"event":"newOrder","order":{...}}`，无 ack、
//! 无重放、无重试。推送只是 "提前刷新" 的提示；看板的定时轮询
//! (`/api/kitchen/allOrders`) 才是权威状态，丢失或重复的推送最多造成
//! 一个轮询周期内的延迟。

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tokio::time::Duration;

use crate::core::ServerState;

const PING_INTERVAL: Duration = Duration::from_secs(30);

/// GET /api/kitchen/ws
pub async fn kitchen_ws(
    State(state): State<ServerState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| kitchen_ws_session(socket, state))
}

async fn kitchen_ws_session(socket: WebSocket, state: ServerState) {
    let (mut sink, mut stream) = socket.split();
    let mut events = state.notifier.subscribe();

    tracing::info!("Kitchen WS connected");

    let mut ping_interval = tokio::time::interval(PING_INTERVAL);
    ping_interval.tick().await; // skip immediate

    loop {
        tokio::select! {
            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(vec![].into())).await.is_err() {
                    break;
                }
            }

            event = events.recv() => {
                match event {
                    Ok(event) => {
                        let Ok(text) = serde_json::to_string(&event) else {
                            continue;
                        };
                        if sink.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    // Lagged subscribers just miss events; the poll
                    // covers them within one interval.
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::debug!(skipped = n, "kitchen WS lagged, events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // 订阅方无上行协议，其余消息忽略
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::info!("Kitchen WS disconnected");
}
