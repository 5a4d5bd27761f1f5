use crate::error::StreamError;
use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::SinkExt;

// パケットの送信先 (WebSocketまたはテスト用のシンク)
#[async_trait]
pub trait PacketSink: Send {
    async fn send_text(&mut self, text: String) -> Result<(), StreamError>;

    async fn close(&mut self);
}

pub struct WebSocketSink {
    socket: WebSocket,
}

impl WebSocketSink {
    pub fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

#[async_trait]
impl PacketSink for WebSocketSink {
    async fn send_text(&mut self, text: String) -> Result<(), StreamError> {
        self.socket
            .send(Message::Text(text))
            .await
            .map_err(|e| StreamError::Send(e.to_string()))
    }

    async fn close(&mut self) {
        // 既に切断済みの場合のエラーは無視する
        let _ = <WebSocket as SinkExt<Message>>::close(&mut self.socket).await;
    }
}
