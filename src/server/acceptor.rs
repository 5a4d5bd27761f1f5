use crate::config::Configuration;
use crate::error::InitProcessError;
use crate::stream::{ConnectionHandler, TrafficPolicy, WebSocketSink};
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{ConnectInfo, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub async fn bind(config: &Configuration) -> Result<TcpListener, InitProcessError> {
    let addr = config.network.socket_addr();
    TcpListener::bind(addr)
        .await
        .map_err(|source| InitProcessError::BindError {
            addr: addr.to_string(),
            source,
        })
}

pub fn router(config: Arc<Configuration>) -> Router {
    let path = config.network.ws_path.clone();
    Router::new()
        .route(&path, get(upgrade_connection))
        .with_state(config)
}

// 接続の受け付けループ。接続ごとに独立したタスクでハンドラを動かす
pub async fn serve(listener: TcpListener, config: Arc<Configuration>) -> Result<(), InitProcessError> {
    if let Ok(local) = listener.local_addr() {
        info!("WebSocketモックサーバーを起動しました。ポート{}で待ち受けています", local.port());
        info!("クライアントの接続先: ws://127.0.0.1:{}{}", local.port(), config.network.ws_path);
    }

    let app = router(config);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(InitProcessError::ServeError)
}

// Originは検証しない (ローカル開発用)
async fn upgrade_connection(
    State(config): State<Arc<Configuration>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let upgrade = match upgrade {
        Ok(upgrade) => upgrade,
        Err(rejection) => {
            warn!("WebSocketへのアップグレードに失敗しました ({}): {}", peer, rejection);
            return rejection.into_response();
        }
    };

    let policy = TrafficPolicy::new(config.traffic.clone());
    upgrade
        .on_failed_upgrade(move |e| {
            warn!("WebSocketへのアップグレードに失敗しました ({}): {}", peer, e);
        })
        .on_upgrade(move |socket| async move {
            ConnectionHandler::new(peer, WebSocketSink::new(socket), policy)
                .run()
                .await;
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrafficConfig;
    use crate::packet::samples::{SAMPLE_DST_IPS, SAMPLE_PROCESS_NAMES, SAMPLE_SRC_IPS};
    use crate::packet::PacketRecord;
    use futures::StreamExt;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::task::JoinHandle;
    use tokio::time::timeout;
    use tokio_tungstenite::tungstenite::Message;
    use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

    type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

    async fn start_test_server() -> (SocketAddr, JoinHandle<()>) {
        let mut config = Configuration::default();
        config.network.listen_addr = "127.0.0.1".parse().unwrap();
        config.network.listen_port = 0;
        config.traffic = TrafficConfig::for_testing();

        let listener = bind(&config).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            serve(listener, Arc::new(config)).await.unwrap();
        });

        (addr, handle)
    }

    async fn connect(addr: SocketAddr) -> Client {
        let (client, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
        client
    }

    async fn next_record(client: &mut Client) -> PacketRecord {
        loop {
            let message = timeout(Duration::from_secs(6), client.next())
                .await
                .expect("6秒以内にパケットが届きませんでした")
                .expect("ストリームが終了しました")
                .unwrap();
            if let Message::Text(text) = message {
                return PacketRecord::from_json(&text).unwrap();
            }
        }
    }

    #[tokio::test]
    async fn client_receives_valid_records() {
        let (addr, server) = start_test_server().await;
        let mut client = connect(addr).await;

        let mut previous = i64::MIN;
        for _ in 0..30 {
            let record = next_record(&mut client).await;
            assert!((1024..=51023).contains(&record.src_port));
            assert!((1..=1000).contains(&record.dst_port));
            assert!((1000..=30999).contains(&record.pid));
            assert!(SAMPLE_SRC_IPS.contains(&record.src_ip.as_str()));
            assert!(SAMPLE_DST_IPS.contains(&record.dst_ip.as_str()));
            assert!(SAMPLE_PROCESS_NAMES.contains(&record.pname.as_str()));
            assert!(record.timestamp >= previous);
            previous = record.timestamp;
        }

        server.abort();
    }

    #[tokio::test]
    async fn fixed_window_delivers_valid_records_within_count_bound() {
        let (addr, server) = start_test_server().await;
        let mut client = connect(addr).await;

        let window = Duration::from_millis(500);
        let deadline = tokio::time::Instant::now() + window;
        let mut records = Vec::new();
        while let Ok(Some(message)) = tokio::time::timeout_at(deadline, client.next()).await {
            if let Message::Text(text) = message.unwrap() {
                records.push(PacketRecord::from_json(&text).unwrap());
            }
        }

        for record in &records {
            assert!((1024..=51023).contains(&record.src_port));
            assert!((1..=1000).contains(&record.dst_port));
            assert!((1000..=30999).contains(&record.pid));
            assert!(SAMPLE_SRC_IPS.contains(&record.src_ip.as_str()));
            assert!(SAMPLE_DST_IPS.contains(&record.dst_ip.as_str()));
            assert!(SAMPLE_PROCESS_NAMES.contains(&record.pname.as_str()));
        }

        // 1バースト分 + 最短間隔で送り続けた場合の件数が上限
        let traffic = TrafficConfig::for_testing();
        let upper = traffic.burst_size.end as usize
            + (window.as_millis() as u64 / traffic.burst_interval_ms.start) as usize;
        assert!(!records.is_empty());
        assert!(records.len() <= upper, "受信件数が多すぎます: {} > {}", records.len(), upper);

        server.abort();
    }

    #[tokio::test]
    async fn non_upgrade_request_is_rejected_and_server_keeps_serving() {
        let (addr, server) = start_test_server().await;

        let mut raw = TcpStream::connect(addr).await.unwrap();
        raw.write_all(b"GET /ws HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = Vec::new();
        timeout(Duration::from_secs(5), raw.read_to_end(&mut response))
            .await
            .unwrap()
            .unwrap();
        let response = String::from_utf8_lossy(&response);
        assert!(response.starts_with("HTTP/1.1 4"), "想定外のレスポンス: {}", response);

        let mut client = connect(addr).await;
        next_record(&mut client).await;

        server.abort();
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let (addr, server) = start_test_server().await;

        let mut raw = TcpStream::connect(addr).await.unwrap();
        raw.write_all(b"GET /other HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = Vec::new();
        timeout(Duration::from_secs(5), raw.read_to_end(&mut response))
            .await
            .unwrap()
            .unwrap();
        assert!(String::from_utf8_lossy(&response).starts_with("HTTP/1.1 404"));

        server.abort();
    }

    #[tokio::test]
    async fn disconnecting_one_client_does_not_affect_another() {
        let (addr, server) = start_test_server().await;
        let mut first = connect(addr).await;
        let mut second = connect(addr).await;

        // バーストは3件以上なので、1件受信した直後はバーストの途中
        next_record(&mut first).await;
        next_record(&mut second).await;
        drop(first);

        for _ in 0..20 {
            next_record(&mut second).await;
        }

        server.abort();
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let (addr, server) = start_test_server().await;

        let mut config = Configuration::default();
        config.network.listen_addr = addr.ip();
        config.network.listen_port = addr.port();
        let result = bind(&config).await;
        assert!(matches!(result, Err(InitProcessError::BindError { .. })));

        server.abort();
    }
}
