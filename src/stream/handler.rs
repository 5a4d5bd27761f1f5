use crate::error::StreamError;
use crate::packet::generate_packet;
use crate::stream::clock::{Sleeper, TokioSleeper};
use crate::stream::phase::{Phase, TrafficPolicy};
use crate::stream::sink::PacketSink;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::net::SocketAddr;
use std::time::Instant;

/// 1つのクライアント接続を担当し、送信に失敗するまでバースト/平静サイクルを回し続ける。
///
/// 乱数源と待機処理は接続ごとに独立しており、他の接続と状態を共有しない。
pub struct ConnectionHandler<S: PacketSink, T: Sleeper = TokioSleeper> {
    peer: SocketAddr,
    sink: S,
    sleeper: T,
    rng: StdRng,
    policy: TrafficPolicy,
    last_timestamp: i64,
    sent: u64,
}

impl<S: PacketSink> ConnectionHandler<S, TokioSleeper> {
    pub fn new(peer: SocketAddr, sink: S, policy: TrafficPolicy) -> Self {
        Self::with_parts(peer, sink, TokioSleeper, StdRng::from_entropy(), policy)
    }
}

impl<S: PacketSink, T: Sleeper> ConnectionHandler<S, T> {
    pub fn with_parts(peer: SocketAddr, sink: S, sleeper: T, rng: StdRng, policy: TrafficPolicy) -> Self {
        Self {
            peer,
            sink,
            sleeper,
            rng,
            policy,
            last_timestamp: i64::MIN,
            sent: 0,
        }
    }

    pub async fn run(mut self) {
        info!("クライアント {} が接続しました", self.peer);
        let started = Instant::now();

        let result = self.stream().await;

        // どの経路で終了しても接続は必ず閉じる
        self.sink.close().await;

        if let Err(e) = result {
            debug!("[{}] 送信ループを終了します: {}", self.peer, e);
        }
        info!(
            "クライアント {} が切断しました (送信: {}件, 接続時間: {:.2}秒)",
            self.peer,
            self.sent,
            started.elapsed().as_secs_f64()
        );
    }

    async fn stream(&mut self) -> Result<(), StreamError> {
        let mut phase = Phase::initial();

        loop {
            match phase {
                Phase::Burst => {
                    let count = self.policy.burst_count(&mut self.rng);
                    info!("[{}] バーストモードに入ります。{}個のパケットを送信します...", self.peer, count);

                    for _ in 0..count {
                        self.send_packet().await?;
                        let interval = self.policy.burst_interval(&mut self.rng);
                        self.sleeper.sleep(interval).await;
                    }
                }
                Phase::Lull => {
                    let duration = self.policy.lull_duration(&mut self.rng);
                    info!("[{}] 平静モードに入ります。{:.2}秒待機します...", self.peer, duration.as_secs_f64());
                    self.sleeper.sleep(duration).await;
                }
            }
            phase = phase.next();
        }
    }

    async fn send_packet(&mut self) -> Result<(), StreamError> {
        let mut packet = generate_packet(&mut self.rng);

        // 壁時計が巻き戻っても接続内では単調非減少にする
        packet.timestamp = packet.timestamp.max(self.last_timestamp);
        self.last_timestamp = packet.timestamp;

        let json = packet.to_json()?;
        self.sink.send_text(json).await?;
        self.sent += 1;
        Ok(())
    }
}
