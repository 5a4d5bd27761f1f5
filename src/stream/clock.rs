use async_trait::async_trait;
use std::time::Duration;

// 待機処理の抽象化 (テストでは実時間を使わずに待機時間を記録する)
#[async_trait]
pub trait Sleeper: Send {
    async fn sleep(&mut self, duration: Duration);
}

#[derive(Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
