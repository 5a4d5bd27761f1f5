use crate::config::TrafficConfig;
use rand::Rng;
use std::time::Duration;

/// 接続ごとの送信サイクルの状態。バーストで開始し、バーストと平静を交互に繰り返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Burst,
    Lull,
}

impl Phase {
    pub fn initial() -> Self {
        Phase::Burst
    }

    pub fn next(self) -> Self {
        match self {
            Phase::Burst => Phase::Lull,
            Phase::Lull => Phase::Burst,
        }
    }
}

// 各フェーズの乱数タイミングを決める
#[derive(Debug, Clone)]
pub struct TrafficPolicy {
    config: TrafficConfig,
}

impl TrafficPolicy {
    pub fn new(config: TrafficConfig) -> Self {
        Self { config }
    }

    pub fn burst_count<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.config.burst_size.clone())
    }

    pub fn burst_interval<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(rng.gen_range(self.config.burst_interval_ms.clone()))
    }

    pub fn lull_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(rng.gen_range(self.config.lull_ms.clone()))
    }
}
