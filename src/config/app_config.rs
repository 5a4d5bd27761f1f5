use crate::error::InitProcessError;
use log::LevelFilter;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::ops::Range;

pub const DEFAULT_LISTEN_PORT: u16 = 18088;
pub const DEFAULT_WS_PATH: &str = "/ws";

#[derive(Debug, Clone)]
pub struct Configuration {
    pub network: NetworkConfig,
    pub traffic: TrafficConfig,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub listen_addr: IpAddr,
    pub listen_port: u16,
    pub ws_path: String,
}

/// バースト/平静サイクルの乱数範囲。すべて半開区間 `[start, end)`。
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficConfig {
    pub burst_size: Range<u32>,
    pub burst_interval_ms: Range<u64>,
    pub lull_ms: Range<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            listen_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            listen_port: DEFAULT_LISTEN_PORT,
            ws_path: DEFAULT_WS_PATH.to_string(),
        }
    }
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            burst_size: 10..50,
            burst_interval_ms: 10..50,
            lull_ms: 1000..5000,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            traffic: TrafficConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl NetworkConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_addr, self.listen_port)
    }
}

impl TrafficConfig {
    pub fn validate(&self) -> Result<(), InitProcessError> {
        if self.burst_size.is_empty() || self.burst_size.start == 0 {
            return Err(InitProcessError::Config(format!("無効なバーストサイズ範囲: {:?}", self.burst_size)));
        }
        if self.burst_interval_ms.is_empty() {
            return Err(InitProcessError::Config(format!("無効なバースト間隔範囲: {:?}", self.burst_interval_ms)));
        }
        if self.lull_ms.is_empty() {
            return Err(InitProcessError::Config(format!("無効な平静期間範囲: {:?}", self.lull_ms)));
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            burst_size: 3..6,
            burst_interval_ms: 1..3,
            lull_ms: 20..40,
        }
    }
}

impl Configuration {
    pub fn from_env() -> Result<Self, InitProcessError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, InitProcessError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = NetworkConfig::default();

        let listen_addr = match lookup("MOCK_LISTEN_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|e| InitProcessError::Config(format!("無効なリスニングアドレス: {}", e)))?,
            None => defaults.listen_addr,
        };
        let listen_port = match lookup("MOCK_LISTEN_PORT") {
            Some(value) => value
                .parse()
                .map_err(|e| InitProcessError::Config(format!("無効なポート番号: {}", e)))?,
            None => defaults.listen_port,
        };
        let ws_path = lookup("MOCK_WS_PATH").unwrap_or(defaults.ws_path);
        if !ws_path.starts_with('/') {
            return Err(InitProcessError::Config(format!("パスは'/'で始まる必要があります: {}", ws_path)));
        }

        let configuration = Configuration {
            network: NetworkConfig {
                listen_addr,
                listen_port,
                ws_path,
            },
            traffic: TrafficConfig::default(),
            log_level: lookup("MOCK_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };
        configuration.traffic.validate()?;
        configuration.level_filter()?;

        Ok(configuration)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, InitProcessError> {
        self.log_level
            .parse()
            .map_err(|_| InitProcessError::Config(format!("無効なログレベル: {}", self.log_level)))
    }
}
