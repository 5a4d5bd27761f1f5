use crate::error::InitProcessError;
use log::info;

// SIGINT / SIGTERM の受信を待つ。登録はバインド前に行い、待ち受け開始後のシグナルを取りこぼさない
#[cfg(unix)]
pub struct ShutdownSignal {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignal {
    pub fn register() -> Result<Self, InitProcessError> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt()).map_err(InitProcessError::SignalError)?,
            terminate: signal(SignalKind::terminate()).map_err(InitProcessError::SignalError)?,
        })
    }

    pub async fn wait(mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => info!("SIGINTを受信しました"),
            _ = self.terminate.recv() => info!("SIGTERMを受信しました"),
        }
    }
}

#[cfg(not(unix))]
pub struct ShutdownSignal;

#[cfg(not(unix))]
impl ShutdownSignal {
    pub fn register() -> Result<Self, InitProcessError> {
        Ok(Self)
    }

    pub async fn wait(self) {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+Cを受信しました");
        }
    }
}
