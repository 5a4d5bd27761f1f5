use log::{error, info};
use std::sync::Arc;
use tokio::task;

mod config;
mod error;
mod packet;
mod server;
mod setup_logger;
mod stream;

use crate::config::Configuration;
use crate::error::InitProcessError;
use crate::setup_logger::setup_logger;

#[tokio::main]
async fn main() -> Result<(), InitProcessError> {
    let config = Configuration::from_env()?;
    setup_logger(config.level_filter()?)?;

    let shutdown = server::ShutdownSignal::register()?;

    // リスナーのバインド (失敗した場合は異常終了)
    let listener = server::bind(&config).await.map_err(|e| {
        error!("{}", e);
        e
    })?;

    // 受け付けループは別タスクで動かし、メインはシグナルを待つ
    let config = Arc::new(config);
    task::spawn(async move {
        if let Err(e) = server::serve(listener, config).await {
            error!("{}", e);
        }
    });

    shutdown.wait().await;
    info!("シャットダウンシグナルを受信しました。サーバーを終了します...");

    // 接続中のハンドラは待たずに終了する
    Ok(())
}
