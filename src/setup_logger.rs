use crate::error::InitProcessError;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::io::Write;

pub fn setup_logger(level: LevelFilter) -> Result<(), InitProcessError> {
    // ビルダーでロガーをカスタマイズ
    Builder::new()
        // ログレベルの設定 (RUST_LOGがあれば上書き)
        .filter_level(level)
        .parse_default_env()
        // タイムスタンプ付きのフォーマット
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),  // モジュールパスが表示される
                record.args()
            )
        })
        // 標準出力に出力
        .target(Target::Stdout)
        .try_init()
        .map_err(|e| InitProcessError::LoggerError(e.to_string()))?;

    Ok(())
}
