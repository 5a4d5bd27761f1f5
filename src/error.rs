use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitProcessError {
    #[error("ロガーのセットアップに失敗しました: {0}")]
    LoggerError(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("リスナーのバインドに失敗しました ({addr}): {source}")]
    BindError {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("シグナルハンドラの登録に失敗しました: {0}")]
    SignalError(#[source] std::io::Error),

    #[error("サーバーの実行に失敗しました: {0}")]
    ServeError(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("パケットのシリアライズに失敗しました: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("パケットの送信に失敗しました: {0}")]
    Send(String),
}

#[cfg(test)]
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("JSONの解析に失敗しました: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ペイロード長が一致しません: length={declared}, 実際={actual}")]
    LengthMismatch { declared: u32, actual: usize },
}
