use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpeLabError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("不明なデータベース: {0} (nmap-os / cpe / all)")]
    UnknownDatabase(String),

    #[error("{path}:{line}: パースエラー: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] cpelab_common::Error),
}

pub type Result<T> = std::result::Result<T, CpeLabError>;
