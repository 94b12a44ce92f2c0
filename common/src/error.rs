//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// スキーマに存在しないフィールドを参照した
    #[error("unknown field '{field}' in catalog {catalog}")]
    UnknownField { catalog: String, field: String },

    /// スキーマで宣言されたフィールドがレコードに存在しない
    #[error("record #{index} in catalog {catalog} is missing field '{field}'")]
    MissingField {
        catalog: String,
        index: usize,
        field: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
