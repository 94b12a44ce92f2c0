//! レコードの型定義
//!
//! カタログの1エントリを表す不変のフィールドマップ。
//! 値は構築時に小文字化され、比較時には正規化しない。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 表示用タイトル
pub const TITLE: &str = "title";
/// ベンダー（カテゴリ値）
pub const VENDOR: &str = "vendor";
/// 製品（カテゴリ値）
pub const PRODUCT: &str = "product";
/// バージョン（カテゴリ値）
pub const VERSION: &str = "version";

/// カタログの1エントリ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// (フィールド名, 値) の組からレコードを構築
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.as_ref().trim().to_lowercase()))
            .collect();
        Self { fields }
    }

    /// フィールド値を取得
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|s| s.as_str())
    }

    /// フィールド値を取得（存在しなければ空文字）
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn title(&self) -> &str {
        self.value(TITLE)
    }

    pub fn vendor(&self) -> &str {
        self.value(VENDOR)
    }

    pub fn product(&self) -> &str {
        self.value(PRODUCT)
    }

    pub fn version(&self) -> &str {
        self.value(VERSION)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// 全フィールドを名前順に取得
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for Record {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<Record> for BTreeMap<String, String> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(k, v)| format!("{} => {}", k, v))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_lowercased_at_construction() {
        let record = Record::from_pairs([
            ("title", "Linux 2.6"),
            ("vendor", "Linux"),
            ("product", " Linux_Kernel "),
        ]);
        assert_eq!(record.title(), "linux 2.6");
        assert_eq!(record.vendor(), "linux");
        assert_eq!(record.product(), "linux_kernel");
    }

    #[test]
    fn test_missing_field_reads_as_empty() {
        let record = Record::from_pairs([("title", "FreeBSD")]);
        assert_eq!(record.get("version"), None);
        assert_eq!(record.version(), "");
        assert!(!record.has_field("version"));
    }

    #[test]
    fn test_deserialize_normalizes() {
        let record: Record =
            serde_json::from_str(r#"{"title":"OpenBSD 4.7","vendor":"OpenBSD"}"#).unwrap();
        assert_eq!(record.vendor(), "openbsd");
        assert_eq!(record.title(), "openbsd 4.7");
    }

    #[test]
    fn test_display_lists_fields() {
        let record = Record::from_pairs([("title", "X"), ("name", "cpe:/o:x:x")]);
        assert_eq!(format!("{}", record), "name => cpe:/o:x:x, title => x");
    }
}
