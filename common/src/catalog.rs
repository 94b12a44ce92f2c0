//! カタログ（レコード集合）と問い合わせ
//!
//! 照合ポリシーを持たない純粋なインメモリ述語評価器。
//! - `exact`: 全フィールド一致（AND）
//! - `search_all`: 検索対象フィールドのいずれかに部分一致

use crate::error::{Error, Result};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// カタログのスキーマ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// 全レコードが持つフィールド
    pub fields: Vec<String>,
    /// `search_all` の対象フィールド
    pub searchable: Vec<String>,
}

impl Schema {
    pub fn new(fields: &[&str], searchable: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|s| s.to_string()).collect(),
            searchable: searchable.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

/// 完全一致検索の条件（フィールド = 値 のAND）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    terms: Vec<(String, String)>,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// 条件を追加（値は小文字化して保持）
    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.terms.retain(|(f, _)| f != field);
        self.terms.push((field.to_string(), value.to_lowercase()));
        self
    }

    /// 条件からフィールドを外す
    pub fn without(mut self, field: &str) -> Self {
        self.terms.retain(|(f, _)| f != field);
        self
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(f, _)| f.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn matches(&self, record: &Record) -> bool {
        self.terms.iter().all(|(f, v)| record.value(f) == v)
    }
}

/// `search_all` のヒット
///
/// 1レコードが複数フィールドで一致した場合はフィールドごとに1件ずつ返す。
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    /// カタログ内の位置
    pub index: usize,
    /// 一致したフィールド
    pub field: &'a str,
    pub record: &'a Record,
}

/// カタログの問い合わせインターフェース
pub trait Catalog {
    /// カタログ名（表示用）
    fn name(&self) -> &str;

    fn schema(&self) -> &Schema;

    /// 全条件に一致するレコードを返す。0件は正常。
    fn exact(&self, spec: &QuerySpec) -> Result<Vec<&Record>>;

    /// 検索対象フィールドのいずれかに `pattern` を含むレコードを返す。
    fn search_all(&self, pattern: &str) -> Result<Vec<SearchHit<'_>>>;

    /// レコード数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// フィールドの値の一覧（重複なし・ソート済み）
    fn distinct(&self, field: &str) -> Result<BTreeSet<&str>>;

    fn check_field(&self, field: &str) -> Result<()> {
        if self.schema().contains(field) {
            Ok(())
        } else {
            Err(Error::UnknownField {
                catalog: self.name().to_string(),
                field: field.to_string(),
            })
        }
    }
}

/// メモリ上に全件を保持するカタログ
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    name: String,
    schema: Schema,
    records: Vec<Record>,
}

impl MemoryCatalog {
    /// スキーマを検証してカタログを構築
    ///
    /// 検索対象フィールドがスキーマにない場合は `UnknownField`、
    /// スキーマのフィールドを欠くレコードがある場合は `MissingField`。
    pub fn new(name: &str, schema: Schema, records: Vec<Record>) -> Result<Self> {
        if let Some(field) = schema.searchable.iter().find(|f| !schema.contains(f)) {
            return Err(Error::UnknownField {
                catalog: name.to_string(),
                field: field.clone(),
            });
        }

        for (index, record) in records.iter().enumerate() {
            if let Some(field) = schema.fields.iter().find(|f| !record.has_field(f)) {
                return Err(Error::MissingField {
                    catalog: name.to_string(),
                    index,
                    field: field.clone(),
                });
            }
        }

        log::debug!("catalog {}: {} records loaded", name, records.len());

        Ok(Self {
            name: name.to_string(),
            schema,
            records,
        })
    }

    /// JSON配列（オブジェクトの配列）から構築
    pub fn from_json(name: &str, schema: Schema, json: &str) -> Result<Self> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        Self::new(name, schema, records)
    }

    /// 全レコード
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl Catalog for MemoryCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn distinct(&self, field: &str) -> Result<BTreeSet<&str>> {
        self.check_field(field)?;
        Ok(self.records.iter().map(|r| r.value(field)).collect())
    }

    fn exact(&self, spec: &QuerySpec) -> Result<Vec<&Record>> {
        for field in spec.fields() {
            self.check_field(field)?;
        }

        Ok(self.records.iter().filter(|r| spec.matches(r)).collect())
    }

    fn search_all(&self, pattern: &str) -> Result<Vec<SearchHit<'_>>> {
        let pattern = pattern.to_lowercase();
        let mut hits = Vec::new();

        // 検索対象フィールドの順に走査
        for field in &self.schema.searchable {
            for (index, record) in self.records.iter().enumerate() {
                if record.value(field).contains(pattern.as_str()) {
                    hits.push(SearchHit {
                        index,
                        field: field.as_str(),
                        record,
                    });
                }
            }
        }

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(title: &str, name: &str, vendor: &str, product: &str, version: &str) -> Record {
        Record::from_pairs([
            ("title", title),
            ("name", name),
            ("vendor", vendor),
            ("product", product),
            ("version", version),
        ])
    }

    fn sample() -> MemoryCatalog {
        let schema = Schema::new(&["title", "name", "vendor", "product", "version"], &["title", "name"]);
        MemoryCatalog::new(
            "cpe",
            schema,
            vec![
                os("Linux Kernel 2.6", "cpe:/o:linux:linux_kernel:2.6", "linux", "linux_kernel", "2.6"),
                os("Linux Kernel 2.4", "cpe:/o:linux:linux_kernel:2.4", "linux", "linux_kernel", "2.4"),
                os("OpenBSD 4.7", "cpe:/o:openbsd:openbsd:4.7", "openbsd", "openbsd", "4.7"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_exact_all_fields() {
        let catalog = sample();
        let spec = QuerySpec::new()
            .with("vendor", "Linux")
            .with("product", "linux_kernel")
            .with("version", "2.6");
        let found = catalog.exact(&spec).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title(), "linux kernel 2.6");
    }

    #[test]
    fn test_exact_no_match_is_empty() {
        let catalog = sample();
        let spec = QuerySpec::new().with("vendor", "microsoft");
        assert!(catalog.exact(&spec).unwrap().is_empty());
    }

    #[test]
    fn test_exact_unknown_field() {
        let catalog = sample();
        let spec = QuerySpec::new().with("colour", "red");
        let err = catalog.exact(&spec).unwrap_err();
        assert!(matches!(err, Error::UnknownField { ref field, .. } if field == "colour"));
    }

    #[test]
    fn test_search_all_case_insensitive() {
        let catalog = sample();
        let hits = catalog.search_all("OPENBSD").unwrap();
        // title と name の両方で一致
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.index == 2));
        assert_eq!(hits[0].field, "title");
        assert_eq!(hits[1].field, "name");
    }

    #[test]
    fn test_search_all_no_match() {
        let catalog = sample();
        assert!(catalog.search_all("solaris").unwrap().is_empty());
    }

    #[test]
    fn test_distinct() {
        let catalog = sample();
        let vendors: Vec<&str> = catalog.distinct("vendor").unwrap().into_iter().collect();
        assert_eq!(vendors, vec!["linux", "openbsd"]);
        assert!(catalog.distinct("colour").is_err());
    }

    #[test]
    fn test_new_rejects_missing_field() {
        let schema = Schema::new(&["title", "vendor"], &["title"]);
        let records = vec![
            Record::from_pairs([("title", "a"), ("vendor", "x")]),
            Record::from_pairs([("title", "b")]),
        ];
        let err = MemoryCatalog::new("t", schema, records).unwrap_err();
        assert!(matches!(err, Error::MissingField { index: 1, .. }));
    }

    #[test]
    fn test_new_rejects_unknown_searchable() {
        let schema = Schema::new(&["title"], &["title", "name"]);
        let err = MemoryCatalog::new("t", schema, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownField { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_from_json() {
        let schema = Schema::new(&["title", "vendor"], &["title"]);
        let catalog = MemoryCatalog::from_json(
            "t",
            schema,
            r#"[{"title":"Cisco IOS 12","vendor":"Cisco"}]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].vendor(), "cisco");
    }
}
