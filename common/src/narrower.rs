//! 候補絞り込み
//!
//! 参照レコードの version / product / vendor で完全一致検索し、
//! 0件なら具体的なフィールドから順に条件を外して再検索する。
//! 最初に得られた非空の候補集合をそのまま返す（レベルを混ぜない）。

use crate::catalog::{Catalog, QuerySpec};
use crate::error::Result;
use crate::record::{Record, PRODUCT, VENDOR, VERSION};
use serde::Serialize;

/// 具体的な順に並べたカテゴリフィールド
pub const SPECIFICITY_ORDER: [&str; 3] = [VERSION, PRODUCT, VENDOR];

/// 候補が見つかった絞り込みレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrowLevel {
    /// vendor + product + version
    Version,
    /// vendor + product
    Product,
    /// vendor のみ
    Vendor,
}

impl NarrowLevel {
    /// このレベルで条件に使うフィールド
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            NarrowLevel::Version => &[VERSION, PRODUCT, VENDOR],
            NarrowLevel::Product => &[PRODUCT, VENDOR],
            NarrowLevel::Vendor => &[VENDOR],
        }
    }

    fn relax(self) -> Option<Self> {
        match self {
            NarrowLevel::Version => Some(NarrowLevel::Product),
            NarrowLevel::Product => Some(NarrowLevel::Vendor),
            NarrowLevel::Vendor => None,
        }
    }
}

impl std::fmt::Display for NarrowLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields: Vec<&str> = self.fields().to_vec();
        fields.reverse();
        write!(f, "{}", fields.join("+"))
    }
}

/// 絞り込み結果
#[derive(Debug, Clone)]
pub struct Narrowed<'a> {
    /// 候補が見つかったレベル（見つからなければ None）
    pub level: Option<NarrowLevel>,
    pub candidates: Vec<&'a Record>,
}

impl Narrowed<'_> {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// 参照レコードに対する候補を対象カタログから絞り込む
///
/// 空の値もそのまま条件に使う（空同士のみ一致）。
pub fn narrow<'a, C>(reference: &Record, target: &'a C) -> Result<Narrowed<'a>>
where
    C: Catalog + ?Sized,
{
    let mut spec = SPECIFICITY_ORDER
        .iter()
        .fold(QuerySpec::new(), |spec, field| spec.with(field, reference.value(field)));
    let mut level = NarrowLevel::Version;

    loop {
        let candidates = target.exact(&spec)?;
        if !candidates.is_empty() {
            log::debug!(
                "'{}': {} candidates at {}",
                reference.title(),
                candidates.len(),
                level
            );
            return Ok(Narrowed {
                level: Some(level),
                candidates,
            });
        }

        match level.relax() {
            Some(next) => {
                spec = spec.without(level.fields()[0]);
                level = next;
            }
            None => break,
        }
    }

    log::debug!("'{}': no candidates in {}", reference.title(), target.name());
    Ok(Narrowed {
        level: None,
        candidates: Vec::new(),
    })
}
