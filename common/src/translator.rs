//! カタログ間のあいまい変換
//!
//! ## 処理フロー
//! 1. パターンで変換元カタログのレコードを選択
//! 2. 各レコードについて変換先カタログから候補を絞り込み
//! 3. タイトルの類似度で候補を順位付けし、最高スコアの候補を全て残す

use crate::catalog::Catalog;
use crate::error::Result;
use crate::narrower::{narrow, NarrowLevel};
use crate::record::Record;
use crate::similarity::{EditDistanceScorer, Scorer};
use serde::Serialize;
use std::collections::HashSet;

/// 1レコード分の変換結果
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<'a> {
    /// 変換元レコード
    pub reference: &'a Record,
    /// 最高スコアの候補（同点は全て）
    pub candidates: Vec<&'a Record>,
    /// 最高スコア（候補なしの場合は None）
    pub score: Option<f64>,
    /// 候補が見つかった絞り込みレベル
    pub level: Option<NarrowLevel>,
}

impl MatchResult<'_> {
    /// 候補が見つからなかったか
    pub fn is_unmatched(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// 変換器
#[derive(Debug, Clone, Default)]
pub struct Translator<S = EditDistanceScorer> {
    scorer: S,
}

impl Translator<EditDistanceScorer> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Scorer> Translator<S> {
    /// スコアラーを指定して生成
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    /// `pattern` に一致する変換元レコードを変換先カタログに変換する
    ///
    /// 変換元に一致がなければ空のVecを返し、変換先には問い合わせない。
    pub fn translate<'a>(
        &self,
        pattern: &str,
        source: &'a dyn Catalog,
        target: &'a dyn Catalog,
    ) -> Result<Vec<MatchResult<'a>>> {
        self.translate_with_progress(pattern, source, target, |_, _| {})
    }

    /// 進捗コールバック付きの `translate`
    ///
    /// `on_progress(done, total)` はレコードを1件処理するごとに呼ばれる。
    pub fn translate_with_progress<'a, F>(
        &self,
        pattern: &str,
        source: &'a dyn Catalog,
        target: &'a dyn Catalog,
        mut on_progress: F,
    ) -> Result<Vec<MatchResult<'a>>>
    where
        F: FnMut(usize, usize),
    {
        let references = select_references(pattern, source)?;
        if references.is_empty() {
            log::info!("no match for '{}' in {}", pattern, source.name());
            return Ok(Vec::new());
        }

        log::info!(
            "{} matches for '{}' in {}",
            references.len(),
            pattern,
            source.name()
        );

        let total = references.len();
        let mut results = Vec::with_capacity(total);
        for (done, reference) in references.into_iter().enumerate() {
            results.push(self.translate_record(reference, target)?);
            on_progress(done + 1, total);
        }

        let unmatched = results.iter().filter(|r| r.is_unmatched()).count();
        log::info!(
            "translated {} records into {} ({} without candidates)",
            results.len(),
            target.name(),
            unmatched
        );

        Ok(results)
    }

    /// 1レコードを変換する
    pub fn translate_record<'a>(
        &self,
        reference: &'a Record,
        target: &'a dyn Catalog,
    ) -> Result<MatchResult<'a>> {
        let narrowed = narrow(reference, target)?;

        let mut best: Vec<&'a Record> = Vec::new();
        let mut best_score: Option<f64> = None;

        for candidate in narrowed.candidates {
            let score = self.scorer.score(reference.title(), candidate.title());
            match best_score {
                Some(current) if score < current => {}
                Some(current) if score == current => best.push(candidate),
                _ => {
                    best_score = Some(score);
                    best = vec![candidate];
                }
            }
        }

        Ok(MatchResult {
            reference,
            candidates: best,
            score: best_score,
            level: narrowed.level,
        })
    }
}

/// 変換元レコードを選択（複数フィールドでの一致は1件にまとめる）
fn select_references<'a>(pattern: &str, source: &'a dyn Catalog) -> Result<Vec<&'a Record>> {
    let mut seen = HashSet::new();
    Ok(source
        .search_all(pattern)?
        .into_iter()
        .filter(|hit| seen.insert(hit.index))
        .map(|hit| hit.record)
        .collect())
}
