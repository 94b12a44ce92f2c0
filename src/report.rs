//! 結果の表示（テキスト / JSON）

use crate::error::Result;
use cpelab_common::{Catalog, MatchResult, Record, SearchHit, VendorDiff};
use serde::Serialize;
use std::io::Write;

/// 表示用の識別子（CPE名があればそれ、なければタイトル）
pub fn display_id(record: &Record) -> &str {
    match record.get("name") {
        Some(name) if !name.is_empty() => name,
        _ => record.title(),
    }
}

/// 変換結果をテキストで出力
pub fn write_translation<W: Write>(
    out: &mut W,
    pattern: &str,
    source: &str,
    results: &[MatchResult<'_>],
) -> Result<()> {
    if results.is_empty() {
        writeln!(out, "変換元 {} に「{}」に一致するエントリがありません", source, pattern)?;
        return Ok(());
    }

    writeln!(out, "変換元 {} で{}件一致: {}", source, results.len(), pattern)?;

    for result in results {
        writeln!(out, "\n-- {} --", result.reference.title())?;

        match result.score {
            None => writeln!(out, "  候補なし")?,
            Some(score) => {
                let level = result.level.map(|l| l.to_string()).unwrap_or_default();
                writeln!(out, "  スコア {:.3} ({}で一致)", score, level)?;
                for candidate in &result.candidates {
                    writeln!(out, "  {}", display_id(candidate))?;
                }
            }
        }
    }

    let unmatched = results.iter().filter(|r| r.is_unmatched()).count();
    writeln!(out, "\n{}件中{}件は候補なし", results.len(), unmatched)?;

    Ok(())
}

#[derive(Serialize)]
struct TranslationReport<'a> {
    pattern: &'a str,
    source: &'a str,
    target: &'a str,
    results: &'a [MatchResult<'a>],
}

/// 変換結果をJSONで出力
pub fn write_translation_json<W: Write>(
    out: &mut W,
    pattern: &str,
    source: &str,
    target: &str,
    results: &[MatchResult<'_>],
) -> Result<()> {
    let report = TranslationReport {
        pattern,
        source,
        target,
        results,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

/// 検索結果を出力
pub fn write_search<W: Write>(out: &mut W, catalog: &str, hits: &[SearchHit<'_>]) -> Result<()> {
    if hits.is_empty() {
        writeln!(out, "{}: 一致なし", catalog)?;
        return Ok(());
    }

    writeln!(out, "[{} の一致エントリ]", catalog)?;
    for hit in hits {
        writeln!(out, "{} ({}に一致)", hit.record, hit.field)?;
    }
    writeln!(out, "{}: {}件", catalog, hits.len())?;
    Ok(())
}

/// カタログの統計を出力
pub fn write_stats<W: Write>(out: &mut W, catalog: &dyn Catalog) -> Result<()> {
    writeln!(out, "{}:", catalog.name())?;
    writeln!(out, "\t{} entries", catalog.len())?;
    for field in ["vendor", "product"] {
        writeln!(out, "\t{} {}s", catalog.distinct(field)?.len(), field)?;
    }
    Ok(())
}

/// ベンダー差分を出力（左のみ `+`、右のみ `-`）
pub fn write_vendor_diff<W: Write>(out: &mut W, diff: &VendorDiff) -> Result<()> {
    for vendor in &diff.only_left {
        writeln!(out, "+{}", vendor)?;
    }
    for vendor in &diff.only_right {
        writeln!(out, "-{}", vendor)?;
    }
    Ok(())
}
