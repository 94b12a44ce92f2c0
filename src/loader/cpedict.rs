//! CPE辞書（縮約CSV形式）の読み込み
//!
//! 公式XML辞書から抽出済みの `name,title` CSVを読む。
//! CPE名 `cpe:/<part>:<vendor>:<product>:<version>:<update>:<edition>:<language>`
//! を分解して各フィールドに展開する。

use super::csv::parse_csv_line;
use crate::error::{CpeLabError, Result};
use cpelab_common::{Record, Schema};
use regex::Regex;

pub const NAME: &str = "cpe";

/// CPE名の構成要素（part以降）
const COMPONENTS: [&str; 7] = ["part", "vendor", "product", "version", "update", "edition", "language"];

pub fn schema() -> Schema {
    let mut fields = vec!["title", "name"];
    fields.extend(COMPONENTS);
    Schema::new(&fields, &["title", "name"])
}

/// CSVの内容をレコードに変換
///
/// `parts` に含まれるパート（o/h/a）のエントリのみ残す。
pub fn parse(content: &str, path: &str, parts: &str) -> Result<Vec<Record>> {
    lazy_static::lazy_static! {
        static ref CPE_NAME_RE: Regex = Regex::new(r"^cpe:/([aho])(:|$)").unwrap();
    }

    let parse_error = |line: usize, message: String| CpeLabError::Parse {
        path: path.to_string(),
        line,
        message,
    };

    let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    // ヘッダーから列位置を決める
    let (name_col, title_col) = match lines.next() {
        Some((index, header)) => {
            let columns: Vec<String> = parse_csv_line(header).iter().map(|c| c.to_lowercase()).collect();
            let find = |col: &str| {
                columns
                    .iter()
                    .position(|c| c == col)
                    .ok_or_else(|| parse_error(index + 1, format!("ヘッダーに{}列がありません", col)))
            };
            (find("name")?, find("title")?)
        }
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    let mut skipped = 0;

    for (index, line) in lines {
        let fields = parse_csv_line(line);
        let (name, title) = match (fields.get(name_col), fields.get(title_col)) {
            (Some(name), Some(title)) => (name.to_lowercase(), title.as_str()),
            _ => return Err(parse_error(index + 1, "列数が不足しています".into())),
        };

        let part = match CPE_NAME_RE.captures(&name) {
            Some(caps) => caps[1].to_string(),
            None => return Err(parse_error(index + 1, format!("不正なCPE名: {}", name))),
        };

        if !parts.contains(part.as_str()) {
            skipped += 1;
            continue;
        }

        records.push(split_name(&name, title));
    }

    log::debug!("{}: {} entries, {} skipped by part filter", path, records.len(), skipped);

    Ok(records)
}

/// CPE名を分解してレコードを作る（不足する要素は空文字）
fn split_name(name: &str, title: &str) -> Record {
    let mut items: Vec<&str> = name["cpe:/".len()..].split(':').collect();
    items.resize(COMPONENTS.len(), "");

    let mut pairs = vec![("title", title), ("name", name)];
    pairs.extend(COMPONENTS.iter().copied().zip(items));
    Record::from_pairs(pairs)
}
