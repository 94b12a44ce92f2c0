//! Nmap OSデータベース（nmap-os-db形式）の読み込み
//!
//! ```text
//! Fingerprint Linux 2.6.18 - 2.6.22
//! Class Linux | Linux | 2.6.X | general purpose
//! CPE cpe:/o:linux:linux_kernel:2.6
//! ```
//!
//! Class行ごとに1レコードを生成する。直後のCPE行はそのレコードに付与する。

use crate::error::{CpeLabError, Result};
use cpelab_common::{Record, Schema};
use regex::Regex;

pub const NAME: &str = "nmap-os";

/// Class行のフィールド順
const CLASS_FIELDS: [&str; 4] = ["vendor", "product", "version", "device_type"];

pub fn schema() -> Schema {
    Schema::new(
        &["title", "vendor", "product", "version", "device_type", "cpe"],
        &["title", "vendor", "product"],
    )
}

#[derive(Debug, Default)]
struct ClassEntry {
    title: String,
    values: Vec<String>,
    cpe: String,
}

impl ClassEntry {
    fn into_record(self) -> Record {
        let mut pairs = vec![("title", self.title), ("cpe", self.cpe)];
        pairs.extend(CLASS_FIELDS.iter().copied().zip(self.values));
        Record::from_pairs(pairs)
    }
}

/// nmap-os-db の内容をレコードに変換
pub fn parse(content: &str, path: &str) -> Result<Vec<Record>> {
    lazy_static::lazy_static! {
        static ref FINGERPRINT_RE: Regex = Regex::new(r"^Fingerprint\s+(.+?)\s*$").unwrap();
        static ref CLASS_RE: Regex = Regex::new(r"^Class\s+(.*?)\s*$").unwrap();
        static ref CPE_RE: Regex = Regex::new(r"^CPE\s+(\S+)").unwrap();
    }

    let mut title: Option<String> = None;
    let mut entries: Vec<ClassEntry> = Vec::new();
    // 現在のFingerprintで最後に追加したClass行
    let mut last_class: Option<usize> = None;

    for (index, line) in content.lines().enumerate() {
        if let Some(caps) = FINGERPRINT_RE.captures(line) {
            title = Some(caps[1].to_string());
            last_class = None;
        } else if let Some(caps) = CLASS_RE.captures(line) {
            let title = title.as_ref().ok_or_else(|| CpeLabError::Parse {
                path: path.to_string(),
                line: index + 1,
                message: "Class行の前にFingerprint行がありません".into(),
            })?;

            let mut values: Vec<String> = caps[1].split('|').map(|s| s.trim().to_string()).collect();
            if values.len() != CLASS_FIELDS.len() {
                log::warn!(
                    "{}:{}: Class行のフィールド数が不正です ({}件)",
                    path,
                    index + 1,
                    values.len()
                );
            }
            values.resize(CLASS_FIELDS.len(), String::new());

            entries.push(ClassEntry {
                title: title.clone(),
                values,
                cpe: String::new(),
            });
            last_class = Some(entries.len() - 1);
        } else if let Some(caps) = CPE_RE.captures(line) {
            // 同じClassに複数のCPE行がある場合は最初のものを使う
            if let Some(entry) = last_class.and_then(|i| entries.get_mut(i)) {
                if entry.cpe.is_empty() {
                    entry.cpe = caps[1].to_string();
                }
            }
        }
    }

    log::debug!("{}: {} class entries", path, entries.len());

    Ok(entries.into_iter().map(ClassEntry::into_record).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Nmap OS Fingerprinting 2nd Generation DB
MatchPoints
SEQ(SP=25%GCD=75%ISR=25%TI=100%CI=50%II=100%SS=20%TS=20)

Fingerprint Linux 2.6.18 - 2.6.22
Class Linux | Linux | 2.6.X | general purpose
CPE cpe:/o:linux:linux_kernel:2.6
SEQ(SP=C1-CB%GCD=1-6%ISR=C8-D2%TI=Z%CI=Z%II=I%TS=7)

Fingerprint Cisco 2811 router
Class Cisco | IOS | 12.X | router
Class Cisco | embedded || router
";

    #[test]
    fn test_parse_class_lines() {
        let records = parse(SAMPLE, "nmap-os-db").unwrap();
        assert_eq!(records.len(), 3);

        let linux = &records[0];
        assert_eq!(linux.title(), "linux 2.6.18 - 2.6.22");
        assert_eq!(linux.vendor(), "linux");
        assert_eq!(linux.product(), "linux");
        assert_eq!(linux.version(), "2.6.x");
        assert_eq!(linux.value("device_type"), "general purpose");
        assert_eq!(linux.value("cpe"), "cpe:/o:linux:linux_kernel:2.6");
    }

    #[test]
    fn test_multiple_classes_share_title() {
        let records = parse(SAMPLE, "nmap-os-db").unwrap();
        assert_eq!(records[1].title(), "cisco 2811 router");
        assert_eq!(records[2].title(), "cisco 2811 router");
        assert_eq!(records[1].product(), "ios");
        assert_eq!(records[2].version(), "");
        assert_eq!(records[2].value("cpe"), "");
    }

    #[test]
    fn test_short_class_line_is_padded() {
        let records = parse("Fingerprint Foo\nClass Foo | Bar\n", "db").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product(), "bar");
        assert_eq!(records[0].version(), "");
        assert_eq!(records[0].value("device_type"), "");
    }

    #[test]
    fn test_class_before_fingerprint() {
        let err = parse("\nClass Linux | Linux | 2.6.X | general purpose\n", "db").unwrap_err();
        assert!(matches!(err, CpeLabError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_records_fit_schema() {
        let records = parse(SAMPLE, "nmap-os-db").unwrap();
        let schema = schema();
        for record in &records {
            for field in &schema.fields {
                assert!(record.has_field(field), "missing {}", field);
            }
        }
    }
}
