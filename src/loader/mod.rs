//! カタログファイルの読み込み
//!
//! 対応データベース:
//! - `nmap-os`: Nmap OS指紋データベース
//! - `cpe`: CPE辞書（縮約CSV）

pub mod cpedict;
mod csv;
pub mod nmapos;

use crate::config::Config;
use crate::error::{CpeLabError, Result};
use cpelab_common::MemoryCatalog;
use std::path::Path;

/// 対応データベース
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Database {
    NmapOs,
    Cpe,
}

impl Database {
    pub const ALL: [Database; 2] = [Database::NmapOs, Database::Cpe];

    pub fn name(&self) -> &'static str {
        match self {
            Database::NmapOs => nmapos::NAME,
            Database::Cpe => cpedict::NAME,
        }
    }

    /// `all` を展開してデータベースの一覧を返す
    pub fn select(spec: &str) -> Result<Vec<Database>> {
        if spec.eq_ignore_ascii_case("all") {
            Ok(Self::ALL.to_vec())
        } else {
            Ok(vec![spec.parse()?])
        }
    }

    /// 設定に従ってカタログを読み込む
    pub fn load(&self, config: &Config) -> Result<MemoryCatalog> {
        match self {
            Database::NmapOs => load_nmap_os(&config.nmap_os_path()),
            Database::Cpe => load_cpe_dict(&config.cpe_dict_path(), &config.cpe_parts),
        }
    }
}

impl std::str::FromStr for Database {
    type Err = CpeLabError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nmap-os" | "nmapos" | "nmap" => Ok(Database::NmapOs),
            "cpe" | "cpeos" | "cpe-dict" => Ok(Database::Cpe),
            _ => Err(CpeLabError::UnknownDatabase(s.to_string())),
        }
    }
}

impl std::fmt::Display for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// nmap-os-db ファイルからカタログを作る
pub fn load_nmap_os(path: &Path) -> Result<MemoryCatalog> {
    let content = read_catalog_file(path)?;
    let records = nmapos::parse(&content, &path.display().to_string())?;
    Ok(MemoryCatalog::new(nmapos::NAME, nmapos::schema(), records)?)
}

/// CPE辞書CSVからカタログを作る
pub fn load_cpe_dict(path: &Path, parts: &str) -> Result<MemoryCatalog> {
    let content = read_catalog_file(path)?;
    let records = cpedict::parse(&content, &path.display().to_string(), parts)?;
    Ok(MemoryCatalog::new(cpedict::NAME, cpedict::schema(), records)?)
}

fn read_catalog_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CpeLabError::FileNotFound(path.display().to_string()));
    }
    log::debug!("loading {}", path.display());
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_database_names() {
        assert_eq!("nmap-os".parse::<Database>().unwrap(), Database::NmapOs);
        assert_eq!("CPE".parse::<Database>().unwrap(), Database::Cpe);
        assert!(matches!(
            "oval".parse::<Database>(),
            Err(CpeLabError::UnknownDatabase(_))
        ));
    }

    #[test]
    fn test_select_all() {
        assert_eq!(Database::select("all").unwrap(), vec![Database::NmapOs, Database::Cpe]);
        assert_eq!(Database::select("cpe").unwrap(), vec![Database::Cpe]);
        assert!(Database::select("everything").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_nmap_os(Path::new("/nonexistent/nmap-os-db")).unwrap_err();
        assert!(matches!(err, CpeLabError::FileNotFound(_)));
    }
}
