use crate::error::{CpeLabError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// データディレクトリを上書きする環境変数
pub const DATA_DIR_ENV: &str = "CPELAB_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// カタログファイルを置くディレクトリ
    pub data_dir: PathBuf,
    /// Nmap OSデータベース（nmap-os-db形式）
    pub nmap_os_file: String,
    /// CPE辞書（name,title のCSV）
    pub cpe_dict_file: String,
    /// 読み込むCPEパート（o: OS, h: ハードウェア, a: アプリケーション）
    pub cpe_parts: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            nmap_os_file: "nmap-os-db".into(),
            cpe_dict_file: "cpe-dictionary.csv".into(),
            cpe_parts: "oh".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        // 環境変数を優先
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CpeLabError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("cpelab").join("config.json"))
    }

    pub fn nmap_os_path(&self) -> PathBuf {
        self.data_dir.join(&self.nmap_os_file)
    }

    pub fn cpe_dict_path(&self) -> PathBuf {
        self.data_dir.join(&self.cpe_dict_file)
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = dir;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = Config::default();
        assert_eq!(config.nmap_os_path(), PathBuf::from("data").join("nmap-os-db"));
        assert_eq!(config.cpe_dict_path(), PathBuf::from("data").join("cpe-dictionary.csv"));
        assert_eq!(config.cpe_parts, "oh");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"data_dir": "/srv/cpelab"}"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/cpelab"));
        assert_eq!(config.nmap_os_file, "nmap-os-db");
    }
}
