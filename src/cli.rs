use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cpelab")]
#[command(about = "Nmap OS指紋とCPE辞書のカタログ間変換ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// エントリ数・ベンダー数などの統計を表示
    Stats {
        /// 対象データベース (nmap-os/cpe/all)
        #[arg(required = true)]
        db: String,
    },

    /// パターンに一致するエントリを検索
    Search {
        /// 検索パターン（部分一致・大文字小文字を区別しない）
        #[arg(required = true)]
        pattern: String,

        /// 対象データベース (nmap-os/cpe/all)
        #[arg(required = true)]
        db: String,
    },

    /// 変換元のエントリを変換先カタログの候補に変換
    Translate {
        /// 変換元エントリを選ぶパターン
        #[arg(required = true)]
        pattern: String,

        /// 変換元データベース
        #[arg(long, default_value = "nmap-os")]
        from: String,

        /// 変換先データベース
        #[arg(long, default_value = "cpe")]
        to: String,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 2つのデータベースのベンダー差分を表示
    VendorDiff {
        #[arg(required = true)]
        db0: String,

        #[arg(required = true)]
        db1: String,
    },

    /// 2つのデータベースに共通するベンダーを表示
    VendorCommon {
        #[arg(required = true)]
        db0: String,

        #[arg(required = true)]
        db1: String,
    },

    /// 設定を表示/編集
    Config {
        /// データディレクトリを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_defaults() {
        let cli = Cli::try_parse_from(["cpelab", "translate", "linux"]).unwrap();
        match cli.command {
            Commands::Translate { pattern, from, to, json } => {
                assert_eq!(pattern, "linux");
                assert_eq!(from, "nmap-os");
                assert_eq!(to, "cpe");
                assert!(!json);
            }
            _ => panic!("translate expected"),
        }
    }

    #[test]
    fn test_vendor_diff_requires_two_dbs() {
        assert!(Cli::try_parse_from(["cpelab", "vendor-diff", "cpe"]).is_err());
        assert!(Cli::try_parse_from(["cpelab", "vendor-diff", "cpe", "nmap-os"]).is_ok());
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::try_parse_from(["cpelab", "stats", "all", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
