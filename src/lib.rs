//! cpelab - Nmap OS指紋 / CPE辞書 カタログ間変換ツール

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;
