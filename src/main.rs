use clap::Parser;
use cpelab::{cli, config, error, loader, report};
use cli::{Cli, Commands};
use config::Config;
use cpelab_common::{vendor_common, vendor_diff, Catalog, Translator};
use error::Result;
use indicatif::ProgressBar;
use loader::Database;
use std::io::Write;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG が優先。未設定なら --verbose で debug
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = Config::load()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Stats { db } => {
            for database in Database::select(&db)? {
                let catalog = database.load(&config)?;
                report::write_stats(&mut out, &catalog)?;
            }
        }

        Commands::Search { pattern, db } => {
            for database in Database::select(&db)? {
                let catalog = database.load(&config)?;
                let hits = catalog.search_all(&pattern)?;
                report::write_search(&mut out, catalog.name(), &hits)?;
            }
        }

        Commands::Translate { pattern, from, to, json } => {
            let source_db: Database = from.parse()?;
            let target_db: Database = to.parse()?;

            let source = source_db.load(&config)?;
            let target = target_db.load(&config)?;

            let progress = ProgressBar::new(0);
            let results = Translator::new().translate_with_progress(
                &pattern,
                &source,
                &target,
                |done, total| {
                    progress.set_length(total as u64);
                    progress.set_position(done as u64);
                },
            )?;
            progress.finish_and_clear();

            if json {
                report::write_translation_json(&mut out, &pattern, source.name(), target.name(), &results)?;
            } else {
                report::write_translation(&mut out, &pattern, source.name(), &results)?;
            }
        }

        Commands::VendorDiff { db0, db1 } => {
            let left = db0.parse::<Database>()?.load(&config)?;
            let right = db1.parse::<Database>()?.load(&config)?;
            let diff = vendor_diff(&left, &right)?;
            report::write_vendor_diff(&mut out, &diff)?;
        }

        Commands::VendorCommon { db0, db1 } => {
            let left = db0.parse::<Database>()?.load(&config)?;
            let right = db1.parse::<Database>()?.load(&config)?;
            for vendor in vendor_common(&left, &right)? {
                writeln!(out, "{}", vendor)?;
            }
        }

        Commands::Config { set_data_dir, show } => {
            let mut config = config;

            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                writeln!(out, "✔ データディレクトリを設定しました")?;
            }

            if show {
                writeln!(out, "設定:")?;
                writeln!(out, "  データディレクトリ: {}", config.data_dir.display())?;
                writeln!(out, "  Nmap OS DB: {}", config.nmap_os_path().display())?;
                writeln!(out, "  CPE辞書: {}", config.cpe_dict_path().display())?;
                writeln!(out, "  CPEパート: {}", config.cpe_parts)?;
            }
        }
    }

    Ok(())
}
