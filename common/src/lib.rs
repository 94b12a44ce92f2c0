//! cpelab Common Library
//!
//! カタログ間（Nmap OS指紋 / CPE辞書）のあいまい変換コア

pub mod record;
pub mod catalog;
pub mod error;
pub mod narrower;
pub mod similarity;
pub mod translator;
pub mod comparison;

pub use record::Record;
pub use catalog::{Catalog, MemoryCatalog, QuerySpec, Schema, SearchHit};
pub use error::{Error, Result};
pub use narrower::{narrow, NarrowLevel, Narrowed};
pub use similarity::{levenshtein_distance, EditDistanceScorer, Scorer};
pub use translator::{MatchResult, Translator};
pub use comparison::{vendor_common, vendor_diff, VendorDiff};
