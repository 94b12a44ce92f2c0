//! ベンダー比較
//!
//! 2つのカタログのベンダー集合の差分・共通部分を求める。

use crate::catalog::Catalog;
use crate::error::Result;
use crate::record::VENDOR;
use serde::Serialize;

/// ベンダー差分
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VendorDiff {
    /// 左側のカタログにのみ存在
    pub only_left: Vec<String>,
    /// 右側のカタログにのみ存在
    pub only_right: Vec<String>,
}

/// どちらか一方にのみ存在するベンダーを求める
pub fn vendor_diff(left: &dyn Catalog, right: &dyn Catalog) -> Result<VendorDiff> {
    let left_vendors = left.distinct(VENDOR)?;
    let right_vendors = right.distinct(VENDOR)?;

    Ok(VendorDiff {
        only_left: left_vendors
            .difference(&right_vendors)
            .map(|s| s.to_string())
            .collect(),
        only_right: right_vendors
            .difference(&left_vendors)
            .map(|s| s.to_string())
            .collect(),
    })
}

/// 両方に存在するベンダーを求める
pub fn vendor_common(left: &dyn Catalog, right: &dyn Catalog) -> Result<Vec<String>> {
    let left_vendors = left.distinct(VENDOR)?;
    let right_vendors = right.distinct(VENDOR)?;

    Ok(left_vendors
        .intersection(&right_vendors)
        .map(|s| s.to_string())
        .collect())
}
