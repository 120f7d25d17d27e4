//! # 离群筛选
//!
//! 计算每条记录的 z 值，保留 sigma > 0 且 z ≥ 阈值的记录，按 z 降序排列。
//!
//! ## 依赖关系
//! - 被 `outliers/mod.rs` 使用
//! - 使用 `models/geometry.rs`

use crate::models::{GeometryRecord, OutlierRecord};

/// 默认 z 值阈值
pub const DEFAULT_THRESHOLD: f64 = 4.0;

/// 筛选离群记录，结果按 z 降序（同值保持原顺序）
pub fn find_outliers<I>(records: I, threshold: f64) -> Vec<OutlierRecord>
where
    I: IntoIterator<Item = GeometryRecord>,
{
    let mut outliers: Vec<OutlierRecord> = records
        .into_iter()
        .filter_map(|record| {
            let z_score = record.z_score()?;
            (z_score >= threshold).then_some(OutlierRecord { record, z_score })
        })
        .collect();

    // sort_by 是稳定排序
    outliers.sort_by(|a, b| {
        b.z_score
            .partial_cmp(&a.z_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    outliers
}

/// 离群报告全文，每行一条
pub fn format_report(outliers: &[OutlierRecord]) -> String {
    outliers
        .iter()
        .map(|o| format!("{}\n", o.report_line()))
        .collect()
}
