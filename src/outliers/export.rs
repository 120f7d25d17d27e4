//! # 结果导出
//!
//! 写出离群报告、残基选择文件，以及可选的 CSV 离群表。
//! 所有输出文件每次运行都会被覆盖。
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs` 调用
//! - 使用 `outliers/filter.rs`, `outliers/residues.rs` 的格式化函数
//! - 使用 `csv` + `serde` 写入 CSV 文件

use crate::error::{GeominselError, Result};
use crate::models::OutlierRecord;

use serde::Serialize;
use std::fs;
use std::path::Path;

/// CSV 中的一行
#[derive(Debug, Serialize)]
struct OutlierRow<'a> {
    rank: usize,
    kind: String,
    z_score: String,
    atoms: String,
    ideal: &'a str,
    model: &'a str,
    sigma: &'a str,
    line: usize,
}

/// 写出文本文件（覆盖）
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| GeominselError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 导出离群记录为 CSV
pub fn outliers_to_csv(outliers: &[OutlierRecord], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for (i, o) in outliers.iter().enumerate() {
        wtr.serialize(OutlierRow {
            rank: i + 1,
            kind: o.record.kind.to_string(),
            z_score: format!("{:.2}", o.z_score),
            atoms: o
                .record
                .atoms
                .iter()
                .map(|a| a.trim())
                .collect::<Vec<_>>()
                .join(" | "),
            ideal: &o.record.ideal_text,
            model: &o.record.model_text,
            sigma: &o.record.sigma_text,
            line: o.record.line,
        })?;
    }

    wtr.flush().map_err(|e| GeominselError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
