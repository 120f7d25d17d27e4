//! # bonds / angles 命令实现
//!
//! 键长与键角共用的离群扫描流程。
//!
//! ## 功能
//! - 读取 `.geo` 报告并解析指定类型的记录
//! - 按 z 值阈值筛选离群记录，写出离群报告
//! - 提取涉及的残基，写出残基选择文件
//! - 打印可直接执行的几何最小化命令
//!
//! ## 依赖关系
//! - 使用 `cli/scan.rs` 定义的参数
//! - 使用 `parsers/geo.rs`, `outliers/`
//! - 使用 `utils/output.rs`

use crate::cli::scan::ScanArgs;
use crate::error::{GeominselError, Result};
use crate::models::{GeometryKind, OutlierRecord};
use crate::outliers::{self, command, export, filter, residues};
use crate::parsers::geo::{self, MalformedRecord};
use crate::utils::output;

use std::fs;
use tabled::{Table, Tabled};

/// 逐条打印的不完整记录上限
const MAX_MALFORMED_SHOWN: usize = 5;

/// 离群表格行
#[derive(Debug, Clone, Tabled)]
struct OutlierRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Z")]
    z_score: String,
    #[tabled(rename = "Atoms")]
    atoms: String,
    #[tabled(rename = "Ideal")]
    ideal: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Sigma")]
    sigma: String,
}

/// 执行离群扫描
pub fn execute(kind: GeometryKind, args: ScanArgs) -> Result<()> {
    output::print_header(&format!("Scanning {} restraints", kind));

    let config = args.to_config();
    config.validate()?;

    let content = geo::read_report(&args.report)?;
    output::print_info(&format!(
        "Reading '{}' (threshold z >= {})",
        args.report.display(),
        config.threshold
    ));

    let analysis = outliers::analyze(&content, kind, &config)?;
    output::print_info(&format!("Parsed {} {} records", analysis.parsed, kind));
    report_malformed(kind, &analysis.malformed);

    fs::create_dir_all(&args.output_dir).map_err(|e| GeominselError::FileWriteError {
        path: args.output_dir.display().to_string(),
        source: e,
    })?;

    let mut written = Vec::new();

    let outlier_path = args.output_dir.join(kind.outlier_file_name());
    export::write_text(&outlier_path, &filter::format_report(&analysis.outliers))?;
    written.push(("outlier report", outlier_path.display().to_string()));

    if !analysis.has_outliers() {
        output::print_success(&format!(
            "No significant outliers (z >= {}) among {} {} records; nothing to minimize.",
            config.threshold, analysis.parsed, kind
        ));
        print_written(&written);
        return Ok(());
    }

    output::print_info(&format!(
        "Found {} {} outliers",
        analysis.outliers.len(),
        kind
    ));
    print_outlier_table(&analysis.outliers, args.top_n);

    if !analysis.unmatched_atoms.is_empty() {
        output::print_warning(&format!(
            "{} atom identifier(s) carry no chain/residue and were left out of the selection",
            analysis.unmatched_atoms.len()
        ));
    }
    output::print_info(&format!(
        "{} unique residue(s) selected for minimization",
        analysis.residues.len()
    ));

    let selection_path = args.output_dir.join(kind.selection_file_name());
    export::write_text(
        &selection_path,
        &residues::format_selection_file(&analysis.residues),
    )?;
    written.push(("residue selection", selection_path.display().to_string()));

    if let Some(ref csv_path) = args.csv {
        export::outliers_to_csv(&analysis.outliers, csv_path)?;
        written.push(("outlier table", csv_path.display().to_string()));
    }

    let model = command::derive_model_path(&args.report);
    let cmd = command::render_command(
        &config.minimizer,
        &model,
        &analysis.selection,
        config.max_iterations,
    );

    output::print_separator();
    output::print_info("Run geometry minimization with:");
    output::print_command(&cmd);
    print_written(&written);
    output::print_done(&format!("{} scan complete", kind));

    Ok(())
}

/// 报告被跳过的不完整记录
fn report_malformed(kind: GeometryKind, malformed: &[MalformedRecord]) {
    if malformed.is_empty() {
        return;
    }

    for bad in malformed.iter().take(MAX_MALFORMED_SHOWN) {
        output::print_warning(&format!(
            "Skipped malformed {} record at line {}: {}",
            kind, bad.line, bad.reason
        ));
    }
    if malformed.len() > MAX_MALFORMED_SHOWN {
        output::print_warning(&format!(
            "... {} more malformed records not shown",
            malformed.len() - MAX_MALFORMED_SHOWN
        ));
    }
    output::print_warning(&format!(
        "{} malformed {} record(s) skipped (use --strict to fail instead)",
        malformed.len(),
        kind
    ));
}

/// 显示前 N 条离群记录
fn print_outlier_table(outliers: &[OutlierRecord], top_n: usize) {
    if top_n == 0 {
        return;
    }

    let rows: Vec<OutlierRow> = outliers
        .iter()
        .take(top_n)
        .enumerate()
        .map(|(i, o)| OutlierRow {
            rank: i + 1,
            z_score: format!("{:.2}", o.z_score),
            atoms: o
                .record
                .atoms
                .iter()
                .map(|a| a.trim())
                .collect::<Vec<_>>()
                .join(" | "),
            ideal: o.record.ideal_text.clone(),
            model: o.record.model_text.clone(),
            sigma: o.record.sigma_text.clone(),
        })
        .collect();

    output::print_header(&format!(
        "Top {} Outliers by Z-score",
        top_n.min(outliers.len())
    ));
    println!("{}", Table::new(&rows));
}

fn print_written(written: &[(&str, String)]) {
    output::print_info("Files written:");
    for (label, path) in written {
        output::print_written(label, path);
    }
}
