//! # 最小化命令生成
//!
//! 由报告文件名推导模型文件名，并拼出外部几何最小化程序的调用命令。
//! 只做字符串格式化，不执行外部程序。
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs` 使用
//! - 无外部模块依赖

use std::path::{Path, PathBuf};

/// 默认最小化程序
pub const DEFAULT_MINIMIZER: &str = "phenix.geometry_minimization";

/// 默认最大迭代次数
pub const DEFAULT_MAX_ITERATIONS: u32 = 500;

const REPORT_SUFFIX: &str = ".geo";
const MODEL_EXTENSIONS: [&str; 2] = [".pdb", ".cif"];
const DEFAULT_MODEL_EXTENSION: &str = ".pdb";

/// 推导模型文件路径
///
/// - `model.pdb.geo` -> `model.pdb`
/// - `model.cif.geo` -> `model.cif`
/// - `model.geo` -> `model.pdb`
///
/// 不以 `.geo` 结尾的文件名去掉最后一个扩展名后按同样规则处理。
pub fn derive_model_path(report: &Path) -> PathBuf {
    let file_name = report
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let base = match file_name.strip_suffix(REPORT_SUFFIX) {
        Some(base) if !base.is_empty() => base.to_string(),
        _ => report
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string()),
    };

    let model_name = if MODEL_EXTENSIONS.iter().any(|ext| base.ends_with(ext)) {
        base
    } else {
        format!("{}{}", base, DEFAULT_MODEL_EXTENSION)
    };

    report.with_file_name(model_name)
}

/// 生成调用命令
pub fn render_command(
    minimizer: &str,
    model: &Path,
    selection: &str,
    max_iterations: u32,
) -> String {
    format!(
        "{} {} selection=\"{}\" max_iterations={}",
        minimizer,
        model.display(),
        selection,
        max_iterations
    )
}
