//! # bonds / angles 子命令 CLI 定义
//!
//! 两个子命令共用同一组参数，只在记录类型上不同。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/scan.rs`

use crate::config::ScanConfig;
use crate::outliers::command::DEFAULT_MINIMIZER;

use clap::Args;
use std::path::PathBuf;

/// 离群扫描参数
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Geometry restraint report written by the refinement run (e.g. model.pdb.geo)
    pub report: PathBuf,

    /// Minimum z-score |model - ideal| / sigma for a restraint to count as an outlier
    #[arg(long, env = "GEOMINSEL_THRESHOLD", default_value_t = 4.0)]
    pub threshold: f64,

    /// Iteration count passed to the minimization command
    #[arg(long, env = "GEOMINSEL_MAX_ITERATIONS", default_value_t = 500)]
    pub max_iterations: u32,

    /// Minimization program named in the emitted command
    #[arg(long, default_value = DEFAULT_MINIMIZER)]
    pub minimizer: String,

    /// Directory for the outlier report and selection file
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Fail on the first malformed record instead of skipping it
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Also export the outlier table as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Number of top outliers to show in the terminal table
    #[arg(long, default_value_t = 10)]
    pub top_n: usize,
}

impl ScanArgs {
    pub fn to_config(&self) -> ScanConfig {
        ScanConfig {
            threshold: self.threshold,
            max_iterations: self.max_iterations,
            minimizer: self.minimizer.clone(),
            strict: self.strict,
        }
    }
}
