//! # 分析配置
//!
//! 由命令行参数构建，运行流水线前校验。
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs` 构建
//! - 被 `outliers/` 使用

use crate::error::{GeominselError, Result};
use crate::outliers::command::{DEFAULT_MAX_ITERATIONS, DEFAULT_MINIMIZER};
use crate::outliers::filter::DEFAULT_THRESHOLD;

/// 分析配置
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// z 值阈值 (z ≥ threshold 视为离群)
    pub threshold: f64,
    /// 最小化最大迭代次数
    pub max_iterations: u32,
    /// 外部最小化程序名
    pub minimizer: String,
    /// 遇到不完整记录即报错
    pub strict: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            threshold: DEFAULT_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            minimizer: DEFAULT_MINIMIZER.to_string(),
            strict: false,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(GeominselError::InvalidArgument(format!(
                "threshold must be a positive number, got {}",
                self.threshold
            )));
        }
        if self.max_iterations == 0 {
            return Err(GeominselError::InvalidArgument(
                "max-iterations must be at least 1".to_string(),
            ));
        }
        if self.minimizer.trim().is_empty() {
            return Err(GeominselError::InvalidArgument(
                "minimizer program name is empty".to_string(),
            ));
        }
        Ok(())
    }
}
