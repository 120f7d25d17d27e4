//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `outliers/`, `utils/`
//! - 子模块: scan

pub mod scan;

use crate::cli::Commands;
use crate::error::Result;
use crate::models::GeometryKind;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Bonds(args) => scan::execute(GeometryKind::Bond, args),
        Commands::Angles(args) => scan::execute(GeometryKind::Angle, args),
    }
}
