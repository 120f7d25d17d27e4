//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `bonds`: 键长离群分析
//! - `angles`: 键角离群分析
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: scan

pub mod scan;

use clap::{Parser, Subcommand};

/// geominsel - 几何约束离群分析与最小化选择生成
#[derive(Parser)]
#[command(name = "geominsel")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Find bond/angle outliers in a refinement .geo report and build a minimization selection",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Scan bond-length restraints for outliers
    Bonds(scan::ScanArgs),

    /// Scan bond-angle restraints for outliers
    Angles(scan::ScanArgs),
}
