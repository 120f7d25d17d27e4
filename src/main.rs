//! # geominsel - 几何约束离群分析工具
//!
//! 解析精修程序输出的 `.geo` 几何约束报告，找出键长/键角离群记录，
//! 生成残基选择表达式和可直接执行的几何最小化命令。
//!
//! ## 子命令
//! - `bonds`  - 键长离群分析
//! - `angles` - 键角离群分析
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (报告解析器)
//!   │     ├── outliers/  (离群筛选、残基提取、选择表达式、命令生成)
//!   │     └── models/    (数据模型)
//!   ├── config.rs   (分析配置)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod config;
mod error;
mod models;
mod outliers;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    // 参数错误统一以 1 退出；--help / --version 以 0 退出
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
