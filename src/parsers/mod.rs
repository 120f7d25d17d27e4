//! # 解析器模块
//!
//! 提供精修程序几何约束报告的解析器。
//!
//! ## 依赖关系
//! - 被 `outliers/` 和 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: geo

pub mod geo;
