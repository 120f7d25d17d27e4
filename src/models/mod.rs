//! # 数据模型模块
//!
//! 定义几何约束记录、离群记录和残基键的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`outliers/` 和 `commands/` 使用
//! - 子模块: geometry, residue

pub mod geometry;
pub mod residue;

pub use geometry::{GeometryKind, GeometryRecord, OutlierRecord};
pub use residue::ResidueKey;
