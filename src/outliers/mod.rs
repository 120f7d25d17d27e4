//! # 离群分析模块
//!
//! 键长与键角共用的分析流水线：
//! 解析记录 -> 离群筛选 -> 残基提取 -> 选择表达式构建。
//! 命令生成与文件导出由 `commands/scan.rs` 在流水线之后调用。
//!
//! ## 子模块
//! - `filter`: z 值计算与阈值筛选
//! - `residues`: (链, 残基号) 提取与去重
//! - `selection`: 选择表达式构建
//! - `command`: 模型文件名推导与调用命令生成
//! - `export`: 输出文件写入
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs` 使用
//! - 使用 `parsers/geo.rs`, `models/`, `config.rs`

pub mod command;
pub mod export;
pub mod filter;
pub mod residues;
pub mod selection;

use crate::config::ScanConfig;
use crate::error::Result;
use crate::models::{GeometryKind, OutlierRecord, ResidueKey};
use crate::parsers::geo::{self, MalformedRecord};

/// 一次分析的全部中间结果
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// 成功解析的记录数
    pub parsed: usize,
    /// 被跳过的不完整记录
    pub malformed: Vec<MalformedRecord>,
    /// 按 z 降序排列的离群记录
    pub outliers: Vec<OutlierRecord>,
    /// 去重排序后的残基
    pub residues: Vec<ResidueKey>,
    /// 无法提取残基的原子标识
    pub unmatched_atoms: Vec<String>,
    /// 选择表达式；没有离群记录时为空
    pub selection: String,
}

impl Analysis {
    pub fn has_outliers(&self) -> bool {
        !self.outliers.is_empty()
    }
}

/// 对报告内容运行分析流水线
///
/// 严格模式下遇到第一条不完整记录即返回错误。
/// 没有离群记录时不进行残基提取和选择表达式构建。
pub fn analyze(content: &str, kind: GeometryKind, config: &ScanConfig) -> Result<Analysis> {
    let mut analysis = Analysis::default();
    let mut records = Vec::new();

    for item in geo::parse_records(content, kind) {
        match item {
            Ok(record) => records.push(record),
            Err(bad) if config.strict => return Err(bad.into_error(kind)),
            Err(bad) => analysis.malformed.push(bad),
        }
    }
    analysis.parsed = records.len();

    analysis.outliers = filter::find_outliers(records, config.threshold);
    if !analysis.has_outliers() {
        return Ok(analysis);
    }

    let extraction = residues::extract_residues(&analysis.outliers);
    analysis.selection = selection::build_selection(&extraction.residues);
    analysis.residues = extraction.residues;
    analysis.unmatched_atoms = extraction.unmatched;

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeominselError;

    const SCENARIO_A: &str = r#"bond pdb=" C   ALA A  10 "
     pdb=" N   GLY A  11 "
  ideal  model  delta    sigma   weight residual
  1.45   1.60  -0.15  0.02  2.50e+03 5.62e+01
"#;

    const SCENARIO_C: &str = r#"bond pdb=" N   LYS A   5 "
     pdb=" CA  LYS A   5 "
  ideal  model  delta    sigma   weight residual
  1.458  1.600 -0.142 1.90e-02 2.77e+03 5.58e+01
angle pdb=" N   LYS A   5 "
      pdb=" CA  LYS A   5 "
      pdb=" C   LYS A   5 "
    ideal   model   delta    sigma   weight residual
   111.00  120.00   -9.00 1.50e+00 4.44e-01 3.60e+01
bond pdb=" CA  LYS A   5 "
     pdb=" C   LYS A   5 "
  ideal  model  delta    sigma   weight residual
  1.525  1.300  0.225 2.10e-02 2.27e+03 1.15e+02
"#;

    #[test]
    fn test_single_bond_outlier() {
        let analysis = analyze(SCENARIO_A, GeometryKind::Bond, &ScanConfig::default()).unwrap();
        assert_eq!(analysis.parsed, 1);
        assert_eq!(analysis.outliers.len(), 1);
        assert!(analysis.outliers[0].report_line().starts_with("Z= 7.50"));
        assert_eq!(
            analysis.residues,
            vec![ResidueKey::new("A", 10), ResidueKey::new("A", 11)]
        );
        assert_eq!(
            analysis.selection,
            "(chain A and resid 10) or (chain A and resid 11)"
        );
    }

    #[test]
    fn test_shared_residue_listed_once() {
        let analysis = analyze(SCENARIO_C, GeometryKind::Bond, &ScanConfig::default()).unwrap();
        assert_eq!(analysis.parsed, 2);
        assert_eq!(analysis.outliers.len(), 2);
        assert_eq!(analysis.residues, vec![ResidueKey::new("A", 5)]);
        assert_eq!(analysis.selection, "(chain A and resid 5)");
    }

    #[test]
    fn test_angle_pipeline() {
        let analysis = analyze(SCENARIO_C, GeometryKind::Angle, &ScanConfig::default()).unwrap();
        assert_eq!(analysis.parsed, 1);
        assert_eq!(analysis.outliers.len(), 1);
        assert!((analysis.outliers[0].z_score - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_outliers_stops_early() {
        let config = ScanConfig {
            threshold: 100.0,
            ..ScanConfig::default()
        };
        let analysis = analyze(SCENARIO_C, GeometryKind::Bond, &config).unwrap();
        assert!(!analysis.has_outliers());
        assert!(analysis.residues.is_empty());
        assert!(analysis.selection.is_empty());
    }

    #[test]
    fn test_malformed_counted_or_fatal() {
        let content = format!(
            "bond pdb=\" N   ALA A   1 \"\n     pdb=\" CA  ALA A   1 \"\n  ideal model\n  1.0 x\n{}",
            SCENARIO_A
        );

        let analysis = analyze(&content, GeometryKind::Bond, &ScanConfig::default()).unwrap();
        assert_eq!(analysis.malformed.len(), 1);
        assert_eq!(analysis.malformed[0].line, 4);
        assert_eq!(analysis.outliers.len(), 1);

        let strict = ScanConfig {
            strict: true,
            ..ScanConfig::default()
        };
        let err = analyze(&content, GeometryKind::Bond, &strict).unwrap_err();
        assert!(matches!(err, GeominselError::MalformedRecord { line: 4, .. }));
    }
}
