//! # 几何约束记录数据模型
//!
//! 描述 `.geo` 报告中的一条键长/键角记录，以及通过阈值筛选后的离群记录。
//!
//! ## 依赖关系
//! - 被 `parsers/geo.rs` 生成
//! - 被 `outliers/` 和 `commands/scan.rs` 使用

/// 记录类型：键长或键角
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Bond,
    Angle,
}

impl GeometryKind {
    /// 记录起始行的关键字（行首去空白后匹配）
    pub fn header(&self) -> &'static str {
        match self {
            GeometryKind::Bond => "bond pdb=",
            GeometryKind::Angle => "angle pdb=",
        }
    }

    /// 每条记录包含的原子行数（含起始行）
    pub fn atom_count(&self) -> usize {
        match self {
            GeometryKind::Bond => 2,
            GeometryKind::Angle => 3,
        }
    }

    /// 离群报告文件名
    pub fn outlier_file_name(&self) -> &'static str {
        match self {
            GeometryKind::Bond => "bond_outliers.txt",
            GeometryKind::Angle => "angle_outliers.txt",
        }
    }

    /// 残基选择文件名
    pub fn selection_file_name(&self) -> &'static str {
        match self {
            GeometryKind::Bond => "minimize_selection.txt",
            GeometryKind::Angle => "minimize_selection_angles.txt",
        }
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryKind::Bond => write!(f, "bond"),
            GeometryKind::Angle => write!(f, "angle"),
        }
    }
}

/// 一条解析后的几何约束记录
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRecord {
    pub kind: GeometryKind,

    /// `pdb="..."` 引号内的原子标识，保留原始空白
    pub atoms: Vec<String>,

    pub ideal: f64,
    pub model: f64,
    pub sigma: f64,

    /// 数值列的原始文本，用于报告输出
    pub ideal_text: String,
    pub model_text: String,
    pub sigma_text: String,

    /// 起始行行号 (1-based)
    pub line: usize,
}

impl GeometryRecord {
    /// 计算 z = |model - ideal| / sigma
    ///
    /// sigma 非正或非有限时返回 `None`。
    pub fn z_score(&self) -> Option<f64> {
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return None;
        }
        let z = (self.model - self.ideal).abs() / self.sigma;
        if z.is_nan() {
            None
        } else {
            Some(z)
        }
    }
}

/// 超过阈值的离群记录
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierRecord {
    pub record: GeometryRecord,
    pub z_score: f64,
}

impl OutlierRecord {
    /// 离群报告中的一行
    ///
    /// `Z=<zz.zz>  <atom1> | <atom2> [| <atom3>]  ideal=<v> model=<v> sigma=<v>`
    pub fn report_line(&self) -> String {
        format!(
            "Z={:5.2}  {}  ideal={} model={} sigma={}",
            self.z_score,
            self.record.atoms.join(" | "),
            self.record.ideal_text,
            self.record.model_text,
            self.record.sigma_text,
        )
    }
}
