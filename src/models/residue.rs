//! # 残基键
//!
//! (链, 残基号) 组合键，派生的 `Ord` 先按链字典序、再按残基号数值排序。
//!
//! ## 依赖关系
//! - 被 `outliers/residues.rs` 生成
//! - 被 `outliers/selection.rs` 使用

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResidueKey {
    pub chain: String,
    pub residue_number: u32,
}

impl ResidueKey {
    pub fn new(chain: impl Into<String>, residue_number: u32) -> Self {
        ResidueKey {
            chain: chain.into(),
            residue_number,
        }
    }

    /// 选择表达式子句 `(chain A and resid 10)`
    pub fn clause(&self) -> String {
        format!("({})", self)
    }
}

/// `chain A and resid 10`，即选择文件中的一行
impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain {} and resid {}", self.chain, self.residue_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_numeric_within_chain() {
        let mut keys = vec![
            ResidueKey::new("B", 2),
            ResidueKey::new("A", 100),
            ResidueKey::new("A", 9),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                ResidueKey::new("A", 9),
                ResidueKey::new("A", 100),
                ResidueKey::new("B", 2),
            ]
        );
    }

    #[test]
    fn test_display_and_clause() {
        let key = ResidueKey::new("A", 10);
        assert_eq!(key.to_string(), "chain A and resid 10");
        assert_eq!(key.clause(), "(chain A and resid 10)");
    }
}
