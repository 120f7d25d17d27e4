//! # 选择表达式构建
//!
//! 每个残基生成 `(chain <C> and resid <N>)` 子句，用 ` or ` 连接。
//!
//! ## 依赖关系
//! - 被 `outliers/mod.rs` 使用
//! - 使用 `models/residue.rs`

use crate::models::ResidueKey;

/// 构建选择表达式，空输入返回空字符串
pub fn build_selection(residues: &[ResidueKey]) -> String {
    residues
        .iter()
        .map(ResidueKey::clause)
        .collect::<Vec<_>>()
        .join(" or ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_selection() {
        let residues = vec![ResidueKey::new("A", 10), ResidueKey::new("A", 11)];
        assert_eq!(
            build_selection(&residues),
            "(chain A and resid 10) or (chain A and resid 11)"
        );
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(
            build_selection(&[ResidueKey::new("B", 3)]),
            "(chain B and resid 3)"
        );
        assert_eq!(build_selection(&[]), "");
    }

    #[test]
    fn test_clause_count_matches_residues() {
        let residues: Vec<ResidueKey> = (1..=7).map(|n| ResidueKey::new("C", n)).collect();
        let selection = build_selection(&residues);
        assert_eq!(selection.split(" or ").count(), residues.len());
        assert!(!selection.starts_with(" or") && !selection.ends_with("or "));
        assert!(selection.split(" or ").all(|c| !c.trim().is_empty()));
    }
}
