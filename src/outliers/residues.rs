//! # 残基提取
//!
//! 从离群记录的原子标识中提取 (链, 残基号)，去重并排序。
//!
//! 原子标识按自由文本处理，不依赖固定列位置：匹配
//! `[残基名] 链 残基号` 三个以空白分隔的词，链为单个字母或数字，
//! 残基号为纯数字；残基名参与匹配但被丢弃。
//!
//! ## 依赖关系
//! - 被 `outliers/mod.rs` 使用
//! - 使用 `models/residue.rs`
//! - 使用 `regex` crate

use crate::models::{OutlierRecord, ResidueKey};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static RESIDUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(?:\S+\s+)?([A-Za-z0-9])\s+(\d+)(?:\s|$)").unwrap()
});

/// 提取结果
#[derive(Debug, Clone, Default)]
pub struct ResidueExtraction {
    /// 去重后按链、残基号升序排列
    pub residues: Vec<ResidueKey>,
    /// 不含链/残基信息的原子标识
    pub unmatched: Vec<String>,
}

/// 从单个原子标识提取残基键
pub fn residue_key(atom_id: &str) -> Option<ResidueKey> {
    let caps = RESIDUE_PATTERN.captures(atom_id)?;
    let chain = caps.get(1)?.as_str();
    let number = caps.get(2)?.as_str().parse::<u32>().ok()?;
    Some(ResidueKey::new(chain, number))
}

/// 从全部离群记录中提取残基
pub fn extract_residues(outliers: &[OutlierRecord]) -> ResidueExtraction {
    let mut seen: BTreeSet<ResidueKey> = BTreeSet::new();
    let mut unmatched = Vec::new();

    for atom in outliers.iter().flat_map(|o| o.record.atoms.iter()) {
        match residue_key(atom) {
            Some(key) => {
                seen.insert(key);
            }
            None => unmatched.push(atom.clone()),
        }
    }

    ResidueExtraction {
        residues: seen.into_iter().collect(),
        unmatched,
    }
}

/// 残基选择文件全文：每行 `chain <C> and resid <N>`
pub fn format_selection_file(residues: &[ResidueKey]) -> String {
    residues.iter().map(|r| format!("{}\n", r)).collect()
}
