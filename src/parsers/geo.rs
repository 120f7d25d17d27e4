//! # `.geo` 几何约束报告解析器
//!
//! 解析精修程序输出的几何约束报告，按记录类型（键长/键角）逐条提取记录。
//!
//! ## 记录格式
//! ```text
//! bond pdb=" N   MET A   1 "
//!      pdb=" CA  MET A   1 "
//!   ideal  model  delta    sigma   weight residual
//!   1.458  1.470 -0.012 1.90e-02 2.77e+03 4.15e-01
//! ```
//! 键角记录有 3 行原子，其余相同。数值行按位置取值：第 1 列 ideal，
//! 第 2 列 model，第 4 列 sigma，第 3 列 (delta) 及之后的列忽略。
//!
//! ## 状态机
//! `AwaitHeader -> ReadAtomLines -> SkipLabel -> ReadNumbers -> AwaitHeader`
//!
//! 不完整的记录产生 `MalformedRecord` 后回到 `AwaitHeader`，不会中断整个解析。
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs` 使用
//! - 使用 `models/geometry.rs`

use crate::error::{GeominselError, Result};
use crate::models::{GeometryKind, GeometryRecord};
use std::fs;
use std::iter::Enumerate;
use std::path::Path;
use std::str::Lines;

const ATOM_MARKER: &str = "pdb=\"";

/// 读取报告文件全文
pub fn read_report(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(GeominselError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    fs::read_to_string(path).map_err(|e| GeominselError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 从报告内容中惰性解析指定类型的记录
pub fn parse_records(content: &str, kind: GeometryKind) -> RecordParser<'_> {
    RecordParser::new(content, kind)
}

/// 无法解析的记录
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedRecord {
    /// 出错的行号 (1-based)
    pub line: usize,
    pub reason: String,
}

impl MalformedRecord {
    fn new(line: usize, reason: impl Into<String>) -> Self {
        MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    pub fn into_error(self, kind: GeometryKind) -> GeominselError {
        GeominselError::MalformedRecord {
            kind: kind.to_string(),
            line: self.line,
            reason: self.reason,
        }
    }
}

/// 解析器状态
#[derive(Debug)]
enum State {
    AwaitHeader,
    ReadAtomLines { start: usize, atoms: Vec<String> },
    SkipLabel { start: usize, atoms: Vec<String> },
    ReadNumbers { start: usize, atoms: Vec<String> },
}

/// 单步转移结果
enum Step {
    Continue(State),
    Emit(std::result::Result<GeometryRecord, MalformedRecord>),
}

/// 记录解析器，单次前向遍历
pub struct RecordParser<'a> {
    kind: GeometryKind,
    lines: Enumerate<Lines<'a>>,
    state: State,
    /// 打断上一条记录的起始行，下一轮重新作为记录头处理
    pending: Option<(usize, &'a str)>,
}

impl<'a> RecordParser<'a> {
    pub fn new(content: &'a str, kind: GeometryKind) -> Self {
        RecordParser {
            kind,
            lines: content.lines().enumerate(),
            state: State::AwaitHeader,
            pending: None,
        }
    }

    fn is_header(&self, line: &str) -> bool {
        line.trim_start().starts_with(self.kind.header())
    }

    /// 记录中途遇到新记录头：当前记录作废，新记录头留待下一轮
    fn interrupt(&mut self, start: usize, line_no: usize, line: &'a str) -> Step {
        self.pending = Some((line_no, line));
        Step::Emit(Err(MalformedRecord::new(
            start,
            format!("record interrupted by a new header at line {}", line_no),
        )))
    }

    fn step(&mut self, state: State, line_no: usize, line: &'a str) -> Step {
        match state {
            State::AwaitHeader => {
                if !self.is_header(line) {
                    return Step::Continue(State::AwaitHeader);
                }
                match extract_atom_id(line) {
                    Ok(atom) => Step::Continue(State::ReadAtomLines {
                        start: line_no,
                        atoms: vec![atom],
                    }),
                    Err(reason) => Step::Emit(Err(MalformedRecord::new(line_no, reason))),
                }
            }
            State::ReadAtomLines { start, mut atoms } => {
                if self.is_header(line) {
                    return self.interrupt(start, line_no, line);
                }
                match extract_atom_id(line) {
                    Ok(atom) => {
                        atoms.push(atom);
                        if atoms.len() == self.kind.atom_count() {
                            Step::Continue(State::SkipLabel { start, atoms })
                        } else {
                            Step::Continue(State::ReadAtomLines { start, atoms })
                        }
                    }
                    Err(reason) => Step::Emit(Err(MalformedRecord::new(line_no, reason))),
                }
            }
            State::SkipLabel { start, atoms } => {
                if self.is_header(line) {
                    return self.interrupt(start, line_no, line);
                }
                Step::Continue(State::ReadNumbers { start, atoms })
            }
            State::ReadNumbers { start, atoms } => {
                if self.is_header(line) {
                    return self.interrupt(start, line_no, line);
                }
                let result = parse_numeric_fields(line)
                    .map(|fields| GeometryRecord {
                        kind: self.kind,
                        atoms,
                        ideal: fields.ideal,
                        model: fields.model,
                        sigma: fields.sigma,
                        ideal_text: fields.ideal_text,
                        model_text: fields.model_text,
                        sigma_text: fields.sigma_text,
                        line: start,
                    })
                    .map_err(|reason| MalformedRecord::new(line_no, reason));
                Step::Emit(result)
            }
        }
    }
}

impl<'a> Iterator for RecordParser<'a> {
    type Item = std::result::Result<GeometryRecord, MalformedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next_line = self
                .pending
                .take()
                .or_else(|| self.lines.next().map(|(i, l)| (i + 1, l)));

            let state = std::mem::replace(&mut self.state, State::AwaitHeader);

            let Some((line_no, line)) = next_line else {
                // 文件结束
                return match state {
                    State::AwaitHeader => None,
                    State::ReadAtomLines { start, .. }
                    | State::SkipLabel { start, .. }
                    | State::ReadNumbers { start, .. } => Some(Err(MalformedRecord::new(
                        start,
                        "unexpected end of report inside record",
                    ))),
                };
            };

            match self.step(state, line_no, line) {
                Step::Continue(next) => self.state = next,
                Step::Emit(item) => return Some(item),
            }
        }
    }
}

/// 提取第一个 `pdb="` 与其后第一个 `"` 之间的文本
pub fn extract_atom_id(line: &str) -> std::result::Result<String, String> {
    let start = line
        .find(ATOM_MARKER)
        .ok_or_else(|| "missing pdb=\"...\" atom identifier".to_string())?
        + ATOM_MARKER.len();
    let rest = &line[start..];
    let end = rest
        .find('"')
        .ok_or_else(|| "unterminated pdb=\"...\" atom identifier".to_string())?;
    Ok(rest[..end].to_string())
}

/// 数值行中使用的字段
#[derive(Debug, Clone, PartialEq)]
pub struct NumericFields {
    pub ideal: f64,
    pub model: f64,
    pub sigma: f64,
    pub ideal_text: String,
    pub model_text: String,
    pub sigma_text: String,
}

/// 解析数值行：第 1 列 ideal，第 2 列 model，第 4 列 sigma
pub fn parse_numeric_fields(line: &str) -> std::result::Result<NumericFields, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(format!(
            "expected at least 4 numeric fields, found {}",
            parts.len()
        ));
    }

    let parse = |name: &str, text: &str| -> std::result::Result<f64, String> {
        text.parse::<f64>()
            .map_err(|_| format!("{} value '{}' is not a number", name, text))
    };

    Ok(NumericFields {
        ideal: parse("ideal", parts[0])?,
        model: parse("model", parts[1])?,
        sigma: parse("sigma", parts[3])?,
        ideal_text: parts[0].to_string(),
        model_text: parts[1].to_string(),
        sigma_text: parts[3].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"# Geometry restraints

Bond | covalent geometry | restraints: 2
Sorted by residual:
bond pdb=" N   MET A   1 "
     pdb=" CA  MET A   1 "
  ideal  model  delta    sigma   weight residual
  1.458  1.470 -0.012 1.90e-02 2.77e+03 4.15e-01
bond pdb=" C   GLY B  12 "
     pdb=" O   GLY B  12 "
  ideal  model  delta    sigma   weight residual sym.op.
  1.231  1.236 -0.005 2.00e-02 2.50e+03 6.25e-02 -x,y,-z

Bond angle restraints: 1
Sorted by residual:
angle pdb=" N   MET A   1 "
      pdb=" CA  MET A   1 "
      pdb=" C   MET A   1 "
    ideal   model   delta    sigma   weight residual
   111.00  120.00   -9.00 1.50e+00 4.44e-01 3.60e+01

Nonbonded interactions: 1
nonbonded pdb=" O   HOH S   1 "
          pdb=" N   MET A   1 "
   model   vdw
   2.500 3.040
"#;

    #[test]
    fn test_parse_bonds() {
        let records: Vec<_> = parse_records(REPORT, GeometryKind::Bond)
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.atoms, vec![" N   MET A   1 ", " CA  MET A   1 "]);
        assert!((first.ideal - 1.458).abs() < 1e-12);
        assert!((first.model - 1.470).abs() < 1e-12);
        assert!((first.sigma - 0.019).abs() < 1e-12);
        assert_eq!(first.sigma_text, "1.90e-02");
        assert_eq!(first.line, 5);

        // 带 sym.op. 列的记录仍按位置取值
        assert_eq!(records[1].sigma_text, "2.00e-02");
        assert_eq!(records[1].line, 9);
    }

    #[test]
    fn test_parse_angles() {
        let records: Vec<_> = parse_records(REPORT, GeometryKind::Angle)
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].atoms.len(), 3);
        assert_eq!(records[0].atoms[2], " C   MET A   1 ");
        assert_eq!(records[0].kind, GeometryKind::Angle);
        assert!((records[0].model - 120.0).abs() < 1e-12);
    }

    #[test]
    fn test_extract_atom_id() {
        assert_eq!(
            extract_atom_id(r#"bond pdb=" N   MET A   1 ""#).unwrap(),
            " N   MET A   1 "
        );
        // 只取第一对引号
        assert_eq!(
            extract_atom_id(r#"     pdb="X" pdb="Y""#).unwrap(),
            "X"
        );
        assert!(extract_atom_id("  ideal  model").is_err());
        assert!(extract_atom_id(r#"     pdb=" CA  MET"#).is_err());
    }

    #[test]
    fn test_parse_numeric_fields() {
        let fields = parse_numeric_fields("  1.450  1.600 -0.150 2.00e-02 2.5e+03 56.2").unwrap();
        assert!((fields.ideal - 1.45).abs() < 1e-12);
        assert!((fields.model - 1.60).abs() < 1e-12);
        assert!((fields.sigma - 0.02).abs() < 1e-12);
        assert_eq!(fields.model_text, "1.600");

        assert!(parse_numeric_fields("1.45 1.60 -0.15").is_err());
        assert!(parse_numeric_fields("1.45 abc -0.15 0.02").is_err());
        // delta 列不参与解析
        assert!(parse_numeric_fields("1.45 1.60 n/a 0.02").is_ok());
    }

    #[test]
    fn test_malformed_record_is_skipped() {
        let content = r#"bond pdb=" N   MET A   1 "
     pdb=" CA  MET A   1 "
  ideal  model  delta    sigma
  1.458  oops -0.012 1.90e-02
bond pdb=" C   GLY B  12 "
     pdb=" O   GLY B  12 "
  ideal  model  delta    sigma
  1.231  1.236 -0.005 2.00e-02
"#;
        let items: Vec<_> = parse_records(content, GeometryKind::Bond).collect();
        assert_eq!(items.len(), 2);
        let err = items[0].as_ref().unwrap_err();
        assert_eq!(err.line, 4);
        assert!(items[1].is_ok());
    }

    #[test]
    fn test_interrupted_record_restarts_at_header() {
        let content = r#"bond pdb=" N   MET A   1 "
bond pdb=" C   GLY B  12 "
     pdb=" O   GLY B  12 "
  ideal  model  delta    sigma
  1.231  1.236 -0.005 2.00e-02
"#;
        let items: Vec<_> = parse_records(content, GeometryKind::Bond).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap_err().line, 1);
        let record = items[1].as_ref().unwrap();
        assert_eq!(record.line, 2);
        assert_eq!(record.atoms[0], " C   GLY B  12 ");
    }

    #[test]
    fn test_truncated_report() {
        let content = "angle pdb=\" N   MET A   1 \"\n      pdb=\" CA  MET A   1 \"\n";
        let items: Vec<_> = parse_records(content, GeometryKind::Angle).collect();
        assert_eq!(items.len(), 1);
        let err = items[0].as_ref().unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.reason.contains("end of report"));
    }

    #[test]
    fn test_missing_atom_line() {
        let content = r#"angle pdb=" N   MET A   1 "
      pdb=" CA  MET A   1 "
    ideal   model   delta    sigma   weight residual
   111.00  120.00   -9.00 1.50e+00 4.44e-01 3.60e+01
"#;
        let items: Vec<_> = parse_records(content, GeometryKind::Angle).collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_ref().unwrap_err().line, 3);
    }

    #[test]
    fn test_read_report_missing_file() {
        let err = read_report(Path::new("/nonexistent/model.geo")).unwrap_err();
        assert!(matches!(err, GeominselError::FileNotFound { .. }));
    }
}
