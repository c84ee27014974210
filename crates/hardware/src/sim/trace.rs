//! Branch trace input.
//!
//! A trace is a text stream with one resolved branch per line, in program
//! order. Two line formats are accepted, with numbers in hexadecimal
//! (an optional `0x` prefix is allowed):
//!
//! ```text
//! <pc> <outcome>
//! <pc> <target> <outcome> <conditional> <call> <ret> <direct>
//! ```
//!
//! The short form describes a conditional branch. Flags are `0` or non-zero.
//! Blank lines and lines starting with `#` are skipped.

use std::io::{BufRead, Lines};

use crate::common::error::TraceError;

/// One resolved branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BranchRecord {
    /// Branch instruction address.
    pub pc: u32,
    /// Branch target address (0 when the trace does not record it).
    pub target: u32,
    /// Branch was taken.
    pub outcome: bool,
    /// Branch is conditional.
    pub conditional: bool,
    /// Branch is a call.
    pub call: bool,
    /// Branch is a return.
    pub ret: bool,
    /// Branch target is encoded in the instruction.
    pub direct: bool,
}

impl BranchRecord {
    /// A conditional branch with no target information.
    pub const fn conditional(pc: u32, outcome: bool) -> Self {
        Self {
            pc,
            target: 0,
            outcome,
            conditional: true,
            call: false,
            ret: false,
            direct: true,
        }
    }

    /// Parses one non-comment trace line.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Malformed`] naming `line` if the field count or
    /// any field is invalid.
    pub fn parse(text: &str, line: usize) -> Result<Self, TraceError> {
        let malformed = |reason: String| TraceError::Malformed { line, reason };
        let fields: Vec<&str> = text.split_whitespace().collect();

        let number = |field: &str| -> Result<u32, TraceError> {
            let digits = field
                .strip_prefix("0x")
                .or_else(|| field.strip_prefix("0X"))
                .unwrap_or(field);
            u32::from_str_radix(digits, 16)
                .map_err(|e| malformed(format!("invalid number '{field}': {e}")))
        };
        let outcome = |field: &str| -> Result<bool, TraceError> {
            match field {
                "0" => Ok(false),
                "1" => Ok(true),
                _ => Err(malformed(format!("outcome must be 0 or 1, got '{field}'"))),
            }
        };
        let flag = |field: &str| number(field).map(|v| v != 0);

        match fields.as_slice() {
            &[pc, taken] => Ok(Self::conditional(number(pc)?, outcome(taken)?)),
            &[pc, target, taken, conditional, call, ret, direct] => Ok(Self {
                pc: number(pc)?,
                target: number(target)?,
                outcome: outcome(taken)?,
                conditional: flag(conditional)?,
                call: flag(call)?,
                ret: flag(ret)?,
                direct: flag(direct)?,
            }),
            other => Err(malformed(format!(
                "expected 2 or 7 fields, found {}",
                other.len()
            ))),
        }
    }
}

/// Iterator over the records of a text trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;

            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Some(BranchRecord::parse(trimmed, self.line));
        }
    }
}
