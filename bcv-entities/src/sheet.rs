use std::{fmt, str::FromStr};
use thiserror::Error;

/// An A1-notation range of whole columns, e.g. `C:I`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    first: usize,
    last: usize,
}

impl ColumnRange {
    pub fn new(first: usize, last: usize) -> Option<Self> {
        (first <= last).then_some(Self { first, last })
    }

    /// Range between two columns in either order.
    pub const fn spanning(a: usize, b: usize) -> Self {
        if a <= b {
            Self { first: a, last: b }
        } else {
            Self { first: b, last: a }
        }
    }

    pub const fn single(column: usize) -> Self {
        Self {
            first: column,
            last: column,
        }
    }

    /// Zero-based index of the first column (`A` = 0).
    pub const fn first(self) -> usize {
        self.first
    }

    /// Zero-based index of the last column.
    pub const fn last(self) -> usize {
        self.last
    }

    pub const fn width(self) -> usize {
        self.last - self.first + 1
    }
}

#[derive(Debug, Error)]
#[error("Invalid column range '{0}'")]
pub struct ColumnRangeParseError(String);

fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    letters
        .chars()
        .try_fold(0usize, |acc, c| {
            let c = c.to_ascii_uppercase();
            if !c.is_ascii_uppercase() {
                return None;
            }
            acc.checked_mul(26)?
                .checked_add(c as usize - 'A' as usize + 1)
        })
        .map(|idx| idx - 1)
}

fn column_letters(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.iter().rev().collect()
}

impl FromStr for ColumnRange {
    type Err = ColumnRangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColumnRangeParseError(s.to_string());
        let (first, last) = s.trim().split_once(':').ok_or_else(err)?;
        let first = column_index(first).ok_or_else(err)?;
        let last = column_index(last).ok_or_else(err)?;
        Self::new(first, last).ok_or_else(err)
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "{}:{}",
            column_letters(self.first),
            column_letters(self.last)
        )
    }
}

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl CellValue {
    pub fn blank() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One row of cells as appended to a spreadsheet.
pub type SheetRow = Vec<CellValue>;
