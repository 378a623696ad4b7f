use regex::Regex;
use std::fmt::Debug;

use crate::errors::{GeoCsvError, Result};

pub type Row = Vec<String>;

/// Per-row hook of the row reader. Gets the row and its zero-based index and returns either the (possibly
/// replaced) row, or `None` to skip it.
pub trait TransformRow: Debug {
    fn transform(&self, row: Row, row_idx: usize) -> Option<Row>;
    fn get_self_info(&self) -> String {
        format!("{self:?}")
    }
}

pub type VecOfRowTransforms = Vec<Box<dyn TransformRow + Send + Sync>>;

#[derive(Debug)]
pub struct SkipRowsFromStart {
    skip_num_rows: usize,
}
impl SkipRowsFromStart {
    pub fn new(skip_num_rows: usize) -> Self {
        Self { skip_num_rows }
    }
}
impl TransformRow for SkipRowsFromStart {
    fn transform(&self, row: Row, row_idx: usize) -> Option<Row> {
        (row_idx >= self.skip_num_rows).then_some(row)
    }
}

/// Checks the first field only, e.g. to skip `#` comment rows.
#[derive(Debug)]
pub struct SkipRowsStartingWith {
    starts_with: String,
}
impl SkipRowsStartingWith {
    pub fn new<T>(starts_with: T) -> Self
    where
        T: Into<String> + Debug,
    {
        Self {
            starts_with: starts_with.into(),
        }
    }
}
impl TransformRow for SkipRowsStartingWith {
    fn transform(&self, row: Row, _row_idx: usize) -> Option<Row> {
        match row.first() {
            Some(first) if first.starts_with(&self.starts_with) => None,
            _ => Some(row),
        }
    }
}

/// Skips the row if any of its fields matches.
#[derive(Debug)]
pub struct SkipRowsByRegex {
    regex: Regex,
}
impl SkipRowsByRegex {
    pub fn new<T>(regex_pattern: T) -> Result<Self>
    where
        T: AsRef<str> + Debug,
    {
        let re = Regex::new(regex_pattern.as_ref()).map_err(|e| {
            GeoCsvError::ConfigError {msg: format!("[ERROR_ON_REGEX_COMPILE] Cannot create SkipRowsByRegex by given regex str={}. Error: {}", regex_pattern.as_ref(), e)}
        })?;
        Ok(Self { regex: re })
    }
}
impl TransformRow for SkipRowsByRegex {
    fn transform(&self, row: Row, _row_idx: usize) -> Option<Row> {
        if row.iter().any(|field| self.regex.is_match(field)) {
            None
        } else {
            Some(row)
        }
    }
}

/// A row where every field is empty, e.g. a blank line or `,,`.
#[derive(Debug, Default)]
pub struct SkipEmptyRows;
impl TransformRow for SkipEmptyRows {
    fn transform(&self, row: Row, _row_idx: usize) -> Option<Row> {
        if row.iter().all(|field| field.is_empty()) {
            None
        } else {
            Some(row)
        }
    }
}

#[derive(Debug, Default)]
pub struct TrimFields;
impl TransformRow for TrimFields {
    fn transform(&self, row: Row, _row_idx: usize) -> Option<Row> {
        Some(row.into_iter().map(|field| field.trim().to_string()).collect())
    }
}

/// Applies all transforms in order. The first one that skips wins.
#[derive(Debug, Default)]
pub struct TransformChain {
    transforms: VecOfRowTransforms,
}
impl TransformChain {
    pub fn new(transforms: VecOfRowTransforms) -> Self {
        Self { transforms }
    }
    pub fn push(&mut self, t: Box<dyn TransformRow + Send + Sync>) {
        self.transforms.push(t);
    }
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}
impl TransformRow for TransformChain {
    fn transform(&self, row: Row, row_idx: usize) -> Option<Row> {
        self.transforms
            .iter()
            .try_fold(row, |acc, t| t.transform(acc, row_idx))
    }
}

/// Wraps a plain function or closure, so it can be used as a `TransformRow`.
pub struct RowFn<F>(pub F)
where
    F: Fn(Row, usize) -> Option<Row>;

impl<F> Debug for RowFn<F>
where
    F: Fn(Row, usize) -> Option<Row>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RowFn")
    }
}
impl<F> TransformRow for RowFn<F>
where
    F: Fn(Row, usize) -> Option<Row>,
{
    fn transform(&self, row: Row, row_idx: usize) -> Option<Row> {
        (self.0)(row, row_idx)
    }
}
