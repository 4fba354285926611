//! Descriptive statistics for a single column.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Serialize;

use crate::schema::{Column, ColumnType, Value, ValueKey};

/// Statistics computed for a column.
///
/// Numeric columns carry the [`NumericSummary`] fields; every column carries
/// the mode and the counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    /// Present only for Integer/Float columns.
    #[serde(flatten)]
    pub numeric: Option<NumericSummary>,
    /// Most frequent present value; first occurrence wins ties.
    pub mode: Value,
    /// Number of missing cells.
    pub missing_count: usize,
    /// Number of present cells.
    pub count: usize,
    /// Number of distinct present values.
    pub unique_count: usize,
}

/// Statistics for numeric columns. All fields are null when no value is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    /// Smallest value, typed like the column.
    pub min: Value,
    /// Largest value, typed like the column.
    pub max: Value,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute the statistics of a column according to its declared type.
pub(crate) fn column_stats(column: &Column) -> ColumnStats {
    let (mode, unique_count) = mode_of(column);
    let missing_count = column.missing_count();

    let numeric = if column.column_type.is_numeric() {
        Some(numeric_summary(column))
    } else {
        None
    };

    ColumnStats {
        numeric,
        mode,
        missing_count,
        count: column.len() - missing_count,
        unique_count,
    }
}

fn numeric_summary(column: &Column) -> NumericSummary {
    let mut values = column.numeric_values();
    if values.is_empty() {
        return NumericSummary {
            min: Value::Missing,
            max: Value::Missing,
            mean: None,
            median: None,
        };
    }

    let (min, max) = extrema(column);
    let mean = mean_of(&values);

    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    let median = if values.len() % 2 == 0 {
        values[mid - 1] / 2.0 + values[mid] / 2.0
    } else {
        values[mid]
    };

    NumericSummary {
        min,
        max,
        mean: Some(mean),
        median: Some(median),
    }
}

/// Arithmetic mean, scaling each value first when the plain sum overflows.
fn mean_of(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    }
}

/// Min and max of the present values, keeping integer columns integral.
fn extrema(column: &Column) -> (Value, Value) {
    if column.column_type == ColumnType::Integer {
        let ints: Vec<i64> = column
            .values
            .iter()
            .filter_map(|v| match v {
                Value::Integer(i) => Some(*i),
                _ => None,
            })
            .collect();
        if let (Some(min), Some(max)) = (ints.iter().min(), ints.iter().max()) {
            return (Value::Integer(*min), Value::Integer(*max));
        }
    }

    let mut present = column.present().filter(|v| v.as_f64().is_some());
    let Some(first) = present.next() else {
        return (Value::Missing, Value::Missing);
    };

    let mut min = first;
    let mut max = first;
    for value in present {
        if compare_numeric(value, min) == Ordering::Less {
            min = value;
        }
        if compare_numeric(value, max) == Ordering::Greater {
            max = value;
        }
    }

    (min.clone(), max.clone())
}

fn compare_numeric(a: &Value, b: &Value) -> Ordering {
    let a = a.as_f64().unwrap_or(f64::NAN);
    let b = b.as_f64().unwrap_or(f64::NAN);
    a.total_cmp(&b)
}

/// Most frequent present value and the number of distinct values.
///
/// Among values tied for the highest frequency, the one that occurs first in
/// row order wins.
fn mode_of(column: &Column) -> (Value, usize) {
    let mut value_counts: IndexMap<ValueKey<'_>, (usize, &Value)> = IndexMap::new();
    for value in &column.values {
        if let Some(key) = value.key() {
            value_counts.entry(key).or_insert((0, value)).0 += 1;
        }
    }

    let mut best: Option<(usize, &Value)> = None;
    for &(count, value) in value_counts.values() {
        if best.is_none_or(|(best_count, _)| count > best_count) {
            best = Some((count, value));
        }
    }

    let mode = best.map(|(_, v)| v.clone()).unwrap_or(Value::Missing);
    (mode, value_counts.len())
}
