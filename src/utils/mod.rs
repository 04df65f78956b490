//! Utilities for working with Arrow arrays of the survey base
//!
//! Safe column access and the value coercions shared by the preparer, the
//! filter engine and the catalog.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::text::normalize;

/// Get a column from a record batch by name
///
/// # Arguments
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to look up
///
/// # Returns
/// The column array, or `None` when the batch has no such column
#[must_use]
pub fn get_column(batch: &RecordBatch, column_name: &str) -> Option<ArrayRef> {
    let idx = batch.schema().index_of(column_name).ok()?;
    Some(Arc::clone(batch.column(idx)))
}

/// Get a string column from a record batch by name
///
/// Returns `None` when the column is absent or not a string array.
#[must_use]
pub fn get_string_column(batch: &RecordBatch, column_name: &str) -> Option<StringArray> {
    let column = get_column(batch, column_name)?;
    column
        .as_any()
        .downcast_ref::<StringArray>()
        .map(StringArray::clone)
}

/// Read a cell from an optional string column, treating blanks as null
#[must_use]
pub fn string_cell<'a>(column: Option<&'a StringArray>, row: usize) -> Option<&'a str> {
    let array = column?;
    if row >= array.len() || array.is_null(row) {
        return None;
    }
    let value = array.value(row);
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Coerce a column of any supported type into a boolean mask
///
/// The survey encodes booleans inconsistently: true boolean columns,
/// yes/no-ish strings and numeric 0/1 all occur. Accepted string spellings
/// are {"sim", "true", "1", "yes"}, compared after normalization; numbers
/// are truthy when non-zero. Nulls and unsupported types coerce to false.
#[must_use]
pub fn truthy_mask(column: &ArrayRef) -> BooleanArray {
    let len = column.len();

    if let Some(bools) = column.as_any().downcast_ref::<BooleanArray>() {
        let values: Vec<bool> = (0..len)
            .map(|i| !bools.is_null(i) && bools.value(i))
            .collect();
        return BooleanArray::from(values);
    }

    if let Some(strings) = column.as_any().downcast_ref::<StringArray>() {
        let values: Vec<bool> = (0..len)
            .map(|i| {
                if strings.is_null(i) {
                    return false;
                }
                matches!(normalize(strings.value(i)).as_str(), "sim" | "true" | "1" | "yes")
            })
            .collect();
        return BooleanArray::from(values);
    }

    if let Some(floats) = column.as_any().downcast_ref::<Float64Array>() {
        let values: Vec<bool> = (0..len)
            .map(|i| !floats.is_null(i) && floats.value(i) != 0.0)
            .collect();
        return BooleanArray::from(values);
    }

    if let Some(ints) = column.as_any().downcast_ref::<Int64Array>() {
        let values: Vec<bool> = (0..len)
            .map(|i| !ints.is_null(i) && ints.value(i) != 0)
            .collect();
        return BooleanArray::from(values);
    }

    if let Some(ints) = column.as_any().downcast_ref::<Int32Array>() {
        let values: Vec<bool> = (0..len)
            .map(|i| !ints.is_null(i) && ints.value(i) != 0)
            .collect();
        return BooleanArray::from(values);
    }

    BooleanArray::from(vec![false; len])
}

/// Collect the sorted distinct non-blank values of a string column
///
/// Absent columns yield an empty list; callers degrade.
#[must_use]
pub fn distinct_strings(batch: &RecordBatch, column_name: &str) -> Vec<String> {
    let Some(column) = get_string_column(batch, column_name) else {
        return Vec::new();
    };

    (0..column.len())
        .filter_map(|i| string_cell(Some(&column), i))
        .map(str::to_string)
        .unique()
        .sorted()
        .collect()
}
