//! Core mask-based filtering over record batches
//!
//! Every criterion evaluates to a boolean mask; masks are combined with
//! Arrow's vectorized kernels and applied to all columns at once.

use arrow::array::{ArrayRef, BooleanArray};
use arrow::compute::filter as arrow_filter;
use arrow::compute::{and, or};
use arrow::record_batch::RecordBatch;

use crate::error::{BaseReaderError, Result, filter_err};

/// A mask that keeps every row
#[must_use]
pub fn all_true(num_rows: usize) -> BooleanArray {
    BooleanArray::from(vec![true; num_rows])
}

/// A mask that drops every row
#[must_use]
pub fn all_false(num_rows: usize) -> BooleanArray {
    BooleanArray::from(vec![false; num_rows])
}

/// Combine two masks with a logical AND
///
/// # Errors
/// Returns an error if the masks have different lengths
pub fn mask_and(left: &BooleanArray, right: &BooleanArray) -> Result<BooleanArray> {
    and(left, right).map_err(|e| BaseReaderError::filter_error(e.to_string()).into())
}

/// Combine two masks with a logical OR
///
/// # Errors
/// Returns an error if the masks have different lengths
pub fn mask_or(left: &BooleanArray, right: &BooleanArray) -> Result<BooleanArray> {
    or(left, right).map_err(|e| BaseReaderError::filter_error(e.to_string()).into())
}

/// Filter a record batch based on a boolean mask
///
/// # Arguments
/// * `batch` - The record batch to filter
/// * `mask` - The boolean mask indicating which rows to keep
///
/// # Returns
/// A new record batch with only rows where mask is true
///
/// # Errors
/// Returns an error if the mask length does not match the batch or if the
/// kernel fails
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return filter_err(format!(
            "Mask length ({}) doesn't match batch row count ({})",
            mask.len(),
            batch.num_rows()
        ));
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<arrow::error::Result<_>>()
        .map_err(|e| BaseReaderError::filter_error(e.to_string()))?;

    RecordBatch::try_new(batch.schema(), filtered_columns)
        .map_err(|e| BaseReaderError::filter_error(e.to_string()).into())
}
