//! Filtering of the canonical survey base
//!
//! Criteria compose with AND across fields and OR within a multi-select
//! field. Application is a single mask intersection, so criterion order
//! never changes the result and applying the same criteria twice is
//! idempotent. An empty criteria list returns the batch's rows unchanged.

pub mod core;
pub mod criteria;
pub mod eval;

use arrow::record_batch::RecordBatch;

use crate::catalog::ActionOption;
use crate::error::Result;

pub use self::core::filter_record_batch;
pub use criteria::{Criterion, FilterSet};
pub use eval::{combined_mask, evaluate_criterion};

/// Apply a list of criteria to the canonical batch
///
/// # Arguments
/// * `batch` - The canonical batch
/// * `criteria` - The constraints, combined with AND
///
/// # Returns
/// A new batch containing only the rows matching every criterion
///
/// # Errors
/// Returns an error when a present column has an unexpected type or a
/// kernel fails; missing columns degrade per criterion
pub fn apply_criteria(batch: &RecordBatch, criteria: &[Criterion]) -> Result<RecordBatch> {
    let mask = combined_mask(batch, criteria)?;
    filter_record_batch(batch, &mask)
}

/// Lower a named selection and apply it in one step
///
/// # Arguments
/// * `batch` - The canonical batch
/// * `filters` - The named selection
/// * `actions` - The catalog's structuring-action options
///
/// # Errors
/// See [`apply_criteria`]
pub fn apply_filter_set(
    batch: &RecordBatch,
    filters: &FilterSet,
    actions: &[ActionOption],
) -> Result<RecordBatch> {
    apply_criteria(batch, &filters.to_criteria(actions))
}
