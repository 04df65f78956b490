//! Criterion evaluation against the canonical batch

use arrow::array::{Array, BooleanArray, ListArray, StringArray};
use arrow::record_batch::RecordBatch;
use log::warn;
use rustc_hash::FxHashSet;

use crate::error::{Result, column_type_error};
use crate::filter::core::{all_false, all_true, mask_and, mask_or};
use crate::filter::criteria::Criterion;
use crate::utils::{get_column, truthy_mask};

/// Evaluate a single criterion to a row mask
///
/// # Arguments
/// * `batch` - The canonical batch
/// * `criterion` - The constraint to evaluate
///
/// # Returns
/// A boolean array indicating which rows match the criterion
///
/// # Errors
/// Returns an error when a present column has an unexpected type; missing
/// columns degrade instead (see each variant)
pub fn evaluate_criterion(batch: &RecordBatch, criterion: &Criterion) -> Result<BooleanArray> {
    let num_rows = batch.num_rows();

    match criterion {
        Criterion::MultiSelect { field, values } => {
            if values.is_empty() {
                return Ok(all_true(num_rows));
            }
            let Some(column) = get_column(batch, field) else {
                warn!("Filter field '{field}' not in batch, active selection matches nothing");
                return Ok(all_false(num_rows));
            };
            let Some(strings) = column.as_any().downcast_ref::<StringArray>() else {
                return column_type_error(field, "string");
            };

            let accepted: FxHashSet<&str> = values.iter().map(String::as_str).collect();
            let mask: Vec<bool> = (0..num_rows)
                .map(|row| !strings.is_null(row) && accepted.contains(strings.value(row)))
                .collect();
            Ok(BooleanArray::from(mask))
        }

        Criterion::ListContainsAny { field, values } => {
            if values.is_empty() {
                return Ok(all_true(num_rows));
            }
            let Some(column) = get_column(batch, field) else {
                warn!("Filter field '{field}' not in batch, active selection matches nothing");
                return Ok(all_false(num_rows));
            };
            let Some(lists) = column.as_any().downcast_ref::<ListArray>() else {
                return column_type_error(field, "list");
            };

            let accepted: FxHashSet<&str> = values.iter().map(String::as_str).collect();
            let mut mask = Vec::with_capacity(num_rows);
            for row in 0..num_rows {
                if lists.is_null(row) {
                    mask.push(false);
                    continue;
                }
                let items = lists.value(row);
                let Some(items) = items.as_any().downcast_ref::<StringArray>() else {
                    return column_type_error(field, "list-of-string");
                };
                let hit = (0..items.len())
                    .any(|i| !items.is_null(i) && accepted.contains(items.value(i)));
                mask.push(hit);
            }
            Ok(BooleanArray::from(mask))
        }

        Criterion::OrGroup { columns } => {
            if columns.is_empty() {
                // an active selection that resolved to no columns keeps nothing
                return Ok(all_false(num_rows));
            }

            let mut mask = all_false(num_rows);
            let mut found_any = false;
            for name in columns {
                let Some(column) = get_column(batch, name) else {
                    warn!("OR-group column '{name}' not in batch, skipped");
                    continue;
                };
                found_any = true;
                mask = mask_or(&mask, &truthy_mask(&column))?;
            }
            if !found_any {
                // none of the named columns exist: the feature is unavailable
                // and the group imposes no constraint
                return Ok(all_true(num_rows));
            }
            Ok(mask)
        }

        Criterion::BooleanFlag { column, value } => {
            let Some(array) = get_column(batch, column) else {
                warn!("Boolean filter column '{column}' not in batch, filter skipped");
                return Ok(all_true(num_rows));
            };
            let truthy = truthy_mask(&array);
            if value.as_bool() {
                Ok(truthy)
            } else {
                let mask: Vec<bool> = (0..num_rows).map(|row| !truthy.value(row)).collect();
                Ok(BooleanArray::from(mask))
            }
        }
    }
}

/// Fold a list of criteria into one AND mask
///
/// An empty list yields the all-true mask (identity filter).
///
/// # Errors
/// Propagates evaluation failures
pub fn combined_mask(batch: &RecordBatch, criteria: &[Criterion]) -> Result<BooleanArray> {
    let mut mask = all_true(batch.num_rows());
    for criterion in criteria {
        let step = evaluate_criterion(batch, criterion)?;
        mask = mask_and(&mask, &step)?;
    }
    Ok(mask)
}
