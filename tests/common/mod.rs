use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use cultura_base::{Result, prepare_base};

/// Build an all-Utf8 raw batch from named columns, the shape [`load_base`]
/// produces
///
/// [`load_base`]: cultura_base::load_base
#[must_use]
pub fn raw_batch(columns: &[(&str, &[Option<&str>])]) -> RecordBatch {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, _)| Field::new(*name, DataType::Utf8, true))
        .collect();
    let arrays: Vec<ArrayRef> = columns
        .iter()
        .map(|(_, values)| Arc::new(StringArray::from(values.to_vec())) as ArrayRef)
        .collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).expect("valid test batch")
}

/// Prepare a canonical batch straight from named raw columns
pub fn prepared_batch(columns: &[(&str, &[Option<&str>])]) -> Result<RecordBatch> {
    prepare_base(&raw_batch(columns))
}

/// Collect a string column as owned optionals, in row order
#[must_use]
pub fn string_column(batch: &RecordBatch, name: &str) -> Vec<Option<String>> {
    let idx = batch
        .schema()
        .index_of(name)
        .unwrap_or_else(|_| panic!("column '{name}' missing"));
    let array = batch
        .column(idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap_or_else(|| panic!("column '{name}' is not a string array"));
    (0..array.len())
        .map(|row| {
            if array.is_null(row) {
                None
            } else {
                Some(array.value(row).to_string())
            }
        })
        .collect()
}
