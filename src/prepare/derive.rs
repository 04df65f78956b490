//! Derivation of the canonical columns
//!
//! Each function builds one derived column from an optional source column.
//! A missing source never fails: the derived column still exists, filled
//! with null / false / `Sem dado` as appropriate for its type.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float64Array, ListBuilder, StringArray, StringBuilder,
};

use crate::model::{self, vocab};
use crate::text::{normalize, repair_mojibake, split_multi_select};
use crate::utils::{string_cell, truthy_mask};

/// An all-null string column of the given length
#[must_use]
pub fn all_null_strings(num_rows: usize) -> ArrayRef {
    Arc::new(StringArray::from(vec![None::<&str>; num_rows]))
}

/// Copy a source column, mapping blank cells to null
#[must_use]
pub fn copy_strings(source: Option<&StringArray>, num_rows: usize) -> ArrayRef {
    match source {
        None => all_null_strings(num_rows),
        Some(array) => Arc::new(StringArray::from_iter(
            (0..num_rows).map(|row| string_cell(Some(array), row).map(str::to_string)),
        )),
    }
}

/// Derive the validated two-letter state code
///
/// Values are trimmed and uppercased; anything that is not exactly two
/// ASCII letters becomes null rather than a guess.
#[must_use]
pub fn derive_uf(source: Option<&StringArray>, num_rows: usize) -> StringArray {
    StringArray::from_iter((0..num_rows).map(|row| {
        let raw = string_cell(source, row)?;
        let code = raw.trim().to_ascii_uppercase();
        let valid = code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase());
        valid.then_some(code)
    }))
}

/// Derive the macro-region from the validated state code
#[must_use]
pub fn derive_region(uf: &StringArray) -> ArrayRef {
    Arc::new(StringArray::from_iter((0..uf.len()).map(|row| {
        string_cell(Some(uf), row).and_then(model::region_for_uf)
    })))
}

/// Derive the point-vs-hub classification
///
/// A row is a `Pontão` when the hub-flag column answers "sim"; any other
/// answer, including a null cell, is a `Ponto`. With no hub-flag column at
/// all the whole derived column is null.
#[must_use]
pub fn derive_tipo_ponto(source: Option<&StringArray>, num_rows: usize) -> ArrayRef {
    let Some(array) = source else {
        return all_null_strings(num_rows);
    };
    Arc::new(StringArray::from_iter((0..num_rows).map(|row| {
        let kind = match string_cell(Some(array), row) {
            Some(value) if normalize(value) == "sim" => vocab::PONTAO,
            _ => vocab::PONTO,
        };
        Some(kind)
    })))
}

/// Parse the multi-select language cell into a list column
///
/// Null cells become empty lists, never null lists.
#[must_use]
pub fn derive_language_list(source: Option<&StringArray>, num_rows: usize) -> ArrayRef {
    let mut builder = ListBuilder::new(StringBuilder::new());
    for row in 0..num_rows {
        if let Some(cell) = string_cell(source, row) {
            for part in split_multi_select(cell) {
                builder.values().append_value(part);
            }
        }
        builder.append(true);
    }
    Arc::new(builder.finish())
}

/// Copy the revenue bracket, substituting the verbose no-revenue label
#[must_use]
pub fn derive_revenue(source: Option<&StringArray>, num_rows: usize) -> ArrayRef {
    Arc::new(StringArray::from_iter((0..num_rows).map(|row| {
        let value = string_cell(source, row)?;
        if value.trim() == vocab::REVENUE_NO_INCOME_VERBOSE {
            Some(vocab::REVENUE_NO_INCOME.to_string())
        } else {
            Some(value.to_string())
        }
    })))
}

/// Coerce the population column to numbers; unparseable cells become null
#[must_use]
pub fn derive_population(source: Option<&StringArray>, num_rows: usize) -> Float64Array {
    Float64Array::from_iter(
        (0..num_rows).map(|row| string_cell(source, row).and_then(|v| v.trim().parse::<f64>().ok())),
    )
}

/// Bucket the population into the fixed ordered brackets
#[must_use]
pub fn derive_population_bracket(population: &Float64Array) -> ArrayRef {
    Arc::new(StringArray::from_iter((0..population.len()).map(|row| {
        if population.is_null(row) {
            return Some(vocab::SEM_DADO);
        }
        let pop = population.value(row);
        let bracket = if pop <= 5_000.0 {
            vocab::POPULATION_BRACKETS[0]
        } else if pop <= 10_000.0 {
            vocab::POPULATION_BRACKETS[1]
        } else if pop <= 20_000.0 {
            vocab::POPULATION_BRACKETS[2]
        } else if pop <= 50_000.0 {
            vocab::POPULATION_BRACKETS[3]
        } else if pop <= 100_000.0 {
            vocab::POPULATION_BRACKETS[4]
        } else if pop <= 500_000.0 {
            vocab::POPULATION_BRACKETS[5]
        } else {
            vocab::POPULATION_BRACKETS[6]
        };
        Some(bracket)
    })))
}

/// Reuse an existing bracket column, repairing latin1 mojibake per cell
#[must_use]
pub fn repair_bracket_column(source: &StringArray) -> ArrayRef {
    Arc::new(StringArray::from_iter((0..source.len()).map(|row| {
        string_cell(Some(source), row).map(repair_mojibake)
    })))
}

/// Classify rural vs urban with the fixed 50 000 threshold
///
/// Exactly 50 000 inhabitants is still `Rural`; `Urbano` starts above it.
#[must_use]
pub fn derive_rural_urban(population: &Float64Array) -> ArrayRef {
    Arc::new(StringArray::from_iter((0..population.len()).map(|row| {
        if population.is_null(row) {
            return Some(vocab::SEM_DADO);
        }
        if population.value(row) > 50_000.0 {
            Some(vocab::URBANO)
        } else {
            Some(vocab::RURAL)
        }
    })))
}

/// Coerce a boolean-like source column into a real boolean column
///
/// Missing source columns degrade to all-false.
#[must_use]
pub fn coerce_bool(source: Option<&ArrayRef>, num_rows: usize) -> ArrayRef {
    match source {
        None => Arc::new(BooleanArray::from(vec![false; num_rows])),
        Some(column) => Arc::new(truthy_mask(column)),
    }
}
