//! Loading and preparation of the survey base
//!
//! [`load_base`] reads the CSV export into an all-Utf8 record batch (the
//! dataset is loosely typed by design, so no type inference happens at the
//! edge). [`prepare_base`] overlays the canonical derived columns on the raw
//! batch. [`BaseCache`] memoizes the prepared batch behind an explicit
//! version tag.

mod derive;

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use arrow::array::{ArrayRef, StringArray};
use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::{debug, info};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::config::BaseReaderConfig;
use crate::error::{BaseReaderError, Result};
use crate::model::columns;
use crate::schema::ResolvedColumns;
use crate::utils::{get_column, get_string_column};

/// UTF-8 byte-order mark some exports carry
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Load the raw survey base from a CSV export
///
/// # Arguments
/// * `path` - Path to the CSV file (UTF-8, optionally with BOM)
/// * `config` - Reader configuration
///
/// # Returns
/// A single record batch with every column as nullable Utf8
///
/// # Errors
/// Returns an error if the file cannot be read or the CSV structure is
/// malformed. Loose *values* never fail; typing happens in [`prepare_base`].
pub fn load_base(path: &Path, config: &BaseReaderConfig) -> Result<RecordBatch> {
    info!("Loading survey base from {}", path.display());

    let data = fs::read(path).map_err(|e| {
        BaseReaderError::io_error_with_source("Failed to read base file", e).with_path(path)
    })?;
    let data = match data.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_vec(),
        None => data,
    };

    let format = Format::default().with_header(true);
    let (inferred, _) = format
        .infer_schema(Cursor::new(&data), Some(100))
        .map_err(|e| BaseReaderError::csv_error(format!("Failed to parse CSV header: {e}")))?;
    if inferred.fields().is_empty() {
        return Err(BaseReaderError::csv_error("CSV file has no header row").into());
    }

    // Re-type every column as nullable Utf8; the inferred types are ignored
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_format(format)
        .with_batch_size(config.batch_size)
        .build(Cursor::new(&data))
        .map_err(|e| BaseReaderError::csv_error(format!("Failed to open CSV reader: {e}")))?;

    let batches: Vec<RecordBatch> = reader
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Failed to decode CSV records from {}", path.display()))?;

    let batch = if batches.is_empty() {
        RecordBatch::new_empty(schema)
    } else {
        concat_batches(&schema, &batches).context("Failed to concatenate CSV batches")?
    };

    info!(
        "Loaded {} rows and {} columns from {}",
        batch.num_rows(),
        batch.num_columns(),
        path.display()
    );
    Ok(batch)
}

/// Overlay the canonical derived columns on the raw batch
///
/// Every derived column listed in [`crate::model::columns`] exists in the
/// output even when its source column is entirely absent from the raw table.
/// Raw columns whose name collides with a derived column are replaced; all
/// others are carried through unchanged.
///
/// # Errors
/// Returns an error only on Arrow-level assembly failure; missing or
/// malformed source data degrades per column instead.
pub fn prepare_base(raw: &RecordBatch) -> Result<RecordBatch> {
    let headers: Vec<String> = raw
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let cols = ResolvedColumns::resolve(&headers);
    cols.log_missing();

    let num_rows = raw.num_rows();
    let source = |name: &Option<String>| -> Option<StringArray> {
        name.as_ref().and_then(|n| get_string_column(raw, n))
    };

    let estado = derive::copy_strings(source(&cols.estado).as_ref(), num_rows);
    let cidade = derive::copy_strings(source(&cols.cidade_api).as_ref(), num_rows);
    let uf = derive::derive_uf(source(&cols.uf_api).as_ref(), num_rows);
    let regiao = derive::derive_region(&uf);
    let tipo_ponto = derive::derive_tipo_ponto(source(&cols.pontao).as_ref(), num_rows);
    let registro = derive::copy_strings(source(&cols.registro).as_ref(), num_rows);
    let linguagem = derive::copy_strings(source(&cols.linguagem).as_ref(), num_rows);
    let linguagens_lista = derive::derive_language_list(source(&cols.linguagem).as_ref(), num_rows);
    let faixa_receita = derive::derive_revenue(source(&cols.receita).as_ref(), num_rows);

    let populacao = derive::derive_population(
        get_string_column(raw, columns::POPULACAO).as_ref(),
        num_rows,
    );
    let faixa_populacional = match get_string_column(raw, columns::FAIXA_POPULACIONAL) {
        Some(existing) => derive::repair_bracket_column(&existing),
        None => derive::derive_population_bracket(&populacao),
    };
    let rural_urbana = derive::derive_rural_urban(&populacao);

    // The ten resource-access coercions are independent of each other
    let flag_sources: Vec<(&str, Option<String>)> = vec![
        (columns::REC_FEDERAL, cols.rec_federal.clone()),
        (columns::REC_ESTADUAL, cols.rec_estadual.clone()),
        (columns::REC_MUNICIPAL, cols.rec_municipal.clone()),
        (columns::REC_MINC, cols.rec_minc.clone()),
        (columns::PNAB_ESTADUAL, cols.pnab_estadual.clone()),
        (columns::PNAB_MUNICIPAL, cols.pnab_municipal.clone()),
        (columns::TCC_EST_PONTO, cols.tcc_est_ponto.clone()),
        (columns::TCC_EST_PONTAO, cols.tcc_est_pontao.clone()),
        (columns::TCC_MUN_PONTO, cols.tcc_mun_ponto.clone()),
        (columns::TCC_MUN_PONTAO, cols.tcc_mun_pontao.clone()),
    ];
    let flags: Vec<(&str, ArrayRef)> = flag_sources
        .par_iter()
        .map(|(name, source_name)| {
            let column = source_name.as_ref().and_then(|n| get_column(raw, n));
            (*name, derive::coerce_bool(column.as_ref(), num_rows))
        })
        .collect();

    let mut derived: Vec<(&str, ArrayRef)> = vec![
        (columns::ESTADO, estado),
        (columns::CIDADE, cidade),
        (columns::UF, Arc::new(uf) as ArrayRef),
        (columns::REGIAO, regiao),
        (columns::TIPO_PONTO, tipo_ponto),
        (columns::REGISTRO, registro),
        (columns::LINGUAGEM_ARTISTICA, linguagem),
        (columns::LINGUAGENS_LISTA, linguagens_lista),
        (columns::FAIXA_RECEITA, faixa_receita),
        (columns::POPULACAO, Arc::new(populacao) as ArrayRef),
        (columns::FAIXA_POPULACIONAL, faixa_populacional),
        (columns::CLASSIFICACAO_RURAL_URBANA, rural_urbana),
    ];
    derived.extend(flags);

    let derived_names: FxHashSet<&str> = derived.iter().map(|(name, _)| *name).collect();

    let mut fields: Vec<Field> = Vec::with_capacity(raw.num_columns() + derived.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(raw.num_columns() + derived.len());
    for (idx, field) in raw.schema().fields().iter().enumerate() {
        if derived_names.contains(field.name().as_str()) {
            continue;
        }
        fields.push(field.as_ref().clone());
        arrays.push(Arc::clone(raw.column(idx)));
    }
    for (name, array) in derived {
        fields.push(Field::new(name, array.data_type().clone(), true));
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    RecordBatch::try_new(schema, arrays).context("Failed to assemble canonical batch")
}

/// Memoized prepared base keyed by an explicit version tag
///
/// The tag is a manual cache-busting knob: bumping it (or calling
/// [`BaseCache::invalidate`]) forces recomputation on the next access even
/// though the raw batch is unchanged.
#[derive(Debug, Default)]
pub struct BaseCache {
    version: String,
    entry: Option<(String, RecordBatch)>,
}

impl BaseCache {
    /// Create a cache with the given version tag
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            entry: None,
        }
    }

    /// The current version tag
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Change the version tag; a mismatching cached entry is recomputed lazily
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// Drop the cached entry
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Return the prepared base, computing it at most once per version
    ///
    /// # Errors
    /// Propagates [`prepare_base`] failures; nothing is cached on error.
    pub fn get_or_prepare(&mut self, raw: &RecordBatch) -> Result<RecordBatch> {
        if let Some((version, prepared)) = &self.entry {
            if *version == self.version {
                debug!("Prepared base served from cache (version {version})");
                return Ok(prepared.clone());
            }
        }

        info!("Preparing base (version {})", self.version);
        let prepared = prepare_base(raw)?;
        self.entry = Some((self.version.clone(), prepared.clone()));
        Ok(prepared)
    }
}
