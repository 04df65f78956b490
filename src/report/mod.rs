//! Data-side summary of a filtering session
//!
//! The flattened name/values pairs and the row counts that exports and
//! status panels render. Rendering itself lives elsewhere; this struct is
//! plain serializable data.

use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::filter::FilterSet;
use crate::model::columns;
use crate::utils::distinct_strings;

/// One active filter, flattened to a display name and its values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    pub name: String,
    pub values: Vec<String>,
}

/// Summary of the current selection against the full base
#[derive(Debug, Clone, Serialize)]
pub struct SelectionSummary {
    pub generated_at: DateTime<Utc>,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub total_municipios: usize,
    pub filtered_municipios: usize,
    pub active_filters: Vec<ActiveFilter>,
}

impl SelectionSummary {
    /// Build the summary for a base, its filtered view and the selection
    #[must_use]
    pub fn build(base: &RecordBatch, filtered: &RecordBatch, filters: &FilterSet) -> Self {
        Self {
            generated_at: Utc::now(),
            total_rows: base.num_rows(),
            filtered_rows: filtered.num_rows(),
            total_municipios: distinct_strings(base, columns::CIDADE).len(),
            filtered_municipios: distinct_strings(filtered, columns::CIDADE).len(),
            active_filters: flatten_filters(filters),
        }
    }
}

fn flatten_filters(filters: &FilterSet) -> Vec<ActiveFilter> {
    let mut active = Vec::new();

    let mut push = |name: &str, values: &[String]| {
        if !values.is_empty() {
            active.push(ActiveFilter {
                name: name.to_string(),
                values: values.to_vec(),
            });
        }
    };

    push("Região", &filters.regiao);
    push("Estado", &filters.estado);
    push("Município", &filters.municipio);
    push("População", &filters.faixa_populacional);
    if let Some(tipo) = &filters.tipo_ponto {
        push("Tipo", &[tipo.clone()]);
    }
    if let Some(registro) = &filters.registro {
        push("Jurídico", &[registro.clone()]);
    }
    push("Ação Estruturante", &filters.acoes_estruturantes);
    push("Linguagem", &filters.linguagem_artistica);
    push("Receita", &filters.faixa_receita);

    let flag_labels = [
        "Recursos Federais",
        "Editais do Ministério da Cultura",
        "Recursos Estaduais",
        "Recursos Municipais",
        "PNAB Estadual",
        "PNAB Municipal",
        "TCC Estadual (Ponto)",
        "TCC Estadual (Pontão)",
        "TCC Municipal (Ponto)",
        "TCC Municipal (Pontão)",
    ];
    for ((_, answer), label) in filters.boolean_flags().into_iter().zip(flag_labels) {
        if let Some(value) = answer {
            push(label, &[value.label().to_string()]);
        }
    }

    active
}
