//! The filter catalog: legal values per filterable field
//!
//! Derived from the canonical batch, the catalog feeds both widget option
//! lists and the interpreter's response schema, which is what keeps the
//! generative model from inventing values the loaded base does not contain.

use arrow::array::{Array, ListArray, StringArray};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use serde_json::{Value, json};

use crate::config::BaseReaderConfig;
use crate::model::{columns, vocab};
use crate::schema::targets;
use crate::text::normalize;
use crate::utils::{distinct_strings, get_column};

/// A structuring-action option: the short label shown to users and the
/// survey column backing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOption {
    pub label: String,
    pub column: String,
}

/// The enumerated legal values per filter field
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterCatalog {
    pub estado: Vec<String>,
    pub regiao: Vec<String>,
    pub municipio: Vec<String>,
    pub faixa_populacional: Vec<String>,
    pub acoes_estruturantes: Vec<ActionOption>,
    pub linguagem_artistica: Vec<String>,
    pub faixa_receita: Vec<String>,
    pub tipo_ponto: Vec<String>,
    pub registro: Vec<String>,
}

impl FilterCatalog {
    /// Derive the catalog from the canonical batch
    ///
    /// # Arguments
    /// * `batch` - The canonical batch
    /// * `config` - Supplies the language-count threshold
    #[must_use]
    pub fn from_batch(batch: &RecordBatch, config: &BaseReaderConfig) -> Self {
        let present_brackets: FxHashSet<String> =
            distinct_strings(batch, columns::FAIXA_POPULACIONAL)
                .into_iter()
                .collect();

        Self {
            estado: distinct_strings(batch, columns::ESTADO),
            regiao: distinct_strings(batch, columns::REGIAO),
            municipio: distinct_strings(batch, columns::CIDADE),
            faixa_populacional: vocab::POPULATION_BRACKETS
                .iter()
                .filter(|bracket| present_brackets.contains(**bracket))
                .map(|bracket| (*bracket).to_string())
                .collect(),
            acoes_estruturantes: action_options(batch),
            linguagem_artistica: frequent_languages(batch, config.min_language_count),
            faixa_receita: vocab::REVENUE_BRACKETS
                .iter()
                .map(|bracket| (*bracket).to_string())
                .collect(),
            tipo_ponto: distinct_strings(batch, columns::TIPO_PONTO),
            registro: distinct_strings(batch, columns::REGISTRO),
        }
    }

    /// The structuring-action labels, in catalog order
    #[must_use]
    pub fn action_labels(&self) -> Vec<String> {
        self.acoes_estruturantes
            .iter()
            .map(|option| option.label.clone())
            .collect()
    }

    /// Look up the option list for a filter field by its catalog name
    ///
    /// Structuring actions are listed by label; `filtros_booleanos` yields
    /// the yes/no vocabulary. Unknown field names yield `None`.
    #[must_use]
    pub fn options_for(&self, field: &str) -> Option<Vec<String>> {
        let options = match field {
            "estado" => self.estado.clone(),
            "regiao" => self.regiao.clone(),
            "municipio" => self.municipio.clone(),
            "faixa_populacional" => self.faixa_populacional.clone(),
            "acoes_estruturantes" => self.action_labels(),
            "linguagem_artistica" => self.linguagem_artistica.clone(),
            "faixa_receita" => self.faixa_receita.clone(),
            "tipo_ponto" => self.tipo_ponto.clone(),
            "registro" => self.registro.clone(),
            "filtros_booleanos" => vec![vocab::SIM.to_string(), vocab::NAO.to_string()],
            _ => return None,
        };
        Some(options)
    }

    /// The catalog as the JSON object embedded in the interpreter prompt
    #[must_use]
    pub fn to_prompt_value(&self) -> Value {
        json!({
            "estado": self.estado,
            "regiao": self.regiao,
            "municipio": self.municipio,
            "faixa_populacional": self.faixa_populacional,
            "acoes_estruturantes": self.action_labels(),
            "linguagem_artistica": self.linguagem_artistica,
            "faixa_receita": self.faixa_receita,
            "tipo_ponto": self.tipo_ponto,
            "registro": self.registro,
            "filtros_booleanos": [vocab::SIM, vocab::NAO],
        })
    }
}

/// Collect the structuring-action columns of the batch as labeled options
///
/// A header is an action column when it matches one of the known action
/// names or mentions the structuring-action question; the umbrella question
/// itself is excluded. The label is the text inside the header's
/// parentheses when present, otherwise the header with the question prefix
/// stripped. Duplicate labels keep the first column.
fn action_options(batch: &RecordBatch) -> Vec<ActionOption> {
    let mut seen = FxHashSet::default();
    let mut options = Vec::new();

    for field in batch.schema().fields() {
        let header = field.name();
        if header.trim() == targets::ACAO_ESTRUTURANTE_PERGUNTA {
            continue;
        }
        let is_action = vocab::STRUCTURING_ACTIONS.contains(&header.as_str())
            || normalize(header).contains("acoes estruturante");
        if !is_action {
            continue;
        }

        let label = action_label(header);
        if label.is_empty() || !seen.insert(label.clone()) {
            continue;
        }
        options.push(ActionOption {
            label,
            column: header.clone(),
        });
    }

    options
}

/// The short display label of a structuring-action header
fn action_label(header: &str) -> String {
    if let (Some(open), Some(close)) = (header.find('('), header.rfind(')')) {
        if open < close {
            return header[open + 1..close].trim().to_string();
        }
    }
    header
        .replace(targets::ACAO_ESTRUTURANTE_PERGUNTA, "")
        .trim_matches(|c: char| c == ' ' || c == '-')
        .to_string()
}

/// The languages that occur at least `min_count` times in the parsed lists
fn frequent_languages(batch: &RecordBatch, min_count: usize) -> Vec<String> {
    let Some(column) = get_column(batch, columns::LINGUAGENS_LISTA) else {
        return Vec::new();
    };
    let Some(lists) = column.as_any().downcast_ref::<ListArray>() else {
        return Vec::new();
    };

    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for row in 0..lists.len() {
        if lists.is_null(row) {
            continue;
        }
        let items = lists.value(row);
        let Some(items) = items.as_any().downcast_ref::<StringArray>() else {
            continue;
        };
        for i in 0..items.len() {
            if !items.is_null(i) {
                *counts.entry(items.value(i).to_string()).or_default() += 1;
            }
        }
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .map(|(language, _)| language)
        .sorted()
        .collect()
}
