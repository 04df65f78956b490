//! Filter criteria over the canonical base
//!
//! A [`Criterion`] is one constraint on the canonical table; a filtering
//! interaction is a list of them, combined with AND. [`FilterSet`] is the
//! named, widget-shaped view of a selection that lowers into criteria.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::catalog::ActionOption;
use crate::model::SimNao;
use crate::model::columns;

/// One constraint on the canonical table
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Row kept iff the field value is in the accepted set; an empty set
    /// imposes no constraint
    MultiSelect { field: String, values: Vec<String> },

    /// Row kept iff the row's parsed list intersects the accepted set; an
    /// empty set imposes no constraint
    ListContainsAny { field: String, values: Vec<String> },

    /// Row kept iff it is true in any of the named boolean-like columns.
    /// Columns absent from the batch are skipped; naming no columns at all
    /// means the active selection matched nothing
    OrGroup { columns: Vec<String> },

    /// Row kept iff the bool-coerced column equals the requested answer
    BooleanFlag { column: String, value: SimNao },
}

impl Criterion {
    /// Shorthand for a multi-select constraint
    #[must_use]
    pub fn multi_select(field: &str, values: Vec<String>) -> Self {
        Self::MultiSelect {
            field: field.to_string(),
            values,
        }
    }
}

/// A named filter selection, mirroring the dashboard's filter vocabulary
///
/// Empty lists and `None` fields impose no constraint; a default `FilterSet`
/// is the identity filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub estado: Vec<String>,
    #[serde(default)]
    pub regiao: Vec<String>,
    #[serde(default)]
    pub municipio: Vec<String>,
    #[serde(default)]
    pub faixa_populacional: Vec<String>,
    /// Structuring-action labels as the catalog spells them
    #[serde(default)]
    pub acoes_estruturantes: Vec<String>,
    #[serde(default)]
    pub linguagem_artistica: Vec<String>,
    #[serde(default)]
    pub faixa_receita: Vec<String>,
    #[serde(default)]
    pub tipo_ponto: Option<String>,
    #[serde(default)]
    pub registro: Option<String>,
    /// Resource-flag column names combined with OR, independent of the
    /// per-flag yes/no filters below
    #[serde(default)]
    pub acessos_recursos_or: Vec<String>,
    #[serde(default)]
    pub rec_federal: Option<SimNao>,
    #[serde(default)]
    pub rec_minc: Option<SimNao>,
    #[serde(default)]
    pub rec_estadual: Option<SimNao>,
    #[serde(default)]
    pub rec_municipal: Option<SimNao>,
    #[serde(default)]
    pub pnab_estadual: Option<SimNao>,
    #[serde(default)]
    pub pnab_municipal: Option<SimNao>,
    #[serde(default)]
    pub tcc_est_ponto: Option<SimNao>,
    #[serde(default)]
    pub tcc_est_pontao: Option<SimNao>,
    #[serde(default)]
    pub tcc_mun_ponto: Option<SimNao>,
    #[serde(default)]
    pub tcc_mun_pontao: Option<SimNao>,
}

impl FilterSet {
    /// The per-flag yes/no filters with their backing canonical columns
    #[must_use]
    pub fn boolean_flags(&self) -> [(&'static str, Option<SimNao>); 10] {
        [
            (columns::REC_FEDERAL, self.rec_federal),
            (columns::REC_MINC, self.rec_minc),
            (columns::REC_ESTADUAL, self.rec_estadual),
            (columns::REC_MUNICIPAL, self.rec_municipal),
            (columns::PNAB_ESTADUAL, self.pnab_estadual),
            (columns::PNAB_MUNICIPAL, self.pnab_municipal),
            (columns::TCC_EST_PONTO, self.tcc_est_ponto),
            (columns::TCC_EST_PONTAO, self.tcc_est_pontao),
            (columns::TCC_MUN_PONTO, self.tcc_mun_ponto),
            (columns::TCC_MUN_PONTAO, self.tcc_mun_pontao),
        ]
    }

    /// Whether no constraint is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.estado.is_empty()
            && self.regiao.is_empty()
            && self.municipio.is_empty()
            && self.faixa_populacional.is_empty()
            && self.acoes_estruturantes.is_empty()
            && self.linguagem_artistica.is_empty()
            && self.faixa_receita.is_empty()
            && self.tipo_ponto.is_none()
            && self.registro.is_none()
            && self.acessos_recursos_or.is_empty()
            && self.boolean_flags().iter().all(|(_, v)| v.is_none())
    }

    /// Lower the selection into criteria
    ///
    /// # Arguments
    /// * `actions` - The catalog's structuring-action options, mapping
    ///   labels to their backing columns
    ///
    /// Inactive fields produce nothing. A structuring-action selection is
    /// dropped entirely when the base has no action columns (feature
    /// unavailable); selected labels that match no catalog option are
    /// discarded with a warning.
    #[must_use]
    pub fn to_criteria(&self, actions: &[ActionOption]) -> Vec<Criterion> {
        let mut criteria = Vec::new();

        let multi = |criteria: &mut Vec<Criterion>, field: &str, values: &[String]| {
            if !values.is_empty() {
                criteria.push(Criterion::multi_select(field, values.to_vec()));
            }
        };

        multi(&mut criteria, columns::ESTADO, &self.estado);
        multi(&mut criteria, columns::REGIAO, &self.regiao);
        multi(&mut criteria, columns::CIDADE, &self.municipio);
        multi(
            &mut criteria,
            columns::FAIXA_POPULACIONAL,
            &self.faixa_populacional,
        );
        multi(&mut criteria, columns::FAIXA_RECEITA, &self.faixa_receita);

        if let Some(tipo) = &self.tipo_ponto {
            multi(&mut criteria, columns::TIPO_PONTO, &[tipo.clone()]);
        }
        if let Some(registro) = &self.registro {
            multi(&mut criteria, columns::REGISTRO, &[registro.clone()]);
        }

        if !self.linguagem_artistica.is_empty() {
            criteria.push(Criterion::ListContainsAny {
                field: columns::LINGUAGENS_LISTA.to_string(),
                values: self.linguagem_artistica.clone(),
            });
        }

        if !self.acoes_estruturantes.is_empty() && !actions.is_empty() {
            let mut resolved = Vec::new();
            for label in &self.acoes_estruturantes {
                match actions.iter().find(|option| option.label == *label) {
                    Some(option) => resolved.push(option.column.clone()),
                    None => warn!("Unknown structuring-action label '{label}' discarded"),
                }
            }
            criteria.push(Criterion::OrGroup { columns: resolved });
        }

        if !self.acessos_recursos_or.is_empty() {
            criteria.push(Criterion::OrGroup {
                columns: self.acessos_recursos_or.clone(),
            });
        }

        for (column, answer) in self.boolean_flags() {
            if let Some(value) = answer {
                criteria.push(Criterion::BooleanFlag {
                    column: column.to_string(),
                    value,
                });
            }
        }

        criteria
    }
}
