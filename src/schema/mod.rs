//! Column resolution over the unstable survey schema
//!
//! Survey headers are long natural-language questions that drift slightly
//! between exports. Instead of a fixed positional schema, each semantic
//! target is resolved against the live header set: exact normalized match
//! first, then first substring match in header order. A failed resolution
//! means "feature unavailable", never an error.

use log::warn;

use crate::text::normalize;

/// Semantic target labels resolved against the raw header set
pub mod targets {
    pub const ESTADO: &str = "Estado";
    pub const CIDADE_API: &str = "cidade_api";
    pub const UF_API: &str = "uf_api";
    pub const PONTAO: &str = "Pontão";
    pub const REGISTRO: &str = "Registro";
    pub const LINGUAGEM: &str = "11. Se o Ponto de Cultura trabalha com linguagens";
    pub const RECEITA: &str = "Receita anual";
    pub const REC_FEDERAL: &str = "14. 1. Se sim, quais? (Recursos Federais)";
    pub const REC_ESTADUAL: &str = "14. 1. Se sim, quais? (Recursos Estaduais)";
    pub const REC_MUNICIPAL: &str = "14. 1. Se sim, quais? (Recursos Municipais)";
    pub const REC_MINC: &str = "Recursos federais (Editais Ministério da Cultura)";
    pub const PNAB_ESTADUAL: &str = "Recursos federais (Editais estaduais da PNAB (Política Nacional Aldir Blanc de Fomento à Cultura))";
    pub const PNAB_MUNICIPAL: &str = "Recursos federais (Editais municipais da PNAB (Política Nacional Aldir Blanc de Fomento à Cultura))";
    pub const TCC_EST_PONTO: &str =
        "RF-PNAB Indique qual modalidade: (Termo de Compromisso Cultural (TCC) de Ponto de Cultura)";
    pub const TCC_EST_PONTAO: &str = "RF-PNAB Indique qual modalidade: (Termo de Compromisso Cultural (TCC) de Pontão de Cultura)";
    pub const TCC_MUN_PONTO: &str = "Indique qual modalidade de edital municipal da PNAB: (Termo de Compromisso Cultural (TCC) de Ponto de Cultura)";
    pub const TCC_MUN_PONTAO: &str = "Indique qual modalidade de edital municipal da PNAB: (Termo de Compromisso Cultural (TCC) de Pontão de Cultura)";

    /// Header of the umbrella structuring-action question; its per-action
    /// sub-columns are the filterable ones, the umbrella itself is not
    pub const ACAO_ESTRUTURANTE_PERGUNTA: &str = "10. As atividades do Ponto de Cultura estão relacionadas diretamente com quais ações estruturante da Política Nacional de Cultura Viva?";
}

/// Find the header matching a semantic target label
///
/// # Arguments
/// * `headers` - The header set, in file order
/// * `target` - The human-readable target label
///
/// # Returns
/// The matching header, or `None` when the column is unavailable
///
/// Exact normalized equality wins; otherwise the first header whose
/// normalized text contains the normalized target is taken. When the
/// substring phase matches more than one header the first one in iteration
/// order wins and the tie is logged, since nothing else disambiguates it.
#[must_use]
pub fn find_column<'a>(headers: &'a [String], target: &str) -> Option<&'a str> {
    let wanted = normalize(target);
    if wanted.is_empty() {
        return None;
    }

    for header in headers {
        if normalize(header) == wanted {
            return Some(header.as_str());
        }
    }

    let mut candidates = headers
        .iter()
        .filter(|header| normalize(header).contains(&wanted));
    let first = candidates.next()?.as_str();
    let ties: Vec<&str> = candidates.map(String::as_str).collect();
    if !ties.is_empty() {
        warn!(
            "Ambiguous substring match for '{target}': picked '{first}', also matched {ties:?}"
        );
    }
    Some(first)
}

/// The source columns the preparer derives from, resolved in one pass
///
/// Every field is optional: a `None` marks the feature as unavailable in
/// this export and the corresponding derivation degrades to null/false.
#[derive(Debug, Clone, Default)]
pub struct ResolvedColumns {
    pub estado: Option<String>,
    pub cidade_api: Option<String>,
    pub uf_api: Option<String>,
    pub pontao: Option<String>,
    pub registro: Option<String>,
    pub linguagem: Option<String>,
    pub receita: Option<String>,
    pub rec_federal: Option<String>,
    pub rec_estadual: Option<String>,
    pub rec_municipal: Option<String>,
    pub rec_minc: Option<String>,
    pub pnab_estadual: Option<String>,
    pub pnab_municipal: Option<String>,
    pub tcc_est_ponto: Option<String>,
    pub tcc_est_pontao: Option<String>,
    pub tcc_mun_ponto: Option<String>,
    pub tcc_mun_pontao: Option<String>,
}

impl ResolvedColumns {
    /// Resolve all semantic targets against the given header set
    #[must_use]
    pub fn resolve(headers: &[String]) -> Self {
        let find = |target: &str| find_column(headers, target).map(str::to_string);

        Self {
            estado: find(targets::ESTADO),
            cidade_api: find(targets::CIDADE_API),
            uf_api: find(targets::UF_API),
            pontao: find(targets::PONTAO),
            registro: find(targets::REGISTRO),
            linguagem: find(targets::LINGUAGEM),
            receita: find(targets::RECEITA),
            rec_federal: find(targets::REC_FEDERAL),
            rec_estadual: find(targets::REC_ESTADUAL),
            rec_municipal: find(targets::REC_MUNICIPAL),
            rec_minc: find(targets::REC_MINC),
            pnab_estadual: find(targets::PNAB_ESTADUAL),
            pnab_municipal: find(targets::PNAB_MUNICIPAL),
            tcc_est_ponto: find(targets::TCC_EST_PONTO),
            tcc_est_pontao: find(targets::TCC_EST_PONTAO),
            tcc_mun_ponto: find(targets::TCC_MUN_PONTO),
            tcc_mun_pontao: find(targets::TCC_MUN_PONTAO),
        }
    }

    /// Log every unresolved target at warn level
    pub fn log_missing(&self) {
        let checks: [(&str, &Option<String>); 17] = [
            (targets::ESTADO, &self.estado),
            (targets::CIDADE_API, &self.cidade_api),
            (targets::UF_API, &self.uf_api),
            (targets::PONTAO, &self.pontao),
            (targets::REGISTRO, &self.registro),
            (targets::LINGUAGEM, &self.linguagem),
            (targets::RECEITA, &self.receita),
            (targets::REC_FEDERAL, &self.rec_federal),
            (targets::REC_ESTADUAL, &self.rec_estadual),
            (targets::REC_MUNICIPAL, &self.rec_municipal),
            (targets::REC_MINC, &self.rec_minc),
            (targets::PNAB_ESTADUAL, &self.pnab_estadual),
            (targets::PNAB_MUNICIPAL, &self.pnab_municipal),
            (targets::TCC_EST_PONTO, &self.tcc_est_ponto),
            (targets::TCC_EST_PONTAO, &self.tcc_est_pontao),
            (targets::TCC_MUN_PONTO, &self.tcc_mun_ponto),
            (targets::TCC_MUN_PONTAO, &self.tcc_mun_pontao),
        ];
        for (target, resolved) in checks {
            if resolved.is_none() {
                warn!("Source column not found for '{target}', derived field degrades");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn exact_match_preferred_over_substring() {
        let cols = headers(&["Qual o Estado do Ponto?", "Estado"]);
        assert_eq!(find_column(&cols, "Estado"), Some("Estado"));
    }

    #[test]
    fn substring_fallback_takes_first_in_order() {
        let cols = headers(&["1. Receita anual estimada", "2. Receita anual real"]);
        assert_eq!(
            find_column(&cols, "Receita anual"),
            Some("1. Receita anual estimada")
        );
    }

    #[test]
    fn accents_do_not_block_resolution() {
        let cols = headers(&["PONTAO"]);
        assert_eq!(find_column(&cols, "Pontão"), Some("PONTAO"));
    }

    #[test]
    fn unresolved_target_is_none() {
        let cols = headers(&["Estado", "Cidade"]);
        assert_eq!(find_column(&cols, "Receita anual"), None);
        assert_eq!(find_column(&cols, ""), None);
    }
}
