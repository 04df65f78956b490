//! Dynamic response schema for the structured filter extraction
//!
//! The schema is rebuilt per call from the live catalog so every enumerated
//! field is constrained to values the loaded base actually contains. Fields
//! whose option list exceeds the configured cap fall back to plain strings;
//! the local re-validation in [`crate::interpret::mapping`] still applies.

use serde_json::{Value, json};

use crate::catalog::FilterCatalog;
use crate::model::vocab;

/// Schema for a list field constrained to the given options
fn constrained_list(options: &[String], max_enum_items: usize, description: &str) -> Value {
    if options.is_empty() || options.len() > max_enum_items {
        json!({
            "type": "array",
            "items": {"type": "string"},
            "description": description,
        })
    } else {
        json!({
            "type": "array",
            "items": {"type": "string", "enum": options},
            "description": description,
        })
    }
}

/// Schema for a nullable single-choice field constrained to the given options
fn constrained_single(options: &[String], max_enum_items: usize, description: &str) -> Value {
    if options.is_empty() || options.len() > max_enum_items {
        json!({
            "type": ["string", "null"],
            "description": description,
        })
    } else {
        json!({
            "anyOf": [
                {"type": "string", "enum": options},
                {"type": "null"},
            ],
            "description": description,
        })
    }
}

/// Build the response schema from the live catalog
#[must_use]
pub fn build_response_schema(catalog: &FilterCatalog, max_enum_items: usize) -> Value {
    let sim_nao = vec![vocab::SIM.to_string(), vocab::NAO.to_string()];
    let answer = |description: &str| constrained_single(&sim_nao, max_enum_items, description);

    json!({
        "type": "object",
        "additionalProperties": false,
        "required": [
            "solicitacao_valida",
            "justificativa",
            "estado",
            "regiao",
            "municipio",
            "faixa_populacional",
            "acoes_estruturantes",
            "linguagem_artistica",
            "faixa_receita",
            "tipo_ponto",
            "registro",
            "rec_federal",
            "rec_minc",
            "rec_estadual",
            "rec_municipal",
            "pnab_estadual",
            "pnab_municipal",
            "tcc_est_ponto",
            "tcc_est_pontao",
            "tcc_mun_ponto",
            "tcc_mun_pontao",
        ],
        "properties": {
            "solicitacao_valida": {
                "type": "boolean",
                "description": "true quando a entrada for uma solicitação válida de filtros do painel.",
            },
            "justificativa": {
                "type": "string",
                "description": "Frase curta e objetiva explicando a interpretação.",
            },
            "estado": constrained_list(&catalog.estado, max_enum_items, "Estados selecionados exclusivamente do catálogo."),
            "regiao": constrained_list(&catalog.regiao, max_enum_items, "Regiões selecionadas exclusivamente do catálogo."),
            "municipio": constrained_list(&catalog.municipio, max_enum_items, "Municípios selecionados exclusivamente do catálogo."),
            "faixa_populacional": constrained_list(&catalog.faixa_populacional, max_enum_items, "Faixas populacionais exclusivamente do catálogo."),
            "acoes_estruturantes": constrained_list(&catalog.action_labels(), max_enum_items, "Ações estruturantes exclusivamente do catálogo."),
            "linguagem_artistica": constrained_list(&catalog.linguagem_artistica, max_enum_items, "Linguagens artísticas exclusivamente do catálogo."),
            "faixa_receita": constrained_list(&catalog.faixa_receita, max_enum_items, "Faixas de receita exclusivamente do catálogo."),
            "tipo_ponto": constrained_single(&catalog.tipo_ponto, max_enum_items, "Tipo de reconhecimento (Ponto/Pontão) dentro do catálogo."),
            "registro": constrained_single(&catalog.registro, max_enum_items, "Tipo de cadastro jurídico dentro do catálogo."),
            "rec_federal": answer("Acesso a recursos federais (Sim/Não)."),
            "rec_minc": answer("Acesso a editais do Ministério da Cultura (Sim/Não)."),
            "rec_estadual": answer("Acesso a recursos estaduais (Sim/Não)."),
            "rec_municipal": answer("Acesso a recursos municipais (Sim/Não)."),
            "pnab_estadual": answer("Acesso a editais estaduais da PNAB (Sim/Não)."),
            "pnab_municipal": answer("Acesso a editais municipais da PNAB (Sim/Não)."),
            "tcc_est_ponto": answer("Modalidade TCC estadual de Ponto (Sim/Não)."),
            "tcc_est_pontao": answer("Modalidade TCC estadual de Pontão (Sim/Não)."),
            "tcc_mun_ponto": answer("Modalidade TCC municipal de Ponto (Sim/Não)."),
            "tcc_mun_pontao": answer("Modalidade TCC municipal de Pontão (Sim/Não)."),
        },
    })
}
