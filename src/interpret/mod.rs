//! Text-to-filter interpretation via an external generative model
//!
//! A validated-translation shim, not an inference engine: the free-text
//! request and the live catalog go out, a schema-constrained JSON object
//! comes back, and every value is re-validated locally before it can touch
//! the filter engine. The interpreter owns no state and never retries;
//! failures are reported upward for the caller to decide.

pub mod client;
pub mod mapping;
pub mod prompt;
pub mod schema;

use log::{debug, warn};
use serde::Deserialize;
use serde::Serialize;

use crate::catalog::FilterCatalog;
use crate::config::BaseReaderConfig;
use crate::filter::FilterSet;

use client::{ClientError, GenerativeClient};
use mapping::{dedup_preserving, expand_region_capitals, map_answer, map_single, map_values};
use prompt::{SYSTEM_INSTRUCTION, build_user_prompt};
use schema::build_response_schema;

/// Outcome status of an interpretation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InterpretStatus {
    /// Filters extracted and re-validated
    #[serde(rename = "ok")]
    Ok,
    /// The input is not an actionable filter request
    #[serde(rename = "invalida")]
    Invalid,
    /// Dependency, network or response failure
    #[serde(rename = "erro")]
    Error,
}

/// Result of interpreting a free-text request
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub status: InterpretStatus,
    /// User-facing message (the model's justification on success)
    pub message: String,
    /// Re-validated filters; empty unless status is `Ok`
    pub filters: FilterSet,
    /// Model identifier, once a call was attempted or prepared
    pub model_used: Option<String>,
}

impl Outcome {
    fn invalid(message: impl Into<String>, model_used: Option<String>) -> Self {
        Self {
            status: InterpretStatus::Invalid,
            message: message.into(),
            filters: FilterSet::default(),
            model_used,
        }
    }

    fn error(message: impl Into<String>, model_used: Option<String>) -> Self {
        Self {
            status: InterpretStatus::Error,
            message: message.into(),
            filters: FilterSet::default(),
            model_used,
        }
    }
}

/// The schema-shaped reply the model returns
#[derive(Debug, Deserialize)]
struct ModelReply {
    solicitacao_valida: bool,
    #[serde(default)]
    justificativa: String,
    #[serde(default)]
    estado: Vec<String>,
    #[serde(default)]
    regiao: Vec<String>,
    #[serde(default)]
    municipio: Vec<String>,
    #[serde(default)]
    faixa_populacional: Vec<String>,
    #[serde(default)]
    acoes_estruturantes: Vec<String>,
    #[serde(default)]
    linguagem_artistica: Vec<String>,
    #[serde(default)]
    faixa_receita: Vec<String>,
    #[serde(default)]
    tipo_ponto: Option<String>,
    #[serde(default)]
    registro: Option<String>,
    #[serde(default)]
    rec_federal: Option<String>,
    #[serde(default)]
    rec_minc: Option<String>,
    #[serde(default)]
    rec_estadual: Option<String>,
    #[serde(default)]
    rec_municipal: Option<String>,
    #[serde(default)]
    pnab_estadual: Option<String>,
    #[serde(default)]
    pnab_municipal: Option<String>,
    #[serde(default)]
    tcc_est_ponto: Option<String>,
    #[serde(default)]
    tcc_est_pontao: Option<String>,
    #[serde(default)]
    tcc_mun_ponto: Option<String>,
    #[serde(default)]
    tcc_mun_pontao: Option<String>,
}

/// Interpret a free-text request into re-validated filters
///
/// # Arguments
/// * `request` - The user's free-text filtering request
/// * `catalog` - The live filter catalog
/// * `config` - Supplies model, endpoint, timeout and API-key variable
///
/// Never fails: every failure mode maps to an [`Outcome`] status. Blank
/// input and a missing API key short-circuit before any network traffic.
pub async fn interpret(
    request: &str,
    catalog: &FilterCatalog,
    config: &BaseReaderConfig,
) -> Outcome {
    let request = request.trim();
    if request.is_empty() {
        return Outcome::invalid(
            "Escreva uma solicitação antes de aplicar filtros por texto.",
            None,
        );
    }

    let api_key = std::env::var(&config.api_key_env)
        .unwrap_or_default()
        .trim()
        .to_string();
    if api_key.is_empty() {
        return Outcome::error(
            format!(
                "Chave de API não encontrada. Defina a variável de ambiente {} para usar texto para filtros.",
                config.api_key_env
            ),
            None,
        );
    }

    let model_used = Some(config.model.clone());
    let response_schema = build_response_schema(catalog, config.max_enum_items);
    let user_prompt = build_user_prompt(request, catalog);

    let client = match GenerativeClient::new(
        config.api_base_url.clone(),
        config.model.clone(),
        config.request_timeout,
    ) {
        Ok(client) => client,
        Err(e) => {
            return Outcome::error(
                format!("Falha ao preparar o cliente do modelo: {e}"),
                model_used,
            );
        }
    };

    debug!("Interpreting filter request ({} chars)", request.len());
    let raw = match client
        .generate_structured(&api_key, SYSTEM_INSTRUCTION, &user_prompt, &response_schema)
        .await
    {
        Ok(value) => value,
        Err(ClientError::Timeout) => {
            warn!("Filter interpretation timed out");
            return Outcome::error(
                "A solicitação demorou mais que o esperado. Tente novamente.",
                model_used,
            );
        }
        Err(e) => {
            warn!("Filter interpretation failed: {e}");
            return Outcome::error(format!("Falha ao chamar o modelo: {e}"), model_used);
        }
    };

    let reply: ModelReply = match serde_json::from_value(raw) {
        Ok(reply) => reply,
        Err(e) => {
            return Outcome::error(
                format!("Falha ao interpretar a resposta estruturada: {e}"),
                model_used,
            );
        }
    };

    let justification = reply.justificativa.trim().to_string();
    if !reply.solicitacao_valida {
        let message = if justification.is_empty() {
            "A entrada não parece uma solicitação válida de filtros.".to_string()
        } else {
            justification
        };
        return Outcome::invalid(message, model_used);
    }

    // the declared validity and the schema compliance are not trusted;
    // every value is re-matched against the catalog
    let mut municipio = map_values(&reply.municipio, &catalog.municipio);
    municipio.extend(expand_region_capitals(request, &catalog.municipio));
    let municipio = dedup_preserving(municipio);

    let filters = FilterSet {
        estado: map_values(&reply.estado, &catalog.estado),
        regiao: map_values(&reply.regiao, &catalog.regiao),
        municipio,
        faixa_populacional: map_values(&reply.faixa_populacional, &catalog.faixa_populacional),
        acoes_estruturantes: map_values(&reply.acoes_estruturantes, &catalog.action_labels()),
        linguagem_artistica: map_values(&reply.linguagem_artistica, &catalog.linguagem_artistica),
        faixa_receita: map_values(&reply.faixa_receita, &catalog.faixa_receita),
        tipo_ponto: map_single(reply.tipo_ponto.as_deref(), &catalog.tipo_ponto),
        registro: map_single(reply.registro.as_deref(), &catalog.registro),
        acessos_recursos_or: Vec::new(),
        rec_federal: map_answer(reply.rec_federal.as_deref()),
        rec_minc: map_answer(reply.rec_minc.as_deref()),
        rec_estadual: map_answer(reply.rec_estadual.as_deref()),
        rec_municipal: map_answer(reply.rec_municipal.as_deref()),
        pnab_estadual: map_answer(reply.pnab_estadual.as_deref()),
        pnab_municipal: map_answer(reply.pnab_municipal.as_deref()),
        tcc_est_ponto: map_answer(reply.tcc_est_ponto.as_deref()),
        tcc_est_pontao: map_answer(reply.tcc_est_pontao.as_deref()),
        tcc_mun_ponto: map_answer(reply.tcc_mun_ponto.as_deref()),
        tcc_mun_pontao: map_answer(reply.tcc_mun_pontao.as_deref()),
    };

    let message = if justification.is_empty() {
        "Solicitação interpretada com sucesso.".to_string()
    } else {
        justification
    };

    Outcome {
        status: InterpretStatus::Ok,
        message,
        filters,
        model_used,
    }
}
