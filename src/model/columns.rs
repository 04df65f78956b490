//! Canonical column names of the prepared base
//!
//! These are the derived columns the preparer overlays on the raw table.
//! Filters, the catalog and the report address columns through these names
//! only; raw survey headers never leak past the resolver.

pub const ESTADO: &str = "estado";
pub const CIDADE: &str = "cidade";
pub const UF: &str = "uf";
pub const REGIAO: &str = "regiao";
pub const TIPO_PONTO: &str = "tipo_ponto";
pub const REGISTRO: &str = "registro";
pub const LINGUAGEM_ARTISTICA: &str = "linguagem_artistica";
pub const LINGUAGENS_LISTA: &str = "linguagens_lista";
pub const FAIXA_RECEITA: &str = "faixa_receita";
pub const POPULACAO: &str = "populacao";
pub const FAIXA_POPULACIONAL: &str = "faixa_populacional";
pub const CLASSIFICACAO_RURAL_URBANA: &str = "classificacao_rural_urbana";

pub const REC_FEDERAL: &str = "rec_federal";
pub const REC_ESTADUAL: &str = "rec_estadual";
pub const REC_MUNICIPAL: &str = "rec_municipal";
pub const REC_MINC: &str = "rec_minc";
pub const PNAB_ESTADUAL: &str = "pnab_estadual";
pub const PNAB_MUNICIPAL: &str = "pnab_municipal";
pub const TCC_EST_PONTO: &str = "tcc_est_ponto";
pub const TCC_EST_PONTAO: &str = "tcc_est_pontao";
pub const TCC_MUN_PONTO: &str = "tcc_mun_ponto";
pub const TCC_MUN_PONTAO: &str = "tcc_mun_pontao";

/// The boolean resource-access flags, in derivation order
pub const RESOURCE_FLAGS: [&str; 10] = [
    REC_FEDERAL,
    REC_ESTADUAL,
    REC_MUNICIPAL,
    REC_MINC,
    PNAB_ESTADUAL,
    PNAB_MUNICIPAL,
    TCC_EST_PONTO,
    TCC_EST_PONTAO,
    TCC_MUN_PONTO,
    TCC_MUN_PONTAO,
];
