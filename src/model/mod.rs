//! Domain vocabulary for the Cultura Viva survey base
//!
//! Static tables and value enumerations the derivations and filters share:
//! canonical column names, the UF/region geography and the ordered bracket
//! vocabularies used by the catalog.

pub mod columns;
pub mod regions;
pub mod vocab;

pub use regions::{REGION_NAMES, capitals_for_region, region_for_uf, uf_for_state_name};
pub use vocab::{
    NAO, PONTAO, PONTO, POPULATION_BRACKETS, REVENUE_BRACKETS, RURAL, SEM_DADO, SIM, SimNao,
    STRUCTURING_ACTIONS, URBANO,
};
