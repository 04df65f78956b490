//! Local re-validation of model output against the catalog
//!
//! The response schema already constrains the model, but its compliance is
//! not trusted alone: every returned value is re-matched here by normalized
//! key and mapped back to the catalog's canonical spelling. Whatever fails
//! to match is silently dropped, so off-catalog strings never reach the
//! filter engine.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::{REGION_NAMES, SimNao, capitals_for_region};
use crate::text::normalize;

/// Drop duplicates while preserving first-seen order
#[must_use]
pub fn dedup_preserving(values: Vec<String>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Map a list of returned values onto the catalog options
///
/// Matching is by normalized key; matched values come back in the catalog's
/// spelling, deduplicated, in the order the model returned them. Unmatched
/// values are dropped.
#[must_use]
pub fn map_values(values: &[String], options: &[String]) -> Vec<String> {
    if values.is_empty() {
        return Vec::new();
    }

    let mut lookup: FxHashMap<String, &str> = FxHashMap::default();
    for option in options {
        let key = normalize(option);
        if !key.is_empty() {
            lookup.entry(key).or_insert(option.as_str());
        }
    }

    let mapped = values
        .iter()
        .filter_map(|value| lookup.get(&normalize(value)).map(|canon| (*canon).to_string()))
        .collect();
    dedup_preserving(mapped)
}

/// Map a single returned value onto the catalog options
#[must_use]
pub fn map_single(value: Option<&str>, options: &[String]) -> Option<String> {
    let value = value?;
    map_values(&[value.to_string()], options).into_iter().next()
}

/// Map a returned yes/no string onto the boolean-filter vocabulary
#[must_use]
pub fn map_answer(value: Option<&str>) -> Option<SimNao> {
    match normalize(value?).as_str() {
        "sim" => Some(SimNao::Sim),
        "nao" => Some(SimNao::Nao),
        _ => None,
    }
}

/// Expand "capitais de <região>" phrasing into catalog municipalities
///
/// Returns the capital municipalities of every region the request names, or
/// of all regions for country-wide phrasings, restricted to what the
/// catalog actually contains. Requests that never mention capitals yield
/// nothing.
#[must_use]
pub fn expand_region_capitals(request: &str, municipios: &[String]) -> Vec<String> {
    let text = normalize(request);
    if !text.contains("capital") && !text.contains("capitais") {
        return Vec::new();
    }

    let mut regions: Vec<&str> = REGION_NAMES
        .iter()
        .copied()
        .filter(|region| text.contains(&normalize(region)))
        .collect();
    if regions.is_empty()
        && (text.contains("capitais do brasil")
            || text.contains("capitais brasileiras")
            || text.contains("todas as capitais"))
    {
        regions = REGION_NAMES.to_vec();
    }
    if regions.is_empty() {
        return Vec::new();
    }

    let candidates: Vec<String> = regions
        .iter()
        .flat_map(|region| capitals_for_region(region))
        .map(|capital| (*capital).to_string())
        .collect();
    map_values(&candidates, municipios)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn off_catalog_values_are_dropped() {
        let catalog = options(&["São Paulo"]);
        let mapped = map_values(
            &options(&["Rio de Janeiro", "sao paulo", "São Paulo"]),
            &catalog,
        );
        assert_eq!(mapped, vec!["São Paulo"]);
    }

    #[test]
    fn mapping_restores_catalog_spelling() {
        let catalog = options(&["Pontão"]);
        assert_eq!(map_single(Some("pontao"), &catalog), Some("Pontão".into()));
        assert_eq!(map_single(Some("ponto"), &catalog), None);
        assert_eq!(map_single(None, &catalog), None);
    }

    #[test]
    fn answers_accept_loose_spelling() {
        assert_eq!(map_answer(Some("SIM")), Some(SimNao::Sim));
        assert_eq!(map_answer(Some("não")), Some(SimNao::Nao));
        assert_eq!(map_answer(Some("nao")), Some(SimNao::Nao));
        assert_eq!(map_answer(Some("talvez")), None);
    }

    #[test]
    fn capitals_expand_only_for_catalog_cities() {
        let municipios = options(&["Recife", "Salvador", "Olinda"]);
        let expanded = expand_region_capitals("pontões das capitais do Nordeste", &municipios);
        assert_eq!(expanded, vec!["Recife", "Salvador"]);

        assert!(expand_region_capitals("pontos do Nordeste", &municipios).is_empty());
        let all = expand_region_capitals("todas as capitais do Brasil", &municipios);
        assert_eq!(all, vec!["Recife", "Salvador"]);
    }
}
