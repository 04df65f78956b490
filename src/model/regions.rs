//! Brazilian geography tables
//!
//! Static UF/region lookups used by the preparer and the interpreter's
//! capital-expansion rule. Unmapped inputs yield `None`; callers degrade.

/// The five macro-regions, in conventional order
pub const REGION_NAMES: [&str; 5] = ["Norte", "Nordeste", "Centro-Oeste", "Sudeste", "Sul"];

/// Map a validated two-letter state code to its macro-region
#[must_use]
pub fn region_for_uf(uf: &str) -> Option<&'static str> {
    let region = match uf {
        "AC" | "AM" | "AP" | "PA" | "RO" | "RR" | "TO" => "Norte",
        "AL" | "BA" | "CE" | "MA" | "PB" | "PE" | "PI" | "RN" | "SE" => "Nordeste",
        "DF" | "GO" | "MT" | "MS" => "Centro-Oeste",
        "ES" | "MG" | "RJ" | "SP" => "Sudeste",
        "PR" | "RS" | "SC" => "Sul",
        _ => return None,
    };
    Some(region)
}

/// Map a normalized state name (see [`crate::text::normalize`]) to its UF code
#[must_use]
pub fn uf_for_state_name(normalized_name: &str) -> Option<&'static str> {
    let uf = match normalized_name {
        "acre" => "AC",
        "alagoas" => "AL",
        "amapa" => "AP",
        "amazonas" => "AM",
        "bahia" => "BA",
        "ceara" => "CE",
        "distrito federal" => "DF",
        "espirito santo" => "ES",
        "goias" => "GO",
        "maranhao" => "MA",
        "mato grosso" => "MT",
        "mato grosso do sul" => "MS",
        "minas gerais" => "MG",
        "para" => "PA",
        "paraiba" => "PB",
        "parana" => "PR",
        "pernambuco" => "PE",
        "piaui" => "PI",
        "rio de janeiro" => "RJ",
        "rio grande do norte" => "RN",
        "rio grande do sul" => "RS",
        "rondonia" => "RO",
        "roraima" => "RR",
        "santa catarina" => "SC",
        "sao paulo" => "SP",
        "sergipe" => "SE",
        "tocantins" => "TO",
        _ => return None,
    };
    Some(uf)
}

/// State capitals per macro-region, as spelled in the survey base
#[must_use]
pub fn capitals_for_region(region: &str) -> &'static [&'static str] {
    match region {
        "Norte" => &[
            "Rio Branco",
            "Macapá",
            "Manaus",
            "Belém",
            "Porto Velho",
            "Boa Vista",
            "Palmas",
        ],
        "Nordeste" => &[
            "São Luís",
            "Teresina",
            "Fortaleza",
            "Natal",
            "João Pessoa",
            "Recife",
            "Maceió",
            "Aracaju",
            "Salvador",
        ],
        "Centro-Oeste" => &["Brasília", "Goiânia", "Cuiabá", "Campo Grande"],
        "Sudeste" => &["Belo Horizonte", "Vitória", "Rio de Janeiro", "São Paulo"],
        "Sul" => &["Curitiba", "Florianópolis", "Porto Alegre"],
        _ => &[],
    }
}
