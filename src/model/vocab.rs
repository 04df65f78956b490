//! Ordered value vocabularies of the survey base

use serde::{Deserialize, Serialize};

pub const SIM: &str = "Sim";
pub const NAO: &str = "Não";

pub const PONTO: &str = "Ponto";
pub const PONTAO: &str = "Pontão";

pub const RURAL: &str = "Rural";
pub const URBANO: &str = "Urbano";
pub const SEM_DADO: &str = "Sem dado";

/// Population brackets in display order; boundaries at 5 000 / 10 000 /
/// 20 000 / 50 000 / 100 000 / 500 000 inhabitants
pub const POPULATION_BRACKETS: [&str; 7] = [
    "Até 5.000 habitantes",
    "5.001 a 10.000 habitantes",
    "10.001 a 20.000 habitantes",
    "20.001 a 50.000 habitantes",
    "50.001 a 100.000 habitantes",
    "100.001 a 500.000 habitantes",
    "Mais de 500.000 habitantes",
];

/// Annual revenue brackets in display order
pub const REVENUE_BRACKETS: [&str; 11] = [
    "Não teve receita",
    "Menor que 15.000",
    "15.001 a 50.000",
    "50.001 a 100.000",
    "100.001 a 150.000",
    "150.001 a 200.000",
    "200.001 a 250.000",
    "250.001 a 300.000",
    "300.001 a 350.000",
    "350.001 a 400.000",
    "Maior que 400.000",
];

/// Verbose no-revenue label found in some exports, and its canonical form
pub const REVENUE_NO_INCOME_VERBOSE: &str = "O Ponto de Cultura não teve receita em 2024";
pub const REVENUE_NO_INCOME: &str = "Não teve receita";

/// The structuring actions of the Cultura Viva policy; each one backs a
/// dedicated yes/no column in the survey
pub const STRUCTURING_ACTIONS: [&str; 31] = [
    "Sem ação estruturante",
    "Agente cultura viva",
    "Conhecimentos tradicionais",
    "Cultura Hip Hop",
    "Cultura Alimentar",
    "Cultura Circense",
    "Cultura Digital",
    "Cultura e Mulheres",
    "Cultura e Territórios Rurais",
    "Cultura e Direitos Humanos",
    "Cultura e Educação",
    "Cultura e Juventude",
    "Cultura e Meio Ambiente",
    "Cultura e Saúde",
    "Cultura Urbana e Direito à Cidade",
    "Cultura, Territórios de Fronteira e Integração Latino-americana",
    "Cultura, Comunicação e Mídia livre",
    "Cultura, Infância e Adolescência",
    "Culturas Populares",
    "Culturas Tradicionais",
    "Culturas de Matriz Africana",
    "Culturas Indígenas",
    "Economia criativa e solidária",
    "Gênero e Diversidade",
    "Intercâmbio e residências",
    "Linguagens Artísticas",
    "Livro, leitura e literatura",
    "Memória e Patrimônio cultural",
    "Mestres e Mestras das Culturas Tradicionais e Populares",
    "Acessibilidade Cultural e Equidade",
    "Outras ações estruturantes",
];

/// A yes/no answer as the survey spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimNao {
    #[serde(rename = "Sim")]
    Sim,
    #[serde(rename = "Não")]
    Nao,
}

impl SimNao {
    /// Parse a catalog label into a yes/no answer
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            SIM => Some(Self::Sim),
            NAO => Some(Self::Nao),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(self) -> bool {
        matches!(self, Self::Sim)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sim => SIM,
            Self::Nao => NAO,
        }
    }
}
