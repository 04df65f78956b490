//! Prompt assembly for the text-to-filter interpreter

use crate::catalog::FilterCatalog;

/// Fixed system instruction sent with every interpretation request
pub const SYSTEM_INSTRUCTION: &str = "\
Você é um interpretador semântico do painel \"Pontos de Cultura\".

Seu trabalho: ler a solicitação textual do usuário e traduzi-la para um \
objeto de filtros estruturado, usado para auto-selecionar os filtros do \
painel.

Contexto:
- O painel possui filtros de cadastro territorial/institucional e filtros de acesso a recursos.
- As categorias válidas variam conforme os dados carregados; o schema de resposta traz os valores permitidos do momento atual.
- Não existe tolerância para categorias inventadas.

Interpretação de domínio:
- \"pontões\", \"pontao\", \"pontão\" => tipo_ponto = \"Pontão\".
- \"pontos\" (quando não for pontão) => tipo_ponto = \"Ponto\".
- \"capitais do nordeste\" => selecionar municípios que sejam capitais nordestinas e estejam disponíveis.
- \"somente\", \"apenas\", \"quero ver\", \"filtre por\", \"mostre\" são comandos de filtragem.
- Filtros booleanos representam acesso (Sim/Não) a recursos e modalidades.

Política de validade (solicitacao_valida):
- true quando a entrada parecer uma intenção real de filtrar dados do painel.
- false para texto aleatório, brincadeira, spam ou conteúdo sem relação com filtros.
- Em caso de baixa confiança sem evidência de intenção clara, use false.

Regras de preenchimento:
1) Retorne TODOS os campos do schema.
2) Use exclusivamente valores permitidos no schema (inclusive grafia e acentos).
3) Em campos de lista sem correspondência, retorne [].
4) Em campos únicos sem correspondência, retorne null.
5) Em filtros booleanos, use somente \"Sim\", \"Não\" ou null.
6) Preencha apenas o que estiver explícito ou inferível com alta confiança.
7) Preencha justificativa em uma frase curta e objetiva.
8) Não retorne texto fora do JSON estruturado.";

/// Build the per-call user prompt embedding the catalog
///
/// The prompt carries a numeric summary, the full serialized catalog and a
/// dedicated municipality annex, since municipality names are where the
/// model most often drifts from the catalog spelling.
#[must_use]
pub fn build_user_prompt(request: &str, catalog: &FilterCatalog) -> String {
    let serialized = serde_json::to_string_pretty(&catalog.to_prompt_value())
        .unwrap_or_else(|_| "{}".to_string());
    let annex = catalog
        .municipio
        .iter()
        .map(|city| format!("- {city}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Tarefa:\n\
         Converta a solicitação em filtros estruturados para o painel de Pontos de Cultura.\n\
         Use rigor semântico e obedeça estritamente o schema.\n\
         \n\
         Solicitação do usuário:\n\
         \"\"\"{request}\"\"\"\n\
         \n\
         Resumo do catálogo carregado:\n\
         - Estados disponíveis: {estados}\n\
         - Regiões disponíveis: {regioes}\n\
         - Municípios disponíveis: {municipios}\n\
         - Faixas populacionais: {faixas_pop}\n\
         - Ações estruturantes: {acoes}\n\
         - Linguagens artísticas: {linguagens}\n\
         - Faixas de receita: {receitas}\n\
         \n\
         Regras adicionais de extração:\n\
         - Só preencha filtros mencionados direta ou indiretamente com alta confiança.\n\
         - Se a frase não configurar intenção de filtro do painel, retorne solicitacao_valida=false.\n\
         - Não misture categorias (ex.: estado em município, linguagem em ação etc.).\n\
         - Não preencha campos com aproximações fora do catálogo.\n\
         - Se o usuário pedir capitais de uma região, retorne os municípios-capitais disponíveis no catálogo.\n\
         - Para o campo municipio, use exclusivamente nomes do anexo, preservando a escrita.\n\
         \n\
         Catálogo oficial completo (valores permitidos):\n\
         {serialized}\n\
         \n\
         Anexo: municípios disponíveis para seleção\n\
         {annex}\n\
         \n\
         Retorne somente o objeto JSON estruturado conforme o schema.",
        request = request.trim(),
        estados = catalog.estado.len(),
        regioes = catalog.regiao.len(),
        municipios = catalog.municipio.len(),
        faixas_pop = catalog.faixa_populacional.len(),
        acoes = catalog.acoes_estruturantes.len(),
        linguagens = catalog.linguagem_artistica.len(),
        receitas = catalog.faixa_receita.len(),
    )
}
