mod common;

use arrow::array::Array;
use cultura_base::model::columns;
use cultura_base::{BaseCache, prepare_base};

use common::{prepared_batch, raw_batch, string_column};

/// Every canonical column exists even when the raw table has none of the
/// source columns
#[test]
fn canonical_columns_survive_missing_sources() {
    let prepared = prepared_batch(&[(
        "1. Pergunta sem relação com os campos derivados",
        &[Some("resposta"), None],
    )])
    .expect("prepare succeeds on degraded input");

    let expected = [
        columns::ESTADO,
        columns::CIDADE,
        columns::UF,
        columns::REGIAO,
        columns::TIPO_PONTO,
        columns::REGISTRO,
        columns::LINGUAGEM_ARTISTICA,
        columns::LINGUAGENS_LISTA,
        columns::FAIXA_RECEITA,
        columns::POPULACAO,
        columns::FAIXA_POPULACIONAL,
        columns::CLASSIFICACAO_RURAL_URBANA,
    ];
    for name in expected {
        assert!(
            prepared.schema().index_of(name).is_ok(),
            "derived column '{name}' missing"
        );
    }
    for name in columns::RESOURCE_FLAGS {
        assert!(
            prepared.schema().index_of(name).is_ok(),
            "flag column '{name}' missing"
        );
    }

    // degraded defaults: null type, 'Sem dado' brackets
    assert_eq!(
        string_column(&prepared, columns::TIPO_PONTO),
        vec![None, None]
    );
    assert_eq!(
        string_column(&prepared, columns::FAIXA_POPULACIONAL),
        vec![Some("Sem dado".into()), Some("Sem dado".into())]
    );
    assert_eq!(
        string_column(&prepared, columns::CLASSIFICACAO_RURAL_URBANA),
        vec![Some("Sem dado".into()), Some("Sem dado".into())]
    );
}

#[test]
fn hub_flag_classifies_point_kind() {
    let prepared = prepared_batch(&[("Pontão", &[Some("Sim"), Some("sim "), Some("Não"), None])])
        .expect("prepare succeeds");

    assert_eq!(
        string_column(&prepared, columns::TIPO_PONTO),
        vec![
            Some("Pontão".into()),
            Some("Pontão".into()),
            Some("Ponto".into()),
            Some("Ponto".into()),
        ]
    );
}

#[test]
fn uf_is_validated_and_mapped_to_region() {
    let prepared = prepared_batch(&[(
        "uf_api",
        &[Some("ba"), Some(" DF "), Some("Bahia"), Some("b1"), None],
    )])
    .expect("prepare succeeds");

    assert_eq!(
        string_column(&prepared, columns::UF),
        vec![Some("BA".into()), Some("DF".into()), None, None, None]
    );
    assert_eq!(
        string_column(&prepared, columns::REGIAO),
        vec![
            Some("Nordeste".into()),
            Some("Centro-Oeste".into()),
            None,
            None,
            None,
        ]
    );
}

#[test]
fn verbose_revenue_label_is_canonicalized() {
    let prepared = prepared_batch(&[(
        "Receita anual",
        &[
            Some("O Ponto de Cultura não teve receita em 2024"),
            Some("Menor que 15.000"),
            None,
        ],
    )])
    .expect("prepare succeeds");

    assert_eq!(
        string_column(&prepared, columns::FAIXA_RECEITA),
        vec![
            Some("Não teve receita".into()),
            Some("Menor que 15.000".into()),
            None,
        ]
    );
}

/// The 50 000 threshold is exclusive: exactly 50 000 is still rural
#[test]
fn rural_urban_boundary_is_pinned() {
    let prepared = prepared_batch(&[(
        "populacao",
        &[Some("50000"), Some("50001"), Some("abc"), None],
    )])
    .expect("prepare succeeds");

    assert_eq!(
        string_column(&prepared, columns::CLASSIFICACAO_RURAL_URBANA),
        vec![
            Some("Rural".into()),
            Some("Urbano".into()),
            Some("Sem dado".into()),
            Some("Sem dado".into()),
        ]
    );
}

#[test]
fn population_bracket_edges_are_pinned() {
    let prepared = prepared_batch(&[(
        "populacao",
        &[
            Some("5000"),
            Some("5001"),
            Some("10000"),
            Some("20000"),
            Some("50000"),
            Some("100000"),
            Some("500000"),
            Some("500001"),
        ],
    )])
    .expect("prepare succeeds");

    assert_eq!(
        string_column(&prepared, columns::FAIXA_POPULACIONAL),
        vec![
            Some("Até 5.000 habitantes".into()),
            Some("5.001 a 10.000 habitantes".into()),
            Some("5.001 a 10.000 habitantes".into()),
            Some("10.001 a 20.000 habitantes".into()),
            Some("20.001 a 50.000 habitantes".into()),
            Some("50.001 a 100.000 habitantes".into()),
            Some("100.001 a 500.000 habitantes".into()),
            Some("Mais de 500.000 habitantes".into()),
        ]
    );
}

/// An existing bracket column wins over rebucketing and gets its encoding
/// repaired
#[test]
fn existing_bracket_column_is_reused_and_repaired() {
    let prepared = prepared_batch(&[
        ("populacao", &[Some("100")]),
        ("faixa_populacional", &[Some("AtÃ© 5.000 habitantes")]),
    ])
    .expect("prepare succeeds");

    assert_eq!(
        string_column(&prepared, columns::FAIXA_POPULACIONAL),
        vec![Some("Até 5.000 habitantes".into())]
    );
}

#[test]
fn resource_flags_coerce_loose_booleans() {
    let prepared = prepared_batch(&[(
        "14. 1. Se sim, quais? (Recursos Federais)",
        &[Some("Sim"), Some("TRUE"), Some("1"), Some("Não"), None],
    )])
    .expect("prepare succeeds");

    let idx = prepared.schema().index_of(columns::REC_FEDERAL).unwrap();
    let flags = prepared
        .column(idx)
        .as_any()
        .downcast_ref::<arrow::array::BooleanArray>()
        .expect("boolean column");
    let values: Vec<bool> = (0..flags.len()).map(|row| flags.value(row)).collect();
    assert_eq!(values, vec![true, true, true, false, false]);
}

#[test]
fn language_cell_is_split_into_list() {
    let prepared = prepared_batch(&[(
        "11. Se o Ponto de Cultura trabalha com linguagens artísticas, indique qual a predominante:",
        &[Some("Música, Teatro ,Dança"), Some(""), None],
    )])
    .expect("prepare succeeds");

    let idx = prepared
        .schema()
        .index_of(columns::LINGUAGENS_LISTA)
        .unwrap();
    let lists = prepared
        .column(idx)
        .as_any()
        .downcast_ref::<arrow::array::ListArray>()
        .expect("list column");

    let first = lists.value(0);
    let first = first
        .as_any()
        .downcast_ref::<arrow::array::StringArray>()
        .unwrap();
    let items: Vec<&str> = (0..first.len()).map(|i| first.value(i)).collect();
    assert_eq!(items, vec!["Música", "Teatro", "Dança"]);

    assert_eq!(lists.value(1).len(), 0);
    assert_eq!(lists.value(2).len(), 0);
}

/// The cache is keyed by its version tag alone; a changed raw batch is only
/// picked up after a version bump or an explicit invalidation
#[test]
fn cache_recomputes_only_on_version_change() {
    let raw_a = raw_batch(&[("Estado", &[Some("Bahia"), Some("Ceará")])]);
    let raw_b = raw_batch(&[("Estado", &[Some("Pará")])]);

    let mut cache = BaseCache::new("v1");
    let first = cache.get_or_prepare(&raw_a).expect("prepare succeeds");
    assert_eq!(first.num_rows(), 2);

    // same version: the stale entry is served even for a different raw batch
    let cached = cache.get_or_prepare(&raw_b).expect("prepare succeeds");
    assert_eq!(cached.num_rows(), 2);

    cache.set_version("v2");
    let fresh = cache.get_or_prepare(&raw_b).expect("prepare succeeds");
    assert_eq!(fresh.num_rows(), 1);

    cache.invalidate();
    let recomputed = cache.get_or_prepare(&raw_b).expect("prepare succeeds");
    assert_eq!(recomputed.num_rows(), 1);
}

/// Raw columns colliding with derived names are replaced, not duplicated
#[test]
fn derived_columns_replace_raw_homonyms() {
    let raw = raw_batch(&[("estado", &[Some("Bahia")])]);
    let prepared = prepare_base(&raw).expect("prepare succeeds");

    let count = prepared
        .schema()
        .fields()
        .iter()
        .filter(|f| f.name() == columns::ESTADO)
        .count();
    assert_eq!(count, 1);
    assert_eq!(
        string_column(&prepared, columns::ESTADO),
        vec![Some("Bahia".into())]
    );
}
