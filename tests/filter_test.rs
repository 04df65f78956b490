mod common;

use cultura_base::model::{SimNao, columns};
use cultura_base::{
    ActionOption, Criterion, FilterSet, apply_criteria, apply_filter_set, prepare_base,
};

use common::{prepared_batch, raw_batch, string_column};

fn sample_prepared() -> cultura_base::RecordBatch {
    prepared_batch(&[
        (
            "Estado",
            &[
                Some("Bahia"),
                Some("Ceará"),
                Some("Paraná"),
                Some("Bahia"),
                None,
            ],
        ),
        (
            "cidade_api",
            &[
                Some("Salvador"),
                Some("Fortaleza"),
                Some("Curitiba"),
                Some("Ilhéus"),
                None,
            ],
        ),
        (
            "uf_api",
            &[Some("BA"), Some("CE"), Some("PR"), Some("BA"), None],
        ),
        (
            "Pontão",
            &[Some("Sim"), Some("Não"), Some("Não"), None, Some("Sim")],
        ),
        (
            "11. Se o Ponto de Cultura trabalha com linguagens artísticas, indique qual a predominante:",
            &[
                Some("Música, Teatro"),
                Some("Dança"),
                Some("Música"),
                None,
                Some("Teatro, Circo"),
            ],
        ),
        (
            "14. 1. Se sim, quais? (Recursos Federais)",
            &[Some("Sim"), Some("Não"), Some("Sim"), None, None],
        ),
        (
            "14. 1. Se sim, quais? (Recursos Estaduais)",
            &[Some("Não"), Some("Sim"), Some("Não"), None, None],
        ),
    ])
    .expect("prepare succeeds")
}

/// An empty criteria list is the identity filter
#[test]
fn empty_criteria_is_identity() {
    let prepared = sample_prepared();
    let filtered = apply_criteria(&prepared, &[]).expect("apply succeeds");

    assert_eq!(filtered.num_rows(), prepared.num_rows());
    assert_eq!(
        string_column(&filtered, columns::ESTADO),
        string_column(&prepared, columns::ESTADO)
    );
}

#[test]
fn multi_select_is_or_within_field() {
    let prepared = sample_prepared();
    let criteria = [Criterion::multi_select(
        columns::ESTADO,
        vec!["Bahia".into(), "Ceará".into()],
    )];
    let filtered = apply_criteria(&prepared, &criteria).expect("apply succeeds");

    assert_eq!(
        string_column(&filtered, columns::CIDADE),
        vec![
            Some("Salvador".into()),
            Some("Fortaleza".into()),
            Some("Ilhéus".into()),
        ]
    );
}

#[test]
fn language_filter_intersects_parsed_lists() {
    let prepared = sample_prepared();
    let criteria = [Criterion::ListContainsAny {
        field: columns::LINGUAGENS_LISTA.to_string(),
        values: vec!["Teatro".into()],
    }];
    let filtered = apply_criteria(&prepared, &criteria).expect("apply succeeds");

    // rows 0 and 4 list Teatro among their languages
    assert_eq!(filtered.num_rows(), 2);
    assert_eq!(
        string_column(&filtered, columns::TIPO_PONTO),
        vec![Some("Pontão".into()), Some("Pontão".into())]
    );
}

#[test]
fn or_group_spans_boolean_columns() {
    let prepared = sample_prepared();
    let criteria = [Criterion::OrGroup {
        columns: vec![
            columns::REC_FEDERAL.to_string(),
            columns::REC_ESTADUAL.to_string(),
        ],
    }];
    let filtered = apply_criteria(&prepared, &criteria).expect("apply succeeds");

    assert_eq!(filtered.num_rows(), 3);
}

#[test]
fn boolean_flag_matches_requested_answer() {
    let prepared = sample_prepared();

    let sim = [Criterion::BooleanFlag {
        column: columns::REC_FEDERAL.to_string(),
        value: SimNao::Sim,
    }];
    assert_eq!(
        apply_criteria(&prepared, &sim).expect("apply").num_rows(),
        2
    );

    let nao = [Criterion::BooleanFlag {
        column: columns::REC_FEDERAL.to_string(),
        value: SimNao::Nao,
    }];
    assert_eq!(
        apply_criteria(&prepared, &nao).expect("apply").num_rows(),
        3
    );
}

#[test]
fn single_select_behaves_like_one_element_multi() {
    let prepared = sample_prepared();
    let filters = FilterSet {
        tipo_ponto: Some("Pontão".into()),
        ..FilterSet::default()
    };
    let filtered = apply_filter_set(&prepared, &filters, &[]).expect("apply succeeds");

    assert_eq!(filtered.num_rows(), 2);
}

/// Criteria commute and compose: sequential application equals combined
/// application regardless of order
#[test]
fn criteria_compose_commutatively() {
    let prepared = sample_prepared();
    let by_state = Criterion::multi_select(columns::ESTADO, vec!["Bahia".into(), "Ceará".into()]);
    let by_kind = Criterion::multi_select(columns::TIPO_PONTO, vec!["Ponto".into()]);

    let combined = apply_criteria(&prepared, &[by_state.clone(), by_kind.clone()])
        .expect("combined apply succeeds");
    let sequential = apply_criteria(
        &apply_criteria(&prepared, &[by_state.clone()]).expect("first apply"),
        &[by_kind.clone()],
    )
    .expect("second apply");
    let reversed = apply_criteria(
        &apply_criteria(&prepared, &[by_kind]).expect("first apply"),
        &[by_state],
    )
    .expect("second apply");

    let key = |batch: &cultura_base::RecordBatch| string_column(batch, columns::CIDADE);
    assert_eq!(key(&combined), key(&sequential));
    assert_eq!(key(&combined), key(&reversed));
}

#[test]
fn applying_criteria_twice_is_idempotent() {
    let prepared = sample_prepared();
    let criteria = [Criterion::multi_select(
        columns::ESTADO,
        vec!["Bahia".into()],
    )];

    let once = apply_criteria(&prepared, &criteria).expect("apply succeeds");
    let twice = apply_criteria(&once, &criteria).expect("apply succeeds");

    assert_eq!(once.num_rows(), twice.num_rows());
    assert_eq!(
        string_column(&once, columns::CIDADE),
        string_column(&twice, columns::CIDADE)
    );
}

/// Structuring-action selections OR over the raw per-action columns via the
/// catalog's label-to-column mapping
#[test]
fn action_selection_lowers_to_or_group() {
    let raw = raw_batch(&[
        (
            "10. Ações estruturantes relacionadas: (Culturas Populares)",
            &[Some("Sim"), Some("Não"), None],
        ),
        (
            "10. Ações estruturantes relacionadas: (Cultura Digital)",
            &[Some("Não"), Some("Sim"), None],
        ),
    ]);
    let prepared = prepare_base(&raw).expect("prepare succeeds");
    let actions = [
        ActionOption {
            label: "Culturas Populares".into(),
            column: "10. Ações estruturantes relacionadas: (Culturas Populares)".into(),
        },
        ActionOption {
            label: "Cultura Digital".into(),
            column: "10. Ações estruturantes relacionadas: (Cultura Digital)".into(),
        },
    ];

    let filters = FilterSet {
        acoes_estruturantes: vec!["Culturas Populares".into()],
        ..FilterSet::default()
    };
    let filtered = apply_filter_set(&prepared, &filters, &actions).expect("apply succeeds");
    assert_eq!(filtered.num_rows(), 1);

    let both = FilterSet {
        acoes_estruturantes: vec!["Culturas Populares".into(), "Cultura Digital".into()],
        ..FilterSet::default()
    };
    let filtered = apply_filter_set(&prepared, &both, &actions).expect("apply succeeds");
    assert_eq!(filtered.num_rows(), 2);
}

/// A selection of labels that resolve to no columns keeps nothing; with no
/// action columns in the base at all the selection is skipped instead
#[test]
fn action_selection_degrades_explicitly() {
    let prepared = sample_prepared();

    let unknown_label = FilterSet {
        acoes_estruturantes: vec!["Rótulo inexistente".into()],
        ..FilterSet::default()
    };
    let actions = [ActionOption {
        label: "Cultura Digital".into(),
        column: "coluna que não está na base".into(),
    }];
    let filtered = apply_filter_set(&prepared, &unknown_label, &actions).expect("apply succeeds");
    assert_eq!(filtered.num_rows(), 0);

    // feature unavailable: no action catalog means the selection is dropped
    let filtered =
        apply_filter_set(&prepared, &unknown_label, &[]).expect("apply succeeds");
    assert_eq!(filtered.num_rows(), prepared.num_rows());
}

#[test]
fn default_filter_set_is_empty_and_identity() {
    let prepared = sample_prepared();
    let filters = FilterSet::default();

    assert!(filters.is_empty());
    let filtered = apply_filter_set(&prepared, &filters, &[]).expect("apply succeeds");
    assert_eq!(filtered.num_rows(), prepared.num_rows());
}
