use crate::{spo, translate, translate_quads, var};
use sparql_algebra_logical::{Operation, Pattern};
use sparql_algebra_model::{AggregateFunction, NamedNode, Term};
use sparql_algebra_syntax::{
    ExpressionSyntax, GroupCondition, PatternSyntax, QueryForm, QuerySyntax, SelectItem,
    SelectModifier, Selection, SparqlSyntax, TermSyntax, ValuesClause,
};
use sparql_algebra_translator::{to_syntax, AstTranslator, TranslationError, TranslationResult};

fn example(local: &str) -> Term {
    NamedNode::new_unchecked(format!("http://example.com/{local}")).into()
}

/// Translates `query` into the algebra and back.
fn round_trip(query: &QuerySyntax) -> TranslationResult<SparqlSyntax> {
    to_syntax(&translate(query)?)
}

#[test]
fn test_quads_become_graph_patterns_inside_the_projection() -> TranslationResult<()> {
    let operation = Operation::project(
        Operation::bgp(vec![Pattern::new(
            var("s").into(),
            example("p"),
            var("o").into(),
            var("g").into(),
        )]),
        vec![var("s")],
    );

    let expected = QuerySyntax::select(
        vec![var("s")],
        vec![PatternSyntax::graph(
            TermSyntax::variable("g"),
            vec![spo("s", "p", "o")],
        )],
    );
    assert_eq!(to_syntax(&operation)?, SparqlSyntax::Query(expected));
    Ok(())
}

#[test]
fn test_graph_patterns_are_restored_in_both_modes() -> TranslationResult<()> {
    let query = QuerySyntax::select(
        vec![var("s")],
        vec![PatternSyntax::graph(
            TermSyntax::variable("g"),
            vec![spo("s", "p", "o")],
        )],
    );

    let expected = SparqlSyntax::Query(query.clone());
    assert_eq!(to_syntax(&translate(&query)?)?, expected);
    assert_eq!(to_syntax(&translate_quads(&query)?)?, expected);
    Ok(())
}

#[test]
fn test_aggregates_are_restored_from_group() -> TranslationResult<()> {
    let count = ExpressionSyntax::aggregate(
        AggregateFunction::Count,
        false,
        ExpressionSyntax::variable("o"),
    );
    let mut query = QuerySyntax::new(
        QueryForm::Select {
            selection: Selection::Items(vec![
                SelectItem::Variable(var("s")),
                SelectItem::Expression {
                    expression: count.clone(),
                    variable: var("c"),
                },
            ]),
            modifier: None,
        },
        vec![spo("s", "p", "o")],
    );
    query.modifiers.group = vec![GroupCondition::variable(var("s"))];
    query.modifiers.having = vec![ExpressionSyntax::operation(
        ">",
        vec![count, ExpressionSyntax::literal("1")],
    )];

    assert_eq!(round_trip(&query)?, SparqlSyntax::Query(query));
    Ok(())
}

#[test]
fn test_trailing_values_stay_after_grouping() -> TranslationResult<()> {
    let mut query = QuerySyntax::new(
        QueryForm::Select {
            selection: Selection::Items(vec![
                SelectItem::Variable(var("s")),
                SelectItem::Expression {
                    expression: ExpressionSyntax::aggregate(
                        AggregateFunction::Count,
                        false,
                        ExpressionSyntax::variable("o"),
                    ),
                    variable: var("c"),
                },
            ]),
            modifier: None,
        },
        vec![spo("s", "p", "o")],
    );
    query.modifiers.group = vec![GroupCondition::variable(var("s"))];
    query.values = Some(ValuesClause {
        variables: vec![var("z")],
        rows: vec![
            vec![Some(TermSyntax::literal("1"))],
            vec![Some(TermSyntax::literal("2"))],
        ],
    });

    assert_eq!(round_trip(&query)?, SparqlSyntax::Query(query));
    Ok(())
}

#[test]
fn test_bind_stays_inside_named_graph() -> TranslationResult<()> {
    let query = QuerySyntax::select(
        vec![var("g"), var("o"), var("s"), var("x")],
        vec![PatternSyntax::graph(
            TermSyntax::variable("g"),
            vec![
                spo("s", "p", "o"),
                PatternSyntax::bind(ExpressionSyntax::variable("o"), var("x")),
            ],
        )],
    );

    assert_eq!(round_trip(&query)?, SparqlSyntax::Query(query));
    Ok(())
}

#[test]
fn test_optional_filter_is_restored() -> TranslationResult<()> {
    let query = QuerySyntax::select(
        vec![var("s"), var("y")],
        vec![
            spo("s", "p", "o"),
            PatternSyntax::optional(vec![
                spo("o", "q", "y"),
                PatternSyntax::filter(ExpressionSyntax::operation(
                    "bound",
                    vec![ExpressionSyntax::variable("y")],
                )),
            ]),
        ],
    );

    assert_eq!(round_trip(&query)?, SparqlSyntax::Query(query));
    Ok(())
}

#[test]
fn test_not_exists_is_restored() -> TranslationResult<()> {
    let query = QuerySyntax::select(
        vec![var("s")],
        vec![
            spo("s", "p", "o"),
            PatternSyntax::filter(ExpressionSyntax::exists(true, vec![spo("o", "q", "x")])),
        ],
    );

    assert_eq!(round_trip(&query)?, SparqlSyntax::Query(query));
    Ok(())
}

#[test]
fn test_solution_modifiers_are_restored() -> TranslationResult<()> {
    let mut query = QuerySyntax::new(
        QueryForm::Select {
            selection: Selection::Items(vec![SelectItem::Variable(var("s"))]),
            modifier: Some(SelectModifier::Distinct),
        },
        vec![spo("s", "p", "o")],
    );
    query.modifiers.limit = Some(10);
    query.modifiers.offset = Some(5);

    assert_eq!(round_trip(&query)?, SparqlSyntax::Query(query));
    Ok(())
}

#[test]
fn test_bind_below_projection_becomes_select_expression() -> TranslationResult<()> {
    let label = ExpressionSyntax::operation("str", vec![ExpressionSyntax::variable("o")]);
    let query = QuerySyntax::select_all(vec![
        PatternSyntax::union(vec![spo("s", "p", "o"), spo("s", "q", "o")]),
        PatternSyntax::bind(label.clone(), var("label")),
    ]);

    let expected = QuerySyntax::new(
        QueryForm::Select {
            selection: Selection::Items(vec![
                SelectItem::Expression {
                    expression: label,
                    variable: var("label"),
                },
                SelectItem::Variable(var("o")),
                SelectItem::Variable(var("s")),
            ]),
            modifier: None,
        },
        vec![PatternSyntax::union(vec![
            spo("s", "p", "o"),
            spo("s", "q", "o"),
        ])],
    );
    assert_eq!(round_trip(&query)?, SparqlSyntax::Query(expected));
    Ok(())
}

#[test]
fn test_operation_without_projection_is_wrapped_in_select_all() -> TranslationResult<()> {
    let operation = Operation::bgp(vec![Pattern::triple(
        var("s").into(),
        example("p"),
        var("o").into(),
    )]);

    let expected = QuerySyntax::select_all(vec![spo("s", "p", "o")]);
    assert_eq!(
        AstTranslator::new().translate(&operation)?,
        SparqlSyntax::Query(expected)
    );
    Ok(())
}

#[test]
fn test_conflicting_graph_names_are_rejected() {
    let operation = Operation::graph(
        Operation::bgp(vec![Pattern::new(
            var("s").into(),
            example("p"),
            var("o").into(),
            example("a"),
        )]),
        example("b"),
    );

    assert!(matches!(
        to_syntax(&operation),
        Err(TranslationError::MultipleGraphNames { .. })
    ));
}

#[test]
fn test_empty_projection_becomes_select_all() -> TranslationResult<()> {
    let operation = Operation::project(Operation::bgp(Vec::new()), Vec::new());

    assert_eq!(
        to_syntax(&operation)?,
        SparqlSyntax::Query(QuerySyntax::select_all(Vec::new()))
    );
    Ok(())
}
