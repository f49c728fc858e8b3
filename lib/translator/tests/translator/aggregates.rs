use crate::{spo, translate, var};
use sparql_algebra_model::AggregateFunction;
use sparql_algebra_syntax::{
    ExpressionSyntax, GroupCondition, OrderCondition, PatternSyntax, QueryForm, QuerySyntax,
    SelectItem, Selection, SourceSpan, TermSyntax, ValuesClause,
};
use sparql_algebra_translator::TranslationResult;

fn select(items: Vec<SelectItem>, where_clause: Vec<PatternSyntax>) -> QuerySyntax {
    QuerySyntax::new(
        QueryForm::Select {
            selection: Selection::Items(items),
            modifier: None,
        },
        where_clause,
    )
}

fn count(variable: &str) -> ExpressionSyntax {
    ExpressionSyntax::aggregate(
        AggregateFunction::Count,
        false,
        ExpressionSyntax::variable(variable),
    )
}

#[test]
fn test_aggregates_are_shared_between_select_and_having() -> TranslationResult<()> {
    let mut query = select(
        vec![
            SelectItem::Variable(var("s")),
            SelectItem::Expression {
                expression: count("o").with_span(SourceSpan::new(10, 19)),
                variable: var("c"),
            },
        ],
        vec![spo("s", "p", "o")],
    );
    query.modifiers.group = vec![GroupCondition::variable(var("s"))];
    query.modifiers.having = vec![ExpressionSyntax::operation(
        ">",
        vec![
            count("o").with_span(SourceSpan::new(60, 69)),
            ExpressionSyntax::literal("1"),
        ],
    )];

    insta::assert_snapshot!(translate(&query)?, @r#"
    Project: ?s, ?c
      Extend: ?c := ?var0
        Filter: >(?var0, "1")
          Group: [?s], [?var0 := count(?o)]
            Bgp
              Pattern (?s <http://example.com/p> ?o)
    "#);
    Ok(())
}

#[test]
fn test_aggregates_without_group_by_create_a_group() -> TranslationResult<()> {
    let query = select(
        vec![SelectItem::Expression {
            expression: ExpressionSyntax::count_all(),
            variable: var("n"),
        }],
        vec![spo("s", "p", "o")],
    );

    insta::assert_snapshot!(translate(&query)?, @r"
    Project: ?n
      Extend: ?n := ?var0
        Group: [], [?var0 := count(*)]
          Bgp
            Pattern (?s <http://example.com/p> ?o)
    ");
    Ok(())
}

#[test]
fn test_group_by_expressions_are_extended() -> TranslationResult<()> {
    let mut query = select(
        vec![SelectItem::Variable(var("len"))],
        vec![spo("s", "p", "o")],
    );
    let length = ExpressionSyntax::operation("strlen", vec![ExpressionSyntax::variable("o")]);
    query.modifiers.group = vec![
        GroupCondition {
            expression: length.clone(),
            variable: Some(var("len")),
        },
        GroupCondition {
            expression: length,
            variable: None,
        },
    ];

    insta::assert_snapshot!(translate(&query)?, @r"
    Project: ?len
      Group: [?len, ?var0], []
        Extend: ?var0 := strlen(?o)
          Extend: ?len := strlen(?o)
            Bgp
              Pattern (?s <http://example.com/p> ?o)
    ");
    Ok(())
}

#[test]
fn test_group_concat_keeps_separator_and_order_uses_aggregate() -> TranslationResult<()> {
    let names = ExpressionSyntax::group_concat(
        true,
        ExpressionSyntax::variable("o"),
        Some(", ".to_owned()),
    );
    let mut query = select(
        vec![
            SelectItem::Variable(var("s")),
            SelectItem::Expression {
                expression: names.clone(),
                variable: var("names"),
            },
        ],
        vec![spo("s", "p", "o")],
    );
    query.modifiers.group = vec![GroupCondition::variable(var("s"))];
    query.modifiers.order = vec![OrderCondition::desc(names)];

    insta::assert_snapshot!(translate(&query)?, @r#"
    Project: ?s, ?names
      OrderBy: desc(?var0)
        Extend: ?names := ?var0
          Group: [?s], [?var0 := group_concat(DISTINCT ?o; separator=", ")]
            Bgp
              Pattern (?s <http://example.com/p> ?o)
    "#);
    Ok(())
}

#[test]
fn test_trailing_values_are_joined() -> TranslationResult<()> {
    let mut query = QuerySyntax::select(vec![var("s")], vec![spo("s", "p", "o")]);
    query.values = Some(ValuesClause {
        variables: vec![var("o")],
        rows: vec![vec![Some(TermSyntax::literal("a"))], vec![None]],
    });

    insta::assert_snapshot!(translate(&query)?, @r#"
    Project: ?s
      Join
        Bgp
          Pattern (?s <http://example.com/p> ?o)
        Values: ?o
          ("a")
          (UNDEF)
    "#);
    Ok(())
}
