use crate::{ex, iri, literal, var};
use sparql_algebra_logical::{
    AggregateExpression, BoundAggregate, Expression, Operation, OperationKind, PathPattern,
    Pattern, PropertyPathSymbol,
};
use sparql_algebra_model::{AggregateFunction, Term, Variable};

#[test]
fn test_display_select_plan() {
    let plan = Operation::project(
        Operation::filter(
            Operation::join(vec![
                Operation::bgp(vec![Pattern::triple(var("s"), iri("p"), var("o"))]),
                Operation::path(PathPattern::new(
                    var("o"),
                    PropertyPathSymbol::zero_or_more(PropertyPathSymbol::link(ex("q"))),
                    var("x"),
                    Term::DefaultGraph,
                )),
            ]),
            Expression::operator(">", vec![var("x").into(), literal("1").into()]),
        ),
        vec![Variable::new_unchecked("s"), Variable::new_unchecked("x")],
    );

    insta::assert_snapshot!(plan, @r#"
    Project: ?s, ?x
      Filter: >(?x, "1")
        Join
          Bgp
            Pattern (?s <http://example.com/p> ?o)
          Path (?o <http://example.com/q>* ?x)
    "#);
}

#[test]
fn test_display_group_and_quads() {
    let count = AggregateExpression::new(AggregateFunction::Count, true, Expression::Wildcard);
    let plan = Operation::group(
        Operation::bgp(vec![Pattern::new(
            var("s"),
            iri("p"),
            var("o"),
            var("g"),
        )]),
        vec![Variable::new_unchecked("s")],
        vec![BoundAggregate::new(Variable::new_unchecked("c"), count)],
    );

    insta::assert_snapshot!(plan, @r"
    Group: [?s], [?c := count(DISTINCT *)]
      Bgp
        Pattern (?s <http://example.com/p> ?o ?g)
    ");
}

#[test]
fn test_display_delete_insert() {
    let plan = Operation::delete_insert(
        Some(vec![Pattern::new(var("s"), iri("p"), var("o"), iri("g"))]),
        None,
        Some(Operation::bgp(vec![Pattern::triple(
            var("s"),
            iri("p"),
            var("o"),
        )])),
    );

    insta::assert_snapshot!(plan, @r"
    DeleteInsert
      Delete: (?s <http://example.com/p> ?o <http://example.com/g>)
      Bgp
        Pattern (?s <http://example.com/p> ?o)
    ");
}

#[test]
fn test_display_path_symbols() {
    let symbol = PropertyPathSymbol::alt(vec![
        PropertyPathSymbol::nps(vec![ex("a"), ex("b")]),
        PropertyPathSymbol::inv(PropertyPathSymbol::nps(vec![ex("c")])),
    ]);

    assert_eq!(
        symbol.to_string(),
        "(!(<http://example.com/a> | <http://example.com/b>) | ^!(<http://example.com/c>))"
    );
}

#[test]
fn test_operation_kind_names() {
    assert_eq!(Operation::Nop.kind(), OperationKind::Nop);
    assert_eq!(
        Operation::left_join(Operation::bgp(vec![]), Operation::bgp(vec![]), None)
            .kind()
            .to_string(),
        "leftjoin"
    );
    assert!(Operation::Nop.is_update());
    assert!(!Operation::bgp(vec![]).is_update());
}
