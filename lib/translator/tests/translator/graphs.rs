use crate::{iri_term, spo, translate, translate_quads, var};
use sparql_algebra_syntax::{PatternSyntax, QuerySyntax, TermSyntax};
use sparql_algebra_translator::{TranslationError, TranslationResult};

fn graph_query(name: TermSyntax, patterns: Vec<PatternSyntax>) -> QuerySyntax {
    QuerySyntax::select_all(vec![PatternSyntax::graph(name, patterns)])
}

#[test]
fn test_graph_node_without_quads() -> TranslationResult<()> {
    let query = graph_query(TermSyntax::variable("g"), vec![spo("s", "p", "o")]);

    insta::assert_snapshot!(translate(&query)?, @r"
    Project: ?g, ?o, ?s
      Graph: ?g
        Bgp
          Pattern (?s <http://example.com/p> ?o)
    ");
    Ok(())
}

#[test]
fn test_quads_carry_the_graph() -> TranslationResult<()> {
    let query = graph_query(TermSyntax::variable("g"), vec![spo("s", "p", "o")]);

    insta::assert_snapshot!(translate_quads(&query)?, @r"
    Project: ?g, ?o, ?s
      Bgp
        Pattern (?s <http://example.com/p> ?o ?g)
    ");
    Ok(())
}

#[test]
fn test_inner_graph_wins() -> TranslationResult<()> {
    let query = graph_query(
        iri_term("a"),
        vec![
            spo("s", "p", "o"),
            PatternSyntax::graph(iri_term("b"), vec![spo("o", "q", "x")]),
        ],
    );

    insta::assert_snapshot!(translate_quads(&query)?, @r"
    Project: ?o, ?s, ?x
      Bgp
        Pattern (?s <http://example.com/p> ?o <http://example.com/a>)
        Pattern (?o <http://example.com/q> ?x <http://example.com/b>)
    ");
    Ok(())
}

#[test]
fn test_hidden_graph_variable_is_renamed() -> TranslationResult<()> {
    let query = graph_query(
        TermSyntax::variable("g"),
        vec![PatternSyntax::SubSelect(Box::new(QuerySyntax::select(
            vec![var("s")],
            vec![spo("s", "p", "g")],
        )))],
    );

    insta::assert_snapshot!(translate_quads(&query)?, @r"
    Project: ?g, ?s
      Project: ?s
        Bgp
          Pattern (?s <http://example.com/p> ?var0 ?g)
    ");
    Ok(())
}

#[test]
fn test_projected_graph_variable_is_kept() -> TranslationResult<()> {
    let query = graph_query(
        TermSyntax::variable("g"),
        vec![PatternSyntax::SubSelect(Box::new(QuerySyntax::select(
            vec![var("s"), var("g")],
            vec![spo("s", "p", "g")],
        )))],
    );

    insta::assert_snapshot!(translate_quads(&query)?, @r"
    Project: ?g, ?s
      Project: ?s, ?g
        Bgp
          Pattern (?s <http://example.com/p> ?g ?g)
    ");
    Ok(())
}

#[test]
fn test_service_is_not_scoped() -> TranslationResult<()> {
    let query = graph_query(
        iri_term("a"),
        vec![PatternSyntax::service(
            iri_term("endpoint"),
            true,
            vec![spo("s", "p", "o")],
        )],
    );

    insta::assert_snapshot!(translate_quads(&query)?, @r"
    Project: ?o, ?s
      Service SILENT: <http://example.com/endpoint>
        Bgp
          Pattern (?s <http://example.com/p> ?o)
    ");
    Ok(())
}

#[test]
fn test_nested_graph_with_renamed_variable_is_rejected() {
    let query = graph_query(
        TermSyntax::variable("g"),
        vec![PatternSyntax::SubSelect(Box::new(QuerySyntax::select(
            vec![var("s")],
            vec![PatternSyntax::graph(
                TermSyntax::variable("g"),
                vec![spo("s", "p", "o")],
            )],
        )))],
    );

    assert!(matches!(
        translate_quads(&query),
        Err(TranslationError::NestedGraphWithReplacement(_))
    ));
}
