use crate::{ex, translate, triple, var};
use sparql_algebra_syntax::{NegatedPathElement, PatternSyntax, PropertyPath, QuerySyntax};
use sparql_algebra_translator::{TranslationError, TranslationResult};

fn path(local: &str) -> PropertyPath {
    PropertyPath::Iri(ex(local))
}

fn path_query(path: PropertyPath) -> QuerySyntax {
    QuerySyntax::select_all(vec![PatternSyntax::bgp(vec![triple(
        var("s"),
        path,
        var("o"),
    )])])
}

#[test]
fn test_sequence_is_chained_through_fresh_variables() -> TranslationResult<()> {
    let query = path_query(PropertyPath::sequence(vec![path("a"), path("b")]));

    insta::assert_snapshot!(translate(&query)?, @r"
    Project: ?o, ?s
      Bgp
        Pattern (?s <http://example.com/a> ?var0)
        Pattern (?var0 <http://example.com/b> ?o)
    ");
    Ok(())
}

#[test]
fn test_inverse_swaps_subject_and_object() -> TranslationResult<()> {
    let query = path_query(PropertyPath::inverse(path("a")));

    insta::assert_snapshot!(translate(&query)?, @r"
    Project: ?o, ?s
      Bgp
        Pattern (?o <http://example.com/a> ?s)
    ");
    Ok(())
}

#[test]
fn test_closures_remain_paths() -> TranslationResult<()> {
    let query = path_query(PropertyPath::zero_or_more(path("a")));

    insta::assert_snapshot!(translate(&query)?, @r"
    Project: ?o, ?s
      Path (?s <http://example.com/a>* ?o)
    ");
    Ok(())
}

#[test]
fn test_paths_split_the_bgp() -> TranslationResult<()> {
    let query = QuerySyntax::select_all(vec![PatternSyntax::bgp(vec![
        triple(var("s"), ex("x"), var("y")),
        triple(
            var("s"),
            PropertyPath::sequence(vec![PropertyPath::one_or_more(path("a")), path("b")]),
            var("o"),
        ),
        triple(var("o"), ex("c"), var("z")),
    ])]);

    insta::assert_snapshot!(translate(&query)?, @r"
    Project: ?o, ?s, ?y, ?z
      Join
        Bgp
          Pattern (?s <http://example.com/x> ?y)
        Path (?s <http://example.com/a>+ ?var0)
        Bgp
          Pattern (?var0 <http://example.com/b> ?o)
          Pattern (?o <http://example.com/c> ?z)
    ");
    Ok(())
}

#[test]
fn test_negated_property_sets_are_split_by_direction() -> TranslationResult<()> {
    let mixed = path_query(PropertyPath::NegatedPropertySet(vec![
        NegatedPathElement::Forward(ex("a")),
        NegatedPathElement::Inverse(ex("b")),
    ]));
    insta::assert_snapshot!(translate(&mixed)?, @r"
    Project: ?o, ?s
      Path (?s (!(<http://example.com/a>) | ^!(<http://example.com/b>)) ?o)
    ");

    let inverse = path_query(PropertyPath::NegatedPropertySet(vec![
        NegatedPathElement::Inverse(ex("b")),
    ]));
    insta::assert_snapshot!(translate(&inverse)?, @r"
    Project: ?o, ?s
      Path (?o !(<http://example.com/b>) ?s)
    ");
    Ok(())
}

#[test]
fn test_paths_in_templates_are_rejected() {
    let query = QuerySyntax::new(
        sparql_algebra_syntax::QueryForm::Construct {
            template: vec![triple(
                var("s"),
                PropertyPath::zero_or_more(path("a")),
                var("o"),
            )],
        },
        Vec::new(),
    );

    assert!(matches!(
        translate(&query),
        Err(TranslationError::PathInTemplate(_))
    ));
}
