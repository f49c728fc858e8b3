use crate::{ex, iri_term, triple, var};
use sparql_algebra_logical::Operation;
use sparql_algebra_syntax::{
    ContextDefinition, DatasetClause, GraphOrDefault, GraphRefAll, IriRef, PatternSyntax,
    QuadsBlock, SparqlSyntax, TermSyntax, UpdateKind, UpdateOperationSyntax, UpdateSyntax,
};
use sparql_algebra_translator::{
    to_syntax, translate_update, TranslationError, TranslationOptions, TranslationResult,
};

fn update(kinds: Vec<UpdateKind>) -> UpdateSyntax {
    UpdateSyntax {
        operations: kinds.into_iter().map(UpdateOperationSyntax::new).collect(),
    }
}

fn translate(update: &UpdateSyntax) -> TranslationResult<Operation> {
    translate_update(update, &TranslationOptions::default().with_quads(true))
}

fn ground_data() -> Vec<QuadsBlock> {
    vec![QuadsBlock::Triples(vec![triple(ex("a"), ex("p"), ex("b"))])]
}

#[test]
fn test_insert_data() -> TranslationResult<()> {
    let update = update(vec![UpdateKind::InsertData {
        data: ground_data(),
    }]);

    let operation = translate(&update)?;
    insta::assert_snapshot!(operation, @r"
    DeleteInsert
      Insert: (<http://example.com/a> <http://example.com/p> <http://example.com/b>)
    ");
    assert_eq!(to_syntax(&operation)?, SparqlSyntax::Update(update));
    Ok(())
}

#[test]
fn test_updates_require_quads() {
    let update = update(vec![UpdateKind::InsertData {
        data: ground_data(),
    }]);

    assert!(matches!(
        translate_update(&update, &TranslationOptions::default()),
        Err(TranslationError::QuadsRequired)
    ));
}

#[test]
fn test_delete_data_in_graph() -> TranslationResult<()> {
    let update = update(vec![UpdateKind::DeleteData {
        data: vec![QuadsBlock::Graph {
            name: iri_term("g"),
            triples: vec![triple(ex("a"), ex("p"), ex("b"))],
        }],
    }]);

    let operation = translate(&update)?;
    insta::assert_snapshot!(operation, @r"
    DeleteInsert
      Delete: (<http://example.com/a> <http://example.com/p> <http://example.com/b> <http://example.com/g>)
    ");
    assert_eq!(to_syntax(&operation)?, SparqlSyntax::Update(update));
    Ok(())
}

#[test]
fn test_delete_where_has_no_where_clause() -> TranslationResult<()> {
    let update = update(vec![UpdateKind::DeleteWhere {
        pattern: vec![QuadsBlock::Triples(vec![triple(
            var("s"),
            ex("p"),
            var("o"),
        )])],
    }]);

    let operation = translate(&update)?;
    insta::assert_snapshot!(operation, @r"
    DeleteInsert
      Delete: (?s <http://example.com/p> ?o)
    ");
    assert_eq!(to_syntax(&operation)?, SparqlSyntax::Update(update));
    Ok(())
}

#[test]
fn test_with_graph_scopes_templates_and_where() -> TranslationResult<()> {
    let modify = UpdateKind::Modify {
        with: Some(ex("g")),
        delete: vec![QuadsBlock::Triples(vec![triple(var("s"), ex("p"), var("o"))])],
        insert: vec![QuadsBlock::Graph {
            name: iri_term("h"),
            triples: vec![triple(var("s"), ex("q"), var("o"))],
        }],
        using: None,
        where_clause: vec![PatternSyntax::bgp(vec![triple(var("s"), ex("p"), var("o"))])],
    };

    let operation = translate(&update(vec![modify]))?;
    insta::assert_snapshot!(operation, @r"
    DeleteInsert
      Delete: (?s <http://example.com/p> ?o <http://example.com/g>)
      Insert: (?s <http://example.com/q> ?o <http://example.com/h>)
      Bgp
        Pattern (?s <http://example.com/p> ?o <http://example.com/g>)
    ");

    let expected = UpdateKind::Modify {
        with: None,
        delete: vec![QuadsBlock::Graph {
            name: iri_term("g"),
            triples: vec![triple(var("s"), ex("p"), var("o"))],
        }],
        insert: vec![QuadsBlock::Graph {
            name: iri_term("h"),
            triples: vec![triple(var("s"), ex("q"), var("o"))],
        }],
        using: None,
        where_clause: vec![PatternSyntax::graph(
            iri_term("g"),
            vec![PatternSyntax::bgp(vec![triple(var("s"), ex("p"), var("o"))])],
        )],
    };
    assert_eq!(
        to_syntax(&operation)?,
        SparqlSyntax::Update(update(vec![expected]))
    );
    Ok(())
}

#[test]
fn test_using_overrides_with() -> TranslationResult<()> {
    let modify = UpdateKind::Modify {
        with: Some(ex("g")),
        delete: Vec::new(),
        insert: vec![QuadsBlock::Triples(vec![triple(var("s"), ex("q"), var("o"))])],
        using: Some(DatasetClause {
            default: vec![ex("d")],
            named: Vec::new(),
        }),
        where_clause: vec![PatternSyntax::bgp(vec![triple(var("s"), ex("p"), var("o"))])],
    };

    insta::assert_snapshot!(translate(&update(vec![modify]))?, @r"
    DeleteInsert
      Insert: (?s <http://example.com/q> ?o <http://example.com/g>)
      From: default=[<http://example.com/d>], named=[]
        Bgp
          Pattern (?s <http://example.com/p> ?o)
    ");
    Ok(())
}

#[test]
fn test_empty_where_is_an_empty_bgp() -> TranslationResult<()> {
    let modify = UpdateKind::Modify {
        with: None,
        delete: Vec::new(),
        insert: ground_data(),
        using: None,
        where_clause: Vec::new(),
    };

    insta::assert_snapshot!(translate(&update(vec![modify]))?, @r"
    DeleteInsert
      Insert: (<http://example.com/a> <http://example.com/p> <http://example.com/b>)
      Bgp
    ");
    Ok(())
}

#[test]
fn test_graph_management_operations_are_composed() -> TranslationResult<()> {
    let update = update(vec![
        UpdateKind::Load {
            silent: false,
            source: ex("source"),
            destination: Some(ex("g")),
        },
        UpdateKind::Clear {
            silent: true,
            graph: GraphRefAll::All,
        },
        UpdateKind::Copy {
            silent: false,
            source: GraphOrDefault::Default,
            destination: GraphOrDefault::Graph(ex("g")),
        },
    ]);

    let operation = translate(&update)?;
    insta::assert_snapshot!(operation, @r"
    CompositeUpdate
      Load: <http://example.com/source> INTO <http://example.com/g>
      Clear SILENT: ALL
      Copy: DEFAULT TO <http://example.com/g>
    ");
    assert_eq!(to_syntax(&operation)?, SparqlSyntax::Update(update));
    Ok(())
}

#[test]
fn test_prefixes_carry_over_to_later_operations() -> TranslationResult<()> {
    let mut first = UpdateOperationSyntax::new(UpdateKind::Create {
        silent: false,
        graph: IriRef::prefixed("ex", "g"),
    });
    first.context = vec![ContextDefinition::prefix("ex", "http://example.com/")];
    let second = UpdateOperationSyntax::new(UpdateKind::Drop {
        silent: false,
        graph: GraphRefAll::Graph(IriRef::prefixed("ex", "g")),
    });
    let update = UpdateSyntax {
        operations: vec![first, second],
    };

    insta::assert_snapshot!(translate(&update)?, @r"
    CompositeUpdate
      Create: <http://example.com/g>
      Drop: <http://example.com/g>
    ");
    Ok(())
}

#[test]
fn test_empty_update_is_nop() -> TranslationResult<()> {
    let update = UpdateSyntax::default();

    let operation = translate(&update)?;
    assert_eq!(operation, Operation::Nop);
    assert_eq!(to_syntax(&operation)?, SparqlSyntax::Update(update));
    Ok(())
}

#[test]
fn test_quads_in_templates_keep_blank_node_labels() -> TranslationResult<()> {
    let update = update(vec![UpdateKind::InsertData {
        data: vec![QuadsBlock::Triples(vec![triple(
            TermSyntax::blank_node("b"),
            ex("p"),
            ex("o"),
        )])],
    }]);

    insta::assert_snapshot!(translate(&update)?, @r"
    DeleteInsert
      Insert: (_:b <http://example.com/p> <http://example.com/o>)
    ");
    Ok(())
}
