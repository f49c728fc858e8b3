use crate::{ex, spo, translate, triple, var};
use sparql_algebra_logical::Operation;
use sparql_algebra_syntax::{
    ContextDefinition, DatasetClause, DescribeTarget, ExpressionSyntax, GraphNode, IriRef,
    OrderCondition, PatternSyntax, PropertyListItem, QueryForm, QuerySyntax, SelectItem,
    SelectModifier, Selection, TermSyntax,
};
use sparql_algebra_translator::{
    AlgebraTranslator, TranslationError, TranslationOptions, TranslationResult,
};

#[test]
fn test_filters_move_to_the_end_of_the_group() -> TranslationResult<()> {
    let query = QuerySyntax::select(
        vec![var("s"), var("o")],
        vec![
            PatternSyntax::bgp(vec![
                triple(var("s"), ex("p"), var("o")),
                triple(var("o"), ex("q"), var("x")),
            ]),
            PatternSyntax::filter(ExpressionSyntax::operation(
                ">",
                vec![ExpressionSyntax::variable("x"), ExpressionSyntax::literal("1")],
            )),
            PatternSyntax::optional(vec![spo("s", "r", "y")]),
        ],
    );

    insta::assert_snapshot!(translate(&query)?, @r#"
    Project: ?s, ?o
      Filter: >(?x, "1")
        LeftJoin
          Bgp
            Pattern (?s <http://example.com/p> ?o)
            Pattern (?o <http://example.com/q> ?x)
          Bgp
            Pattern (?s <http://example.com/r> ?y)
    "#);
    Ok(())
}

#[test]
fn test_optional_filter_becomes_left_join_expression() -> TranslationResult<()> {
    let query = QuerySyntax::select(
        vec![var("s")],
        vec![
            spo("s", "p", "o"),
            PatternSyntax::optional(vec![
                spo("s", "r", "y"),
                PatternSyntax::filter(ExpressionSyntax::operation(
                    "BOUND",
                    vec![ExpressionSyntax::variable("y")],
                )),
            ]),
        ],
    );

    insta::assert_snapshot!(translate(&query)?, @r"
    Project: ?s
      LeftJoin: bound(?y)
        Bgp
          Pattern (?s <http://example.com/p> ?o)
        Bgp
          Pattern (?s <http://example.com/r> ?y)
    ");
    Ok(())
}

#[test]
fn test_select_all_with_union_minus_and_bind() -> TranslationResult<()> {
    let query = QuerySyntax::select_all(vec![
        PatternSyntax::union(vec![
            PatternSyntax::group(vec![spo("s", "p", "o")]),
            PatternSyntax::group(vec![spo("s", "q", "o")]),
        ]),
        PatternSyntax::minus(vec![spo("s", "r", "m")]),
        PatternSyntax::bind(
            ExpressionSyntax::operation("str", vec![ExpressionSyntax::variable("o")]),
            var("label"),
        ),
    ]);

    insta::assert_snapshot!(translate(&query)?, @r"
    Project: ?label, ?o, ?s
      Extend: ?label := str(?o)
        Minus
          Union
            Bgp
              Pattern (?s <http://example.com/p> ?o)
            Bgp
              Pattern (?s <http://example.com/q> ?o)
          Bgp
            Pattern (?s <http://example.com/r> ?m)
    ");
    Ok(())
}

#[test]
fn test_solution_modifiers_and_dataset() -> TranslationResult<()> {
    let mut query = QuerySyntax::new(
        QueryForm::Select {
            selection: Selection::Items(vec![SelectItem::Variable(var("s"))]),
            modifier: Some(SelectModifier::Distinct),
        },
        vec![spo("s", "p", "o")],
    );
    query.modifiers.order = vec![OrderCondition::desc(ExpressionSyntax::variable("o"))];
    query.modifiers.limit = Some(10);
    query.modifiers.offset = Some(5);
    query.dataset = Some(DatasetClause {
        default: vec![ex("g")],
        named: Vec::new(),
    });

    insta::assert_snapshot!(translate(&query)?, @r"
    From: default=[<http://example.com/g>], named=[]
      Slice: start=5, length=10
        Distinct
          Project: ?s
            OrderBy: desc(?o)
              Bgp
                Pattern (?s <http://example.com/p> ?o)
    ");
    Ok(())
}

#[test]
fn test_offset_zero_without_limit_has_no_slice() -> TranslationResult<()> {
    let mut query = QuerySyntax::select(vec![var("s")], vec![spo("s", "p", "o")]);
    query.modifiers.offset = Some(0);

    let operation = translate(&query)?;
    assert!(matches!(operation, Operation::Project { .. }));
    Ok(())
}

#[test]
fn test_collections_become_lists() -> TranslationResult<()> {
    let query = QuerySyntax::select(
        vec![var("s")],
        vec![PatternSyntax::bgp(vec![triple(
            var("s"),
            ex("list"),
            GraphNode::Collection(vec![var("a").into(), var("b").into()]),
        )])],
    );

    insta::assert_snapshot!(translate(&query)?, @r"
    Project: ?s
      Bgp
        Pattern (?s <http://example.com/list> _:df_0)
        Pattern (_:df_0 <http://www.w3.org/1999/02/22-rdf-syntax-ns#first> ?a)
        Pattern (_:df_0 <http://www.w3.org/1999/02/22-rdf-syntax-ns#rest> _:df_1)
        Pattern (_:df_1 <http://www.w3.org/1999/02/22-rdf-syntax-ns#first> ?b)
        Pattern (_:df_1 <http://www.w3.org/1999/02/22-rdf-syntax-ns#rest> <http://www.w3.org/1999/02/22-rdf-syntax-ns#nil>)
    ");
    Ok(())
}

#[test]
fn test_property_lists_use_fresh_blank_nodes() -> TranslationResult<()> {
    let query = QuerySyntax::select(
        vec![var("s")],
        vec![PatternSyntax::bgp(vec![triple(
            var("s"),
            ex("p"),
            GraphNode::BlankNodePropertyList(vec![PropertyListItem::new(
                ex("q"),
                vec![var("o").into()],
            )]),
        )])],
    );

    insta::assert_snapshot!(translate(&query)?, @r"
    Project: ?s
      Bgp
        Pattern (?s <http://example.com/p> _:df_0)
        Pattern (_:df_0 <http://example.com/q> ?o)
    ");
    Ok(())
}

#[test]
fn test_blank_node_counter_is_shared_between_translations() -> TranslationResult<()> {
    let query = QuerySyntax::ask(vec![PatternSyntax::bgp(vec![triple(
        TermSyntax::anonymous(),
        ex("p"),
        var("o"),
    )])]);
    let mut translator = AlgebraTranslator::new(TranslationOptions::default());

    insta::assert_snapshot!(translator.translate_query(&query)?, @r"
    Ask
      Bgp
        Pattern (_:df_0 <http://example.com/p> ?o)
    ");
    insta::assert_snapshot!(translator.translate_query(&query)?, @r"
    Ask
      Bgp
        Pattern (_:df_1 <http://example.com/p> ?o)
    ");

    translator.term_factory_mut().reset_blank_node_counter();
    insta::assert_snapshot!(translator.translate_query(&query)?, @r"
    Ask
      Bgp
        Pattern (_:df_0 <http://example.com/p> ?o)
    ");
    Ok(())
}

#[test]
fn test_blank_nodes_become_unique_variables() -> TranslationResult<()> {
    let query = QuerySyntax::select_all(vec![PatternSyntax::bgp(vec![triple(
        TermSyntax::blank_node("b"),
        ex("p"),
        var("b"),
    )])]);
    let options = TranslationOptions::default().with_blank_to_variable(true);

    insta::assert_snapshot!(sparql_algebra_translator::translate_query(&query, &options)?, @r"
    Project: ?b
      Bgp
        Pattern (?b0 <http://example.com/p> ?b)
    ");
    Ok(())
}

#[test]
fn test_construct_and_describe() -> TranslationResult<()> {
    let construct = QuerySyntax::new(
        QueryForm::Construct {
            template: vec![triple(var("s"), ex("q"), var("o"))],
        },
        vec![spo("s", "p", "o")],
    );
    insta::assert_snapshot!(translate(&construct)?, @r"
    Construct: (?s <http://example.com/q> ?o)
      Bgp
        Pattern (?s <http://example.com/p> ?o)
    ");

    let describe = QuerySyntax::new(
        QueryForm::Describe {
            terms: DescribeTarget::Terms(vec![
                TermSyntax::Iri(ex("a")),
                TermSyntax::variable("s"),
            ]),
        },
        vec![spo("s", "p", "o")],
    );
    insta::assert_snapshot!(translate(&describe)?, @r"
    Describe: <http://example.com/a>, ?s
      Bgp
        Pattern (?s <http://example.com/p> ?o)
    ");

    let describe_all = QuerySyntax::new(
        QueryForm::Describe {
            terms: DescribeTarget::Wildcard,
        },
        vec![spo("s", "p", "o")],
    );
    insta::assert_snapshot!(translate(&describe_all)?, @r"
    Describe: ?o, ?s
      Bgp
        Pattern (?s <http://example.com/p> ?o)
    ");
    Ok(())
}

#[test]
fn test_prologue_resolves_prefixes_and_relative_iris() -> TranslationResult<()> {
    let mut query = QuerySyntax::ask(vec![PatternSyntax::bgp(vec![triple(
        var("s"),
        IriRef::prefixed("ex", "p"),
        IriRef::full("o"),
    )])]);
    query.context = vec![
        ContextDefinition::base("http://example.com/"),
        ContextDefinition::prefix("ex", "ns#"),
    ];

    insta::assert_snapshot!(translate(&query)?, @r"
    Ask
      Bgp
        Pattern (?s <http://example.com/ns#p> <http://example.com/o>)
    ");
    Ok(())
}

#[test]
fn test_unknown_prefix_is_rejected() {
    let query = QuerySyntax::ask(vec![PatternSyntax::bgp(vec![triple(
        var("s"),
        IriRef::prefixed("foaf", "name"),
        var("o"),
    )])]);

    assert!(matches!(
        translate(&query),
        Err(TranslationError::UnknownPrefix(prefix)) if prefix == "foaf"
    ));
}

#[test]
fn test_distinct_function_call_is_rejected() {
    let call = ExpressionSyntax::FunctionCall {
        function: ex("f"),
        args: vec![ExpressionSyntax::variable("o")],
        distinct: true,
        span: Default::default(),
    };
    let query = QuerySyntax::ask(vec![spo("s", "p", "o"), PatternSyntax::filter(call)]);

    assert!(matches!(
        translate(&query),
        Err(TranslationError::DistinctOutsideAggregate(_))
    ));
}
