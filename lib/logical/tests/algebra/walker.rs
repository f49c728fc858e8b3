use crate::{iri, literal, var};
use sparql_algebra_logical::rewrite::{rewrite_operation, AlgebraRewriter, Transformed};
use sparql_algebra_logical::visit::Recursion;
use sparql_algebra_logical::{canonicalize, in_scope_variables, Expression, Operation, Pattern};
use sparql_algebra_model::{BlankNode, Term, Variable};
use std::convert::Infallible;

fn variable(name: &str) -> Variable {
    Variable::new_unchecked(name)
}

/// Renames `?x` to `?y` but leaves service bodies alone.
struct RenameX;

impl AlgebraRewriter for RenameX {
    type Error = Infallible;

    fn rewrite_operation(
        &mut self,
        operation: Operation,
    ) -> Result<Transformed<Operation>, Self::Error> {
        Ok(match operation {
            operation @ Operation::Service { .. } => {
                Transformed::new(operation, false, Recursion::Jump)
            }
            operation => Transformed::no(operation),
        })
    }

    fn rewrite_term(&mut self, term: Term) -> Result<Term, Self::Error> {
        Ok(if term == var("x") { var("y") } else { term })
    }
}

#[test]
fn test_in_scope_variables_stop_at_projection() {
    let subquery = Operation::project(
        Operation::bgp(vec![Pattern::triple(var("a"), iri("p"), var("hidden"))]),
        vec![variable("a")],
    );
    let plan = Operation::filter(
        Operation::join(vec![
            subquery,
            Operation::extend(
                Operation::bgp(vec![Pattern::new(var("c"), iri("p"), literal("1"), var("g"))]),
                variable("d"),
                Expression::operator("str", vec![var("c").into()]),
            ),
        ]),
        Expression::operator("bound", vec![var("unbound").into()]),
    );

    assert_eq!(
        in_scope_variables(&plan),
        vec![variable("a"), variable("c"), variable("d"), variable("g")]
    );
}

#[test]
fn test_rewriter_renames_all_positions_but_respects_jump() {
    let plan = Operation::project(
        Operation::join(vec![
            Operation::filter(
                Operation::bgp(vec![Pattern::triple(var("x"), iri("p"), var("o"))]),
                Expression::operator("isiri", vec![var("x").into()]),
            ),
            Operation::service(
                Operation::bgp(vec![Pattern::triple(var("x"), iri("q"), var("o"))]),
                iri("endpoint"),
                false,
            ),
        ]),
        vec![variable("x")],
    );

    let rewritten = match rewrite_operation(&mut RenameX, plan) {
        Ok(rewritten) => rewritten,
        Err(never) => match never {},
    };

    let expected = Operation::project(
        Operation::join(vec![
            Operation::filter(
                Operation::bgp(vec![Pattern::triple(var("y"), iri("p"), var("o"))]),
                Expression::operator("isiri", vec![var("y").into()]),
            ),
            Operation::service(
                Operation::bgp(vec![Pattern::triple(var("x"), iri("q"), var("o"))]),
                iri("endpoint"),
                false,
            ),
        ]),
        vec![variable("y")],
    );
    assert_eq!(rewritten, expected);
}

#[test]
fn test_canonicalize_ignores_names() {
    let build = |s: &str, o: &str| {
        Operation::project(
            Operation::bgp(vec![
                Pattern::triple(var(s), iri("p"), var(o)),
                Pattern::triple(var(o), iri("q"), BlankNode::new_unchecked(s).into()),
            ]),
            vec![variable(s)],
        )
    };

    assert_ne!(build("a", "b"), build("first", "second"));
    assert_eq!(
        canonicalize(build("a", "b")),
        canonicalize(build("first", "second"))
    );
    insta::assert_snapshot!(canonicalize(build("a", "b")), @r"
    Project: ?v0
      Bgp
        Pattern (?v0 <http://example.com/p> ?v1)
        Pattern (?v1 <http://example.com/q> _:b0)
    ");
}
