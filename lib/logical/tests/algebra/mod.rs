mod display;
mod walker;

use sparql_algebra_model::{Literal, NamedNode, Term, Variable};

pub fn var(name: &str) -> Term {
    Variable::new_unchecked(name).into()
}

pub fn iri(local: &str) -> Term {
    ex(local).into()
}

pub fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{local}"))
}

pub fn literal(value: &str) -> Term {
    Literal::new_simple_literal(value).into()
}
