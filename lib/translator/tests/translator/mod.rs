mod aggregates;
mod graphs;
mod paths;
mod queries;
mod to_ast;
mod updates;

use sparql_algebra_logical::Operation;
use sparql_algebra_model::Variable;
use sparql_algebra_syntax::{
    GraphNode, IriRef, PatternSyntax, Predicate, QuerySyntax, TermSyntax, TripleSyntax,
};
use sparql_algebra_translator::{translate_query, TranslationOptions, TranslationResult};

pub fn var(name: &str) -> Variable {
    Variable::new_unchecked(name)
}

pub fn ex(local: &str) -> IriRef {
    IriRef::full(format!("http://example.com/{local}"))
}

pub fn triple(
    subject: impl Into<GraphNode>,
    predicate: impl Into<Predicate>,
    object: impl Into<GraphNode>,
) -> TripleSyntax {
    TripleSyntax::new(subject, predicate, object)
}

/// A BGP with the single triple `?s <p> ?o`.
pub fn spo(subject: &str, predicate: &str, object: &str) -> PatternSyntax {
    PatternSyntax::bgp(vec![triple(var(subject), ex(predicate), var(object))])
}

pub fn iri_term(local: &str) -> TermSyntax {
    TermSyntax::Iri(ex(local))
}

pub fn translate(query: &QuerySyntax) -> TranslationResult<Operation> {
    translate_query(query, &TranslationOptions::default())
}

pub fn translate_quads(query: &QuerySyntax) -> TranslationResult<Operation> {
    translate_query(query, &TranslationOptions::default().with_quads(true))
}
