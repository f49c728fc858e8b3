use crate::context::TranslationContext;
use crate::TranslationResult;
use sparql_algebra_logical::{Operation, PathPattern, Pattern, PropertyPathSymbol};
use sparql_algebra_model::{NamedNode, Term};
use sparql_algebra_syntax::{NegatedPathElement, PropertyPath};

impl TranslationContext<'_> {
    pub(super) fn translate_path_symbol(
        &mut self,
        path: &PropertyPath,
    ) -> TranslationResult<PropertyPathSymbol> {
        Ok(match path {
            PropertyPath::Iri(iri) => PropertyPathSymbol::link(self.resolve_iri(iri)?),
            PropertyPath::Inverse(inner) => {
                PropertyPathSymbol::inv(self.translate_path_symbol(inner)?)
            }
            PropertyPath::Sequence(items) => {
                PropertyPathSymbol::seq(self.translate_path_symbols(items)?)
            }
            PropertyPath::Alternative(items) => {
                PropertyPathSymbol::alt(self.translate_path_symbols(items)?)
            }
            PropertyPath::ZeroOrMore(inner) => {
                PropertyPathSymbol::zero_or_more(self.translate_path_symbol(inner)?)
            }
            PropertyPath::OneOrMore(inner) => {
                PropertyPathSymbol::one_or_more(self.translate_path_symbol(inner)?)
            }
            PropertyPath::ZeroOrOne(inner) => {
                PropertyPathSymbol::zero_or_one(self.translate_path_symbol(inner)?)
            }
            PropertyPath::NegatedPropertySet(elements) => self.translate_negated_set(elements)?,
        })
    }

    fn translate_path_symbols(
        &mut self,
        paths: &[PropertyPath],
    ) -> TranslationResult<Vec<PropertyPathSymbol>> {
        paths
            .iter()
            .map(|path| self.translate_path_symbol(path))
            .collect()
    }

    /// `!(a|^b)` becomes `!(a) | ^!(b)`. Each half is only present if it has members.
    fn translate_negated_set(
        &self,
        elements: &[NegatedPathElement],
    ) -> TranslationResult<PropertyPathSymbol> {
        let mut forward = Vec::new();
        let mut inverse = Vec::new();
        for element in elements {
            match element {
                NegatedPathElement::Forward(iri) => forward.push(self.resolve_iri(iri)?),
                NegatedPathElement::Inverse(iri) => inverse.push(self.resolve_iri(iri)?),
            }
        }

        Ok(match (forward.is_empty(), inverse.is_empty()) {
            (_, true) => PropertyPathSymbol::nps(forward),
            (true, false) => PropertyPathSymbol::inv(PropertyPathSymbol::nps(inverse)),
            (false, false) => PropertyPathSymbol::alt(vec![
                PropertyPathSymbol::nps(forward),
                PropertyPathSymbol::inv(PropertyPathSymbol::nps(inverse)),
            ]),
        })
    }

    /// Reduces a path to plain patterns where possible. Sequences are chained through fresh
    /// variables, inverses swap subject and object, and links become patterns. All other paths
    /// remain [Operation::Path] nodes.
    pub(super) fn simplify_path(
        &mut self,
        subject: Term,
        predicate: PropertyPathSymbol,
        object: Term,
    ) -> Vec<Operation> {
        match predicate {
            PropertyPathSymbol::Seq(mut items) => {
                let Some(last) = items.pop() else {
                    return vec![path_operation(subject, PropertyPathSymbol::Seq(items), object)];
                };

                let mut result = Vec::new();
                let mut joiner = subject;
                for item in items {
                    let link = Term::Variable(self.fresh_variable());
                    result.extend(self.simplify_path(joiner, item, link.clone()));
                    joiner = link;
                }
                result.extend(self.simplify_path(joiner, last, object));
                result
            }
            PropertyPathSymbol::Inv(inner) => self.simplify_path(object, *inner, subject),
            PropertyPathSymbol::Link(iri) => vec![link_operation(subject, iri, object)],
            other => vec![path_operation(subject, other, object)],
        }
    }
}

fn link_operation(subject: Term, predicate: NamedNode, object: Term) -> Operation {
    Operation::pattern(Pattern::triple(
        subject,
        Term::NamedNode(predicate),
        object,
    ))
}

fn path_operation(subject: Term, predicate: PropertyPathSymbol, object: Term) -> Operation {
    Operation::path(PathPattern::new(
        subject,
        predicate,
        object,
        Term::DefaultGraph,
    ))
}
