//! Conversion of algebra terms, patterns, and paths into their syntax.

use crate::{TranslationError, TranslationResult};
use sparql_algebra_logical::{PathPattern, Pattern, PropertyPathSymbol};
use sparql_algebra_model::{vocab, NamedNode, Term};
use sparql_algebra_syntax::{
    GraphNode, IriRef, LiteralSyntax, NegatedPathElement, Predicate, PropertyPath, TermSyntax,
    TripleSyntax,
};

pub(super) fn iri_to_syntax(iri: &NamedNode) -> IriRef {
    IriRef::full(iri.as_str())
}

pub(super) fn term_to_syntax(term: &Term) -> TranslationResult<TermSyntax> {
    Ok(match term {
        Term::NamedNode(iri) => TermSyntax::Iri(iri_to_syntax(iri)),
        Term::BlankNode(blank_node) => TermSyntax::blank_node(blank_node.as_str()),
        Term::Literal(literal) => {
            let mut syntax = LiteralSyntax::simple(literal.value());
            if let Some(language) = literal.language() {
                syntax.language = Some(language.to_owned());
            } else if literal.datatype() != vocab::xsd::STRING {
                syntax.datatype = Some(IriRef::full(literal.datatype().as_str()));
            }
            TermSyntax::Literal(syntax)
        }
        Term::Variable(variable) => TermSyntax::Variable(variable.clone()),
        Term::DefaultGraph => return Err(TranslationError::UnexpectedDefaultGraph),
    })
}

pub(super) fn pattern_to_triple(pattern: &Pattern) -> TranslationResult<TripleSyntax> {
    Ok(TripleSyntax::new(
        term_to_syntax(&pattern.subject)?,
        term_to_syntax(&pattern.predicate)?,
        term_to_syntax(&pattern.object)?,
    ))
}

pub(super) fn template_to_triples(template: &[Pattern]) -> TranslationResult<Vec<TripleSyntax>> {
    template.iter().map(pattern_to_triple).collect()
}

pub(super) fn path_to_triple(path: &PathPattern) -> TranslationResult<TripleSyntax> {
    Ok(TripleSyntax::new(
        GraphNode::Term(term_to_syntax(&path.subject)?),
        Predicate::Path(path_to_syntax(&path.predicate)),
        GraphNode::Term(term_to_syntax(&path.object)?),
    ))
}

/// Converts a path symbol into a property path.
///
/// A negated property set with forward and inverse members is split into `!(a) | ^!(b)`. That
/// exact shape is merged back into `!(a|^b)`. Any other alternative of negated sets is kept, since
/// `!(a) | !(b)` matches more than `!(a|b)`.
pub(super) fn path_to_syntax(path: &PropertyPathSymbol) -> PropertyPath {
    match path {
        PropertyPathSymbol::Alt(items) => {
            if let [PropertyPathSymbol::Nps(forward), PropertyPathSymbol::Inv(inverse)] =
                items.as_slice()
            {
                if let PropertyPathSymbol::Nps(inverse) = &**inverse {
                    if !forward.is_empty() && !inverse.is_empty() {
                        return PropertyPath::NegatedPropertySet(
                            forward
                                .iter()
                                .map(|iri| NegatedPathElement::Forward(iri_to_syntax(iri)))
                                .chain(
                                    inverse
                                        .iter()
                                        .map(|iri| NegatedPathElement::Inverse(iri_to_syntax(iri))),
                                )
                                .collect(),
                        );
                    }
                }
            }
            PropertyPath::Alternative(items.iter().map(path_to_syntax).collect())
        }
        PropertyPathSymbol::Seq(items) => {
            PropertyPath::Sequence(items.iter().map(path_to_syntax).collect())
        }
        PropertyPathSymbol::Inv(inner) => match &**inner {
            PropertyPathSymbol::Nps(iris) => PropertyPath::NegatedPropertySet(
                iris.iter()
                    .map(|iri| NegatedPathElement::Inverse(iri_to_syntax(iri)))
                    .collect(),
            ),
            inner => PropertyPath::inverse(path_to_syntax(inner)),
        },
        PropertyPathSymbol::Link(iri) => PropertyPath::Iri(iri_to_syntax(iri)),
        PropertyPathSymbol::Nps(iris) => PropertyPath::NegatedPropertySet(
            iris.iter()
                .map(|iri| NegatedPathElement::Forward(iri_to_syntax(iri)))
                .collect(),
        ),
        PropertyPathSymbol::OneOrMore(inner) => PropertyPath::one_or_more(path_to_syntax(inner)),
        PropertyPathSymbol::ZeroOrMore(inner) => {
            PropertyPath::zero_or_more(path_to_syntax(inner))
        }
        PropertyPathSymbol::ZeroOrOne(inner) => PropertyPath::zero_or_one(path_to_syntax(inner)),
    }
}
