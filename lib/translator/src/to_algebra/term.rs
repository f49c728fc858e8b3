use crate::context::TranslationContext;
use crate::{TranslationError, TranslationResult};
use sparql_algebra_model::{BlankNode, Literal, Term};
use sparql_algebra_syntax::{LiteralSyntax, TermSyntax};

impl TranslationContext<'_> {
    pub(crate) fn translate_term(&mut self, term: &TermSyntax) -> TranslationResult<Term> {
        Ok(match term {
            TermSyntax::Iri(iri) => Term::NamedNode(self.resolve_iri(iri)?),
            TermSyntax::BlankNode(Some(label)) => Term::BlankNode(
                BlankNode::new(label.as_str()).map_err(|source| {
                    TranslationError::InvalidBlankNode {
                        label: label.clone(),
                        source,
                    }
                })?,
            ),
            TermSyntax::BlankNode(None) => Term::BlankNode(self.terms_mut().blank_node(None)),
            TermSyntax::Literal(literal) => Term::Literal(self.translate_literal(literal)?),
            TermSyntax::Variable(variable) => Term::Variable(variable.clone()),
        })
    }

    fn translate_literal(&self, literal: &LiteralSyntax) -> TranslationResult<Literal> {
        if let Some(language) = &literal.language {
            return Literal::new_language_tagged_literal(literal.value.as_str(), language.as_str())
                .map_err(|source| TranslationError::InvalidLiteral {
                    value: literal.value.clone(),
                    source,
                });
        }

        Ok(match &literal.datatype {
            Some(datatype) => {
                Literal::new_typed_literal(literal.value.as_str(), self.resolve_iri(datatype)?)
            }
            None => Literal::new_simple_literal(literal.value.as_str()),
        })
    }
}
