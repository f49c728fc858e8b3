//! Flattening of the triple syntax into plain triples.
//!
//! Collections become `rdf:first`/`rdf:rest` chains and blank node property lists become triples
//! with a fresh blank node as subject.

use crate::context::TranslationContext;
use crate::{TranslationError, TranslationResult};
use sparql_algebra_logical::{Operation, Pattern, PropertyPathSymbol};
use sparql_algebra_model::{vocab, NamedNode, Term};
use sparql_algebra_syntax::{GraphNode, Predicate, PropertyPath, TripleSyntax};

/// A triple without nested nodes. The predicate may still be a property path.
pub(super) struct FlatTriple {
    pub(super) subject: Term,
    pub(super) predicate: FlatPredicate,
    pub(super) object: Term,
}

#[derive(Clone)]
pub(super) enum FlatPredicate {
    Term(Term),
    Path(PropertyPathSymbol),
}

impl FlatTriple {
    fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate: FlatPredicate::Term(predicate),
            object,
        }
    }
}

impl TranslationContext<'_> {
    /// Flattens `triples`. The triples of nested nodes directly follow the triple they occur in.
    pub(super) fn flatten_triples(
        &mut self,
        triples: &[TripleSyntax],
    ) -> TranslationResult<Vec<FlatTriple>> {
        let mut result = Vec::new();
        for triple in triples {
            let mut subject_triples = Vec::new();
            let subject = self.translate_graph_node(&triple.subject, &mut subject_triples)?;
            let predicate = self.translate_predicate(&triple.predicate)?;
            let mut object_triples = Vec::new();
            let object = self.translate_graph_node(&triple.object, &mut object_triples)?;

            result.push(FlatTriple {
                subject,
                predicate,
                object,
            });
            result.extend(subject_triples);
            result.extend(object_triples);
        }
        Ok(result)
    }

    /// Translates the triples of a `CONSTRUCT` template or of an update block. Property paths are
    /// only allowed if they reduce to plain triples.
    pub(super) fn translate_template(
        &mut self,
        triples: &[TripleSyntax],
    ) -> TranslationResult<Vec<Pattern>> {
        let mut patterns = Vec::new();
        for triple in self.flatten_triples(triples)? {
            match triple.predicate {
                FlatPredicate::Term(predicate) => {
                    patterns.push(Pattern::triple(triple.subject, predicate, triple.object));
                }
                FlatPredicate::Path(path) => {
                    let display = path.to_string();
                    for operation in self.simplify_path(triple.subject, path, triple.object) {
                        match operation {
                            Operation::Pattern(pattern) => patterns.push(pattern),
                            _ => return Err(TranslationError::PathInTemplate(display)),
                        }
                    }
                }
            }
        }
        Ok(patterns)
    }

    fn translate_predicate(&mut self, predicate: &Predicate) -> TranslationResult<FlatPredicate> {
        Ok(match predicate {
            Predicate::Term(term) => FlatPredicate::Term(self.translate_term(term)?),
            Predicate::Path(PropertyPath::Iri(iri)) => {
                FlatPredicate::Term(Term::NamedNode(self.resolve_iri(iri)?))
            }
            Predicate::Path(path) => FlatPredicate::Path(self.translate_path_symbol(path)?),
        })
    }

    fn translate_graph_node(
        &mut self,
        node: &GraphNode,
        triples: &mut Vec<FlatTriple>,
    ) -> TranslationResult<Term> {
        match node {
            GraphNode::Term(term) => self.translate_term(term),
            GraphNode::Collection(items) => self.translate_collection(items, triples),
            GraphNode::BlankNodePropertyList(items) => {
                let subject = self.fresh_blank_node();
                for item in items {
                    let predicate = self.translate_predicate(&item.predicate)?;
                    for object in &item.objects {
                        let mut nested = Vec::new();
                        let object = self.translate_graph_node(object, &mut nested)?;
                        triples.push(FlatTriple {
                            subject: subject.clone(),
                            predicate: predicate.clone(),
                            object,
                        });
                        triples.extend(nested);
                    }
                }
                Ok(subject)
            }
        }
    }

    fn translate_collection(
        &mut self,
        items: &[GraphNode],
        triples: &mut Vec<FlatTriple>,
    ) -> TranslationResult<Term> {
        let nil = Term::NamedNode(NamedNode::from(vocab::rdf::NIL));
        if items.is_empty() {
            return Ok(nil);
        }

        let first = Term::NamedNode(NamedNode::from(vocab::rdf::FIRST));
        let rest = Term::NamedNode(NamedNode::from(vocab::rdf::REST));

        let head = self.fresh_blank_node();
        let mut current = head.clone();
        for (index, item) in items.iter().enumerate() {
            let mut nested = Vec::new();
            let value = self.translate_graph_node(item, &mut nested)?;
            triples.push(FlatTriple::new(current.clone(), first.clone(), value));
            triples.extend(nested);

            let next = if index + 1 == items.len() {
                nil.clone()
            } else {
                self.fresh_blank_node()
            };
            triples.push(FlatTriple::new(current, rest.clone(), next.clone()));
            current = next;
        }
        Ok(head)
    }

    fn fresh_blank_node(&mut self) -> Term {
        Term::BlankNode(self.terms_mut().blank_node(None))
    }
}
