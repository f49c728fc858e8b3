use crate::rewrite::{rewrite_operation, AlgebraRewriter};
use crate::Operation;
use rustc_hash::FxHashMap;
use sparql_algebra_model::{BlankNode, Term, Variable};
use std::convert::Infallible;

/// Renames all variables to `?v0, ?v1, ...` and all blank nodes to `_:b0, _:b1, ...`.
///
/// Names are assigned in the order of first occurrence in a pre-order walk of the tree. Two trees
/// that only differ in the names of their variables and blank nodes are equal after
/// canonicalization.
pub fn canonicalize(operation: Operation) -> Operation {
    let mut canonicalizer = Canonicalizer::default();
    match rewrite_operation(&mut canonicalizer, operation) {
        Ok(operation) => operation,
        Err(never) => match never {},
    }
}

#[derive(Default)]
struct Canonicalizer {
    mapping: FxHashMap<Term, Term>,
    variables: usize,
    blank_nodes: usize,
}

impl AlgebraRewriter for Canonicalizer {
    type Error = Infallible;

    fn rewrite_term(&mut self, term: Term) -> Result<Term, Self::Error> {
        if !term.is_renameable() {
            return Ok(term);
        }
        if let Some(renamed) = self.mapping.get(&term) {
            return Ok(renamed.clone());
        }

        let renamed = match &term {
            Term::BlankNode(_) => {
                let renamed = BlankNode::new_unchecked(format!("b{}", self.blank_nodes));
                self.blank_nodes += 1;
                Term::BlankNode(renamed)
            }
            _ => {
                let renamed = Variable::new_unchecked(format!("v{}", self.variables));
                self.variables += 1;
                Term::Variable(renamed)
            }
        };
        self.mapping.insert(term, renamed.clone());
        Ok(renamed)
    }
}
