use crate::context::TranslationContext;
use crate::{TranslationError, TranslationResult};
use rustc_hash::{FxHashMap, FxHashSet};
use sparql_algebra_logical::create_unique_variable;
use sparql_algebra_logical::rewrite::{rewrite_operation, AlgebraRewriter};
use sparql_algebra_logical::{Operation, PathPattern, Pattern};
use sparql_algebra_model::{BlankNode, Term, Variable};
use tracing::trace;

impl TranslationContext<'_> {
    /// Applies the options that post-process a finished translation.
    pub(crate) fn finish(&mut self, operation: Operation) -> TranslationResult<Operation> {
        if !self.blank_to_variable() {
            return Ok(operation);
        }

        let mut promoter = BlankNodePromoter {
            taken: self.variables_mut(),
            variables: FxHashMap::default(),
        };
        rewrite_operation(&mut promoter, operation)
    }
}

/// Replaces the blank nodes of query patterns by variables. The same label always maps to the
/// same variable. Templates keep their blank nodes.
struct BlankNodePromoter<'a> {
    taken: &'a mut FxHashSet<String>,
    variables: FxHashMap<BlankNode, Variable>,
}

impl BlankNodePromoter<'_> {
    fn promote(&mut self, term: Term) -> Term {
        let Term::BlankNode(blank_node) = term else {
            return term;
        };

        if let Some(variable) = self.variables.get(&blank_node) {
            return Term::Variable(variable.clone());
        }

        let variable = create_unique_variable(blank_node.as_str(), self.taken);
        trace!(%blank_node, %variable, "Replacing blank node by variable");
        self.taken.insert(variable.as_str().to_owned());
        self.variables.insert(blank_node, variable.clone());
        Term::Variable(variable)
    }
}

impl AlgebraRewriter for BlankNodePromoter<'_> {
    type Error = TranslationError;

    fn rewrite_pattern(&mut self, pattern: Pattern) -> TranslationResult<Pattern> {
        pattern.try_map_terms(|term| Ok(self.promote(term)))
    }

    fn rewrite_path(&mut self, path: PathPattern) -> TranslationResult<PathPattern> {
        path.try_map_terms(|term| Ok(self.promote(term)))
    }

    fn rewrite_template(&mut self, template: Vec<Pattern>) -> TranslationResult<Vec<Pattern>> {
        Ok(template)
    }
}
