//! Scoping of patterns to a named graph in quads mode.
//!
//! Instead of wrapping the input of a `GRAPH` in a [Operation::Graph] node, every pattern below it
//! that is still in the default graph is moved into the named graph. If the graph is a variable
//! that a nested projection hides or a nested extension binds, the variable is renamed inside that
//! scope so that it does not join with the outer graph variable.

use crate::context::TranslationContext;
use crate::{TranslationError, TranslationResult};
use sparql_algebra_logical::rewrite::{rewrite_operation, AlgebraRewriter, Transformed};
use sparql_algebra_logical::visit::Recursion;
use sparql_algebra_logical::{Operation, PathPattern, Pattern};
use sparql_algebra_model::{Term, Variable};
use tracing::trace;

impl TranslationContext<'_> {
    pub(crate) fn recurse_graph(
        &mut self,
        operation: Operation,
        graph: &Term,
    ) -> TranslationResult<Operation> {
        let mut scope = GraphScope {
            context: self,
            graph,
            replacement: None,
        };
        rewrite_operation(&mut scope, operation)
    }
}

struct GraphScope<'c, 'a> {
    context: &'c mut TranslationContext<'a>,
    graph: &'c Term,
    /// The variable that replaces the graph variable in the current scope.
    replacement: Option<Variable>,
}

impl GraphScope<'_, '_> {
    fn opens_scope(&self, operation: &Operation) -> bool {
        if self.replacement.is_some() {
            return false;
        }
        let Term::Variable(graph) = self.graph else {
            return false;
        };

        match operation {
            Operation::Project { variables, .. } => !variables.contains(graph),
            Operation::Extend { variable, .. } => variable == graph,
            _ => false,
        }
    }

    fn rewrite_scoped(&mut self, operation: Operation) -> TranslationResult<Operation> {
        let replacement = self.context.fresh_variable();
        trace!(graph = %self.graph, %replacement, "Renaming graph variable in nested scope");

        let mut nested = GraphScope {
            context: &mut *self.context,
            graph: self.graph,
            replacement: Some(replacement),
        };
        rewrite_operation(&mut nested, operation)
    }

    fn replace(&self, term: Term) -> Term {
        match &self.replacement {
            Some(replacement) if &term == self.graph => Term::Variable(replacement.clone()),
            _ => term,
        }
    }

    fn scope_graph(&self, graph: Term) -> TranslationResult<Term> {
        if graph.is_default_graph() {
            return Ok(self.graph.clone());
        }
        if self.replacement.is_some() && &graph == self.graph {
            return Err(TranslationError::NestedGraphWithReplacement(graph));
        }
        Ok(graph)
    }
}

impl AlgebraRewriter for GraphScope<'_, '_> {
    type Error = TranslationError;

    fn rewrite_operation(
        &mut self,
        operation: Operation,
    ) -> TranslationResult<Transformed<Operation>> {
        if self.opens_scope(&operation) {
            let scoped = self.rewrite_scoped(operation)?;
            return Ok(Transformed::new(scoped, true, Recursion::Jump));
        }

        match operation {
            Operation::Graph { name, .. } if self.replacement.is_some() => {
                Err(TranslationError::NestedGraphWithReplacement(name))
            }
            operation @ Operation::Service { .. } => {
                Ok(Transformed::new(operation, false, Recursion::Jump))
            }
            operation => Ok(Transformed::no(operation)),
        }
    }

    fn rewrite_pattern(&mut self, pattern: Pattern) -> TranslationResult<Pattern> {
        Ok(Pattern::new(
            self.replace(pattern.subject),
            self.replace(pattern.predicate),
            self.replace(pattern.object),
            self.scope_graph(pattern.graph)?,
        ))
    }

    fn rewrite_path(&mut self, path: PathPattern) -> TranslationResult<PathPattern> {
        Ok(PathPattern::new(
            self.replace(path.subject),
            path.predicate,
            self.replace(path.object),
            self.scope_graph(path.graph)?,
        ))
    }

    fn rewrite_term(&mut self, term: Term) -> TranslationResult<Term> {
        Ok(self.replace(term))
    }
}
