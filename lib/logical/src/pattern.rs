use crate::PropertyPathSymbol;
use sparql_algebra_model::Term;

/// A triple pattern together with the graph it is matched against.
///
/// The graph is [Term::DefaultGraph] if the pattern is not scoped to a named graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    pub graph: Term,
}

impl Pattern {
    pub fn new(subject: Term, predicate: Term, object: Term, graph: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph,
        }
    }

    /// Creates a pattern that is matched against the default graph.
    pub fn triple(subject: Term, predicate: Term, object: Term) -> Self {
        Self::new(subject, predicate, object, Term::DefaultGraph)
    }

    /// Returns the same pattern scoped to `graph`.
    #[must_use]
    pub fn with_graph(self, graph: Term) -> Self {
        Self { graph, ..self }
    }

    /// Iterates over subject, predicate, object, and graph.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        [&self.subject, &self.predicate, &self.object, &self.graph].into_iter()
    }

    /// Returns `true` if neither the subject, the predicate, nor the object is a variable.
    pub fn is_ground(&self) -> bool {
        [&self.subject, &self.predicate, &self.object]
            .iter()
            .all(|term| !term.is_variable())
    }

    /// Applies `f` to all four terms.
    pub fn try_map_terms<E>(self, mut f: impl FnMut(Term) -> Result<Term, E>) -> Result<Self, E> {
        Ok(Self {
            subject: f(self.subject)?,
            predicate: f(self.predicate)?,
            object: f(self.object)?,
            graph: f(self.graph)?,
        })
    }
}

/// A pattern whose predicate is a property path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathPattern {
    pub subject: Term,
    pub predicate: PropertyPathSymbol,
    pub object: Term,
    pub graph: Term,
}

impl PathPattern {
    pub fn new(subject: Term, predicate: PropertyPathSymbol, object: Term, graph: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph,
        }
    }

    /// Applies `f` to subject, object, and graph.
    pub fn try_map_terms<E>(self, mut f: impl FnMut(Term) -> Result<Term, E>) -> Result<Self, E> {
        Ok(Self {
            subject: f(self.subject)?,
            predicate: self.predicate,
            object: f(self.object)?,
            graph: f(self.graph)?,
        })
    }
}
