use oxrdf::{BlankNode, Literal, NamedNode, Variable};
use std::fmt::{Display, Formatter};

/// A term as it appears in the SPARQL algebra.
///
/// Besides the usual RDF terms, a term can be a [Variable] or the [Term::DefaultGraph] sentinel.
/// The latter is only meaningful in the graph position of a pattern.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum Term {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
    Variable(Variable),
    DefaultGraph,
}

impl Term {
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn is_default_graph(&self) -> bool {
        matches!(self, Term::DefaultGraph)
    }

    /// Returns `true` if this term can be renamed without changing the meaning of a pattern, i.e.
    /// if it is a variable or a blank node.
    pub fn is_renameable(&self) -> bool {
        matches!(self, Term::Variable(_) | Term::BlankNode(_))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(variable) => Some(variable),
            _ => None,
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::NamedNode(node) => write!(f, "{node}"),
            Term::BlankNode(node) => write!(f, "{node}"),
            Term::Literal(literal) => write!(f, "{literal}"),
            Term::Variable(variable) => write!(f, "{variable}"),
            Term::DefaultGraph => f.write_str("DEFAULT"),
        }
    }
}

impl From<NamedNode> for Term {
    fn from(value: NamedNode) -> Self {
        Term::NamedNode(value)
    }
}

impl From<BlankNode> for Term {
    fn from(value: BlankNode) -> Self {
        Term::BlankNode(value)
    }
}

impl From<Literal> for Term {
    fn from(value: Literal) -> Self {
        Term::Literal(value)
    }
}

impl From<Variable> for Term {
    fn from(value: Variable) -> Self {
        Term::Variable(value)
    }
}
