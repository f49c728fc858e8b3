use crate::Term;
use oxrdf::{BlankNode, NamedNode, Variable};

/// Creates terms for the translators.
///
/// The factory owns a blank node counter that is used for generating fresh blank nodes. The
/// counter is *not* reset between translations. Callers that require reproducible blank node
/// labels can reset it with [TermFactory::reset_blank_node_counter].
#[derive(Debug, Default, Clone)]
pub struct TermFactory {
    blank_node_counter: u64,
}

impl TermFactory {
    /// Creates a new [TermFactory] with a zeroed blank node counter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named_node(&self, iri: impl Into<String>) -> NamedNode {
        NamedNode::new_unchecked(iri)
    }

    pub fn variable(&self, name: impl Into<String>) -> Variable {
        Variable::new_unchecked(name)
    }

    pub fn default_graph(&self) -> Term {
        Term::DefaultGraph
    }

    /// Creates a blank node with the given `label`. If no label is given, a fresh label of the
    /// form `df_<n>` is generated.
    pub fn blank_node(&mut self, label: Option<&str>) -> BlankNode {
        match label {
            Some(label) => BlankNode::new_unchecked(label),
            None => {
                let label = format!("df_{}", self.blank_node_counter);
                self.blank_node_counter += 1;
                BlankNode::new_unchecked(label)
            }
        }
    }

    pub fn reset_blank_node_counter(&mut self) {
        self.blank_node_counter = 0;
    }
}
