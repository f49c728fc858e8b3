use crate::PropertyPath;
use sparql_algebra_model::{vocab, Variable};
use std::fmt::{Display, Formatter};

/// An IRI as written in the source, either a full IRI or a prefixed name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IriRef {
    /// `<...>`. The IRI may be relative.
    Full(String),
    /// `prefix:local`. The prefix is empty for the default prefix `:local`.
    Prefixed { prefix: String, local: String },
}

impl IriRef {
    pub fn full(iri: impl Into<String>) -> Self {
        IriRef::Full(iri.into())
    }

    pub fn prefixed(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        IriRef::Prefixed {
            prefix: prefix.into(),
            local: local.into(),
        }
    }

    /// The `a` keyword.
    pub fn rdf_type() -> Self {
        IriRef::Full(vocab::rdf::TYPE.as_str().to_owned())
    }
}

impl Display for IriRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IriRef::Full(iri) => write!(f, "<{iri}>"),
            IriRef::Prefixed { prefix, local } => write!(f, "{prefix}:{local}"),
        }
    }
}

/// A literal as written in the source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LiteralSyntax {
    pub value: String,
    pub language: Option<String>,
    pub datatype: Option<IriRef>,
}

impl LiteralSyntax {
    pub fn simple(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    pub fn language_tagged(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    pub fn typed(value: impl Into<String>, datatype: IriRef) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: Some(datatype),
        }
    }
}

/// A term in a triple, an expression or a solution modifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TermSyntax {
    Iri(IriRef),
    /// A labelled blank node (`_:b`) or an anonymous one (`[]`) if the label is [None].
    BlankNode(Option<String>),
    Literal(LiteralSyntax),
    Variable(Variable),
}

impl TermSyntax {
    pub fn iri(iri: impl Into<String>) -> Self {
        TermSyntax::Iri(IriRef::full(iri))
    }

    pub fn prefixed(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        TermSyntax::Iri(IriRef::prefixed(prefix, local))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        TermSyntax::Variable(Variable::new_unchecked(name))
    }

    pub fn blank_node(label: impl Into<String>) -> Self {
        TermSyntax::BlankNode(Some(label.into()))
    }

    pub fn anonymous() -> Self {
        TermSyntax::BlankNode(None)
    }

    pub fn literal(value: impl Into<String>) -> Self {
        TermSyntax::Literal(LiteralSyntax::simple(value))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            TermSyntax::Variable(variable) => Some(variable),
            _ => None,
        }
    }
}

impl From<Variable> for TermSyntax {
    fn from(value: Variable) -> Self {
        TermSyntax::Variable(value)
    }
}

impl From<IriRef> for TermSyntax {
    fn from(value: IriRef) -> Self {
        TermSyntax::Iri(value)
    }
}

impl From<LiteralSyntax> for TermSyntax {
    fn from(value: LiteralSyntax) -> Self {
        TermSyntax::Literal(value)
    }
}

/// A node in the subject or object position of a triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphNode {
    Term(TermSyntax),
    /// An RDF collection `( a b c )`.
    Collection(Vec<GraphNode>),
    /// A blank node property list `[ p o ; q r ]`.
    BlankNodePropertyList(Vec<PropertyListItem>),
}

impl From<TermSyntax> for GraphNode {
    fn from(value: TermSyntax) -> Self {
        GraphNode::Term(value)
    }
}

impl From<Variable> for GraphNode {
    fn from(value: Variable) -> Self {
        GraphNode::Term(TermSyntax::Variable(value))
    }
}

impl From<IriRef> for GraphNode {
    fn from(value: IriRef) -> Self {
        GraphNode::Term(TermSyntax::Iri(value))
    }
}

impl From<LiteralSyntax> for GraphNode {
    fn from(value: LiteralSyntax) -> Self {
        GraphNode::Term(TermSyntax::Literal(value))
    }
}

/// One `predicate objects` entry of a blank node property list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyListItem {
    pub predicate: Predicate,
    pub objects: Vec<GraphNode>,
}

impl PropertyListItem {
    pub fn new(predicate: impl Into<Predicate>, objects: Vec<GraphNode>) -> Self {
        Self {
            predicate: predicate.into(),
            objects,
        }
    }
}

/// The predicate of a triple. Either a plain term (an IRI or a variable) or a property path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    Term(TermSyntax),
    Path(PropertyPath),
}

impl From<TermSyntax> for Predicate {
    fn from(value: TermSyntax) -> Self {
        Predicate::Term(value)
    }
}

impl From<IriRef> for Predicate {
    fn from(value: IriRef) -> Self {
        Predicate::Term(TermSyntax::Iri(value))
    }
}

impl From<Variable> for Predicate {
    fn from(value: Variable) -> Self {
        Predicate::Term(TermSyntax::Variable(value))
    }
}

impl From<PropertyPath> for Predicate {
    fn from(value: PropertyPath) -> Self {
        Predicate::Path(value)
    }
}

/// A triple in a basic graph pattern or a template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TripleSyntax {
    pub subject: GraphNode,
    pub predicate: Predicate,
    pub object: GraphNode,
}

impl TripleSyntax {
    pub fn new(
        subject: impl Into<GraphNode>,
        predicate: impl Into<Predicate>,
        object: impl Into<GraphNode>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}
