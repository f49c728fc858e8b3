use crate::IriRef;

/// A property path expression in the predicate position of a triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyPath {
    Iri(IriRef),
    /// `^path`
    Inverse(Box<PropertyPath>),
    /// `a / b / c`
    Sequence(Vec<PropertyPath>),
    /// `a | b | c`
    Alternative(Vec<PropertyPath>),
    /// `path*`
    ZeroOrMore(Box<PropertyPath>),
    /// `path+`
    OneOrMore(Box<PropertyPath>),
    /// `path?`
    ZeroOrOne(Box<PropertyPath>),
    /// `!(a | ^b)`
    NegatedPropertySet(Vec<NegatedPathElement>),
}

impl PropertyPath {
    pub fn iri(iri: impl Into<String>) -> Self {
        PropertyPath::Iri(IriRef::full(iri))
    }

    pub fn inverse(path: PropertyPath) -> Self {
        PropertyPath::Inverse(Box::new(path))
    }

    pub fn sequence(paths: Vec<PropertyPath>) -> Self {
        PropertyPath::Sequence(paths)
    }

    pub fn alternative(paths: Vec<PropertyPath>) -> Self {
        PropertyPath::Alternative(paths)
    }

    pub fn zero_or_more(path: PropertyPath) -> Self {
        PropertyPath::ZeroOrMore(Box::new(path))
    }

    pub fn one_or_more(path: PropertyPath) -> Self {
        PropertyPath::OneOrMore(Box::new(path))
    }

    pub fn zero_or_one(path: PropertyPath) -> Self {
        PropertyPath::ZeroOrOne(Box::new(path))
    }
}

/// A member of a negated property set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NegatedPathElement {
    Forward(IriRef),
    /// `^iri`
    Inverse(IriRef),
}
