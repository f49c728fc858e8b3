use sparql_algebra_model::NamedNode;

/// A property path in the algebra.
///
/// [PropertyPathSymbol::Alt] and [PropertyPathSymbol::Seq] should be created with
/// [PropertyPathSymbol::alt] and [PropertyPathSymbol::seq], which splice nested symbols of the
/// same kind into the parent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyPathSymbol {
    Alt(Vec<PropertyPathSymbol>),
    Seq(Vec<PropertyPathSymbol>),
    Inv(Box<PropertyPathSymbol>),
    Link(NamedNode),
    /// A negated property set. Only contains forward IRIs, inverse members are expressed with an
    /// enclosing [PropertyPathSymbol::Inv].
    Nps(Vec<NamedNode>),
    OneOrMore(Box<PropertyPathSymbol>),
    ZeroOrMore(Box<PropertyPathSymbol>),
    ZeroOrOne(Box<PropertyPathSymbol>),
}
