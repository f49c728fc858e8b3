mod aggregate;
mod factory;
mod term;

pub use aggregate::*;
pub use factory::*;
pub use term::*;

// Re-export some oxrdf types.
pub use oxiri::{Iri, IriParseError};
pub use oxrdf::vocab;
pub use oxrdf::{
    BlankNode, BlankNodeIdParseError, BlankNodeRef, LanguageTagParseError, Literal, LiteralRef,
    NamedNode, NamedNodeRef, Variable, VariableNameParseError, VariableRef,
};
