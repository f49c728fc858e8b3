//! The concrete-syntax tree of SPARQL 1.1 queries and updates.
//!
//! The tree mirrors the surface syntax closely: prefixed names are not yet resolved, collections
//! and blank node property lists are not yet flattened, and solution modifiers are kept as they
//! were written. A parser produces this tree and a serializer consumes it. Neither is part of this
//! crate.

mod expression;
mod path;
mod pattern;
mod query;
mod span;
mod term;
mod update;

pub use expression::*;
pub use path::*;
pub use pattern::*;
pub use query::*;
pub use span::*;
pub use term::*;
pub use update::*;

/// A SPARQL request, either a query or an update.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SparqlSyntax {
    Query(QuerySyntax),
    Update(UpdateSyntax),
}

impl From<QuerySyntax> for SparqlSyntax {
    fn from(value: QuerySyntax) -> Self {
        SparqlSyntax::Query(value)
    }
}

impl From<UpdateSyntax> for SparqlSyntax {
    fn from(value: UpdateSyntax) -> Self {
        SparqlSyntax::Update(value)
    }
}
