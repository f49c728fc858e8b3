use oxiri::IriParseError;
use sparql_algebra_model::{BlankNodeIdParseError, LanguageTagParseError, Term};
use std::convert::Infallible;

/// An error raised while translating between the syntax tree and the algebra.
///
/// Translation is a pure function of its input. All errors are final and the translation is
/// aborted.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TranslationError {
    /// A prefixed name uses a prefix that has not been declared.
    #[error("The prefix '{0}:' has not been declared")]
    UnknownPrefix(String),
    /// A relative IRI is used but no base IRI is set.
    #[error("The relative IRI <{0}> cannot be resolved without a base IRI")]
    MissingBaseIri(String),
    #[error("<{iri}> is not a valid IRI")]
    InvalidIri {
        iri: String,
        #[source]
        source: IriParseError,
    },
    #[error("'{label}' is not a valid blank node label")]
    InvalidBlankNode {
        label: String,
        #[source]
        source: BlankNodeIdParseError,
    },
    #[error("The literal \"{value}\" has an invalid language tag")]
    InvalidLiteral {
        value: String,
        #[source]
        source: LanguageTagParseError,
    },
    /// An `INSERT` or `DELETE` operation is translated without quads mode.
    #[error("INSERT and DELETE operations are only supported if quads mode is enabled")]
    QuadsRequired,
    /// A function call that is not an aggregate uses `DISTINCT`.
    #[error("DISTINCT is only allowed in aggregates but is used in a call of {0}")]
    DistinctOutsideAggregate(String),
    /// A template contains a property path that cannot be reduced to triples.
    #[error("The property path {0} cannot be used in a template")]
    PathInTemplate(String),
    /// More than one graph name remains where a single graph is expected.
    #[error("Found the graph {found} inside a GRAPH {expected} pattern")]
    MultipleGraphNames { expected: Term, found: Term },
    /// A nested `GRAPH` pattern is scoped while the enclosing graph variable is being replaced.
    #[error("A nested GRAPH cannot be translated while the graph variable {0} is replaced")]
    NestedGraphWithReplacement(Term),
    /// The default graph is used where the syntax requires a term.
    #[error("The default graph cannot be used as a term")]
    UnexpectedDefaultGraph,
    #[error("{0}")]
    Internal(String),
}

impl From<Infallible> for TranslationError {
    #[inline]
    fn from(error: Infallible) -> Self {
        match error {}
    }
}

pub type TranslationResult<T> = Result<T, TranslationError>;
