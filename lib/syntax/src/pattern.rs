use crate::{ExpressionSyntax, QuerySyntax, TermSyntax, TripleSyntax};
use sparql_algebra_model::Variable;

/// A graph pattern as written in the source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternSyntax {
    /// A block of triples.
    Bgp { triples: Vec<TripleSyntax> },
    /// `{ ... }`
    Group { patterns: Vec<PatternSyntax> },
    /// `OPTIONAL { ... }`
    Optional { patterns: Vec<PatternSyntax> },
    /// `MINUS { ... }`
    Minus { patterns: Vec<PatternSyntax> },
    /// `{ ... } UNION { ... }`. Each branch is usually a [PatternSyntax::Group].
    Union { branches: Vec<PatternSyntax> },
    /// `GRAPH name { ... }`
    Graph {
        name: TermSyntax,
        patterns: Vec<PatternSyntax>,
    },
    /// `SERVICE SILENT? name { ... }`
    Service {
        name: TermSyntax,
        silent: bool,
        patterns: Vec<PatternSyntax>,
    },
    /// `FILTER(...)`
    Filter { expression: ExpressionSyntax },
    /// `BIND(... AS ?v)`
    Bind {
        expression: ExpressionSyntax,
        variable: Variable,
    },
    /// An inline `VALUES` block.
    Values(ValuesClause),
    /// `{ SELECT ... }`
    SubSelect(Box<QuerySyntax>),
}

impl PatternSyntax {
    pub fn bgp(triples: Vec<TripleSyntax>) -> Self {
        PatternSyntax::Bgp { triples }
    }

    pub fn group(patterns: Vec<PatternSyntax>) -> Self {
        PatternSyntax::Group { patterns }
    }

    pub fn optional(patterns: Vec<PatternSyntax>) -> Self {
        PatternSyntax::Optional { patterns }
    }

    pub fn minus(patterns: Vec<PatternSyntax>) -> Self {
        PatternSyntax::Minus { patterns }
    }

    pub fn union(branches: Vec<PatternSyntax>) -> Self {
        PatternSyntax::Union { branches }
    }

    pub fn graph(name: TermSyntax, patterns: Vec<PatternSyntax>) -> Self {
        PatternSyntax::Graph { name, patterns }
    }

    pub fn service(name: TermSyntax, silent: bool, patterns: Vec<PatternSyntax>) -> Self {
        PatternSyntax::Service {
            name,
            silent,
            patterns,
        }
    }

    pub fn filter(expression: ExpressionSyntax) -> Self {
        PatternSyntax::Filter { expression }
    }

    pub fn bind(expression: ExpressionSyntax, variable: Variable) -> Self {
        PatternSyntax::Bind {
            expression,
            variable,
        }
    }
}

/// A `VALUES` block. A [None] cell is `UNDEF`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValuesClause {
    pub variables: Vec<Variable>,
    pub rows: Vec<Vec<Option<TermSyntax>>>,
}
