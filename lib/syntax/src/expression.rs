use crate::{IriRef, PatternSyntax, SourceSpan, TermSyntax};
use sparql_algebra_model::{AggregateFunction, Variable};

/// An expression as written in the source.
///
/// Built-in calls (`BOUND`, `REGEX`, `STR`, ...), unary and binary operators, and `IN`/`NOT IN`
/// are all represented as [ExpressionSyntax::Operation] with a lower-case operator name. `IN` and
/// `NOT IN` use the operators `in` and `notin` with the flat argument list `[lhs, e1, ..., en]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExpressionSyntax {
    Term(TermSyntax),
    /// The `*` in `COUNT(*)`.
    Wildcard,
    Operation {
        operator: String,
        args: Vec<ExpressionSyntax>,
        span: SourceSpan,
    },
    FunctionCall {
        function: IriRef,
        args: Vec<ExpressionSyntax>,
        distinct: bool,
        span: SourceSpan,
    },
    Aggregate {
        aggregation: AggregateFunction,
        distinct: bool,
        expression: Box<ExpressionSyntax>,
        /// The separator of `GROUP_CONCAT`.
        separator: Option<String>,
        span: SourceSpan,
    },
    /// `EXISTS { ... }` or `NOT EXISTS { ... }`.
    Exists {
        not: bool,
        patterns: Vec<PatternSyntax>,
    },
}

impl ExpressionSyntax {
    pub fn variable(name: impl Into<String>) -> Self {
        ExpressionSyntax::Term(TermSyntax::variable(name))
    }

    pub fn iri(iri: impl Into<String>) -> Self {
        ExpressionSyntax::Term(TermSyntax::iri(iri))
    }

    pub fn literal(value: impl Into<String>) -> Self {
        ExpressionSyntax::Term(TermSyntax::literal(value))
    }

    pub fn operation(operator: impl Into<String>, args: Vec<ExpressionSyntax>) -> Self {
        ExpressionSyntax::Operation {
            operator: operator.into(),
            args,
            span: SourceSpan::default(),
        }
    }

    pub fn function_call(function: IriRef, args: Vec<ExpressionSyntax>) -> Self {
        ExpressionSyntax::FunctionCall {
            function,
            args,
            distinct: false,
            span: SourceSpan::default(),
        }
    }

    pub fn aggregate(
        aggregation: AggregateFunction,
        distinct: bool,
        expression: ExpressionSyntax,
    ) -> Self {
        ExpressionSyntax::Aggregate {
            aggregation,
            distinct,
            expression: Box::new(expression),
            separator: None,
            span: SourceSpan::default(),
        }
    }

    /// `COUNT(*)`
    pub fn count_all() -> Self {
        Self::aggregate(AggregateFunction::Count, false, ExpressionSyntax::Wildcard)
    }

    pub fn group_concat(
        distinct: bool,
        expression: ExpressionSyntax,
        separator: Option<String>,
    ) -> Self {
        ExpressionSyntax::Aggregate {
            aggregation: AggregateFunction::GroupConcat,
            distinct,
            expression: Box::new(expression),
            separator,
            span: SourceSpan::default(),
        }
    }

    pub fn exists(not: bool, patterns: Vec<PatternSyntax>) -> Self {
        ExpressionSyntax::Exists { not, patterns }
    }

    /// Attaches a source span to operations, function calls, and aggregates. Other expressions are
    /// returned unchanged.
    #[must_use]
    pub fn with_span(self, new_span: SourceSpan) -> Self {
        match self {
            ExpressionSyntax::Operation { operator, args, .. } => ExpressionSyntax::Operation {
                operator,
                args,
                span: new_span,
            },
            ExpressionSyntax::FunctionCall {
                function,
                args,
                distinct,
                ..
            } => ExpressionSyntax::FunctionCall {
                function,
                args,
                distinct,
                span: new_span,
            },
            ExpressionSyntax::Aggregate {
                aggregation,
                distinct,
                expression,
                separator,
                ..
            } => ExpressionSyntax::Aggregate {
                aggregation,
                distinct,
                expression,
                separator,
                span: new_span,
            },
            other => other,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            ExpressionSyntax::Term(term) => term.as_variable(),
            _ => None,
        }
    }
}

impl From<Variable> for ExpressionSyntax {
    fn from(value: Variable) -> Self {
        ExpressionSyntax::Term(TermSyntax::Variable(value))
    }
}

impl From<TermSyntax> for ExpressionSyntax {
    fn from(value: TermSyntax) -> Self {
        ExpressionSyntax::Term(value)
    }
}
