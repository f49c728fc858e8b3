use crate::Operation;
use sparql_algebra_model::{AggregateFunction, NamedNode, Term, Variable};

/// An expression in the algebra.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
    Aggregate(AggregateExpression),
    /// `EXISTS` or `NOT EXISTS` with its translated group.
    Existence {
        not: bool,
        input: Box<Operation>,
    },
    /// A call of a function identified by an IRI.
    Named {
        name: NamedNode,
        args: Vec<Expression>,
    },
    /// An operator or a built-in function, identified by its lower-case name.
    Operator {
        operator: String,
        args: Vec<Expression>,
    },
    Term(Term),
    Wildcard,
}

impl Expression {
    pub fn operator(operator: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Operator {
            operator: operator.into(),
            args,
        }
    }

    pub fn named(name: NamedNode, args: Vec<Expression>) -> Self {
        Expression::Named { name, args }
    }

    pub fn existence(not: bool, input: Operation) -> Self {
        Expression::Existence {
            not,
            input: Box::new(input),
        }
    }

    pub fn variable(variable: Variable) -> Self {
        Expression::Term(Term::Variable(variable))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Expression::Term(term) => term.as_variable(),
            _ => None,
        }
    }

    /// Conjoins `expressions` with `&&`, left to right. Returns [None] for an empty iterator.
    pub fn conjunction(expressions: impl IntoIterator<Item = Expression>) -> Option<Expression> {
        expressions
            .into_iter()
            .reduce(|lhs, rhs| Expression::operator("&&", vec![lhs, rhs]))
    }
}

impl From<Term> for Expression {
    fn from(value: Term) -> Self {
        Expression::Term(value)
    }
}

impl From<Variable> for Expression {
    fn from(value: Variable) -> Self {
        Expression::Term(Term::Variable(value))
    }
}

impl From<AggregateExpression> for Expression {
    fn from(value: AggregateExpression) -> Self {
        Expression::Aggregate(value)
    }
}

/// An aggregate such as `COUNT(DISTINCT ?x)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AggregateExpression {
    pub aggregator: AggregateFunction,
    pub distinct: bool,
    pub expression: Box<Expression>,
    /// The separator of `GROUP_CONCAT`.
    pub separator: Option<String>,
}

impl AggregateExpression {
    pub fn new(aggregator: AggregateFunction, distinct: bool, expression: Expression) -> Self {
        Self {
            aggregator,
            distinct,
            expression: Box::new(expression),
            separator: None,
        }
    }

    #[must_use]
    pub fn with_separator(self, separator: Option<String>) -> Self {
        Self { separator, ..self }
    }
}

/// An aggregate whose result is bound to a variable by a [Operation::Group].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoundAggregate {
    pub variable: Variable,
    pub aggregate: AggregateExpression,
}

impl BoundAggregate {
    pub fn new(variable: Variable, aggregate: AggregateExpression) -> Self {
        Self {
            variable,
            aggregate,
        }
    }
}
