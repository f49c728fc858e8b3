//! Transforming traversal of algebra trees.
//!
//! The rewriter is called in pre-order. It can replace a node and decide whether the walker should
//! descend into the replacement. Nodes are rebuilt through the factory methods, so rewritten joins
//! and unions are flattened again.

use crate::visit::Recursion;
use crate::{AggregateExpression, BoundAggregate, Expression, Operation, PathPattern, Pattern};
use sparql_algebra_model::{Term, Variable};

/// The result of a single rewrite step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transformed<T> {
    pub data: T,
    pub transformed: bool,
    pub recursion: Recursion,
}

impl<T> Transformed<T> {
    pub fn new(data: T, transformed: bool, recursion: Recursion) -> Self {
        Self {
            data,
            transformed,
            recursion,
        }
    }

    /// The node has been replaced. The walker descends into the replacement.
    pub fn yes(data: T) -> Self {
        Self::new(data, true, Recursion::Continue)
    }

    /// The node is unchanged. The walker descends into it.
    pub fn no(data: T) -> Self {
        Self::new(data, false, Recursion::Continue)
    }
}

/// Callbacks for [rewrite_operation] and [rewrite_expression].
///
/// The default implementations keep every node and route all terms through
/// [AlgebraRewriter::rewrite_term], so a renaming only needs to override that method.
pub trait AlgebraRewriter {
    type Error;

    fn rewrite_operation(
        &mut self,
        operation: Operation,
    ) -> Result<Transformed<Operation>, Self::Error> {
        Ok(Transformed::no(operation))
    }

    fn rewrite_expression(
        &mut self,
        expression: Expression,
    ) -> Result<Transformed<Expression>, Self::Error> {
        Ok(Transformed::no(expression))
    }

    /// Called for the patterns of a [Operation::Bgp] and for [Operation::Pattern].
    fn rewrite_pattern(&mut self, pattern: Pattern) -> Result<Pattern, Self::Error> {
        pattern.try_map_terms(|term| self.rewrite_term(term))
    }

    fn rewrite_path(&mut self, path: PathPattern) -> Result<PathPattern, Self::Error> {
        path.try_map_terms(|term| self.rewrite_term(term))
    }

    /// Called for construct templates and for the delete and insert templates of updates.
    fn rewrite_template(&mut self, template: Vec<Pattern>) -> Result<Vec<Pattern>, Self::Error> {
        template
            .into_iter()
            .map(|pattern| self.rewrite_pattern(pattern))
            .collect()
    }

    fn rewrite_term(&mut self, term: Term) -> Result<Term, Self::Error> {
        Ok(term)
    }

    /// Called for positions that can only hold a variable, e.g., the variables of a projection.
    /// If [AlgebraRewriter::rewrite_term] maps the variable to something else, the variable is
    /// kept.
    fn rewrite_variable(&mut self, variable: Variable) -> Result<Variable, Self::Error> {
        match self.rewrite_term(Term::Variable(variable.clone()))? {
            Term::Variable(rewritten) => Ok(rewritten),
            _ => Ok(variable),
        }
    }
}

/// Rewrites `operation` and all nodes below it, including the operations nested in `EXISTS`
/// expressions.
pub fn rewrite_operation<R: AlgebraRewriter + ?Sized>(
    rewriter: &mut R,
    operation: Operation,
) -> Result<Operation, R::Error> {
    let transformed = rewriter.rewrite_operation(operation)?;
    match transformed.recursion {
        Recursion::Continue => rewrite_operation_children(rewriter, transformed.data),
        Recursion::Jump => Ok(transformed.data),
    }
}

/// Rewrites `expression` and all nodes below it.
pub fn rewrite_expression<R: AlgebraRewriter + ?Sized>(
    rewriter: &mut R,
    expression: Expression,
) -> Result<Expression, R::Error> {
    let transformed = rewriter.rewrite_expression(expression)?;
    if transformed.recursion == Recursion::Jump {
        return Ok(transformed.data);
    }

    Ok(match transformed.data {
        Expression::Aggregate(aggregate) => {
            Expression::Aggregate(rewrite_aggregate(rewriter, aggregate)?)
        }
        Expression::Existence { not, input } => {
            Expression::existence(not, rewrite_operation(rewriter, *input)?)
        }
        Expression::Named { name, args } => Expression::Named {
            name,
            args: rewrite_expressions(rewriter, args)?,
        },
        Expression::Operator { operator, args } => Expression::Operator {
            operator,
            args: rewrite_expressions(rewriter, args)?,
        },
        Expression::Term(term) => Expression::Term(rewriter.rewrite_term(term)?),
        Expression::Wildcard => Expression::Wildcard,
    })
}

fn rewrite_operation_children<R: AlgebraRewriter + ?Sized>(
    rewriter: &mut R,
    operation: Operation,
) -> Result<Operation, R::Error> {
    Ok(match operation {
        Operation::Bgp { patterns } => Operation::bgp(
            patterns
                .into_iter()
                .map(|pattern| rewriter.rewrite_pattern(pattern))
                .collect::<Result<_, _>>()?,
        ),
        Operation::Pattern(pattern) => Operation::pattern(rewriter.rewrite_pattern(pattern)?),
        Operation::Path(path) => Operation::path(rewriter.rewrite_path(path)?),
        Operation::Join { input } => Operation::join(rewrite_operations(rewriter, input)?),
        Operation::LeftJoin {
            left,
            right,
            expression,
        } => Operation::left_join(
            rewrite_operation(rewriter, *left)?,
            rewrite_operation(rewriter, *right)?,
            expression
                .map(|expression| rewrite_expression(rewriter, expression))
                .transpose()?,
        ),
        Operation::Minus { left, right } => Operation::minus(
            rewrite_operation(rewriter, *left)?,
            rewrite_operation(rewriter, *right)?,
        ),
        Operation::Union { input } => Operation::union(rewrite_operations(rewriter, input)?),
        Operation::Filter { input, expression } => Operation::filter(
            rewrite_operation(rewriter, *input)?,
            rewrite_expression(rewriter, expression)?,
        ),
        Operation::Extend {
            input,
            variable,
            expression,
        } => Operation::extend(
            rewrite_operation(rewriter, *input)?,
            rewriter.rewrite_variable(variable)?,
            rewrite_expression(rewriter, expression)?,
        ),
        Operation::Graph { input, name } => Operation::graph(
            rewrite_operation(rewriter, *input)?,
            rewriter.rewrite_term(name)?,
        ),
        Operation::Service {
            input,
            name,
            silent,
        } => Operation::service(
            rewrite_operation(rewriter, *input)?,
            rewriter.rewrite_term(name)?,
            silent,
        ),
        Operation::Group {
            input,
            variables,
            aggregates,
        } => {
            let input = rewrite_operation(rewriter, *input)?;
            let variables = rewrite_variables(rewriter, variables)?;
            let aggregates = aggregates
                .into_iter()
                .map(|bound| {
                    Ok::<_, R::Error>(BoundAggregate::new(
                        rewriter.rewrite_variable(bound.variable)?,
                        rewrite_aggregate(rewriter, bound.aggregate)?,
                    ))
                })
                .collect::<Result<_, _>>()?;
            Operation::group(input, variables, aggregates)
        }
        Operation::OrderBy { input, expressions } => Operation::order_by(
            rewrite_operation(rewriter, *input)?,
            rewrite_expressions(rewriter, expressions)?,
        ),
        Operation::Project { input, variables } => Operation::project(
            rewrite_operation(rewriter, *input)?,
            rewrite_variables(rewriter, variables)?,
        ),
        Operation::Distinct { input } => Operation::distinct(rewrite_operation(rewriter, *input)?),
        Operation::Reduced { input } => Operation::reduced(rewrite_operation(rewriter, *input)?),
        Operation::Slice {
            input,
            start,
            length,
        } => Operation::slice(rewrite_operation(rewriter, *input)?, start, length),
        Operation::From {
            input,
            default,
            named,
        } => Operation::from_dataset(rewrite_operation(rewriter, *input)?, default, named),
        Operation::Values {
            variables,
            bindings,
        } => {
            let variables = rewrite_variables(rewriter, variables)?;
            let bindings = bindings
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|cell| cell.map(|term| rewriter.rewrite_term(term)).transpose())
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<_, _>>()?;
            Operation::values(variables, bindings)
        }
        Operation::Construct { input, template } => Operation::construct(
            rewrite_operation(rewriter, *input)?,
            rewriter.rewrite_template(template)?,
        ),
        Operation::Describe { input, terms } => {
            let input = rewrite_operation(rewriter, *input)?;
            let terms = terms
                .into_iter()
                .map(|term| rewriter.rewrite_term(term))
                .collect::<Result<_, _>>()?;
            Operation::describe(input, terms)
        }
        Operation::Ask { input } => Operation::ask(rewrite_operation(rewriter, *input)?),
        Operation::CompositeUpdate { updates } => {
            Operation::composite_update(rewrite_operations(rewriter, updates)?)
        }
        Operation::DeleteInsert {
            delete,
            insert,
            where_clause,
        } => Operation::delete_insert(
            delete
                .map(|delete| rewriter.rewrite_template(delete))
                .transpose()?,
            insert
                .map(|insert| rewriter.rewrite_template(insert))
                .transpose()?,
            where_clause
                .map(|where_clause| rewrite_operation(rewriter, *where_clause))
                .transpose()?,
        ),
        operation @ (Operation::Nop
        | Operation::Load { .. }
        | Operation::Clear { .. }
        | Operation::Create { .. }
        | Operation::Drop { .. }
        | Operation::Add { .. }
        | Operation::Move { .. }
        | Operation::Copy { .. }) => operation,
    })
}

fn rewrite_operations<R: AlgebraRewriter + ?Sized>(
    rewriter: &mut R,
    operations: Vec<Operation>,
) -> Result<Vec<Operation>, R::Error> {
    operations
        .into_iter()
        .map(|operation| rewrite_operation(rewriter, operation))
        .collect()
}

fn rewrite_expressions<R: AlgebraRewriter + ?Sized>(
    rewriter: &mut R,
    expressions: Vec<Expression>,
) -> Result<Vec<Expression>, R::Error> {
    expressions
        .into_iter()
        .map(|expression| rewrite_expression(rewriter, expression))
        .collect()
}

fn rewrite_variables<R: AlgebraRewriter + ?Sized>(
    rewriter: &mut R,
    variables: Vec<Variable>,
) -> Result<Vec<Variable>, R::Error> {
    variables
        .into_iter()
        .map(|variable| rewriter.rewrite_variable(variable))
        .collect()
}

fn rewrite_aggregate<R: AlgebraRewriter + ?Sized>(
    rewriter: &mut R,
    aggregate: AggregateExpression,
) -> Result<AggregateExpression, R::Error> {
    Ok(AggregateExpression {
        expression: Box::new(rewrite_expression(rewriter, *aggregate.expression)?),
        ..aggregate
    })
}
