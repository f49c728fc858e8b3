//! Removal of graph names from patterns.
//!
//! Patterns of the algebra carry the graph they are matched against, but the syntax only knows
//! `GRAPH` patterns. The graph names are moved upward as far as possible and turned into
//! [Operation::Graph] nodes where patterns of different graphs meet.

use crate::{TranslationError, TranslationResult};
use sparql_algebra_logical::{Expression, Operation, PathPattern, Pattern};
use sparql_algebra_model::Term;
use tracing::trace;

/// The graph that the patterns below an operation are matched against.
#[derive(Debug)]
enum Surfaced {
    /// There are no patterns.
    Nothing,
    Default,
    Graph(Term),
    /// The patterns of different graphs have already been wrapped in [Operation::Graph] nodes.
    Resolved,
}

impl Surfaced {
    fn from_graph(graph: Term) -> Self {
        match graph {
            Term::DefaultGraph => Surfaced::Default,
            graph => Surfaced::Graph(graph),
        }
    }
}

/// Moves the graph names of all patterns in `operation` into [Operation::Graph] nodes.
pub(super) fn remove_quads(operation: Operation) -> TranslationResult<Operation> {
    let (operation, surfaced) = strip(operation)?;
    Ok(match surfaced {
        Surfaced::Graph(name) => wrap_below_modifiers(operation, name),
        _ => operation,
    })
}

/// Wraps `operation` in a graph below the extensions, orderings, groups, filters, and trailing
/// `VALUES` that start the body of a query form.
fn wrap_below_modifiers(operation: Operation, name: Term) -> Operation {
    match operation {
        Operation::Extend {
            input,
            variable,
            expression,
        } => Operation::extend(wrap_below_modifiers(*input, name), variable, expression),
        Operation::OrderBy { input, expressions } => {
            Operation::order_by(wrap_below_modifiers(*input, name), expressions)
        }
        Operation::Group {
            input,
            variables,
            aggregates,
        } => Operation::group(wrap_below_modifiers(*input, name), variables, aggregates),
        Operation::Filter { input, expression } => {
            Operation::filter(wrap_below_modifiers(*input, name), expression)
        }
        Operation::Join { mut input }
            if input.len() > 1 && matches!(input.last(), Some(Operation::Values { .. })) =>
        {
            let values = input.pop();
            let rest = match input.len() {
                1 => input.pop().unwrap_or(Operation::Nop),
                _ => Operation::join(input),
            };
            Operation::join(
                std::iter::once(wrap_below_modifiers(rest, name))
                    .chain(values)
                    .collect(),
            )
        }
        operation => Operation::graph(operation, name),
    }
}

fn strip(operation: Operation) -> TranslationResult<(Operation, Surfaced)> {
    match operation {
        Operation::Pattern(pattern) => {
            let (pattern, graph) = strip_pattern(pattern);
            Ok((Operation::pattern(pattern), Surfaced::from_graph(graph)))
        }
        Operation::Path(path) => {
            let PathPattern {
                subject,
                predicate,
                object,
                graph,
            } = path;
            let path = PathPattern::new(subject, predicate, object, Term::DefaultGraph);
            Ok((Operation::path(path), Surfaced::from_graph(graph)))
        }
        Operation::Bgp { patterns } => Ok(strip_bgp(patterns)),
        Operation::Graph { input, name } => {
            let (input, surfaced) = strip(*input)?;
            match surfaced {
                Surfaced::Graph(found) if found != name => {
                    Err(TranslationError::MultipleGraphNames {
                        expected: name,
                        found,
                    })
                }
                _ => Ok((Operation::graph(input, name), Surfaced::Resolved)),
            }
        }
        operation @ Operation::DeleteInsert { .. } => Ok((operation, Surfaced::Nothing)),
        operation => strip_children(strip_expressions(operation)?),
    }
}

fn strip_pattern(pattern: Pattern) -> (Pattern, Term) {
    let graph = pattern.graph.clone();
    (pattern.with_graph(Term::DefaultGraph), graph)
}

/// Splits a BGP into one BGP per graph. The graphs keep the order of their first pattern.
fn strip_bgp(patterns: Vec<Pattern>) -> (Operation, Surfaced) {
    let mut clusters: Vec<(Term, Vec<Pattern>)> = Vec::new();
    for pattern in patterns {
        let (pattern, graph) = strip_pattern(pattern);
        match clusters.iter_mut().find(|(name, _)| *name == graph) {
            Some((_, cluster)) => cluster.push(pattern),
            None => clusters.push((graph, vec![pattern])),
        }
    }

    if clusters.len() <= 1 {
        return match clusters.pop() {
            Some((graph, patterns)) => (Operation::bgp(patterns), Surfaced::from_graph(graph)),
            None => (Operation::bgp(Vec::new()), Surfaced::Nothing),
        };
    }

    trace!(graphs = clusters.len(), "Splitting BGP into graphs");
    let input = clusters
        .into_iter()
        .map(|(graph, patterns)| match graph {
            Term::DefaultGraph => Operation::bgp(patterns),
            graph => Operation::graph(Operation::bgp(patterns), graph),
        })
        .collect();
    (Operation::join(input), Surfaced::Resolved)
}

/// Strips the children of `operation` and wraps those that are matched against a named graph if
/// the graph cannot be moved further up.
///
/// A graph is moved up if it is the only graph below `operation`. The query forms and `SERVICE`
/// are scopes that graphs never leave. Inside a scope, the graph is placed below the modifiers of
/// the query form so that they stay clauses of the query.
fn strip_children(operation: Operation) -> TranslationResult<(Operation, Surfaced)> {
    let is_scope = matches!(
        operation,
        Operation::Project { .. }
            | Operation::Construct { .. }
            | Operation::Ask { .. }
            | Operation::Describe { .. }
            | Operation::Service { .. }
    );

    let mut children = Vec::new();
    let skeleton = operation.try_map_children(|child| {
        children.push(strip(child)?);
        Ok::<_, TranslationError>(Operation::Nop)
    })?;

    let mut names: Vec<&Term> = Vec::new();
    let mut has_default = false;
    let mut has_resolved = false;
    for (_, surfaced) in &children {
        match surfaced {
            Surfaced::Graph(name) if !names.contains(&name) => names.push(name),
            Surfaced::Default => has_default = true,
            Surfaced::Resolved => has_resolved = true,
            Surfaced::Graph(_) | Surfaced::Nothing => {}
        }
    }
    let wrap = names.len() > 1 || (names.len() == 1 && (is_scope || has_default || has_resolved));
    let surfaced = match names.first() {
        _ if wrap || has_resolved => Surfaced::Resolved,
        Some(name) => Surfaced::Graph((*name).clone()),
        None if has_default => Surfaced::Default,
        None => Surfaced::Nothing,
    };

    let mut children = children.into_iter();
    let operation = skeleton.try_map_children(|_| {
        let (child, surfaced) = children.next().ok_or_else(|| {
            TranslationError::Internal("The number of children changed".to_owned())
        })?;
        Ok::<_, TranslationError>(match surfaced {
            Surfaced::Graph(name) if wrap && is_scope => wrap_below_modifiers(child, name),
            Surfaced::Graph(name) if wrap => Operation::graph(child, name),
            _ => child,
        })
    })?;
    Ok((operation, surfaced))
}

/// Removes the graph names from the operations nested in the `EXISTS` expressions of
/// `operation`. They are separate scopes.
fn strip_expressions(operation: Operation) -> TranslationResult<Operation> {
    Ok(match operation {
        Operation::Filter { input, expression } => {
            Operation::filter(*input, strip_expression(expression)?)
        }
        Operation::Extend {
            input,
            variable,
            expression,
        } => Operation::extend(*input, variable, strip_expression(expression)?),
        Operation::LeftJoin {
            left,
            right,
            expression,
        } => Operation::left_join(
            *left,
            *right,
            expression.map(strip_expression).transpose()?,
        ),
        Operation::OrderBy { input, expressions } => Operation::order_by(
            *input,
            expressions
                .into_iter()
                .map(strip_expression)
                .collect::<TranslationResult<_>>()?,
        ),
        operation => operation,
    })
}

fn strip_expression(expression: Expression) -> TranslationResult<Expression> {
    Ok(match expression {
        Expression::Existence { not, input } => Expression::existence(not, remove_quads(*input)?),
        Expression::Operator { operator, args } => Expression::Operator {
            operator,
            args: args
                .into_iter()
                .map(strip_expression)
                .collect::<TranslationResult<_>>()?,
        },
        Expression::Named { name, args } => Expression::Named {
            name,
            args: args
                .into_iter()
                .map(strip_expression)
                .collect::<TranslationResult<_>>()?,
        },
        expression @ (Expression::Aggregate(_) | Expression::Term(_) | Expression::Wildcard) => {
            expression
        }
    })
}
