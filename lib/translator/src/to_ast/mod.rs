//! Translation of algebra trees back into syntax trees.
//!
//! The translation is the inverse of [AlgebraTranslator](crate::AlgebraTranslator) up to
//! variable names and syntactic sugar. Projections and the other query forms become
//! sub-selects. The modifiers found between a projection and its group graph pattern are
//! collected while descending and attached to the sub-select once the projection is complete.

mod quads;
mod query;
mod term;
mod update;

use crate::{TranslationError, TranslationResult};
use sparql_algebra_logical::{BoundAggregate, Expression, Operation};
use sparql_algebra_model::Variable;
use sparql_algebra_syntax::{
    DatasetClause, ExpressionSyntax, PatternSyntax, QueryForm, QuerySyntax, SelectModifier,
    SourceSpan, SparqlSyntax, ValuesClause,
};
use term::{iri_to_syntax, path_to_triple, pattern_to_triple, term_to_syntax};
use tracing::debug;

/// The modifiers of the projection that is currently translated.
#[derive(Debug, Default)]
struct QueryState {
    /// Whether extensions are select expressions instead of `BIND`s.
    project: bool,
    extend: Vec<(Variable, Expression)>,
    group: Vec<Variable>,
    aggregates: Vec<BoundAggregate>,
    order: Vec<Expression>,
    /// The `VALUES` joined after grouping.
    values: Option<ValuesClause>,
}

/// Translates algebra trees into syntax trees.
#[derive(Debug, Default)]
pub struct AstTranslator {
    state: QueryState,
}

impl AstTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates `operation` into a query or, if it is an update operation, into an update.
    ///
    /// Graph names of quad patterns are turned back into `GRAPH` patterns.
    pub fn translate(&mut self, operation: &Operation) -> TranslationResult<SparqlSyntax> {
        self.state = QueryState::default();
        if operation.is_update() {
            debug!(kind = %operation.kind(), "Translating update algebra into syntax");
            return Ok(SparqlSyntax::Update(self.translate_update(operation)?));
        }

        debug!(kind = %operation.kind(), "Translating query algebra into syntax");
        let operation = quads::remove_quads(operation.clone())?;
        Ok(SparqlSyntax::Query(self.translate_into_query(&operation)?))
    }

    fn translate_operation(
        &mut self,
        operation: &Operation,
    ) -> TranslationResult<Vec<PatternSyntax>> {
        if self.state.project && self.state.values.is_none() {
            if let Operation::Join { input } = operation {
                if let [rest @ .., values @ Operation::Values { .. }] = input.as_slice() {
                    self.state.values = Some(values_to_syntax(values)?);
                    return match rest {
                        [] => Ok(Vec::new()),
                        [input] => self.translate_operation(input),
                        rest => self.translate_operation(&Operation::join(rest.to_vec())),
                    };
                }
            }
        }

        if !matches!(
            operation,
            Operation::Extend { .. } | Operation::OrderBy { .. } | Operation::Group { .. }
        ) {
            self.state.project = false;
        }

        Ok(match operation {
            Operation::Bgp { patterns } => {
                if patterns.is_empty() {
                    return Ok(Vec::new());
                }
                let triples = patterns
                    .iter()
                    .map(pattern_to_triple)
                    .collect::<TranslationResult<Vec<_>>>()?;
                vec![PatternSyntax::bgp(triples)]
            }
            Operation::Pattern(pattern) => {
                vec![PatternSyntax::bgp(vec![pattern_to_triple(pattern)?])]
            }
            Operation::Path(path) => vec![PatternSyntax::bgp(vec![path_to_triple(path)?])],
            Operation::Join { input } => {
                let mut result: Vec<PatternSyntax> = Vec::new();
                for input in input {
                    for pattern in self.translate_operation(input)? {
                        match (result.last_mut(), pattern) {
                            (
                                Some(PatternSyntax::Bgp { triples }),
                                PatternSyntax::Bgp { triples: next },
                            ) => triples.extend(next),
                            (_, pattern) => result.push(pattern),
                        }
                    }
                }
                result
            }
            Operation::LeftJoin {
                left,
                right,
                expression,
            } => {
                let mut result = self.translate_operation(left)?;
                let mut optional = self.translate_operation(right)?;
                if let Some(expression) = expression {
                    optional.push(PatternSyntax::filter(self.translate_expression(expression)?));
                }
                result.push(PatternSyntax::optional(optional));
                result
            }
            Operation::Minus { left, right } => {
                let mut result = self.translate_operation(left)?;
                let right = self.translate_operation(right)?;
                result.push(PatternSyntax::minus(unwrap_group(right)));
                result
            }
            Operation::Union { input } => {
                let branches = input
                    .iter()
                    .map(|input| Ok(array_to_pattern(self.translate_operation(input)?)))
                    .collect::<TranslationResult<Vec<_>>>()?;
                vec![PatternSyntax::union(branches)]
            }
            Operation::Filter { input, expression } => {
                let mut patterns = self.translate_operation(input)?;
                patterns.push(PatternSyntax::filter(self.translate_expression(expression)?));
                vec![PatternSyntax::group(patterns)]
            }
            Operation::Extend {
                input,
                variable,
                expression,
            } => {
                if self.state.project {
                    self.state.extend.push((variable.clone(), expression.clone()));
                    return self.translate_operation(input);
                }
                let mut patterns = self.translate_operation(input)?;
                patterns.push(PatternSyntax::bind(
                    self.translate_expression(expression)?,
                    variable.clone(),
                ));
                patterns
            }
            Operation::Graph { input, name } => {
                let patterns = unwrap_group(self.translate_operation(input)?);
                vec![PatternSyntax::graph(term_to_syntax(name)?, patterns)]
            }
            Operation::Service {
                input,
                name,
                silent,
            } => {
                let patterns = unwrap_group(self.translate_operation(input)?);
                vec![PatternSyntax::service(term_to_syntax(name)?, *silent, patterns)]
            }
            Operation::Group {
                input,
                variables,
                aggregates,
            } => {
                self.state.aggregates.extend(aggregates.iter().cloned());
                self.state.group.extend(variables.iter().cloned());
                self.translate_operation(input)?
            }
            Operation::OrderBy { input, expressions } => {
                self.state.order.extend(expressions.iter().cloned());
                self.translate_operation(input)?
            }
            Operation::Project { .. }
            | Operation::Construct { .. }
            | Operation::Ask { .. }
            | Operation::Describe { .. } => {
                vec![PatternSyntax::SubSelect(Box::new(self.translate_projection(operation)?))]
            }
            Operation::Distinct { input } | Operation::Reduced { input } => {
                let mut query = self.translate_into_query(input)?;
                if let QueryForm::Select { modifier, .. } = &mut query.form {
                    *modifier = Some(if matches!(operation, Operation::Distinct { .. }) {
                        SelectModifier::Distinct
                    } else {
                        SelectModifier::Reduced
                    });
                }
                vec![PatternSyntax::SubSelect(Box::new(query))]
            }
            Operation::Slice {
                input,
                start,
                length,
            } => {
                let mut query = self.translate_into_query(input)?;
                query.modifiers.offset = (*start != 0).then_some(*start);
                query.modifiers.limit = *length;
                vec![PatternSyntax::SubSelect(Box::new(query))]
            }
            Operation::From {
                input,
                default,
                named,
            } => {
                let mut query = self.translate_into_query(input)?;
                query.dataset = Some(DatasetClause {
                    default: default.iter().map(iri_to_syntax).collect(),
                    named: named.iter().map(iri_to_syntax).collect(),
                });
                vec![PatternSyntax::SubSelect(Box::new(query))]
            }
            Operation::Values { .. } => vec![PatternSyntax::Values(values_to_syntax(operation)?)],
            Operation::Nop => Vec::new(),
            Operation::CompositeUpdate { .. }
            | Operation::DeleteInsert { .. }
            | Operation::Load { .. }
            | Operation::Clear { .. }
            | Operation::Create { .. }
            | Operation::Drop { .. }
            | Operation::Add { .. }
            | Operation::Move { .. }
            | Operation::Copy { .. } => {
                return Err(TranslationError::Internal(format!(
                    "The update operation {} cannot be part of a query",
                    operation.kind()
                )))
            }
        })
    }

    /// Translates `operation` into a query. A single sub-select is returned as is, everything
    /// else is wrapped in `SELECT *`.
    fn translate_into_query(&mut self, operation: &Operation) -> TranslationResult<QuerySyntax> {
        let mut patterns = self.translate_operation(operation)?;
        if let [PatternSyntax::SubSelect(_)] = patterns.as_slice() {
            if let Some(PatternSyntax::SubSelect(query)) = patterns.pop() {
                return Ok(*query);
            }
        }
        Ok(QuerySyntax::select_all(patterns))
    }

    fn translate_expression(
        &mut self,
        expression: &Expression,
    ) -> TranslationResult<ExpressionSyntax> {
        Ok(match expression {
            Expression::Aggregate(aggregate) => ExpressionSyntax::Aggregate {
                aggregation: aggregate.aggregator,
                distinct: aggregate.distinct,
                expression: Box::new(self.translate_expression(&aggregate.expression)?),
                separator: aggregate.separator.clone(),
                span: SourceSpan::default(),
            },
            Expression::Existence { not, input } => {
                self.state.project = false;
                let patterns = unwrap_group(self.translate_operation(input)?);
                ExpressionSyntax::exists(*not, patterns)
            }
            Expression::Named { name, args } => ExpressionSyntax::function_call(
                iri_to_syntax(name),
                self.translate_expressions(args)?,
            ),
            Expression::Operator { operator, args } => {
                ExpressionSyntax::operation(operator.clone(), self.translate_expressions(args)?)
            }
            Expression::Term(term) => ExpressionSyntax::Term(term_to_syntax(term)?),
            Expression::Wildcard => ExpressionSyntax::Wildcard,
        })
    }

    fn translate_expressions(
        &mut self,
        expressions: &[Expression],
    ) -> TranslationResult<Vec<ExpressionSyntax>> {
        expressions
            .iter()
            .map(|expression| self.translate_expression(expression))
            .collect()
    }
}

/// Translates `operation` into a query or an update with a fresh [AstTranslator].
pub fn to_syntax(operation: &Operation) -> TranslationResult<SparqlSyntax> {
    AstTranslator::new().translate(operation)
}

fn values_to_syntax(operation: &Operation) -> TranslationResult<ValuesClause> {
    let Operation::Values {
        variables,
        bindings,
    } = operation
    else {
        return Err(TranslationError::Internal(format!(
            "{} is not a VALUES clause",
            operation.kind()
        )));
    };

    let rows = bindings
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_ref().map(term_to_syntax).transpose())
                .collect::<TranslationResult<Vec<_>>>()
        })
        .collect::<TranslationResult<Vec<_>>>()?;
    Ok(ValuesClause {
        variables: variables.clone(),
        rows,
    })
}

/// Returns the patterns of a single group pattern, or `patterns` itself.
fn unwrap_group(mut patterns: Vec<PatternSyntax>) -> Vec<PatternSyntax> {
    if let [PatternSyntax::Group { .. }] = patterns.as_slice() {
        if let Some(PatternSyntax::Group { patterns }) = patterns.pop() {
            return patterns;
        }
    }
    patterns
}

/// Returns a single pattern as is and wraps everything else in a group.
fn array_to_pattern(mut patterns: Vec<PatternSyntax>) -> PatternSyntax {
    if patterns.len() == 1 {
        if let Some(pattern) = patterns.pop() {
            return pattern;
        }
    }
    PatternSyntax::group(patterns)
}
