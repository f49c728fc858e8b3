use crate::to_ast::term::{template_to_triples, term_to_syntax};
use crate::to_ast::{unwrap_group, AstTranslator, QueryState};
use crate::{TranslationError, TranslationResult};
use sparql_algebra_logical::{Expression, Operation};
use sparql_algebra_model::Variable;
use sparql_algebra_syntax::{
    DescribeTarget, ExpressionSyntax, GroupCondition, OrderCondition, PatternSyntax, QueryForm,
    QuerySyntax, SelectItem, Selection, SolutionModifiers, TermSyntax,
};
use std::mem::{replace, take};

/// Aggregate variables together with the aggregate they are bound to.
type AggregateSyntax = Vec<(Variable, ExpressionSyntax)>;

impl AstTranslator {
    /// Translates a projection, a `CONSTRUCT`, an `ASK`, or a `DESCRIBE` into a query.
    ///
    /// The extensions, groups, aggregates, and orderings below the node are collected into a
    /// fresh [QueryState] and turned into the clauses of the query. The state of the enclosing
    /// query is restored afterward.
    pub(super) fn translate_projection(
        &mut self,
        operation: &Operation,
    ) -> TranslationResult<QuerySyntax> {
        let input = match operation {
            Operation::Project { input, .. }
            | Operation::Construct { input, .. }
            | Operation::Ask { input }
            | Operation::Describe { input, .. } => input,
            _ => {
                return Err(TranslationError::Internal(format!(
                    "{} is not a query form",
                    operation.kind()
                )))
            }
        };

        let outer = replace(
            &mut self.state,
            QueryState {
                project: true,
                ..QueryState::default()
            },
        );
        let result = self.translate_query_body(operation, input);
        self.state = outer;
        result
    }

    fn translate_query_body(
        &mut self,
        operation: &Operation,
        input: &Operation,
    ) -> TranslationResult<QuerySyntax> {
        let mut where_clause = unwrap_group(self.translate_operation(input)?);
        let state = take(&mut self.state);

        let aggregates = state
            .aggregates
            .iter()
            .map(|bound| -> TranslationResult<_> {
                let aggregate = self.translate_expression(&bound.aggregate.clone().into())?;
                Ok((bound.variable.clone(), aggregate))
            })
            .collect::<TranslationResult<AggregateSyntax>>()?;

        let mut extensions = Vec::with_capacity(state.extend.len());
        for (variable, expression) in state.extend.iter().rev() {
            let expression = self.translate_expression(expression)?;
            extensions.push((
                variable.clone(),
                replace_aggregate_variables(expression, &aggregates),
            ));
        }

        let group = state
            .group
            .iter()
            .map(|variable| match take_extension(&mut extensions, variable) {
                Some(expression) => GroupCondition {
                    expression,
                    variable: Some(variable.clone()),
                },
                None => GroupCondition::variable(variable.clone()),
            })
            .collect();

        let mut order = Vec::with_capacity(state.order.len());
        for expression in &state.order {
            let (expression, descending) = match expression {
                Expression::Operator { operator, args }
                    if operator == "desc" && args.len() == 1 =>
                {
                    (&args[0], true)
                }
                expression => (expression, false),
            };
            let expression = self.translate_expression(expression)?;
            order.push(OrderCondition {
                expression: replace_aggregate_variables(expression, &aggregates),
                descending,
            });
        }

        let form = match operation {
            Operation::Project { variables, .. } => QueryForm::Select {
                selection: select_items(variables, &mut extensions, &aggregates),
                modifier: None,
            },
            Operation::Construct { template, .. } => QueryForm::Construct {
                template: template_to_triples(template)?,
            },
            Operation::Describe { terms, .. } => QueryForm::Describe {
                terms: DescribeTarget::Terms(
                    terms
                        .iter()
                        .map(term_to_syntax)
                        .collect::<TranslationResult<Vec<_>>>()?,
                ),
            },
            _ => QueryForm::Ask,
        };

        let having = extract_having(&mut where_clause, &aggregates);

        where_clause.extend(
            extensions
                .into_iter()
                .map(|(variable, expression)| PatternSyntax::bind(expression, variable)),
        );

        let mut query = QuerySyntax::new(form, where_clause);
        query.values = state.values;
        query.modifiers = SolutionModifiers {
            group,
            having,
            order,
            limit: None,
            offset: None,
        };
        Ok(query)
    }
}

fn select_items(
    variables: &[Variable],
    extensions: &mut Vec<(Variable, ExpressionSyntax)>,
    aggregates: &AggregateSyntax,
) -> Selection {
    // Only `SELECT *` over a pattern without variables projects nothing. A rewritten tree with an
    // empty projection over a non-empty pattern is read back as `SELECT *` as well.
    if variables.is_empty() {
        return Selection::Wildcard;
    }

    let items = variables
        .iter()
        .map(|variable| {
            let expression = take_extension(extensions, variable).or_else(|| {
                aggregates
                    .iter()
                    .find(|(bound, _)| bound == variable)
                    .map(|(_, aggregate)| aggregate.clone())
            });
            match expression {
                Some(expression) => SelectItem::Expression {
                    expression,
                    variable: variable.clone(),
                },
                None => SelectItem::Variable(variable.clone()),
            }
        })
        .collect();
    Selection::Items(items)
}

fn take_extension(
    extensions: &mut Vec<(Variable, ExpressionSyntax)>,
    variable: &Variable,
) -> Option<ExpressionSyntax> {
    let position = extensions.iter().position(|(bound, _)| bound == variable)?;
    Some(extensions.remove(position).1)
}

/// Moves the trailing filters that use aggregate variables out of `where_clause`. They are
/// returned in their original order.
fn extract_having(
    where_clause: &mut Vec<PatternSyntax>,
    aggregates: &AggregateSyntax,
) -> Vec<ExpressionSyntax> {
    let mut having = Vec::new();
    if aggregates.is_empty() {
        return having;
    }

    loop {
        *where_clause = unwrap_group(take(where_clause));
        let uses_aggregate = matches!(
            where_clause.last(),
            Some(PatternSyntax::Filter { expression })
                if uses_aggregate_variable(expression, aggregates)
        );
        if !uses_aggregate {
            break;
        }
        if let Some(PatternSyntax::Filter { expression }) = where_clause.pop() {
            having.push(replace_aggregate_variables(expression, aggregates));
        }
    }

    having.reverse();
    having
}

fn uses_aggregate_variable(expression: &ExpressionSyntax, aggregates: &AggregateSyntax) -> bool {
    match expression {
        ExpressionSyntax::Term(TermSyntax::Variable(variable)) => {
            aggregates.iter().any(|(bound, _)| bound == variable)
        }
        ExpressionSyntax::Operation { args, .. } | ExpressionSyntax::FunctionCall { args, .. } => {
            args.iter().any(|arg| uses_aggregate_variable(arg, aggregates))
        }
        ExpressionSyntax::Aggregate { expression, .. } => {
            uses_aggregate_variable(expression, aggregates)
        }
        ExpressionSyntax::Term(_)
        | ExpressionSyntax::Wildcard
        | ExpressionSyntax::Exists { .. } => false,
    }
}

/// Replaces aggregate variables by the aggregates they are bound to.
fn replace_aggregate_variables(
    expression: ExpressionSyntax,
    aggregates: &AggregateSyntax,
) -> ExpressionSyntax {
    match expression {
        ExpressionSyntax::Term(TermSyntax::Variable(variable)) => aggregates
            .iter()
            .find(|(bound, _)| *bound == variable)
            .map_or_else(
                || ExpressionSyntax::from(variable),
                |(_, aggregate)| aggregate.clone(),
            ),
        ExpressionSyntax::Operation {
            operator,
            args,
            span,
        } => ExpressionSyntax::Operation {
            operator,
            args: replace_all(args, aggregates),
            span,
        },
        ExpressionSyntax::FunctionCall {
            function,
            args,
            distinct,
            span,
        } => ExpressionSyntax::FunctionCall {
            function,
            args: replace_all(args, aggregates),
            distinct,
            span,
        },
        expression => expression,
    }
}

fn replace_all(args: Vec<ExpressionSyntax>, aggregates: &AggregateSyntax) -> Vec<ExpressionSyntax> {
    args.into_iter()
        .map(|arg| replace_aggregate_variables(arg, aggregates))
        .collect()
}
