//! Translation of the query forms and of the solution modifiers.

use crate::context::TranslationContext;
use crate::to_algebra::scan::select_all_variables;
use crate::TranslationResult;
use sparql_algebra_logical::{BoundAggregate, Expression, Operation};
use sparql_algebra_model::{Term, Variable};
use sparql_algebra_syntax::{
    DescribeTarget, ExpressionSyntax, QueryForm, QuerySyntax, SelectItem, SelectModifier,
    Selection,
};

/// The aggregates of a query, in the order in which they are found.
///
/// Syntactically equal aggregates share a variable. Source spans are not part of the equality of
/// syntax trees, so `COUNT(*)` in the projection and in `HAVING` are the same aggregate.
#[derive(Default)]
struct AggregateBindings {
    entries: Vec<(ExpressionSyntax, BoundAggregate)>,
}

impl AggregateBindings {
    fn find(&self, aggregate: &ExpressionSyntax) -> Option<&Variable> {
        self.entries
            .iter()
            .find(|(syntax, _)| syntax == aggregate)
            .map(|(_, bound)| &bound.variable)
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn into_aggregates(self) -> Vec<BoundAggregate> {
        self.entries.into_iter().map(|(_, bound)| bound).collect()
    }
}

impl TranslationContext<'_> {
    pub(crate) fn translate_query(&mut self, query: &QuerySyntax) -> TranslationResult<Operation> {
        self.register_context(&query.context)?;
        let input = self.translate_group(&query.where_clause)?;
        self.translate_modifiers(query, input)
    }

    fn translate_modifiers(
        &mut self,
        query: &QuerySyntax,
        input: Operation,
    ) -> TranslationResult<Operation> {
        let mut bindings = AggregateBindings::default();

        let selection = match &query.form {
            QueryForm::Select {
                selection: Selection::Items(items),
                ..
            } => {
                let mut selection = Vec::with_capacity(items.len());
                for item in items {
                    selection.push(match item {
                        SelectItem::Variable(variable) => SelectItem::Variable(variable.clone()),
                        SelectItem::Expression {
                            expression,
                            variable,
                        } => SelectItem::Expression {
                            expression: self.extract_aggregates(expression, &mut bindings)?,
                            variable: variable.clone(),
                        },
                    });
                }
                Some(selection)
            }
            _ => None,
        };
        let having = query
            .modifiers
            .having
            .iter()
            .map(|expression| self.extract_aggregates(expression, &mut bindings))
            .collect::<TranslationResult<Vec<_>>>()?;
        let order = query
            .modifiers
            .order
            .iter()
            .map(|condition| -> TranslationResult<_> {
                let expression = self.extract_aggregates(&condition.expression, &mut bindings)?;
                Ok((expression, condition.descending))
            })
            .collect::<TranslationResult<Vec<_>>>()?;

        let mut result = input;

        if !query.modifiers.group.is_empty() || !bindings.is_empty() {
            let mut variables = Vec::new();
            for condition in &query.modifiers.group {
                match (&condition.variable, condition.expression.as_variable()) {
                    (None, Some(variable)) => variables.push(variable.clone()),
                    (variable, _) => {
                        let variable = match variable {
                            Some(variable) => variable.clone(),
                            None => self.fresh_variable(),
                        };
                        let expression = self.translate_expression(&condition.expression)?;
                        result = Operation::extend(result, variable.clone(), expression);
                        variables.push(variable);
                    }
                }
            }
            result = Operation::group(result, variables, bindings.into_aggregates());
        }

        for expression in &having {
            let expression = self.translate_expression(expression)?;
            result = Operation::filter(result, expression);
        }

        if let Some(values) = &query.values {
            let values = self.translate_values(values)?;
            result = Operation::join(vec![result, values]);
        }

        let mut projection = Vec::new();
        if let Some(items) = &selection {
            for item in items {
                if let SelectItem::Expression {
                    expression,
                    variable,
                } = item
                {
                    let expression = self.translate_expression(expression)?;
                    result = Operation::extend(result, variable.clone(), expression);
                }
                projection.push(item.variable().clone());
            }
        } else if matches!(
            query.form,
            QueryForm::Select { .. }
                | QueryForm::Describe {
                    terms: DescribeTarget::Wildcard
                }
        ) {
            projection = select_all_variables(query);
        }

        if !order.is_empty() {
            let expressions = order
                .into_iter()
                .map(|(expression, descending)| -> TranslationResult<_> {
                    let expression = self.translate_expression(&expression)?;
                    Ok(if descending {
                        Expression::operator("desc", vec![expression])
                    } else {
                        expression
                    })
                })
                .collect::<TranslationResult<Vec<_>>>()?;
            result = Operation::order_by(result, expressions);
        }

        result = match &query.form {
            QueryForm::Select { modifier, .. } => {
                let result = Operation::project(result, projection);
                match modifier {
                    Some(SelectModifier::Distinct) => Operation::distinct(result),
                    Some(SelectModifier::Reduced) => Operation::reduced(result),
                    None => result,
                }
            }
            QueryForm::Construct { template } => {
                let template = self.translate_template(template)?;
                Operation::construct(result, template)
            }
            QueryForm::Ask => Operation::ask(result),
            QueryForm::Describe { terms } => {
                let terms = match terms {
                    DescribeTarget::Wildcard => {
                        projection.into_iter().map(Term::Variable).collect()
                    }
                    DescribeTarget::Terms(terms) => terms
                        .iter()
                        .map(|term| self.translate_term(term))
                        .collect::<TranslationResult<Vec<_>>>()?,
                };
                Operation::describe(result, terms)
            }
        };

        let offset = query.modifiers.offset.unwrap_or(0);
        if query.modifiers.limit.is_some() || offset > 0 {
            result = Operation::slice(result, offset, query.modifiers.limit);
        }

        if let Some(dataset) = query.dataset.as_ref().filter(|dataset| !dataset.is_empty()) {
            let default = dataset
                .default
                .iter()
                .map(|iri| self.resolve_iri(iri))
                .collect::<TranslationResult<Vec<_>>>()?;
            let named = dataset
                .named
                .iter()
                .map(|iri| self.resolve_iri(iri))
                .collect::<TranslationResult<Vec<_>>>()?;
            result = Operation::from_dataset(result, default, named);
        }

        Ok(result)
    }

    /// Replaces every aggregate in `expression` by the variable it is bound to. New aggregates are
    /// bound to fresh variables. `EXISTS` patterns are not searched.
    fn extract_aggregates(
        &mut self,
        expression: &ExpressionSyntax,
        bindings: &mut AggregateBindings,
    ) -> TranslationResult<ExpressionSyntax> {
        Ok(match expression {
            ExpressionSyntax::Aggregate { .. } => {
                let variable = match bindings.find(expression) {
                    Some(variable) => variable.clone(),
                    None => {
                        let variable = self.fresh_variable();
                        let aggregate = self.translate_aggregate_expression(expression)?;
                        bindings.entries.push((
                            expression.clone(),
                            BoundAggregate::new(variable.clone(), aggregate),
                        ));
                        variable
                    }
                };
                ExpressionSyntax::from(variable)
            }
            ExpressionSyntax::Operation {
                operator,
                args,
                span,
            } => ExpressionSyntax::Operation {
                operator: operator.clone(),
                args: self.extract_all_aggregates(args, bindings)?,
                span: *span,
            },
            ExpressionSyntax::FunctionCall {
                function,
                args,
                distinct,
                span,
            } => ExpressionSyntax::FunctionCall {
                function: function.clone(),
                args: self.extract_all_aggregates(args, bindings)?,
                distinct: *distinct,
                span: *span,
            },
            ExpressionSyntax::Term(_)
            | ExpressionSyntax::Wildcard
            | ExpressionSyntax::Exists { .. } => expression.clone(),
        })
    }

    fn extract_all_aggregates(
        &mut self,
        args: &[ExpressionSyntax],
        bindings: &mut AggregateBindings,
    ) -> TranslationResult<Vec<ExpressionSyntax>> {
        args.iter()
            .map(|arg| self.extract_aggregates(arg, bindings))
            .collect()
    }
}
