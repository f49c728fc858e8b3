use crate::context::TranslationContext;
use crate::{TranslationError, TranslationResult};
use sparql_algebra_logical::{AggregateExpression, Expression};
use sparql_algebra_syntax::ExpressionSyntax;

impl TranslationContext<'_> {
    pub(crate) fn translate_expression(
        &mut self,
        expression: &ExpressionSyntax,
    ) -> TranslationResult<Expression> {
        Ok(match expression {
            ExpressionSyntax::Term(term) => Expression::Term(self.translate_term(term)?),
            ExpressionSyntax::Wildcard => Expression::Wildcard,
            ExpressionSyntax::Operation { operator, args, .. } => {
                Expression::operator(operator.to_ascii_lowercase(), self.translate_args(args)?)
            }
            ExpressionSyntax::FunctionCall {
                function,
                args,
                distinct,
                ..
            } => {
                if *distinct {
                    return Err(TranslationError::DistinctOutsideAggregate(
                        function.to_string(),
                    ));
                }
                let name = self.resolve_iri(function)?;
                Expression::named(name, self.translate_args(args)?)
            }
            ExpressionSyntax::Aggregate { .. } => {
                Expression::Aggregate(self.translate_aggregate_expression(expression)?)
            }
            ExpressionSyntax::Exists { not, patterns } => {
                Expression::existence(*not, self.translate_group(patterns)?)
            }
        })
    }

    /// Translates an [ExpressionSyntax::Aggregate]. Other expressions are an internal error.
    pub(crate) fn translate_aggregate_expression(
        &mut self,
        expression: &ExpressionSyntax,
    ) -> TranslationResult<AggregateExpression> {
        let ExpressionSyntax::Aggregate {
            aggregation,
            distinct,
            expression,
            separator,
            ..
        } = expression
        else {
            return Err(TranslationError::Internal(
                "Expected an aggregate expression".to_owned(),
            ));
        };

        let inner = self.translate_expression(expression)?;
        Ok(AggregateExpression::new(*aggregation, *distinct, inner)
            .with_separator(separator.clone()))
    }

    fn translate_args(&mut self, args: &[ExpressionSyntax]) -> TranslationResult<Vec<Expression>> {
        args.iter()
            .map(|arg| self.translate_expression(arg))
            .collect()
    }
}
