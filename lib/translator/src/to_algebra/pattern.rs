use crate::context::TranslationContext;
use crate::to_algebra::triples::FlatPredicate;
use crate::TranslationResult;
use sparql_algebra_logical::{Expression, Operation, Pattern};
use sparql_algebra_syntax::{PatternSyntax, TermSyntax, TripleSyntax, ValuesClause};
use std::mem::take;

impl TranslationContext<'_> {
    pub(crate) fn translate_graph_pattern(
        &mut self,
        pattern: &PatternSyntax,
    ) -> TranslationResult<Operation> {
        match pattern {
            PatternSyntax::Bgp { triples } => self.translate_bgp(triples),
            PatternSyntax::Group { patterns } => self.translate_group(patterns),
            PatternSyntax::Union { branches } => {
                let input = branches
                    .iter()
                    .map(|branch| self.translate_graph_pattern(branch))
                    .collect::<TranslationResult<Vec<_>>>()?;
                Ok(Operation::union(input))
            }
            PatternSyntax::Graph { name, patterns } => self.translate_named_graph(name, patterns),
            PatternSyntax::Values(values) => self.translate_values(values),
            PatternSyntax::SubSelect(query) => self.translate_query(query),
            PatternSyntax::Optional { .. }
            | PatternSyntax::Minus { .. }
            | PatternSyntax::Service { .. }
            | PatternSyntax::Filter { .. }
            | PatternSyntax::Bind { .. } => self.translate_group(std::slice::from_ref(pattern)),
        }
    }

    /// Translates a group graph pattern.
    ///
    /// All filters of the group are collected, conjoined, and applied to the result of the group
    /// regardless of their position.
    pub(crate) fn translate_group(
        &mut self,
        patterns: &[PatternSyntax],
    ) -> TranslationResult<Operation> {
        let mut filters = Vec::new();
        let mut result = Operation::bgp(Vec::new());
        for pattern in patterns {
            match pattern {
                PatternSyntax::Filter { expression } => filters.push(expression),
                pattern => result = self.accumulate(result, pattern)?,
            }
        }

        let expressions = filters
            .into_iter()
            .map(|expression| self.translate_expression(expression))
            .collect::<TranslationResult<Vec<_>>>()?;
        Ok(match Expression::conjunction(expressions) {
            Some(expression) => Operation::filter(result, expression),
            None => result,
        })
    }

    fn accumulate(
        &mut self,
        group: Operation,
        pattern: &PatternSyntax,
    ) -> TranslationResult<Operation> {
        Ok(match pattern {
            PatternSyntax::Optional { patterns } => match self.translate_group(patterns)? {
                Operation::Filter { input, expression } => {
                    Operation::left_join(group, *input, Some(expression))
                }
                optional => Operation::left_join(group, optional, None),
            },
            PatternSyntax::Minus { patterns } => {
                Operation::minus(group, self.translate_group(patterns)?)
            }
            PatternSyntax::Bind {
                expression,
                variable,
            } => Operation::extend(
                group,
                variable.clone(),
                self.translate_expression(expression)?,
            ),
            PatternSyntax::Service {
                name,
                silent,
                patterns,
            } => {
                let input = self.translate_group(patterns)?;
                let name = self.translate_term(name)?;
                simplified_join(group, Operation::service(input, name, *silent))
            }
            pattern => simplified_join(group, self.translate_graph_pattern(pattern)?),
        })
    }

    /// Translates the triples of a basic graph pattern. Property paths that cannot be reduced to
    /// patterns split the BGP into a join.
    fn translate_bgp(&mut self, triples: &[TripleSyntax]) -> TranslationResult<Operation> {
        let mut patterns = Vec::new();
        let mut joins = Vec::new();
        for triple in self.flatten_triples(triples)? {
            match triple.predicate {
                FlatPredicate::Term(predicate) => {
                    patterns.push(Pattern::triple(triple.subject, predicate, triple.object));
                }
                FlatPredicate::Path(path) => {
                    for operation in self.simplify_path(triple.subject, path, triple.object) {
                        match operation {
                            Operation::Pattern(pattern) => patterns.push(pattern),
                            operation => {
                                if !patterns.is_empty() {
                                    joins.push(Operation::bgp(take(&mut patterns)));
                                }
                                joins.push(operation);
                            }
                        }
                    }
                }
            }
        }
        if !patterns.is_empty() {
            joins.push(Operation::bgp(patterns));
        }

        if joins.len() > 1 {
            return Ok(Operation::join(joins));
        }
        Ok(joins.pop().unwrap_or_else(|| Operation::bgp(Vec::new())))
    }

    fn translate_named_graph(
        &mut self,
        name: &TermSyntax,
        patterns: &[PatternSyntax],
    ) -> TranslationResult<Operation> {
        let input = self.translate_group(patterns)?;
        let name = self.translate_term(name)?;
        if self.quads() {
            self.recurse_graph(input, &name)
        } else {
            Ok(Operation::graph(input, name))
        }
    }

    pub(super) fn translate_values(
        &mut self,
        values: &ValuesClause,
    ) -> TranslationResult<Operation> {
        let bindings = values
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map(|term| self.translate_term(term)).transpose())
                    .collect::<TranslationResult<Vec<_>>>()
            })
            .collect::<TranslationResult<Vec<_>>>()?;
        Ok(Operation::values(values.variables.clone(), bindings))
    }
}

/// Joins `group` with `operation`. Adjacent BGPs are merged and empty BGPs are dropped.
fn simplified_join(group: Operation, operation: Operation) -> Operation {
    match (group, operation) {
        (Operation::Bgp { patterns: mut left }, Operation::Bgp { patterns: right }) => {
            left.extend(right);
            Operation::bgp(left)
        }
        (group, operation) if group.is_empty_bgp() => operation,
        (group, operation) if operation.is_empty_bgp() => group,
        (group, operation) => Operation::join(vec![group, operation]),
    }
}
