//! Read-only traversal of algebra trees.

use crate::{Expression, Operation, PathPattern, Pattern};

/// Controls whether a walker descends into the children of the current node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recursion {
    /// Continue with the children of the node.
    Continue,
    /// Skip the children of the node and continue with its siblings.
    Jump,
}

/// Callbacks for [walk_operation] and [walk_expression].
///
/// Operations and expressions are visited in pre-order. All callbacks default to doing nothing.
pub trait AlgebraVisitor {
    fn visit_operation(&mut self, _operation: &Operation) -> Recursion {
        Recursion::Continue
    }

    fn visit_expression(&mut self, _expression: &Expression) -> Recursion {
        Recursion::Continue
    }

    /// Called for the patterns of a [Operation::Bgp] and for [Operation::Pattern].
    fn visit_pattern(&mut self, _pattern: &Pattern) {}

    fn visit_path(&mut self, _path: &PathPattern) {}

    /// Called for construct templates and for the delete and insert templates of updates.
    fn visit_template(&mut self, _template: &[Pattern]) {}
}

/// Walks `operation` and all nodes below it, including the operations nested in `EXISTS`
/// expressions.
pub fn walk_operation<V: AlgebraVisitor + ?Sized>(visitor: &mut V, operation: &Operation) {
    if visitor.visit_operation(operation) == Recursion::Jump {
        return;
    }

    match operation {
        Operation::Bgp { patterns } => {
            for pattern in patterns {
                visitor.visit_pattern(pattern);
            }
        }
        Operation::Pattern(pattern) => visitor.visit_pattern(pattern),
        Operation::Path(path) => visitor.visit_path(path),
        Operation::Join { input } | Operation::Union { input } => {
            for child in input {
                walk_operation(visitor, child);
            }
        }
        Operation::CompositeUpdate { updates } => {
            for update in updates {
                walk_operation(visitor, update);
            }
        }
        Operation::LeftJoin {
            left,
            right,
            expression,
        } => {
            walk_operation(visitor, left);
            walk_operation(visitor, right);
            if let Some(expression) = expression {
                walk_expression(visitor, expression);
            }
        }
        Operation::Minus { left, right } => {
            walk_operation(visitor, left);
            walk_operation(visitor, right);
        }
        Operation::Filter { input, expression } | Operation::Extend {
            input, expression, ..
        } => {
            walk_operation(visitor, input);
            walk_expression(visitor, expression);
        }
        Operation::Group {
            input, aggregates, ..
        } => {
            walk_operation(visitor, input);
            for bound in aggregates {
                walk_expression(visitor, &bound.aggregate.expression);
            }
        }
        Operation::OrderBy { input, expressions } => {
            walk_operation(visitor, input);
            for expression in expressions {
                walk_expression(visitor, expression);
            }
        }
        Operation::Construct { input, template } => {
            walk_operation(visitor, input);
            visitor.visit_template(template);
        }
        Operation::Graph { input, .. }
        | Operation::Service { input, .. }
        | Operation::Project { input, .. }
        | Operation::Distinct { input }
        | Operation::Reduced { input }
        | Operation::Slice { input, .. }
        | Operation::From { input, .. }
        | Operation::Describe { input, .. }
        | Operation::Ask { input } => walk_operation(visitor, input),
        Operation::DeleteInsert {
            delete,
            insert,
            where_clause,
        } => {
            if let Some(delete) = delete {
                visitor.visit_template(delete);
            }
            if let Some(insert) = insert {
                visitor.visit_template(insert);
            }
            if let Some(where_clause) = where_clause {
                walk_operation(visitor, where_clause);
            }
        }
        Operation::Values { .. }
        | Operation::Nop
        | Operation::Load { .. }
        | Operation::Clear { .. }
        | Operation::Create { .. }
        | Operation::Drop { .. }
        | Operation::Add { .. }
        | Operation::Move { .. }
        | Operation::Copy { .. } => {}
    }
}

/// Walks `expression` and all nodes below it.
pub fn walk_expression<V: AlgebraVisitor + ?Sized>(visitor: &mut V, expression: &Expression) {
    if visitor.visit_expression(expression) == Recursion::Jump {
        return;
    }

    match expression {
        Expression::Aggregate(aggregate) => walk_expression(visitor, &aggregate.expression),
        Expression::Existence { input, .. } => walk_operation(visitor, input),
        Expression::Named { args, .. } | Expression::Operator { args, .. } => {
            for arg in args {
                walk_expression(visitor, arg);
            }
        }
        Expression::Term(_) | Expression::Wildcard => {}
    }
}
