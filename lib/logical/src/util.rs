use crate::visit::{walk_operation, AlgebraVisitor, Recursion};
use crate::{Expression, Operation, PathPattern, Pattern};
use rustc_hash::FxHashSet;
use sparql_algebra_model::{Term, Variable};

/// Returns the variables that are in scope after evaluating `operation`, sorted by name.
///
/// A projection only exposes its projected variables, variables of the projected sub-tree are not
/// in scope. Variables that only occur in expressions are not bound by the operation and are not
/// part of the result.
pub fn in_scope_variables(operation: &Operation) -> Vec<Variable> {
    let mut collector = InScopeVariables::default();
    walk_operation(&mut collector, operation);

    let mut variables: Vec<_> = collector.variables.into_iter().collect();
    variables.sort_by(|lhs, rhs| lhs.as_str().cmp(rhs.as_str()));
    variables
}

#[derive(Default)]
struct InScopeVariables {
    variables: FxHashSet<Variable>,
}

impl InScopeVariables {
    fn add_term(&mut self, term: &Term) {
        if let Term::Variable(variable) = term {
            self.variables.insert(variable.clone());
        }
    }
}

impl AlgebraVisitor for InScopeVariables {
    fn visit_operation(&mut self, operation: &Operation) -> Recursion {
        match operation {
            Operation::Project { variables, .. } => {
                self.variables.extend(variables.iter().cloned());
                return Recursion::Jump;
            }
            Operation::Extend { variable, .. } => {
                self.variables.insert(variable.clone());
            }
            Operation::Group {
                variables,
                aggregates,
                ..
            } => {
                self.variables.extend(variables.iter().cloned());
                self.variables
                    .extend(aggregates.iter().map(|bound| bound.variable.clone()));
            }
            Operation::Values { variables, .. } => {
                self.variables.extend(variables.iter().cloned());
            }
            Operation::Graph { name, .. } | Operation::Service { name, .. } => {
                self.add_term(name);
            }
            _ => {}
        }
        Recursion::Continue
    }

    fn visit_expression(&mut self, _expression: &Expression) -> Recursion {
        Recursion::Jump
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        for term in pattern.terms() {
            self.add_term(term);
        }
    }

    fn visit_path(&mut self, path: &PathPattern) {
        self.add_term(&path.subject);
        self.add_term(&path.object);
        self.add_term(&path.graph);
    }
}

/// Creates a variable named `label` that is not contained in `taken`. If `label` is taken, the
/// smallest counter that makes it unique is appended (`label0`, `label1`, ...).
pub fn create_unique_variable(label: &str, taken: &FxHashSet<String>) -> Variable {
    if !taken.contains(label) {
        return Variable::new_unchecked(label);
    }

    let mut counter = 0_usize;
    loop {
        let candidate = format!("{label}{counter}");
        if !taken.contains(&candidate) {
            return Variable::new_unchecked(candidate);
        }
        counter += 1;
    }
}
