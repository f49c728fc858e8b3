//! Scans of the syntax tree that run before the translation.

use rustc_hash::FxHashSet;
use sparql_algebra_model::Variable;
use sparql_algebra_syntax::{
    DescribeTarget, ExpressionSyntax, GraphNode, PatternSyntax, Predicate, QueryForm, QuadsBlock,
    QuerySyntax, SelectItem, Selection, TermSyntax, TripleSyntax, UpdateKind, UpdateSyntax,
};

/// Collects the names of all variables that occur anywhere in `query`. Fresh variables must not
/// collide with any of them.
pub(super) fn collect_query_variables(query: &QuerySyntax, names: &mut FxHashSet<String>) {
    let mut collector = VariableCollector { names };
    collector.query(query);
}

pub(super) fn collect_update_variables(update: &UpdateSyntax, names: &mut FxHashSet<String>) {
    let mut collector = VariableCollector { names };
    for operation in &update.operations {
        match &operation.operation {
            UpdateKind::InsertData { data }
            | UpdateKind::DeleteData { data }
            | UpdateKind::DeleteWhere { pattern: data } => collector.quads(data),
            UpdateKind::Modify {
                delete,
                insert,
                where_clause,
                ..
            } => {
                collector.quads(delete);
                collector.quads(insert);
                collector.patterns(where_clause);
            }
            UpdateKind::Load { .. }
            | UpdateKind::Clear { .. }
            | UpdateKind::Drop { .. }
            | UpdateKind::Create { .. }
            | UpdateKind::Add { .. }
            | UpdateKind::Move { .. }
            | UpdateKind::Copy { .. } => {}
        }
    }
}

struct VariableCollector<'a> {
    names: &'a mut FxHashSet<String>,
}

impl VariableCollector<'_> {
    fn variable(&mut self, variable: &Variable) {
        self.names.insert(variable.as_str().to_owned());
    }

    fn term(&mut self, term: &TermSyntax) {
        if let TermSyntax::Variable(variable) = term {
            self.variable(variable);
        }
    }

    fn query(&mut self, query: &QuerySyntax) {
        match &query.form {
            QueryForm::Select {
                selection: Selection::Items(items),
                ..
            } => {
                for item in items {
                    if let SelectItem::Expression { expression, .. } = item {
                        self.expression(expression);
                    }
                    self.variable(item.variable());
                }
            }
            QueryForm::Construct { template } => self.triples(template),
            QueryForm::Describe {
                terms: DescribeTarget::Terms(terms),
            } => terms.iter().for_each(|term| self.term(term)),
            QueryForm::Select { .. } | QueryForm::Ask | QueryForm::Describe { .. } => {}
        }

        self.patterns(&query.where_clause);

        let modifiers = &query.modifiers;
        for condition in &modifiers.group {
            self.expression(&condition.expression);
            if let Some(variable) = &condition.variable {
                self.variable(variable);
            }
        }
        modifiers
            .having
            .iter()
            .for_each(|expression| self.expression(expression));
        modifiers
            .order
            .iter()
            .for_each(|condition| self.expression(&condition.expression));

        if let Some(values) = &query.values {
            values.variables.iter().for_each(|v| self.variable(v));
        }
    }

    fn patterns(&mut self, patterns: &[PatternSyntax]) {
        for pattern in patterns {
            self.pattern(pattern);
        }
    }

    fn pattern(&mut self, pattern: &PatternSyntax) {
        match pattern {
            PatternSyntax::Bgp { triples } => self.triples(triples),
            PatternSyntax::Group { patterns }
            | PatternSyntax::Optional { patterns }
            | PatternSyntax::Minus { patterns }
            | PatternSyntax::Union { branches: patterns } => self.patterns(patterns),
            PatternSyntax::Graph { name, patterns }
            | PatternSyntax::Service { name, patterns, .. } => {
                self.term(name);
                self.patterns(patterns);
            }
            PatternSyntax::Filter { expression } => self.expression(expression),
            PatternSyntax::Bind {
                expression,
                variable,
            } => {
                self.expression(expression);
                self.variable(variable);
            }
            PatternSyntax::Values(values) => {
                values.variables.iter().for_each(|v| self.variable(v));
            }
            PatternSyntax::SubSelect(query) => self.query(query),
        }
    }

    fn quads(&mut self, blocks: &[QuadsBlock]) {
        for block in blocks {
            match block {
                QuadsBlock::Triples(triples) => self.triples(triples),
                QuadsBlock::Graph { name, triples } => {
                    self.term(name);
                    self.triples(triples);
                }
            }
        }
    }

    fn triples(&mut self, triples: &[TripleSyntax]) {
        for triple in triples {
            self.graph_node(&triple.subject);
            self.predicate(&triple.predicate);
            self.graph_node(&triple.object);
        }
    }

    fn predicate(&mut self, predicate: &Predicate) {
        if let Predicate::Term(term) = predicate {
            self.term(term);
        }
    }

    fn graph_node(&mut self, node: &GraphNode) {
        match node {
            GraphNode::Term(term) => self.term(term),
            GraphNode::Collection(items) => items.iter().for_each(|item| self.graph_node(item)),
            GraphNode::BlankNodePropertyList(items) => {
                for item in items {
                    self.predicate(&item.predicate);
                    item.objects.iter().for_each(|object| self.graph_node(object));
                }
            }
        }
    }

    fn expression(&mut self, expression: &ExpressionSyntax) {
        match expression {
            ExpressionSyntax::Term(term) => self.term(term),
            ExpressionSyntax::Wildcard => {}
            ExpressionSyntax::Operation { args, .. }
            | ExpressionSyntax::FunctionCall { args, .. } => {
                args.iter().for_each(|arg| self.expression(arg));
            }
            ExpressionSyntax::Aggregate { expression, .. } => self.expression(expression),
            ExpressionSyntax::Exists { patterns, .. } => self.patterns(patterns),
        }
    }
}

/// Returns the variables that `SELECT *` projects, sorted by name.
///
/// Variables that only occur in `FILTER` or `MINUS` are not in scope. Sub-selects contribute
/// their projection.
pub(super) fn select_all_variables(query: &QuerySyntax) -> Vec<Variable> {
    let mut variables = FxHashSet::default();
    in_scope_patterns(&query.where_clause, &mut variables);
    if let Some(values) = &query.values {
        variables.extend(values.variables.iter().cloned());
    }

    let mut variables = variables.into_iter().collect::<Vec<_>>();
    variables.sort_by(|lhs, rhs| lhs.as_str().cmp(rhs.as_str()));
    variables
}

fn in_scope_patterns(patterns: &[PatternSyntax], variables: &mut FxHashSet<Variable>) {
    for pattern in patterns {
        in_scope_pattern(pattern, variables);
    }
}

fn in_scope_pattern(pattern: &PatternSyntax, variables: &mut FxHashSet<Variable>) {
    match pattern {
        PatternSyntax::Bgp { triples } => {
            let mut names = FxHashSet::default();
            VariableCollector { names: &mut names }.triples(triples);
            variables.extend(names.into_iter().map(Variable::new_unchecked));
        }
        PatternSyntax::Group { patterns }
        | PatternSyntax::Optional { patterns }
        | PatternSyntax::Union { branches: patterns } => in_scope_patterns(patterns, variables),
        PatternSyntax::Graph { name, patterns } | PatternSyntax::Service { name, patterns, .. } => {
            if let TermSyntax::Variable(variable) = name {
                variables.insert(variable.clone());
            }
            in_scope_patterns(patterns, variables);
        }
        PatternSyntax::Bind { variable, .. } => {
            variables.insert(variable.clone());
        }
        PatternSyntax::Values(values) => variables.extend(values.variables.iter().cloned()),
        PatternSyntax::SubSelect(query) => match &query.form {
            QueryForm::Select {
                selection: Selection::Items(items),
                ..
            } => variables.extend(items.iter().map(|item| item.variable().clone())),
            _ => variables.extend(select_all_variables(query)),
        },
        PatternSyntax::Minus { .. } | PatternSyntax::Filter { .. } => {}
    }
}
