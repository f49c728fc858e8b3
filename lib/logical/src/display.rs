use crate::{
    AggregateExpression, BoundAggregate, Expression, Operation, PathPattern, Pattern,
    PropertyPathSymbol,
};
use itertools::Itertools;
use sparql_algebra_model::Term;
use std::fmt::{Display, Formatter, Write};

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {}", self.subject, self.predicate, self.object)?;
        write_graph(f, &self.graph)?;
        f.write_char(')')
    }
}

impl Display for PathPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {}", self.subject, self.predicate, self.object)?;
        write_graph(f, &self.graph)?;
        f.write_char(')')
    }
}

fn write_graph(f: &mut Formatter<'_>, graph: &Term) -> std::fmt::Result {
    match graph {
        Term::DefaultGraph => Ok(()),
        graph => write!(f, " {graph}"),
    }
}

impl Display for PropertyPathSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyPathSymbol::Alt(input) => write!(f, "({})", input.iter().join(" | ")),
            PropertyPathSymbol::Seq(input) => write!(f, "({})", input.iter().join(" / ")),
            PropertyPathSymbol::Inv(path) => write!(f, "^{path}"),
            PropertyPathSymbol::Link(iri) => write!(f, "{iri}"),
            PropertyPathSymbol::Nps(iris) => write!(f, "!({})", iris.iter().join(" | ")),
            PropertyPathSymbol::OneOrMore(path) => write!(f, "{path}+"),
            PropertyPathSymbol::ZeroOrMore(path) => write!(f, "{path}*"),
            PropertyPathSymbol::ZeroOrOne(path) => write!(f, "{path}?"),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Aggregate(aggregate) => write!(f, "{aggregate}"),
            Expression::Existence { not, input } => {
                let name = if *not { "notexists" } else { "exists" };
                let body = input.to_string();
                write!(f, "{name}({})", body.lines().map(str::trim).join("; "))
            }
            Expression::Named { name, args } => write!(f, "{name}({})", args.iter().join(", ")),
            Expression::Operator { operator, args } => {
                write!(f, "{operator}({})", args.iter().join(", "))
            }
            Expression::Term(term) => write!(f, "{term}"),
            Expression::Wildcard => f.write_char('*'),
        }
    }
}

impl Display for AggregateExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.aggregator)?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write!(f, "{}", self.expression)?;
        if let Some(separator) = &self.separator {
            write!(f, "; separator={separator:?}")?;
        }
        f.write_char(')')
    }
}

impl Display for BoundAggregate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} := {}", self.variable, self.aggregate)
    }
}

/// Renders the operation tree with one node per line. Children are indented by two spaces.
impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_operation(f, self, 0)
    }
}

fn write_operation(f: &mut Formatter<'_>, operation: &Operation, depth: usize) -> std::fmt::Result {
    if depth > 0 {
        f.write_char('\n')?;
    }
    write!(f, "{:indent$}", "", indent = depth * 2)?;

    let children: Vec<&Operation> = match operation {
        Operation::Bgp { patterns } => {
            f.write_str("Bgp")?;
            for pattern in patterns {
                write!(f, "\n{:indent$}Pattern {pattern}", "", indent = (depth + 1) * 2)?;
            }
            vec![]
        }
        Operation::Pattern(pattern) => {
            write!(f, "Pattern {pattern}")?;
            vec![]
        }
        Operation::Path(path) => {
            write!(f, "Path {path}")?;
            vec![]
        }
        Operation::Join { input } => {
            f.write_str("Join")?;
            input.iter().collect()
        }
        Operation::LeftJoin {
            left,
            right,
            expression,
        } => {
            f.write_str("LeftJoin")?;
            if let Some(expression) = expression {
                write!(f, ": {expression}")?;
            }
            vec![&**left, &**right]
        }
        Operation::Minus { left, right } => {
            f.write_str("Minus")?;
            vec![&**left, &**right]
        }
        Operation::Union { input } => {
            f.write_str("Union")?;
            input.iter().collect()
        }
        Operation::Filter { input, expression } => {
            write!(f, "Filter: {expression}")?;
            vec![&**input]
        }
        Operation::Extend {
            input,
            variable,
            expression,
        } => {
            write!(f, "Extend: {variable} := {expression}")?;
            vec![&**input]
        }
        Operation::Graph { input, name } => {
            write!(f, "Graph: {name}")?;
            vec![&**input]
        }
        Operation::Service {
            input,
            name,
            silent,
        } => {
            let silent = if *silent { " SILENT" } else { "" };
            write!(f, "Service{silent}: {name}")?;
            vec![&**input]
        }
        Operation::Group {
            input,
            variables,
            aggregates,
        } => {
            write!(
                f,
                "Group: [{}], [{}]",
                variables.iter().join(", "),
                aggregates.iter().join(", ")
            )?;
            vec![&**input]
        }
        Operation::OrderBy { input, expressions } => {
            write!(f, "OrderBy: {}", expressions.iter().join(", "))?;
            vec![&**input]
        }
        Operation::Project { input, variables } => {
            write!(f, "Project: {}", variables.iter().join(", "))?;
            vec![&**input]
        }
        Operation::Distinct { input } => {
            f.write_str("Distinct")?;
            vec![&**input]
        }
        Operation::Reduced { input } => {
            f.write_str("Reduced")?;
            vec![&**input]
        }
        Operation::Slice {
            input,
            start,
            length,
        } => {
            write!(f, "Slice: start={start}")?;
            if let Some(length) = length {
                write!(f, ", length={length}")?;
            }
            vec![&**input]
        }
        Operation::From {
            input,
            default,
            named,
        } => {
            write!(
                f,
                "From: default=[{}], named=[{}]",
                default.iter().join(", "),
                named.iter().join(", ")
            )?;
            vec![&**input]
        }
        Operation::Values {
            variables,
            bindings,
        } => {
            write!(f, "Values: {}", variables.iter().join(", "))?;
            for row in bindings {
                let row = row.iter().map(|cell| match cell {
                    Some(term) => term.to_string(),
                    None => "UNDEF".to_owned(),
                });
                write!(
                    f,
                    "\n{:indent$}({})",
                    "",
                    row.format(" "),
                    indent = (depth + 1) * 2
                )?;
            }
            vec![]
        }
        Operation::Construct { input, template } => {
            write!(f, "Construct: {}", template.iter().join(", "))?;
            vec![&**input]
        }
        Operation::Describe { input, terms } => {
            write!(f, "Describe: {}", terms.iter().join(", "))?;
            vec![&**input]
        }
        Operation::Ask { input } => {
            f.write_str("Ask")?;
            vec![&**input]
        }
        Operation::Nop => {
            f.write_str("Nop")?;
            vec![]
        }
        Operation::CompositeUpdate { updates } => {
            f.write_str("CompositeUpdate")?;
            updates.iter().collect()
        }
        Operation::DeleteInsert {
            delete,
            insert,
            where_clause,
        } => {
            f.write_str("DeleteInsert")?;
            let indent = (depth + 1) * 2;
            if let Some(delete) = delete {
                write!(f, "\n{:indent$}Delete: {}", "", delete.iter().join(", "))?;
            }
            if let Some(insert) = insert {
                write!(f, "\n{:indent$}Insert: {}", "", insert.iter().join(", "))?;
            }
            where_clause.as_deref().into_iter().collect()
        }
        Operation::Load {
            source,
            destination,
            silent,
        } => {
            write_silent(f, "Load", *silent)?;
            write!(f, "{source}")?;
            if let Some(destination) = destination {
                write!(f, " INTO {destination}")?;
            }
            vec![]
        }
        Operation::Clear { source, silent } => {
            write_silent(f, "Clear", *silent)?;
            write!(f, "{source}")?;
            vec![]
        }
        Operation::Create { source, silent } => {
            write_silent(f, "Create", *silent)?;
            write!(f, "{source}")?;
            vec![]
        }
        Operation::Drop { source, silent } => {
            write_silent(f, "Drop", *silent)?;
            write!(f, "{source}")?;
            vec![]
        }
        Operation::Add {
            source,
            destination,
            silent,
        } => {
            write_silent(f, "Add", *silent)?;
            write!(f, "{source} TO {destination}")?;
            vec![]
        }
        Operation::Move {
            source,
            destination,
            silent,
        } => {
            write_silent(f, "Move", *silent)?;
            write!(f, "{source} TO {destination}")?;
            vec![]
        }
        Operation::Copy {
            source,
            destination,
            silent,
        } => {
            write_silent(f, "Copy", *silent)?;
            write!(f, "{source} TO {destination}")?;
            vec![]
        }
    };

    for child in children {
        write_operation(f, child, depth + 1)?;
    }
    Ok(())
}

fn write_silent(f: &mut Formatter<'_>, name: &str, silent: bool) -> std::fmt::Result {
    if silent {
        write!(f, "{name} SILENT: ")
    } else {
        write!(f, "{name}: ")
    }
}
