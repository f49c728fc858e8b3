use crate::{
    BoundAggregate, Expression, GraphTarget, Operation, PathPattern, Pattern, PropertyPathSymbol,
};
use sparql_algebra_model::{NamedNode, Term, Variable};

impl Operation {
    pub fn bgp(patterns: Vec<Pattern>) -> Self {
        Operation::Bgp { patterns }
    }

    pub fn pattern(pattern: Pattern) -> Self {
        Operation::Pattern(pattern)
    }

    pub fn path(path: PathPattern) -> Self {
        Operation::Path(path)
    }

    /// Creates a join. Inputs that are joins themselves are spliced into the new join.
    pub fn join(input: Vec<Operation>) -> Self {
        Operation::Join {
            input: flatten(input, |operation| match operation {
                Operation::Join { input } => Ok(input),
                other => Err(other),
            }),
        }
    }

    /// Creates a union. Inputs that are unions themselves are spliced into the new union.
    pub fn union(input: Vec<Operation>) -> Self {
        Operation::Union {
            input: flatten(input, |operation| match operation {
                Operation::Union { input } => Ok(input),
                other => Err(other),
            }),
        }
    }

    pub fn left_join(left: Operation, right: Operation, expression: Option<Expression>) -> Self {
        Operation::LeftJoin {
            left: Box::new(left),
            right: Box::new(right),
            expression,
        }
    }

    pub fn minus(left: Operation, right: Operation) -> Self {
        Operation::Minus {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn filter(input: Operation, expression: Expression) -> Self {
        Operation::Filter {
            input: Box::new(input),
            expression,
        }
    }

    pub fn extend(input: Operation, variable: Variable, expression: Expression) -> Self {
        Operation::Extend {
            input: Box::new(input),
            variable,
            expression,
        }
    }

    pub fn graph(input: Operation, name: Term) -> Self {
        Operation::Graph {
            input: Box::new(input),
            name,
        }
    }

    pub fn service(input: Operation, name: Term, silent: bool) -> Self {
        Operation::Service {
            input: Box::new(input),
            name,
            silent,
        }
    }

    pub fn group(
        input: Operation,
        variables: Vec<Variable>,
        aggregates: Vec<BoundAggregate>,
    ) -> Self {
        Operation::Group {
            input: Box::new(input),
            variables,
            aggregates,
        }
    }

    pub fn order_by(input: Operation, expressions: Vec<Expression>) -> Self {
        Operation::OrderBy {
            input: Box::new(input),
            expressions,
        }
    }

    pub fn project(input: Operation, variables: Vec<Variable>) -> Self {
        Operation::Project {
            input: Box::new(input),
            variables,
        }
    }

    pub fn distinct(input: Operation) -> Self {
        Operation::Distinct {
            input: Box::new(input),
        }
    }

    pub fn reduced(input: Operation) -> Self {
        Operation::Reduced {
            input: Box::new(input),
        }
    }

    pub fn slice(input: Operation, start: usize, length: Option<usize>) -> Self {
        Operation::Slice {
            input: Box::new(input),
            start,
            length,
        }
    }

    pub fn from_dataset(input: Operation, default: Vec<NamedNode>, named: Vec<NamedNode>) -> Self {
        Operation::From {
            input: Box::new(input),
            default,
            named,
        }
    }

    pub fn values(variables: Vec<Variable>, bindings: Vec<Vec<Option<Term>>>) -> Self {
        Operation::Values {
            variables,
            bindings,
        }
    }

    pub fn construct(input: Operation, template: Vec<Pattern>) -> Self {
        Operation::Construct {
            input: Box::new(input),
            template,
        }
    }

    pub fn describe(input: Operation, terms: Vec<Term>) -> Self {
        Operation::Describe {
            input: Box::new(input),
            terms,
        }
    }

    pub fn ask(input: Operation) -> Self {
        Operation::Ask {
            input: Box::new(input),
        }
    }

    pub fn composite_update(updates: Vec<Operation>) -> Self {
        Operation::CompositeUpdate { updates }
    }

    pub fn delete_insert(
        delete: Option<Vec<Pattern>>,
        insert: Option<Vec<Pattern>>,
        where_clause: Option<Operation>,
    ) -> Self {
        Operation::DeleteInsert {
            delete,
            insert,
            where_clause: where_clause.map(Box::new),
        }
    }

    pub fn load(source: NamedNode, destination: Option<NamedNode>, silent: bool) -> Self {
        Operation::Load {
            source,
            destination,
            silent,
        }
    }

    pub fn clear_graph(source: GraphTarget, silent: bool) -> Self {
        Operation::Clear { source, silent }
    }

    pub fn create_graph(source: NamedNode, silent: bool) -> Self {
        Operation::Create { source, silent }
    }

    pub fn drop_graph(source: GraphTarget, silent: bool) -> Self {
        Operation::Drop { source, silent }
    }

    pub fn add_graph(source: GraphTarget, destination: GraphTarget, silent: bool) -> Self {
        Operation::Add {
            source,
            destination,
            silent,
        }
    }

    pub fn move_graph(source: GraphTarget, destination: GraphTarget, silent: bool) -> Self {
        Operation::Move {
            source,
            destination,
            silent,
        }
    }

    pub fn copy_graph(source: GraphTarget, destination: GraphTarget, silent: bool) -> Self {
        Operation::Copy {
            source,
            destination,
            silent,
        }
    }
}

impl PropertyPathSymbol {
    /// Creates an alternative. Inputs that are alternatives themselves are spliced into the new
    /// alternative.
    pub fn alt(input: Vec<PropertyPathSymbol>) -> Self {
        PropertyPathSymbol::Alt(flatten(input, |symbol| match symbol {
            PropertyPathSymbol::Alt(input) => Ok(input),
            other => Err(other),
        }))
    }

    /// Creates a sequence. Inputs that are sequences themselves are spliced into the new sequence.
    pub fn seq(input: Vec<PropertyPathSymbol>) -> Self {
        PropertyPathSymbol::Seq(flatten(input, |symbol| match symbol {
            PropertyPathSymbol::Seq(input) => Ok(input),
            other => Err(other),
        }))
    }

    pub fn inv(path: PropertyPathSymbol) -> Self {
        PropertyPathSymbol::Inv(Box::new(path))
    }

    pub fn link(iri: NamedNode) -> Self {
        PropertyPathSymbol::Link(iri)
    }

    pub fn nps(iris: Vec<NamedNode>) -> Self {
        PropertyPathSymbol::Nps(iris)
    }

    pub fn one_or_more(path: PropertyPathSymbol) -> Self {
        PropertyPathSymbol::OneOrMore(Box::new(path))
    }

    pub fn zero_or_more(path: PropertyPathSymbol) -> Self {
        PropertyPathSymbol::ZeroOrMore(Box::new(path))
    }

    pub fn zero_or_one(path: PropertyPathSymbol) -> Self {
        PropertyPathSymbol::ZeroOrOne(Box::new(path))
    }
}

/// Splices the children of the elements for which `split` returns [Ok] into the result. Only a
/// single level is flattened.
fn flatten<T>(input: Vec<T>, split: impl Fn(T) -> Result<Vec<T>, T>) -> Vec<T> {
    let mut result = Vec::with_capacity(input.len());
    for element in input {
        match split(element) {
            Ok(children) => result.extend(children),
            Err(element) => result.push(element),
        }
    }
    result
}
