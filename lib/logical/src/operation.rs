use crate::{BoundAggregate, Expression, PathPattern, Pattern};
use sparql_algebra_model::{NamedNode, Term, Variable};
use std::fmt::{Display, Formatter};

/// A node of the SPARQL algebra.
///
/// The algebra covers both queries and updates. Every node is created by the factory methods on
/// [Operation] (e.g., [Operation::join]), which take care of flattening n-ary operators.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A basic graph pattern.
    Bgp {
        patterns: Vec<Pattern>,
    },
    /// A single triple or quad pattern.
    Pattern(Pattern),
    /// A single pattern with a property path predicate.
    Path(PathPattern),
    Join {
        input: Vec<Operation>,
    },
    LeftJoin {
        left: Box<Operation>,
        right: Box<Operation>,
        expression: Option<Expression>,
    },
    Minus {
        left: Box<Operation>,
        right: Box<Operation>,
    },
    Union {
        input: Vec<Operation>,
    },
    Filter {
        input: Box<Operation>,
        expression: Expression,
    },
    Extend {
        input: Box<Operation>,
        variable: Variable,
        expression: Expression,
    },
    Graph {
        input: Box<Operation>,
        name: Term,
    },
    Service {
        input: Box<Operation>,
        name: Term,
        silent: bool,
    },
    Group {
        input: Box<Operation>,
        variables: Vec<Variable>,
        aggregates: Vec<BoundAggregate>,
    },
    /// Descending conditions are wrapped in a `desc` operator.
    OrderBy {
        input: Box<Operation>,
        expressions: Vec<Expression>,
    },
    Project {
        input: Box<Operation>,
        variables: Vec<Variable>,
    },
    Distinct {
        input: Box<Operation>,
    },
    Reduced {
        input: Box<Operation>,
    },
    Slice {
        input: Box<Operation>,
        start: usize,
        length: Option<usize>,
    },
    From {
        input: Box<Operation>,
        default: Vec<NamedNode>,
        named: Vec<NamedNode>,
    },
    /// Inline data. Each binding row is aligned with `variables`, [None] marks an unbound cell.
    Values {
        variables: Vec<Variable>,
        bindings: Vec<Vec<Option<Term>>>,
    },
    Construct {
        input: Box<Operation>,
        template: Vec<Pattern>,
    },
    Describe {
        input: Box<Operation>,
        terms: Vec<Term>,
    },
    Ask {
        input: Box<Operation>,
    },
    /// An empty update request.
    Nop,
    CompositeUpdate {
        updates: Vec<Operation>,
    },
    /// The generic form of `INSERT DATA`, `DELETE DATA`, `DELETE WHERE`, and `DELETE/INSERT`.
    ///
    /// Which fields are present (and not only whether they are empty) determines the surface form
    /// of the update when the algebra is translated back into syntax.
    DeleteInsert {
        delete: Option<Vec<Pattern>>,
        insert: Option<Vec<Pattern>>,
        where_clause: Option<Box<Operation>>,
    },
    Load {
        source: NamedNode,
        destination: Option<NamedNode>,
        silent: bool,
    },
    Clear {
        source: GraphTarget,
        silent: bool,
    },
    Create {
        source: NamedNode,
        silent: bool,
    },
    Drop {
        source: GraphTarget,
        silent: bool,
    },
    Add {
        source: GraphTarget,
        destination: GraphTarget,
        silent: bool,
    },
    Move {
        source: GraphTarget,
        destination: GraphTarget,
        silent: bool,
    },
    Copy {
        source: GraphTarget,
        destination: GraphTarget,
        silent: bool,
    },
}

/// The graph (or set of graphs) targeted by a graph management update.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphTarget {
    Default,
    Named,
    All,
    Graph(NamedNode),
}

impl Display for GraphTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphTarget::Default => f.write_str("DEFAULT"),
            GraphTarget::Named => f.write_str("NAMED"),
            GraphTarget::All => f.write_str("ALL"),
            GraphTarget::Graph(node) => write!(f, "{node}"),
        }
    }
}

/// The discriminant of an [Operation].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Bgp,
    Pattern,
    Path,
    Join,
    LeftJoin,
    Minus,
    Union,
    Filter,
    Extend,
    Graph,
    Service,
    Group,
    OrderBy,
    Project,
    Distinct,
    Reduced,
    Slice,
    From,
    Values,
    Construct,
    Describe,
    Ask,
    Nop,
    CompositeUpdate,
    DeleteInsert,
    Load,
    Clear,
    Create,
    Drop,
    Add,
    Move,
    Copy,
}

impl OperationKind {
    /// The lower-case type tag of the kind, e.g., `leftjoin`.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Bgp => "bgp",
            OperationKind::Pattern => "pattern",
            OperationKind::Path => "path",
            OperationKind::Join => "join",
            OperationKind::LeftJoin => "leftjoin",
            OperationKind::Minus => "minus",
            OperationKind::Union => "union",
            OperationKind::Filter => "filter",
            OperationKind::Extend => "extend",
            OperationKind::Graph => "graph",
            OperationKind::Service => "service",
            OperationKind::Group => "group",
            OperationKind::OrderBy => "orderby",
            OperationKind::Project => "project",
            OperationKind::Distinct => "distinct",
            OperationKind::Reduced => "reduced",
            OperationKind::Slice => "slice",
            OperationKind::From => "from",
            OperationKind::Values => "values",
            OperationKind::Construct => "construct",
            OperationKind::Describe => "describe",
            OperationKind::Ask => "ask",
            OperationKind::Nop => "nop",
            OperationKind::CompositeUpdate => "compositeupdate",
            OperationKind::DeleteInsert => "deleteinsert",
            OperationKind::Load => "load",
            OperationKind::Clear => "clear",
            OperationKind::Create => "create",
            OperationKind::Drop => "drop",
            OperationKind::Add => "add",
            OperationKind::Move => "move",
            OperationKind::Copy => "copy",
        }
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Bgp { .. } => OperationKind::Bgp,
            Operation::Pattern(_) => OperationKind::Pattern,
            Operation::Path(_) => OperationKind::Path,
            Operation::Join { .. } => OperationKind::Join,
            Operation::LeftJoin { .. } => OperationKind::LeftJoin,
            Operation::Minus { .. } => OperationKind::Minus,
            Operation::Union { .. } => OperationKind::Union,
            Operation::Filter { .. } => OperationKind::Filter,
            Operation::Extend { .. } => OperationKind::Extend,
            Operation::Graph { .. } => OperationKind::Graph,
            Operation::Service { .. } => OperationKind::Service,
            Operation::Group { .. } => OperationKind::Group,
            Operation::OrderBy { .. } => OperationKind::OrderBy,
            Operation::Project { .. } => OperationKind::Project,
            Operation::Distinct { .. } => OperationKind::Distinct,
            Operation::Reduced { .. } => OperationKind::Reduced,
            Operation::Slice { .. } => OperationKind::Slice,
            Operation::From { .. } => OperationKind::From,
            Operation::Values { .. } => OperationKind::Values,
            Operation::Construct { .. } => OperationKind::Construct,
            Operation::Describe { .. } => OperationKind::Describe,
            Operation::Ask { .. } => OperationKind::Ask,
            Operation::Nop => OperationKind::Nop,
            Operation::CompositeUpdate { .. } => OperationKind::CompositeUpdate,
            Operation::DeleteInsert { .. } => OperationKind::DeleteInsert,
            Operation::Load { .. } => OperationKind::Load,
            Operation::Clear { .. } => OperationKind::Clear,
            Operation::Create { .. } => OperationKind::Create,
            Operation::Drop { .. } => OperationKind::Drop,
            Operation::Add { .. } => OperationKind::Add,
            Operation::Move { .. } => OperationKind::Move,
            Operation::Copy { .. } => OperationKind::Copy,
        }
    }

    /// Returns `true` for the operations that make up a SPARQL update request.
    pub fn is_update(&self) -> bool {
        matches!(
            self,
            Operation::Nop
                | Operation::CompositeUpdate { .. }
                | Operation::DeleteInsert { .. }
                | Operation::Load { .. }
                | Operation::Clear { .. }
                | Operation::Create { .. }
                | Operation::Drop { .. }
                | Operation::Add { .. }
                | Operation::Move { .. }
                | Operation::Copy { .. }
        )
    }

    /// Returns `true` if this is an empty basic graph pattern, the identity of a join.
    pub fn is_empty_bgp(&self) -> bool {
        matches!(self, Operation::Bgp { patterns } if patterns.is_empty())
    }
}
