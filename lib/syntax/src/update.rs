use crate::{ContextDefinition, DatasetClause, IriRef, PatternSyntax, TermSyntax, TripleSyntax};

/// A SPARQL update request, a sequence of operations separated by `;`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UpdateSyntax {
    pub operations: Vec<UpdateOperationSyntax>,
}

/// A single update operation together with the prologue that precedes it.
///
/// Prologue declarations stay in effect for the following operations of the same request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UpdateOperationSyntax {
    pub context: Vec<ContextDefinition>,
    pub operation: UpdateKind,
}

impl UpdateOperationSyntax {
    pub fn new(operation: UpdateKind) -> Self {
        Self {
            context: Vec::new(),
            operation,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    Load {
        silent: bool,
        source: IriRef,
        destination: Option<IriRef>,
    },
    Clear {
        silent: bool,
        graph: GraphRefAll,
    },
    Drop {
        silent: bool,
        graph: GraphRefAll,
    },
    Create {
        silent: bool,
        graph: IriRef,
    },
    Add {
        silent: bool,
        source: GraphOrDefault,
        destination: GraphOrDefault,
    },
    Move {
        silent: bool,
        source: GraphOrDefault,
        destination: GraphOrDefault,
    },
    Copy {
        silent: bool,
        source: GraphOrDefault,
        destination: GraphOrDefault,
    },
    InsertData {
        data: Vec<QuadsBlock>,
    },
    DeleteData {
        data: Vec<QuadsBlock>,
    },
    DeleteWhere {
        pattern: Vec<QuadsBlock>,
    },
    /// `WITH? (DELETE {...})? (INSERT {...})? USING* WHERE {...}`
    Modify {
        with: Option<IriRef>,
        delete: Vec<QuadsBlock>,
        insert: Vec<QuadsBlock>,
        using: Option<DatasetClause>,
        where_clause: Vec<PatternSyntax>,
    },
}

/// The target of `CLEAR` and `DROP`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphRefAll {
    Default,
    Named,
    All,
    Graph(IriRef),
}

/// The source or destination of `ADD`, `MOVE`, and `COPY`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphOrDefault {
    Default,
    Graph(IriRef),
}

/// A block of triples in a quad template, optionally inside `GRAPH name { ... }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QuadsBlock {
    Triples(Vec<TripleSyntax>),
    Graph {
        name: TermSyntax,
        triples: Vec<TripleSyntax>,
    },
}
