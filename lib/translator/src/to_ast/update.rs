use crate::to_ast::quads::remove_quads;
use crate::to_ast::term::{iri_to_syntax, pattern_to_triple, term_to_syntax};
use crate::to_ast::{unwrap_group, AstTranslator, QueryState};
use crate::{TranslationError, TranslationResult};
use sparql_algebra_logical::{is_isomorphic, GraphTarget, Operation, Pattern};
use sparql_algebra_model::Term;
use sparql_algebra_syntax::{
    DatasetClause, GraphOrDefault, GraphRefAll, PatternSyntax, QuadsBlock, UpdateKind,
    UpdateOperationSyntax, UpdateSyntax,
};
use tracing::debug;

impl AstTranslator {
    pub(super) fn translate_update(
        &mut self,
        operation: &Operation,
    ) -> TranslationResult<UpdateSyntax> {
        let mut update = UpdateSyntax::default();
        self.collect_update_operations(operation, &mut update.operations)?;
        Ok(update)
    }

    fn collect_update_operations(
        &mut self,
        operation: &Operation,
        operations: &mut Vec<UpdateOperationSyntax>,
    ) -> TranslationResult<()> {
        match operation {
            Operation::CompositeUpdate { updates } => {
                for update in updates {
                    self.collect_update_operations(update, operations)?;
                }
            }
            Operation::Nop => {}
            operation => operations.push(UpdateOperationSyntax::new(
                self.translate_update_operation(operation)?,
            )),
        }
        Ok(())
    }

    fn translate_update_operation(
        &mut self,
        operation: &Operation,
    ) -> TranslationResult<UpdateKind> {
        Ok(match operation {
            Operation::DeleteInsert {
                delete,
                insert,
                where_clause,
            } => self.translate_delete_insert(
                delete.as_deref(),
                insert.as_deref(),
                where_clause.as_deref(),
            )?,
            Operation::Load {
                source,
                destination,
                silent,
            } => UpdateKind::Load {
                silent: *silent,
                source: iri_to_syntax(source),
                destination: destination.as_ref().map(iri_to_syntax),
            },
            Operation::Clear { source, silent } => UpdateKind::Clear {
                silent: *silent,
                graph: graph_ref_all(source),
            },
            Operation::Create { source, silent } => UpdateKind::Create {
                silent: *silent,
                graph: iri_to_syntax(source),
            },
            Operation::Drop { source, silent } => UpdateKind::Drop {
                silent: *silent,
                graph: graph_ref_all(source),
            },
            Operation::Add {
                source,
                destination,
                silent,
            } => UpdateKind::Add {
                silent: *silent,
                source: graph_or_default(source)?,
                destination: graph_or_default(destination)?,
            },
            Operation::Move {
                source,
                destination,
                silent,
            } => UpdateKind::Move {
                silent: *silent,
                source: graph_or_default(source)?,
                destination: graph_or_default(destination)?,
            },
            Operation::Copy {
                source,
                destination,
                silent,
            } => UpdateKind::Copy {
                silent: *silent,
                source: graph_or_default(source)?,
                destination: graph_or_default(destination)?,
            },
            operation => {
                return Err(TranslationError::Internal(format!(
                    "{} is not an update operation",
                    operation.kind()
                )))
            }
        })
    }

    /// Chooses the most specific update form for a [Operation::DeleteInsert].
    ///
    /// Without a `WHERE` clause the operation is `INSERT DATA`, `DELETE DATA`, or, if the delete
    /// template has variables, `DELETE WHERE`. A `WHERE` clause that is a BGP isomorphic to the
    /// delete template is also written as `DELETE WHERE`.
    fn translate_delete_insert(
        &mut self,
        delete: Option<&[Pattern]>,
        insert: Option<&[Pattern]>,
        where_clause: Option<&Operation>,
    ) -> TranslationResult<UpdateKind> {
        let kind = match (delete, insert, where_clause) {
            (None, insert, None) => UpdateKind::InsertData {
                data: quads_to_blocks(insert.unwrap_or_default())?,
            },
            (Some(delete), None, None) if delete.iter().all(Pattern::is_ground) => {
                UpdateKind::DeleteData {
                    data: quads_to_blocks(delete)?,
                }
            }
            (Some(delete), None, None) => UpdateKind::DeleteWhere {
                pattern: quads_to_blocks(delete)?,
            },
            (Some(delete), None, Some(Operation::Bgp { patterns }))
                if is_isomorphic(delete, patterns) =>
            {
                UpdateKind::DeleteWhere {
                    pattern: quads_to_blocks(delete)?,
                }
            }
            (delete, insert, where_clause) => {
                let (where_clause, using) = match where_clause {
                    Some(Operation::From {
                        input,
                        default,
                        named,
                    }) => (
                        Some(&**input),
                        Some(DatasetClause {
                            default: default.iter().map(iri_to_syntax).collect(),
                            named: named.iter().map(iri_to_syntax).collect(),
                        }),
                    ),
                    where_clause => (where_clause, None),
                };
                let where_clause = match where_clause {
                    Some(where_clause) => self.translate_update_where(where_clause)?,
                    None => Vec::new(),
                };
                UpdateKind::Modify {
                    with: None,
                    delete: quads_to_blocks(delete.unwrap_or_default())?,
                    insert: quads_to_blocks(insert.unwrap_or_default())?,
                    using,
                    where_clause,
                }
            }
        };

        debug!(kind = update_kind_name(&kind), "Translated DELETE/INSERT");
        Ok(kind)
    }

    fn translate_update_where(
        &mut self,
        where_clause: &Operation,
    ) -> TranslationResult<Vec<PatternSyntax>> {
        let where_clause = remove_quads(where_clause.clone())?;
        self.state = QueryState::default();
        Ok(unwrap_group(self.translate_operation(&where_clause)?))
    }
}

/// Groups quads by graph. Blocks keep the order of the first quad of their graph.
fn quads_to_blocks(quads: &[Pattern]) -> TranslationResult<Vec<QuadsBlock>> {
    let mut blocks: Vec<(&Term, Vec<_>)> = Vec::new();
    for quad in quads {
        let triple = pattern_to_triple(quad)?;
        match blocks.iter_mut().find(|(graph, _)| **graph == quad.graph) {
            Some((_, triples)) => triples.push(triple),
            None => blocks.push((&quad.graph, vec![triple])),
        }
    }

    blocks
        .into_iter()
        .map(|(graph, triples)| -> TranslationResult<_> {
            Ok(match graph {
                Term::DefaultGraph => QuadsBlock::Triples(triples),
                graph => QuadsBlock::Graph {
                    name: term_to_syntax(graph)?,
                    triples,
                },
            })
        })
        .collect()
}

fn graph_ref_all(target: &GraphTarget) -> GraphRefAll {
    match target {
        GraphTarget::Default => GraphRefAll::Default,
        GraphTarget::Named => GraphRefAll::Named,
        GraphTarget::All => GraphRefAll::All,
        GraphTarget::Graph(iri) => GraphRefAll::Graph(iri_to_syntax(iri)),
    }
}

fn graph_or_default(target: &GraphTarget) -> TranslationResult<GraphOrDefault> {
    match target {
        GraphTarget::Default => Ok(GraphOrDefault::Default),
        GraphTarget::Graph(iri) => Ok(GraphOrDefault::Graph(iri_to_syntax(iri))),
        GraphTarget::Named | GraphTarget::All => Err(TranslationError::Internal(format!(
            "{target} cannot be the source or destination of ADD, MOVE, or COPY"
        ))),
    }
}

fn update_kind_name(kind: &UpdateKind) -> &'static str {
    match kind {
        UpdateKind::InsertData { .. } => "INSERT DATA",
        UpdateKind::DeleteData { .. } => "DELETE DATA",
        UpdateKind::DeleteWhere { .. } => "DELETE WHERE",
        UpdateKind::Modify { .. } => "DELETE/INSERT",
        UpdateKind::Load { .. } => "LOAD",
        UpdateKind::Clear { .. } => "CLEAR",
        UpdateKind::Drop { .. } => "DROP",
        UpdateKind::Create { .. } => "CREATE",
        UpdateKind::Add { .. } => "ADD",
        UpdateKind::Move { .. } => "MOVE",
        UpdateKind::Copy { .. } => "COPY",
    }
}
