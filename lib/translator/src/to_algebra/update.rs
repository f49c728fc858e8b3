use crate::context::TranslationContext;
use crate::{TranslationError, TranslationResult};
use sparql_algebra_logical::{GraphTarget, Operation, Pattern};
use sparql_algebra_model::Term;
use sparql_algebra_syntax::{
    DatasetClause, GraphOrDefault, GraphRefAll, IriRef, PatternSyntax, QuadsBlock, UpdateKind,
    UpdateSyntax,
};

/// The parts of an `INSERT`/`DELETE` operation.
#[derive(Default)]
struct InsertDelete<'s> {
    delete: Option<&'s [QuadsBlock]>,
    insert: Option<&'s [QuadsBlock]>,
    with: Option<&'s IriRef>,
    using: Option<&'s DatasetClause>,
    where_clause: Option<&'s [PatternSyntax]>,
}

impl TranslationContext<'_> {
    /// Translates an update request. A request with a single operation yields that operation,
    /// otherwise the operations are wrapped in a [Operation::CompositeUpdate].
    pub(crate) fn translate_update(
        &mut self,
        update: &UpdateSyntax,
    ) -> TranslationResult<Operation> {
        let mut updates = Vec::with_capacity(update.operations.len());
        for operation in &update.operations {
            self.register_context(&operation.context)?;
            updates.push(self.translate_update_operation(&operation.operation)?);
        }

        if updates.len() > 1 {
            return Ok(Operation::composite_update(updates));
        }
        Ok(updates.pop().unwrap_or(Operation::Nop))
    }

    fn translate_update_operation(&mut self, kind: &UpdateKind) -> TranslationResult<Operation> {
        Ok(match kind {
            UpdateKind::Load {
                silent,
                source,
                destination,
            } => Operation::load(
                self.resolve_iri(source)?,
                destination
                    .as_ref()
                    .map(|destination| self.resolve_iri(destination))
                    .transpose()?,
                *silent,
            ),
            UpdateKind::Clear { silent, graph } => {
                Operation::clear_graph(self.translate_graph_ref(graph)?, *silent)
            }
            UpdateKind::Drop { silent, graph } => {
                Operation::drop_graph(self.translate_graph_ref(graph)?, *silent)
            }
            UpdateKind::Create { silent, graph } => {
                Operation::create_graph(self.resolve_iri(graph)?, *silent)
            }
            UpdateKind::Add {
                silent,
                source,
                destination,
            } => Operation::add_graph(
                self.translate_graph_or_default(source)?,
                self.translate_graph_or_default(destination)?,
                *silent,
            ),
            UpdateKind::Move {
                silent,
                source,
                destination,
            } => Operation::move_graph(
                self.translate_graph_or_default(source)?,
                self.translate_graph_or_default(destination)?,
                *silent,
            ),
            UpdateKind::Copy {
                silent,
                source,
                destination,
            } => Operation::copy_graph(
                self.translate_graph_or_default(source)?,
                self.translate_graph_or_default(destination)?,
                *silent,
            ),
            UpdateKind::InsertData { data } => self.translate_insert_delete(InsertDelete {
                insert: Some(data.as_slice()),
                ..InsertDelete::default()
            })?,
            UpdateKind::DeleteData { data } => self.translate_insert_delete(InsertDelete {
                delete: Some(data.as_slice()),
                ..InsertDelete::default()
            })?,
            UpdateKind::DeleteWhere { pattern } => self.translate_insert_delete(InsertDelete {
                delete: Some(pattern.as_slice()),
                ..InsertDelete::default()
            })?,
            UpdateKind::Modify {
                with,
                delete,
                insert,
                using,
                where_clause,
            } => self.translate_insert_delete(InsertDelete {
                delete: Some(delete.as_slice()),
                insert: Some(insert.as_slice()),
                with: with.as_ref(),
                using: using.as_ref(),
                where_clause: Some(where_clause.as_slice()),
            })?,
        })
    }

    /// Translates the quad templates and the `WHERE` clause of an `INSERT`/`DELETE` operation.
    ///
    /// Triples outside a `GRAPH` block are placed in the `WITH` graph if there is one. The `WHERE`
    /// clause is scoped to the `WITH` graph unless `USING` overrides the dataset.
    fn translate_insert_delete(&mut self, parts: InsertDelete<'_>) -> TranslationResult<Operation> {
        if !self.quads() {
            return Err(TranslationError::QuadsRequired);
        }

        let with = parts
            .with
            .map(|with| self.resolve_iri(with))
            .transpose()?
            .map(Term::NamedNode);

        let delete = self.translate_quads(parts.delete, with.as_ref())?;
        let insert = self.translate_quads(parts.insert, with.as_ref())?;

        let where_clause = match parts.where_clause {
            Some(patterns) => {
                let mut where_clause = self.translate_group(patterns)?;
                match (parts.using.filter(|using| !using.is_empty()), &with) {
                    (Some(using), _) => {
                        let default = using
                            .default
                            .iter()
                            .map(|iri| self.resolve_iri(iri))
                            .collect::<TranslationResult<Vec<_>>>()?;
                        let named = using
                            .named
                            .iter()
                            .map(|iri| self.resolve_iri(iri))
                            .collect::<TranslationResult<Vec<_>>>()?;
                        where_clause = Operation::from_dataset(where_clause, default, named);
                    }
                    (None, Some(with)) => where_clause = self.recurse_graph(where_clause, with)?,
                    (None, None) => {}
                }
                Some(where_clause)
            }
            None => None,
        };

        Ok(Operation::delete_insert(delete, insert, where_clause))
    }

    /// Translates quad blocks. Returns [None] if there are no quads.
    fn translate_quads(
        &mut self,
        blocks: Option<&[QuadsBlock]>,
        with: Option<&Term>,
    ) -> TranslationResult<Option<Vec<Pattern>>> {
        let mut patterns = Vec::new();
        for block in blocks.unwrap_or_default() {
            let (graph, triples) = match block {
                QuadsBlock::Triples(triples) => {
                    (with.cloned().unwrap_or(Term::DefaultGraph), triples)
                }
                QuadsBlock::Graph { name, triples } => (self.translate_term(name)?, triples),
            };
            patterns.extend(
                self.translate_template(triples)?
                    .into_iter()
                    .map(|pattern| pattern.with_graph(graph.clone())),
            );
        }
        Ok((!patterns.is_empty()).then_some(patterns))
    }

    fn translate_graph_ref(&self, graph: &GraphRefAll) -> TranslationResult<GraphTarget> {
        Ok(match graph {
            GraphRefAll::Default => GraphTarget::Default,
            GraphRefAll::Named => GraphTarget::Named,
            GraphRefAll::All => GraphTarget::All,
            GraphRefAll::Graph(iri) => GraphTarget::Graph(self.resolve_iri(iri)?),
        })
    }

    fn translate_graph_or_default(
        &self,
        graph: &GraphOrDefault,
    ) -> TranslationResult<GraphTarget> {
        Ok(match graph {
            GraphOrDefault::Default => GraphTarget::Default,
            GraphOrDefault::Graph(iri) => GraphTarget::Graph(self.resolve_iri(iri)?),
        })
    }
}
