//! Translation of syntax trees into the algebra.
//!
//! The translation of graph patterns follows section 18.2 of the SPARQL 1.1 recommendation:
//! groups are folded into joins, left joins, and extensions, filters are moved to the end of their
//! group, and aggregates are lifted into a single [Group](Operation::Group) node.

mod aggregate;
mod blank;
mod expression;
mod graph;
mod path;
mod pattern;
mod scan;
mod term;
mod triples;
mod update;

use crate::context::TranslationContext;
use crate::{TranslationOptions, TranslationResult};
use rustc_hash::FxHashSet;
use sparql_algebra_logical::Operation;
use sparql_algebra_model::TermFactory;
use sparql_algebra_syntax::{QuerySyntax, SparqlSyntax, UpdateSyntax};
use tracing::debug;

/// Translates syntax trees into algebra trees.
///
/// The translator owns the [TermFactory] that creates the blank nodes of collections and property
/// lists. Its counter is shared by all translations of the same translator, so blank nodes of
/// separate translations do not collide.
#[derive(Clone, Debug, Default)]
pub struct AlgebraTranslator {
    options: TranslationOptions,
    terms: TermFactory,
}

impl AlgebraTranslator {
    pub fn new(options: TranslationOptions) -> Self {
        Self {
            options,
            terms: TermFactory::new(),
        }
    }

    /// Uses `terms` for creating blank nodes.
    #[must_use]
    pub fn with_term_factory(mut self, terms: TermFactory) -> Self {
        self.terms = terms;
        self
    }

    pub fn term_factory_mut(&mut self) -> &mut TermFactory {
        &mut self.terms
    }

    pub fn translate(&mut self, sparql: &SparqlSyntax) -> TranslationResult<Operation> {
        match sparql {
            SparqlSyntax::Query(query) => self.translate_query(query),
            SparqlSyntax::Update(update) => self.translate_update(update),
        }
    }

    /// Translates a query. The root of the result is one of [Operation::Project],
    /// [Operation::Construct], [Operation::Describe], or [Operation::Ask], possibly wrapped in
    /// solution modifiers and a [Operation::From].
    pub fn translate_query(&mut self, query: &QuerySyntax) -> TranslationResult<Operation> {
        debug!(
            quads = self.options.quads,
            blank_to_variable = self.options.blank_to_variable,
            "Translating query into algebra"
        );

        let mut variables = FxHashSet::default();
        scan::collect_query_variables(query, &mut variables);

        let mut context = TranslationContext::new(&self.options, &mut self.terms, variables);
        let operation = context.translate_query(query)?;
        context.finish(operation)
    }

    /// Translates an update request. Updates require quads mode.
    pub fn translate_update(&mut self, update: &UpdateSyntax) -> TranslationResult<Operation> {
        debug!(
            operations = update.operations.len(),
            quads = self.options.quads,
            "Translating update into algebra"
        );

        let mut variables = FxHashSet::default();
        scan::collect_update_variables(update, &mut variables);

        let mut context = TranslationContext::new(&self.options, &mut self.terms, variables);
        let operation = context.translate_update(update)?;
        context.finish(operation)
    }
}

/// Translates `query` with a fresh [AlgebraTranslator].
pub fn translate_query(
    query: &QuerySyntax,
    options: &TranslationOptions,
) -> TranslationResult<Operation> {
    AlgebraTranslator::new(options.clone()).translate_query(query)
}

/// Translates `update` with a fresh [AlgebraTranslator].
pub fn translate_update(
    update: &UpdateSyntax,
    options: &TranslationOptions,
) -> TranslationResult<Operation> {
    AlgebraTranslator::new(options.clone()).translate_update(update)
}
