use crate::{TranslationError, TranslationOptions, TranslationResult};
use oxiri::{Iri, IriRef as RawIriRef};
use rustc_hash::{FxHashMap, FxHashSet};
use sparql_algebra_model::{NamedNode, TermFactory, Variable};
use sparql_algebra_syntax::{ContextDefinition, IriRef};
use tracing::trace;

/// The state of a single top-level translation into the algebra.
///
/// A context is created for every call of the translator and discarded afterward. Only the blank
/// node counter of the [TermFactory] outlives it.
pub(crate) struct TranslationContext<'a> {
    quads: bool,
    blank_to_variable: bool,
    terms: &'a mut TermFactory,
    /// All variable names of the query and all generated names.
    variables: FxHashSet<String>,
    variable_counter: usize,
    base_iri: Option<Iri<String>>,
    prefixes: FxHashMap<String, String>,
}

impl<'a> TranslationContext<'a> {
    pub(crate) fn new(
        options: &TranslationOptions,
        terms: &'a mut TermFactory,
        variables: FxHashSet<String>,
    ) -> Self {
        Self {
            quads: options.quads,
            blank_to_variable: options.blank_to_variable,
            terms,
            variables,
            variable_counter: 0,
            base_iri: options.base_iri.clone(),
            prefixes: options.prefixes.clone(),
        }
    }

    pub(crate) fn quads(&self) -> bool {
        self.quads
    }

    pub(crate) fn blank_to_variable(&self) -> bool {
        self.blank_to_variable
    }

    pub(crate) fn terms_mut(&mut self) -> &mut TermFactory {
        self.terms
    }

    pub(crate) fn variables_mut(&mut self) -> &mut FxHashSet<String> {
        &mut self.variables
    }

    /// Generates a variable `?var<n>` that does not occur anywhere in the query and has not been
    /// generated before.
    pub(crate) fn fresh_variable(&mut self) -> Variable {
        loop {
            let name = format!("var{}", self.variable_counter);
            self.variable_counter += 1;
            if self.variables.insert(name.clone()) {
                trace!(variable = %name, "Generated fresh variable");
                return Variable::new_unchecked(name);
            }
        }
    }

    /// Registers the `BASE` and `PREFIX` declarations of a prologue. They stay in effect for the
    /// rest of the translation.
    pub(crate) fn register_context(
        &mut self,
        definitions: &[ContextDefinition],
    ) -> TranslationResult<()> {
        for definition in definitions {
            match definition {
                ContextDefinition::Base(iri) => {
                    self.base_iri = Some(self.resolve(iri)?);
                }
                ContextDefinition::Prefix { prefix, iri } => {
                    let namespace = self.resolve(iri)?.into_inner();
                    self.prefixes.insert(prefix.clone(), namespace);
                }
            }
        }
        Ok(())
    }

    /// Expands prefixed names and resolves relative IRIs against the current base.
    pub(crate) fn resolve_iri(&self, iri: &IriRef) -> TranslationResult<NamedNode> {
        let iri = match iri {
            IriRef::Full(iri) => self.resolve(iri)?,
            IriRef::Prefixed { prefix, local } => {
                let namespace = self
                    .prefixes
                    .get(prefix)
                    .ok_or_else(|| TranslationError::UnknownPrefix(prefix.clone()))?;
                self.resolve(&format!("{namespace}{local}"))?
            }
        };
        Ok(NamedNode::new_unchecked(iri.into_inner()))
    }

    fn resolve(&self, iri: &str) -> TranslationResult<Iri<String>> {
        let invalid = |source| TranslationError::InvalidIri {
            iri: iri.to_owned(),
            source,
        };

        if let Some(base_iri) = &self.base_iri {
            return base_iri.resolve(iri).map_err(invalid);
        }

        let reference = RawIriRef::parse(iri).map_err(invalid)?;
        if reference.scheme().is_none() {
            return Err(TranslationError::MissingBaseIri(iri.to_owned()));
        }
        Iri::parse(iri.to_owned()).map_err(invalid)
    }
}
