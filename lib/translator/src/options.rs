use oxiri::Iri;
use rustc_hash::FxHashMap;

/// Options for translating queries and updates into the algebra.
#[derive(Clone, Debug, Default)]
pub struct TranslationOptions {
    /// Whether patterns carry the graph they are matched against instead of being wrapped in
    /// [Graph](sparql_algebra_logical::Operation::Graph) nodes. Required for updates.
    pub quads: bool,
    /// Whether blank nodes in patterns are replaced by fresh variables.
    pub blank_to_variable: bool,
    /// The initial base IRI. A `BASE` declaration overrides it.
    pub base_iri: Option<Iri<String>>,
    /// The initial prefixes. `PREFIX` declarations extend them.
    pub prefixes: FxHashMap<String, String>,
}

impl TranslationOptions {
    #[must_use]
    pub fn with_quads(mut self, quads: bool) -> Self {
        self.quads = quads;
        self
    }

    #[must_use]
    pub fn with_blank_to_variable(mut self, blank_to_variable: bool) -> Self {
        self.blank_to_variable = blank_to_variable;
        self
    }

    #[must_use]
    pub fn with_base_iri(mut self, base_iri: Iri<String>) -> Self {
        self.base_iri = Some(base_iri);
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), iri.into());
        self
    }
}
