//! Translation between the SPARQL syntax tree and the SPARQL algebra.
//!
//! [AlgebraTranslator] compiles queries and updates into the algebra following the translation of
//! graph patterns in section 18.2 of the SPARQL 1.1 recommendation. [AstTranslator] goes the other
//! way and reconstructs a syntax tree from a (possibly rewritten) algebra tree.

mod context;
mod error;
mod options;
pub mod to_algebra;
pub mod to_ast;

pub use error::{TranslationError, TranslationResult};
pub use options::TranslationOptions;
pub use to_algebra::{translate_query, translate_update, AlgebraTranslator};
pub use to_ast::{to_syntax, AstTranslator};
