mod canonical;
mod display;
mod expression;
mod factory;
mod isomorphism;
mod operation;
mod path;
mod pattern;
pub mod rewrite;
mod tree;
mod util;
pub mod visit;

pub use canonical::canonicalize;
pub use expression::*;
pub use isomorphism::is_isomorphic;
pub use operation::*;
pub use path::PropertyPathSymbol;
pub use pattern::*;
pub use util::{create_unique_variable, in_scope_variables};
