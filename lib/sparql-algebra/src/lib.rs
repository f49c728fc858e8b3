#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod model {
    pub use sparql_algebra_model::*;
}

pub mod syntax {
    pub use sparql_algebra_syntax::*;
}

pub mod logical {
    pub use sparql_algebra_logical::*;
}

pub mod translator {
    pub use sparql_algebra_translator::*;
}

pub use sparql_algebra_translator::{
    to_syntax, translate_query, translate_update, AlgebraTranslator, AstTranslator,
    TranslationError, TranslationOptions, TranslationResult,
};
