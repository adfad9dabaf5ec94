//! Entity schemas and the validators that enforce them at JSON boundaries.

pub mod catalog;
pub mod schema;
pub(crate) mod validation;
pub mod validator;

pub use schema::{apply_doc_comments, EntityKind, EntitySchema, SchemaHandle};
pub use validator::Validator;
