//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Validation runs entirely before any mutating statement is issued.
//! - Provides clear error types and documented interfaces.

pub mod db;
pub mod errors;
pub mod validate;
#[cfg(test)]
pub mod test_support;
