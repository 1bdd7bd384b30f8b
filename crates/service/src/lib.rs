//! Service layer providing business operations on top of models.
//! - Separates business logic from data access (repository traits with
//!   SeaORM and in-memory implementations).
//! - Wraps operations with the logging interceptor in `logging`.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod content;
pub mod email;
pub mod logging;
mod like;
#[cfg(test)]
pub mod test_support;
