//! Domain models with validation at construction
//!
//! Request bodies are decoded into typed values up front.
//! Invalid input returns BodyError, not panic.

pub mod post;
pub mod validation;

pub use post::{NewPost, RandomPost};
pub use validation::BodyError;
