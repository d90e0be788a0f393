pub mod error;
pub use error::{AppError, Entity, Operation};
