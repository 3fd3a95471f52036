//! `printshop-core` — shared domain building blocks.
//!
//! Pure types only: errors, identifiers and value-object markers. Nothing in
//! here performs IO.

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{FinishingId, PaperTypeId, ProductId, SizeId};
pub use value_object::ValueObject;
