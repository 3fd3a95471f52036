//! Product catalog domain module.
//!
//! Read-only reference data for the storefront: printable products, their
//! size/paper/finishing options, capability flags and bulk discount tiers.
//! Deterministic domain logic only (no IO beyond parsing supplied text).

pub mod catalog;
pub mod product;

pub use catalog::{CatalogError, ProductCatalog};
pub use product::{BulkDiscount, Finishing, PaperType, Product, Size};
