//! Print order pricing.
//!
//! Turns a catalog [`Product`](printshop_catalog::Product) and a customer's
//! [`ProductCustomization`] into a [`PriceBreakdown`]. The calculation is a
//! pure function: no IO, no shared state, identical inputs give identical
//! output, and it can be called from any number of threads.
//!
//! Surcharge rates and lamination amounts live in a [`PricingPolicy`] so they
//! can change without touching the pipeline.

pub mod breakdown;
pub mod calculator;
pub mod customization;
pub mod format;
pub mod policy;
pub mod quote;

pub use breakdown::PriceBreakdown;
pub use calculator::{calculate_price, calculate_price_with, resolve_bulk_discount_percent};
pub use customization::{Lamination, ProductCustomization, Quantity};
pub use format::format_price;
pub use policy::{PolicyError, PricingPolicy};
pub use quote::quote;
