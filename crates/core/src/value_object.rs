//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are never mutated after construction;
/// a new value replaces the old one. Price breakdowns are the main example in
/// this workspace: two breakdowns with the same figures are the same quote.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Surcharge {
///     rate: f64,
/// }
///
/// impl ValueObject for Surcharge {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
