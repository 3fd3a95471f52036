use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use printshop_catalog::Product;
use printshop_core::{DomainError, DomainResult, FinishingId, PaperTypeId, ProductId, SizeId};

/// Number of units ordered. Always at least one.
///
/// Zero and negative quantities are rejected when the value is built or
/// deserialized, so per-unit figures can always divide by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub fn new(units: u32) -> DomainResult<Self> {
        NonZeroU32::new(units)
            .map(Self)
            .ok_or_else(|| DomainError::validation("quantity must be positive"))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0.get())
    }
}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(DomainError::validation(format!(
                "quantity must be positive, got {value}"
            )));
        }
        let units = u32::try_from(value)
            .map_err(|_| DomainError::validation(format!("quantity {value} is too large")))?;
        Self::new(units)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.get()
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Lamination selection.
///
/// On the wire this is the finish id, with `"none"` (or an empty string, or
/// no value at all) meaning no lamination. Ids are kept verbatim: `" matte "`
/// and `"Matte"` are finishes the default policy does not price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Lamination {
    #[default]
    None,
    Finish(String),
}

impl Lamination {
    pub const NONE: &'static str = "none";

    pub fn finish(id: impl Into<String>) -> Self {
        Self::from(Some(id.into()))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Lamination::None)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Lamination::None => Self::NONE,
            Lamination::Finish(id) => id,
        }
    }
}

impl From<Option<String>> for Lamination {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(raw) if raw.is_empty() || raw == Self::NONE => Lamination::None,
            Some(raw) => Lamination::Finish(raw),
            None => Lamination::None,
        }
    }
}

impl From<&str> for Lamination {
    fn from(value: &str) -> Self {
        Self::from(Some(value.to_string()))
    }
}

impl From<Lamination> for String {
    fn from(value: Lamination) -> Self {
        match value {
            Lamination::None => Lamination::NONE.to_string(),
            Lamination::Finish(id) => id,
        }
    }
}

/// A customer's choices for one product, as submitted by the storefront.
///
/// Transient: built per pricing request and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCustomization {
    pub product_id: ProductId,
    pub size: SizeId,
    pub paper_type: PaperTypeId,
    pub quantity: Quantity,
    #[serde(default)]
    pub is_color: bool,
    #[serde(default)]
    pub is_double_side: bool,
    #[serde(default)]
    pub lamination: Lamination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finishing: Option<FinishingId>,
    #[serde(default)]
    pub is_urgent: bool,
}

impl ProductCustomization {
    /// Strict checks for order submission.
    ///
    /// The calculator itself stays lenient; this is for callers that want to
    /// refuse a draft before quoting it.
    pub fn check_against(&self, product: &Product) -> DomainResult<()> {
        if self.product_id != product.id {
            return Err(DomainError::invariant(format!(
                "customization is for product {}, not {}",
                self.product_id, product.id
            )));
        }

        if self.quantity.get() < product.min_quantity {
            return Err(DomainError::validation(format!(
                "{} requires at least {} units, got {}",
                product.id, product.min_quantity, self.quantity
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_rejects_zero_and_negative() {
        assert!(matches!(Quantity::new(0), Err(DomainError::Validation(_))));
        assert!(matches!(Quantity::try_from(-5), Err(DomainError::Validation(_))));
        assert!(matches!(
            Quantity::try_from(i64::from(u32::MAX) + 1),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(Quantity::try_from(250).unwrap().get(), 250);
    }

    #[test]
    fn lamination_sentinel_maps_to_none() {
        assert_eq!(Lamination::from("none"), Lamination::None);
        assert_eq!(Lamination::from(""), Lamination::None);
        assert_eq!(Lamination::from(None), Lamination::None);
        assert_eq!(Lamination::from("matte"), Lamination::Finish("matte".to_string()));
        assert_eq!(Lamination::finish("glossy").as_str(), "glossy");
        assert_eq!(Lamination::None.as_str(), "none");
    }

    #[test]
    fn lamination_ids_are_not_normalised() {
        assert_eq!(Lamination::from(" matte "), Lamination::Finish(" matte ".to_string()));
        assert_eq!(Lamination::from("None"), Lamination::Finish("None".to_string()));

        let parsed: Lamination = serde_json::from_str("\"Glossy\"").unwrap();
        assert_eq!(parsed.as_str(), "Glossy");
    }

    #[test]
    fn deserializes_storefront_payload() {
        let json = r#"{
            "productId": "business-cards",
            "size": "standard",
            "paperType": "matte-300",
            "quantity": 500,
            "isColor": true,
            "isDoubleSide": true,
            "lamination": "glossy",
            "finishing": "round-corners",
            "isUrgent": false
        }"#;

        let c: ProductCustomization = serde_json::from_str(json).unwrap();
        assert_eq!(c.product_id, ProductId::new("business-cards"));
        assert_eq!(c.quantity.get(), 500);
        assert_eq!(c.lamination, Lamination::finish("glossy"));
        assert_eq!(c.finishing, Some(FinishingId::new("round-corners")));
        assert!(c.is_double_side);
    }

    #[test]
    fn optional_fields_default_to_off() {
        let json = r#"{ "productId": "p", "size": "s", "paperType": "t", "quantity": 1 }"#;
        let c: ProductCustomization = serde_json::from_str(json).unwrap();
        assert!(!c.is_color && !c.is_double_side && !c.is_urgent);
        assert!(c.lamination.is_none());
        assert!(c.finishing.is_none());

        let json = r#"{ "productId": "p", "size": "s", "paperType": "t", "quantity": 1, "lamination": null }"#;
        let c: ProductCustomization = serde_json::from_str(json).unwrap();
        assert!(c.lamination.is_none());
    }

    #[test]
    fn deserialization_rejects_non_positive_quantity() {
        for quantity in ["0", "-10"] {
            let json = format!(
                r#"{{ "productId": "p", "size": "s", "paperType": "t", "quantity": {quantity} }}"#
            );
            let err = serde_json::from_str::<ProductCustomization>(&json).unwrap_err();
            assert!(err.to_string().contains("quantity must be positive"), "{err}");
        }
    }

    #[test]
    fn serializes_lamination_sentinel() {
        let c = ProductCustomization {
            product_id: ProductId::new("p"),
            size: SizeId::new("s"),
            paper_type: PaperTypeId::new("t"),
            quantity: Quantity::new(10).unwrap(),
            is_color: false,
            is_double_side: false,
            lamination: Lamination::None,
            finishing: None,
            is_urgent: false,
        };
        let value = serde_json::to_value(&c).unwrap();
        assert_eq!(value["lamination"], "none");
        assert_eq!(value["quantity"], 10);
        assert!(value.get("finishing").is_none());
    }
}
