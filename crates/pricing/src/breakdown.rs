use serde::{Deserialize, Serialize};

use printshop_core::ValueObject;

/// Every figure produced by one price calculation.
///
/// The colour, double-sided and lamination additions are totals for the whole
/// order (per-unit amount times quantity). They were compounded on the running
/// unit price, so they do not simply add up to `subtotal` with
/// `base_price * quantity` unless the multipliers are applied first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub size_multiplier: f64,
    pub paper_multiplier: f64,
    pub color_addition: f64,
    pub double_side_addition: f64,
    pub lamination_addition: f64,
    pub finishing_addition: f64,
    pub urgent_addition: f64,
    pub quantity: u32,
    /// Per-unit price once all per-unit modifiers are applied.
    pub unit_price: f64,
    pub subtotal: f64,
    pub bulk_discount_percent: f64,
    pub bulk_discount: f64,
    pub final_price: f64,
    pub price_per_unit: f64,
}

impl ValueObject for PriceBreakdown {}

impl PriceBreakdown {
    /// Order total before the bulk discount.
    pub fn pre_discount_total(&self) -> f64 {
        self.subtotal + self.finishing_addition + self.urgent_addition
    }

    /// Whether `final_price` agrees with the additive fields within `tolerance`.
    pub fn reconciles(&self, tolerance: f64) -> bool {
        let expected = self.pre_discount_total() - self.bulk_discount;
        (self.final_price - expected).abs() <= tolerance
            && (self.price_per_unit * f64::from(self.quantity) - self.final_price).abs() <= tolerance
    }
}
