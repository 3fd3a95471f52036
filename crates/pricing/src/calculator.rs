//! Price calculation pipeline.
//!
//! Steps run in a fixed order because percentage surcharges compound on the
//! running unit price:
//!
//! 1. size and paper multipliers scale the base price,
//! 2. colour adds `color_rate` of that,
//! 3. double-sided adds `double_side_rate` of the price after colour,
//! 4. lamination adds a flat per-unit amount,
//! 5. the unit price times quantity gives the subtotal,
//! 6. finishing adds a flat amount per order,
//! 7. urgent delivery adds `urgent_rate` of the subtotal (finishing excluded),
//! 8. the best qualifying bulk tier is taken off the whole.
//!
//! Unknown size, paper or finishing ids fall back to neutral values (×1, +0).
//! Options the product does not support are ignored.

use printshop_catalog::{BulkDiscount, Product};

use crate::breakdown::PriceBreakdown;
use crate::customization::{Lamination, ProductCustomization, Quantity};
use crate::policy::PricingPolicy;

/// Price a customization with the standard policy.
pub fn calculate_price(product: &Product, customization: &ProductCustomization) -> PriceBreakdown {
    calculate_price_with(product, customization, PricingPolicy::standard())
}

/// Price a customization with an explicit policy.
pub fn calculate_price_with(
    product: &Product,
    customization: &ProductCustomization,
    policy: &PricingPolicy,
) -> PriceBreakdown {
    let quantity = customization.quantity.as_f64();

    let size_multiplier = match product.size(&customization.size) {
        Some(size) => size.price_multiplier,
        None => {
            tracing::debug!(product = %product.id, size = %customization.size, "unknown size, using multiplier 1");
            1.0
        }
    };

    let paper_multiplier = match product.paper_type(&customization.paper_type) {
        Some(paper) => paper.price_multiplier,
        None => {
            tracing::debug!(product = %product.id, paper_type = %customization.paper_type, "unknown paper type, using multiplier 1");
            1.0
        }
    };

    let mut unit_price = product.base_price * size_multiplier * paper_multiplier;

    let mut color_per_unit = 0.0;
    if customization.is_color {
        color_per_unit = unit_price * policy.color_rate;
        unit_price += color_per_unit;
    }

    let mut double_side_per_unit = 0.0;
    if customization.is_double_side && product.has_double_side {
        double_side_per_unit = unit_price * policy.double_side_rate;
        unit_price += double_side_per_unit;
    }

    let mut lamination_per_unit = 0.0;
    if product.has_lamination && !customization.lamination.is_none() {
        lamination_per_unit = lamination_amount(policy, &customization.lamination);
        unit_price += lamination_per_unit;
    }

    let subtotal = unit_price * quantity;

    let finishing_addition = match &customization.finishing {
        Some(id) => match product.finishing(id) {
            Some(finishing) => finishing.price,
            None => {
                tracing::debug!(product = %product.id, finishing = %id, "unknown finishing, adding nothing");
                0.0
            }
        },
        None => 0.0,
    };

    let urgent_addition = if customization.is_urgent && product.has_urgent_delivery {
        subtotal * policy.urgent_rate
    } else {
        0.0
    };

    let pre_discount_total = subtotal + finishing_addition + urgent_addition;
    let bulk_discount_percent =
        resolve_bulk_discount_percent(&product.bulk_discounts, customization.quantity);
    let bulk_discount = pre_discount_total * (bulk_discount_percent / 100.0);

    let final_price = pre_discount_total - bulk_discount;
    let price_per_unit = final_price / quantity;

    tracing::trace!(
        product = %product.id,
        quantity = customization.quantity.get(),
        policy_version = policy.version,
        subtotal,
        bulk_discount_percent,
        final_price,
        "price calculated"
    );

    PriceBreakdown {
        base_price: product.base_price,
        size_multiplier,
        paper_multiplier,
        color_addition: color_per_unit * quantity,
        double_side_addition: double_side_per_unit * quantity,
        lamination_addition: lamination_per_unit * quantity,
        finishing_addition,
        urgent_addition,
        quantity: customization.quantity.get(),
        unit_price,
        subtotal,
        bulk_discount_percent,
        bulk_discount,
        final_price,
        price_per_unit,
    }
}

/// Unrecognised finishes price as zero, same as no lamination.
fn lamination_amount(policy: &PricingPolicy, lamination: &Lamination) -> f64 {
    match policy.lamination_flat(lamination) {
        Some(amount) => amount,
        None => {
            tracing::debug!(lamination = lamination.as_str(), "lamination finish not priced by policy, adding nothing");
            0.0
        }
    }
}

/// Discount percent of the highest tier whose threshold the quantity meets.
///
/// Tiers are not cumulative. Among tiers sharing a threshold, the one listed
/// first wins. Returns `0.0` when no tier qualifies.
pub fn resolve_bulk_discount_percent(tiers: &[BulkDiscount], quantity: Quantity) -> f64 {
    let mut sorted: Vec<&BulkDiscount> = tiers.iter().collect();
    // Stable sort: equal thresholds keep catalog order.
    sorted.sort_by(|a, b| b.min_quantity.cmp(&a.min_quantity));

    sorted
        .into_iter()
        .find(|tier| tier.min_quantity <= quantity.get())
        .map_or(0.0, |tier| tier.discount_percent)
}
