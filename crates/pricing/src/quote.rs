use printshop_catalog::ProductCatalog;
use printshop_core::{DomainError, DomainResult};

use crate::breakdown::PriceBreakdown;
use crate::calculator::calculate_price_with;
use crate::customization::ProductCustomization;
use crate::policy::PricingPolicy;

/// Price a customization against the catalog entry it names.
///
/// Unlike [`calculate_price_with`], this refuses unknown products, a product
/// id mismatch and quantities under the product minimum.
pub fn quote(
    catalog: &ProductCatalog,
    customization: &ProductCustomization,
    policy: &PricingPolicy,
) -> DomainResult<PriceBreakdown> {
    let product = catalog
        .get(&customization.product_id)
        .ok_or_else(|| DomainError::not_found(format!("product {}", customization.product_id)))?;

    customization.check_against(product)?;

    Ok(calculate_price_with(product, customization, policy))
}
