use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use printshop_core::{DomainError, DomainResult, FinishingId, PaperTypeId, ProductId, SizeId};

/// Size option. The multiplier scales the per-unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: SizeId,
    pub name: String,
    /// Human-readable dimensions (e.g. "89 x 51 mm"); display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    pub price_multiplier: f64,
}

/// Paper stock option. The multiplier scales the per-unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperType {
    pub id: PaperTypeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gsm: Option<u32>,
    pub price_multiplier: f64,
}

/// Finishing option: a flat amount added once per order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finishing {
    pub id: FinishingId,
    pub name: String,
    pub price: f64,
}

/// Bulk discount tier: orders of at least `min_quantity` units get
/// `discount_percent` off. Tiers do not stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDiscount {
    pub min_quantity: u32,
    pub discount_percent: f64,
}

/// Catalog entry for a printable product.
///
/// Immutable reference data. `base_price` is the per-unit price before any
/// modifier; the option collections and capability flags decide which
/// modifiers a customization may apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub base_price: f64,
    pub min_quantity: u32,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub paper_types: Vec<PaperType>,
    #[serde(default)]
    pub finishings: Vec<Finishing>,
    #[serde(default)]
    pub has_color: bool,
    #[serde(default)]
    pub has_double_side: bool,
    #[serde(default)]
    pub has_lamination: bool,
    #[serde(default)]
    pub has_urgent_delivery: bool,
    #[serde(default)]
    pub bulk_discounts: Vec<BulkDiscount>,
}

impl Product {
    pub fn size(&self, id: &SizeId) -> Option<&Size> {
        self.sizes.iter().find(|s| &s.id == id)
    }

    pub fn paper_type(&self, id: &PaperTypeId) -> Option<&PaperType> {
        self.paper_types.iter().find(|p| &p.id == id)
    }

    pub fn finishing(&self, id: &FinishingId) -> Option<&Finishing> {
        self.finishings.iter().find(|f| &f.id == id)
    }

    /// Check the entry is usable for pricing.
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::invalid_id("product id cannot be blank"));
        }

        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(DomainError::validation(format!(
                "{}: base price must be a non-negative amount",
                self.id
            )));
        }

        if self.min_quantity == 0 {
            return Err(DomainError::validation(format!(
                "{}: minimum quantity must be at least 1",
                self.id
            )));
        }

        for size in &self.sizes {
            ensure_multiplier(&self.id, "size", size.id.as_str(), size.price_multiplier)?;
        }
        for paper in &self.paper_types {
            ensure_multiplier(&self.id, "paper type", paper.id.as_str(), paper.price_multiplier)?;
        }
        for finishing in &self.finishings {
            if !finishing.price.is_finite() || finishing.price < 0.0 {
                return Err(DomainError::validation(format!(
                    "{}: finishing {} must have a non-negative price",
                    self.id, finishing.id
                )));
            }
        }
        for tier in &self.bulk_discounts {
            if !(0.0..=100.0).contains(&tier.discount_percent) {
                return Err(DomainError::validation(format!(
                    "{}: discount for {}+ units must be between 0 and 100 percent",
                    self.id, tier.min_quantity
                )));
            }
        }

        ensure_unique(&self.id, "size", self.sizes.iter().map(|s| &s.id))?;
        ensure_unique(&self.id, "paper type", self.paper_types.iter().map(|p| &p.id))?;
        ensure_unique(&self.id, "finishing", self.finishings.iter().map(|f| &f.id))?;

        Ok(())
    }
}

fn ensure_multiplier(product: &ProductId, kind: &str, id: &str, multiplier: f64) -> DomainResult<()> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(DomainError::validation(format!(
            "{product}: {kind} {id} must have a positive price multiplier"
        )));
    }
    Ok(())
}

fn ensure_unique<'a, T>(
    product: &ProductId,
    kind: &str,
    ids: impl Iterator<Item = &'a T>,
) -> DomainResult<()>
where
    T: Eq + Hash + AsRef<str> + core::fmt::Display + 'a,
{
    let mut seen = HashSet::new();
    for id in ids {
        if id.as_ref().trim().is_empty() {
            return Err(DomainError::invalid_id(format!("{product}: blank {kind} id")));
        }
        if !seen.insert(id) {
            return Err(DomainError::invariant(format!(
                "{product}: duplicate {kind} id {id}"
            )));
        }
    }
    Ok(())
}
