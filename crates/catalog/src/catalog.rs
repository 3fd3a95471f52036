//! In-memory product catalog.

use std::collections::HashMap;

use thiserror::Error;

use printshop_core::{DomainError, DomainResult, ProductId};

use crate::product::Product;

/// Errors raised while building a catalog from serialized data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Validated, insertion-ordered set of products keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, validating every product.
    pub fn from_products(products: Vec<Product>) -> DomainResult<Self> {
        let mut catalog = Self::new();
        for product in products {
            catalog.insert(product)?;
        }
        Ok(catalog)
    }

    /// Parse a JSON array of products (storefront format, camelCase fields).
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        let catalog = Self::from_products(products)?;
        tracing::debug!(products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn insert(&mut self, product: Product) -> DomainResult<()> {
        product.validate()?;

        if self.index.contains_key(&product.id) {
            return Err(DomainError::conflict(format!(
                "product {} already exists",
                product.id
            )));
        }

        self.index.insert(product.id.clone(), self.products.len());
        self.products.push(product);
        Ok(())
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Products in the given category, in catalog order.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |p| p.category.eq_ignore_ascii_case(category))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
