//! Canonical product and variant types.

use crate::ids::{ProductId, VariantId};
use crate::model::{
    AttributePair, Barcode, Category, Image, Manufacturer, SpecificPrice, Stock, Weight,
};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable variant (e.g., one size/color combination).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    /// Base (selling) price, never negative.
    pub price: Decimal,
    pub stock: Stock,
    pub sku: Option<String>,
    /// One pair per matched option slot, in slot order.
    pub attribute_pairs: Vec<AttributePair>,
    pub images: Vec<Image>,
    pub specific_prices: Vec<SpecificPrice>,
    pub barcode: Barcode,
    pub weight: Weight,
}

impl Variant {
    /// Create a variant with default stock, weight and barcode.
    pub fn new(id: impl Into<VariantId>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            price,
            stock: Stock::default(),
            sku: None,
            attribute_pairs: Vec::new(),
            images: Vec::new(),
            specific_prices: Vec::new(),
            barcode: Barcode::default(),
            weight: Weight::default(),
        }
    }
}

/// A product in the canonical model.
///
/// When `variants` is non-empty, `price`, `sku`, `weight`, `barcode`, `stock`
/// and `specific_prices` mirror the first (primary) variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub shop_id: Option<String>,
    pub lang_id: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub link_rewrite: Option<String>,
    /// Regular price; `None` when the product has no variants.
    pub price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub is_active: Option<bool>,
    pub is_virtual: bool,
    pub is_taxable: Option<bool>,
    pub images: Vec<Image>,
    pub sku: Option<String>,
    pub variants: Vec<Variant>,
    pub manufacturers: Vec<Manufacturer>,
    pub categories: Vec<Category>,
    pub specific_prices: Vec<SpecificPrice>,
    pub tags: Vec<String>,
    pub stock: Stock,
    pub weight: Weight,
    pub barcode: Barcode,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
}

impl Product {
    /// Create a product with no variants and explicit defaults everywhere.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            short_description: None,
            shop_id: None,
            lang_id: None,
            meta_title: None,
            meta_description: None,
            link_rewrite: None,
            price: None,
            cost: None,
            is_active: None,
            is_virtual: false,
            is_taxable: None,
            images: Vec::new(),
            sku: None,
            variants: Vec::new(),
            manufacturers: Vec::new(),
            categories: Vec::new(),
            specific_prices: Vec::new(),
            tags: Vec::new(),
            stock: Stock::default(),
            weight: Weight::default(),
            barcode: Barcode::default(),
            created_date: None,
            updated_date: None,
        }
    }

    /// The variant top-level fields are derived from.
    pub fn primary_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    /// The cover image, if one is flagged.
    pub fn cover_image(&self) -> Option<&Image> {
        self.images.iter().find(|i| i.is_cover)
    }

    /// Check that top-level fields still mirror the primary variant.
    pub fn is_consistent_with_primary(&self) -> bool {
        match self.primary_variant() {
            None => true,
            Some(v) => {
                self.sku == v.sku
                    && self.weight == v.weight
                    && self.barcode == v.barcode
                    && self.stock == v.stock
                    && self.specific_prices == v.specific_prices
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_defaults() {
        let product = Product::new("1", "Shirt");
        assert!(product.variants.is_empty());
        assert!(product.price.is_none());
        assert!(!product.is_virtual);
        assert!(product.is_consistent_with_primary());
    }

    #[test]
    fn test_consistency_with_primary() {
        let mut product = Product::new("1", "Shirt");
        let mut variant = Variant::new("10", dec!(20.00));
        variant.sku = Some("SH1".to_string());
        product.variants.push(variant);
        assert!(!product.is_consistent_with_primary());

        product.sku = Some("SH1".to_string());
        assert!(product.is_consistent_with_primary());
    }
}
