//! Source-to-canonical product normalization.
//!
//! Every function here is a pure function of the source record. Within one
//! record the resolution order matters: variants are resolved first, the
//! first of them becomes the primary variant, and the product-level price,
//! sku, weight, barcode, stock and specific prices are copied from it.

use crate::error::MappingError;
use crate::ids::{ImageId, ProductId, VariantId};
use crate::model::{
    AttributeGroup, Barcode, Category, Image, Manufacturer, OutOfStockAction, Product,
    SpecificPrice, Stock, Variant, Weight, WeightUnit,
};
use crate::reconcile::{build_attribute_groups, reconcile_variant, MatchStats};
use crate::source::{parse_decimal, SourceId, SourceImage, SourceProduct, SourceVariant};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

/// A normalized product together with its attribute-match diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub product: Product,
    pub stats: MatchStats,
}

/// A resolved variant plus the source fields the product level still needs.
struct ResolvedVariant {
    variant: Variant,
    compare_at_price: Option<Decimal>,
    requires_shipping: Option<bool>,
    taxable: Option<bool>,
}

/// Normalize one source record into a canonical product.
pub fn normalize(record: SourceProduct) -> Result<Product, MappingError> {
    normalize_with_stats(record).map(|n| n.product)
}

/// Normalize one source record, also returning attribute-match diagnostics.
pub fn normalize_with_stats(record: SourceProduct) -> Result<Normalized, MappingError> {
    let product_id = record
        .id
        .as_ref()
        .and_then(SourceId::to_id_string)
        .map(ProductId::new)
        .ok_or(MappingError::MissingProductId)?;

    let created_date = parse_date(record.created_at.as_deref(), "created_at")?;
    let updated_date = parse_date(record.updated_at.as_deref(), "updated_at")?;
    let is_active = resolve_status(&product_id, record.status.as_deref());

    let groups = build_attribute_groups(&record.options);
    let images = map_images(&product_id, &record.images)?;

    let mut stats = MatchStats::default();
    let mut resolved = Vec::with_capacity(record.variants.len());
    for (index, source) in record.variants.iter().enumerate() {
        resolved.push(resolve_variant(
            &product_id,
            index,
            source,
            &groups,
            &record.images,
            &images,
            &mut stats,
        )?);
    }

    let primary = resolved.first();
    let price = primary.map(resolve_product_price);
    let is_virtual = primary.and_then(|p| p.requires_shipping).unwrap_or(false);
    let is_taxable = primary.and_then(|p| p.taxable);

    let (sku, stock, weight, barcode, specific_prices) = match primary {
        Some(p) => (
            p.variant.sku.clone(),
            p.variant.stock.clone(),
            p.variant.weight.clone(),
            p.variant.barcode.clone(),
            p.variant.specific_prices.clone(),
        ),
        None => (
            None,
            Stock::new(None, OutOfStockAction::Deny),
            Weight::default(),
            Barcode::default(),
            Vec::new(),
        ),
    };

    let manufacturers = non_empty(record.vendor.as_deref())
        .map(|vendor| vec![Manufacturer::named(vendor)])
        .unwrap_or_default();
    let categories = non_empty(record.product_type.as_deref())
        .map(|kind| vec![Category::from_name(kind)])
        .unwrap_or_default();

    let product = Product {
        id: product_id,
        name: record.title.clone(),
        description: non_empty(record.body_html.as_deref()).map(str::to_string),
        short_description: None,
        shop_id: None,
        lang_id: None,
        meta_title: non_empty(Some(record.title.as_str())).map(str::to_string),
        meta_description: None,
        link_rewrite: non_empty(record.handle.as_deref()).map(str::to_string),
        price,
        cost: None,
        is_active,
        is_virtual,
        is_taxable,
        images,
        sku,
        variants: resolved.into_iter().map(|r| r.variant).collect(),
        manufacturers,
        categories,
        specific_prices,
        tags: record.tags.to_list(),
        stock,
        weight,
        barcode,
        created_date,
        updated_date,
    };
    debug_assert!(product.is_consistent_with_primary());

    Ok(Normalized { product, stats })
}

/// Compare-at price when present and non-zero, else the base price.
fn resolve_product_price(primary: &ResolvedVariant) -> Decimal {
    primary
        .compare_at_price
        .filter(|p| !p.is_zero())
        .unwrap_or(primary.variant.price)
}

fn resolve_variant(
    product_id: &ProductId,
    index: usize,
    source: &SourceVariant,
    groups: &[AttributeGroup],
    source_images: &[SourceImage],
    images: &[Image],
    stats: &mut MatchStats,
) -> Result<ResolvedVariant, MappingError> {
    let id = source
        .id
        .as_ref()
        .and_then(SourceId::to_id_string)
        .ok_or_else(|| MappingError::MissingVariantId {
            product_id: product_id.to_string(),
            index,
        })?;

    let price = parse_decimal(source.price.as_ref(), "price")?.ok_or_else(|| {
        MappingError::InvalidDecimal {
            field: "price",
            value: String::new(),
        }
    })?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(MappingError::NegativePrice {
            variant_id: id,
            price: price.to_string(),
        });
    }
    let compare_at_price = parse_decimal(source.compare_at_price.as_ref(), "compare_at_price")?;

    let stock = resolve_stock(&id, source)?;
    let weight = resolve_weight(&id, source)?;

    let matched = reconcile_variant(groups, &source.option_values());
    stats.record(&matched);

    let specific_prices = match compare_at_price {
        Some(regular) if regular > price => vec![SpecificPrice::amount_off(regular - price)],
        _ => Vec::new(),
    };

    let variant_images = source_images
        .iter()
        .zip(images)
        .filter(|(raw, _)| {
            raw.variant_ids
                .iter()
                .any(|v| v.to_id_string().as_deref() == Some(id.as_str()))
        })
        .map(|(_, image)| image.clone())
        .collect();

    Ok(ResolvedVariant {
        variant: Variant {
            id: VariantId::new(id),
            price,
            stock,
            sku: non_empty(source.sku.as_deref()).map(str::to_string),
            attribute_pairs: matched.pairs,
            images: variant_images,
            specific_prices,
            barcode: Barcode::from_raw(source.barcode.as_deref()),
            weight,
        },
        compare_at_price,
        requires_shipping: source.requires_shipping,
        taxable: source.taxable,
    })
}

/// Raw quantity (negative = backorder depth) and mapped policy.
fn resolve_stock(variant_id: &str, source: &SourceVariant) -> Result<Stock, MappingError> {
    let action = match source.inventory_policy.as_deref() {
        None => OutOfStockAction::Deny,
        Some(policy) => OutOfStockAction::from_policy(policy).ok_or_else(|| {
            MappingError::UnknownInventoryPolicy {
                variant_id: variant_id.to_string(),
                value: policy.to_string(),
            }
        })?,
    };
    Ok(Stock::new(source.inventory_quantity, action))
}

/// Weight value verbatim, unit tagged. No scaling between units.
fn resolve_weight(variant_id: &str, source: &SourceVariant) -> Result<Weight, MappingError> {
    let value = parse_decimal(source.weight.as_ref(), "weight")?;
    let unit = match source.weight_unit.as_deref() {
        None => WeightUnit::Kg,
        Some(raw) => WeightUnit::from_unit(raw).ok_or_else(|| MappingError::UnknownWeightUnit {
            variant_id: variant_id.to_string(),
            value: raw.to_string(),
        })?,
    };
    Ok(Weight::new(value, unit))
}

/// Images in source order. The position-1 image is the cover; without any
/// position data the first image is.
fn map_images(product_id: &ProductId, images: &[SourceImage]) -> Result<Vec<Image>, MappingError> {
    // Lowest explicit position wins; without any positions the first image does.
    let cover_index = images
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| raw.position.map(|p| (p, index)))
        .min()
        .map(|(_, index)| index)
        .unwrap_or(0);

    images
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let id = raw.id.as_ref().and_then(SourceId::to_id_string);
            let path = non_empty(raw.src.as_deref()).ok_or_else(|| {
                MappingError::MissingImagePath {
                    product_id: product_id.to_string(),
                    image_id: id.clone().unwrap_or_else(|| format!("#{}", index)),
                }
            })?;

            let mut image = Image::new(path);
            image.id = id.map(ImageId::new);
            image.position = raw.position;
            image.is_cover = index == cover_index;
            image.name = non_empty(raw.alt.as_deref())
                .map(str::to_string)
                .or_else(|| image.file_name().map(str::to_string));
            Ok(image)
        })
        .collect()
}

/// Unrecognized statuses leave the active flag unset.
fn resolve_status(product_id: &ProductId, status: Option<&str>) -> Option<bool> {
    let status = non_empty(status)?.to_lowercase();
    match status.as_str() {
        "active" => Some(true),
        "draft" | "archived" => Some(false),
        _ => {
            tracing::warn!(product_id = %product_id, status = %status, "Unknown product status");
            None
        }
    }
}

fn parse_date(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<DateTime<FixedOffset>>, MappingError> {
    match non_empty(raw) {
        None => Ok(None),
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(Some)
            .map_err(|e| MappingError::InvalidDate {
                field,
                value: value.to_string(),
                reason: e.to_string(),
            }),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
