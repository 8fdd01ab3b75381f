//! Manufacturer and category types for product organization.

use crate::ids::{CategoryId, ManufacturerId};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex digits of the name digest used when a name has no slug-able characters.
const SLUG_CHECKSUM_HEX_LEN: usize = 10;

/// A brand or vendor a product is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: Option<ManufacturerId>,
    pub name: String,
    pub lang_id: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
    pub is_active: Option<bool>,
}

impl Manufacturer {
    /// Create a manufacturer known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            lang_id: None,
            description: None,
            short_description: None,
            meta_title: None,
            meta_description: None,
            created_date: None,
            updated_date: None,
            is_active: None,
        }
    }
}

/// A category reference attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: Option<String>,
    pub lang_id: Option<String>,
}

impl Category {
    /// Create a category whose id is the slug of its name.
    ///
    /// Names without any letters or digits get a stable digest-based id so
    /// the id is never empty and distinct names stay distinct.
    pub fn from_name(name: &str) -> Self {
        let slug = slugify(name);
        let id = if slug.is_empty() {
            format!("category-{}", name_checksum(name))
        } else {
            slug
        };
        Self {
            id: CategoryId::new(id),
            name: Some(name.to_string()),
            lang_id: None,
        }
    }
}

/// Lowercase alphanumeric runs (any script) joined by single dashes.
pub fn slugify(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn name_checksum(name: &str) -> String {
    let digest = Sha256::digest(name.trim().as_bytes());
    format!("{:x}", digest)
        .chars()
        .take(SLUG_CHECKSUM_HEX_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("T-Shirts & Tops"), "t-shirts-tops");
        assert_eq!(slugify("  Outerwear "), "outerwear");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_keeps_non_latin_letters() {
        assert_eq!(slugify("Чашки"), "чашки");
        assert_eq!(slugify("Футболки и Майки"), "футболки-и-майки");
        assert_eq!(slugify("Café Crème"), "café-crème");
    }

    #[test]
    fn test_category_ids_never_empty() {
        let cups = Category::from_name("Чашки");
        let shirts = Category::from_name("Футболки");
        assert_eq!(cups.id.as_str(), "чашки");
        assert_ne!(cups.id, shirts.id);

        let bang = Category::from_name("!!!");
        let stars = Category::from_name("***");
        assert!(bang.id.as_str().starts_with("category-"));
        assert_eq!(bang.id.as_str().len(), "category-".len() + SLUG_CHECKSUM_HEX_LEN);
        assert_ne!(bang.id, stars.id);
        assert_eq!(bang.id, Category::from_name("!!!").id);
    }

    #[test]
    fn test_category_from_name() {
        let cat = Category::from_name("Summer Collection");
        assert_eq!(cat.id.as_str(), "summer-collection");
        assert_eq!(cat.name.as_deref(), Some("Summer Collection"));
    }

    #[test]
    fn test_manufacturer_named() {
        let m = Manufacturer::named("Acme");
        assert_eq!(m.name, "Acme");
        assert!(m.is_active.is_none());
    }
}
