use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Product identity key, assigned densely from 0 in order of first
/// appearance of each distinct normalized name.
pub type ProductId = u32;

/// A canonical catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
}

/// One basket-membership row: a basket key plus one normalized product name.
///
/// Duplicate rows within one basket are meaningful and must not be
/// deduplicated; they raise both pair counts and popularity counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketRecord {
    pub basket_key: String,
    pub product_name: String,
}

impl BasketRecord {
    #[inline]
    #[must_use]
    pub fn new(basket_key: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            basket_key: basket_key.into(),
            product_name: product_name.into(),
        }
    }
}

/// Canonical text normalization: trim + lowercase
#[inline]
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Deterministic name <-> id table over the distinct normalized product
/// names of an ingested record stream.
///
/// Ids are assigned `0..N-1` in order of first appearance, so rebuilding
/// from an identically ordered stream reproduces the same assignment.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    name_to_id: AHashMap<String, ProductId>,
    names: Vec<String>,
}

impl Catalog {
    /// Build the catalog from a normalized record stream, in stream order.
    #[must_use]
    pub fn from_records(records: &[BasketRecord]) -> Self {
        let mut catalog = Self::default();
        for record in records {
            catalog.insert(&record.product_name);
        }
        catalog
    }

    /// Intern a normalized name, returning its id. Existing names keep
    /// their original id.
    pub fn insert(&mut self, name: &str) -> ProductId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = self.names.len() as ProductId;
        self.name_to_id.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    #[inline]
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<ProductId> {
        self.name_to_id.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn name_of(&self, id: ProductId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.name_of(id).map(|name| Product {
            id,
            name: name.to_string(),
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate entries in ascending id order
    pub fn entries(&self) -> impl Iterator<Item = Product> + '_ {
        self.names.iter().enumerate().map(|(id, name)| Product {
            id: id as ProductId,
            name: name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(names: &[&str]) -> Vec<BasketRecord> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| BasketRecord::new(format!("t{i}"), *n))
            .collect()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Baby Spinach "), "baby spinach");
        assert_eq!(normalize("HUMMUS"), "hummus");
    }

    #[test]
    fn test_first_appearance_ids() {
        let catalog = Catalog::from_records(&records(&["spinach", "hummus", "spinach", "pita"]));
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.id_of("spinach"), Some(0));
        assert_eq!(catalog.id_of("hummus"), Some(1));
        assert_eq!(catalog.id_of("pita"), Some(2));
        assert_eq!(catalog.name_of(1), Some("hummus"));
        assert_eq!(catalog.id_of("feta"), None);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let stream = records(&["pita", "spinach", "pita", "hummus", "spinach"]);
        let a = Catalog::from_records(&stream);
        let b = Catalog::from_records(&stream);
        for entry in a.entries() {
            assert_eq!(b.id_of(&entry.name), Some(entry.id));
        }
        assert_eq!(a.len(), b.len());
    }
}
