// Co-occurrence pair extraction: the raw training signal for embeddings.
use crate::catalog::{BasketRecord, Catalog, ProductId};
use ahash::AHashMap;

/// Convert basket-membership records into ordered co-occurrence pairs.
///
/// Records are grouped by basket key; each basket emits the full ordered
/// cross-product of its member rows excluding self-pairs, so a basket with
/// k rows (duplicates counted) contributes exactly k*(k-1) pairs. Baskets
/// of size 0 or 1 contribute nothing.
///
/// The output is a multiset: downstream training treats it as an unordered
/// weighted sample, so only its composition matters. Baskets are still
/// walked in first-appearance order to keep extraction reproducible for an
/// identically ordered stream.
#[must_use]
pub fn extract_pairs(records: &[BasketRecord], catalog: &Catalog) -> Vec<(ProductId, ProductId)> {
    let mut members: AHashMap<&str, Vec<ProductId>> = AHashMap::new();
    let mut basket_order: Vec<&str> = Vec::new();

    for record in records {
        let Some(id) = catalog.id_of(&record.product_name) else {
            continue;
        };
        let rows = members.entry(record.basket_key.as_str()).or_insert_with(|| {
            basket_order.push(record.basket_key.as_str());
            Vec::new()
        });
        rows.push(id);
    }

    let mut pairs = Vec::new();
    for key in basket_order {
        let rows = &members[key];
        if rows.len() < 2 {
            continue;
        }
        for &input in rows {
            for &context in rows {
                if input != context {
                    pairs.push((input, context));
                }
            }
        }
    }
    pairs
}
