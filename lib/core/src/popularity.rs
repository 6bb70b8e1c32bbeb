use crate::catalog::BasketRecord;
use ahash::AHashMap;

/// Basket-membership row counts per canonical product name.
///
/// A product's popularity is the number of membership rows carrying its
/// name, not the number of distinct baskets: duplicate rows within one
/// basket each add 1.
#[derive(Debug, Clone, Default)]
pub struct PopularityTable {
    counts: AHashMap<String, u64>,
}

impl PopularityTable {
    #[must_use]
    pub fn from_records(records: &[BasketRecord]) -> Self {
        let mut counts: AHashMap<String, u64> = AHashMap::new();
        for record in records {
            *counts.entry(record.product_name.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Stored count, or 0 for a name never seen
    #[inline]
    #[must_use]
    pub fn lookup(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_rows_each_count() {
        let records = vec![
            BasketRecord::new("t1", "spinach"),
            BasketRecord::new("t1", "spinach"),
            BasketRecord::new("t2", "spinach"),
            BasketRecord::new("t2", "hummus"),
        ];
        let table = PopularityTable::from_records(&records);
        assert_eq!(table.lookup("spinach"), 3);
        assert_eq!(table.lookup("hummus"), 1);
        assert_eq!(table.lookup("pita"), 0);
    }

    #[test]
    fn test_counts_are_additive_across_streams() {
        let stream_a = vec![
            BasketRecord::new("t1", "spinach"),
            BasketRecord::new("t2", "spinach"),
        ];
        let stream_b = vec![BasketRecord::new("t3", "hummus")];

        let merged: Vec<BasketRecord> =
            stream_a.iter().chain(stream_b.iter()).cloned().collect();

        let a = PopularityTable::from_records(&stream_a);
        let b = PopularityTable::from_records(&stream_b);
        let both = PopularityTable::from_records(&merged);

        assert_eq!(both.lookup("spinach"), a.lookup("spinach") + b.lookup("spinach"));
        assert_eq!(both.lookup("hummus"), a.lookup("hummus") + b.lookup("hummus"));
    }
}
