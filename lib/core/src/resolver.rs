use crate::catalog::{normalize, Catalog, Product};
use serde::{Deserialize, Serialize};

/// Tunables for query resolution.
///
/// The defaults reproduce the legacy matching behavior; both knobs are
/// heuristic and deliberately configurable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Minimum sequence ratio for a fuzzy match, in [0, 1]
    pub fuzzy_cutoff: f32,
    /// Also test containment against the entry with hyphens replaced by
    /// spaces, so "baby spinach" finds "baby-spinach"
    pub hyphens_as_spaces: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_cutoff: 0.6,
            hyphens_as_spaces: true,
        }
    }
}

/// Maps free-form query text to the canonical catalog entries it plausibly
/// refers to. A pure read against the immutable catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogResolver {
    config: ResolverConfig,
}

impl CatalogResolver {
    #[inline]
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a query to catalog entries.
    ///
    /// The result is the union of containment matches (the normalized query
    /// as a substring of the entry, optionally hyphen-normalized) and fuzzy
    /// matches (sequence ratio >= cutoff), deduplicated and returned in
    /// ascending product id order. An empty result is the defined no-match
    /// case, not an error.
    #[must_use]
    pub fn resolve(&self, catalog: &Catalog, query: &str) -> Vec<Product> {
        let query = normalize(query);
        catalog
            .entries()
            .filter(|entry| self.matches(&entry.name, &query))
            .collect()
    }

    fn matches(&self, entry: &str, query: &str) -> bool {
        if entry.contains(query) {
            return true;
        }
        if self.config.hyphens_as_spaces && entry.replace('-', " ").contains(query) {
            return true;
        }
        sequence_ratio(query, entry) >= self.config.fuzzy_cutoff
    }
}

/// Ratcliff/Obershelp similarity ratio in [0, 1].
///
/// Recursively finds the longest common block, then matches the pieces to
/// its left and right, and returns 2*M / (len(a) + len(b)) where M is the
/// total matched length. Two empty strings are identical (ratio 1).
#[must_use]
pub fn sequence_ratio(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_len(&a, &b) as f32 / total as f32
}

fn matched_len(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_match(a, b);
    if size == 0 {
        return 0;
    }
    size + matched_len(&a[..i], &b[..j]) + matched_len(&a[i + size..], &b[j + size..])
}

/// Longest common contiguous block, earliest in `a` then `b` on ties.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (0, 0, 0);
    // lengths of common suffixes ending at the previous row of a
    let mut run_lengths = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        let mut next = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let size = run_lengths[j] + 1;
                next[j + 1] = size;
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        run_lengths = next;
    }
    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BasketRecord;

    fn catalog(names: &[&str]) -> Catalog {
        let records: Vec<BasketRecord> = names
            .iter()
            .enumerate()
            .map(|(i, n)| BasketRecord::new(format!("t{i}"), *n))
            .collect();
        Catalog::from_records(&records)
    }

    fn resolved_names(catalog: &Catalog, query: &str) -> Vec<String> {
        CatalogResolver::default()
            .resolve(catalog, query)
            .into_iter()
            .map(|p| p.name)
            .collect()
    }

    #[test]
    fn test_sequence_ratio_extremes() {
        assert!((sequence_ratio("spinach", "spinach") - 1.0).abs() < 1e-6);
        assert!((sequence_ratio("", "") - 1.0).abs() < 1e-6);
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_sequence_ratio_partial() {
        // "abcd" vs "bcde": matched block "bcd" -> 2*3 / 8
        assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_containment_finds_variants() {
        let catalog = catalog(&["spinach", "baby spinach", "hummus"]);
        let names = resolved_names(&catalog, "spinach");
        assert_eq!(names, vec!["spinach", "baby spinach"]);
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        let catalog = catalog(&["spinach", "baby spinach", "hummus"]);
        assert_eq!(
            resolved_names(&catalog, "Spinach"),
            resolved_names(&catalog, "spinach")
        );
    }

    #[test]
    fn test_hyphen_normalized_containment() {
        let catalog = catalog(&["zero-waste hummus"]);
        assert_eq!(
            resolved_names(&catalog, "zero waste"),
            vec!["zero-waste hummus"]
        );

        // with hyphen folding off the entry is no containment match, but
        // the union still reaches it through the fuzzy path
        // (ratio 2*9/27 ~ 0.67 >= 0.6)
        let no_fold = CatalogResolver::new(ResolverConfig {
            hyphens_as_spaces: false,
            ..ResolverConfig::default()
        });
        assert_eq!(no_fold.resolve(&catalog, "zero waste").len(), 1);

        // closing the fuzzy path as well leaves nothing
        let strict = CatalogResolver::new(ResolverConfig {
            hyphens_as_spaces: false,
            fuzzy_cutoff: 1.0,
        });
        assert!(strict.resolve(&catalog, "zero waste").is_empty());
    }

    #[test]
    fn test_fuzzy_match_at_cutoff() {
        let catalog = catalog(&["classic hummus"]);
        // a near-miss spelling with no containment match
        let names = resolved_names(&catalog, "clasic humus");
        assert_eq!(names, vec!["classic hummus"]);
    }

    #[test]
    fn test_unresolvable_query_is_empty() {
        let catalog = catalog(&["spinach", "baby spinach", "hummus"]);
        assert!(resolved_names(&catalog, "xyz123").is_empty());
    }

    #[test]
    fn test_output_in_ascending_id_order() {
        let catalog = catalog(&["baby spinach", "hummus", "spinach"]);
        let products = CatalogResolver::default().resolve(&catalog, "spinach");
        let ids: Vec<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }
}
