use crate::catalog::ProductId;
use crate::error::{Error, Result};
use crate::vector::Vector;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;

/// One ranked neighbor from a similarity query.
///
/// `score` is the cosine similarity, or 0.0 for a candidate whose
/// similarity is undefined (zero-norm vector) and which therefore ranks
/// after every candidate with a defined score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    pub id: ProductId,
    pub score: f32,
}

/// Immutable product-id -> embedding-vector matrix with nearest-neighbor
/// queries. The matrix comes from an external trainer and is frozen into
/// the snapshot; nothing here mutates after construction.
#[derive(Debug, Clone)]
pub struct EmbeddingIndex {
    vectors: Vec<Vector>,
    dim: usize,
}

impl EmbeddingIndex {
    /// Wrap a trained matrix, validating that every row has the expected
    /// dimension.
    pub fn new(matrix: Vec<Vec<f32>>, dim: usize) -> Result<Self> {
        let mut vectors = Vec::with_capacity(matrix.len());
        for row in matrix {
            if row.len() != dim {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: row.len(),
                });
            }
            vectors.push(Vector::new(row));
        }
        Ok(Self { vectors, dim })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn vector(&self, id: ProductId) -> Result<&Vector> {
        self.vectors
            .get(id as usize)
            .ok_or(Error::UnknownProduct(id))
    }

    /// Cosine similarity between two products.
    ///
    /// Fails with [`Error::DegenerateVector`] when either vector has zero
    /// norm; the check happens before the division so NaN can never escape.
    pub fn similarity(&self, a: ProductId, b: ProductId) -> Result<f32> {
        let va = self.vector(a)?;
        let vb = self.vector(b)?;
        let norm_a = va.norm();
        if norm_a == 0.0 {
            return Err(Error::DegenerateVector(a));
        }
        let norm_b = vb.norm();
        if norm_b == 0.0 {
            return Err(Error::DegenerateVector(b));
        }
        Ok(va.dot(vb) / (norm_a * norm_b))
    }

    /// Rank every product by similarity to `id` and return up to `k`
    /// neighbors.
    ///
    /// Ordering is descending by similarity with ties broken by ascending
    /// product id; candidates with undefined similarity rank last, also by
    /// ascending id. The query product itself is dropped from the ranking,
    /// so the result holds min(k, len - 1) entries and a small catalog
    /// never pads or errors.
    pub fn top_k_neighbors(&self, id: ProductId, k: usize) -> Result<Vec<Neighbor>> {
        let query = self.vector(id)?;

        let mut scored: Vec<(ProductId, Option<f32>)> = self
            .vectors
            .par_iter()
            .enumerate()
            .map(|(i, candidate)| (i as ProductId, query.cosine_similarity(candidate)))
            .collect();

        scored.sort_by(|a, b| match (a.1, b.1) {
            (Some(x), Some(y)) => y
                .partial_cmp(&x)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(scored
            .into_iter()
            .filter(|(candidate, _)| *candidate != id)
            .take(k)
            .map(|(candidate, score)| Neighbor {
                id: candidate,
                score: score.unwrap_or(0.0),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(rows: Vec<Vec<f32>>) -> EmbeddingIndex {
        let dim = rows[0].len();
        EmbeddingIndex::new(rows, dim).unwrap()
    }

    #[test]
    fn test_self_similarity_is_one() {
        let idx = index(vec![vec![0.4, 0.3], vec![1.0, 0.0]]);
        assert!((idx.similarity(0, 0).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let idx = index(vec![vec![0.4, 0.3], vec![1.0, 2.0]]);
        let ab = idx.similarity(0, 1).unwrap();
        let ba = idx.similarity(1, 0).unwrap();
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_is_degenerate_not_nan() {
        let idx = index(vec![vec![0.0, 0.0], vec![1.0, 0.0]]);
        assert!(matches!(
            idx.similarity(0, 1),
            Err(Error::DegenerateVector(0))
        ));
        assert!(matches!(
            idx.similarity(1, 0),
            Err(Error::DegenerateVector(0))
        ));
    }

    #[test]
    fn test_unknown_product() {
        let idx = index(vec![vec![1.0, 0.0]]);
        assert!(matches!(idx.similarity(0, 9), Err(Error::UnknownProduct(9))));
        assert!(matches!(
            idx.top_k_neighbors(9, 3),
            Err(Error::UnknownProduct(9))
        ));
    }

    #[test]
    fn test_neighbors_exclude_self_and_cap_length() {
        let idx = index(vec![
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.0, 1.0],
            vec![-1.0, 0.0],
        ]);
        let neighbors = idx.top_k_neighbors(0, 10).unwrap();
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.iter().all(|n| n.id != 0));
        // descending similarity
        assert_eq!(neighbors[0].id, 1);
        assert_eq!(neighbors[1].id, 2);
        assert_eq!(neighbors[2].id, 3);

        let top_one = idx.top_k_neighbors(0, 1).unwrap();
        assert_eq!(top_one.len(), 1);
        assert_eq!(top_one[0].id, 1);
    }

    #[test]
    fn test_ties_break_by_ascending_id() {
        // products 1 and 2 are identical, so they tie against product 0
        let idx = index(vec![vec![1.0, 0.0], vec![0.5, 0.5], vec![0.5, 0.5]]);
        let neighbors = idx.top_k_neighbors(0, 2).unwrap();
        assert_eq!(neighbors[0].id, 1);
        assert_eq!(neighbors[1].id, 2);
    }

    #[test]
    fn test_degenerate_candidates_rank_last() {
        let idx = index(vec![vec![1.0, 0.0], vec![0.0, 0.0], vec![-1.0, 0.0]]);
        let neighbors = idx.top_k_neighbors(0, 3).unwrap();
        // the anti-parallel vector still outranks the undefined one
        assert_eq!(neighbors[0].id, 2);
        assert_eq!(neighbors[1].id, 1);
    }

    #[test]
    fn test_row_dimension_validated() {
        let result = EmbeddingIndex::new(vec![vec![1.0, 0.0], vec![1.0]], 2);
        assert!(matches!(
            result,
            Err(Error::InvalidDimension {
                expected: 2,
                actual: 1
            })
        ));
    }
}
