use serde::{Deserialize, Serialize};

/// A dense embedding vector of floating point numbers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn dot(&self, other: &Vector) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    #[inline]
    #[must_use]
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Compute cosine similarity with another vector.
    ///
    /// Returns `None` when the dimensions differ or either vector has zero
    /// norm; the zero-norm case is checked explicitly so the division can
    /// never produce NaN.
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> Option<f32> {
        if self.dim() != other.dim() {
            return None;
        }

        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return None;
        }

        Some(self.dot(other) / (norm_a * norm_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = Vector::new(vec![1.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0]);
        assert!((v1.cosine_similarity(&v2).unwrap() - 1.0).abs() < 1e-6);

        let v3 = Vector::new(vec![1.0, 0.0]);
        let v4 = Vector::new(vec![0.0, 1.0]);
        assert!((v3.cosine_similarity(&v4).unwrap() - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let v1 = Vector::new(vec![0.3, 0.7, 0.1]);
        let v2 = Vector::new(vec![0.9, 0.2, 0.5]);
        let ab = v1.cosine_similarity(&v2).unwrap();
        let ba = v2.cosine_similarity(&v1).unwrap();
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn test_zero_norm_is_undefined() {
        let zero = Vector::new(vec![0.0, 0.0]);
        let v = Vector::new(vec![1.0, 2.0]);
        assert!(zero.cosine_similarity(&v).is_none());
        assert!(v.cosine_similarity(&zero).is_none());
    }
}
