use crate::catalog::ProductId;
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces one embedding vector per product from the co-occurrence pair
/// multiset. Injected into snapshot building so the core stays testable
/// without a real optimizer.
pub trait Trainer: Send + Sync {
    /// Train a `vocab_size` x `dim` matrix from ordered co-occurrence
    /// pairs. Pair order carries no meaning; only the multiset does.
    fn train(
        &self,
        pairs: &[(ProductId, ProductId)],
        vocab_size: usize,
        dim: usize,
    ) -> Result<Vec<Vec<f32>>>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdTrainerConfig {
    pub epochs: usize,
    pub learning_rate: f32,
    pub negative_samples: usize,
    pub seed: u64,
}

impl Default for SgdTrainerConfig {
    fn default() -> Self {
        Self {
            epochs: 7,
            learning_rate: 0.05,
            negative_samples: 5,
            seed: 42,
        }
    }
}

/// Skip-gram style trainer: sigmoid of the input/context dot product,
/// positive label for every observed pair plus uniformly sampled
/// negatives, plain SGD. Seeded, so identical inputs produce an identical
/// matrix.
#[derive(Debug, Clone, Default)]
pub struct SgdTrainer {
    config: SgdTrainerConfig,
}

impl SgdTrainer {
    #[inline]
    #[must_use]
    pub fn new(config: SgdTrainerConfig) -> Self {
        Self { config }
    }
}

impl Trainer for SgdTrainer {
    fn train(
        &self,
        pairs: &[(ProductId, ProductId)],
        vocab_size: usize,
        dim: usize,
    ) -> Result<Vec<Vec<f32>>> {
        if dim == 0 {
            return Err(Error::Training(
                "embedding dimension must be positive".to_string(),
            ));
        }
        if vocab_size == 0 {
            return Ok(Vec::new());
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let bound = 0.5 / dim as f32;
        let init = |rng: &mut StdRng| -> Vec<Vec<f32>> {
            (0..vocab_size)
                .map(|_| (0..dim).map(|_| rng.random_range(-bound..bound)).collect())
                .collect()
        };
        let mut input_matrix = init(&mut rng);
        let mut context_matrix = init(&mut rng);

        let lr = self.config.learning_rate;
        for _ in 0..self.config.epochs {
            for &(input, context) in pairs {
                sgd_step(&mut input_matrix, &mut context_matrix, input, context, 1.0, lr);
                for _ in 0..self.config.negative_samples {
                    let sample = rng.random_range(0..vocab_size as ProductId);
                    if sample == context {
                        continue;
                    }
                    sgd_step(&mut input_matrix, &mut context_matrix, input, sample, 0.0, lr);
                }
            }
        }

        Ok(input_matrix)
    }
}

fn sgd_step(
    input_matrix: &mut [Vec<f32>],
    context_matrix: &mut [Vec<f32>],
    input: ProductId,
    context: ProductId,
    label: f32,
    lr: f32,
) {
    let input_row = &mut input_matrix[input as usize];
    let context_row = &mut context_matrix[context as usize];

    let dot: f32 = input_row
        .iter()
        .zip(context_row.iter())
        .map(|(a, b)| a * b)
        .sum();
    let predicted = 1.0 / (1.0 + (-dot).exp());
    let gradient = lr * (label - predicted);

    for (wi, wc) in input_row.iter_mut().zip(context_row.iter_mut()) {
        let old = *wi;
        *wi += gradient * *wc;
        *wc += gradient * old;
    }
}

/// Trainer returning a caller-supplied matrix, for tests and for matrices
/// trained out of process.
#[derive(Debug, Clone)]
pub struct FixedTrainer {
    matrix: Vec<Vec<f32>>,
}

impl FixedTrainer {
    #[inline]
    #[must_use]
    pub fn new(matrix: Vec<Vec<f32>>) -> Self {
        Self { matrix }
    }
}

impl Trainer for FixedTrainer {
    fn train(
        &self,
        _pairs: &[(ProductId, ProductId)],
        vocab_size: usize,
        _dim: usize,
    ) -> Result<Vec<Vec<f32>>> {
        if self.matrix.len() != vocab_size {
            return Err(Error::InvalidDimension {
                expected: vocab_size,
                actual: self.matrix.len(),
            });
        }
        Ok(self.matrix.clone())
    }
}
