use crate::Arbitrary;
use crate::Mass;
use crate::signature::feature::Bin;
use crate::transport::Density;
use crate::transport::Support;
use serde::Deserialize;
use serde::Serialize;

/// A weighted feature set representing one empirical distribution.
///
/// Features and weights are kept in parallel, in insertion order.
/// Weights are unnormalized and must be non-negative. Two signatures
/// being compared need not share a length or a feature type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature<X> {
    features: Vec<X>,
    weights: Vec<Mass>,
}

impl<X> Signature<X> {
    pub fn features(&self) -> &[X] {
        &self.features
    }
    pub fn weights(&self) -> &[Mass] {
        &self.weights
    }
    /// number of features, zero-weight ones included
    pub fn n(&self) -> usize {
        self.features.len()
    }
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
    /// total mass over all features
    pub fn mass(&self) -> Mass {
        self.weights.iter().sum()
    }
}

impl<X> Default for Signature<X> {
    fn default() -> Self {
        Self {
            features: Vec::new(),
            weights: Vec::new(),
        }
    }
}

impl<X> From<Vec<(X, Mass)>> for Signature<X> {
    fn from(pairs: Vec<(X, Mass)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<X> FromIterator<(X, Mass)> for Signature<X> {
    fn from_iter<I: IntoIterator<Item = (X, Mass)>>(iter: I) -> Self {
        let (features, weights) = iter.into_iter().unzip();
        Self { features, weights }
    }
}

/// weights laid over consecutive bins 0, 1, 2, ...
impl From<&[Mass]> for Signature<Bin> {
    fn from(weights: &[Mass]) -> Self {
        weights
            .iter()
            .copied()
            .enumerate()
            .map(|(i, w)| (Bin(i), w))
            .collect()
    }
}

impl<X> Density for Signature<X>
where
    X: Support,
{
    type S = X;
    fn support(&self) -> impl Iterator<Item = (&Self::S, Mass)> {
        self.features.iter().zip(self.weights.iter().copied())
    }
    fn n(&self) -> usize {
        self.n()
    }
    fn mass(&self) -> Mass {
        self.mass()
    }
}

impl Arbitrary for Signature<Bin> {
    fn random() -> Self {
        use rand::Rng;
        const N: usize = 12;
        let ref mut rng = rand::rng();
        let n = rng.random_range(2..=N);
        (0..n)
            .map(|i| match rng.random_bool(0.25) {
                true => (Bin(i), 0.),
                false => (Bin(i), rng.random::<Mass>() * 8.),
            })
            .collect()
    }
}
