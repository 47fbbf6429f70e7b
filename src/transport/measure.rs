use super::support::Support;
use crate::Distance;

/// generalization of *element-wise* ground distance between
/// the supports of two signatures.
///
/// X and Y need not be the same type. what is important is that we can
/// define a non-negative, deterministic distance between any x ∈ X and
/// any y ∈ Y. the engine calls this exactly once per (x, y) pair.
pub trait Measure {
    type X: Support;
    type Y: Support;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Distance;
}

impl<M> Measure for &M
where
    M: Measure,
{
    type X = M::X;
    type Y = M::Y;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Distance {
        (**self).distance(x, y)
    }
}
