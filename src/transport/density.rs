use super::support::Support;
use crate::Mass;

/// generalization of a weighted empirical distribution
/// over arbitrary Support. weights are unnormalized.
pub trait Density {
    type S: Support;

    /// ordered (feature, weight) pairs
    fn support(&self) -> impl Iterator<Item = (&Self::S, Mass)>;

    /// number of features, including zero-weight ones
    fn n(&self) -> usize {
        self.support().count()
    }
    /// total mass. not necessarily 1
    fn mass(&self) -> Mass {
        self.support().map(|(_, w)| w).sum()
    }
}
