use crate::Distance;
use serde::Deserialize;
use serde::Serialize;

/// per-unit cost charged on mass that cannot be matched
/// because the two signatures carry different totals.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum Penalty {
    /// charge the largest ground distance. keeps the metric property.
    #[default]
    Threshold,
    /// charge a fixed amount per unit, zero included.
    Fixed(Distance),
}

impl Penalty {
    /// resolve against the largest ground distance of the problem
    pub fn per_unit(&self, threshold: Distance) -> Distance {
        match self {
            Self::Threshold => threshold,
            Self::Fixed(p) => *p,
        }
    }
}

/// -1 is the conventional sentinel for "use the threshold".
impl From<Distance> for Penalty {
    fn from(p: Distance) -> Self {
        if p == -1. {
            Self::Threshold
        } else {
            Self::Fixed(p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_sentinel_threshold() {
        assert_eq!(Penalty::from(-1.), Penalty::Threshold);
        assert_eq!(Penalty::from(0.), Penalty::Fixed(0.));
        assert_eq!(Penalty::from(-1.).per_unit(9.), 9.);
        assert_eq!(Penalty::from(2.5).per_unit(9.), 2.5);
    }
}
