use super::error::EmdError;
use crate::Distance;
use crate::EMD_SCALE_LIMIT;
use crate::Mass;
use crate::Quanta;

/// Fixed-point scaling of masses and ground distances.
///
/// The heavier signature is mapped to a total mass of K and the largest
/// ground distance to a cost of K, so the solver only ever sees integers
/// in [0, K] (plus K + 1 on artificial edges). The integer distance it
/// returns is mapped back by dividing out both factors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quantizer {
    masses: f64,
    costs: f64,
}

impl Quantizer {
    /// `mass` is max(ΣP, ΣQ) and `cost` is max(C). both must be positive.
    pub fn new(scale: f64, mass: Mass, cost: Distance) -> Result<Self, EmdError> {
        Self::check(scale)?;
        debug_assert!(mass > 0., "degenerate mass reached the quantizer");
        debug_assert!(cost > 0., "degenerate cost reached the quantizer");
        Ok(Self {
            masses: scale / mass,
            costs: scale / cost,
        })
    }
    /// K must be a positive integer-representable value whose square,
    /// with one unit of slack for the artificial edges, fits in a Quanta.
    pub fn check(scale: f64) -> Result<(), EmdError> {
        let overflow = EmdError::Overflow { scale };
        if !scale.is_finite() || scale < 1. || scale > EMD_SCALE_LIMIT {
            return Err(overflow);
        }
        let k = scale as Quanta;
        k.checked_add(1)
            .and_then(|k1| k.checked_mul(k1))
            .map(|_| ())
            .ok_or(overflow)
    }
    pub fn mass(&self, w: Mass) -> Quanta {
        Self::round(w * self.masses)
    }
    pub fn cost(&self, c: Distance) -> Quanta {
        Self::round(c * self.costs)
    }
    /// undo both scalings on an integer transport cost
    pub fn restore(&self, raw: Quanta) -> Distance {
        raw as Distance / self.masses / self.costs
    }
    /// round half up, floor(x + 0.5). inputs are non-negative.
    fn round(x: f64) -> Quanta {
        (x + 0.5).floor() as Quanta
    }
}
