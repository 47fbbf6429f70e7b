use super::error::EmdError;
use super::network::Network;
use super::network::Problem;
use super::penalty::Penalty;
use super::quantize::Quantizer;
use super::solver::Solver;
use super::solver::SuccessiveShortestPaths;
use crate::DEGENERATE;
use crate::Distance;
use crate::EMD_SCALE;
use crate::Mass;
use crate::signature::signature::Signature;
use crate::transport::Measure;

/// EMD-HAT between two signatures under a pluggable ground distance.
///
/// ```text
/// EMD^(P, Q) = min Σ f_ij C_ij  +  |ΣP - ΣQ| × α
/// ```
///
/// where the flow f moves min(ΣP, ΣQ) units, no unit costs more than
/// max(C), and α is the extra mass penalty (max(C) unless fixed).
///
/// the computation is quantize → build + reduce → solve → rescale →
/// add the mass penalty. all state lives inside one call, so separate
/// calls can run on separate threads.
pub struct EMDHat<'a, M, S = SuccessiveShortestPaths>
where
    M: Measure,
{
    lhs: &'a Signature<M::X>,
    rhs: &'a Signature<M::Y>,
    measure: &'a M,
    penalty: Penalty,
    scale: f64,
    reduce: bool,
    solver: S,
}

impl<'a, M> From<(&'a Signature<M::X>, &'a Signature<M::Y>, &'a M)> for EMDHat<'a, M>
where
    M: Measure,
{
    fn from((lhs, rhs, measure): (&'a Signature<M::X>, &'a Signature<M::Y>, &'a M)) -> Self {
        Self {
            lhs,
            rhs,
            measure,
            penalty: Penalty::default(),
            scale: EMD_SCALE,
            reduce: true,
            solver: SuccessiveShortestPaths,
        }
    }
}

impl<'a, M, S> EMDHat<'a, M, S>
where
    M: Measure,
    S: Solver,
{
    /// per-unit charge on unmatched mass. accepts -1 as "use max(C)".
    pub fn penalty(self, penalty: impl Into<Penalty>) -> Self {
        Self {
            penalty: penalty.into(),
            ..self
        }
    }
    /// quantization constant K, validated when the distance is computed
    pub fn scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }
    /// skip the graph reduction pass. same distance, larger network.
    pub fn unreduced(self) -> Self {
        Self {
            reduce: false,
            ..self
        }
    }
    /// swap the min-cost-flow backend
    pub fn solver<T>(self, solver: T) -> EMDHat<'a, M, T>
    where
        T: Solver,
    {
        EMDHat {
            lhs: self.lhs,
            rhs: self.rhs,
            measure: self.measure,
            penalty: self.penalty,
            scale: self.scale,
            reduce: self.reduce,
            solver,
        }
    }

    /// the distance, or DEGENERATE when either side has no mass.
    pub fn distance(&self) -> Result<Distance, EmdError> {
        Self::shape(self.lhs.features().len(), self.lhs.weights().len())?;
        Self::shape(self.rhs.features().len(), self.rhs.weights().len())?;
        let p = Self::masses(self.lhs.weights())?;
        let q = Self::masses(self.rhs.weights())?;
        if self.lhs.is_empty() || self.rhs.is_empty() || p <= 0. || q <= 0. {
            log::warn!("{:<32}{:<32}", "degenerate signature mass", format!("{} vs {}", p, q));
            return Ok(DEGENERATE);
        }
        let costs = self.costs()?;
        let threshold = costs.iter().copied().fold(0., Distance::max);
        let penalty = self.penalty.per_unit(threshold);
        if !penalty.is_finite() || penalty < 0. {
            return Err(EmdError::Invalid {
                what: "extra mass penalty",
                value: penalty,
            });
        }
        let extra = (p.max(q) - p.min(q)) * penalty;
        if threshold == 0. {
            log::debug!("{:<32}{:<32}", "zero ground distance", "skipping solver");
            return Ok(extra);
        }
        let quantizer = Quantizer::new(self.scale, p.max(q), threshold)?;
        let problem = Problem::new(
            self.lhs.weights().iter().map(|&w| quantizer.mass(w)).collect(),
            self.rhs.weights().iter().map(|&w| quantizer.mass(w)).collect(),
            costs.iter().map(|&c| quantizer.cost(c)).collect(),
        );
        let network = match self.reduce {
            true => Network::reduced(&problem),
            false => Network::complete(&problem),
        };
        log::debug!(
            "{:<32}{:<32}",
            "flow network",
            format!("{} nodes {} edges", network.n(), network.edges().len())
        );
        let raw = self
            .solver
            .solve(&network)
            .and_then(|flow| {
                flow.checked_add(network.preflow())
                    .ok_or(EmdError::Overflow { scale: f64::NAN })
            })
            .map_err(|e| match e {
                EmdError::Overflow { .. } => EmdError::Overflow { scale: self.scale },
                e => e,
            })?;
        log::debug!("{:<32}{:<32}", "raw transport cost", raw);
        Ok(quantizer.restore(raw) + extra)
    }

    /// ground distance matrix, row-major over (lhs feature, rhs feature)
    fn costs(&self) -> Result<Vec<Distance>, EmdError> {
        self.lhs
            .features()
            .iter()
            .flat_map(|x| self.rhs.features().iter().map(move |y| (x, y)))
            .map(|(x, y)| self.measure.distance(x, y))
            .map(|c| match c.is_finite() && c >= 0. {
                true => Ok(c),
                false => Err(EmdError::Invalid {
                    what: "ground distance",
                    value: c,
                }),
            })
            .collect()
    }

    /// one weight per feature. only a deserialized signature can break this.
    fn shape(features: usize, weights: usize) -> Result<(), EmdError> {
        match features == weights {
            true => Ok(()),
            false => Err(EmdError::Invalid {
                what: "weight count",
                value: weights as f64,
            }),
        }
    }

    fn masses(weights: &[Mass]) -> Result<Mass, EmdError> {
        weights
            .iter()
            .copied()
            .map(|w| match w.is_finite() && w >= 0. {
                true => Ok(w),
                false => Err(EmdError::Invalid {
                    what: "weight",
                    value: w,
                }),
            })
            .sum()
    }
}

/// EMD-HAT with the default solver and scale.
/// `penalty` of -1 charges unmatched mass at the largest ground distance.
pub fn distance<M>(
    lhs: &Signature<M::X>,
    rhs: &Signature<M::Y>,
    measure: &M,
    penalty: impl Into<Penalty>,
) -> Result<Distance, EmdError>
where
    M: Measure,
{
    EMDHat::from((lhs, rhs, measure)).penalty(penalty).distance()
}
