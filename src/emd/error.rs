use crate::Quanta;

/// Errors that can abort a distance computation.
///
/// Degenerate input (a signature without mass) is not an error;
/// see [`crate::DEGENERATE`].
#[derive(Debug, Clone, PartialEq)]
pub enum EmdError {
    /// quantization constant outside the range the integer solver can hold,
    /// or an accumulated cost that no longer fits in a Quanta.
    /// `scale` is NaN when raised by a solver that does not know it.
    Overflow { scale: f64 },
    /// a weight, ground distance or penalty that is negative or not finite.
    Invalid { what: &'static str, value: f64 },
    /// the solver ran out of reachable nodes while `supply` units were still
    /// waiting at `source`. the network was built with unbalanced supply.
    Infeasible { source: usize, supply: Quanta },
}

impl EmdError {
    /// true for failures caused by the inputs rather than by the engine itself
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Invalid { .. } | Self::Overflow { .. })
    }
}

impl std::fmt::Display for EmdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overflow { scale } => {
                write!(f, "quantization scale {} overflows 64-bit arithmetic", scale)
            }
            Self::Invalid { what, value } => write!(f, "invalid {}: {}", what, value),
            Self::Infeasible { source, supply } => write!(
                f,
                "internal error: no sink reachable from node {} with {} units of supply left",
                source, supply
            ),
        }
    }
}

impl std::error::Error for EmdError {}
