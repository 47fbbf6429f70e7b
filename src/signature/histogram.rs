use crate::Distance;
use crate::Mass;
use crate::emd::error::EmdError;
use crate::emd::hat::EMDHat;
use crate::emd::penalty::Penalty;
use crate::signature::feature::Bin;
use crate::signature::ground::Absolute;
use crate::signature::signature::Signature;
use serde::Deserialize;
use serde::Serialize;

/// A frequency distribution of real samples over equal-width bins.
///
/// The range is either fitted to the samples or borrowed from another
/// histogram, so that two distributions can share bin edges and be
/// compared bin by bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    min: f64,
    max: f64,
    freqs: Vec<Mass>,
}

impl Histogram {
    /// bin `samples` over the given range. values outside it are clamped
    /// into the first or last bin, NaN samples are not counted.
    pub fn ranged(samples: &[f64], bins: usize, min: f64, max: f64) -> Self {
        assert!(bins > 0, "histogram needs at least one bin");
        assert!(min <= max, "reversed histogram range");
        let mut freqs = vec![0.; bins];
        let width = (max - min) / bins as f64;
        for x in samples
            .iter()
            .filter(|x| !x.is_nan())
            .map(|x| x.clamp(min, max))
        {
            let pos = match width > 0. {
                true => ((x - min) / width) as usize,
                false => 0,
            };
            freqs[pos.min(bins - 1)] += 1.;
        }
        Self { min, max, freqs }
    }
    /// bin `samples` over the range of `other`
    pub fn aligned(samples: &[f64], bins: usize, other: &Self) -> Self {
        Self::ranged(samples, bins, other.min, other.max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }
    pub fn max(&self) -> f64 {
        self.max
    }
    pub fn bins(&self) -> usize {
        self.freqs.len()
    }
    pub fn width(&self) -> f64 {
        (self.max - self.min) / self.bins() as f64
    }
    pub fn frequencies(&self) -> &[Mass] {
        &self.freqs
    }
    /// number of samples counted
    pub fn total(&self) -> Mass {
        self.freqs.iter().sum()
    }

    /// one feature per bin, empty bins included
    pub fn signature(&self) -> Signature<Bin> {
        Signature::from(self.frequencies())
    }
    /// EMD-HAT over bin indices, unmatched mass charged at the
    /// widest bin distance. DEGENERATE if either side is empty.
    pub fn emd(&self, other: &Self) -> Result<Distance, EmdError> {
        if self.total() <= 0. || other.total() <= 0. {
            return Ok(crate::DEGENERATE);
        }
        let ref lhs = self.signature();
        let ref rhs = other.signature();
        EMDHat::from((lhs, rhs, &Absolute))
            .penalty(Penalty::Threshold)
            .distance()
    }
}

impl From<(&[f64], usize)> for Histogram {
    /// range fitted to the finite samples
    fn from((samples, bins): (&[f64], usize)) -> Self {
        let finite = || samples.iter().copied().filter(|x| x.is_finite());
        let min = finite().fold(f64::INFINITY, f64::min);
        let max = finite().fold(f64::NEG_INFINITY, f64::max);
        match min <= max {
            true => Self::ranged(samples, bins, min, max),
            false => Self::ranged(samples, bins, 0., 0.),
        }
    }
}

impl std::fmt::Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, freq) in self.freqs.iter().enumerate() {
            let start = self.min + self.width() * i as f64;
            let end = start + self.width();
            write!(f, "[{}, {}] -> {} ", start, end, freq)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQ1: [f64; 7] = [0., 0., 0., 1., 1., 1., 10.];
    const SEQ2: [f64; 7] = [0., 0., 0., 0., 0., 10., 10.];

    #[test]
    fn is_maximum_in_last_bin() {
        let h = Histogram::from((&SEQ1[..], 10));
        assert_eq!(h.frequencies(), &[3., 3., 0., 0., 0., 0., 0., 0., 0., 1.]);
        assert_eq!(h.total(), 7.);
        assert_eq!(h.width(), 1.);
    }
    #[test]
    fn is_out_of_range_clamped() {
        let reference = Histogram::from((&SEQ2[..], 5));
        let h = Histogram::aligned(&[-4., 3., 99.], 5, &reference);
        assert_eq!(h.min(), 0.);
        assert_eq!(h.max(), 10.);
        assert_eq!(h.frequencies(), &[1., 1., 0., 0., 1.]);
    }
    #[test]
    fn is_constant_sample_in_first_bin() {
        let h = Histogram::from((&[2., 2., 2.][..], 4));
        assert_eq!(h.frequencies(), &[3., 0., 0., 0.]);
    }
    #[test]
    fn is_empty_histogram_degenerate() {
        let empty = Histogram::from((&[][..], 3));
        let full = Histogram::from((&SEQ1[..], 3));
        assert_eq!(empty.total(), 0.);
        assert_eq!(empty.emd(&full), Ok(crate::DEGENERATE));
        assert_eq!(full.emd(&empty), Ok(crate::DEGENERATE));
    }
    #[test]
    fn is_non_finite_sample_outside_fit() {
        let h = Histogram::from((&[f64::NAN, 1., f64::INFINITY, 3.][..], 2));
        assert_eq!(h.min(), 1.);
        assert_eq!(h.max(), 3.);
        assert_eq!(h.frequencies(), &[1., 2.]);
        let h = Histogram::from((&[f64::NAN][..], 3));
        assert_eq!(h.total(), 0.);
        assert_eq!(h.frequencies(), &[0., 0., 0.]);
    }
    #[test]
    #[should_panic(expected = "reversed histogram range")]
    fn is_reversed_range_rejected() {
        Histogram::ranged(&SEQ1, 4, 10., 0.);
    }
    #[test]
    fn is_display_listing_bins() {
        let h = Histogram::from((&[0., 2.][..], 2));
        assert_eq!(h.to_string(), "[0, 1] -> 1 [1, 2] -> 1 ");
    }
    #[test]
    fn is_regression_fixture_reproduced() {
        let h1 = Histogram::from((&SEQ1[..], 10));
        let h2 = Histogram::from((&SEQ2[..], 10));
        let d12 = h1.emd(&h2).unwrap();
        let d21 = h2.emd(&h1).unwrap();
        assert_eq!(d12, 9.999939999987001);
        assert_eq!(d12, d21);
    }
}
