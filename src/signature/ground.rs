use crate::Arbitrary;
use crate::Distance;
use crate::signature::feature::Bin;
use crate::signature::feature::Point;
use crate::transport::Measure;

/// index difference between two histogram bins, |i - j|.
/// the natural ground distance for one-dimensional histograms.
#[derive(Debug, Default, Copy, Clone)]
pub struct Absolute;

impl Measure for Absolute {
    type X = Bin;
    type Y = Bin;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Distance {
        x.0.abs_diff(y.0) as Distance
    }
}

/// straight-line distance between two cells of a planar grid.
#[derive(Debug, Default, Copy, Clone)]
pub struct Euclidean;

impl Measure for Euclidean {
    type X = Point;
    type Y = Point;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Distance {
        (x.x - y.x).hypot(x.y - y.y)
    }
}

/// precomputed ground distances, row-major over (source index, target index).
/// rows index the left signature, columns the right one.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    costs: Vec<Distance>,
}

impl Matrix {
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn get(&self, i: usize, j: usize) -> Distance {
        self.costs[i * self.cols + j]
    }
    /// the same table read from the other side
    pub fn transpose(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
            costs: (0..self.cols)
                .flat_map(|j| (0..self.rows).map(move |i| (i, j)))
                .map(|(i, j)| self.get(i, j))
                .collect(),
        }
    }
    /// replace every entry with min(entry, cap)
    pub fn capped(&self, cap: Distance) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            costs: self.costs.iter().map(|c| c.min(cap)).collect(),
        }
    }
    pub fn max(&self) -> Distance {
        self.costs.iter().copied().fold(0., Distance::max)
    }
}

impl From<Vec<Vec<Distance>>> for Matrix {
    fn from(table: Vec<Vec<Distance>>) -> Self {
        let rows = table.len();
        let cols = table.first().map_or(0, Vec::len);
        assert!(table.iter().all(|r| r.len() == cols), "ragged cost matrix");
        Self {
            rows,
            cols,
            costs: table.into_iter().flatten().collect(),
        }
    }
}

impl Measure for Matrix {
    type X = usize;
    type Y = usize;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Distance {
        self.get(*x, *y)
    }
}

impl Arbitrary for Matrix {
    fn random() -> Self {
        use rand::Rng;
        const N: usize = 8;
        let ref mut rng = rand::rng();
        let rows = rng.random_range(1..=N);
        let cols = rng.random_range(1..=N);
        Self {
            rows,
            cols,
            costs: (0..rows * cols)
                .map(|_| rng.random_range(0..=16) as Distance / 2.)
                .collect(),
        }
    }
}

/// any ground distance capped at a constant, min(d, t).
///
/// thresholding keeps the metric property and shrinks the flow network:
/// every pair at or above t is routed implicitly through the threshold node.
#[derive(Debug, Clone)]
pub struct Thresholded<M> {
    measure: M,
    threshold: Distance,
}

impl<M> Thresholded<M> {
    pub fn threshold(&self) -> Distance {
        self.threshold
    }
}

impl<M> From<(M, Distance)> for Thresholded<M> {
    fn from((measure, threshold): (M, Distance)) -> Self {
        assert!(threshold >= 0., "negative threshold");
        Self { measure, threshold }
    }
}

impl<M> Measure for Thresholded<M>
where
    M: Measure,
{
    type X = M::X;
    type Y = M::Y;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Distance {
        self.measure.distance(x, y).min(self.threshold)
    }
}
