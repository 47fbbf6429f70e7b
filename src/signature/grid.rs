use crate::Distance;
use crate::Mass;
use crate::emd::error::EmdError;
use crate::emd::hat::EMDHat;
use crate::signature::feature::Point;
use crate::signature::ground::Euclidean;
use crate::signature::signature::Signature;
use serde::Deserialize;
use serde::Serialize;

/// A square two-dimensional histogram over a horizontal and a vertical range.
/// Cells are addressed by (x, y) bin coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    bins: usize,
    horizontal: (f64, f64),
    vertical: (f64, f64),
    cells: Vec<Mass>,
}

impl Grid {
    pub fn new(bins: usize, horizontal: (f64, f64), vertical: (f64, f64)) -> Self {
        Self {
            bins,
            horizontal,
            vertical,
            cells: vec![0.; bins * bins],
        }
    }
    pub fn bins(&self) -> usize {
        self.bins
    }
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.bins && y < self.bins, "cell out of grid");
        y * self.bins + x
    }
    pub fn get(&self, x: usize, y: usize) -> Mass {
        self.cells[self.index(x, y)]
    }
    pub fn set(&mut self, x: usize, y: usize, value: Mass) {
        let i = self.index(x, y);
        self.cells[i] = value;
    }
    pub fn increment(&mut self, x: usize, y: usize) {
        let i = self.index(x, y);
        self.cells[i] += 1.;
    }
    pub fn clear(&mut self) {
        self.cells.fill(0.);
    }
    /// natural log of every positive cell
    pub fn log_scale(&mut self) {
        self.cells
            .iter_mut()
            .filter(|c| **c > 0.)
            .for_each(|c| *c = c.ln());
    }
    pub fn total(&self) -> Mass {
        self.cells.iter().sum()
    }
    /// largest cell value, never below zero
    pub fn max(&self) -> Mass {
        self.cells.iter().copied().fold(0., Mass::max)
    }
    /// scale so the largest cell is 1. no-op on a grid without positive cells.
    pub fn normalize_max(&mut self) {
        let m = self.max();
        if m > 0. {
            self.cells.iter_mut().for_each(|c| *c /= m);
        }
    }
    /// scale so the cells sum to 1. no-op when the total is not positive.
    pub fn normalize_total(&mut self) {
        let t = self.total();
        if t > 0. {
            self.cells.iter_mut().for_each(|c| *c /= t);
        }
    }
    /// every positive cell becomes 1
    pub fn binary(&mut self) {
        self.cells
            .iter_mut()
            .filter(|c| **c > 0.)
            .for_each(|c| *c = 1.);
    }
    /// L1 distance between cell values. grids must have the same shape.
    pub fn simple(&self, other: &Self) -> Distance {
        assert!(self.bins == other.bins, "grid shape mismatch");
        self.cells
            .iter()
            .zip(other.cells.iter())
            .map(|(a, b)| (a - b).abs())
            .sum()
    }

    /// one feature per positive cell, placed at the cell's lower corner
    pub fn signature(&self) -> Signature<Point> {
        let dx = (self.horizontal.1 - self.horizontal.0) / self.bins as f64;
        let dy = (self.vertical.1 - self.vertical.0) / self.bins as f64;
        (0..self.bins)
            .flat_map(|x| (0..self.bins).map(move |y| (x, y)))
            .map(|(x, y)| (x, y, self.get(x, y)))
            .filter(|(_, _, w)| *w > 0.)
            .map(|(x, y, w)| {
                let point = Point {
                    x: x as f64 * dx + self.horizontal.0,
                    y: y as f64 * dy + self.vertical.0,
                };
                (point, w)
            })
            .collect()
    }
    /// EMD-HAT over cell coordinates with Euclidean ground distance.
    pub fn emd(&self, other: &Self) -> Result<Distance, EmdError> {
        let ref lhs = self.signature();
        let ref rhs = other.signature();
        EMDHat::from((lhs, rhs, &Euclidean)).distance()
    }
}

/// one row per y, cells tab-terminated
impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.bins {
            for x in 0..self.bins {
                write!(f, "{}\t", self.get(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Grid {
        Grid::new(4, (0., 4.), (0., 4.))
    }

    #[test]
    fn is_signature_sparse() {
        let mut g = unit();
        g.increment(1, 2);
        g.increment(1, 2);
        g.set(3, 0, 0.5);
        let s = g.signature();
        assert_eq!(s.n(), 2);
        assert_eq!(s.features(), &[Point::from((1., 2.)), Point::from((3., 0.))]);
        assert_eq!(s.weights(), &[2., 0.5]);
        assert_eq!(g.total(), 2.5);
    }
    #[test]
    fn is_log_scale_positive_only() {
        let mut g = unit();
        g.set(0, 0, std::f64::consts::E);
        g.log_scale();
        assert!((g.get(0, 0) - 1.).abs() < 1e-12);
        assert_eq!(g.get(1, 1), 0.);
    }
    #[test]
    fn is_max_over_cells() {
        let mut g = unit();
        assert_eq!(g.max(), 0.);
        g.set(2, 1, 3.);
        g.set(0, 3, 1.5);
        assert_eq!(g.max(), 3.);
    }
    #[test]
    fn is_normalize_max_unit_peak() {
        let mut g = unit();
        g.set(2, 1, 4.);
        g.set(0, 3, 1.);
        g.normalize_max();
        assert_eq!(g.get(2, 1), 1.);
        assert_eq!(g.get(0, 3), 0.25);
        let mut empty = unit();
        empty.normalize_max();
        assert_eq!(empty, unit());
    }
    #[test]
    fn is_normalize_total_unit_mass() {
        let mut g = unit();
        g.set(2, 1, 3.);
        g.set(0, 3, 1.);
        g.normalize_total();
        assert_eq!(g.get(2, 1), 0.75);
        assert_eq!(g.total(), 1.);
        let mut empty = unit();
        empty.normalize_total();
        assert_eq!(empty, unit());
    }
    #[test]
    fn is_binary_positive_cells() {
        let mut g = unit();
        g.set(2, 1, 3.);
        g.set(0, 3, 0.5);
        g.set(1, 1, -2.);
        g.binary();
        assert_eq!(g.get(2, 1), 1.);
        assert_eq!(g.get(0, 3), 1.);
        assert_eq!(g.get(1, 1), -2.);
        assert_eq!(g.total(), 0.);
    }
    #[test]
    fn is_display_tab_separated() {
        let mut g = Grid::new(2, (0., 2.), (0., 2.));
        g.set(1, 0, 2.);
        g.set(0, 1, 0.5);
        assert_eq!(g.to_string(), "0\t2\t\n0.5\t0\t\n");
    }
    #[test]
    fn is_simple_distance_l1() {
        let mut a = unit();
        let mut b = unit();
        a.set(0, 0, 2.);
        b.set(0, 0, 0.5);
        b.set(3, 3, 1.);
        assert_eq!(a.simple(&b), 2.5);
        a.clear();
        assert_eq!(a.total(), 0.);
    }
    #[test]
    fn is_grid_emd_diagonal_move() {
        // one unit moved from (0, 0) to (3, 4) in cell coordinates of width 1
        let mut a = Grid::new(5, (0., 5.), (0., 5.));
        let mut b = Grid::new(5, (0., 5.), (0., 5.));
        a.increment(0, 0);
        b.increment(3, 4);
        let d = a.emd(&b).unwrap();
        assert!((d - 5.).abs() < 1e-9, "{}", d);
    }
    #[test]
    fn is_empty_grid_degenerate() {
        let mut a = unit();
        a.increment(0, 0);
        assert_eq!(a.emd(&unit()), Ok(crate::DEGENERATE));
    }
}
