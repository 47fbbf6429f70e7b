use crate::transport::Support;
use serde::Deserialize;
use serde::Serialize;

/// index of a bin in a one-dimensional histogram.
#[derive(Debug, Default, Copy, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bin(pub usize);

impl Support for Bin {}

impl From<usize> for Bin {
    fn from(i: usize) -> Self {
        Self(i)
    }
}
impl From<Bin> for usize {
    fn from(bin: Bin) -> Self {
        bin.0
    }
}

/// coordinate of a cell in a two-dimensional histogram.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Support for Point {}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
