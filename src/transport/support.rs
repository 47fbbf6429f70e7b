/// marker trait for any type that can
/// be interpreted as a feature of a weighted distribution.
///
/// currently implemented by
/// - Bin   , 1-D histogram index, paired with Absolute
/// - Point , 2-D coordinate,      paired with Euclidean
/// - usize , row/column index,    paired with Matrix
pub trait Support: Clone {}

impl Support for usize {}
