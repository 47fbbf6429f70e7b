pub mod feature;
pub use feature::*;

pub mod ground;
pub use ground::*;

pub mod grid;
pub use grid::*;

pub mod histogram;
pub use histogram::*;

pub mod signature;
pub use signature::*;
