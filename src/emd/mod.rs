pub mod error;
pub use error::*;

pub mod hat;
pub use hat::*;

pub mod network;
pub use network::*;

pub mod penalty;
pub use penalty::*;

pub mod quantize;
pub use quantize::*;

pub mod solver;
pub use solver::*;
