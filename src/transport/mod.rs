//! Abstract vocabulary of the transportation problem.
//!
//! - [`Support`]: anything that can be a feature of a signature
//! - [`Measure`]: ground distance between two supports
//! - [`Density`]: weighted support, i.e. a signature
//!
//! The engine in [`crate::emd`] is written against these traits only, so any
//! feature type and ground distance can be plugged in at the call site.
mod density;
mod measure;
mod support;

pub use density::*;
pub use measure::*;
pub use support::*;
