//! Planar alignment curves: lines, circular arcs, clothoid transitions and
//! continuous compositions of them, addressable by arc length.

pub mod error;
pub mod export;
pub mod geometry;
pub mod math;
pub mod tessellation;

pub use error::{CurveError, Result};
