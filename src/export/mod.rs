//! Debug export of sampled curves for visual inspection.

mod obj;

pub use obj::ObjWriter;
