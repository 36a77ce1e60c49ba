use thiserror::Error;

/// Top-level error type for alignment curve operations.
#[derive(Debug, Error)]
pub enum CurveError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("numeric domain error: {0}")]
    NumericDomain(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised while chaining curves into a composed curve.
#[derive(Debug, Error)]
pub enum CompositionError {
    #[error("composed curve needs at least one segment")]
    Empty,

    #[error("segment {index} does not start where the previous one ends (gap {gap})")]
    Discontinuity { index: usize, gap: f64 },
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Errors related to the debug exporter.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`CurveError`].
pub type Result<T> = std::result::Result<T, CurveError>;
