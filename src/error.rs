use derive_more::Display;

pub type Result<T> = core::result::Result<T, TerrainError>;

#[derive(Debug, Display)]
pub enum TerrainError {
    /// The field has zero dynamic range, so it cannot be rescaled to `[0, 1]`.
    #[display("degenerate field: every cell equals {value}")]
    DegenerateField { value: f32 },

    /// The lookup image has zero rows or zero columns.
    #[display("invalid lookup image: {rows}x{cols}")]
    InvalidLut { rows: usize, cols: usize },

    /// Two grids that must be index-aligned have different `(rows, cols)`.
    #[display("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[display("scalar field has no cells")]
    EmptyField,

    #[display("invalid blur sigma {sigma}, expected a value in (0, 4096]")]
    InvalidSigma { sigma: f32 },

    #[display("non-finite value at ({row}, {col})")]
    NonFiniteValue { row: usize, col: usize },

    #[display("invalid colorscale: {reason}")]
    InvalidColorscale { reason: &'static str },

    #[display("could not parse value at ({row}, {col})")]
    ParseValue { row: usize, col: usize },

    #[display("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[display("{_0}")]
    Layout(ndarray::ShapeError),
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Layout(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ndarray::ShapeError> for TerrainError {
    fn from(err: ndarray::ShapeError) -> Self {
        TerrainError::Layout(err)
    }
}
