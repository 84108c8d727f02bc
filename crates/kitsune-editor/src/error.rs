use c64_bitplane::SurfaceError;
use c64_palette::ColorError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid grid: {0}")]
    InvalidGrid(&'static str),

    #[error("{field} index {index} is outside the 16-colour palette")]
    InvalidColor { field: &'static str, index: u8 },

    #[error("pixel buffer holds {actual} bytes, {expected} needed")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Color(#[from] ColorError),
}
