use thiserror::Error;

/// Errors surfaced by the cubie, facelet, table and solver layers.
#[derive(Error, Debug)]
pub enum Error {
    /// `verify()` found a cube state that violates a group invariant. The
    /// string names the specific invariant that failed.
    #[error("cube verification failed: {0}")]
    CubeVerificationFailed(String),

    /// `search`/`search_best` exceeded its deadline before finding a result.
    #[error("solving timed out")]
    SolvingTimeout,

    /// A facelet string was not exactly 54 characters long.
    #[error("invalid facelet string length: expected 54, got {0}")]
    FaceletInvalidLength(usize),

    /// A facelet string contained a character outside {U,R,F,D,L,B}.
    #[error("invalid facelet character {0:?} at index {1}")]
    FaceletInvalidCharacter(char, usize),

    /// A scramble/solution token did not parse as a move.
    #[error("invalid move token: {0}")]
    InvalidScramble(String),

    /// A JSON table file was missing or had mistyped fields, or a binary
    /// table file was truncated.
    #[error("table data is invalid or incomplete")]
    TablesLoadInvalidData,

    /// I/O failure while reading a table file from disk.
    #[error("failed to load tables: {0}")]
    TablesLoadFailed(#[from] std::io::Error),

    /// I/O failure while writing a table file to disk. Distinguished from
    /// `TablesLoadFailed` even though both wrap `std::io::Error`, so callers
    /// building tables know an I/O error happened on the save path and not
    /// while reading a would-be cache.
    #[error("failed to save tables: {0}")]
    TablesSaveFailed(TableSaveIoError),

    #[error(transparent)]
    Encode(#[from] bincode::error::EncodeError),

    #[error(transparent)]
    Decode(#[from] bincode::error::DecodeError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Newtype so `TablesSaveFailed` can carry an `io::Error` without colliding
/// with the blanket `#[from] std::io::Error` on `TablesLoadFailed`.
#[derive(Debug)]
pub struct TableSaveIoError(pub std::io::Error);

impl std::fmt::Display for TableSaveIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reasons `CubieCube::verify` can reject a cube, matching spec's named
/// invariant-violation kinds. Converts into `Error::CubeVerificationFailed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    NotAllEdgesUnique,
    NotAllCornersUnique,
    EdgeOrientationInvalid,
    CornerOrientationInvalid,
    ParityMismatch,
}

impl VerifyError {
    pub fn reason(self) -> &'static str {
        match self {
            VerifyError::NotAllEdgesUnique => "not_all_edges_unique",
            VerifyError::NotAllCornersUnique => "not_all_corners_unique",
            VerifyError::EdgeOrientationInvalid => "edge_orientation_invalid",
            VerifyError::CornerOrientationInvalid => "corner_orientation_invalid",
            VerifyError::ParityMismatch => "parity_mismatch",
        }
    }
}

impl From<VerifyError> for Error {
    fn from(value: VerifyError) -> Self {
        Error::CubeVerificationFailed(value.reason().to_string())
    }
}
