use thiserror::Error;

/// Which of the two datasets a load failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Statistics,
    Geometry,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Statistics => f.write_str("statistics"),
            SourceKind::Geometry => f.write_str("geometry"),
        }
    }
}

/// Library error.
///
/// Lookup misses are not errors: see `resolve::Resolution::NotFound`.
#[derive(Debug, Error)]
pub enum Error {
    /// Either source could not be fetched or parsed. Fatal for the session.
    #[error("{kind} data unavailable from {location}: {reason}")]
    DataUnavailable {
        kind: SourceKind,
        location: String,
        reason: String,
    },
    /// Text that does not name one of the fixed population years.
    #[error("invalid year label: {0:?}")]
    InvalidYear(String),
    #[error("config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
