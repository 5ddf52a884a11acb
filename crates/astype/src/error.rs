use std::fmt;

/// A dtype alias that is not in the registry.
///
/// Raised both for names that were never supported (`"np.int"`) and for
/// names gated out by an old host release (`"torch.bool"` below 1.3.0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtypeParseError {
    alias: Option<String>,
}

impl DtypeParseError {
    pub fn new(alias: impl Into<String>) -> Self {
        DtypeParseError {
            alias: Some(alias.into()),
        }
    }

    /// An error with no offending alias attached.
    pub fn unnamed() -> Self {
        DtypeParseError { alias: None }
    }

    /// The string that failed to resolve, if one was supplied.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

impl fmt::Display for DtypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "Unrecognized dtype: {alias}"),
            None => write!(f, "Unrecognized dtype"),
        }
    }
}

impl std::error::Error for DtypeParseError {}

/// Errors returned by the conversion facade.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] DtypeParseError),

    /// The dtype specifier was neither a dtype identifier nor a string.
    #[error("expected a dtype or a dtype alias string, got {found}")]
    InvalidSpec { found: &'static str },

    /// The host library failed while casting.
    #[error(transparent)]
    Tensor(#[from] astype_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
