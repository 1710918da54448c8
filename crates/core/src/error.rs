use core::fmt::{Display, Formatter, Result};

/// Error returned by the bounded analyses of a relation schema.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Candidate-key search would enumerate the power set of more attributes
    /// than allowed.
    SearchSpaceTooLarge { attributes: usize, limit: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::SearchSpaceTooLarge { attributes, limit } => write!(
                f,
                "candidate key search over {attributes} attributes exceeds the limit of {limit}"
            ),
        }
    }
}

impl core::error::Error for Error {}
