//! Error types of this crate.

use std::path::PathBuf;
use thiserror::Error;

/// Catch-all error for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when a basis function is requested with an index outside of the range that is
    /// valid for the given degree, for instance `nu > n` for Bernstein polynomials.
    #[error("basis index {nu} is out of range for degree {n}")]
    InvalidBasisIndex {
        /// Degree of the basis.
        n: u32,
        /// Requested index.
        nu: u32,
    },
    /// Returned when an envelope is requested with an unrecognized basis or a negative degree.
    #[error("invalid envelope configuration: {0}")]
    InvalidEnvelopeConfig(String),
    /// Returned when two series with different bin layouts are combined.
    #[error("series with {lhs} bins and series with {rhs} bins do not share the same bin layout")]
    MismatchedSeriesShape {
        /// Number of bins of the left-hand side series.
        lhs: usize,
        /// Number of bins of the right-hand side series.
        rhs: usize,
    },
    /// Returned when a table file could not be parsed.
    #[error("{}:{line}: {reason}", path.display())]
    Table {
        /// Path of the table file.
        path: PathBuf,
        /// One-based line number of the offending line.
        line: usize,
        /// Description of the problem.
        reason: String,
    },
    /// Returned when reading a table fails.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// An error that originates in this crate.
    #[error("{0}")]
    General(String),
}

/// Result type with [`Error`] as error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn messages() {
        assert_eq!(
            Error::InvalidBasisIndex { n: 2, nu: 3 }.to_string(),
            "basis index 3 is out of range for degree 2"
        );
        assert_eq!(
            Error::MismatchedSeriesShape { lhs: 3, rhs: 2 }.to_string(),
            "series with 3 bins and series with 2 bins do not share the same bin layout"
        );
        assert_eq!(
            Error::Table {
                path: PathBuf::from("data/LO_NEW_N2.C.dat"),
                line: 4,
                reason: "expected 5 columns (xlow xmid xhigh val err), found 3".to_owned(),
            }
            .to_string(),
            "data/LO_NEW_N2.C.dat:4: expected 5 columns (xlow xmid xhigh val err), found 3"
        );
        assert_eq!(
            Error::from(io::Error::new(io::ErrorKind::NotFound, "no such file")).to_string(),
            "no such file"
        );
    }
}
