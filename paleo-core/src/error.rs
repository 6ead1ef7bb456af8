//! Error-handling module for the crate

use thiserror::Error;

/// Error-Collection for all the possible Errors occurring in this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Value was requested at a position outside of the column
    #[error("Index {index} is out of range for a column with {row_count} rows")]
    IndexOutOfRange {
        /// The requested position
        index: usize,
        /// Number of rows of the column
        row_count: usize,
    },
    /// A column (or the description of one) was requested under the wrong column type
    #[error("Column \"{name}\" has type `{found}` but was requested as `{expected}`")]
    TypeMismatch {
        /// Name of the column
        name: String,
        /// Type name the caller asked for
        expected: String,
        /// Type name the column actually has
        found: String,
    },
}

impl Error {
    /// Checks that `index` is a valid position in a column of `row_count` rows.
    pub(crate) fn check_index(index: usize, row_count: usize) -> Result<(), Error> {
        if index < row_count {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { index, row_count })
        }
    }
}
