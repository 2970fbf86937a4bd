//! Error type for tree operations.
//!
//! Absence of a key is never an error: lookups and removals report it
//! through `Option`. The variants here are the genuine failures an insert
//! can surface, and an insert that fails leaves the tree untouched.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// Reserving the owned key buffer failed; no tree state was mutated.
    AllocationFailure,
    /// The key contains the reserved terminator byte and cannot be stored.
    InvalidKey,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::AllocationFailure => write!(f, "allocation failure"),
            TreeError::InvalidKey => {
                write!(f, "key contains the reserved terminator byte")
            }
        }
    }
}

impl std::error::Error for TreeError {}
