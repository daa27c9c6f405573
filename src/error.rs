//! Error types for the tree.

use thiserror::Error;

/// Result type alias for tree operations
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors surfaced at the tree's call boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No key equivalent to the requested one is stored in the tree
    #[error("Key not found")]
    KeyNotFound,

    /// Minimum degree below the smallest value a B-tree can be built with
    #[error("Invalid minimum degree {degree} (must be at least {min})")]
    InvalidDegree { degree: usize, min: usize },

    /// A structural invariant does not hold (reported by verification)
    #[error("Corruption detected: {0}")]
    Corruption(String),
}

impl TreeError {
    /// Create a corruption error with a message
    pub fn corruption(msg: impl Into<String>) -> Self {
        Self::Corruption(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(TreeError::KeyNotFound.to_string(), "Key not found");
        assert_eq!(
            TreeError::InvalidDegree { degree: 1, min: 2 }.to_string(),
            "Invalid minimum degree 1 (must be at least 2)"
        );
        assert_eq!(
            TreeError::corruption("leaf depth mismatch").to_string(),
            "Corruption detected: leaf depth mismatch"
        );
    }
}
