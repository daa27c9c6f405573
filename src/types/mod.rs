//! Common types used throughout the tree.

mod node_id;

pub use node_id::NodeId;

use crate::error::{Result, TreeError};
use serde::{Deserialize, Serialize};

/// Smallest minimum degree a B-tree can be built with
pub const MIN_DEGREE: usize = 2;

/// Default minimum degree (a 2-3-4 tree, small enough to read when printed)
pub const DEFAULT_MIN_DEGREE: usize = 2;

/// Tree configuration.
///
/// Every non-root node holds between `t - 1` and `2t - 1` keys, where `t` is
/// the minimum degree. Degrees below [`MIN_DEGREE`] are rejected by
/// [`TreeConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeConfig {
    /// Minimum degree `t`
    pub min_degree: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            min_degree: DEFAULT_MIN_DEGREE,
        }
    }
}

impl TreeConfig {
    /// Create a config with the given minimum degree
    pub fn new(min_degree: usize) -> Self {
        Self { min_degree }
    }

    /// Maximum number of keys in any node (`2t - 1`)
    pub fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// Minimum number of keys in a non-root node (`t - 1`)
    pub fn min_keys(&self) -> usize {
        self.min_degree - 1
    }

    /// Maximum number of children of an internal node (`2t`)
    pub fn max_children(&self) -> usize {
        2 * self.min_degree
    }

    /// Reject degrees the split/merge arithmetic cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.min_degree < MIN_DEGREE {
            return Err(TreeError::InvalidDegree {
                degree: self.min_degree,
                min: MIN_DEGREE,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_bounds() {
        let config = TreeConfig::new(3);
        assert_eq!(config.max_keys(), 5);
        assert_eq!(config.min_keys(), 2);
        assert_eq!(config.max_children(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_small_degree() {
        assert_eq!(
            TreeConfig::new(1).validate(),
            Err(TreeError::InvalidDegree { degree: 1, min: 2 })
        );
        assert!(TreeConfig::new(0).validate().is_err());
        assert!(TreeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_serde_camel_case() {
        let json = serde_json::to_string(&TreeConfig::new(4)).unwrap();
        assert_eq!(json, r#"{"minDegree":4}"#);

        let parsed: TreeConfig = serde_json::from_str(r#"{"minDegree":5}"#).unwrap();
        assert_eq!(parsed, TreeConfig::new(5));
    }
}
