use crate::error::{Result, SeedError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Sentinel fixture value replaced by a fresh v4 UUID.
pub const DEFAULT_PLACEHOLDER: &str = ":UUIDv4";

/// Generator settings, usually read from a `seedbed.yaml` next to the fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub placeholder: String,
    pub hash_passwords: bool,
    /// Explicit foreign-key column per relationship, keyed `"<parent>.<child>"`.
    pub foreign_keys: HashMap<String, String>,
    pub field_order: FieldOrder,
}

/// How scalar fields of one mapping are ordered on the row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrder {
    /// Keep the order the decoder yields, which is document order for YAML.
    #[default]
    Document,
    Sorted,
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            hash_passwords: true,
            foreign_keys: HashMap::new(),
            field_order: FieldOrder::Document,
        }
    }
}

impl SeedConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: SeedConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.placeholder.is_empty() {
            return Err(SeedError::Config("placeholder must not be empty".into()));
        }
        for (relationship, column) in &self.foreign_keys {
            let valid = relationship
                .split_once('.')
                .map(|(parent, child)| !parent.is_empty() && !child.is_empty())
                .unwrap_or(false);
            if !valid {
                return Err(SeedError::Config(format!(
                    "foreign key '{relationship}' must be written as <parent>.<child>"
                )));
            }
            if column.is_empty() {
                return Err(SeedError::Config(format!(
                    "foreign key '{relationship}' has an empty column name"
                )));
            }
        }
        Ok(())
    }

    /// Foreign-key column for rows of `child` nested under `parent`.
    ///
    /// Without an explicit entry the parent name loses its last character and
    /// gains `_id` (`users` -> `user_id`). That only works for plain English plurals.
    pub fn foreign_key_column(&self, parent: &str, child: &str) -> String {
        if let Some(column) = self.foreign_keys.get(&format!("{parent}.{child}")) {
            return column.clone();
        }
        let mut singular = parent.to_string();
        singular.pop();
        format!("{singular}_id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SeedConfig::default();
        assert_eq!(config.placeholder, ":UUIDv4");
        assert!(config.hash_passwords);
        assert_eq!(config.field_order, FieldOrder::Document);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = SeedConfig::from_yaml_str("hash_passwords: false").unwrap();
        assert!(!config.hash_passwords);
        assert_eq!(config.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_full_yaml() {
        let config = SeedConfig::from_yaml_str(
            r#"
placeholder: "@uuid"
field_order: sorted
foreign_keys:
  users.posts: author_id
"#,
        )
        .unwrap();
        assert_eq!(config.placeholder, "@uuid");
        assert_eq!(config.field_order, FieldOrder::Sorted);
        assert_eq!(config.foreign_key_column("users", "posts"), "author_id");
    }

    #[test]
    fn test_truncation_rule() {
        let config = SeedConfig::default();
        assert_eq!(config.foreign_key_column("users", "posts"), "user_id");
        assert_eq!(config.foreign_key_column("comments", "likes"), "comment_id");
        assert_eq!(config.foreign_key_column("x", "y"), "_id");
    }

    #[test]
    fn test_rejects_malformed_relationship() {
        let err = SeedConfig::from_yaml_str("foreign_keys:\n  posts: author_id").unwrap_err();
        assert!(err.to_string().contains("<parent>.<child>"));
    }

    #[test]
    fn test_rejects_empty_placeholder() {
        assert!(SeedConfig::from_yaml_str("placeholder: ''").is_err());
    }

    #[test]
    fn test_from_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("seedbed.yaml");
        std::fs::write(&path, "placeholder: '#id'").unwrap();
        assert_eq!(SeedConfig::from_path(&path).unwrap().placeholder, "#id");
    }
}
