use serde::Serialize;
use serde_json::Value;
use std::{collections::BTreeMap, fs, io, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dictionary root must be an object")]
    RootNotObject,

    #[error("unsupported value at {path:?}: only strings and objects are allowed")]
    InvalidValue { path: String },
}

/// A translation tree: string leaves under arbitrarily nested maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Dictionary {
    Leaf(String),
    Node(BTreeMap<String, Dictionary>),
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::Node(BTreeMap::new())
    }
}

impl Dictionary {
    /// Parse a JSON document whose root is an object.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed, the root is not an object, or
    /// any value is something other than a string or an object.
    pub fn from_json_str(src: &str) -> Result<Self, DictionaryError> {
        let value: Value = serde_json::from_str(src)?;
        if !value.is_object() {
            return Err(DictionaryError::RootNotObject);
        }
        Self::from_value(value, "")
    }

    /// Read and parse a JSON dictionary file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid dictionary.
    pub fn from_path(path: &Path) -> Result<Self, DictionaryError> {
        let src = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&src)
    }

    fn from_value(value: Value, path: &str) -> Result<Self, DictionaryError> {
        match value {
            Value::String(leaf) => Ok(Self::Leaf(leaf)),
            Value::Object(map) => {
                let mut node = BTreeMap::new();
                for (segment, child) in map {
                    let child_path = if path.is_empty() {
                        segment.clone()
                    } else {
                        format!("{path}.{segment}")
                    };
                    node.insert(segment, Self::from_value(child, &child_path)?);
                }
                Ok(Self::Node(node))
            }
            _ => Err(DictionaryError::InvalidValue {
                path: path.to_string(),
            }),
        }
    }

    /// Walk a dotted key down the tree.
    ///
    /// Returns `None` when a segment is missing, when a leaf is reached before
    /// the key is exhausted, or when the key ends on a node.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(self, |node, segment| match node {
                Self::Node(children) => children.get(segment),
                Self::Leaf(_) => None,
            })
            .and_then(|node| match node {
                Self::Leaf(value) => Some(value.as_str()),
                Self::Node(_) => None,
            })
    }

    /// Dotted keys of every leaf, in lexical order.
    #[must_use]
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.collect_keys("", &mut keys);
        keys
    }

    fn collect_keys(&self, prefix: &str, keys: &mut Vec<String>) {
        match self {
            Self::Leaf(_) => keys.push(prefix.to_string()),
            Self::Node(children) => {
                for (segment, child) in children {
                    let path = if prefix.is_empty() {
                        segment.clone()
                    } else {
                        format!("{prefix}.{segment}")
                    };
                    child.collect_keys(&path, keys);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "auth": {
            "signIn": "Sign In",
            "errors": { "missingFields": "All fields are required" }
        },
        "title": "SkillSwap"
    }"#;

    #[test]
    fn test_lookup_leaf() {
        let dict = Dictionary::from_json_str(SAMPLE).unwrap();
        assert_eq!(dict.lookup("auth.signIn"), Some("Sign In"));
        assert_eq!(
            dict.lookup("auth.errors.missingFields"),
            Some("All fields are required")
        );
        assert_eq!(dict.lookup("title"), Some("SkillSwap"));
    }

    #[test]
    fn test_lookup_node_is_not_a_translation() {
        let dict = Dictionary::from_json_str(SAMPLE).unwrap();
        assert_eq!(dict.lookup("auth"), None);
        assert_eq!(dict.lookup("auth.errors"), None);
    }

    #[test]
    fn test_lookup_missing_paths() {
        let dict = Dictionary::from_json_str(SAMPLE).unwrap();
        assert_eq!(dict.lookup("auth.signOut"), None);
        assert_eq!(dict.lookup("title.extra"), None);
        assert_eq!(dict.lookup(""), None);
        assert_eq!(dict.lookup("auth..signIn"), None);
    }

    #[test]
    fn test_empty_segment_key_can_exist() {
        let dict = Dictionary::from_json_str(r#"{ "": "blank" }"#).unwrap();
        assert_eq!(dict.lookup(""), Some("blank"));
    }

    #[test]
    fn test_leaf_keys() {
        let dict = Dictionary::from_json_str(SAMPLE).unwrap();
        assert_eq!(
            dict.leaf_keys(),
            vec!["auth.errors.missingFields", "auth.signIn", "title"]
        );
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert!(matches!(
            Dictionary::from_json_str(r#""just a string""#),
            Err(DictionaryError::RootNotObject)
        ));
        assert!(matches!(
            Dictionary::from_json_str("[]"),
            Err(DictionaryError::RootNotObject)
        ));
    }

    #[test]
    fn test_rejects_non_string_leaves() {
        match Dictionary::from_json_str(r#"{ "auth": { "retries": 3 } }"#) {
            Err(DictionaryError::InvalidValue { path }) => assert_eq!(path, "auth.retries"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(Dictionary::from_json_str(r#"{ "a": null }"#).is_err());
        assert!(Dictionary::from_json_str(r#"{ "a": ["x"] }"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Dictionary::from_json_str("{ \"a\": "),
            Err(DictionaryError::Json(_))
        ));
    }

    #[test]
    fn test_serializes_back_to_nested_json() {
        let dict = Dictionary::from_json_str(SAMPLE).unwrap();
        let value = serde_json::to_value(&dict).unwrap();
        assert_eq!(value["auth"]["signIn"], "Sign In");
        assert_eq!(value["title"], "SkillSwap");
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Dictionary::from_path(Path::new("/nonexistent/skillswap/tr.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/skillswap/tr.json"));
    }
}
