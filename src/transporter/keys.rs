//! Tag/field key partition.

use std::sync::Arc;

use crate::log_record::attr;

use super::ConfigError;

/// Attributes sent as tags when no key lists are configured.
pub const DEFAULT_TAG_KEYS: [&str; 11] = [
    attr::FILE_NAME,
    attr::FILE_PATH,
    attr::FULL_FILE_PATH,
    attr::FUNCTION_NAME,
    attr::HOSTNAME,
    attr::INSTANCE_NAME,
    attr::LOG_LEVEL,
    attr::LOGGER_NAME,
    attr::METHOD_NAME,
    attr::REQUEST_ID,
    attr::TYPE_NAME,
];

/// Attributes sent as fields when no key lists are configured.
pub const DEFAULT_FIELD_KEYS: [&str; 5] = [
    attr::ARGUMENTS_ARRAY,
    attr::COLUMN_NUMBER,
    attr::IS_CONSTRUCTOR,
    attr::LINE_NUMBER,
    attr::LOG_LEVEL_ID,
];

/// Two disjoint, frozen lists of attribute names.
///
/// Cloning is cheap; the lists are shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySet {
    tag_keys: Arc<[String]>,
    field_keys: Arc<[String]>,
}

impl KeySet {
    /// Build a key set, rejecting any name that appears in both lists.
    ///
    /// The error names the first tag key, in `tag_keys` order, that is also a
    /// field key.
    pub fn new(tag_keys: Vec<String>, field_keys: Vec<String>) -> Result<Self, ConfigError> {
        if let Some(dup) = tag_keys.iter().find(|k| field_keys.contains(*k)) {
            return Err(ConfigError::DuplicateKey(dup.clone()));
        }
        Ok(Self {
            tag_keys: tag_keys.into(),
            field_keys: field_keys.into(),
        })
    }

    /// Resolve optional configured lists: both or neither must be present.
    pub fn resolve(
        tag_keys: Option<Vec<String>>,
        field_keys: Option<Vec<String>>,
    ) -> Result<Self, ConfigError> {
        match (tag_keys, field_keys) {
            (None, None) => Ok(Self::default()),
            (Some(_), None) => Err(ConfigError::MissingFieldKeys),
            (None, Some(_)) => Err(ConfigError::MissingTagKeys),
            (Some(tags), Some(fields)) => Self::new(tags, fields),
        }
    }

    pub fn tag_keys(&self) -> &[String] {
        &self.tag_keys
    }

    pub fn field_keys(&self) -> &[String] {
        &self.field_keys
    }
}

impl Default for KeySet {
    fn default() -> Self {
        Self {
            tag_keys: DEFAULT_TAG_KEYS.iter().map(|k| k.to_string()).collect(),
            field_keys: DEFAULT_FIELD_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn owned(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[rstest]
    fn defaults_are_disjoint() {
        let keys = KeySet::default();
        assert!(keys.tag_keys().iter().all(|k| !keys.field_keys().contains(k)));
        assert_eq!(keys.tag_keys().len(), 11);
        assert_eq!(keys.field_keys().len(), 5);
    }

    #[rstest]
    fn duplicate_names_the_first_shared_tag_key() {
        let err = KeySet::new(
            owned(&["hostname", "lineNumber", "columnNumber"]),
            owned(&["columnNumber", "lineNumber"]),
        )
        .expect_err("overlap must fail");
        assert!(matches!(err, ConfigError::DuplicateKey(ref k) if k == "lineNumber"));
        assert_eq!(
            err.to_string(),
            "keys cannot be both tags and fields (duplicated: lineNumber)"
        );
    }

    #[rstest]
    #[case(Some(owned(&["columnNumber"])), None, "field keys")]
    #[case(None, Some(owned(&["columnNumber"])), "tag keys")]
    fn lists_must_be_supplied_together(
        #[case] tags: Option<Vec<String>>,
        #[case] fields: Option<Vec<String>>,
        #[case] missing: &str,
    ) {
        let err = KeySet::resolve(tags, fields).expect_err("half a key set must fail");
        assert!(err.to_string().contains(&format!("without {missing}")), "{err}");
    }

    #[rstest]
    fn neither_list_uses_defaults() {
        assert_eq!(KeySet::resolve(None, None).expect("defaults"), KeySet::default());
    }
}
