//! `--node-label` parsing.

use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

/// Parse `KEY=VALUE` node labels.
///
/// Each argument may hold several comma-separated pairs. Whitespace around
/// pairs is trimmed, empty items are skipped, and the first `=` splits key
/// from value. Later duplicates win.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for an item without `=`, an empty
/// key, or a key with characters Kubernetes does not allow.
pub fn parse_node_labels<S: AsRef<str>>(raw: &[S]) -> Result<BTreeMap<String, String>> {
    let mut labels = BTreeMap::new();

    for item in raw.iter().flat_map(|arg| arg.as_ref().split(',')) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        let Some((key, value)) = item.split_once('=') else {
            return Err(invalid(item, "expected KEY=VALUE"));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(invalid(item, "key cannot be empty"));
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
        {
            return Err(invalid(item, "key may only contain [A-Za-z0-9._/-]"));
        }

        labels.insert(key.to_string(), value.trim().to_string());
    }

    Ok(labels)
}

fn invalid(item: &str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field: "node-label",
        reason: format!("invalid label format '{item}': {reason}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_input_yields_no_labels() {
        let none: [&str; 0] = [];
        assert!(parse_node_labels(&none).unwrap().is_empty());
    }

    #[test]
    fn parses_repeated_and_comma_separated() {
        let parsed = parse_node_labels(&["key1=value1,key2=value2", "key3=value3"]).unwrap();
        assert_eq!(
            parsed,
            labels(&[("key1", "value1"), ("key2", "value2"), ("key3", "value3")])
        );
    }

    #[test]
    fn trims_whitespace_and_skips_empty_items() {
        let parsed = parse_node_labels(&["key1=value1 , ,, key2=value2"]).unwrap();
        assert_eq!(parsed, labels(&[("key1", "value1"), ("key2", "value2")]));
    }

    #[test]
    fn keeps_equals_signs_in_values() {
        let parsed = parse_node_labels(&["key=value=with=equals"]).unwrap();
        assert_eq!(parsed, labels(&[("key", "value=with=equals")]));
    }

    #[test]
    fn rejects_malformed_items() {
        for bad in ["invalid", "=value", "bad key=value"] {
            let err = parse_node_labels(&[bad]).unwrap_err();
            assert!(
                err.to_string().contains("invalid label format"),
                "{bad}: {err}"
            );
        }
    }
}
