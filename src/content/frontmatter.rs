//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<ScalarString>()? {
                vec.push(item.0);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// A YAML scalar of any type, kept as its textual form.
///
/// `date: 2024` or `title: 404` are valid YAML but not strings.
struct ScalarString(String);

impl<'de> Deserialize<'de> for ScalarString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = ScalarString;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(ScalarString(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(ScalarString(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ScalarString>::deserialize(deserializer)?.map(|s| s.0))
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "optional_scalar")]
    pub title: Option<String>,
    #[serde(deserialize_with = "optional_scalar")]
    pub date: Option<String>,
    #[serde(deserialize_with = "optional_scalar")]
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "optional_scalar")]
    pub category: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Never fails: a missing block yields the defaults and the whole input,
    /// an unparsable block yields the defaults and the text after the block.
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.trim_start();

        if !content.starts_with("---") {
            return (FrontMatter::default(), content);
        }

        let rest = &content[3..]; // Skip opening ---
        let rest = rest.trim_start_matches(['\n', '\r']);

        // Empty block: the closing --- follows the opening one directly
        if let Some(after) = rest.strip_prefix("---") {
            if after.is_empty() || after.starts_with(['\n', '\r']) {
                return (FrontMatter::default(), after.trim_start_matches(['\n', '\r']));
            }
        }

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return (FrontMatter::default(), content);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..]; // Skip \n---
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        // A horizontal rule followed by prose is not front-matter
        if !looks_like_yaml(yaml_content) {
            return (FrontMatter::default(), content);
        }

        let mapping = match serde_yaml::from_str::<serde_yaml::Value>(yaml_content) {
            Ok(serde_yaml::Value::Mapping(mapping)) => mapping,
            Ok(_) => {
                tracing::warn!("Front-matter is not a mapping, using defaults");
                return (FrontMatter::default(), remaining);
            }
            Err(e) => {
                tracing::warn!("Failed to parse YAML front-matter, using defaults: {}", e);
                return (FrontMatter::default(), remaining);
            }
        };

        (FrontMatter::from_mapping(mapping), remaining)
    }

    /// Pick known fields out of a parsed mapping one at a time, so a field
    /// with the wrong shape falls back to its default without losing the rest.
    fn from_mapping(mapping: serde_yaml::Mapping) -> Self {
        let mut fm = FrontMatter::default();

        for (key, value) in mapping {
            let key = match key {
                serde_yaml::Value::String(key) => key,
                other => {
                    tracing::warn!("Ignoring front-matter key that is not a string: {:?}", other);
                    continue;
                }
            };

            match key.as_str() {
                "title" => fm.title = scalar_field(&key, value),
                "date" => fm.date = scalar_field(&key, value),
                "description" => fm.description = scalar_field(&key, value),
                "category" => fm.category = scalar_field(&key, value),
                "tags" => {
                    fm.tags = string_or_vec(value).unwrap_or_else(|e| {
                        tracing::warn!("Invalid front-matter field `tags`, using []: {}", e);
                        Vec::new()
                    })
                }
                _ => {
                    fm.extra.insert(key.clone(), value);
                }
            }
        }

        fm
    }
}

fn scalar_field(key: &str, value: serde_yaml::Value) -> Option<String> {
    optional_scalar(value).unwrap_or_else(|e| {
        tracing::warn!("Invalid front-matter field `{}`, ignoring it: {}", key, e);
        None
    })
}

/// At least one line must have the `key: value` shape
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        if !is_valid_key {
            return false;
        }
        let after_colon = &trimmed[colon_pos + 1..];
        after_colon.is_empty() || after_colon.starts_with(' ')
    })
}
