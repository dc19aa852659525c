//! Value types shared between resources

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decode an explicit `null` the same way as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Presentation hints, no effect on validity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Display {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Plugin reference: a kind tag plus configuration owned by the plugin.
///
/// The configuration is kept opaque; its schema is checked elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub spec: Value,
}

impl Plugin {
    pub fn new(kind: &str, spec: Value) -> Self {
        Self {
            kind: kind.to_string(),
            spec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_plugin_fields_decode_to_zero() {
        let plugin: Plugin = serde_json::from_value(json!({})).unwrap();
        assert_eq!(plugin, Plugin::default());
        assert_eq!(plugin.spec, Value::Null);
    }

    #[test]
    fn test_null_fields_decode_to_zero() {
        let plugin: Plugin = serde_json::from_value(json!({"kind": null, "spec": null})).unwrap();
        assert_eq!(plugin, Plugin::default());
    }

    #[test]
    fn test_empty_object_spec_is_not_zero() {
        let plugin: Plugin = serde_json::from_value(json!({"spec": {}})).unwrap();
        assert_ne!(plugin, Plugin::default());
    }

    #[test]
    fn test_display_description_omitted() {
        let display = Display {
            name: "Prometheus".to_string(),
            description: None,
        };
        assert_eq!(
            serde_json::to_value(&display).unwrap(),
            json!({"name": "Prometheus"})
        );
    }
}
