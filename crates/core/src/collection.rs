use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Host used for the `HOST:` header when the collection defines no
/// `domain` variable.
pub const DEFAULT_DOMAIN: &str = "http://localhost";

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("invalid collection JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Nested metadata block (`info`) carried by v2 collection exports.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One `{key, value}` pair from the top-level `variable` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Variable {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Request URL. Exports carry either an object with `path` segments, a
/// raw string, or occasionally something else entirely; only the object
/// form can be grouped into a resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Url {
    Detailed {
        #[serde(default)]
        path: Vec<String>,
    },
    Raw(String),
    Other(serde_json::Value),
}

impl Url {
    /// Join the `path` segments with `/`. Anything without a non-empty
    /// segment list is unresolvable.
    pub fn resource_path(&self) -> Option<String> {
        match self {
            Url::Detailed { path } if !path.is_empty() => Some(path.join("/")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub raw: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub url: Option<Url>,
    #[serde(default)]
    pub body: Option<RequestBody>,
}

/// A node in the collection tree. Folders carry child items; leaf items
/// carry a request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "item")]
    pub children: Vec<Item>,
    #[serde(default)]
    pub request: Option<Request>,
}

impl Item {
    /// Folders are items without a request of their own.
    pub fn is_folder(&self) -> bool {
        self.request.is_none()
    }
}

/// The root collection document.
///
/// Every field is optional in the wild; absent fields default rather
/// than fail, so the only fatal condition is JSON that does not parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub info: Option<Info>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "variable")]
    pub variables: Vec<Variable>,
    #[serde(default, rename = "item")]
    pub items: Vec<Item>,
}

impl Collection {
    /// Parse a collection export from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CollectionError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Collection variables as a lookup map. Later duplicates overwrite
    /// earlier ones.
    pub fn variable_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for variable in &self.variables {
            if let (Some(key), Some(value)) = (&variable.key, &variable.value) {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }

    /// Base host for the `HOST:` header line, from the `domain`
    /// variable.
    pub fn domain(&self) -> String {
        self.variable_map()
            .get("domain")
            .cloned()
            .unwrap_or_else(|| DEFAULT_DOMAIN.to_string())
    }

    /// Document title: `info.name` for v2 exports, the top-level `name`
    /// otherwise.
    pub fn title(&self) -> &str {
        self.info
            .as_ref()
            .and_then(|info| info.name.as_deref())
            .or(self.name.as_deref())
            .unwrap_or("")
    }

    /// Document description, from `info` or the top level.
    pub fn description_text(&self) -> &str {
        self.info
            .as_ref()
            .and_then(|info| info.description.as_deref())
            .or(self.description.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_minimal() {
        let collection = Collection::from_json("{}").unwrap();
        assert_eq!(collection.title(), "");
        assert_eq!(collection.description_text(), "");
        assert_eq!(collection.domain(), DEFAULT_DOMAIN);
        assert!(collection.items.is_empty());
        assert!(collection.variables.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(Collection::from_json("not json").is_err());
        assert!(Collection::from_json("").is_err());
    }

    #[test]
    fn test_title_prefers_info_name() {
        let json = r#"{"info": {"name": "Orders API"}, "name": "legacy"}"#;
        let collection = Collection::from_json(json).unwrap();
        assert_eq!(collection.title(), "Orders API");
    }

    #[test]
    fn test_title_falls_back_to_top_level_name() {
        let json = r#"{"name": "Orders API"}"#;
        let collection = Collection::from_json(json).unwrap();
        assert_eq!(collection.title(), "Orders API");
    }

    #[test]
    fn test_description_from_top_level() {
        let json = r#"{"description": "All the endpoints."}"#;
        let collection = Collection::from_json(json).unwrap();
        assert_eq!(collection.description_text(), "All the endpoints.");
    }

    #[test]
    fn test_variable_map_last_wins() {
        let json = r#"{
            "variable": [
                {"key": "domain", "value": "http://first"},
                {"key": "token", "value": "abc"},
                {"key": "domain", "value": "http://second"}
            ]
        }"#;
        let collection = Collection::from_json(json).unwrap();
        let map = collection.variable_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("domain").map(String::as_str), Some("http://second"));
        assert_eq!(collection.domain(), "http://second");
    }

    #[test]
    fn test_variable_missing_key_or_value_is_ignored() {
        let json = r#"{"variable": [{"key": "domain"}, {"value": "orphan"}]}"#;
        let collection = Collection::from_json(json).unwrap();
        assert!(collection.variable_map().is_empty());
        assert_eq!(collection.domain(), DEFAULT_DOMAIN);
    }

    #[test]
    fn test_item_tree_order_preserved() {
        let json = r#"{
            "item": [
                {"name": "Users", "item": [{"name": "List", "request": {"method": "GET"}}]},
                {"name": "Orders", "item": []}
            ]
        }"#;
        let collection = Collection::from_json(json).unwrap();
        assert_eq!(collection.items.len(), 2);
        assert_eq!(collection.items[0].name, "Users");
        assert_eq!(collection.items[1].name, "Orders");
        assert!(collection.items[0].is_folder());
        assert!(!collection.items[0].children[0].is_folder());
    }

    #[test]
    fn test_url_detailed_path() {
        let url: Url = serde_json::from_str(r#"{"path": ["users", "42"]}"#).unwrap();
        assert_eq!(url.resource_path().as_deref(), Some("users/42"));
    }

    #[test]
    fn test_url_empty_path_unresolvable() {
        let url: Url = serde_json::from_str(r#"{"raw": "http://x/users"}"#).unwrap();
        assert_eq!(url.resource_path(), None);
    }

    #[test]
    fn test_url_raw_string_unresolvable() {
        let url: Url = serde_json::from_str(r#""http://x/users""#).unwrap();
        assert!(matches!(url, Url::Raw(_)));
        assert_eq!(url.resource_path(), None);
    }

    #[test]
    fn test_url_unexpected_shape_tolerated() {
        let url: Url = serde_json::from_str(r#"{"path": [{"value": "users"}]}"#).unwrap();
        assert!(matches!(url, Url::Other(_)));
        assert_eq!(url.resource_path(), None);
    }
}
