use serde_json::Value;
use thiserror::Error;

use crate::collection::{Item, Request};

/// A request item that could not be attached to any resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot derive a resource path for item {name:?}")]
pub struct MalformedItem {
    pub name: String,
}

/// One HTTP method defined for a resource, in encounter order.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodEntry {
    pub method: String,
    pub description: String,
    pub request_body: Option<Value>,
}

/// An output grouping keyed by request path, aggregating every method
/// defined for that path.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub path: String,
    pub name: String,
    pub methods: Vec<MethodEntry>,
}

/// Insertion-ordered resource accumulator.
///
/// The first entry recorded under a key fixes the resource's display
/// name and path; later entries under the same key only append methods.
#[derive(Debug, Default)]
pub struct ResourceMap {
    keys: Vec<String>,
    resources: Vec<Resource>,
}

impl ResourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: &str, path: &str, name: &str, entry: MethodEntry) {
        match self.keys.iter().position(|k| k == key) {
            Some(idx) => self.resources[idx].methods.push(entry),
            None => {
                self.keys.push(key.to_string());
                self.resources.push(Resource {
                    path: path.to_string(),
                    name: name.to_string(),
                    methods: vec![entry],
                });
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Derive the resource path for a request by joining its URL segments.
pub fn resource_path(item_name: &str, request: &Request) -> Result<String, MalformedItem> {
    request
        .url
        .as_ref()
        .and_then(|url| url.resource_path())
        .ok_or_else(|| MalformedItem {
            name: item_name.to_string(),
        })
}

/// Parse a raw body string into JSON. Absent, blank, and invalid bodies
/// all collapse to `None`, which drives the "omit the request block"
/// branch downstream.
pub fn try_parse_body(raw: Option<&str>) -> Option<Value> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    serde_json::from_str(raw).ok()
}

fn method_entry(item: &Item, request: &Request) -> MethodEntry {
    // Bodies are only meaningful for POST and PUT.
    let request_body = if request.method == "POST" || request.method == "PUT" {
        try_parse_body(request.body.as_ref().and_then(|body| body.raw.as_deref()))
    } else {
        None
    };

    MethodEntry {
        method: request.method.clone(),
        description: item.description.clone().unwrap_or_default(),
        request_body,
    }
}

/// Group one folder's direct children into resources keyed by derived
/// path. Items whose path cannot be derived are skipped and returned
/// separately; they never abort the walk.
pub fn group_by_path(items: &[Item]) -> (ResourceMap, Vec<MalformedItem>) {
    let mut map = ResourceMap::new();
    let mut skipped = Vec::new();

    for item in items {
        let Some(request) = item.request.as_ref() else {
            continue;
        };
        match resource_path(&item.name, request) {
            Ok(path) => map.record(&path, &path, &item.name, method_entry(item, request)),
            Err(err) => skipped.push(err),
        }
    }

    (map, skipped)
}

/// Variant walk: descend one extra folder level under every top-level
/// item and flatten everything into a single stream keyed by item name
/// and method.
pub fn flatten(items: &[Item]) -> (ResourceMap, Vec<MalformedItem>) {
    let mut map = ResourceMap::new();
    let mut skipped = Vec::new();

    for folder in items {
        for child in &folder.children {
            for item in &child.children {
                let Some(request) = item.request.as_ref() else {
                    continue;
                };
                match resource_path(&item.name, request) {
                    Ok(path) => {
                        let key = format!("{} {}", item.name, request.method);
                        map.record(&key, &path, &item.name, method_entry(item, request));
                    }
                    Err(err) => skipped.push(err),
                }
            }
        }
    }

    (map, skipped)
}
