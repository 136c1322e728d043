//! Top-level JSON:API document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ResourceObject;

/// A JSON:API document whose primary data is `T`: a single resource, an
/// optional resource, or a collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Document<T> {
    pub data: T,

    /// Related resources side-loaded with `include`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

impl<T> Document<T> {
    /// Wraps `data` in a document with no side-loaded resources, meta or links.
    /// Used to build request bodies.
    pub fn new(data: T) -> Self {
        Self {
            data,
            included: Vec::new(),
            meta: None,
            links: None,
        }
    }
}
