//! Query-parameter encoding for list and filter options.
//!
//! # Design
//! Every options struct maps itself to wire pairs explicitly through
//! [`QueryParams`] — one impl per type, no runtime reflection. Omit-if-empty
//! is spelled out per field: unset fields simply contribute no pair.
//! List-valued filters push one repeated pair per element.

use serde::Serialize;

/// Explicit mapping from an options struct to URL query pairs.
pub trait QueryParams {
    /// Key/value pairs in wire order. Unset fields contribute nothing.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Percent-encode the pairs into a query string. Empty options encode to an
/// empty string, never an error.
pub(crate) fn encode_query(params: &dyn QueryParams) -> String {
    let pairs = params.query_pairs();
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Upcast an optional concrete options struct for the executor.
pub(crate) fn as_query<Q: QueryParams>(options: Option<&Q>) -> Option<&dyn QueryParams> {
    options.map(|o| o as &dyn QueryParams)
}

/// Wire name of a unit enum value, as serde would serialize it.
pub(crate) fn wire_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Cursor options shared by every paginated list endpoint.
#[derive(Debug, Clone, Default)]
pub struct PaginationOptions {
    pub page_size: Option<u32>,
    pub page_token: Option<String>,
}

impl PaginationOptions {
    /// Shorthand for the common "first page of N" call.
    pub fn page_size(size: u32) -> Self {
        Self {
            page_size: Some(size),
            page_token: None,
        }
    }

    /// Push this cursor's pairs; composite options structs reuse this.
    pub fn extend_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        if let Some(size) = self.page_size {
            pairs.push(("page_size", size.to_string()));
        }
        if let Some(token) = &self.page_token {
            if !token.is_empty() {
                pairs.push(("page_token", token.clone()));
            }
        }
    }
}

impl QueryParams for PaginationOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.extend_pairs(&mut pairs);
        pairs
    }
}
