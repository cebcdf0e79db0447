//! Shared envelope types for control-plane resources.
//!
//! # Design
//! Every returned entity carries the same wrapper (`api_version`, `kind`,
//! `id`, metadata); resources embed [`BaseModel`] via `#[serde(flatten)]`
//! instead of repeating those fields. List responses are the generic
//! [`ResourceList`], whose metadata links drive pagination.

use serde::{Deserialize, Serialize};
use url::Url;

/// Cloud provider hosting a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudProvider {
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "GCP")]
    Gcp,
    #[serde(rename = "AZURE")]
    Azure,
}

/// Resource and list metadata carried by every envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size: Option<i64>,
}

impl Metadata {
    fn is_empty(&self) -> bool {
        *self == Metadata::default()
    }
}

/// Common wrapper present on every returned entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseModel {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub related: String,
    #[serde(skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl BaseModel {
    /// Opaque cursor for the page after this one.
    ///
    /// Reads the `page_token` parameter out of the `next` metadata link.
    /// `None` when the link is absent, unparsable, or carries no token —
    /// the list loop's termination signal. Pure: the same envelope always
    /// yields the same answer.
    pub fn next_page_token(&self) -> Option<String> {
        let next = self.metadata.next.as_deref()?;
        let next = Url::parse(next).ok()?;
        let token = next
            .query_pairs()
            .find_map(|(key, value)| (key == "page_token").then(|| value.into_owned()))?;
        (!token.is_empty()).then_some(token)
    }
}

/// Generic list envelope: shared metadata plus one page of `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceList<T> {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> ResourceList<T> {
    /// Cursor for the next page, or `None` on the last page.
    pub fn next_page_token(&self) -> Option<String> {
        self.base.next_page_token()
    }
}

/// Body wrapper for endpoints that nest the payload under `"spec"`.
#[derive(Debug, Serialize)]
pub(crate) struct SpecWrap<T> {
    pub spec: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope_with_next(next: Option<&str>) -> BaseModel {
        BaseModel {
            metadata: Metadata {
                next: next.map(str::to_string),
                ..Metadata::default()
            },
            ..BaseModel::default()
        }
    }

    #[test]
    fn next_page_token_reads_the_next_link() {
        let envelope = envelope_with_next(Some(
            "https://api.confluent.cloud/org/v2/environments?page_size=10&page_token=UvmDWOB1iwfAIBPj6EV1",
        ));
        assert_eq!(
            envelope.next_page_token().as_deref(),
            Some("UvmDWOB1iwfAIBPj6EV1")
        );
    }

    #[test]
    fn next_page_token_is_pure() {
        let envelope =
            envelope_with_next(Some("https://api.confluent.cloud/org/v2/environments?page_token=t1"));
        assert_eq!(envelope.next_page_token(), envelope.next_page_token());
    }

    #[test]
    fn absent_next_link_means_last_page() {
        assert_eq!(envelope_with_next(None).next_page_token(), None);
    }

    #[test]
    fn malformed_next_link_means_last_page() {
        assert_eq!(
            envelope_with_next(Some("::not a url::")).next_page_token(),
            None
        );
    }

    #[test]
    fn next_link_without_token_means_last_page() {
        assert_eq!(
            envelope_with_next(Some("https://api.confluent.cloud/org/v2/environments?page_size=10"))
                .next_page_token(),
            None
        );
    }

    #[test]
    fn base_model_decodes_with_all_fields_missing() {
        let base: BaseModel = serde_json::from_str("{}").unwrap();
        assert_eq!(base, BaseModel::default());
    }

    #[test]
    fn empty_base_model_serializes_to_nothing() {
        let json = serde_json::to_value(BaseModel::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
