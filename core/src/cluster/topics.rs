//! Topic operations, issued against the cluster document's `topics` link.

use serde::{Deserialize, Serialize};

use crate::client::NO_BODY;
use crate::cluster::{ClusterClient, RelatedResource};
use crate::error::Error;
use crate::http::Method;
use crate::query::{as_query, PaginationOptions};
use crate::types::{BaseModel, ResourceList};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topic {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub topic_name: String,
    #[serde(default)]
    pub is_internal: bool,
    #[serde(default)]
    pub replication_factor: i32,
    #[serde(default)]
    pub partition_count: i32,
    #[serde(default)]
    pub partitions: RelatedResource,
    #[serde(default)]
    pub configs: RelatedResource,
    #[serde(default)]
    pub partition_reassignments: RelatedResource,
}

pub type TopicList = ResourceList<Topic>;

/// One `name=value` pair applied at topic creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicCreateReq {
    pub topic_name: String,
    pub partition_count: i32,
    pub replication_factor: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configs: Vec<ConfigEntry>,
}

impl ClusterClient {
    pub fn list_topics(
        &self,
        options: Option<&PaginationOptions>,
    ) -> Result<TopicList, Error> {
        let response = self.execute(
            &self.cluster().topics.related,
            "",
            Method::Get,
            NO_BODY,
            as_query(options),
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_topic(&self, topic_name: &str) -> Result<Topic, Error> {
        let response = self.execute(
            &self.cluster().topics.related,
            topic_name,
            Method::Get,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn create_topic(&self, create: &TopicCreateReq) -> Result<Topic, Error> {
        let response = self.execute(
            &self.cluster().topics.related,
            "",
            Method::Post,
            Some(create),
            None,
        )?;
        response.expect_status(&[201])?;
        response.json()
    }

    pub fn delete_topic(&self, topic_name: &str) -> Result<(), Error> {
        let response = self.execute(
            &self.cluster().topics.related,
            topic_name,
            Method::Delete,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[204])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_omits_empty_configs() {
        let create = TopicCreateReq {
            topic_name: "orders".to_string(),
            partition_count: 6,
            replication_factor: 3,
            configs: Vec::new(),
        };
        let json = serde_json::to_value(&create).unwrap();
        assert_eq!(json["topic_name"], "orders");
        assert_eq!(json["partition_count"], 6);
        assert!(json.get("configs").is_none());
    }

    #[test]
    fn create_request_serializes_config_entries() {
        let create = TopicCreateReq {
            topic_name: "orders".to_string(),
            partition_count: 1,
            replication_factor: 3,
            configs: vec![ConfigEntry {
                name: "cleanup.policy".to_string(),
                value: "compact".to_string(),
            }],
        };
        let json = serde_json::to_value(&create).unwrap();
        assert_eq!(json["configs"][0]["name"], "cleanup.policy");
        assert_eq!(json["configs"][0]["value"], "compact");
    }
}
