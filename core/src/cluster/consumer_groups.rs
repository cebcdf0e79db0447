//! Consumer-group operations, issued against the cluster document's
//! `consumer_groups` link.

use serde::{Deserialize, Serialize};

use crate::client::NO_BODY;
use crate::cluster::{ClusterClient, RelatedResource};
use crate::error::Error;
use crate::http::Method;
use crate::query::{as_query, PaginationOptions};
use crate::types::{BaseModel, ResourceList};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsumerGroup {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub consumer_group_id: String,
    #[serde(default)]
    pub is_simple: bool,
    #[serde(default)]
    pub partition_assignor: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub coordinator: RelatedResource,
    #[serde(default)]
    pub consumers: RelatedResource,
    #[serde(default)]
    pub lag_summary: RelatedResource,
}

pub type ConsumerGroupList = ResourceList<ConsumerGroup>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Consumer {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub consumer_group_id: String,
    #[serde(default)]
    pub consumer_id: String,
    #[serde(default)]
    pub instance_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub assignments: RelatedResource,
}

pub type ConsumerList = ResourceList<Consumer>;

/// Worst-offender and aggregate lag for a group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsumerGroupLagSummary {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub consumer_group_id: String,
    #[serde(default)]
    pub max_lag_consumer_id: String,
    #[serde(default)]
    pub max_lag_instance_id: String,
    #[serde(default)]
    pub max_lag_client_id: String,
    #[serde(default)]
    pub max_lag_topic_name: String,
    #[serde(default)]
    pub max_lag_partition_id: i32,
    #[serde(default)]
    pub max_lag: i64,
    #[serde(default)]
    pub total_lag: i64,
    #[serde(default)]
    pub max_lag_consumer: RelatedResource,
    #[serde(default)]
    pub max_lag_partition: RelatedResource,
}

/// Lag of one consumer on one partition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsumerLag {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub consumer_group_id: String,
    #[serde(default)]
    pub topic_name: String,
    #[serde(default)]
    pub partition_id: i32,
    #[serde(default)]
    pub consumer_id: String,
    #[serde(default)]
    pub instance_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub current_offset: i64,
    #[serde(default)]
    pub log_end_offset: i64,
    #[serde(default)]
    pub lag: i64,
}

pub type ConsumerLagList = ResourceList<ConsumerLag>;

impl ClusterClient {
    pub fn list_consumer_groups(&self) -> Result<ConsumerGroupList, Error> {
        let response = self.execute(
            &self.cluster().consumer_groups.related,
            "",
            Method::Get,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_consumer_group(&self, consumer_group_id: &str) -> Result<ConsumerGroup, Error> {
        let response = self.execute(
            &self.cluster().consumer_groups.related,
            consumer_group_id,
            Method::Get,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn list_consumers(&self, consumer_group_id: &str) -> Result<ConsumerList, Error> {
        let path = format!("{consumer_group_id}/consumers");
        let response = self.execute(
            &self.cluster().consumer_groups.related,
            &path,
            Method::Get,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_consumer(
        &self,
        consumer_group_id: &str,
        consumer_id: &str,
    ) -> Result<Consumer, Error> {
        let path = format!("{consumer_group_id}/consumers/{consumer_id}");
        let response = self.execute(
            &self.cluster().consumer_groups.related,
            &path,
            Method::Get,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_consumer_group_lag(
        &self,
        consumer_group_id: &str,
    ) -> Result<ConsumerGroupLagSummary, Error> {
        let path = format!("{consumer_group_id}/lag-summary");
        let response = self.execute(
            &self.cluster().consumer_groups.related,
            &path,
            Method::Get,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn list_consumer_lags(
        &self,
        consumer_group_id: &str,
        options: Option<&PaginationOptions>,
    ) -> Result<ConsumerLagList, Error> {
        let path = format!("{consumer_group_id}/lags");
        let response = self.execute(
            &self.cluster().consumer_groups.related,
            &path,
            Method::Get,
            NO_BODY,
            as_query(options),
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_consumer_lag(
        &self,
        consumer_group_id: &str,
        topic_name: &str,
        partition_id: i32,
    ) -> Result<ConsumerLag, Error> {
        let path = format!("{consumer_group_id}/lags/{topic_name}/partitions/{partition_id}");
        let response = self.execute(
            &self.cluster().consumer_groups.related,
            &path,
            Method::Get,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[200])?;
        response.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lag_summary_decodes_counters() {
        let raw = r#"{
            "cluster_id": "lkc-abc",
            "consumer_group_id": "cg-orders",
            "max_lag_topic_name": "orders",
            "max_lag_partition_id": 3,
            "max_lag": 1200,
            "total_lag": 4500
        }"#;
        let lag: ConsumerGroupLagSummary = serde_json::from_str(raw).unwrap();
        assert_eq!(lag.max_lag, 1200);
        assert_eq!(lag.total_lag, 4500);
        assert_eq!(lag.max_lag_partition_id, 3);
    }
}
