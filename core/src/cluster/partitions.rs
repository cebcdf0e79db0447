//! Partition operations, issued under the cluster document's `topics` link.

use serde::{Deserialize, Serialize};

use crate::client::NO_BODY;
use crate::cluster::{ClusterClient, RelatedResource};
use crate::error::Error;
use crate::http::Method;
use crate::types::{BaseModel, ResourceList};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Partition {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub topic_name: String,
    #[serde(default)]
    pub partition_id: i32,
    #[serde(default)]
    pub leader: RelatedResource,
    #[serde(default)]
    pub replicas: RelatedResource,
    #[serde(default)]
    pub reassignment: RelatedResource,
}

pub type PartitionList = ResourceList<Partition>;

impl ClusterClient {
    pub fn list_partitions(&self, topic_name: &str) -> Result<PartitionList, Error> {
        let path = format!("{topic_name}/partitions");
        let response = self.execute(
            &self.cluster().topics.related,
            &path,
            Method::Get,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_partition(&self, topic_name: &str, partition_id: i32) -> Result<Partition, Error> {
        let path = format!("{topic_name}/partitions/{partition_id}");
        let response = self.execute(
            &self.cluster().topics.related,
            &path,
            Method::Get,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[200])?;
        response.json()
    }
}
