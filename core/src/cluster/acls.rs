//! ACL operations, issued against the cluster document's `acls` link.

use serde::{Deserialize, Serialize};

use crate::client::NO_BODY;
use crate::cluster::ClusterClient;
use crate::error::Error;
use crate::http::Method;
use crate::query::{wire_name, PaginationOptions, QueryParams};
use crate::types::{BaseModel, ResourceList};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AclResourceType {
    #[default]
    Unknown,
    Any,
    Topic,
    Group,
    Cluster,
    TransactionalId,
    DelegationToken,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AclOperation {
    #[default]
    Unknown,
    Any,
    All,
    Read,
    Write,
    Create,
    Delete,
    Alter,
    Describe,
    ClusterAction,
    DescribeConfigs,
    AlterConfigs,
    IdempotentWrite,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AclPermission {
    #[default]
    Unknown,
    Allow,
    Deny,
    Any,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AclPatternType {
    #[default]
    Unknown,
    Literal,
    Prefixed,
    Match,
    Any,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KafkaAcl {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub resource_type: AclResourceType,
    #[serde(default)]
    pub resource_name: String,
    #[serde(default)]
    pub pattern_type: AclPatternType,
    #[serde(default)]
    pub principal: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub operation: AclOperation,
    #[serde(default)]
    pub permission: AclPermission,
}

pub type KafkaAclList = ResourceList<KafkaAcl>;

/// Filters for [`ClusterClient::search_acls`]. `Unknown` means "not set" and
/// contributes no pair.
#[derive(Debug, Clone, Default)]
pub struct AclSearchOptions {
    pub pagination: PaginationOptions,
    pub resource_type: AclResourceType,
    pub resource_name: Option<String>,
    pub principal: Option<String>,
    pub host: Option<String>,
    pub operation: AclOperation,
    pub permission: AclPermission,
    pub pattern_type: AclPatternType,
}

impl QueryParams for AclSearchOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.pagination.extend_pairs(&mut pairs);
        if self.resource_type != AclResourceType::Unknown {
            pairs.push(("resource_type", wire_name(&self.resource_type)));
        }
        if let Some(resource_name) = &self.resource_name {
            pairs.push(("resource_name", resource_name.clone()));
        }
        if let Some(principal) = &self.principal {
            pairs.push(("principal", principal.clone()));
        }
        if let Some(host) = &self.host {
            pairs.push(("host", host.clone()));
        }
        if self.operation != AclOperation::Unknown {
            pairs.push(("operation", wire_name(&self.operation)));
        }
        if self.permission != AclPermission::Unknown {
            pairs.push(("permission", wire_name(&self.permission)));
        }
        if self.pattern_type != AclPatternType::Unknown {
            pairs.push(("pattern_type", wire_name(&self.pattern_type)));
        }
        pairs
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AclCreateReq {
    pub resource_type: AclResourceType,
    pub resource_name: String,
    pub pattern_type: AclPatternType,
    pub principal: String,
    pub host: String,
    pub operation: AclOperation,
    pub permission: AclPermission,
}

impl ClusterClient {
    pub fn search_acls(&self, options: &AclSearchOptions) -> Result<KafkaAclList, Error> {
        let response = self.execute(
            &self.cluster().acls.related,
            "",
            Method::Get,
            NO_BODY,
            Some(options),
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn create_acl(&self, create: &AclCreateReq) -> Result<(), Error> {
        let response = self.execute(
            &self.cluster().acls.related,
            "",
            Method::Post,
            Some(create),
            None,
        )?;
        response.expect_status(&[201, 204])
    }

    /// Deletes every ACL matched by the filters and returns the matches.
    pub fn delete_acls(&self, options: &AclSearchOptions) -> Result<KafkaAclList, Error> {
        let response = self.execute(
            &self.cluster().acls.related,
            "",
            Method::Delete,
            NO_BODY,
            Some(options),
        )?;
        response.expect_status(&[200])?;
        response.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::encode_query;

    #[test]
    fn unset_enum_filters_contribute_no_pairs() {
        let options = AclSearchOptions::default();
        assert_eq!(encode_query(&options), "");
    }

    #[test]
    fn set_filters_encode_wire_names() {
        let options = AclSearchOptions {
            resource_type: AclResourceType::Topic,
            resource_name: Some("orders".to_string()),
            principal: Some("User:sa-123".to_string()),
            operation: AclOperation::Read,
            permission: AclPermission::Allow,
            pattern_type: AclPatternType::Prefixed,
            ..AclSearchOptions::default()
        };
        assert_eq!(
            encode_query(&options),
            "resource_type=TOPIC&resource_name=orders&principal=User%3Asa-123\
             &operation=READ&permission=ALLOW&pattern_type=PREFIXED"
        );
    }

    #[test]
    fn acl_decodes_screaming_snake_variants() {
        let raw = r#"{
            "cluster_id": "lkc-abc",
            "resource_type": "TRANSACTIONAL_ID",
            "resource_name": "txn-1",
            "pattern_type": "LITERAL",
            "principal": "User:sa-123",
            "host": "*",
            "operation": "IDEMPOTENT_WRITE",
            "permission": "DENY"
        }"#;
        let acl: KafkaAcl = serde_json::from_str(raw).unwrap();
        assert_eq!(acl.resource_type, AclResourceType::TransactionalId);
        assert_eq!(acl.operation, AclOperation::IdempotentWrite);
        assert_eq!(acl.permission, AclPermission::Deny);
    }
}
