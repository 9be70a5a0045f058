use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const UNKNOWN_MONITOR_NAME: &str = "Unknown Monitor";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Monitor record normalized from either platform API shape.
pub struct Monitor {
    pub id: String,
    pub name: String,
    pub tags: BTreeSet<String>,
}

impl Monitor {
    pub fn new<I, S>(id: impl Into<String>, name: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One non-compliant monitor, as written to the `non_compliant_monitors` output.
pub struct ComplianceResult {
    pub id: String,
    pub name: String,
    pub non_compliant_tags: BTreeSet<String>,
    pub compliant_tags: BTreeSet<String>,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Created,
    Existing,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Existing => "existing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Reference to a tracking issue that was filed or found during this run.
pub struct TrackingIssueRecord {
    pub url: String,
    pub number: u64,
    pub title: String,
    pub monitor_id: String,
    pub monitor_name: String,
    pub status: IssueStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// User holding the requested role, as written to the `users_with_role` output.
pub struct RoleMembership {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: RoleRef,
}
