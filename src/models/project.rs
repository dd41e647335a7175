use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Service-wide entity counts. Fetched once at startup to prove the host is
/// reachable before any project lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    #[serde(default)]
    pub projects_count: u64,
    #[serde(default)]
    pub executions_count: u64,
    #[serde(default)]
    pub results_count: u64,
}
