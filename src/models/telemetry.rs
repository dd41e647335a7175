//! Soft telemetry payloads: load-test simulations and security scan results.
//!
//! Their metric sets are owned by the producing tool, so the variable parts
//! are carried as raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub name: String,
    pub namespace: String,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default)]
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metrics: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub execution_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanAlert {
    pub name: String,
    pub risk: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanResultRequest {
    pub target_url: String,
    #[serde(default)]
    pub alerts: Vec<ScanAlert>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub id: String,
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub execution_id: Option<String>,
}
