//! Monitor inventory: id listing, detail fetch, and tag-shape normalization.

use serde::Deserialize;
use serde_json::Value;
use sumo_chores_core::models::UNKNOWN_MONITOR_NAME;
use sumo_chores_core::Monitor;

use crate::api_shape::monitor_paths;
use crate::client::DataEnvelope;
use crate::{SumoApiError, SumoClient};

#[derive(Debug, Deserialize)]
struct MonitorIdRecord {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonitorRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tags: Option<Vec<Value>>,
    #[serde(default)]
    content_type: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagShape {
    Flat,
    /// Legacy records carry tags under `contentType.tags`.
    Nested,
}

fn tag_shape(record: &MonitorRecord) -> TagShape {
    if record.tags.is_some() {
        TagShape::Flat
    } else {
        TagShape::Nested
    }
}

fn monitor_identity(record: &MonitorRecord) -> Option<(String, String)> {
    let id = record.id.as_deref().map(str::trim).filter(|id| !id.is_empty())?;
    let name = record
        .name
        .clone()
        .unwrap_or_else(|| UNKNOWN_MONITOR_NAME.to_string());
    Some((id.to_string(), name))
}

/// Non-string entries are dropped rather than failing the whole response.
fn string_tags(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn map_flat_monitor(record: MonitorRecord) -> Option<Monitor> {
    let (id, name) = monitor_identity(&record)?;
    let tags = record.tags.as_deref().map(string_tags).unwrap_or_default();
    Some(Monitor::new(id, name, tags))
}

fn map_nested_monitor(record: MonitorRecord) -> Option<Monitor> {
    let (id, name) = monitor_identity(&record)?;
    let tags = record
        .content_type
        .as_ref()
        .and_then(|descriptor| descriptor.get("tags"))
        .and_then(Value::as_array)
        .map(|tags| string_tags(tags.as_slice()))
        .unwrap_or_default();
    Some(Monitor::new(id, name, tags))
}

fn normalize_monitor(record: MonitorRecord) -> Option<Monitor> {
    match tag_shape(&record) {
        TagShape::Flat => map_flat_monitor(record),
        TagShape::Nested => map_nested_monitor(record),
    }
}

/// Fetch every monitor visible to the configured credentials.
///
/// Ids are listed first and details requested for exactly those ids. When the
/// listing endpoint answers with a non-success status the detail endpoint is
/// queried without an id filter instead.
pub async fn fetch_all_monitors(client: &SumoClient) -> Result<Vec<Monitor>, SumoApiError> {
    let paths = monitor_paths(client.api_endpoint());
    tracing::info!(url = %paths.list_url, "fetching monitor ids");

    let ids_filter = match client
        .get_json::<DataEnvelope<MonitorIdRecord>>(&paths.list_url, &[])
        .await
    {
        Ok(listing) => {
            let ids: Vec<String> = listing
                .data
                .into_iter()
                .filter_map(|record| record.id)
                .collect();
            if ids.is_empty() {
                tracing::info!("no monitors found");
                return Ok(Vec::new());
            }
            Some(ids.join(","))
        }
        Err(SumoApiError::HttpStatus { status, .. }) => {
            tracing::warn!(
                status,
                "could not fetch monitor ids, requesting the full monitor listing"
            );
            None
        }
        Err(error) => return Err(error),
    };

    tracing::info!(url = %paths.detail_url, "fetching monitors");
    let query: Vec<(&str, &str)> = ids_filter
        .as_deref()
        .map(|ids| vec![("ids", ids)])
        .unwrap_or_default();
    let details = client
        .get_json::<DataEnvelope<MonitorRecord>>(&paths.detail_url, &query)
        .await?;

    let mut monitors = Vec::with_capacity(details.data.len());
    for record in details.data {
        match normalize_monitor(record) {
            Some(monitor) => monitors.push(monitor),
            None => tracing::warn!("skipping monitor record without an id"),
        }
    }
    tracing::info!(count = monitors.len(), "found monitors");
    Ok(monitors)
}
