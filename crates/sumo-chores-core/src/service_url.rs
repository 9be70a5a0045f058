pub const PLATFORM_DOMAIN: &str = "sumologic.com";
const API_HOST_MARKER: &str = "api";

fn endpoint_host(api_endpoint: &str) -> &str {
    let after_scheme = api_endpoint
        .split_once("//")
        .map(|(_, rest)| rest)
        .unwrap_or(api_endpoint);
    after_scheme.split('/').next().unwrap_or_default()
}

/// Derive the UI host from an API endpoint.
///
/// `https://apiau.sumologic.com/api` maps to `service.au.sumologic.com`; hosts
/// whose first label carries no region after `api` map to `service.sumologic.com`.
pub fn service_host_for_endpoint(api_endpoint: &str) -> String {
    let host = endpoint_host(api_endpoint);
    if !host.contains('.') || !host.contains(API_HOST_MARKER) {
        return format!("service.{PLATFORM_DOMAIN}");
    }
    let first_label = host.split('.').next().unwrap_or_default();
    let region = first_label.split(API_HOST_MARKER).nth(1).unwrap_or_default();
    if region.is_empty() {
        format!("service.{PLATFORM_DOMAIN}")
    } else {
        format!("service.{region}.{PLATFORM_DOMAIN}")
    }
}

pub fn monitor_edit_url(service_host: &str, monitor_id: &str) -> String {
    format!("https://{service_host}/ui/#/monitor/edit/{monitor_id}")
}
