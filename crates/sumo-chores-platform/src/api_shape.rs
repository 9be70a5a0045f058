#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Version marker already present in the configured endpoint.
pub enum ApiVersion {
    V1,
    V2,
    Unversioned,
}

impl ApiVersion {
    pub fn detect(api_endpoint: &str) -> Self {
        if api_endpoint.contains("/v2") {
            Self::V2
        } else if api_endpoint.contains("/v1") {
            Self::V1
        } else {
            Self::Unversioned
        }
    }

    /// Prefix to insert before resource paths.
    fn path_prefix(self) -> &'static str {
        match self {
            Self::V1 | Self::V2 => "",
            Self::Unversioned => "/v1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorPaths {
    pub list_url: String,
    pub detail_url: String,
}

pub fn monitor_paths(api_endpoint: &str) -> MonitorPaths {
    let version = ApiVersion::detect(api_endpoint);
    let base = format!("{api_endpoint}{}/monitors", version.path_prefix());
    let list_url = match version {
        ApiVersion::V2 => format!("{base}/jobs"),
        ApiVersion::V1 | ApiVersion::Unversioned => format!("{base}/queries"),
    };
    MonitorPaths {
        list_url,
        detail_url: base,
    }
}

pub fn users_url(api_endpoint: &str) -> String {
    let version = ApiVersion::detect(api_endpoint);
    format!("{api_endpoint}{}/users", version.path_prefix())
}
