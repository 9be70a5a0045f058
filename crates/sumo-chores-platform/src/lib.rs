//! Sumo Logic administrative API access for chores tasks.
//!
//! Exposes a thin authenticated client plus the monitor inventory and role
//! membership fetchers. Both fetchers normalize the platform's divergent
//! response shapes into the `sumo-chores-core` model.

mod api_shape;
mod client;
mod error;
mod monitors;
mod roles;

pub use api_shape::{monitor_paths, users_url, ApiVersion, MonitorPaths};
pub use client::{SumoClient, SumoClientConfig, DEFAULT_SUMO_API_ENDPOINT};
pub use error::SumoApiError;
pub use monitors::fetch_all_monitors;
pub use roles::{find_users_with_role, RoleLookupOptions, RoleResolution};
