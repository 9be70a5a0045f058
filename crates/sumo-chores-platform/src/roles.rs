//! Role membership lookup across the user inventory.

use futures_util::stream::{self, StreamExt};
use serde::Deserialize;
use sumo_chores_core::{RoleMembership, RoleRef};

use crate::api_shape::users_url;
use crate::client::DataEnvelope;
use crate::{SumoApiError, SumoClient};

const DEFAULT_ROLE_LOOKUP_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How a user's roles are resolved.
pub enum RoleResolution {
    /// Inline `roleIds` when the user record carries them, per-user call otherwise.
    #[default]
    Auto,
    PerUser,
    Inline,
}

impl RoleResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::PerUser => "per-user",
            Self::Inline => "inline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleLookupOptions {
    pub resolution: RoleResolution,
    pub concurrency: usize,
}

impl Default for RoleLookupOptions {
    fn default() -> Self {
        Self {
            resolution: RoleResolution::Auto,
            concurrency: DEFAULT_ROLE_LOOKUP_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    role_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RoleRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: Option<String>,
}

fn resolves_inline(resolution: RoleResolution, user: &UserRecord) -> bool {
    match resolution {
        RoleResolution::Inline => true,
        RoleResolution::PerUser => false,
        RoleResolution::Auto => user.role_ids.is_some(),
    }
}

fn membership(user: &UserRecord, role: RoleRef) -> RoleMembership {
    RoleMembership {
        id: user.id.clone(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        role,
    }
}

/// Inline role lists carry ids only, so the display name is a placeholder.
fn placeholder_role_name(role_id: &str) -> String {
    format!("Role {role_id}")
}

fn match_inline_roles(user: &UserRecord, role_id: &str) -> Option<RoleMembership> {
    let holds_role = user
        .role_ids
        .as_ref()
        .is_some_and(|ids| ids.iter().any(|id| id == role_id));
    holds_role.then(|| {
        membership(
            user,
            RoleRef {
                id: role_id.to_string(),
                name: placeholder_role_name(role_id),
            },
        )
    })
}

fn match_role_records(
    user: &UserRecord,
    roles: Vec<RoleRecord>,
    role_id: &str,
) -> Option<RoleMembership> {
    roles.into_iter().find(|role| role.id == role_id).map(|role| {
        membership(
            user,
            RoleRef {
                id: role.id,
                name: role.name.unwrap_or_default(),
            },
        )
    })
}

async fn lookup_user_roles(
    client: &SumoClient,
    users_endpoint: &str,
    user: &UserRecord,
    role_id: &str,
) -> Result<Option<RoleMembership>, SumoApiError> {
    let roles_url = format!("{users_endpoint}/{}/roles", user.id);
    tracing::debug!(user = %user.email, url = %roles_url, "checking roles for user");
    let roles = client
        .get_json::<DataEnvelope<RoleRecord>>(&roles_url, &[])
        .await?;
    Ok(match_role_records(user, roles.data, role_id))
}

/// Find users holding `role_id`, in the order the user listing returned them.
///
/// Per-user role calls run concurrently up to `options.concurrency`; results
/// are yielded back in listing order.
pub async fn find_users_with_role(
    client: &SumoClient,
    role_id: &str,
    options: &RoleLookupOptions,
) -> Result<Vec<RoleMembership>, SumoApiError> {
    let users_endpoint = users_url(client.api_endpoint());
    tracing::info!(url = %users_endpoint, "fetching users");
    let users = client
        .get_json::<DataEnvelope<UserRecord>>(&users_endpoint, &[])
        .await?
        .data;
    tracing::info!(
        count = users.len(),
        resolution = options.resolution.as_str(),
        "found users"
    );

    let users_endpoint = users_endpoint.as_str();
    let lookups = stream::iter(users.iter())
        .map(|user| async move {
            if resolves_inline(options.resolution, user) {
                Ok(match_inline_roles(user, role_id))
            } else {
                lookup_user_roles(client, users_endpoint, user, role_id).await
            }
        })
        .buffered(options.concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut memberships = Vec::new();
    for lookup in lookups {
        if let Some(found) = lookup? {
            tracing::info!(
                user = %found.email,
                role = %found.role.name,
                "user has the specified role"
            );
            memberships.push(found);
        }
    }
    Ok(memberships)
}
