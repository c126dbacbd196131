//! Repository Permissions
//!
//! Fine-grained tokens grant each repository permission either read or write
//! access. Configuration carries the two access levels as separate name sets;
//! [`permission_map`] folds them into the mapping the token service expects.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Repository permission that can be granted to a fine-grained token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
    /// Workflows, workflow runs and artifacts.
    Actions,
    /// Repository settings, teams and collaborators.
    Administration,
    /// Checks on code.
    Checks,
    /// Codespaces.
    Codespaces,
    /// Repository contents, commits, branches, downloads, releases and merges.
    Contents,
    /// Dependabot secrets.
    DependabotSecrets,
    /// Deployments and deployment statuses.
    Deployments,
    /// Environments.
    Environments,
    /// Issues and related comments, assignees, labels and milestones.
    Issues,
    /// Merge queues.
    MergeQueues,
    /// Search repositories, list collaborators and access repository metadata.
    Metadata,
    /// Pages statuses, configuration and builds.
    Pages,
    /// Pull requests and related comments, assignees, labels and milestones.
    PullRequests,
    /// Repository security advisories.
    RepositorySecurityAdvisories,
    /// Secret scanning alerts.
    SecretScanningAlerts,
    /// Actions secrets.
    Secrets,
    /// Code scanning alerts.
    SecurityEvents,
    /// Commit statuses.
    Statuses,
    /// Actions variables.
    Variables,
    /// Repository webhooks.
    Webhooks,
    /// Workflow files.
    Workflows,
}

impl Permission {
    /// Every known permission.
    pub const ALL: [Self; 21] = [
        Self::Actions,
        Self::Administration,
        Self::Checks,
        Self::Codespaces,
        Self::Contents,
        Self::DependabotSecrets,
        Self::Deployments,
        Self::Environments,
        Self::Issues,
        Self::MergeQueues,
        Self::Metadata,
        Self::Pages,
        Self::PullRequests,
        Self::RepositorySecurityAdvisories,
        Self::SecretScanningAlerts,
        Self::Secrets,
        Self::SecurityEvents,
        Self::Statuses,
        Self::Variables,
        Self::Webhooks,
        Self::Workflows,
    ];

    /// Configuration name of the permission.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Actions => "actions",
            Self::Administration => "administration",
            Self::Checks => "checks",
            Self::Codespaces => "codespaces",
            Self::Contents => "contents",
            Self::DependabotSecrets => "dependabot_secrets",
            Self::Deployments => "deployments",
            Self::Environments => "environments",
            Self::Issues => "issues",
            Self::MergeQueues => "merge_queues",
            Self::Metadata => "metadata",
            Self::Pages => "pages",
            Self::PullRequests => "pull_requests",
            Self::RepositorySecurityAdvisories => "repository_security_advisories",
            Self::SecretScanningAlerts => "secret_scanning_alerts",
            Self::Secrets => "secrets",
            Self::SecurityEvents => "security_events",
            Self::Statuses => "statuses",
            Self::Variables => "variables",
            Self::Webhooks => "webhooks",
            Self::Workflows => "workflows",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = PermissionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| PermissionError::Unknown(value.to_string()))
    }
}

impl Serialize for Permission {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;

        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Access level granted for a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Read-only access.
    Read,

    /// Read and write access.
    Write,
}

/// Permission name errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The name does not match any known permission.
    #[error("unknown permission `{0}`")]
    Unknown(String),

    /// The permission was requested with both read and write access.
    #[error("permission `{0}` is granted both read and write access")]
    Conflicting(Permission),
}

/// Build the permission-to-access mapping for the token service.
///
/// # Errors
///
/// Returns [`PermissionError::Unknown`] for a name that is not a permission,
/// and [`PermissionError::Conflicting`] for a permission present in both sets.
pub fn permission_map(
    read: &BTreeSet<String>,
    write: &BTreeSet<String>,
) -> Result<BTreeMap<Permission, Access>, PermissionError> {
    let mut permissions = BTreeMap::new();

    for name in read {
        permissions.insert(name.parse::<Permission>()?, Access::Read);
    }

    for name in write {
        let permission = name.parse::<Permission>()?;

        if permissions.insert(permission, Access::Write).is_some() {
            return Err(PermissionError::Conflicting(permission));
        }
    }

    Ok(permissions)
}
