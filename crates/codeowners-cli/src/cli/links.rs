//! Profile links for owner tokens.
//!
//! Users link to `<base>/<user>` and teams to `<base>/orgs/<org>/teams/<team>`.
//! Emails and malformed tokens have no link.

use codeowners_resolver_core::parse::OwnerKind;

/// Builds owner profile URLs against a GitHub web host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerLinks {
    base_url: String,
}

impl OwnerLinks {
    /// Creates a link builder for `base_url` (e.g. `https://github.com`).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the profile URL for an owner, if it has one.
    pub fn url_for(&self, kind: &OwnerKind<'_>) -> Option<String> {
        match kind {
            OwnerKind::User { name } => Some(format!("{}/{}", self.base_url, name)),
            OwnerKind::Team { org, team } => {
                Some(format!("{}/orgs/{}/teams/{}", self.base_url, org, team))
            }
            OwnerKind::Email { .. } | OwnerKind::Unknown { .. } => None,
        }
    }
}

impl Default for OwnerLinks {
    fn default() -> Self {
        Self::new("https://github.com")
    }
}
