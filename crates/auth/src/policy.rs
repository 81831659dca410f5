//! Guarded path policy
//!
//! A static table mapping path prefixes to the role they require and to
//! how a rejection is rendered (JSON status for APIs, redirect for pages).

use crate::claims::Role;

/// How rejections on a guarded prefix are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Machine clients: 401/403 JSON responses
    Api,
    /// Browser navigation: redirects
    Page,
}

/// A path namespace the pipeline enforces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedPrefix {
    pub prefix: &'static str,
    pub required_role: Role,
    pub surface: Surface,
}

impl GuardedPrefix {
    /// Segment-aware match: `/admin` covers `/admin` and `/admin/...`
    /// but not `/administrator`.
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    guards: Vec<GuardedPrefix>,
    /// Where unauthenticated page requests are sent
    pub login_path: &'static str,
    /// Where authenticated but unentitled page requests are sent
    pub neutral_path: &'static str,
}

impl AccessPolicy {
    pub fn new(
        guards: Vec<GuardedPrefix>,
        login_path: &'static str,
        neutral_path: &'static str,
    ) -> Self {
        Self {
            guards,
            login_path,
            neutral_path,
        }
    }

    /// The storefront table: admin UI and admin API, both `ADMIN` only.
    pub fn storefront() -> Self {
        Self::new(
            vec![
                GuardedPrefix {
                    prefix: "/admin",
                    required_role: Role::Admin,
                    surface: Surface::Page,
                },
                GuardedPrefix {
                    prefix: "/api/admin",
                    required_role: Role::Admin,
                    surface: Surface::Api,
                },
            ],
            "/login",
            "/",
        )
    }

    /// The guard that applies to `path`, if any
    pub fn guard_for(&self, path: &str) -> Option<&GuardedPrefix> {
        self.guards.iter().find(|guard| guard.matches(path))
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::storefront()
    }
}
