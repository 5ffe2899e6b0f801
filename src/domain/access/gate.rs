//! Page access policy.
//!
//! Privilege is *almost* linear, but agent-only pages turn away plain users
//! with "forbidden" rather than "log in", so the policy is written out as a
//! rule per requirement instead of a rank comparison.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Role;

/// The role a page declares it needs. `Anonymous` means public.
pub type RouteRequirement = Role;

/// Outcome of gating one page for one caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// Render the page.
    Allow,
    /// The caller has no session; send them to log in.
    RedirectToLogin,
    /// The caller is logged in but their role is insufficient.
    RedirectToForbidden,
}

impl AccessDecision {
    /// Returns true if the page may render.
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// Decides whether `role` may view a page requiring `requirement`.
pub fn evaluate(role: Role, requirement: RouteRequirement) -> AccessDecision {
    use AccessDecision::*;

    match (requirement, role) {
        (Role::Anonymous, _) => Allow,

        (Role::User, Role::User | Role::Agent | Role::Admin) => Allow,
        (Role::User, Role::Anonymous) => RedirectToLogin,

        (Role::Agent, Role::Agent | Role::Admin) => Allow,
        (Role::Agent, Role::User) => RedirectToForbidden,
        (Role::Agent, Role::Anonymous) => RedirectToLogin,

        (Role::Admin, Role::Admin) => Allow,
        (Role::Admin, Role::User | Role::Agent) => RedirectToForbidden,
        (Role::Admin, Role::Anonymous) => RedirectToLogin,
    }
}
