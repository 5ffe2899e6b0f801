//! Per-request session context with change notification.
//!
//! Instead of process-wide session/locale state, every render receives a
//! `SessionContext`. Whoever owns the auth flow calls [`SessionContext::set_role`]
//! (role upgrade, logout, expiry); anything gated holds a [`GateWatch`] and
//! gets a fresh decision each time the role changes.

use tokio::sync::watch;

use super::gate::{evaluate, AccessDecision, RouteRequirement};
use crate::domain::foundation::Role;
use crate::domain::i18n::Locale;

/// Role and locale of the current caller.
#[derive(Debug)]
pub struct SessionContext {
    role: watch::Sender<Role>,
    locale: Locale,
}

impl SessionContext {
    /// Creates a context for a resolved locale and the caller's role.
    pub fn new(role: Role, locale: Locale) -> Self {
        let (role, _) = watch::channel(role);
        Self { role, locale }
    }

    /// The caller's current role.
    pub fn role(&self) -> Role {
        *self.role.borrow()
    }

    /// The locale resolved for this request.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Subscribes to role changes.
    pub fn subscribe(&self) -> watch::Receiver<Role> {
        self.role.subscribe()
    }

    /// Replaces the role; subscribers are notified only on an actual change.
    pub fn set_role(&self, role: Role) {
        self.role.send_if_modified(|current| {
            if *current == role {
                false
            } else {
                *current = role;
                true
            }
        });
    }

    /// Drops the session: the caller becomes anonymous.
    pub fn logout(&self) {
        self.set_role(Role::Anonymous);
    }

    /// Gates a page against the current role.
    pub fn evaluate(&self, requirement: RouteRequirement) -> AccessDecision {
        evaluate(self.role(), requirement)
    }

    /// Starts watching the gate for one page.
    pub fn watch(&self, requirement: RouteRequirement) -> GateWatch {
        GateWatch {
            requirement,
            roles: self.subscribe(),
        }
    }
}

/// Re-evaluates a page's access decision whenever the session role changes.
#[derive(Debug)]
pub struct GateWatch {
    requirement: RouteRequirement,
    roles: watch::Receiver<Role>,
}

impl GateWatch {
    /// The decision for the role as it is right now.
    pub fn current(&self) -> AccessDecision {
        evaluate(*self.roles.borrow(), self.requirement)
    }

    /// Waits for the next role change and returns the new decision.
    ///
    /// Returns `None` once the context is gone.
    pub async fn changed(&mut self) -> Option<AccessDecision> {
        self.roles.changed().await.ok()?;
        let role = *self.roles.borrow_and_update();
        Some(evaluate(role, self.requirement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_exposes_role_and_locale() {
        let ctx = SessionContext::new(Role::User, Locale::Ar);
        assert_eq!(ctx.role(), Role::User);
        assert_eq!(ctx.locale(), Locale::Ar);
        assert_eq!(ctx.evaluate(Role::Agent), AccessDecision::RedirectToForbidden);
    }

    #[tokio::test]
    async fn gate_reevaluates_after_role_upgrade() {
        let ctx = SessionContext::new(Role::User, Locale::En);
        let mut gate = ctx.watch(Role::Agent);
        assert_eq!(gate.current(), AccessDecision::RedirectToForbidden);

        ctx.set_role(Role::Agent);
        assert_eq!(gate.changed().await, Some(AccessDecision::Allow));
    }

    #[tokio::test]
    async fn gate_reevaluates_after_logout() {
        let ctx = SessionContext::new(Role::Admin, Locale::En);
        let mut gate = ctx.watch(Role::User);
        assert_eq!(gate.current(), AccessDecision::Allow);

        ctx.logout();
        assert_eq!(gate.changed().await, Some(AccessDecision::RedirectToLogin));
        assert_eq!(ctx.role(), Role::Anonymous);
    }

    #[tokio::test]
    async fn setting_same_role_does_not_notify() {
        let ctx = SessionContext::new(Role::User, Locale::En);
        let roles = ctx.subscribe();

        ctx.set_role(Role::User);
        assert!(!roles.has_changed().unwrap());

        ctx.set_role(Role::Agent);
        assert!(roles.has_changed().unwrap());
    }

    #[tokio::test]
    async fn watch_ends_when_context_dropped() {
        let ctx = SessionContext::new(Role::User, Locale::En);
        let mut gate = ctx.watch(Role::User);
        drop(ctx);
        assert_eq!(gate.changed().await, None);
    }
}
