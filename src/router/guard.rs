//! Navigation access control.
//!
//! Each navigation is decided from the current session and the target's
//! effective requirements alone; the guard keeps no state between requests
//! and performs no I/O.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. allow-listed target (`Home`, `Login`, `Register`): allow
//! 2. anonymous session: redirect to `/`
//! 3. target requires auth and session is anonymous: redirect to `/login`
//! 4. target requires admin and role is not `admin`: redirect to `/`
//! 5. otherwise: allow
//!
//! Rule 2 blocks every anonymous navigation outside the allow-list, so rule
//! 3 cannot fire with this ordering. It is kept so that relaxing rule 2
//! restores the login redirect. A target that matches no route redirects to
//! `/`.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;

use super::routes::{HOME, LOGIN, REGISTER, ResolvedRoute};
use crate::state::session::{Session, SessionStore};

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

/// Route names reachable without a session.
pub const ALLOW_LIST: [&str; 3] = [HOME, LOGIN, REGISTER];

/// One navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Path as requested, before resolution.
    pub to_path: String,
    /// Resolved target, `None` when no route matches.
    pub to: Option<ResolvedRoute>,
    /// Route being left, `None` on the first navigation.
    pub from: Option<ResolvedRoute>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(String),
}

/// The rule that produced a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    AllowListed,
    Anonymous,
    AuthRequired,
    AdminRequired,
    UnknownRoute,
    Permitted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub decision: Decision,
    pub rule: Rule,
}

impl Verdict {
    fn allow(rule: Rule) -> Self {
        Self { decision: Decision::Allow, rule }
    }

    fn redirect(path: &str, rule: Rule) -> Self {
        Self { decision: Decision::Redirect(path.to_owned()), rule }
    }

    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.decision == Decision::Allow
    }
}

/// Decide one navigation request against a session.
#[must_use]
pub fn decide(request: &NavigationRequest, session: &Session) -> Verdict {
    let target = request.to.as_ref();

    if target.is_some_and(|route| ALLOW_LIST.contains(&route.name.as_str())) {
        return Verdict::allow(Rule::AllowListed);
    }
    if !session.is_logged_in() {
        return Verdict::redirect(HOME_PATH, Rule::Anonymous);
    }
    let Some(route) = target else {
        return Verdict::redirect(HOME_PATH, Rule::UnknownRoute);
    };
    if route.requires_auth && !session.is_logged_in() {
        return Verdict::redirect(LOGIN_PATH, Rule::AuthRequired);
    }
    if route.requires_admin && !session.is_admin() {
        return Verdict::redirect(HOME_PATH, Rule::AdminRequired);
    }
    Verdict::allow(Rule::Permitted)
}

/// Guard bound to a session store.
#[derive(Clone)]
pub struct NavigationGuard {
    session: Arc<SessionStore>,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn check(&self, request: &NavigationRequest) -> Verdict {
        let verdict = decide(request, &self.session.snapshot());
        let from = request.from.as_ref().map_or("-", |r| r.path.as_str());
        match &verdict.decision {
            Decision::Allow => {
                tracing::debug!(to = %request.to_path, %from, rule = ?verdict.rule, "navigation allowed");
            }
            Decision::Redirect(target) => {
                tracing::info!(to = %request.to_path, %from, %target, rule = ?verdict.rule, "navigation redirected");
            }
        }
        verdict
    }
}
