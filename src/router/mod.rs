//! Client-side routing: the static route table, the navigation guard, and
//! the router that commits guarded navigations.

pub mod guard;
pub mod routes;


use std::sync::Arc;

use guard::{Decision, HOME_PATH, NavigationGuard, NavigationRequest, Verdict};
use routes::{ResolvedRoute, RouteTable};

use crate::state::session::SessionStore;

/// Redirect hops followed before a navigation is abandoned.
pub const MAX_REDIRECTS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("navigation to {path} exceeded the redirect limit")]
    RedirectLoop { path: String },
}

/// A committed navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub route: ResolvedRoute,
    /// Originally requested path when the guard redirected.
    pub redirected_from: Option<String>,
}

pub struct Router {
    table: RouteTable,
    guard: NavigationGuard,
    current: Option<ResolvedRoute>,
}

impl Router {
    #[must_use]
    pub fn new(table: RouteTable, session: Arc<SessionStore>) -> Self {
        Self { table, guard: NavigationGuard::new(session), current: None }
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Route the last committed navigation landed on.
    #[must_use]
    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref()
    }

    /// Ask the guard about `path` without committing anything.
    #[must_use]
    pub fn check(&self, path: &str) -> Verdict {
        self.guard.check(&self.request(path))
    }

    /// Navigate to `path`, following guard redirects.
    ///
    /// # Errors
    ///
    /// [`NavigationError::RedirectLoop`] after [`MAX_REDIRECTS`] redirects.
    pub fn navigate(&mut self, path: &str) -> Result<Navigation, NavigationError> {
        let mut target = path.to_owned();
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            let request = self.request(&target);
            match self.guard.check(&request).decision {
                Decision::Allow => {
                    if let Some(route) = request.to {
                        self.current = Some(route.clone());
                        return Ok(Navigation { route, redirected_from });
                    }
                    // An unresolved target is handled like an unknown route.
                    redirected_from.get_or_insert_with(|| path.to_owned());
                    target = HOME_PATH.to_owned();
                }
                Decision::Redirect(next) => {
                    redirected_from.get_or_insert_with(|| path.to_owned());
                    target = next;
                }
            }
        }

        Err(NavigationError::RedirectLoop { path: path.to_owned() })
    }

    fn request(&self, path: &str) -> NavigationRequest {
        NavigationRequest { to_path: path.to_owned(), to: self.table.resolve(path), from: self.current.clone() }
    }
}
