//! Static route tree and path resolution.
//!
//! DESIGN
//! ======
//! Routes are declared once at startup and never mutated. Child paths are
//! relative to their parent, `:name` segments capture one path segment, and
//! a matched child inherits every requirement flag set on its ancestors.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::collections::BTreeMap;

pub const HOME: &str = "Home";
pub const LOGIN: &str = "Login";
pub const REGISTER: &str = "Register";
pub const PROFILE: &str = "Profile";
pub const MOVIE_LIST: &str = "MovieList";
pub const MOVIE_DETAIL: &str = "MovieDetail";
pub const ADMIN: &str = "Admin";
pub const ADMIN_USERS: &str = "AdminUsers";
pub const ADMIN_MOVIES: &str = "AdminMovies";

/// One declared route. Immutable once the table is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: String,
    pub requires_auth: bool,
    pub requires_admin: bool,
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    #[must_use]
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            path: path.to_owned(),
            name: name.to_owned(),
            requires_auth: false,
            requires_admin: false,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    #[must_use]
    pub fn requires_admin(mut self) -> Self {
        self.requires_admin = true;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<RouteDescriptor>) -> Self {
        self.children = children;
        self
    }

    fn segments(&self) -> Vec<&str> {
        split_segments(&self.path)
    }
}

/// A concrete path matched against the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: String,
    /// Normalized concrete path, e.g. `/movies/42`.
    pub path: String,
    pub params: BTreeMap<String, String>,
    /// Effective flags: OR over the matched chain.
    pub requires_auth: bool,
    pub requires_admin: bool,
}

/// Flattened view of one route, used for listings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub name: String,
    pub requires_auth: bool,
    pub requires_admin: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    #[must_use]
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Resolve a concrete path. Query strings, fragments, and trailing
    /// slashes are ignored, and static segments match without regard to
    /// ASCII case. Captured params keep the case they were given in.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let normalized = normalize_path(path);
        let segments = split_segments(&normalized);
        let mut params = BTreeMap::new();
        let (route, requires_auth, requires_admin) = match_routes(&self.routes, &segments, &mut params, false, false)?;
        Some(ResolvedRoute {
            name: route.name.clone(),
            path: normalized,
            params,
            requires_auth,
            requires_admin,
        })
    }

    /// Every route with its absolute path and effective flags, depth first.
    #[must_use]
    pub fn entries(&self) -> Vec<RouteEntry> {
        let mut out = Vec::new();
        collect_entries(&self.routes, "", false, false, &mut out);
        out
    }
}

impl Default for RouteTable {
    /// The catalog front-end's route table.
    fn default() -> Self {
        Self::new(vec![
            RouteDescriptor::new("/", HOME),
            RouteDescriptor::new("/login", LOGIN),
            RouteDescriptor::new("/register", REGISTER),
            RouteDescriptor::new("/profile", PROFILE).requires_auth(),
            RouteDescriptor::new("/movies", MOVIE_LIST),
            RouteDescriptor::new("/movies/:id", MOVIE_DETAIL),
            RouteDescriptor::new("/admin", ADMIN)
                .requires_auth()
                .requires_admin()
                .with_children(vec![
                    RouteDescriptor::new("users", ADMIN_USERS),
                    RouteDescriptor::new("movies", ADMIN_MOVIES),
                ]),
        ])
    }
}

fn match_routes<'a>(
    routes: &'a [RouteDescriptor],
    segments: &[&str],
    params: &mut BTreeMap<String, String>,
    inherited_auth: bool,
    inherited_admin: bool,
) -> Option<(&'a RouteDescriptor, bool, bool)> {
    for route in routes {
        let pattern = route.segments();
        if pattern.len() > segments.len() {
            continue;
        }
        let mut captured = BTreeMap::new();
        if !match_prefix(&pattern, segments, &mut captured) {
            continue;
        }

        let auth = inherited_auth || route.requires_auth;
        let admin = inherited_admin || route.requires_admin;
        let rest = &segments[pattern.len()..];

        if rest.is_empty() {
            params.extend(captured);
            return Some((route, auth, admin));
        }
        if let Some(found) = match_routes(&route.children, rest, &mut captured, auth, admin) {
            params.extend(captured);
            return Some(found);
        }
    }
    None
}

fn match_prefix(pattern: &[&str], segments: &[&str], captured: &mut BTreeMap<String, String>) -> bool {
    for (expected, actual) in pattern.iter().zip(segments) {
        if let Some(name) = expected.strip_prefix(':') {
            captured.insert(name.to_owned(), (*actual).to_owned());
        } else if !expected.eq_ignore_ascii_case(actual) {
            return false;
        }
    }
    true
}

fn collect_entries(routes: &[RouteDescriptor], base: &str, auth: bool, admin: bool, out: &mut Vec<RouteEntry>) {
    for route in routes {
        let path = join_paths(base, &route.path);
        let requires_auth = auth || route.requires_auth;
        let requires_admin = admin || route.requires_admin;
        out.push(RouteEntry { path: path.clone(), name: route.name.clone(), requires_auth, requires_admin });
        collect_entries(&route.children, &path, requires_auth, requires_admin, out);
    }
}

fn join_paths(base: &str, child: &str) -> String {
    let mut segments = split_segments(base);
    segments.extend(split_segments(child));
    format!("/{}", segments.join("/"))
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Strip query and fragment, collapse empty segments, keep a leading `/`.
pub(crate) fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let segments = split_segments(&raw[..end]);
    format!("/{}", segments.join("/"))
}
