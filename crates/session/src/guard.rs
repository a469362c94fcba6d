//! Route guard
//!
//! Navigation access control over static route metadata. The check is
//! synchronous and purely state-based; token validity is only ever verified
//! at bootstrap, never per navigation.

use tracing::debug;

use crate::config::{LOGIN_PATH, REDIRECT_PARAM};
use crate::session::SessionHandle;

/// A navigable destination and its access requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
    pub requires_auth: bool,
}

/// The application route table
pub const ROUTES: &[Route] = &[
    Route { name: "home", path: "/", requires_auth: false },
    Route { name: "login", path: "/login", requires_auth: false },
    Route { name: "register", path: "/register", requires_auth: false },
    Route { name: "profile", path: "/profile", requires_auth: true },
    Route { name: "edit-profile", path: "/edit-profile", requires_auth: true },
    Route { name: "friends", path: "/friends", requires_auth: true },
    Route { name: "photos", path: "/photos", requires_auth: true },
    Route { name: "pets", path: "/pets", requires_auth: true },
    Route { name: "search", path: "/search", requires_auth: true },
];

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Navigation proceeds to the requested destination
    Proceed,
    /// Navigation is redirected to the contained destination instead
    Redirect(String),
}

/// Navigation interceptor enforcing per-route access control
pub struct RouteGuard {
    handle: SessionHandle,
    routes: &'static [Route],
}

impl RouteGuard {
    /// Guard over the application route table
    pub fn new(handle: SessionHandle) -> Self {
        Self::with_routes(handle, ROUTES)
    }

    /// Guard over a custom route table
    pub fn with_routes(handle: SessionHandle, routes: &'static [Route]) -> Self {
        Self { handle, routes }
    }

    /// Decide whether a navigation to `target` may complete.
    ///
    /// Unauthenticated navigation to a guarded route is redirected to the
    /// login destination with the original path preserved in the
    /// `redirect` query parameter. Paths missing from the table are treated
    /// as guarded.
    pub fn check(&self, target: &str) -> GuardDecision {
        let requires_auth = self
            .routes
            .iter()
            .find(|route| route.path == target)
            .is_none_or(|route| route.requires_auth);

        if !requires_auth || self.handle.is_authenticated() {
            return GuardDecision::Proceed;
        }

        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair(REDIRECT_PARAM, target)
            .finish();
        debug!(target, "unauthenticated navigation redirected to login");
        GuardDecision::Redirect(format!("{LOGIN_PATH}?{query}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    fn authenticated_handle() -> SessionHandle {
        let handle = SessionHandle::default();
        handle.replace(Session {
            token: Some("abc123".into()),
            user: None,
        });
        handle
    }

    #[test]
    fn public_route_always_proceeds() {
        let guard = RouteGuard::new(SessionHandle::default());
        assert_eq!(guard.check("/"), GuardDecision::Proceed);
        assert_eq!(guard.check("/login"), GuardDecision::Proceed);
        assert_eq!(guard.check("/register"), GuardDecision::Proceed);
    }

    #[test]
    fn guarded_route_redirects_when_unauthenticated() {
        let guard = RouteGuard::new(SessionHandle::default());
        assert_eq!(
            guard.check("/profile"),
            GuardDecision::Redirect("/login?redirect=%2Fprofile".to_string())
        );
    }

    #[test]
    fn guarded_route_proceeds_when_authenticated() {
        let guard = RouteGuard::new(authenticated_handle());
        assert_eq!(guard.check("/profile"), GuardDecision::Proceed);
    }

    #[test]
    fn unknown_path_is_treated_as_guarded() {
        let guard = RouteGuard::new(SessionHandle::default());
        assert!(matches!(
            guard.check("/definitely-not-a-route"),
            GuardDecision::Redirect(_)
        ));

        let guard = RouteGuard::new(authenticated_handle());
        assert_eq!(guard.check("/definitely-not-a-route"), GuardDecision::Proceed);
    }

    #[test]
    fn redirect_survives_logout_between_checks() {
        let handle = authenticated_handle();
        let guard = RouteGuard::new(handle.clone());
        assert_eq!(guard.check("/pets"), GuardDecision::Proceed);

        handle.replace(Session::default());
        assert!(matches!(guard.check("/pets"), GuardDecision::Redirect(_)));
    }

    #[test]
    fn redirect_target_round_trips_through_query() {
        let guard = RouteGuard::new(SessionHandle::default());
        let GuardDecision::Redirect(destination) = guard.check("/edit-profile") else {
            panic!("expected redirect");
        };

        let (path, query) = destination.split_once('?').unwrap();
        assert_eq!(path, LOGIN_PATH);

        let (key, original) = url::form_urlencoded::parse(query.as_bytes())
            .next()
            .unwrap();
        assert_eq!(key, REDIRECT_PARAM);
        assert_eq!(original, "/edit-profile");
    }
}
