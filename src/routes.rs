use crate::session::SessionState;

/// Client-side navigation surface. Unmatched paths resolve to the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Store,
    Login,
    Register,
    Orders,
    Inventory,
    Admin,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        match path.trim() {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/orders" => Route::Orders,
            "/inventory" => Route::Inventory,
            "/admin" => Route::Admin,
            _ => Route::Store,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Store => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Orders => "/orders",
            Route::Inventory => "/inventory",
            Route::Admin => "/admin",
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Route::Orders | Route::Inventory | Route::Admin)
    }

    pub fn requires_admin(self) -> bool {
        matches!(self, Route::Inventory | Route::Admin)
    }
}

/// Pure route guard, independent of any rendering concern.
pub fn can_access(session: &SessionState, route: Route) -> bool {
    if route.requires_admin() {
        return session.is_authenticated() && session.is_admin();
    }
    if route.requires_auth() {
        return session.is_authenticated();
    }
    true
}

/// Where to send a caller who cannot access `route`: unauthenticated callers
/// go to the sign-in screen, authenticated ones without the role go home.
pub fn fallback(session: &SessionState, route: Route) -> Route {
    debug_assert!(!can_access(session, route));
    if !session.is_authenticated() && route.requires_auth() {
        Route::Login
    } else {
        Route::Store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::sample_user;
    use crate::session::{SessionState, ADMIN_ROLE};

    fn anonymous() -> SessionState {
        SessionState::default()
    }

    fn customer() -> SessionState {
        SessionState {
            token: Some("t".into()),
            user: Some(sample_user("customer")),
        }
    }

    fn admin() -> SessionState {
        SessionState {
            token: Some("t".into()),
            user: Some(sample_user(ADMIN_ROLE)),
        }
    }

    #[test]
    fn unmatched_paths_resolve_to_store() {
        assert_eq!(Route::parse("/"), Route::Store);
        assert_eq!(Route::parse(""), Route::Store);
        assert_eq!(Route::parse("/no-such-page"), Route::Store);
        assert_eq!(Route::parse(" /orders "), Route::Orders);
    }

    #[test]
    fn guard_truth_table() {
        for route in [Route::Store, Route::Login, Route::Register] {
            assert!(can_access(&anonymous(), route));
            assert!(can_access(&customer(), route));
            assert!(can_access(&admin(), route));
        }

        assert!(!can_access(&anonymous(), Route::Orders));
        assert!(can_access(&customer(), Route::Orders));
        assert!(can_access(&admin(), Route::Orders));

        for route in [Route::Inventory, Route::Admin] {
            assert!(!can_access(&anonymous(), route));
            assert!(!can_access(&customer(), route));
            assert!(can_access(&admin(), route));
        }
    }

    #[test]
    fn fallback_targets() {
        assert_eq!(fallback(&anonymous(), Route::Orders), Route::Login);
        assert_eq!(fallback(&anonymous(), Route::Admin), Route::Login);
        assert_eq!(fallback(&customer(), Route::Inventory), Route::Store);
    }
}
