//! Console routes and navigation history

use std::fmt;

/// Which tab of the user listings page is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingView {
    #[default]
    Users,
    Providers,
}

impl ListingView {
    pub fn toggle(self) -> Self {
        match self {
            Self::Users => Self::Providers,
            Self::Providers => Self::Users,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Providers => "Providers",
        }
    }
}

/// A page of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    UserListings(ListingView),
    InviteProvider,
    Returns,
}

impl Default for Route {
    fn default() -> Self {
        Route::UserListings(ListingView::Users)
    }
}

impl Route {
    /// Landing page after a provider invitation is sent
    pub fn user_listings() -> Self {
        Route::UserListings(ListingView::Users)
    }

    /// Provider tab of the listings, where the invite flow starts from
    pub fn provider_listings() -> Self {
        Route::UserListings(ListingView::Providers)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::UserListings(ListingView::Users) => "/application/user-listings",
            Route::UserListings(ListingView::Providers) => {
                "/application/user-listings?view=provider"
            }
            Route::InviteProvider => "/application/invite-provider",
            Route::Returns => "/application/returns",
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        let (base, query) = match path.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (path, None),
        };
        match base.trim_end_matches('/') {
            "/application/user-listings" => {
                let providers = query
                    .map(|q| q.split('&').any(|pair| pair == "view=provider"))
                    .unwrap_or(false);
                Some(if providers {
                    Self::provider_listings()
                } else {
                    Self::user_listings()
                })
            }
            "/application/invite-provider" => Some(Route::InviteProvider),
            "/application/returns" => Some(Route::Returns),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::UserListings(_) => "User Listings",
            Route::InviteProvider => "Invite Provider",
            Route::Returns => "Return Orders",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Capability to move the console to another page
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Pages remembered for going back; the oldest are dropped first
const MAX_HISTORY: usize = 32;

/// Current route plus the pages visited before it
#[derive(Debug, Default)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Router {
    pub fn current(&self) -> Route {
        self.current
    }

    /// Return to the previous page, if any
    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(route) => {
                self.current = route;
                true
            }
            None => false,
        }
    }
}

impl Navigator for Router {
    fn navigate(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        tracing::debug!(from = %self.current, to = %route, "navigate");
        // Switching listing tabs stays on the same page; the wizard is not
        // a page to come back to once left
        let same_page = matches!(
            (self.current, route),
            (Route::UserListings(_), Route::UserListings(_))
        );
        if !same_page && self.current != Route::InviteProvider {
            if self.history.len() == MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(self.current);
        }
        self.current = route;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in [
            Route::user_listings(),
            Route::provider_listings(),
            Route::InviteProvider,
            Route::Returns,
        ] {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }

    #[test]
    fn test_parse_unknown_and_query() {
        assert_eq!(Route::parse("/application/orders"), None);
        assert_eq!(
            Route::parse("/application/user-listings?page=2&view=provider"),
            Some(Route::provider_listings())
        );
        assert_eq!(
            Route::parse("/application/user-listings?view=user"),
            Some(Route::user_listings())
        );
    }

    #[test]
    fn test_router_navigates_and_goes_back() {
        let mut router = Router::default();
        router.navigate(Route::Returns);
        assert_eq!(router.current(), Route::Returns);
        assert!(router.go_back());
        assert_eq!(router.current(), Route::user_listings());
        assert!(!router.go_back());
    }

    #[test]
    fn test_router_skips_wizard_in_history() {
        let mut router = Router::default();
        router.navigate(Route::InviteProvider);
        router.navigate(Route::Returns);
        assert!(router.go_back());
        assert_eq!(router.current(), Route::user_listings());
        assert!(!router.go_back());
    }

    #[test]
    fn test_navigate_to_same_route_is_noop() {
        let mut router = Router::default();
        router.navigate(Route::user_listings());
        assert!(!router.go_back());
    }

    #[test]
    fn test_listing_tab_switches_do_not_grow_history() {
        let mut router = Router::default();
        router.navigate(Route::Returns);
        for _ in 0..5 {
            router.navigate(Route::provider_listings());
            router.navigate(Route::user_listings());
        }
        router.navigate(Route::provider_listings());
        assert_eq!(router.history.len(), 2);
        assert!(router.go_back());
        assert_eq!(router.current(), Route::Returns);
    }

    #[test]
    fn test_history_is_capped() {
        let mut router = Router::default();
        for _ in 0..MAX_HISTORY {
            router.navigate(Route::Returns);
            router.navigate(Route::user_listings());
        }
        assert_eq!(router.history.len(), MAX_HISTORY);

        let mut steps = 0;
        while router.go_back() {
            steps += 1;
        }
        assert_eq!(steps, MAX_HISTORY);
    }

    #[test]
    fn test_listing_view_toggle() {
        assert_eq!(ListingView::Users.toggle(), ListingView::Providers);
        assert_eq!(ListingView::Providers.toggle().label(), "Users");
    }
}
