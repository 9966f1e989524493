use crate::model::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Auth,
    Dashboard,
    Companies,
    Products,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow(Route),
    Redirect(Route),
}

/// Navigation entries in display order
pub const MENU: [(Route, &str); 3] = [
    (Route::Dashboard, "Dashboard"),
    (Route::Companies, "Companies"),
    (Route::Products, "Products"),
];

impl Route {
    /// Unknown paths land on the dashboard
    pub fn from_path(path: &str) -> Route {
        if path == "/auth" {
            Route::Auth
        } else if path.starts_with("/companies") {
            Route::Companies
        } else if path.starts_with("/products") {
            Route::Products
        } else {
            Route::Dashboard
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Auth => "/auth",
            Route::Dashboard => "/",
            Route::Companies => "/companies",
            Route::Products => "/products",
        }
    }

    pub fn is_protected(self) -> bool {
        self != Route::Auth
    }

    /// Menu entry highlighted while this route is shown
    pub fn selected_menu(self) -> Route {
        match self {
            Route::Companies | Route::Products => self,
            Route::Auth | Route::Dashboard => Route::Dashboard,
        }
    }
}

pub fn guard(route: Route, session: Option<&Session>) -> Access {
    if route.is_protected() && session.is_none() {
        Access::Redirect(Route::Auth)
    } else {
        Access::Allow(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session { token: "t".into(), user_id: "u".into(), username: "admin".into() }
    }

    #[test]
    fn parses_paths() {
        assert_eq!(Route::from_path("/auth"), Route::Auth);
        assert_eq!(Route::from_path("/"), Route::Dashboard);
        assert_eq!(Route::from_path("/companies"), Route::Companies);
        assert_eq!(Route::from_path("/companies/42"), Route::Companies);
        assert_eq!(Route::from_path("/products"), Route::Products);
        assert_eq!(Route::from_path("/nowhere"), Route::Dashboard);
        for (route, _) in MENU.iter() {
            assert_eq!(Route::from_path(route.path()), *route);
        }
    }

    #[test]
    fn redirects_when_logged_out() {
        assert_eq!(guard(Route::Products, None), Access::Redirect(Route::Auth));
        assert_eq!(guard(Route::Dashboard, None), Access::Redirect(Route::Auth));
        assert_eq!(guard(Route::Auth, None), Access::Allow(Route::Auth));
    }

    #[test]
    fn allows_when_logged_in() {
        let s = session();
        assert_eq!(guard(Route::Companies, Some(&s)), Access::Allow(Route::Companies));
        assert_eq!(guard(Route::Auth, Some(&s)), Access::Allow(Route::Auth));
    }

    #[test]
    fn menu_selection() {
        assert_eq!(Route::Products.selected_menu(), Route::Products);
        assert_eq!(Route::Auth.selected_menu(), Route::Dashboard);
    }
}
