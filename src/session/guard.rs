//! Route Guard
//!
//! Static route table with per-route titles and the auth redirect rule.

pub const DEFAULT_TITLE: &str = "Aplikacja budżetowa";
pub const HOME_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub title: Option<&'static str>,
    pub requires_auth: bool,
}

const fn public(path: &'static str) -> Route {
    Route {
        path,
        title: None,
        requires_auth: false,
    }
}

const fn protected(path: &'static str, title: &'static str) -> Route {
    Route {
        path,
        title: Some(title),
        requires_auth: true,
    }
}

pub const ROUTES: &[Route] = &[
    public("/login"),
    public("/register"),
    public("/reset-password"),
    public("/new-password"),
    protected("/settings/account", "Ustawienia konta"),
    protected("/onboarding", "Onboarding - Wybierz kategorie"),
    protected("/dashboard", "Dashboard"),
    protected("/categories", "Kategorie"),
    protected("/expenses", "Wydatki - Lista"),
];

/// Outcome of navigating to a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Render the page; `route` is `None` for unknown paths
    Render {
        route: Option<Route>,
        title: &'static str,
    },
    Redirect(String),
}

pub fn find(path: &str) -> Option<Route> {
    let path = strip_query(path);
    ROUTES.iter().copied().find(|r| r.path == path)
}

/// Document title for a path
pub fn title_for(path: &str) -> &'static str {
    find(path).and_then(|r| r.title).unwrap_or(DEFAULT_TITLE)
}

/// Apply the redirect rules to `full_path` (path plus optional query)
pub fn resolve(full_path: &str, authenticated: bool) -> Resolution {
    let path = strip_query(full_path);
    if path.is_empty() || path == "/" {
        return Resolution::Redirect(HOME_PATH.to_string());
    }

    let route = find(path);
    match route {
        Some(r) if r.requires_auth && !authenticated => Resolution::Redirect(format!(
            "/login?redirect={}",
            urlencoding::encode(full_path)
        )),
        _ => Resolution::Render {
            route,
            title: title_for(path),
        },
    }
}

/// Where to go after a successful login; only same-site paths are honored
pub fn post_login_target(redirect: Option<&str>) -> String {
    match redirect {
        Some(target) if target.starts_with('/') && !target.starts_with("//") => {
            target.to_string()
        }
        _ => HOME_PATH.to_string(),
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}
