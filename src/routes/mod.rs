//! Client-side route table.
//!
//! Maps URL paths to views. Paths carrying an entity key (news id, username,
//! tournament id) are parsed into typed variants; anything unmatched resolves
//! to [`Route::NotFound`].

use std::fmt;

/// A view the front-end can display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Chess,
    CreateNews,
    EditNews { id: u64 },
    Comments { news_id: u64 },
    Users,
    User { username: String },
    Activities,
    Attendance,
    Tournaments,
    Tournament { id: u64 },
    Events,
    Login,
    PermissionDenied,
    NotFound,
}

impl Route {
    /// Resolve a URL path. Query strings and trailing slashes are ignored.
    pub fn resolve(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["chess"] => Route::Chess,
            ["createNews"] => Route::CreateNews,
            ["news", id] => parse_id(id).map_or(Route::NotFound, |news_id| Route::Comments {
                news_id,
            }),
            ["news", id, "edit"] => {
                parse_id(id).map_or(Route::NotFound, |id| Route::EditNews { id })
            }
            ["users"] => Route::Users,
            ["users", username] => Route::User {
                username: (*username).to_string(),
            },
            ["activities"] => Route::Activities,
            ["attendance"] => Route::Attendance,
            ["tournaments"] => Route::Tournaments,
            ["tournaments", id] => {
                parse_id(id).map_or(Route::NotFound, |id| Route::Tournament { id })
            }
            ["events"] => Route::Events,
            ["login"] => Route::Login,
            ["forbidden"] => Route::PermissionDenied,
            _ => Route::NotFound,
        }
    }

    /// Route name, stable across path changes.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::About => "about",
            Route::Chess => "chess",
            Route::CreateNews => "createNews",
            Route::EditNews { .. } => "editNews",
            Route::Comments { .. } => "comments",
            Route::Users => "users",
            Route::User { .. } => "user",
            Route::Activities => "activities",
            Route::Attendance => "attendance",
            Route::Tournaments => "tournaments",
            Route::Tournament { .. } => "tournament",
            Route::Events => "events",
            Route::Login => "login",
            Route::PermissionDenied => "permissionDenied",
            Route::NotFound => "notFound",
        }
    }
}

fn parse_id(segment: &str) -> Option<u64> {
    segment.parse().ok()
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::About => write!(f, "/about"),
            Route::Chess => write!(f, "/chess"),
            Route::CreateNews => write!(f, "/createNews"),
            Route::EditNews { id } => write!(f, "/news/{}/edit", id),
            Route::Comments { news_id } => write!(f, "/news/{}", news_id),
            Route::Users => write!(f, "/users"),
            Route::User { username } => write!(f, "/users/{}", username),
            Route::Activities => write!(f, "/activities"),
            Route::Attendance => write!(f, "/attendance"),
            Route::Tournaments => write!(f, "/tournaments"),
            Route::Tournament { id } => write!(f, "/tournaments/{}", id),
            Route::Events => write!(f, "/events"),
            Route::Login => write!(f, "/login"),
            Route::PermissionDenied => write!(f, "/forbidden"),
            Route::NotFound => write!(f, "/404"),
        }
    }
}

/// Router collaborator that receives redirects from resource clients.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only records the redirect in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!("Navigating to {} ({})", route, route.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_static_routes() {
        assert_eq!(Route::resolve("/"), Route::Home);
        assert_eq!(Route::resolve(""), Route::Home);
        assert_eq!(Route::resolve("/about"), Route::About);
        assert_eq!(Route::resolve("/chess/"), Route::Chess);
        assert_eq!(Route::resolve("/createNews"), Route::CreateNews);
        assert_eq!(Route::resolve("/login?next=/users"), Route::Login);
    }

    #[test]
    fn test_resolve_parameterized_routes() {
        assert_eq!(Route::resolve("/news/5"), Route::Comments { news_id: 5 });
        assert_eq!(Route::resolve("/news/5/edit"), Route::EditNews { id: 5 });
        assert_eq!(
            Route::resolve("/users/jdoe"),
            Route::User {
                username: "jdoe".to_string()
            }
        );
        assert_eq!(Route::resolve("/tournaments/3"), Route::Tournament { id: 3 });
    }

    #[test]
    fn test_unmatched_paths_are_not_found() {
        assert_eq!(Route::resolve("/news/abc"), Route::NotFound);
        assert_eq!(Route::resolve("/nope"), Route::NotFound);
        assert_eq!(Route::resolve("/news/1/edit/more"), Route::NotFound);
    }

    #[test]
    fn test_display_resolves_back() {
        let routes = [
            Route::Home,
            Route::EditNews { id: 12 },
            Route::Comments { news_id: 4 },
            Route::User {
                username: "kasparov".to_string(),
            },
            Route::Tournament { id: 7 },
            Route::PermissionDenied,
        ];
        for route in routes {
            assert_eq!(Route::resolve(&route.to_string()), route);
        }
    }
}
