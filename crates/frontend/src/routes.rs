//! Application routes.
//!
//! ```text
//! /                                   Home
//! /projects                           Projects
//! /projects/{id}                      Project
//! /projects/{id}/home                 ProjectHome
//! /projects/{project_id}/{article_id} ProjectArticle
//! /articles/{id}                      Article
//! /users                              Users
//! /profile/{username}                 Profile
//! /admin                              Admin
//! ```

use std::fmt;
use std::str::FromStr;

use mythos_core::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Projects,
    Project(DbId),
    ProjectHome(DbId),
    ProjectArticle { project_id: DbId, article_id: DbId },
    Article(DbId),
    Users,
    Profile(String),
    Admin,
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("No page at '{0}'")]
    NoMatch(String),

    #[error("'{segment}' is not a valid id")]
    InvalidId { segment: String },
}

impl Route {
    /// Resolve a path, falling back to [`Route::NotFound`].
    pub fn resolve(path: &str) -> Route {
        path.parse()
            .unwrap_or_else(|_| Route::NotFound(path.to_string()))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Route::NotFound(_))
    }
}

fn parse_id(segment: &str) -> Result<DbId, RouteError> {
    segment
        .parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| RouteError::InvalidId {
            segment: segment.to_string(),
        })
}

impl FromStr for Route {
    type Err = RouteError;

    /// Parse a path. Query strings, fragments and a trailing slash are
    /// ignored.
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let bare = path
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = bare.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["projects"] => Route::Projects,
            ["projects", id] => Route::Project(parse_id(id)?),
            ["projects", id, "home"] => Route::ProjectHome(parse_id(id)?),
            ["projects", project_id, article_id] => Route::ProjectArticle {
                project_id: parse_id(project_id)?,
                article_id: parse_id(article_id)?,
            },
            ["articles", id] => Route::Article(parse_id(id)?),
            ["users"] => Route::Users,
            ["profile", username] => Route::Profile((*username).to_string()),
            ["admin"] => Route::Admin,
            _ => return Err(RouteError::NoMatch(path.to_string())),
        };
        Ok(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Projects => f.write_str("/projects"),
            Route::Project(id) => write!(f, "/projects/{id}"),
            Route::ProjectHome(id) => write!(f, "/projects/{id}/home"),
            Route::ProjectArticle {
                project_id,
                article_id,
            } => write!(f, "/projects/{project_id}/{article_id}"),
            Route::Article(id) => write!(f, "/articles/{id}"),
            Route::Users => f.write_str("/users"),
            Route::Profile(username) => write!(f, "/profile/{username}"),
            Route::Admin => f.write_str("/admin"),
            Route::NotFound(path) => f.write_str(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn named_paths_round_trip() {
        let routes = [
            Route::Home,
            Route::Projects,
            Route::Project(4),
            Route::ProjectHome(4),
            Route::ProjectArticle {
                project_id: 4,
                article_id: 10,
            },
            Route::Article(10),
            Route::Users,
            Route::Profile("ursula".into()),
            Route::Admin,
        ];
        for route in routes {
            assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn home_segment_wins_over_article_id() {
        assert_eq!(Route::resolve("/projects/4/home"), Route::ProjectHome(4));
        assert_eq!(
            Route::resolve("/projects/4/12"),
            Route::ProjectArticle {
                project_id: 4,
                article_id: 12
            }
        );
    }

    #[test]
    fn trailing_slash_and_query_ignored() {
        assert_eq!(Route::resolve("/projects/"), Route::Projects);
        assert_eq!(Route::resolve("/users?page=2"), Route::Users);
        assert_eq!(Route::resolve(""), Route::Home);
    }

    #[test]
    fn bad_ids_and_unknown_paths() {
        assert_matches!("/articles/abc".parse::<Route>(), Err(RouteError::InvalidId { .. }));
        assert_matches!("/articles/0".parse::<Route>(), Err(RouteError::InvalidId { .. }));
        assert_matches!("/settings".parse::<Route>(), Err(RouteError::NoMatch(_)));
        assert!(Route::resolve("/projects/4/10/extra").is_not_found());
        assert_eq!(
            Route::resolve("/nowhere"),
            Route::NotFound("/nowhere".into())
        );
    }
}
