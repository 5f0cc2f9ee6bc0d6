//! Hierarchical cache keys.
//!
//! A key is a list of segments, e.g. `["articles", "list", "project:4", ...]`.
//! Invalidating a key drops every cached entry whose key starts with it, so
//! `articles::all()` drops every article entry and
//! `articles::project_lists(4)` only the lists scoped to project 4.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn root(segment: &str) -> Self {
        Self(vec![segment.to_string()])
    }

    pub fn push(mut self, segment: impl fmt::Display) -> Self {
        self.0.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// True if `self` equals `prefix` or extends it.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

/// Canonical form of list parameters for use as a key segment. Absent
/// fields are skipped when serialized, so equal params give equal segments.
fn params_segment<P: Serialize>(params: &P) -> String {
    serde_json::to_string(params).unwrap_or_default()
}

pub mod users {
    use mythos_core::types::DbId;
    use mythos_core::user::UserListParams;

    use super::{params_segment, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::root("users")
    }

    pub fn lists() -> QueryKey {
        all().push("list")
    }

    pub fn list(params: &UserListParams) -> QueryKey {
        lists().push(params_segment(params))
    }

    pub fn detail(id: DbId) -> QueryKey {
        all().push("detail").push(id)
    }

    pub fn by_usernames() -> QueryKey {
        all().push("by-username")
    }

    pub fn by_username(username: &str) -> QueryKey {
        by_usernames().push(username)
    }

    pub fn all_with_projects() -> QueryKey {
        all().push("with-projects")
    }

    pub fn with_projects(id: DbId) -> QueryKey {
        all_with_projects().push(id)
    }
}

pub mod projects {
    use mythos_core::project::ProjectListParams;
    use mythos_core::types::DbId;

    use super::{params_segment, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::root("projects")
    }

    pub fn lists() -> QueryKey {
        all().push("list")
    }

    pub fn list(params: &ProjectListParams) -> QueryKey {
        lists().push(params_segment(params))
    }

    pub fn detail(id: DbId) -> QueryKey {
        all().push("detail").push(id)
    }
}

pub mod articles {
    use mythos_core::article::ArticleListParams;
    use mythos_core::types::DbId;

    use super::{params_segment, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::root("articles")
    }

    pub fn lists() -> QueryKey {
        all().push("list")
    }

    /// Lists scoped to one project.
    pub fn project_lists(project_id: DbId) -> QueryKey {
        lists().push(format!("project:{project_id}"))
    }

    /// Lists not scoped to a project.
    pub fn unscoped_lists() -> QueryKey {
        lists().push("all")
    }

    pub fn list(params: &ArticleListParams) -> QueryKey {
        let scope = match params.project_id {
            Some(project_id) => project_lists(project_id),
            None => unscoped_lists(),
        };
        scope.push(params_segment(params))
    }

    pub fn detail(id: DbId) -> QueryKey {
        all().push("detail").push(id)
    }
}

pub mod images {
    use mythos_core::pagination::Page;
    use mythos_core::types::DbId;

    use super::{params_segment, QueryKey};

    pub fn all() -> QueryKey {
        QueryKey::root("images")
    }

    pub fn project(project_id: DbId) -> QueryKey {
        all().push("project").push(project_id)
    }

    pub fn by_project(project_id: DbId, page: &Page) -> QueryKey {
        project(project_id).push(params_segment(page))
    }
}

#[cfg(test)]
mod tests {
    use mythos_core::article::ArticleListParams;
    use mythos_core::user::UserListParams;

    use super::*;

    #[test]
    fn detail_keys_nest_under_all() {
        assert!(users::detail(3).starts_with(&users::all()));
        assert!(!users::detail(3).starts_with(&projects::all()));
        assert_eq!(users::detail(3).to_string(), "users/detail/3");
    }

    #[test]
    fn equal_params_give_equal_keys() {
        let a = UserListParams {
            active_only: Some(true),
            ..Default::default()
        };
        let b = UserListParams {
            active_only: Some(true),
            ..Default::default()
        };
        assert_eq!(users::list(&a), users::list(&b));
        assert_ne!(users::list(&a), users::list(&UserListParams::default()));
    }

    #[test]
    fn article_lists_are_scoped_by_project() {
        let scoped = articles::list(&ArticleListParams::for_project(4));
        assert!(scoped.starts_with(&articles::project_lists(4)));
        assert!(!scoped.starts_with(&articles::project_lists(40)));
        assert!(!scoped.starts_with(&articles::unscoped_lists()));

        let unscoped = articles::list(&ArticleListParams::default());
        assert!(unscoped.starts_with(&articles::unscoped_lists()));
        assert!(unscoped.starts_with(&articles::lists()));
    }

    #[test]
    fn prefix_must_match_whole_segments() {
        let key = QueryKey::root("articles").push("detail").push(12);
        assert!(!key.starts_with(&QueryKey::root("articles").push("detail").push(1)));
    }
}
