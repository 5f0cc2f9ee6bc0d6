//! Pages: one per [`Route`], rendered as text.
//!
//! Each page loads through [`Queries`] and hands [`QueryState`]s to a pure
//! render function, so the rendering can be exercised without a server.

use std::fmt::Write;

use mythos_client::{ClientError, Queries, QueryState};
use mythos_core::article::{Article, ArticleListParams, ArticleType};
use mythos_core::naming::humanize;
use mythos_core::project::{Project, ProjectListParams};
use mythos_core::types::DbId;
use mythos_core::user::{User, UserListParams, UserWithProjects};

use crate::dispatch::ArticleView;
use crate::routes::Route;
use crate::session::UserSession;

pub const LOADING: &str = "Loading...";
pub const NO_USER_SELECTED: &str = "No user selected";

/// Renders pages for the user selected in `session`.
pub struct Pages<'a> {
    queries: &'a Queries,
    session: &'a UserSession,
}

impl<'a> Pages<'a> {
    pub fn new(queries: &'a Queries, session: &'a UserSession) -> Self {
        Self { queries, session }
    }

    pub async fn render(&self, route: &Route) -> String {
        tracing::debug!(route = %route, "Rendering page");
        match route {
            Route::Home => self.home().await,
            Route::Projects => self.projects().await,
            Route::Project(id) => self.project(*id).await,
            Route::ProjectHome(id) => self.project_home(*id).await,
            Route::ProjectArticle {
                project_id,
                article_id,
            } => self.article(*article_id, Some(*project_id)).await,
            Route::Article(id) => self.article(*id, None).await,
            Route::Users => self.users().await,
            Route::Profile(username) => self.profile(username).await,
            Route::Admin => self.admin().await,
            Route::NotFound(path) => render_not_found(path),
        }
    }

    fn viewer(&self) -> Option<DbId> {
        self.session.current_user_id()
    }

    fn article_params(&self, project_id: DbId) -> ArticleListParams {
        ArticleListParams {
            project_id: Some(project_id),
            user_id: self.viewer(),
            ..Default::default()
        }
    }

    async fn home(&self) -> String {
        let projects = match self.viewer() {
            Some(user_id) => QueryState::from_result(
                self.queries
                    .projects(&ProjectListParams {
                        user_id: Some(user_id),
                        ..Default::default()
                    })
                    .await,
            ),
            None => QueryState::Idle,
        };
        render_home(self.session.current_user(), &projects)
    }

    async fn projects(&self) -> String {
        let Some(user_id) = self.viewer() else {
            return render_no_user();
        };
        let params = ProjectListParams {
            user_id: Some(user_id),
            ..Default::default()
        };
        let projects = QueryState::from_result(self.queries.projects(&params).await);
        render_project_list(&projects)
    }

    async fn project(&self, id: DbId) -> String {
        let project = match self.queries.project(id).await {
            Err(e) if is_not_found(&e) => return render_missing("Project"),
            result => QueryState::from_result(result),
        };
        let articles = QueryState::from_result(self.queries.articles(&self.article_params(id)).await);
        render_project(&project, &articles)
    }

    async fn project_home(&self, id: DbId) -> String {
        let project = match self.queries.project(id).await {
            Err(e) if is_not_found(&e) => return render_missing("Project"),
            result => QueryState::from_result(result),
        };
        let articles = QueryState::from_result(self.queries.articles(&self.article_params(id)).await);
        render_project_home(&project, &articles)
    }

    async fn article(&self, id: DbId, project_id: Option<DbId>) -> String {
        let article = match self.queries.article(id).await {
            Err(e) if is_not_found(&e) => return render_missing("Article"),
            result => QueryState::from_result(result),
        };
        render_article(&article, project_id)
    }

    async fn users(&self) -> String {
        let users = QueryState::from_result(self.queries.users(&UserListParams::default()).await);
        render_users(&users, self.viewer())
    }

    async fn profile(&self, username: &str) -> String {
        let user = match self.queries.user_by_username(username).await {
            Ok(user) => user,
            Err(e) if is_not_found(&e) => return render_missing("User"),
            Err(e) => return render_failure("profile", &e.user_message()),
        };
        let profile = QueryState::from_result(self.queries.user_with_projects(user.id).await);
        render_profile(&profile)
    }

    async fn admin(&self) -> String {
        let params = UserListParams {
            active_only: Some(false),
            ..Default::default()
        };
        let users = QueryState::from_result(self.queries.users(&params).await);
        render_admin(&users)
    }
}

fn is_not_found(err: &ClientError) -> bool {
    err.status() == Some(404)
}

fn render_failure(what: &str, message: &str) -> String {
    format!("Failed to load {what}: {message}\n")
}

/// Text for a state that holds no data. `None` when the state is ready.
fn pending<T>(state: &QueryState<T>, what: &str) -> Option<String> {
    match state {
        QueryState::Ready(_) => None,
        QueryState::Idle => Some(String::new()),
        QueryState::Loading => Some(format!("{LOADING}\n")),
        QueryState::Failed(message) => Some(render_failure(what, message)),
    }
}

pub fn render_not_found(path: &str) -> String {
    format!("# Page Not Found\nNothing lives at {path}.\n")
}

pub fn render_missing(entity: &str) -> String {
    format!(
        "# {entity} Not Found\nThe {} you're looking for doesn't exist.\n",
        entity.to_lowercase()
    )
}

pub fn render_no_user() -> String {
    format!("# {NO_USER_SELECTED}\nSelect a user to see their projects.\n")
}

pub fn render_home(user: Option<&User>, projects: &QueryState<Vec<Project>>) -> String {
    let mut out = String::from("# Mythos Engine\nBuild worlds, one article at a time.\n\n");
    match user {
        Some(user) => {
            let _ = writeln!(out, "Signed in as {} (@{})", user.display_name(), user.username);
            if let Some(projects) = projects.data() {
                let _ = writeln!(out, "You have {} project(s).", projects.len());
            } else if let Some(text) = pending(projects, "projects") {
                out.push_str(&text);
            }
        }
        None => {
            let _ = writeln!(out, "{NO_USER_SELECTED}.");
        }
    }
    out
}

pub fn render_project_list(projects: &QueryState<Vec<Project>>) -> String {
    let mut out = String::from("# Projects\n");
    if let Some(text) = pending(projects, "projects") {
        return out + &text;
    }
    let projects = projects.data().map(Vec::as_slice).unwrap_or_default();
    if projects.is_empty() {
        out.push_str("No projects yet\n");
        return out;
    }
    for project in projects {
        let _ = writeln!(out, "- {} {}", Route::Project(project.id), project.name);
        if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "  {description}");
        }
    }
    out
}

fn article_line(out: &mut String, article: &Article) {
    let route = Route::ProjectArticle {
        project_id: article.project_id,
        article_id: article.id,
    };
    let _ = writeln!(
        out,
        "- {} {} [{}] ({})",
        route,
        article.title,
        humanize(article.body.type_tag()),
        article.visibility.label()
    );
}

pub fn render_project(project: &QueryState<Project>, articles: &QueryState<Vec<Article>>) -> String {
    let Some(project) = project.data() else {
        return pending(project, "project").unwrap_or_default();
    };
    let mut out = format!("# {}\n", project.name);
    if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "{description}");
    }
    if let Some(text) = pending(articles, "articles") {
        return out + "\n" + &text;
    }
    let articles = articles.data().map(Vec::as_slice).unwrap_or_default();
    let _ = writeln!(out, "\n## Articles ({})", articles.len());
    if articles.is_empty() {
        out.push_str("No articles yet\n");
    }
    for article in articles {
        article_line(&mut out, article);
    }
    out
}

/// Articles grouped by kind, known kinds first in their declared order, then
/// unrecognised tags alphabetically.
pub fn group_by_type(articles: &[Article]) -> Vec<(String, Vec<&Article>)> {
    let mut groups: Vec<(String, Vec<&Article>)> = Vec::new();
    for kind in ArticleType::ALL {
        let members: Vec<&Article> = articles
            .iter()
            .filter(|a| a.article_type() == Some(*kind))
            .collect();
        if !members.is_empty() {
            groups.push((kind.label(), members));
        }
    }

    let mut unknown: Vec<&str> = articles
        .iter()
        .filter(|a| a.article_type().is_none())
        .map(|a| a.body.type_tag())
        .collect();
    unknown.sort_unstable();
    unknown.dedup();
    for tag in unknown {
        let members = articles.iter().filter(|a| a.body.type_tag() == tag).collect();
        groups.push((humanize(tag), members));
    }
    groups
}

pub fn render_project_home(project: &QueryState<Project>, articles: &QueryState<Vec<Article>>) -> String {
    let Some(project) = project.data() else {
        return pending(project, "project").unwrap_or_default();
    };
    let mut out = format!("# {}\n", project.name);
    if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "{description}");
    }
    if let Some(text) = pending(articles, "articles") {
        return out + "\n" + &text;
    }
    let articles = articles.data().map(Vec::as_slice).unwrap_or_default();
    if articles.is_empty() {
        out.push_str("\nNo articles yet. Create your first one!\n");
        return out;
    }
    for (label, members) in group_by_type(articles) {
        let _ = writeln!(out, "\n## {label} ({})", members.len());
        for article in members {
            article_line(&mut out, article);
        }
    }
    out
}

/// Render one article through the dispatcher. When reached through a
/// project path, the article must belong to that project.
pub fn render_article(article: &QueryState<Article>, project_id: Option<DbId>) -> String {
    let Some(article) = article.data() else {
        return pending(article, "article").unwrap_or_default();
    };
    if project_id.is_some_and(|pid| pid != article.project_id) {
        return render_missing("Article");
    }
    ArticleView::dispatch(article).render()
}

pub fn render_users(users: &QueryState<Vec<User>>, current: Option<DbId>) -> String {
    let mut out = String::from("# Users\n");
    if let Some(text) = pending(users, "users") {
        return out + &text;
    }
    let users = users.data().map(Vec::as_slice).unwrap_or_default();
    if users.is_empty() {
        out.push_str("No users found.\n");
    }
    for user in users {
        let marker = if Some(user.id) == current { "*" } else { "-" };
        let _ = writeln!(
            out,
            "{marker} {} (@{}) {}",
            user.display_name(),
            user.username,
            Route::Profile(user.username.clone())
        );
    }
    out
}

pub fn render_profile(profile: &QueryState<UserWithProjects>) -> String {
    let Some(profile) = profile.data() else {
        return pending(profile, "profile").unwrap_or_default();
    };
    let user = &profile.user;
    let mut out = format!("# {}\n@{} | {}\n", user.display_name(), user.username, user.email);
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
        let _ = writeln!(out, "\n{bio}");
    }
    let _ = writeln!(out, "\n## Projects ({})", profile.projects.len());
    for project in &profile.projects {
        let _ = writeln!(out, "- {} {}", Route::Project(project.id), project.name);
    }
    out
}

pub fn render_admin(users: &QueryState<Vec<User>>) -> String {
    let mut out = String::from("# Admin - User Management\n");
    if let Some(text) = pending(users, "users") {
        return out + &text;
    }
    let users = users.data().map(Vec::as_slice).unwrap_or_default();
    let active = users.iter().filter(|u| u.is_active).count();
    let _ = writeln!(
        out,
        "Total: {} | Active: {} | Inactive: {}\n",
        users.len(),
        active,
        users.len() - active
    );
    if users.is_empty() {
        out.push_str("No users found.\n");
    }
    for user in users {
        let status = if user.is_active { "active" } else { "inactive" };
        let _ = writeln!(
            out,
            "- #{} {} @{} | {} [{status}]",
            user.id,
            user.display_name(),
            user.username,
            user.email
        );
    }
    out
}
