use chrono::Utc;

use mythos_client::QueryState;
use mythos_core::article::{Article, ArticleBody, ArticleContent, Visibility};
use mythos_core::project::Project;
use mythos_core::user::{User, UserWithProjects};
use mythos_frontend::pages::{
    group_by_type, render_admin, render_article, render_home, render_project_home,
    render_project_list, render_users, LOADING, NO_USER_SELECTED,
};

fn project(id: i64, name: &str) -> Project {
    let now = Utc::now();
    Project {
        id,
        name: name.into(),
        description: Some("An archipelago".into()),
        owner_id: Some(3),
        created_at: now,
        updated_at: now,
    }
}

fn article(id: i64, title: &str, body: ArticleBody) -> Article {
    let now = Utc::now();
    Article {
        id,
        title: title.into(),
        content: ArticleContent::default(),
        body,
        visibility: Visibility::Public,
        author_id: Some(3),
        project_id: 1,
        header_image_id: None,
        header_image: None,
        spotify_url: None,
        created_at: now,
        updated_at: now,
    }
}

fn user(id: i64, username: &str, active: bool) -> User {
    let now = Utc::now();
    User {
        id,
        username: username.into(),
        email: format!("{username}@earthsea.org"),
        full_name: None,
        bio: None,
        avatar_url: None,
        is_active: active,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn home_without_user() {
    let text = render_home(None, &QueryState::Idle);
    assert!(text.contains(NO_USER_SELECTED));
}

#[test]
fn home_counts_projects() {
    let me = user(3, "ursula", true);
    let text = render_home(Some(&me), &QueryState::Ready(vec![project(1, "Earthsea")]));
    assert!(text.contains("@ursula"));
    assert!(text.contains("1 project(s)"));
}

#[test]
fn project_list_states() {
    assert!(render_project_list(&QueryState::Loading).contains(LOADING));
    assert!(render_project_list(&QueryState::Failed("boom".into()))
        .contains("Failed to load projects: boom"));
    assert!(render_project_list(&QueryState::Ready(vec![])).contains("No projects yet"));

    let text = render_project_list(&QueryState::Ready(vec![project(4, "Earthsea")]));
    assert!(text.contains("/projects/4 Earthsea"));
}

#[test]
fn grouping_follows_kind_order_then_unknown_tags() {
    let articles = vec![
        article(1, "Ged", ArticleBody::Character(None)),
        article(2, "Notes", ArticleBody::General),
        article(3, "Prophecy", ArticleBody::Unrecognized("prophecy".into())),
        article(4, "Havnor", ArticleBody::Location(None)),
        article(5, "Tenar", ArticleBody::Character(None)),
    ];
    let groups = group_by_type(&articles);
    let labels: Vec<&str> = groups.iter().map(|(label, _)| label.as_str()).collect();
    assert_eq!(labels, vec!["General", "Character", "Location", "Prophecy"]);
    assert_eq!(groups[1].1.len(), 2);
}

#[test]
fn project_home_without_articles() {
    let text = render_project_home(
        &QueryState::Ready(project(1, "Earthsea")),
        &QueryState::Ready(vec![]),
    );
    assert!(text.starts_with("# Earthsea"));
    assert!(text.contains("No articles yet. Create your first one!"));
}

#[test]
fn article_from_another_project_is_not_found() {
    let state = QueryState::Ready(article(9, "Havnor", ArticleBody::Lore));
    assert!(render_article(&state, Some(2)).contains("Article Not Found"));
    assert!(render_article(&state, Some(1)).contains("Havnor"));
    assert!(render_article(&state, None).contains("Havnor"));
}

#[test]
fn users_mark_the_current_one() {
    let users = QueryState::Ready(vec![user(3, "ursula", true), user(4, "ged", true)]);
    let text = render_users(&users, Some(4));
    assert!(text.contains("* ged (@ged)"));
    assert!(text.contains("- ursula (@ursula)"));
    assert!(render_users(&QueryState::Ready(vec![]), None).contains("No users found."));
}

#[test]
fn admin_totals() {
    let users = QueryState::Ready(vec![
        user(3, "ursula", true),
        user(4, "ged", false),
        user(5, "tenar", true),
    ]);
    let text = render_admin(&users);
    assert!(text.starts_with("# Admin - User Management"));
    assert!(text.contains("Total: 3 | Active: 2 | Inactive: 1"));
    assert!(text.contains("@ged | ged@earthsea.org [inactive]"));
}

#[test]
fn profile_lists_projects() {
    let profile = UserWithProjects {
        user: user(3, "ursula", true),
        projects: vec![project(1, "Earthsea")],
    };
    let text = mythos_frontend::pages::render_profile(&QueryState::Ready(profile));
    assert!(text.contains("## Projects (1)"));
    assert!(text.contains("/projects/1 Earthsea"));
}
