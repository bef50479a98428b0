use std::collections::BTreeSet;
use std::sync::Arc;

use chrono_tz::Tz;
use httpmock::MockServer;
use noticeboard::application::app::{
    App, DELETE_NETWORK_ERROR, DispatchOutcome, Event, LOGIN_NETWORK_ERROR, LOGIN_REQUIRED,
    LOGIN_SUCCESS, POST_CREATED, POST_DELETED,
};
use noticeboard::application::posts::{EMPTY_NOTICE, PostListState};
use noticeboard::application::session::SESSION_KEYS;
use noticeboard::application::toast::ToastKind;
use noticeboard::domain::role::{ListId, SectionId};
use noticeboard::domain::session::Credentials;
use noticeboard::domain::theme::Theme;
use noticeboard::infra::http::HttpGateway;
use noticeboard::infra::storage::{KeyValueStore, MemoryStore};
use noticeboard::presentation::views;
use serde_json::{Value, json};
use url::Url;

type TestApp = App<HttpGateway, Arc<MemoryStore>>;

fn gateway(server: &MockServer) -> HttpGateway {
    let base = Url::parse(&format!("{}/", server.base_url())).expect("base url");
    HttpGateway::new(base, None).expect("gateway")
}

fn unreachable_gateway() -> HttpGateway {
    let base = Url::parse("http://127.0.0.1:9/").expect("base url");
    HttpGateway::new(base, None).expect("gateway")
}

fn signed_in(role: &str) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_entries([
        ("accessToken", "tok"),
        ("userRole", role),
        ("userId", "12"),
        ("userName", "Sam"),
    ]))
}

fn credentials() -> Credentials {
    Credentials {
        email: "a@b.com".into(),
        password: "x".into(),
    }
}

fn admin_post(id: i64) -> Value {
    json!({
        "id": id,
        "title": "Sports day",
        "content": "Wear trainers.",
        "author_first_name": "Ada",
        "author_last_name": "Lovelace",
        "class_name": "Year 5",
        "created_at": "Sun, 18 Oct 2026 15:04:00 GMT"
    })
}

fn feed_post() -> Value {
    json!({
        "title": "Sports day",
        "content": "Wear trainers.",
        "author_first_name": "Ada",
        "author_last_name": "Lovelace",
        "class_name": "Year 5",
        "created_at": "Sun, 18 Oct 2026 15:04:00 GMT"
    })
}

fn stored_keys(store: &MemoryStore) -> BTreeSet<String> {
    store
        .snapshot()
        .expect("snapshot")
        .into_keys()
        .collect()
}

fn latest_toast(app: &TestApp) -> (ToastKind, String) {
    let toast = app.page().toasts.latest().expect("toast raised");
    (toast.kind, toast.text.clone())
}

#[tokio::test]
async fn successful_login_persists_session_and_shows_dashboard() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/api/login");
        then.status(200).json_body(json!({
            "message": "Login successful",
            "access_token": "jwt",
            "user": {"id": 7, "first_name": "Pat", "last_name": "Lee", "email": "a@b.com", "role": "parent"}
        }));
    });
    let feed = server.mock(|when, then| {
        when.method("GET")
            .path("/api/parent/posts")
            .header("authorization", "Bearer jwt");
        then.status(200).json_body(json!([]));
    });

    let store = Arc::new(MemoryStore::new());
    let mut app = TestApp::bootstrap(gateway(&server), store.clone(), Tz::UTC)
        .await
        .expect("bootstrap");
    assert!(app.page().is_visible(SectionId::Login));

    let outcome = app
        .dispatch(Event::SubmitLogin(credentials()))
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Completed);
    let expected: BTreeSet<String> = SESSION_KEYS.iter().map(|key| key.to_string()).collect();
    assert_eq!(stored_keys(&store), expected);
    assert_eq!(store.get("accessToken").expect("get").as_deref(), Some("jwt"));
    assert_eq!(store.get("userId").expect("get").as_deref(), Some("7"));
    assert!(app.page().is_visible(SectionId::ParentDashboard));
    assert_eq!(
        app.page().welcome.as_deref(),
        Some("Welcome, Pat! (parent)")
    );
    assert_eq!(
        latest_toast(&app),
        (ToastKind::Success, LOGIN_SUCCESS.to_string())
    );
    feed.assert();
}

#[tokio::test]
async fn rejected_login_writes_nothing_and_toasts_server_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST")
            .path("/api/login")
            .json_body(json!({"email": "a@b.com", "password": "x"}));
        then.status(401)
            .json_body(json!({"message": "Invalid credentials"}));
    });

    let store = Arc::new(MemoryStore::new());
    let mut app = TestApp::bootstrap(gateway(&server), store.clone(), Tz::UTC)
        .await
        .expect("bootstrap");

    let outcome = app
        .dispatch(Event::SubmitLogin(credentials()))
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Failed);
    assert!(stored_keys(&store).is_empty());
    assert!(app.page().is_visible(SectionId::Login));
    assert!(app.session().is_none());
    assert_eq!(
        latest_toast(&app),
        (ToastKind::Error, "Invalid credentials".to_string())
    );
}

#[tokio::test]
async fn unreachable_backend_on_login_is_network_error() {
    let store = Arc::new(MemoryStore::new());
    let mut app = TestApp::bootstrap(unreachable_gateway(), store.clone(), Tz::UTC)
        .await
        .expect("bootstrap");

    let outcome = app
        .dispatch(Event::SubmitLogin(credentials()))
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Failed);
    assert!(stored_keys(&store).is_empty());
    assert_eq!(
        latest_toast(&app),
        (ToastKind::Error, LOGIN_NETWORK_ERROR.to_string())
    );
}

#[tokio::test]
async fn unknown_role_in_grant_is_refused() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/api/login");
        then.status(200).json_body(json!({
            "access_token": "jwt",
            "user": {"id": 3, "first_name": "Jo", "role": "janitor"}
        }));
    });

    let store = Arc::new(MemoryStore::new());
    let mut app = TestApp::bootstrap(gateway(&server), store.clone(), Tz::UTC)
        .await
        .expect("bootstrap");

    let outcome = app
        .dispatch(Event::SubmitLogin(credentials()))
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Failed);
    assert!(stored_keys(&store).is_empty());
    assert!(app.page().is_visible(SectionId::Login));
    assert_eq!(
        latest_toast(&app),
        (ToastKind::Error, "Unsupported role \"janitor\".".to_string())
    );
}

#[tokio::test]
async fn empty_parent_feed_renders_empty_state_only() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/parent/posts");
        then.status(200).json_body(json!([]));
    });

    let app = TestApp::bootstrap(gateway(&server), signed_in("parent"), Tz::UTC)
        .await
        .expect("bootstrap");

    let state = app.page().list(ListId::ParentPosts).expect("parent list");
    assert_eq!(state, &PostListState::Empty);
    assert_eq!(state.notice(), Some(EMPTY_NOTICE));
    assert_eq!(app.page().post_lists.len(), 1);
}

#[tokio::test]
async fn rejected_feed_renders_error_state_with_server_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/student/posts");
        then.status(403)
            .json_body(json!({"message": "Token expired"}));
    });

    let app = TestApp::bootstrap(gateway(&server), signed_in("student"), Tz::UTC)
        .await
        .expect("bootstrap");

    assert!(app.page().is_visible(SectionId::StudentDashboard));
    let state = app.page().list(ListId::StudentPosts).expect("student list");
    assert!(state.is_error());
    assert_eq!(state.notice(), Some("Error fetching posts: Token expired"));
    assert!(state.cards().is_empty());
}

#[tokio::test]
async fn admin_cards_carry_delete_controls() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/admin/posts");
        then.status(200).json_body(json!([admin_post(5)]));
    });

    let app = TestApp::bootstrap(gateway(&server), signed_in("school_admin"), Tz::UTC)
        .await
        .expect("bootstrap");

    assert!(app.page().is_visible(SectionId::AdminDashboard));
    assert_eq!(
        app.page().welcome.as_deref(),
        Some("Welcome, Sam! (school admin)")
    );
    let cards = app
        .page()
        .list(ListId::AdminPosts)
        .expect("admin list")
        .cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].delete.map(|control| control.post_id), Some(5));
    assert_eq!(
        cards[0].byline(),
        "Posted by Ada Lovelace in Year 5 on October 18, 2026 at 03:04 PM"
    );
}

#[tokio::test]
async fn student_cards_have_no_delete_control() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/student/posts");
        then.status(200).json_body(json!([feed_post()]));
    });

    let app = TestApp::bootstrap(gateway(&server), signed_in("student"), Tz::UTC)
        .await
        .expect("bootstrap");

    let cards = app
        .page()
        .list(ListId::StudentPosts)
        .expect("student list")
        .cards();
    assert_eq!(cards.len(), 1);
    assert!(cards[0].delete.is_none());
}

#[tokio::test]
async fn successful_delete_refetches_admin_feed_once() {
    let server = MockServer::start();
    let feed = server.mock(|when, then| {
        when.method("GET").path("/api/admin/posts");
        then.status(200).json_body(json!([admin_post(5)]));
    });
    let delete = server.mock(|when, then| {
        when.method("DELETE")
            .path("/api/admin/delete_post/5")
            .header("authorization", "Bearer tok");
        then.status(200)
            .json_body(json!({"message": "Post 5 deleted successfully."}));
    });

    let mut app = TestApp::bootstrap(gateway(&server), signed_in("school_admin"), Tz::UTC)
        .await
        .expect("bootstrap");
    feed.assert_calls(1);

    let outcome = app
        .dispatch(Event::DeletePost { post_id: 5 })
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Completed);
    delete.assert();
    feed.assert_calls(2);
    assert_eq!(
        latest_toast(&app),
        (ToastKind::Success, POST_DELETED.to_string())
    );
}

#[tokio::test]
async fn rejected_delete_toasts_and_skips_refetch() {
    let server = MockServer::start();
    let feed = server.mock(|when, then| {
        when.method("GET").path("/api/admin/posts");
        then.status(200).json_body(json!([admin_post(5)]));
    });
    server.mock(|when, then| {
        when.method("DELETE").path("/api/admin/delete_post/5");
        then.status(404).json_body(json!({"message": "Post not found"}));
    });

    let mut app = TestApp::bootstrap(gateway(&server), signed_in("school_admin"), Tz::UTC)
        .await
        .expect("bootstrap");

    let outcome = app
        .dispatch(Event::DeletePost { post_id: 5 })
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Failed);
    feed.assert_calls(1);
    assert_eq!(
        latest_toast(&app),
        (ToastKind::Error, "Failed to delete post: Post not found".to_string())
    );
    assert_eq!(
        app.page()
            .list(ListId::AdminPosts)
            .expect("admin list")
            .cards()
            .len(),
        1
    );
}

#[tokio::test]
async fn delete_against_unreachable_backend_is_network_error() {
    let mut app = TestApp::bootstrap(unreachable_gateway(), signed_in("school_admin"), Tz::UTC)
        .await
        .expect("bootstrap");

    let outcome = app
        .dispatch(Event::DeletePost { post_id: 5 })
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Failed);
    assert_eq!(
        latest_toast(&app),
        (ToastKind::Error, DELETE_NETWORK_ERROR.to_string())
    );
}

#[tokio::test]
async fn logout_clears_session_but_keeps_theme() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/parent/posts");
        then.status(200).json_body(json!([]));
    });

    let store = signed_in("parent");
    store.set_many(&[("theme", "dark")]).expect("seed theme");
    let mut app = TestApp::bootstrap(gateway(&server), store.clone(), Tz::UTC)
        .await
        .expect("bootstrap");

    let outcome = app.dispatch(Event::Logout).await.expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(stored_keys(&store), BTreeSet::from(["theme".to_string()]));
    assert!(app.page().is_visible(SectionId::Login));
    assert!(app.page().post_lists.is_empty());

    let reloaded = TestApp::bootstrap(gateway(&server), store, Tz::UTC)
        .await
        .expect("bootstrap");
    assert!(reloaded.session().is_none());
    assert!(reloaded.page().is_visible(SectionId::Login));
    assert_eq!(reloaded.page().theme, Theme::Dark);
}

#[tokio::test]
async fn theme_toggle_survives_reload() {
    let store = Arc::new(MemoryStore::new());
    let mut app = TestApp::bootstrap(unreachable_gateway(), store.clone(), Tz::UTC)
        .await
        .expect("bootstrap");
    assert_eq!(app.page().theme_toggle_label, "Dark Mode");

    app.dispatch(Event::ToggleTheme).await.expect("dispatch");
    assert_eq!(app.page().theme, Theme::Dark);

    let reloaded = TestApp::bootstrap(unreachable_gateway(), store, Tz::UTC)
        .await
        .expect("bootstrap");
    assert_eq!(reloaded.page().theme, Theme::Dark);
    assert_eq!(reloaded.page().theme_toggle_label, "Light Mode");
}

#[tokio::test]
async fn teacher_sees_post_form_and_fetches_nothing() {
    let server = MockServer::start();
    let any_get = server.mock(|when, then| {
        when.method("GET");
        then.status(200).json_body(json!([]));
    });

    let app = TestApp::bootstrap(gateway(&server), signed_in("teacher"), Tz::UTC)
        .await
        .expect("bootstrap");

    assert!(app.page().is_visible(SectionId::TeacherDashboard));
    assert!(app.page().post_lists.is_empty());
    any_get.assert_calls(0);
}

#[tokio::test]
async fn teacher_creates_post_and_form_resets() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST")
            .path("/api/teacher/create_post")
            .header("authorization", "Bearer tok")
            .json_body(json!({"title": "Trip", "content": "Monday", "class_id": 2}));
        then.status(201)
            .json_body(json!({"message": "Post created successfully"}));
    });

    let mut app = TestApp::bootstrap(gateway(&server), signed_in("teacher"), Tz::UTC)
        .await
        .expect("bootstrap");

    let outcome = app
        .dispatch(Event::SubmitPost {
            title: "Trip".into(),
            content: "Monday".into(),
            class_id: 2,
        })
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Completed);
    create.assert();
    assert!(app.page().post_form.is_blank());
    assert_eq!(
        latest_toast(&app),
        (ToastKind::Success, POST_CREATED.to_string())
    );
}

#[tokio::test]
async fn rejected_post_keeps_form_input() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/api/teacher/create_post");
        then.status(403)
            .json_body(json!({"message": "Unauthorized access."}));
    });

    let mut app = TestApp::bootstrap(gateway(&server), signed_in("teacher"), Tz::UTC)
        .await
        .expect("bootstrap");

    let outcome = app
        .dispatch(Event::SubmitPost {
            title: "Trip".into(),
            content: "Monday".into(),
            class_id: 2,
        })
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Failed);
    assert_eq!(app.page().post_form.title, "Trip");
    assert_eq!(app.page().post_form.class_id, Some(2));
    assert_eq!(
        latest_toast(&app),
        (ToastKind::Error, "Unauthorized access.".to_string())
    );
}

#[tokio::test]
async fn posting_without_session_makes_no_request() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST").path("/api/teacher/create_post");
        then.status(201);
    });

    let mut app = TestApp::bootstrap(gateway(&server), Arc::new(MemoryStore::new()), Tz::UTC)
        .await
        .expect("bootstrap");

    let outcome = app
        .dispatch(Event::SubmitPost {
            title: "Trip".into(),
            content: "Monday".into(),
            class_id: 2,
        })
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Failed);
    create.assert_calls(0);
    assert_eq!(
        latest_toast(&app),
        (ToastKind::Error, LOGIN_REQUIRED.to_string())
    );
}

#[tokio::test]
async fn stored_session_with_unknown_role_is_ignored() {
    let app = TestApp::bootstrap(unreachable_gateway(), signed_in("janitor"), Tz::UTC)
        .await
        .expect("bootstrap");

    assert!(app.session().is_none());
    assert!(app.page().is_visible(SectionId::Login));
}

#[tokio::test]
async fn login_as_another_user_replaces_session_and_dashboard() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/parent/posts");
        then.status(200).json_body(json!([]));
    });
    server.mock(|when, then| {
        when.method("POST").path("/api/login");
        then.status(200).json_body(json!({
            "access_token": "admin-jwt",
            "user": {"id": 31, "first_name": "Dana", "role": "school_admin"}
        }));
    });
    server.mock(|when, then| {
        when.method("GET")
            .path("/api/admin/posts")
            .header("authorization", "Bearer admin-jwt");
        then.status(200).json_body(json!([admin_post(5)]));
    });

    let store = signed_in("parent");
    let mut app = TestApp::bootstrap(gateway(&server), store.clone(), Tz::UTC)
        .await
        .expect("bootstrap");
    assert!(app.page().list(ListId::ParentPosts).is_some());

    let outcome = app
        .dispatch(Event::SubmitLogin(credentials()))
        .await
        .expect("dispatch");

    assert_eq!(outcome, DispatchOutcome::Completed);
    let stored = store.snapshot().expect("snapshot");
    assert_eq!(stored.len(), 4);
    assert_eq!(stored["accessToken"], "admin-jwt");
    assert_eq!(stored["userRole"], "school_admin");
    assert_eq!(stored["userId"], "31");
    assert_eq!(stored["userName"], "Dana");

    assert!(app.page().is_visible(SectionId::AdminDashboard));
    assert_eq!(
        app.page().post_lists.keys().copied().collect::<Vec<_>>(),
        [ListId::AdminPosts]
    );
    let text = views::render_text(app.page()).expect("render");
    assert!(text.contains("#admin-posts-list"));
    assert!(!text.contains("#parent-posts-list"));
}

#[tokio::test]
async fn delete_from_parent_session_leaves_parent_list_alone() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/parent/posts");
        then.status(200).json_body(json!([feed_post()]));
    });
    server.mock(|when, then| {
        when.method("DELETE").path("/api/admin/delete_post/5");
        then.status(200)
            .json_body(json!({"message": "Post 5 deleted successfully."}));
    });
    let admin_feed = server.mock(|when, then| {
        when.method("GET").path("/api/admin/posts");
        then.status(200).json_body(json!([admin_post(5)]));
    });

    let mut app = TestApp::bootstrap(gateway(&server), signed_in("parent"), Tz::UTC)
        .await
        .expect("bootstrap");

    app.dispatch(Event::DeletePost { post_id: 5 })
        .await
        .expect("dispatch");

    admin_feed.assert_calls(0);
    assert_eq!(
        latest_toast(&app),
        (ToastKind::Success, POST_DELETED.to_string())
    );
    assert!(app.page().is_visible(SectionId::ParentDashboard));
    assert_eq!(
        app.page().post_lists.keys().copied().collect::<Vec<_>>(),
        [ListId::ParentPosts]
    );
    let text = views::render_text(app.page()).expect("render");
    assert!(!text.contains("#admin-posts-list"));
}
