//! End-to-end tests over the in-process router.
//!
//! Each test builds the full application (session layer included) and
//! drives it with `tower::ServiceExt::oneshot`, carrying the session
//! cookie between requests by hand.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use secrecy::SecretString;
use tower::ServiceExt;

use minicrm_server::config::ServerConfig;
use minicrm_server::state::AppState;

struct TestApp {
    app: Router,
    state: AppState,
}

fn test_config() -> ServerConfig {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    ServerConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:8880".to_string(),
        session_secret: SecretString::from("kJ8f2mQ9xL4vR7nW1pS6tY3bZ0cD5gH8aE2iU4oM"),
        security_log: std::env::temp_dir().join(format!(
            "minicrm-web-flow-{}-{n}/security.log",
            std::process::id()
        )),
        sentry_dsn: None,
    }
}

fn build_app() -> TestApp {
    let state = AppState::new(test_config());
    TestApp {
        app: minicrm_server::app(state.clone()),
        state,
    }
}

async fn get(app: &Router, path: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(
    app: &Router,
    path: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Extract the session cookie pair from a response, if one was set.
fn session_cookie(res: &Response<Body>) -> Option<String> {
    let value = res.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    Some(value.split(';').next()?.to_string())
}

fn location(res: &Response<Body>) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

async fn body_text(res: Response<Body>) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Sign up and log in `email`, returning the session cookie.
async fn login(app: &Router, email: &str, password: &str, name: &str) -> String {
    let res = post_form(
        app,
        "/signup",
        &format!("email={email}&password={password}&name={name}"),
        None,
    )
    .await;
    assert!(res.status().is_redirection());

    let res = post_form(
        app,
        "/login",
        &format!("email={email}&password={password}"),
        None,
    )
    .await;
    assert!(res.status().is_redirection());
    assert_eq!(location(&res), "/dashboard");
    session_cookie(&res).expect("login should establish a session")
}

#[tokio::test]
async fn health_returns_ok() {
    let t = build_app();
    let res = get(&t.app, "/health", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "ok");
}

#[tokio::test]
async fn public_pages_render() {
    let t = build_app();
    for path in ["/", "/signup", "/login"] {
        let res = get(&t.app, path, None).await;
        assert_eq!(res.status(), StatusCode::OK, "GET {path}");
    }
}

#[tokio::test]
async fn signup_redirects_to_login() {
    let t = build_app();
    let res = post_form(&t.app, "/signup", "email=a%40x.com&password=pw&name=A", None).await;
    assert!(res.status().is_redirection());
    assert_eq!(location(&res), "/login");
    assert_eq!(t.state.users().count().await, 1);
}

#[tokio::test]
async fn signup_with_missing_field_is_400() {
    let t = build_app();
    let res = post_form(&t.app, "/signup", "email=a%40x.com&password=pw", None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(res).await, "All fields are required");
    assert_eq!(t.state.users().count().await, 0);
}

#[tokio::test]
async fn duplicate_signup_is_400() {
    let t = build_app();
    post_form(&t.app, "/signup", "email=a%40x.com&password=pw&name=A", None).await;
    let res = post_form(&t.app, "/signup", "email=a%40x.com&password=pw&name=A", None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(res).await, "Email already exists");
    assert_eq!(t.state.users().count().await, 1);
}

#[tokio::test]
async fn wrong_password_is_401_and_no_session() {
    let t = build_app();
    post_form(&t.app, "/signup", "email=a%40x.com&password=pw&name=A", None).await;

    let res = post_form(&t.app, "/login", "email=a%40x.com&password=wrong", None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(res).await, "Invalid credentials");
}

#[tokio::test]
async fn unknown_email_fails_like_wrong_password() {
    let t = build_app();
    let res = post_form(&t.app, "/login", "email=ghost%40x.com&password=pw", None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(res).await, "Invalid credentials");
}

#[tokio::test]
async fn protected_pages_redirect_anonymous_to_login() {
    let t = build_app();
    for path in ["/dashboard", "/logs"] {
        let res = get(&t.app, path, None).await;
        assert!(res.status().is_redirection(), "GET {path}");
        assert_eq!(location(&res), "/login", "GET {path}");
    }
}

#[tokio::test]
async fn anonymous_customer_post_is_401() {
    let t = build_app();
    let res = post_form(&t.app, "/customer", "name=Acme&email=ops%40acme.test", None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(t.state.customers().count().await, 0);
}

#[tokio::test]
async fn dashboard_renders_for_logged_in_user() {
    let t = build_app();
    let cookie = login(&t.app, "a%40x.com", "pw", "A").await;

    let res = get(&t.app, "/dashboard", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("Welcome, A"));
    assert!(body.contains("a@x.com"));
}

#[tokio::test]
async fn customer_creation_flow() {
    let t = build_app();
    let cookie = login(&t.app, "a%40x.com", "pw", "A").await;

    let res = post_form(
        &t.app,
        "/customer",
        "name=Acme&email=ops%40acme.test",
        Some(&cookie),
    )
    .await;
    assert!(res.status().is_redirection());
    assert_eq!(location(&res), "/dashboard");

    let res = get(&t.app, "/dashboard", Some(&cookie)).await;
    let body = body_text(res).await;
    assert!(body.contains("Acme"));
    assert!(body.contains("ops@acme.test"));
}

#[tokio::test]
async fn customer_with_missing_field_is_400() {
    let t = build_app();
    let cookie = login(&t.app, "a%40x.com", "pw", "A").await;

    let res = post_form(&t.app, "/customer", "name=Acme&email=", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(res).await, "Name and email are required");
    assert_eq!(t.state.customers().count().await, 0);
}

#[tokio::test]
async fn customer_ids_increase_from_one() {
    let t = build_app();
    let cookie = login(&t.app, "a%40x.com", "pw", "A").await;

    for i in 0..3 {
        post_form(
            &t.app,
            "/customer",
            &format!("name=Customer{i}&email=c{i}%40x.com"),
            Some(&cookie),
        )
        .await;
    }

    let customers = t.state.customers().list_all().await;
    let ids: Vec<i32> = customers.iter().map(|c| c.id.as_i32()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn every_mutating_action_appends_one_log_line() {
    let t = build_app();

    // signup, duplicate signup, failed login, successful login
    post_form(&t.app, "/signup", "email=a%40x.com&password=pw&name=A", None).await;
    post_form(&t.app, "/signup", "email=a%40x.com&password=pw&name=A", None).await;
    post_form(&t.app, "/login", "email=a%40x.com&password=wrong", None).await;
    let res = post_form(&t.app, "/login", "email=a%40x.com&password=pw", None).await;
    let cookie = session_cookie(&res).unwrap();

    // failed then successful customer create
    post_form(&t.app, "/customer", "name=&email=", Some(&cookie)).await;
    post_form(
        &t.app,
        "/customer",
        "name=Acme&email=ops%40acme.test",
        Some(&cookie),
    )
    .await;

    t.state.seclog().flush().await;
    let entries = t.state.seclog().read_entries().await.unwrap();
    assert_eq!(entries.len(), 6);

    let events: Vec<&str> = entries.iter().map(|e| e.event.as_str()).collect();
    assert_eq!(events[0], "User signed up: a@x.com");
    assert_eq!(events[1], "Signup failure: Email a@x.com already exists");
    assert_eq!(events[2], "Login failure: Invalid credentials for a@x.com");
    assert_eq!(events[3], "User logged in: a@x.com");
    assert_eq!(events[4], "Customer creation failed: Missing required fields");
    assert!(events[5].starts_with("Customer created: {"));
    assert!(events[5].contains(r#""email":"ops@acme.test""#));
}

#[tokio::test]
async fn logs_page_shows_signup_and_login_events() {
    let t = build_app();
    let cookie = login(&t.app, "a%40x.com", "pw", "A").await;

    t.state.seclog().flush().await;
    let res = get(&t.app, "/logs", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_text(res).await;
    assert!(body.contains("User signed up: a@x.com"));
    assert!(body.contains("User logged in: a@x.com"));
}

#[tokio::test]
async fn logout_destroys_the_session() {
    let t = build_app();
    let cookie = login(&t.app, "a%40x.com", "pw", "A").await;

    let res = post_form(&t.app, "/logout", "", Some(&cookie)).await;
    assert!(res.status().is_redirection());
    assert_eq!(location(&res), "/");

    // The old cookie no longer grants access
    let res = get(&t.app, "/dashboard", Some(&cookie)).await;
    assert!(res.status().is_redirection());
    assert_eq!(location(&res), "/login");

    t.state.seclog().flush().await;
    let entries = t.state.seclog().read_entries().await.unwrap();
    assert!(
        entries
            .iter()
            .any(|e| e.event == "User logged out: a@x.com")
    );
}

#[tokio::test]
async fn concurrent_customer_creates_get_distinct_ids() {
    let t = build_app();
    let cookie = login(&t.app, "a%40x.com", "pw", "A").await;

    let first = post_form(
        &t.app,
        "/customer",
        "name=One&email=one%40x.com",
        Some(&cookie),
    );
    let second = post_form(
        &t.app,
        "/customer",
        "name=Two&email=two%40x.com",
        Some(&cookie),
    );
    let (first, second) = tokio::join!(first, second);
    assert!(first.status().is_redirection());
    assert!(second.status().is_redirection());

    let customers = t.state.customers().list_all().await;
    assert_eq!(customers.len(), 2);
    assert_ne!(customers[0].id, customers[1].id);
}
