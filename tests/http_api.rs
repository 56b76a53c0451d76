use std::sync::Arc;

use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use editora::search::SearchSettings;
use editora::server::{ServerState, serve_on};
use editora::storage::Database;

struct TestServer {
    base: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<editora::Result<()>>,
}

impl TestServer {
    async fn start(db: Database) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = oneshot::channel::<()>();
        let state = ServerState::new(Arc::new(db), SearchSettings::default());
        let handle = tokio::spawn(serve_on(listener, state, async move {
            let _ = rx.await;
        }));
        Self {
            base,
            shutdown: Some(tx),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

fn seeded() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.seed_demo().unwrap();
    db
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn healthz_reports_ok() {
    let server = TestServer::start(Database::open_in_memory().unwrap()).await;
    let response = reqwest::get(server.url("/healthz")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("x-request-id"));
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn search_parses_query_string() {
    let server = TestServer::start(seeded()).await;
    let body: Value = reqwest::get(server.url(
        "/api/editors/search?maxRate=28&sortBy=price_low&limit=abc&page=0",
    ))
    .await
    .unwrap()
    .json()
    .await
    .unwrap();

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["user"]["username"], "sofia_shorts");
    assert_eq!(results[1]["user"]["username"], "lucia_color");
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 12);
    assert!(!body.to_string().contains("password"));
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn editor_detail_and_counters() {
    let server = TestServer::start(seeded()).await;
    let client = reqwest::Client::new();

    let detail: Value = client
        .get(server.url("/api/editors/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detail["portfolio"].as_array().unwrap().len(), 2);
    assert_eq!(detail["portfolio"][0]["order"], 0);

    let counters: Value = client
        .post(server.url("/api/editors/1/view"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(counters["viewCount"], 1);

    let counters: Value = client
        .post(server.url("/api/editors/1/contact-click"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(counters["contactClickCount"], 1);
    assert_eq!(counters["viewCount"], 1);

    let reviews: Value = client
        .get(server.url("/api/editors/1/reviews"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reviews["summary"]["count"], 1);
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_entities_are_404_with_error_body() {
    let server = TestServer::start(seeded()).await;
    for path in ["/api/editors/999", "/api/editors/999/portfolio", "/api/users/999"] {
        let response = reqwest::get(server.url(path)).await.unwrap();
        assert_eq!(response.status(), 404, "{path}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"]["code"], "not_found");
    }

    let response = reqwest::Client::new()
        .post(server.url("/api/editors/999/view"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn orphaned_editor_is_hidden() {
    let db = seeded();
    let owner = db.get_user_by_username("valentina_cuts").unwrap().unwrap();
    let profile = db.get_profile_by_user(owner.id).unwrap().unwrap();
    db.delete_user(owner.id).unwrap();

    let server = TestServer::start(db).await;
    let response = reqwest::get(server.url(&format!("/api/editors/{}", profile.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let body: Value = reqwest::get(server.url("/api/editors/search"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["pagination"]["total"], 4);
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn users_and_briefs_are_public_views() {
    let server = TestServer::start(seeded()).await;
    let user: Value = reqwest::get(server.url("/api/users/1"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(user["username"], "demo_client");
    assert!(user.get("password").is_none());

    let briefs: Value = reqwest::get(server.url("/api/briefs"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(briefs, Value::Array(Vec::new()));
    server.stop().await;
}
