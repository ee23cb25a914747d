//! API integration tests
//!
//! Each test starts its own server on an ephemeral port, backed by a JSON file
//! in a temporary directory.

use std::path::PathBuf;

use library_borrow_server::{api, config::AppConfig, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;

struct TestServer {
    base_url: String,
    db_path: PathBuf,
    client: Client,
    // Keeps the backing directory alive for the duration of the test
    _dir: TempDir,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request");
        let status = response.status();
        (status, response.json().await.expect("Failed to parse response"))
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request");
        let status = response.status();
        (status, response.json().await.expect("Failed to parse response"))
    }

    async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send request");
        let status = response.status();
        (status, response.json().await.expect("Failed to parse response"))
    }

    fn stored_document(&self) -> Value {
        let raw = std::fs::read_to_string(&self.db_path).expect("Document was not persisted");
        serde_json::from_str(&raw).expect("Persisted document is not JSON")
    }
}

async fn spawn_server(initial: Option<Value>) -> TestServer {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("db.json");
    if let Some(document) = initial {
        std::fs::write(&db_path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    }

    let mut config = AppConfig::default();
    config.storage.path = db_path.clone();
    let app = api::router(AppState::load(config).await);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    TestServer {
        base_url: format!("http://{}", addr),
        db_path,
        client: Client::new(),
        _dir: dir,
    }
}

fn sample_document() -> Value {
    json!({
        "LibraryManagementSystem": {
            "borrow": {
                "borrow_transactionid": "T-1",
                "borrow_bookbatch": [
                    {
                        "batch_id": 1,
                        "books": [
                            { "book_id": 7, "title": "Dune", "authors": [{ "aut_id": 1, "name": "A" }] },
                            { "book_id": "8", "title": "Emma", "authors": [{ "aut_id": 1, "name": "A-dup" }] }
                        ],
                        "student": { "stud_id": "s1", "name": "Ana" }
                    },
                    {
                        "batch_id": 2,
                        "books": [
                            { "book_id": "7", "title": "Dune (copy)", "authors": [{ "aut_id": 2, "name": "B" }] }
                        ],
                        "student": null
                    }
                ]
            }
        }
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = spawn_server(None).await;

    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = server.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["persisted"], true);
    assert_eq!(body["storage_path"], server.db_path.display().to_string());
}

#[tokio::test]
async fn test_empty_store_starts_with_empty_borrow() {
    let server = spawn_server(None).await;

    let (status, body) = server.get("/borrow").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (_, books) = server.get("/borrow/books").await;
    assert_eq!(books, json!([]));
    let (_, students) = server.get("/borrow/students").await;
    assert_eq!(students, json!([]));
    let (_, authors) = server.get("/borrow/authors").await;
    assert_eq!(authors, json!([]));
}

#[tokio::test]
async fn test_replace_transaction_round_trip() {
    let server = spawn_server(None).await;
    let transaction = json!({
        "borrow_transactionid": "T-9",
        "borrow_bookbatch": [{ "batch_id": 4, "books": [], "student": { "stud_id": "s4" } }]
    });

    let (status, body) = server.post("/borrow", transaction.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Borrow transaction saved!");
    assert_eq!(body["data"], transaction);

    let (_, current) = server.get("/borrow").await;
    assert_eq!(current, transaction);
    assert_eq!(
        server.stored_document(),
        json!({ "LibraryManagementSystem": { "borrow": transaction.clone() } })
    );

    // A fresh server over the same file sees the same transaction
    let reloaded = AppState::load({
        let mut config = AppConfig::default();
        config.storage.path = server.db_path.clone();
        config
    })
    .await;
    assert_eq!(reloaded.services.borrow.get_transaction().await, transaction);
}

#[tokio::test]
async fn test_delete_transaction() {
    let server = spawn_server(Some(sample_document())).await;

    let (status, body) = server.delete("/borrow/t-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Transaction not found");

    let (status, body) = server.delete("/borrow/T-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Borrow transaction T-1 deleted!");

    let (_, current) = server.get("/borrow").await;
    assert_eq!(current, json!({}));
    assert_eq!(server.stored_document()["LibraryManagementSystem"]["borrow"], json!({}));
}

#[tokio::test]
async fn test_books_lookup_is_loose() {
    let server = spawn_server(Some(sample_document())).await;

    let (_, books) = server.get("/borrow/books").await;
    assert_eq!(books.as_array().unwrap().len(), 3);
    assert_eq!(books[2]["title"], "Dune (copy)");

    let (status, book) = server.get("/borrow/books/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["title"], "Dune");

    let (status, body) = server.get("/borrow/books/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_add_book_creates_single_default_batch() {
    let server = spawn_server(None).await;

    let (status, body) = server.post("/borrow/books", json!({ "book_id": "1", "title": "First" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Book added!");
    assert_eq!(body["data"]["title"], "First");

    server.post("/borrow/books", json!({ "book_id": "2", "title": "Second" })).await;

    let (_, current) = server.get("/borrow").await;
    assert_eq!(
        current,
        json!({ "borrow_bookbatch": [{
            "batch_id": 1,
            "books": [
                { "book_id": "1", "title": "First" },
                { "book_id": "2", "title": "Second" }
            ],
            "student": {}
        }] })
    );
    assert_eq!(server.stored_document()["LibraryManagementSystem"]["borrow"], current);
}

#[tokio::test]
async fn test_delete_book_removes_first_match_only() {
    let server = spawn_server(Some(sample_document())).await;

    let (status, body) = server.delete("/borrow/books/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book 7 deleted!");

    let (_, books) = server.get("/borrow/books").await;
    let titles: Vec<_> = books.as_array().unwrap().iter().map(|b| b["title"].clone()).collect();
    assert_eq!(titles, vec![json!("Emma"), json!("Dune (copy)")]);

    let before = server.stored_document();
    let (status, _) = server.delete("/borrow/books/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(server.stored_document(), before);
}

#[tokio::test]
async fn test_students() {
    let server = spawn_server(Some(sample_document())).await;

    let (_, students) = server.get("/borrow/students").await;
    assert_eq!(students, json!([{ "stud_id": "s1", "name": "Ana" }]));

    let (status, _) = server.get("/borrow/students/S1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, student) = server.get("/borrow/students/s1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(student["name"], "Ana");

    let (status, body) = server.post("/borrow/students", json!({ "stud_id": "s2", "name": "Ben" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Student saved!");
    let (status, _) = server.get("/borrow/students/s1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = server.delete("/borrow/students/s2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student s2 deleted!");
    assert_eq!(
        server.stored_document()["LibraryManagementSystem"]["borrow"]["borrow_bookbatch"][0]["student"],
        Value::Null
    );

    let (status, body) = server.delete("/borrow/students/s2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found");
}

#[tokio::test]
async fn test_authors_are_deduplicated() {
    let server = spawn_server(Some(sample_document())).await;

    let (_, authors) = server.get("/borrow/authors").await;
    assert_eq!(
        authors,
        json!([{ "aut_id": 1, "name": "A" }, { "aut_id": 2, "name": "B" }])
    );

    let (status, author) = server.get("/borrow/authors/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(author["name"], "B");

    let (status, body) = server.get("/borrow/authors/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Author not found");
}

#[tokio::test]
async fn test_search_requires_query() {
    let server = spawn_server(None).await;

    for path in ["/search", "/search?q=", "/search?q=%20"] {
        let (status, body) = server.get(path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(body["message"], "Provide a query via ?q=");
    }
}

#[tokio::test]
async fn test_search_reports_overlapping_matches() {
    let server = spawn_server(Some(json!({
        "LibraryManagementSystem": {
            "borrow": {
                "borrow_bookbatch": [{
                    "batch_id": 1,
                    "books": [{ "book_id": "7", "title": "X" }],
                    "student": { "stud_id": "s1" }
                }]
            }
        }
    })))
    .await;

    let (status, body) = server.get("/search?q=x").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "x");

    let results = body["results"].as_array().unwrap();
    assert_eq!(body["count"], results.len());

    let book_path = "LibraryManagementSystem.borrow.borrow_bookbatch.0.books.0";
    let title_path = format!("{}.title", book_path);
    let book = results.iter().position(|r| r["path"] == book_path).unwrap();
    let title = results.iter().position(|r| r["path"] == title_path.as_str()).unwrap();
    assert!(book < title);
    assert_eq!(results[book]["value"], json!({ "book_id": "7", "title": "X" }));
    assert_eq!(results[title]["value"], "X");
    assert_eq!(results[0]["path"], "");
}

#[tokio::test]
async fn test_delete_transaction_named_like_a_collection() {
    let server = spawn_server(Some(json!({
        "LibraryManagementSystem": { "borrow": { "borrow_transactionid": "books" } }
    })))
    .await;

    for path in ["/borrow/students", "/borrow/authors"] {
        let (status, body) = server.delete(path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", path);
        assert_eq!(body["message"], "Transaction not found");
    }

    let (status, body) = server.delete("/borrow/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Borrow transaction books deleted!");

    let (_, current) = server.get("/borrow").await;
    assert_eq!(current, json!({}));
    assert_eq!(server.stored_document()["LibraryManagementSystem"]["borrow"], json!({}));
}

#[tokio::test]
async fn test_replace_with_null_stores_empty_transaction() {
    let server = spawn_server(Some(sample_document())).await;

    let (status, body) = server.post("/borrow", Value::Null).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"], json!({}));

    let (_, current) = server.get("/borrow").await;
    assert_eq!(current, json!({}));
    assert_eq!(
        server.stored_document(),
        json!({ "LibraryManagementSystem": { "borrow": {} } })
    );
}
