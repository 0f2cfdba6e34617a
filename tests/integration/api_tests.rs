//! API integration tests against an in-process catalog service

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use reqwest::Client;
use serde_json::{json, Value};

use library_desk::{
    api::{CatalogApi, HttpCatalogApi},
    config::NotificationConfig,
    models::{Book, BookDraft, BorrowRequest},
    view::CatalogView,
    AppError, Desk,
};

#[derive(Default)]
struct Catalog {
    books: Vec<Book>,
    next_id: i64,
}

type Shared = Arc<Mutex<Catalog>>;

fn message(status: StatusCode, text: String) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn not_found(id: i64) -> Response {
    message(StatusCode::NOT_FOUND, format!("Book not found with id: {}", id))
}

async fn list(State(state): State<Shared>) -> Json<Vec<Book>> {
    Json(state.lock().unwrap().books.clone())
}

async fn create(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let title = body["title"].as_str().unwrap_or_default().trim().to_string();
    if title.is_empty() {
        return message(StatusCode::BAD_REQUEST, "title required".to_string());
    }

    let mut catalog = state.lock().unwrap();
    catalog.next_id += 1;
    let book = Book {
        id: catalog.next_id,
        title,
        author: body["author"].as_str().unwrap_or_default().to_string(),
        category: body["category"].as_str().map(String::from),
        available: true,
        borrowed_by: None,
    };
    catalog.books.push(book.clone());
    (StatusCode::CREATED, Json(book)).into_response()
}

async fn update(State(state): State<Shared>, Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    let mut catalog = state.lock().unwrap();
    let Some(book) = catalog.books.iter_mut().find(|b| b.id == id) else {
        return not_found(id);
    };
    book.title = body["title"].as_str().unwrap_or_default().to_string();
    book.author = body["author"].as_str().unwrap_or_default().to_string();
    book.category = body["category"].as_str().map(String::from);
    Json(book.clone()).into_response()
}

async fn remove(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut catalog = state.lock().unwrap();
    let Some(index) = catalog.books.iter().position(|b| b.id == id) else {
        // No body at all
        return StatusCode::NOT_FOUND.into_response();
    };
    if !catalog.books[index].available {
        return message(StatusCode::CONFLICT, "Cannot delete a borrowed book".to_string());
    }
    catalog.books.remove(index);
    StatusCode::NO_CONTENT.into_response()
}

async fn borrow(State(state): State<Shared>, Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    let mut catalog = state.lock().unwrap();
    let Some(book) = catalog.books.iter_mut().find(|b| b.id == id) else {
        return not_found(id);
    };
    if !book.available {
        let holder = book.borrowed_by.clone().unwrap_or_default();
        return message(StatusCode::CONFLICT, format!("Book is already borrowed by: {}", holder));
    }
    book.available = false;
    book.borrowed_by = body["borrowerName"].as_str().map(String::from);
    Json(book.clone()).into_response()
}

async fn give_back(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut catalog = state.lock().unwrap();
    let Some(book) = catalog.books.iter_mut().find(|b| b.id == id) else {
        return not_found(id);
    };
    book.available = true;
    book.borrowed_by = None;
    Json(book.clone()).into_response()
}

/// Applies the return but answers `200` with no body
async fn give_back_quietly(state: State<Shared>, id: Path<i64>) -> StatusCode {
    give_back(state, id).await.status()
}

fn catalog_router(state: Shared) -> Router {
    Router::new()
        .route("/books", get(list).post(create))
        .route("/books/:id", put(update).delete(remove))
        .route("/books/:id/borrow", put(borrow))
        .route("/books/:id/return", put(give_back))
        .with_state(state)
}

/// Like [`catalog_router`], but accepted mutations carry no body
fn bodiless_router(state: Shared) -> Router {
    Router::new()
        .route("/books", get(list).post(|| async { StatusCode::CREATED }))
        .route("/books/:id/return", put(give_back_quietly))
        .with_state(state)
}

/// Answers everything with a plain-text 500
fn broken_router() -> Router {
    Router::new().fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") })
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{}", addr)
}

async fn catalog_service(books: Vec<Book>) -> (HttpCatalogApi, Shared) {
    let next_id = books.iter().map(|b| b.id).max().unwrap_or(0);
    let state = Arc::new(Mutex::new(Catalog { books, next_id }));
    let base_url = serve(catalog_router(state.clone())).await;
    (HttpCatalogApi::with_client(Client::new(), &base_url), state)
}

fn dune() -> Book {
    Book {
        id: 1,
        title: "Dune".to_string(),
        author: "Herbert".to_string(),
        category: Some("Sci-Fi".to_string()),
        available: true,
        borrowed_by: None,
    }
}

#[tokio::test]
async fn test_list_books() {
    let (api, _) = catalog_service(vec![dune()]).await;
    let books = api.list_books().await.expect("list failed");
    assert_eq!(books, vec![dune()]);
}

#[tokio::test]
async fn test_create_and_update() {
    let (api, state) = catalog_service(vec![]).await;

    let created = api
        .create_book(&BookDraft::new("Emma", "Austen", "Classic"))
        .await
        .expect("create failed")
        .expect("created book not echoed");
    assert_eq!(created.id, 1);
    assert!(created.available);

    let updated = api
        .update_book(created.id, &BookDraft::new("Emma", "Jane Austen", "Classic").with_id(created.id))
        .await
        .expect("update failed")
        .expect("updated book not echoed");
    assert_eq!(updated.author, "Jane Austen");
    assert_eq!(state.lock().unwrap().books[0].author, "Jane Austen");
}

#[tokio::test]
async fn test_create_rejected_with_message() {
    let (api, _) = catalog_service(vec![]).await;
    let err = api
        .create_book(&BookDraft::new("", "X", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.to_string(), "title required");
}

#[tokio::test]
async fn test_update_missing_book() {
    let (api, _) = catalog_service(vec![]).await;
    let err = api
        .update_book(8, &BookDraft::new("Dune", "Herbert", "Sci-Fi"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Book not found with id: 8");
}

#[tokio::test]
async fn test_delete_no_content() {
    let (api, state) = catalog_service(vec![dune()]).await;
    api.delete_book(1).await.expect("delete failed");
    assert!(state.lock().unwrap().books.is_empty());
}

#[tokio::test]
async fn test_delete_without_body_falls_back() {
    let (api, _) = catalog_service(vec![]).await;
    let err = api.delete_book(5).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete");
}

#[tokio::test]
async fn test_borrow_conflict() {
    let mut lent = dune();
    lent.available = false;
    lent.borrowed_by = Some("Bob".to_string());
    let (api, _) = catalog_service(vec![lent]).await;

    let err = api
        .borrow_book(1, &BorrowRequest::new("Alice"))
        .await
        .unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(err.to_string(), "Book is already borrowed by: Bob");
}

#[tokio::test]
async fn test_broken_service_uses_fallbacks() {
    let base_url = serve(broken_router()).await;
    let api = HttpCatalogApi::with_client(Client::new(), &base_url);

    let err = api.list_books().await.unwrap_err();
    assert!(matches!(err, AppError::Fetch(_)));
    assert_eq!(err.to_string(), "Failed to fetch books");

    let draft = BookDraft::new("Dune", "Herbert", "Sci-Fi");
    assert_eq!(api.create_book(&draft).await.unwrap_err().to_string(), "Action failed");
    assert_eq!(api.update_book(1, &draft).await.unwrap_err().to_string(), "Action failed");
    assert_eq!(api.delete_book(1).await.unwrap_err().to_string(), "Failed to delete");
    assert_eq!(
        api.borrow_book(1, &BorrowRequest::new("Alice")).await.unwrap_err().to_string(),
        "Borrowing failed"
    );
    assert_eq!(api.return_book(1).await.unwrap_err().to_string(), "Return failed");
}

#[tokio::test]
async fn test_desk_lending_cycle() {
    let (api, _) = catalog_service(vec![dune()]).await;
    let mut desk = Desk::new(Arc::new(api), &NotificationConfig::default());
    desk.refresh().await.expect("initial load failed");

    desk.open_borrow(1);
    desk.submit_borrow("Alice").await.expect("borrow failed");
    let book = desk.store().find_by_id(1).expect("book vanished");
    assert_eq!(book.borrowed_by.as_deref(), Some("Alice"));
    assert!(book.is_consistent());

    // A second borrow is refused before reaching the service
    desk.open_borrow(1);
    let err = desk.submit_borrow("Carol").await.unwrap_err();
    assert_eq!(err.to_string(), "Book is already borrowed by: Alice");

    let prompt = desk.request_return(1);
    assert_eq!(prompt.message, "Are you sure you want to return 'Dune'?");
    desk.confirm().await.expect("nothing pending").expect("return failed");

    let book = desk.store().find_by_id(1).expect("book vanished");
    assert!(book.available);
    assert!(book.borrowed_by.is_none());
    assert_eq!(desk.toast().map(|t| t.message), Some("Book Returned!".to_string()));
}

#[tokio::test]
async fn test_desk_add_search_delete() {
    let (api, _) = catalog_service(vec![dune()]).await;
    let mut desk = Desk::new(Arc::new(api), &NotificationConfig::default());
    desk.refresh().await.expect("initial load failed");

    desk.open_add_form();
    desk.submit_form("The Hobbit", "Tolkien", "Fantasy")
        .await
        .expect("create failed");
    assert_eq!(desk.store().len(), 2);

    match desk.set_search_term("TOLK") {
        CatalogView::Cards(cards) => {
            assert_eq!(cards.len(), 1);
            assert_eq!(cards[0].title, "The Hobbit");
        }
        CatalogView::Empty => panic!("expected The Hobbit"),
    }

    let prompt = desk.request_delete(2);
    assert_eq!(prompt.message, "Delete 'The Hobbit' permanently?");
    desk.confirm().await.expect("nothing pending").expect("delete failed");

    assert!(desk.view().is_empty());
    assert_eq!(desk.toast().map(|t| t.message), Some("Book deleted".to_string()));
}

#[tokio::test]
async fn test_desk_delete_borrowed_is_declined_by_service() {
    let mut lent = dune();
    lent.available = false;
    lent.borrowed_by = Some("Bob".to_string());
    let (api, state) = catalog_service(vec![lent]).await;
    let mut desk = Desk::new(Arc::new(api), &NotificationConfig::default());
    desk.refresh().await.expect("initial load failed");

    desk.request_delete(1);
    let err = desk.confirm().await.expect("nothing pending").unwrap_err();
    assert_eq!(err.to_string(), "Cannot delete a borrowed book");
    assert_eq!(state.lock().unwrap().books.len(), 1);
    assert_eq!(desk.store().len(), 1);
}

#[tokio::test]
async fn test_accepted_without_body() {
    let state = Arc::new(Mutex::new(Catalog::default()));
    let base_url = serve(bodiless_router(state)).await;
    let api = HttpCatalogApi::with_client(Client::new(), &base_url);

    let created = api
        .create_book(&BookDraft::new("Emma", "Austen", "Classic"))
        .await
        .expect("an empty 201 is still a success");
    assert!(created.is_none());
}

#[tokio::test]
async fn test_desk_return_with_empty_body_reconciles() {
    let mut lent = dune();
    lent.available = false;
    lent.borrowed_by = Some("Bob".to_string());
    let state = Arc::new(Mutex::new(Catalog { books: vec![lent], next_id: 1 }));
    let base_url = serve(bodiless_router(state.clone())).await;
    let api = HttpCatalogApi::with_client(Client::new(), &base_url);

    let mut desk = Desk::new(Arc::new(api), &NotificationConfig::default());
    desk.refresh().await.expect("initial load failed");

    desk.request_return(1);
    desk.confirm().await.expect("nothing pending").expect("return failed");

    assert!(state.lock().unwrap().books[0].available);
    let book = desk.store().find_by_id(1).expect("book vanished");
    assert!(book.available);
    assert!(book.borrowed_by.is_none());
    assert_eq!(desk.toast().map(|t| t.message), Some("Book Returned!".to_string()));
}
